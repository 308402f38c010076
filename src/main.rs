//! spotcred CLI binary entry point.

use spotcred::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let http = reqwest::Client::new();

    let result = match cli.command {
        Commands::Token(args) => spotcred::cli::token::handle_token(&http, args.token_url).await,
        Commands::Refresh(args) => {
            spotcred::cli::token::handle_refresh(&http, &args.refresh_token, args.token_url).await
        }
        Commands::Scopes => {
            spotcred::cli::token::handle_scopes();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
