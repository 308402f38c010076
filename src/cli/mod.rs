//! CLI entry point for spotcred.

pub mod token;

use clap::{Parser, Subcommand};

/// Spotify token CLI
#[derive(Parser, Debug)]
#[command(name = "spotcred", version, about = "Mint and refresh Spotify access tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request an app token with the client-credentials grant
    Token(TokenArgs),
    /// Trade a refresh token for a user token
    Refresh(RefreshArgs),
    /// List the authorization scopes Spotify knows about
    Scopes,
}

/// Arguments for `spotcred token`.
#[derive(Parser, Debug)]
pub struct TokenArgs {
    /// Token endpoint override (defaults to SPOTIFY_TOKEN_URL or the Spotify endpoint)
    #[arg(long)]
    pub token_url: Option<String>,
}

/// Arguments for `spotcred refresh`.
#[derive(Parser, Debug)]
pub struct RefreshArgs {
    /// Refresh token previously issued to the user
    #[arg(short, long)]
    pub refresh_token: String,

    /// Token endpoint override (defaults to SPOTIFY_TOKEN_URL or the Spotify endpoint)
    #[arg(long)]
    pub token_url: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
