use std::fmt;

/// OAuth2 grants understood by the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
    ClientCredentials,
    RefreshToken { refresh_token: String },
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientCredentials => f.write_str("ClientCredentials"),
            Self::RefreshToken { .. } => f
                .debug_struct("RefreshToken")
                .field("refresh_token", &"..")
                .finish(),
        }
    }
}

impl Grant {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::ClientCredentials => "client_credentials",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    /// Form fields for the token request, client identity included.
    pub fn form<'a>(
        &'a self,
        client_id: &'a str,
        client_secret: &'a str,
    ) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![("grant_type", self.grant_type())];
        if let Self::RefreshToken { refresh_token } = self {
            form.push(("refresh_token", refresh_token.as_str()));
        }
        form.push(("client_id", client_id));
        form.push(("client_secret", client_secret));
        form
    }
}
