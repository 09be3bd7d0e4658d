//! Auth endpoint DTOs

use serde::{Deserialize, Serialize};
use taskdeck_core::session::AuthToken;

/// Form body for `POST /login`.
#[derive(Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl From<TokenResponse> for AuthToken {
    fn from(response: TokenResponse) -> Self {
        AuthToken::new(response.access_token)
    }
}
