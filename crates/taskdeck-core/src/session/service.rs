//! Auth service trait.
//!
//! Defines the interface to the remote authentication endpoints.

use super::model::{AuthToken, Registration, UserProfile};
use crate::error::Result;
use async_trait::async_trait;

/// Service for exchanging credentials and checking sessions.
///
/// Implementations must never log passwords or token secrets.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// # Returns
    ///
    /// - `Ok(AuthToken)`: Credentials accepted
    /// - `Err(TaskdeckError::Auth)`: Invalid credentials
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken>;

    /// Provisions a new account.
    ///
    /// # Returns
    ///
    /// - `Ok(UserProfile)`: Account created
    /// - `Err(TaskdeckError::Validation)`: Conflicting or invalid fields
    async fn register(&self, registration: &Registration) -> Result<UserProfile>;

    /// Fetches the profile that `token` belongs to.
    ///
    /// Takes the token explicitly so a stored token can be checked before it
    /// becomes the active session.
    async fn profile(&self, token: &AuthToken) -> Result<UserProfile>;
}
