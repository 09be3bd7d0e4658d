//! HttpAuthService - REST implementation of the auth endpoints.

use crate::dto::{LoginForm, TokenResponse};
use crate::http_client::ApiClient;
use crate::http_error::RequestTarget;
use async_trait::async_trait;
use taskdeck_core::config::ClientConfig;
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::session::{AuthService, AuthToken, Registration, UserProfile};

/// Auth service that talks to `/login`, `/register` and `/me`.
#[derive(Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
        })
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken> {
        let request = self
            .api
            .client()
            .post(self.api.url(&["login"]))
            .form(&LoginForm { username, password });

        let response: TokenResponse = self
            .api
            .send_json(request, "login", &RequestTarget::new("user", username))
            .await
            .map_err(|err| match err {
                // The login endpoint answers bad credentials with 400 on some deployments.
                TaskdeckError::Validation(message) => TaskdeckError::auth(message),
                other => other,
            })?;

        tracing::info!("[HttpAuthService] Login accepted for '{}'", username);
        Ok(response.into())
    }

    async fn register(&self, registration: &Registration) -> Result<UserProfile> {
        let request = self
            .api
            .client()
            .post(self.api.url(&["register"]))
            .json(registration);
        self.api
            .send_json(request, "register", &RequestTarget::new("user", &registration.username))
            .await
    }

    async fn profile(&self, token: &AuthToken) -> Result<UserProfile> {
        let request = self
            .api
            .client()
            .get(self.api.url(&["me"]))
            .bearer_auth(token.secret());
        self.api
            .send_json(request, "fetch profile", &RequestTarget::new("user", "me"))
            .await
            .map_err(|err| match err {
                // The token's user no longer exists.
                TaskdeckError::NotFound { .. } => TaskdeckError::auth("session user not found"),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::serve_once;

    #[tokio::test]
    async fn test_login_posts_form_and_returns_token() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"access_token":"jwt-abc","token_type":"bearer"}"#).await;
        let service = HttpAuthService::new(&ClientConfig::default().with_base_url(base_url)).unwrap();

        let token = service.login("ada", "s3cret").await.unwrap();
        assert_eq!(token.secret(), "jwt-abc");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /login "));
        assert!(request.to_lowercase().contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("username=ada&password=s3cret"));
    }

    #[tokio::test]
    async fn test_login_rejected_is_auth_error() {
        let (base_url, _server) = serve_once(
            "401 Unauthorized",
            r#"{"detail":"Incorrect username or password"}"#,
        )
        .await;
        let service = HttpAuthService::new(&ClientConfig::default().with_base_url(base_url)).unwrap();

        let err = service.login("ada", "wrong").await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_register_conflict_is_validation_error() {
        let (base_url, _server) =
            serve_once("400 Bad Request", r#"{"detail":"Username already taken"}"#).await;
        let service = HttpAuthService::new(&ClientConfig::default().with_base_url(base_url)).unwrap();

        let registration = Registration {
            email: "ada@example.com".into(),
            username: "ada".into(),
            password: "s3cret".into(),
        };
        let err = service.register(&registration).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Username already taken"));
    }
}
