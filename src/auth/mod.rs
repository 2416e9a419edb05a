pub mod models;

use crate::auth::models::{PasswordCredentials, SendOobCodeRequest, SendOobCodeResponse, TokenResponse};
use crate::core::parse_error_response;
use crate::session::{Session, SessionHandle};
use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use thiserror::Error;
use tracing::{debug, error};


#[derive(Error, Debug)]
pub enum AuthError {
    #[error("HTTP Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),
    #[error("{0}")]
    ApiError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Gateway to the identity service's email/password endpoints.
pub struct AuthGateway {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
    session: SessionHandle,
}

impl AuthGateway {
    pub fn new(
        client: ClientWithMiddleware,
        base_url: String,
        api_key: String,
        session: SessionHandle,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            session,
        }
    }

    /// Signs the user in and installs the resulting session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/accounts:signInWithPassword", self.base_url);
        let request = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = user_message(parse_error_response(response, "Login failed").await);
            error!(email, %message, "login failed");
            return Err(AuthError::ApiError(message));
        }

        let token: TokenResponse = response.json().await?;
        let session = self.install_session(email, token);
        debug!(email, "login successful");
        Ok(session)
    }

    /// Creates a new account and installs its session. The session's `uid`
    /// is the identifier the user's records are keyed by.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/accounts:signUp", self.base_url);
        let request = PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;

        if !response.status().is_success() {
            let message =
                user_message(parse_error_response(response, "Registration failed").await);
            error!(email, %message, "registration failed");
            return Err(AuthError::ApiError(message));
        }

        let token: TokenResponse = response.json().await?;
        let session = self.install_session(email, token);
        debug!(email, uid = %session.uid, "registration successful");
        Ok(session)
    }

    /// Asks the identity service to email a password reset link.
    pub async fn forget_password(&self, email: &str) -> Result<String, AuthError> {
        let url = format!("{}/accounts:sendOobCode", self.base_url);
        let request = SendOobCodeRequest {
            request_type: "PASSWORD_RESET".to_string(),
            email: email.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&request)?)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = parse_error_response(response, "Password reset failed").await;
            error!(email, %message, "password reset email failed");
            return Err(AuthError::ApiError(message));
        }

        let result: SendOobCodeResponse = response.json().await?;
        let target = result.email.unwrap_or_else(|| email.to_string());
        debug!(email, "password reset email sent");
        Ok(format!("Reset email sent to {}", target))
    }

    /// Clears the current session. Purely local.
    pub fn logout(&self) {
        self.session.clear();
        debug!("user logged out");
    }

    /// Returns the signed-in session, if any. No network call.
    pub fn current_user(&self) -> Option<Session> {
        self.session.current()
    }

    fn install_session(&self, email: &str, token: TokenResponse) -> Session {
        let session = Session {
            uid: token.local_id,
            email: token.email.unwrap_or_else(|| email.to_string()),
            id_token: token.id_token,
            refresh_token: token.refresh_token,
        };
        self.session.install(session.clone());
        session
    }
}

// A few well-known rejection codes get fixed wording; everything else is
// surfaced as the service reported it.
fn user_message(raw: String) -> String {
    let code = raw.split([' ', ':']).next().unwrap_or_default();
    match code {
        "WEAK_PASSWORD" => "Password is too weak. Please choose a stronger one.".to_string(),
        "INVALID_EMAIL" => "The email address is not valid.".to_string(),
        "EMAIL_EXISTS" => "This email address is already registered.".to_string(),
        _ => raw,
    }
}
