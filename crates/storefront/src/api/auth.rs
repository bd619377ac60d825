//! Customer auth collaborator client.
//!
//! One endpoint multiplexes register and login through an `action` field.
//! A success response without a token is treated as a failure: nothing may
//! be persisted from it.

use secrecy::SecretString;
use tracing::instrument;
use url::Url;

use mathmarket_core::{Email, UserId};

use super::types::{AuthRequest, AuthResponse};
use super::{ApiError, read_json};

/// An authenticated customer session returned by the auth collaborator.
///
/// The token is a bearer value with no client-side expiry handling; it is
/// good until explicitly cleared on logout.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: SecretString,
    pub email: Email,
    pub user_id: UserId,
    pub full_name: Option<String>,
}

/// Client for the customer register/login endpoint.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl AuthClient {
    /// Create a new auth client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a collaborator rejection
    /// (e.g. "Email already registered"), or a response without a token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        email: &Email,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthSession, ApiError> {
        self.send(AuthRequest {
            action: "register",
            email,
            password,
            full_name,
        })
        .await
    }

    /// Log in an existing customer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, invalid credentials, or a
    /// response without a token.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<AuthSession, ApiError> {
        self.send(AuthRequest {
            action: "login",
            email,
            password,
            full_name: None,
        })
        .await
    }

    async fn send(&self, request: AuthRequest<'_>) -> Result<AuthSession, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let body: AuthResponse = read_json(response).await?;
        let token = body.token.ok_or(ApiError::MissingField("token"))?;

        Ok(AuthSession {
            token: SecretString::from(token),
            email: body.email,
            user_id: body.user_id,
            full_name: body.full_name,
        })
    }
}

/// Client for the password-reset endpoint, when one is deployed.
#[derive(Clone)]
pub struct PasswordResetClient {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, serde::Serialize)]
struct ResetRequest<'a> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_password: Option<&'a str>,
}

impl PasswordResetClient {
    /// Create a new password-reset client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Ask the collaborator to email a reset link.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or collaborator rejection.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn request_reset(&self, email: &Email) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ResetRequest {
                action: "request_reset",
                email: Some(email),
                token: None,
                new_password: None,
            })
            .send()
            .await?;
        read_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Complete a reset with the emailed token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an invalid/expired token.
    #[instrument(skip(self, token, new_password))]
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ResetRequest {
                action: "reset_password",
                email: None,
                token: Some(token),
                new_password: Some(new_password),
            })
            .send()
            .await?;
        read_json::<serde_json::Value>(response).await?;
        Ok(())
    }
}
