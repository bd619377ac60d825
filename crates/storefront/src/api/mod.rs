//! Typed clients for the backend collaborators.
//!
//! Every boundary is plain JSON over HTTPS to an independently deployed
//! endpoint. Payloads are decoded into the structs in [`types`] with
//! decode-or-reject semantics: a missing expected field is an [`ApiError`],
//! never an optimistic default.
//!
//! All calls are single-attempt request/response with no retry; what a
//! failure means for local state is decided by the caller (see the module
//! docs on [`crate::catalog`] and [`crate::gate`]).

mod auth;
mod catalog;
mod payment;
mod purchases;
pub mod types;

pub use auth::{AuthClient, AuthSession, PasswordResetClient};
pub use catalog::CatalogClient;
pub use payment::{PaymentClient, PaymentLink, PaymentRequest};
pub use purchases::PurchasesClient;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when calling a backend collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode into the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Collaborator returned a non-success status.
    ///
    /// Carries the collaborator's `{error}` message when the body had one,
    /// otherwise a generic description of the status.
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// A success response lacked a field the contract requires.
    #[error("response missing expected field: {0}")]
    MissingField(&'static str),
}

/// Error body convention shared by all collaborators.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Decode a collaborator response, mapping non-success statuses to
/// [`ApiError::Status`] with the server-supplied message when present.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map_or_else(|_| format!("request failed with status {status}"), |e| e.error);
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "failed to parse collaborator response"
        );
        ApiError::Parse(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.to_string(), "Email already registered");

        let err = ApiError::MissingField("payment_url");
        assert_eq!(
            err.to_string(),
            "response missing expected field: payment_url"
        );
    }
}
