//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MATHMARKET_PRODUCTS_URL` - Product catalog endpoint
//! - `MATHMARKET_PURCHASES_URL` - Purchase lookup endpoint
//! - `MATHMARKET_PAYMENT_URL` - Payment-link creation endpoint
//! - `MATHMARKET_AUTH_URL` - Customer register/login endpoint
//! - `MATHMARKET_BASE_URL` - Public URL of the shop (return-URL base)
//!
//! ## Optional
//! - `MATHMARKET_PASSWORD_RESET_URL` - Password reset endpoint
//! - `MATHMARKET_SESSION_FILE` - Path of the persisted session state
//!   (default: `.mathmarket-session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Public base URL of the shop. Return URLs are derived from it.
    pub base_url: Url,
    /// Collaborator endpoints.
    pub endpoints: Endpoints,
    /// Where persisted session state (credentials, cart snapshot) lives.
    pub session_file: PathBuf,
}

/// Endpoints of the independently deployed backend collaborators.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Product catalog (list + stats).
    pub products: Url,
    /// Purchase lookup by email.
    pub purchases: Url,
    /// Payment-link creation.
    pub payment: Url,
    /// Customer register/login.
    pub auth: Url,
    /// Password reset, if deployed.
    pub password_reset: Option<Url>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or do not
    /// parse as URLs.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            base_url: get_url("MATHMARKET_BASE_URL")?,
            endpoints: Endpoints::from_env()?,
            session_file: PathBuf::from(get_env_or_default(
                "MATHMARKET_SESSION_FILE",
                ".mathmarket-session.json",
            )),
        })
    }

    /// Return URL for guest checkout: back to the catalog with a payment
    /// marker, where the pending-order snapshot is reconciled.
    #[must_use]
    pub fn guest_return_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(Some("payment=success"));
        url
    }

    /// Return URL for registered checkout: the post-purchase library page.
    #[must_use]
    pub fn library_return_url(&self) -> Url {
        self.base_url
            .join("my-purchases")
            .unwrap_or_else(|_| self.base_url.clone())
    }
}

impl Endpoints {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            products: get_url("MATHMARKET_PRODUCTS_URL")?,
            purchases: get_url("MATHMARKET_PURCHASES_URL")?,
            payment: get_url("MATHMARKET_PAYMENT_URL")?,
            auth: get_url("MATHMARKET_AUTH_URL")?,
            password_reset: get_optional_url("MATHMARKET_PASSWORD_RESET_URL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable parsed as a URL.
fn get_url(key: &str) -> Result<Url, ConfigError> {
    let value = get_required_env(key)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get an optional environment variable parsed as a URL.
fn get_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            Url::parse(&value)
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            base_url: Url::parse("https://mathmarket.example").unwrap(),
            endpoints: Endpoints {
                products: Url::parse("https://fn.example/products").unwrap(),
                purchases: Url::parse("https://fn.example/purchases").unwrap(),
                payment: Url::parse("https://fn.example/payment").unwrap(),
                auth: Url::parse("https://fn.example/auth").unwrap(),
                password_reset: None,
            },
            session_file: PathBuf::from(".mathmarket-session.json"),
        }
    }

    #[test]
    fn test_guest_return_url() {
        let config = test_config();
        assert_eq!(
            config.guest_return_url().as_str(),
            "https://mathmarket.example/?payment=success"
        );
    }

    #[test]
    fn test_library_return_url() {
        let config = test_config();
        assert_eq!(
            config.library_return_url().as_str(),
            "https://mathmarket.example/my-purchases"
        );
    }
}
