//! Payment-link collaborator client.
//!
//! The collaborator owns pricing authority: it recomputes the amount from the
//! product IDs server-side. The client still sends the locally computed
//! amount and description for display and reconciliation.

use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use mathmarket_core::{Email, Price, ProductId};

use super::{ApiError, read_json};

/// Request body for payment-link creation.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    /// Order total in whole rubles.
    pub amount: Price,
    /// Human-readable order description.
    pub description: String,
    /// Where the payment provider sends the customer afterwards.
    pub return_url: Url,
    /// Email the delivery goes to.
    pub customer_email: Email,
    /// Products being bought.
    pub product_ids: Vec<ProductId>,
}

/// A created payment link.
#[derive(Debug, Clone)]
pub struct PaymentLink {
    /// Provider-hosted payment page to redirect the customer to.
    pub payment_url: Url,
}

/// Success body of the payment collaborator. `payment_url` may be absent on
/// a malformed success response; that is an error, not a silent redirect to
/// nowhere.
#[derive(Debug, Deserialize)]
struct PaymentResponse {
    #[serde(default)]
    payment_url: Option<Url>,
}

/// Client for the payment-link creation endpoint.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PaymentClient {
    /// Create a new payment client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Create a payment link for the given order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a
    /// success response without a `payment_url`.
    #[instrument(skip(self, request), fields(amount = %request.amount, items = request.product_ids.len()))]
    pub async fn create(&self, request: &PaymentRequest) -> Result<PaymentLink, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let body: PaymentResponse = read_json(response).await?;
        let payment_url = body
            .payment_url
            .ok_or(ApiError::MissingField("payment_url"))?;

        Ok(PaymentLink { payment_url })
    }
}
