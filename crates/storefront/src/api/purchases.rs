//! Purchase-lookup collaborator client.

use tracing::instrument;
use url::Url;

use mathmarket_core::Email;

use super::types::{PurchaseList, PurchaseRecord};
use super::{ApiError, read_json};

/// Client for the purchase-lookup endpoint.
///
/// Returns the paid order lines for an identity email. The storefront only
/// ever reads purchase facts; it never writes them.
#[derive(Clone)]
pub struct PurchasesClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PurchasesClient {
    /// Create a new purchases client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Look up all paid purchases for the given email.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn for_email(&self, email: &Email) -> Result<Vec<PurchaseRecord>, ApiError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("email", email.as_str());

        let response = self.client.get(url).send().await?;
        let list: PurchaseList = read_json(response).await?;
        Ok(list.purchases)
    }
}
