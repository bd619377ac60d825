//! Product catalog collaborator client.
//!
//! The catalog is fetched whole; there is no pagination on this endpoint.
//! Responses are cached for five minutes so repeated renders do not refetch.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::types::{CatalogStats, Product};
use super::{ApiError, read_json};

const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_KEY: &str = "products";

/// Client for the product catalog endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client for the given endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            cache: Cache::builder()
                .max_capacity(1)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or a body
    /// that does not decode as a product array.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        if let Some(products) = self.cache.get(CACHE_KEY).await {
            debug!("cache hit for product list");
            return Ok(products);
        }

        let response = self.client.get(self.endpoint.clone()).send().await?;
        let products: Vec<Product> = read_json(response).await?;
        debug!(count = products.len(), "fetched product list");

        let products = Arc::new(products);
        self.cache.insert(CACHE_KEY, Arc::clone(&products)).await;
        Ok(products)
    }

    /// Fetch catalog statistics (`?stats=true` variant). Not cached; the
    /// callers are dashboards that want live numbers.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, or an
    /// unexpected body.
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<CatalogStats, ApiError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("stats", "true");

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}
