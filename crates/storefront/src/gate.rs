//! Purchase gate: which products the current identity already owns.
//!
//! The gate is an enhancement, not a blocking concern. A failed refresh
//! leaves the previous set untouched and is logged, never surfaced to the
//! user; the worst case is a buy button that should have been disabled.

use std::collections::HashSet;

use tracing::instrument;

use mathmarket_core::{Email, ProductId};

use crate::api::PurchasesClient;
use crate::cart::Cart;

/// Presentation state of a product on the catalog grid. The three states are
/// mutually exclusive; purchased wins when a product is somehow both bought
/// and still in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Already paid for: add-to-cart disabled.
    Purchased,
    /// Already selected: add-to-cart disabled.
    InCart,
    /// Available to add.
    Purchasable,
}

/// Set of product IDs the active identity has paid for.
#[derive(Debug, Clone, Default)]
pub struct PurchaseGate {
    purchased: HashSet<ProductId>,
}

impl PurchaseGate {
    /// Create an empty gate (anonymous identity).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the gate set wholesale from the purchase-lookup collaborator.
    ///
    /// On failure the set is left unchanged - no partial update.
    #[instrument(skip(self, client), fields(email = %email))]
    pub async fn refresh(&mut self, client: &PurchasesClient, email: &Email) {
        match client.for_email(email).await {
            Ok(purchases) => {
                self.purchased = purchases.into_iter().map(|p| p.product_id).collect();
                tracing::debug!(count = self.purchased.len(), "purchase gate refreshed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to refresh purchase gate");
            }
        }
    }

    /// Clear the gate (identity signed out).
    pub fn clear(&mut self) {
        self.purchased.clear();
    }

    /// Whether the identity has paid for this product.
    #[must_use]
    pub fn is_purchased(&self, id: ProductId) -> bool {
        self.purchased.contains(&id)
    }

    /// Number of owned products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.purchased.len()
    }

    /// Whether the identity owns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.purchased.is_empty()
    }

    /// Presentation state for one product given the current cart.
    #[must_use]
    pub fn presentation(&self, id: ProductId, cart: &Cart) -> Presentation {
        if self.is_purchased(id) {
            Presentation::Purchased
        } else if cart.contains(id) {
            Presentation::InCart
        } else {
            Presentation::Purchasable
        }
    }

    #[cfg(test)]
    pub(crate) fn with_purchased(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            purchased: ids.into_iter().map(ProductId::new).collect(),
        }
    }
}
