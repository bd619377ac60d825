//! Cart model.
//!
//! A cart holds at most one unit of each product: these are digital PDFs, so
//! re-adding an already-present product is a no-op, not an increment. (An
//! earlier revision of the shop allowed quantity increments; that behavior is
//! superseded and must not come back.)
//!
//! Ten or more distinct items earn a volume discount of 15% of the subtotal,
//! rounded to the nearest ruble with halves rounding up.

use serde::{Deserialize, Serialize};

use mathmarket_core::{Price, ProductId};

use crate::api::types::Product;

/// Distinct items needed before the volume discount applies.
pub const DISCOUNT_THRESHOLD: usize = 10;

/// Volume discount, in percent of the subtotal.
pub const DISCOUNT_PERCENT: u64 = 15;

/// One cart line. Quantity is fixed at 1 and kept only so persisted
/// snapshots stay compatible with the historical wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }
}

/// Result of an add attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was appended to the cart.
    Added,
    /// The product was already present; the cart is unchanged.
    AlreadyInCart,
}

/// An ordered collection of cart items, unique on product ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from persisted items, dropping any duplicate IDs a
    /// corrupted snapshot might carry.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            let _ = cart.add(item.product);
        }
        cart
    }

    /// Add a product. No-op when the product is already present.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if self.contains(product.id) {
            return AddOutcome::AlreadyInCart;
        }
        self.items.push(CartItem::new(product));
        AddOutcome::Added
    }

    /// Remove a product unconditionally. Returns the removed item, if any.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.product.id == id)?;
        Some(self.items.remove(index))
    }

    /// Drop all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.product.id == id)
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items (quantity is fixed at 1, so this is also the
    /// unit count).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of item prices before any discount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(|item| item.product.price).sum()
    }

    /// Volume discount: [`DISCOUNT_PERCENT`]% of the subtotal at or above
    /// [`DISCOUNT_THRESHOLD`] distinct items, zero below.
    #[must_use]
    pub fn discount(&self) -> Price {
        if self.item_count() >= DISCOUNT_THRESHOLD {
            self.subtotal().percent_of(DISCOUNT_PERCENT)
        } else {
            Price::ZERO
        }
    }

    /// Amount due: subtotal minus discount.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal().saturating_sub(self.discount())
    }

    /// How many more distinct items are needed to reach the discount.
    /// Zero once the threshold is met.
    #[must_use]
    pub fn progress_to_discount(&self) -> usize {
        DISCOUNT_THRESHOLD.saturating_sub(self.item_count())
    }

    /// Product IDs in insertion order, for the payment request.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|item| item.product.id).collect()
    }
}
