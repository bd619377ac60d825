//! The storefront controller.
//!
//! One explicitly owned state object holds the catalog store, cart, purchase
//! gate, active identity, and checkout orchestrator, and is handed down to
//! whatever surface renders it (the CLI today). Every mutation goes through
//! a method here; nothing reads or writes persisted state behind its back.

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use mathmarket_core::{Email, EmailError, ProductId};

use crate::api::types::{CatalogStats, Product, PurchaseRecord};
use crate::api::{ApiError, AuthClient, CatalogClient, PaymentClient, PurchasesClient};
use crate::cart::{AddOutcome, Cart};
use crate::catalog::{CatalogStore, CategoryFilter};
use crate::checkout::{
    self, CheckoutError, CheckoutOrchestrator, PendingOrder, RegisterCheckout,
};
use crate::config::StorefrontConfig;
use crate::gate::{Presentation, PurchaseGate};
use crate::identity::Identity;
use crate::notify::{Notice, Notifier};
use crate::session::{self, SessionStore, keys};

/// Errors from identity operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The email field failed client-side validation; no request was issued.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The auth collaborator rejected the credentials or answered without
    /// a token.
    #[error("sign-in failed: {0}")]
    Auth(#[from] ApiError),

    /// The operation needs a signed-in customer.
    #[error("not signed in")]
    NotSignedIn,
}

/// Result of an add-to-cart attempt, after gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCart {
    Added,
    AlreadyInCart,
    AlreadyPurchased,
    UnknownProduct,
}

/// The page-level state object driving the shop.
pub struct Storefront {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    purchases: PurchasesClient,
    auth: AuthClient,
    catalog: CatalogStore,
    cart: Cart,
    gate: PurchaseGate,
    identity: Identity,
    checkout: CheckoutOrchestrator,
    store: Box<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl Storefront {
    /// Wire up a storefront from configuration, a session store, and a
    /// notification sink.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        store: Box<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let catalog_client = CatalogClient::new(config.endpoints.products.clone());
        let purchases = PurchasesClient::new(config.endpoints.purchases.clone());
        let auth = AuthClient::new(config.endpoints.auth.clone());
        let checkout = CheckoutOrchestrator::new(
            PaymentClient::new(config.endpoints.payment.clone()),
            auth.clone(),
            config.guest_return_url(),
            config.library_return_url(),
        );

        Self {
            config,
            catalog_client,
            purchases,
            auth,
            catalog: CatalogStore::new(),
            cart: Cart::new(),
            gate: PurchaseGate::new(),
            identity: Identity::Anonymous,
            checkout,
            store,
            notifier,
        }
    }

    /// Configuration this storefront was built with.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The catalog store.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The purchase gate.
    #[must_use]
    pub const fn gate(&self) -> &PurchaseGate {
        &self.gate
    }

    /// The active identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The checkout orchestrator (read-only; drive it through the checkout
    /// methods below).
    #[must_use]
    pub const fn checkout(&self) -> &CheckoutOrchestrator {
        &self.checkout
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Restore persisted state: stored credentials (refreshing the purchase
    /// gate) and the cart snapshot. Call once on startup.
    pub async fn restore_session(&mut self) {
        let token = self.store.get_raw(keys::USER_TOKEN);
        let email = self
            .store
            .get_raw(keys::USER_EMAIL)
            .and_then(|raw| Email::parse(&raw).ok());

        if let (Some(token), Some(email)) = (token, email) {
            self.identity = Identity::Authenticated {
                email: email.clone(),
                token: token.into(),
            };
            self.gate.refresh(&self.purchases, &email).await;
        }

        match session::get_json::<Cart>(self.store.as_ref(), keys::CART) {
            Ok(Some(snapshot)) => {
                self.cart = Cart::from_items(snapshot.items().to_vec());
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable cart snapshot");
                let _ = self.store.remove(keys::CART);
            }
        }
    }

    /// Load (or reload) the catalog from the product collaborator.
    pub async fn load_catalog(&mut self) {
        self.catalog
            .load(&self.catalog_client, self.notifier.as_ref())
            .await;
    }

    /// Live catalog statistics, bypassing the product cache.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog collaborator fails.
    pub async fn catalog_stats(&self) -> Result<CatalogStats, ApiError> {
        self.catalog_client.stats().await
    }

    /// Reconcile a return from the payment provider: hand back the pending
    /// order for display, clear the cart, and reopen checkout.
    pub fn reconcile_return(&mut self) -> Option<PendingOrder> {
        let pending =
            session::get_json::<PendingOrder>(self.store.as_ref(), keys::PENDING_ORDER)
                .unwrap_or_default();
        let _ = self.store.remove(keys::PENDING_ORDER);

        self.cart.clear();
        let _ = self.store.remove(keys::CART);
        self.checkout.reset();
        pending
    }

    // =========================================================================
    // Catalog & cart
    // =========================================================================

    /// Presentation state of a product on the grid.
    #[must_use]
    pub fn presentation(&self, id: ProductId) -> Presentation {
        self.gate.presentation(id, &self.cart)
    }

    /// Filtered catalog view.
    #[must_use]
    pub fn filtered_products(&self, category: CategoryFilter, query: &str) -> Vec<&Product> {
        self.catalog.filter(category, query)
    }

    /// Add a catalog product to the cart, honoring the purchase gate.
    pub fn add_to_cart(&mut self, id: ProductId) -> AddToCart {
        if self.gate.is_purchased(id) {
            self.notifier
                .notify(Notice::info("You already own this product"));
            return AddToCart::AlreadyPurchased;
        }

        let Some(product) = self.catalog.find(id).cloned() else {
            self.notifier.notify(Notice::error("Product not found"));
            return AddToCart::UnknownProduct;
        };
        let title = product.title.clone();

        match self.cart.add(product) {
            AddOutcome::Added => {
                self.notifier
                    .notify(Notice::success(format!("{title} added to cart")));
                self.persist_cart();
                AddToCart::Added
            }
            AddOutcome::AlreadyInCart => {
                self.notifier
                    .notify(Notice::info("Product is already in the cart"));
                AddToCart::AlreadyInCart
            }
        }
    }

    /// Remove a product from the cart.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        if self.cart.remove(id).is_some() {
            self.notifier.notify(Notice::info("Item removed from cart"));
            self.persist_cart();
        }
    }

    fn persist_cart(&mut self) {
        if let Err(e) = session::insert_json(self.store.as_mut(), keys::CART, &self.cart) {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Sign in an existing customer and refresh the purchase gate.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid input or collaborator rejection; prior
    /// identity and gate state are left unchanged.
    pub async fn login(&mut self, email_input: &str, password: &str) -> Result<(), AccountError> {
        let email = Email::parse(email_input.trim())?;

        let auth_session = match self.auth.login(&email, password).await {
            Ok(auth_session) => auth_session,
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        checkout::persist_credentials(self.store.as_mut(), &auth_session);
        let email = auth_session.email.clone();
        self.identity = auth_session.into();
        self.gate.refresh(&self.purchases, &email).await;
        self.notifier
            .notify(Notice::success(format!("Signed in as {email}")));
        Ok(())
    }

    /// Sign out: drop stored credentials and the purchase gate. The cart
    /// stays; it belongs to the session, not the account.
    pub fn logout(&mut self) {
        let _ = self.store.remove(keys::USER_TOKEN);
        let _ = self.store.remove(keys::USER_EMAIL);
        self.identity = Identity::Anonymous;
        self.gate.clear();
        self.notifier.notify(Notice::info("Signed out"));
    }

    /// Paid purchases of the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns an error when anonymous or when the lookup fails.
    pub async fn my_purchases(&self) -> Result<Vec<PurchaseRecord>, AccountError> {
        let email = self.identity.email().ok_or(AccountError::NotSignedIn)?;
        Ok(self.purchases.for_email(email).await?)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Guest checkout. On success the pending-order snapshot has been
    /// written and the returned URL is where the customer should go.
    ///
    /// # Errors
    ///
    /// Any failure returns the flow to idle with the cart unchanged.
    pub async fn checkout_guest(&mut self, email_input: &str) -> Result<Url, CheckoutError> {
        let result = self
            .checkout
            .guest(&self.cart, email_input, self.store.as_mut())
            .await;

        if let Err(e) = &result {
            self.notifier.notify(Notice::error(e.to_string()));
        }
        result
    }

    /// Registered checkout: create an account, then request a payment link.
    /// The identity is updated as soon as registration succeeds, even if
    /// the payment step then fails.
    ///
    /// # Errors
    ///
    /// Validation and registration failures abort with nothing persisted;
    /// a payment failure after registration is returned as the error while
    /// the customer stays signed in.
    pub async fn checkout_register(
        &mut self,
        email_input: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Url, CheckoutError> {
        let result = self
            .checkout
            .register(
                &self.cart,
                email_input,
                password,
                full_name,
                self.store.as_mut(),
            )
            .await;

        match result {
            Ok(RegisterCheckout {
                session: auth_session,
                payment,
            }) => {
                let email = auth_session.email.clone();
                self.identity = auth_session.into();
                self.gate.refresh(&self.purchases, &email).await;

                if let Err(e) = &payment {
                    self.notifier.notify(Notice::error(e.to_string()));
                }
                payment
            }
            Err(e) => {
                self.notifier.notify(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }
}
