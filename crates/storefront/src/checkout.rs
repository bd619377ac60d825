//! Checkout orchestration.
//!
//! Two flows, both sequential and single-attempt: guest checkout needs only
//! an email; registered checkout creates the account first and only requests
//! a payment link once a token came back. Either way the flow ends in
//! `Redirecting` with a provider-hosted payment URL, or falls back to `Idle`
//! with the cart untouched so the user can retry.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use mathmarket_core::{Email, EmailError, PaymentStatus};

use crate::api::{ApiError, AuthClient, AuthSession, PaymentClient, PaymentRequest};
use crate::cart::{Cart, CartItem};
use crate::session::{self, SessionStore, keys};

/// How many item titles the order description spells out before truncating.
const DESCRIPTION_TITLES: usize = 3;

/// Local snapshot of what was being bought, written just before the payment
/// redirect so the shop can show it again when the customer comes back.
/// Best-effort only; the payment collaborator owns the real order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrder {
    pub items: Vec<CartItem>,
    pub email: Email,
    /// Always `Pending` at snapshot time; the purchase-lookup collaborator
    /// is the authority on whether payment actually completed.
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Errors that abort a checkout attempt back to `Idle`.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The email field failed client-side validation; no request was issued.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Registration needs a password; no request was issued.
    #[error("password is required")]
    PasswordRequired,

    /// Nothing to buy; no request was issued.
    #[error("cart is empty")]
    EmptyCart,

    /// A checkout is already in flight or awaiting redirect.
    #[error("checkout already in progress")]
    Busy,

    /// The auth collaborator rejected the registration (or the response had
    /// no token). Nothing was persisted and no payment was requested.
    #[error("registration failed: {0}")]
    Registration(#[source] ApiError),

    /// The payment collaborator failed or answered without a payment URL.
    #[error("payment failed: {0}")]
    Payment(#[source] ApiError),
}

/// Where the checkout currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No checkout in progress.
    #[default]
    Idle,
    /// Guest flow requesting a payment link.
    GuestFlow,
    /// Registered flow: account creation, then payment link.
    RegisterFlow,
    /// Success: hand the browser this URL. Further checkouts are blocked
    /// until the state is reset on return.
    Redirecting { payment_url: Url },
}

/// Outcome of the registered flow.
///
/// Registration and payment are separate stages: once an account exists the
/// customer stays signed in even if the payment-link request then fails.
#[derive(Debug)]
pub struct RegisterCheckout {
    /// The freshly created account session.
    pub session: AuthSession,
    /// Result of the follow-on payment-link request.
    pub payment: Result<Url, CheckoutError>,
}

/// Drives the guest and registered checkout flows.
pub struct CheckoutOrchestrator {
    payment: PaymentClient,
    auth: AuthClient,
    guest_return_url: Url,
    library_return_url: Url,
    state: CheckoutState,
}

impl CheckoutOrchestrator {
    /// Create an orchestrator in the `Idle` state.
    #[must_use]
    pub const fn new(
        payment: PaymentClient,
        auth: AuthClient,
        guest_return_url: Url,
        library_return_url: Url,
    ) -> Self {
        Self {
            payment,
            auth,
            guest_return_url,
            library_return_url,
            state: CheckoutState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Whether a checkout is in flight or awaiting the redirect round-trip.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        !matches!(self.state, CheckoutState::Idle)
    }

    /// Return to `Idle` after the customer comes back from the provider.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Guest checkout: validate the email, request a payment link, snapshot
    /// the pending order, report the redirect URL.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any request is issued. A failed
    /// payment request returns the flow to `Idle` with the cart untouched.
    pub async fn guest(
        &mut self,
        cart: &Cart,
        email_input: &str,
        store: &mut dyn SessionStore,
    ) -> Result<Url, CheckoutError> {
        if self.is_busy() {
            return Err(CheckoutError::Busy);
        }
        let email = Email::parse(email_input.trim())?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::GuestFlow;
        let result = self
            .request_payment(cart, &email, self.guest_return_url.clone(), store)
            .await;

        match result {
            Ok(payment_url) => {
                self.state = CheckoutState::Redirecting {
                    payment_url: payment_url.clone(),
                };
                Ok(payment_url)
            }
            Err(e) => {
                self.state = CheckoutState::Idle;
                Err(e)
            }
        }
    }

    /// Registered checkout: create the account, persist its credentials,
    /// then request a payment link returning to the purchase library.
    ///
    /// A registration failure (including a tokenless success response)
    /// persists nothing and issues no payment request.
    ///
    /// # Errors
    ///
    /// Validation and registration errors abort the whole flow; a payment
    /// failure after successful registration is reported inside the returned
    /// [`RegisterCheckout`].
    pub async fn register(
        &mut self,
        cart: &Cart,
        email_input: &str,
        password: &str,
        full_name: Option<&str>,
        store: &mut dyn SessionStore,
    ) -> Result<RegisterCheckout, CheckoutError> {
        if self.is_busy() {
            return Err(CheckoutError::Busy);
        }
        let email = Email::parse(email_input.trim())?;
        if password.trim().is_empty() {
            return Err(CheckoutError::PasswordRequired);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::RegisterFlow;
        let session = match self.auth.register(&email, password, full_name).await {
            Ok(session) => session,
            Err(e) => {
                self.state = CheckoutState::Idle;
                return Err(CheckoutError::Registration(e));
            }
        };

        persist_credentials(store, &session);

        let payment = self
            .request_payment(cart, &session.email, self.library_return_url.clone(), store)
            .await;

        match payment {
            Ok(payment_url) => {
                self.state = CheckoutState::Redirecting {
                    payment_url: payment_url.clone(),
                };
                Ok(RegisterCheckout {
                    session,
                    payment: Ok(payment_url),
                })
            }
            Err(e) => {
                self.state = CheckoutState::Idle;
                Ok(RegisterCheckout {
                    session,
                    payment: Err(e),
                })
            }
        }
    }

    /// Request a payment link and, on success, write the pending-order
    /// snapshot before reporting the URL.
    async fn request_payment(
        &self,
        cart: &Cart,
        email: &Email,
        return_url: Url,
        store: &mut dyn SessionStore,
    ) -> Result<Url, CheckoutError> {
        let request = PaymentRequest {
            amount: cart.total(),
            description: order_description(cart.items()),
            return_url,
            customer_email: email.clone(),
            product_ids: cart.product_ids(),
        };

        let link = self
            .payment
            .create(&request)
            .await
            .map_err(CheckoutError::Payment)?;

        // Snapshot before the redirect. Best-effort: a write failure costs
        // only the recovery display, not the order itself.
        let pending = PendingOrder {
            items: cart.items().to_vec(),
            email: email.clone(),
            status: PaymentStatus::Pending,
        };
        if let Err(e) = session::insert_json(store, keys::PENDING_ORDER, &pending) {
            tracing::warn!(error = %e, "failed to write pending-order snapshot");
        }

        Ok(link.payment_url)
    }
}

/// Persist a customer session to the local store. Best-effort: a failure
/// here just means signing in again next visit.
pub(crate) fn persist_credentials(store: &mut dyn SessionStore, session: &AuthSession) {
    if let Err(e) = store.insert_raw(keys::USER_TOKEN, session.token.expose_secret().to_owned()) {
        tracing::warn!(error = %e, "failed to persist user token");
    }
    if let Err(e) = store.insert_raw(keys::USER_EMAIL, session.email.as_str().to_owned()) {
        tracing::warn!(error = %e, "failed to persist user email");
    }
}

/// Human-readable order description: the first three titles, then a count
/// of the rest.
#[must_use]
pub fn order_description(items: &[CartItem]) -> String {
    let titles: Vec<&str> = items
        .iter()
        .map(|item| item.product.title.as_str())
        .collect();

    let mut description = titles
        .iter()
        .take(DESCRIPTION_TITLES)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    if titles.len() > DESCRIPTION_TITLES {
        let more = titles.len() - DESCRIPTION_TITLES;
        description.push_str(&format!(" and {more} more item(s)"));
    }

    description
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::tests::product;

    fn cart_with(ids: impl IntoIterator<Item = i64>) -> Cart {
        let mut cart = Cart::new();
        for id in ids {
            let _ = cart.add(product(id, 100));
        }
        cart
    }

    #[test]
    fn test_order_description_short() {
        let cart = cart_with([1, 2]);
        assert_eq!(order_description(cart.items()), "Worksheet 1, Worksheet 2");
    }

    #[test]
    fn test_order_description_truncates_after_three() {
        let cart = cart_with([1, 2, 3, 4, 5]);
        assert_eq!(
            order_description(cart.items()),
            "Worksheet 1, Worksheet 2, Worksheet 3 and 2 more item(s)"
        );
    }

    #[test]
    fn test_order_description_empty() {
        assert_eq!(order_description(&[]), "");
    }
}
