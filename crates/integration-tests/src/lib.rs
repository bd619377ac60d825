//! End-to-end tests for MathMarket.
//!
//! Every backend collaborator (catalog, purchases, payment, auth) is an
//! independent JSON-over-HTTP endpoint, so the whole storefront can be
//! exercised against a single `httpmock` server standing in for all of
//! them. This crate holds the shared wiring; the scenarios live under
//! `tests/`.
//!
//! Run with: `cargo test -p mathmarket-integration-tests`

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use httpmock::MockServer;
use serde_json::{Value, json};
use url::Url;

use mathmarket_storefront::config::{Endpoints, StorefrontConfig};
use mathmarket_storefront::notify::{MemoryNotifier, Notifier};
use mathmarket_storefront::session::FileStore;
use mathmarket_storefront::state::Storefront;

/// Collaborator paths on the mock server.
pub const PRODUCTS_PATH: &str = "/products";
pub const PURCHASES_PATH: &str = "/purchases";
pub const PAYMENT_PATH: &str = "/payment";
pub const AUTH_PATH: &str = "/auth";

/// Minimal product JSON the way the deployed catalog endpoint sends it.
#[must_use]
pub fn product_json(id: i64, title: &str, price: u64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "price": price,
        "category": "grade-5",
        "type": "worksheet",
    })
}

/// Configuration pointing every collaborator at the mock server.
#[must_use]
pub fn config_for(server: &MockServer, session_file: PathBuf) -> StorefrontConfig {
    let url = |path: &str| Url::parse(&server.url(path)).unwrap();
    StorefrontConfig {
        base_url: Url::parse("https://mathmarket.example/").unwrap(),
        endpoints: Endpoints {
            products: url(PRODUCTS_PATH),
            purchases: url(PURCHASES_PATH),
            payment: url(PAYMENT_PATH),
            auth: url(AUTH_PATH),
            password_reset: None,
        },
        session_file,
    }
}

/// A storefront wired to the mock server, with an inspectable notifier and
/// a real on-disk session file.
pub struct TestShop {
    pub shop: Storefront,
    pub notices: Arc<MemoryNotifier>,
    session_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestShop {
    /// Start a fresh shop session against the mock server.
    #[must_use]
    pub fn start(server: &MockServer) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let session_path = dir.path().join("session.json");
        let config = config_for(server, session_path.clone());
        let store = FileStore::open(session_path.clone()).unwrap();
        let notices = Arc::new(MemoryNotifier::new());
        let shop = Storefront::new(
            config,
            Box::new(store),
            Arc::clone(&notices) as Arc<dyn Notifier>,
        );
        Self {
            shop,
            notices,
            session_path,
            _dir: dir,
        }
    }

    /// Reopen the same session file in a new storefront, as a next visit
    /// would.
    #[must_use]
    pub fn reopen(&self, server: &MockServer) -> Storefront {
        let config = config_for(server, self.session_path.clone());
        let store = FileStore::open(self.session_path.clone()).unwrap();
        Storefront::new(
            config,
            Box::new(store),
            Arc::new(MemoryNotifier::new()) as Arc<dyn Notifier>,
        )
    }

    /// Raw value stored under `key` in the session file, if any.
    #[must_use]
    pub fn session_raw(&self, key: &str) -> Option<String> {
        let raw = std::fs::read_to_string(&self.session_path).ok()?;
        let entries: std::collections::HashMap<String, String> =
            serde_json::from_str(&raw).ok()?;
        entries.get(key).cloned()
    }

    /// JSON value stored under `key` in the session file, if any.
    #[must_use]
    pub fn session_json(&self, key: &str) -> Option<Value> {
        serde_json::from_str(&self.session_raw(key)?).ok()
    }
}
