//! Command implementations and shared wiring.

use std::sync::Arc;

use thiserror::Error;

use mathmarket_storefront::config::{ConfigError, StorefrontConfig};
use mathmarket_storefront::notify::{Notice, NoticeLevel, Notifier};
use mathmarket_storefront::session::{FileStore, SessionError};
use mathmarket_storefront::state::{AccountError, Storefront};

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

/// Top-level command failures.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("session file error: {0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Checkout(#[from] mathmarket_storefront::checkout::CheckoutError),

    #[error("request failed: {0}")]
    Api(#[from] mathmarket_storefront::api::ApiError),
}

/// Prints notices the way a web page would toast them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "--",
            NoticeLevel::Error => "!!",
        };
        eprintln!("[{prefix}] {}", notice.message);
    }
}

/// Build a storefront from the environment and restore the persisted session.
pub async fn open_storefront() -> Result<Storefront, CliError> {
    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(config.session_file.clone())?;
    let mut storefront = Storefront::new(config, Box::new(store), Arc::new(ConsoleNotifier));
    storefront.restore_session().await;
    Ok(storefront)
}
