//! MathMarket Storefront library.
//!
//! This crate holds everything behind the shop page: the catalog store, the
//! cart model with its volume discount, the purchase gate that prevents
//! re-buying a PDF, and the checkout orchestrator that hands the order off to
//! the external payment collaborator.
//!
//! All remote concerns (product catalog, purchase lookup, payment-link
//! creation, customer auth) are independent JSON-over-HTTP endpoints reached
//! through the typed clients in [`api`]. Nothing here owns a database.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod gate;
pub mod identity;
pub mod notify;
pub mod session;
pub mod state;
