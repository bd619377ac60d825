//! MathMarket Core - Shared types library.
//!
//! This crate provides common types used across all MathMarket components:
//! - `storefront` - Catalog, cart, and checkout logic for the shop
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and the
//!   fixed catalog enumerations (category, product kind, payment status)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
