//! Core types for MathMarket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use catalog::{Category, CategoryParseError, ProductKind};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use status::PaymentStatus;
