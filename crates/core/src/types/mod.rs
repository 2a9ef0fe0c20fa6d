//! Core types for Dealfinder.
//!
//! This module provides type-safe wrappers for monetary amounts and currencies.

pub mod currency;
pub mod money;

pub use currency::{CurrencyCode, CurrencyError};
pub use money::Money;
