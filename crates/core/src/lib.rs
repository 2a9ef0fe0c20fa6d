//! Dealfinder Core - Price resolution engine.
//!
//! This crate turns a product's reference price plus a stack of promotional
//! instruments (coupon codes, percentage and flat discounts, cashback) into the
//! single final price shown on a deal card.
//!
//! # Architecture
//!
//! The core crate is pure computation - no I/O, no database access, no HTTP
//! clients, no global state. Every call is independent, so it can be used from
//! any number of threads without coordination.
//!
//! # Modules
//!
//! - [`types`] - Money and currency newtypes
//! - [`pricing`] - Discount parsing, sequential price reduction, display formatting
//! - [`records`] - Upstream deal/coupon/discount/cashback record shapes
//!
//! # Example
//!
//! ```
//! use dealfinder_core::{Money, resolve_price_from_strings};
//!
//! let price = resolve_price_from_strings(Some(Money::new(1000)), Some("10%"), &["10%"], None)?;
//! assert_eq!(price, Money::new(810));
//! # Ok::<(), dealfinder_core::PriceError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod pricing;
pub mod records;
pub mod types;

pub use pricing::*;
pub use records::{CashbackRecord, CouponRecord, DealRecord, DiscountRecord, RecordError};
pub use types::*;
