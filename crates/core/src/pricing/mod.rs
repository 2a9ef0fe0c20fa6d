//! Price resolution engine.
//!
//! Resolution runs in two cooperating stages:
//!
//! 1. [`discount`] parses free-form discount strings (`"10%"`, `"5"`, `"10%+5"`)
//!    into typed [`DiscountDescriptor`]s.
//! 2. [`resolve`] applies the coupon against the base price, then each
//!    additional discount against the running price, then cashback, and rounds
//!    once at the end.
//!
//! [`format`] renders the same raw discount strings for display and shares
//! only the tokenizing rules with the engine.

pub mod discount;
pub mod error;
pub mod format;
pub mod resolve;

pub use discount::{CompoundDiscount, DiscountDescriptor, parse_compound_discount};
pub use error::{DiscountParseError, PriceError};
pub use format::CurrencyFormatter;
pub use resolve::{
    PriceBreakdown, PriceInputs, PriceQuote, ReductionSource, ReductionStep, resolve_breakdown,
    resolve_price, resolve_price_from_strings, resolve_quote,
};
