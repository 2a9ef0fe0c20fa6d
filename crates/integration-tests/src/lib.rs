//! Integration tests for Dealfinder.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dealfinder-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing_properties` - Engine-level properties of price resolution
//! - `deal_fixtures` - Deal records from `fixtures/` resolved end to end
//! - `discount_display` - Compound discount formatting
//!
//! Fixtures are embedded at compile time so tests need no filesystem access.

use dealfinder_core::DealRecord;
use serde::Deserialize;

/// Raw YAML for the deal fixtures.
pub const DEALS_YAML: &str = include_str!("../fixtures/deals.yaml");

/// A deal record paired with its expected resolved price in minor units.
#[derive(Debug, Clone, Deserialize)]
pub struct DealCase {
    pub deal: DealRecord,
    pub expected: i64,
}

/// Decode the deal fixtures.
///
/// # Errors
///
/// Returns an error if the fixture file is not valid YAML for [`DealCase`].
pub fn deal_cases() -> Result<Vec<DealCase>, serde_yaml::Error> {
    serde_yaml::from_str(DEALS_YAML)
}
