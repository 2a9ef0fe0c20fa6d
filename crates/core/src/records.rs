//! Upstream record shapes that feed the price engine.
//!
//! A deal listing carries its reference price together with the coupon,
//! retailer discount and cashback records attached to it. These types mirror
//! the JSON/YAML those records arrive as and convert them into
//! [`PriceInputs`].
//!
//! Coupon codes and retailer names are display data: they travel with the
//! record for callers that show them and never affect the resolved price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{
    CompoundDiscount, DiscountParseError, PriceError, PriceInputs, PriceQuote, resolve_quote,
};
use crate::types::Money;

/// Errors that can occur when converting a [`DealRecord`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The coupon's discount string is malformed.
    #[error("invalid coupon discount: {0}")]
    Coupon(#[source] DiscountParseError),
    /// One of the additional discounts is malformed.
    #[error("invalid discount #{index}: {source}")]
    Discount {
        /// Position of the discount in the record.
        index: usize,
        /// The parse failure.
        source: DiscountParseError,
    },
    /// Resolution failed after parsing.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// A coupon attached to a deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRecord {
    /// The code shown to the shopper.
    #[serde(default)]
    pub code: Option<String>,
    /// Discount string such as `"10%"` or `"10%+5"`.
    #[serde(default)]
    pub discount: Option<String>,
}

/// An additional retailer discount attached to a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRecord {
    /// Retailer offering the discount.
    #[serde(default)]
    pub retailer: Option<String>,
    /// Discount string such as `"5%"` or `"2.5+1%"`.
    pub discount: String,
}

/// Cashback offered on a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashbackRecord {
    /// Percentage of the running price returned to the shopper.
    pub percent: Decimal,
}

/// A deal listing as delivered by the content layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    /// Listing title.
    pub title: String,
    /// Reference price in minor units.
    #[serde(default)]
    pub price: Option<i64>,
    /// Coupon applied against the reference price.
    #[serde(default)]
    pub coupon: Option<CouponRecord>,
    /// Retailer discounts applied in order to the running price.
    #[serde(default)]
    pub discounts: Vec<DiscountRecord>,
    /// Cashback applied last.
    #[serde(default)]
    pub cashback: Option<CashbackRecord>,
}

impl DealRecord {
    /// Build engine inputs from this record.
    ///
    /// A coupon without a discount string is treated as no coupon.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Coupon`] or [`RecordError::Discount`] naming the
    /// record field whose discount string is malformed.
    pub fn price_inputs(&self) -> Result<PriceInputs, RecordError> {
        let coupon_discount = self
            .coupon
            .as_ref()
            .and_then(|coupon| coupon.discount.as_deref())
            .map(CompoundDiscount::parse)
            .transpose()
            .map_err(RecordError::Coupon)?;

        let discounts = self
            .discounts
            .iter()
            .enumerate()
            .map(|(index, record)| {
                CompoundDiscount::parse(&record.discount)
                    .map_err(|source| RecordError::Discount { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceInputs {
            base_price: self.price.map(Money::new),
            coupon_discount,
            discounts,
            cashback_percent: self.cashback.map(|cashback| cashback.percent),
        })
    }

    /// Resolve this deal's final price and savings.
    ///
    /// # Errors
    ///
    /// See [`DealRecord::price_inputs`]; arithmetic overflow is reported as
    /// [`RecordError::Price`].
    pub fn resolve(&self) -> Result<PriceQuote, RecordError> {
        Ok(resolve_quote(&self.price_inputs()?)?)
    }
}
