//! Sequential price reduction.
//!
//! The order of reductions is part of the contract and changes the result:
//!
//! 1. **Coupon** - every token is computed against the *original* base price
//!    and the sum is subtracted once.
//! 2. **Discounts** - each additional instrument, token by token, compounds
//!    against the *running* price.
//! 3. **Cashback** - a percentage of the running price after 1 and 2.
//!
//! The final value is rounded once, halves toward positive infinity. There is
//! no floor at zero: stacked discounts larger than the price produce a
//! negative result.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::{debug, trace};

use super::discount::{CompoundDiscount, DiscountDescriptor};
use super::error::PriceError;
use crate::types::Money;

/// Everything the reducer consumes for one price computation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInputs {
    /// Reference price. `None` or zero resolves to zero.
    pub base_price: Option<Money>,
    /// Coupon discount, computed against the base price.
    pub coupon_discount: Option<CompoundDiscount>,
    /// Additional discount instruments, applied in order to the running price.
    pub discounts: Vec<CompoundDiscount>,
    /// Cashback percentage, applied last.
    pub cashback_percent: Option<Decimal>,
}

impl PriceInputs {
    /// Inputs with only a base price.
    #[must_use]
    pub fn new(base_price: impl Into<Option<Money>>) -> Self {
        Self {
            base_price: base_price.into(),
            ..Self::default()
        }
    }

    /// Set the coupon discount.
    #[must_use]
    pub fn with_coupon(mut self, coupon: CompoundDiscount) -> Self {
        self.coupon_discount = Some(coupon);
        self
    }

    /// Append an additional discount instrument.
    #[must_use]
    pub fn with_discount(mut self, discount: CompoundDiscount) -> Self {
        self.discounts.push(discount);
        self
    }

    /// Set the cashback percentage.
    #[must_use]
    pub fn with_cashback(mut self, percent: Decimal) -> Self {
        self.cashback_percent = Some(percent);
        self
    }
}

/// Which instrument produced a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReductionSource {
    /// The coupon, all tokens combined.
    Coupon,
    /// One token of one additional discount instrument (both zero-based).
    Discount {
        /// Position of the instrument in [`PriceInputs::discounts`].
        index: usize,
        /// Position of the token within that instrument.
        token: usize,
    },
    /// Cashback.
    Cashback,
}

impl ReductionSource {
    const fn stage(self) -> &'static str {
        match self {
            Self::Coupon => "coupon",
            Self::Discount { .. } => "discount",
            Self::Cashback => "cashback",
        }
    }
}

impl std::fmt::Display for ReductionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coupon => write!(f, "coupon"),
            Self::Discount { index, token } => write!(f, "discount {}.{}", index + 1, token + 1),
            Self::Cashback => write!(f, "cashback"),
        }
    }
}

/// One reduction applied during resolution, in minor units (unrounded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReductionStep {
    /// The instrument that produced this reduction.
    pub source: ReductionSource,
    /// Amount subtracted from the running price.
    pub amount: Decimal,
    /// Running price after this reduction.
    pub price_after: Decimal,
}

/// Full trace of a price resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    /// Reference price (zero when resolution short-circuited).
    pub base_price: Money,
    /// Reductions in the order they were applied.
    pub steps: Vec<ReductionStep>,
    /// Running price before the final rounding.
    pub unrounded: Decimal,
    /// Rounded result.
    pub final_price: Money,
}

impl PriceBreakdown {
    fn short_circuit() -> Self {
        Self {
            base_price: Money::ZERO,
            steps: Vec::new(),
            unrounded: Decimal::ZERO,
            final_price: Money::ZERO,
        }
    }

    /// Sum of all reductions, before rounding.
    #[must_use]
    pub fn total_reduction(&self) -> Decimal {
        self.steps.iter().map(|step| step.amount).sum()
    }
}

/// Savings summary for display on a deal card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    /// Reference price.
    pub base_price: Money,
    /// Resolved price.
    pub final_price: Money,
    /// `base_price - final_price`.
    pub savings: Money,
    /// Savings as a whole percentage of the base price; zero when the base is zero.
    pub percent_off: i64,
}

impl PriceQuote {
    /// Summarize a breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] if the savings do not fit in `i64`.
    pub fn from_breakdown(breakdown: &PriceBreakdown) -> Result<Self, PriceError> {
        let out_of_range = || PriceError::OutOfRange { stage: "quote" };

        let savings = breakdown
            .base_price
            .checked_sub(breakdown.final_price)
            .ok_or_else(out_of_range)?;

        let percent_off = if breakdown.base_price.is_zero() {
            0
        } else {
            savings
                .to_decimal()
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(breakdown.base_price.to_decimal()))
                .and_then(round_half_up)
                .ok_or_else(out_of_range)?
        };

        Ok(Self {
            base_price: breakdown.base_price,
            final_price: breakdown.final_price,
            savings,
            percent_off,
        })
    }
}

/// Resolve the final price for a set of inputs.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] if the arithmetic overflows.
pub fn resolve_price(inputs: &PriceInputs) -> Result<Money, PriceError> {
    resolve_breakdown(inputs).map(|breakdown| breakdown.final_price)
}

/// Resolve the final price and a savings summary.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] if the arithmetic overflows.
pub fn resolve_quote(inputs: &PriceInputs) -> Result<PriceQuote, PriceError> {
    PriceQuote::from_breakdown(&resolve_breakdown(inputs)?)
}

/// Parse raw discount strings and resolve the final price.
///
/// A missing or zero base price returns zero before any string is parsed.
///
/// ```
/// use dealfinder_core::{Money, resolve_price_from_strings};
///
/// let price = resolve_price_from_strings(Some(Money::new(1000)), Some("5%+2"), &[], None)?;
/// assert_eq!(price, Money::new(750));
/// # Ok::<(), dealfinder_core::PriceError>(())
/// ```
///
/// # Errors
///
/// Returns [`PriceError::Parse`] for the first malformed token and
/// [`PriceError::OutOfRange`] if the arithmetic overflows.
pub fn resolve_price_from_strings(
    base_price: Option<Money>,
    coupon_discount: Option<&str>,
    discounts: &[&str],
    cashback_percent: Option<Decimal>,
) -> Result<Money, PriceError> {
    if base_price.is_none_or(Money::is_zero) {
        return Ok(Money::ZERO);
    }

    let inputs = PriceInputs {
        base_price,
        coupon_discount: coupon_discount.map(CompoundDiscount::parse).transpose()?,
        discounts: discounts
            .iter()
            .map(|discount| CompoundDiscount::parse(discount))
            .collect::<Result<Vec<_>, _>>()?,
        cashback_percent,
    };

    resolve_price(&inputs)
}

/// Resolve the final price, recording every reduction.
///
/// # Errors
///
/// Returns [`PriceError::OutOfRange`] if the arithmetic overflows.
pub fn resolve_breakdown(inputs: &PriceInputs) -> Result<PriceBreakdown, PriceError> {
    let Some(base_price) = inputs.base_price.filter(|price| !price.is_zero()) else {
        trace!("no base price, resolving to zero");
        return Ok(PriceBreakdown::short_circuit());
    };

    let mut running = RunningPrice::new(base_price);

    if let Some(coupon) = &inputs.coupon_discount {
        apply_coupon(&mut running, coupon)?;
    }
    apply_discounts(&mut running, &inputs.discounts)?;
    if let Some(percent) = inputs.cashback_percent {
        apply_cashback(&mut running, percent)?;
    }

    let final_price = round_half_up(running.price)
        .map(Money::new)
        .ok_or(PriceError::OutOfRange { stage: "rounding" })?;

    debug!(
        base = %base_price,
        unrounded = %running.price,
        final_price = %final_price,
        steps = running.steps.len(),
        "resolved price"
    );

    Ok(PriceBreakdown {
        base_price,
        steps: running.steps,
        unrounded: running.price,
        final_price,
    })
}

/// Running price plus the reductions applied so far.
struct RunningPrice {
    base: Decimal,
    price: Decimal,
    steps: Vec<ReductionStep>,
}

impl RunningPrice {
    fn new(base_price: Money) -> Self {
        let base = base_price.to_decimal();
        Self {
            base,
            price: base,
            steps: Vec::new(),
        }
    }

    fn reduce(&mut self, source: ReductionSource, amount: Decimal) -> Result<(), PriceError> {
        self.price = self
            .price
            .checked_sub(amount)
            .ok_or(PriceError::OutOfRange {
                stage: source.stage(),
            })?;
        trace!(?source, reduction = %amount, price = %self.price, "applied reduction");
        self.steps.push(ReductionStep {
            source,
            amount,
            price_after: self.price,
        });
        Ok(())
    }
}

/// Fixed-base pass: every coupon token is measured against the base price.
fn apply_coupon(running: &mut RunningPrice, coupon: &CompoundDiscount) -> Result<(), PriceError> {
    if coupon.is_empty() {
        return Ok(());
    }

    let out_of_range = PriceError::OutOfRange { stage: "coupon" };
    let reduction = coupon.iter().try_fold(Decimal::ZERO, |total, descriptor| {
        let amount = match *descriptor {
            DiscountDescriptor::Percentage(percent) => percent_of(running.base, percent),
            DiscountDescriptor::Flat(minor) => Some(minor),
        };
        amount.and_then(|amount| total.checked_add(amount))
    });

    running.reduce(ReductionSource::Coupon, reduction.ok_or(out_of_range)?)
}

/// Compounding pass: each discount token is measured against the running price.
fn apply_discounts(
    running: &mut RunningPrice,
    discounts: &[CompoundDiscount],
) -> Result<(), PriceError> {
    for (index, discount) in discounts.iter().enumerate() {
        for (token, descriptor) in discount.iter().enumerate() {
            let source = ReductionSource::Discount { index, token };
            let amount = match *descriptor {
                DiscountDescriptor::Percentage(percent) => percent_of(running.price, percent)
                    .ok_or(PriceError::OutOfRange { stage: "discount" })?,
                DiscountDescriptor::Flat(minor) => minor,
            };
            running.reduce(source, amount)?;
        }
    }
    Ok(())
}

fn apply_cashback(running: &mut RunningPrice, percent: Decimal) -> Result<(), PriceError> {
    let amount = percent_of(running.price, percent)
        .ok_or(PriceError::OutOfRange { stage: "cashback" })?;
    running.reduce(ReductionSource::Cashback, amount)
}

fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Round to the nearest integer with halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`).
fn round_half_up(value: Decimal) -> Option<i64> {
    value.checked_add(Decimal::new(5, 1))?.floor().to_i64()
}
