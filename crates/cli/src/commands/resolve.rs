//! Resolve a single price from command-line instruments.
//!
//! # Usage
//!
//! ```bash
//! # Coupon against the base price, then a retailer discount, then cashback
//! df-cli resolve --base 1000 --coupon 10% --discount 10% --cashback 10
//!
//! # Show every reduction step
//! df-cli resolve --base 1000 --coupon "5%+2" --explain
//! ```

use std::io::Write;

use dealfinder_core::{
    CompoundDiscount, CurrencyFormatter, Money, PriceBreakdown, PriceError, PriceInputs,
    resolve_breakdown,
};
use rust_decimal::Decimal;
use tracing::debug;

use super::CommandError;

/// Arguments for `df-cli resolve`.
#[derive(Debug, Clone, Default)]
pub struct ResolveArgs {
    pub base: Option<i64>,
    pub coupon: Option<String>,
    pub discounts: Vec<String>,
    pub cashback: Option<Decimal>,
    pub explain: bool,
    pub json: bool,
}

impl ResolveArgs {
    fn price_inputs(&self) -> Result<PriceInputs, PriceError> {
        Ok(PriceInputs {
            base_price: self.base.map(Money::new),
            coupon_discount: self
                .coupon
                .as_deref()
                .map(CompoundDiscount::parse)
                .transpose()?,
            discounts: self
                .discounts
                .iter()
                .map(|discount| CompoundDiscount::parse(discount))
                .collect::<Result<Vec<_>, _>>()?,
            cashback_percent: self.cashback,
        })
    }
}

/// Resolve the price and write the result.
///
/// # Errors
///
/// Returns an error if a discount string is malformed, the arithmetic
/// overflows, or writing the output fails.
pub fn run(
    args: &ResolveArgs,
    formatter: &CurrencyFormatter,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let inputs = args.price_inputs()?;
    let breakdown = resolve_breakdown(&inputs)?;
    debug!(final_price = %breakdown.final_price, "resolved price from arguments");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &breakdown)?;
        writeln!(out)?;
        return Ok(());
    }

    if args.explain {
        write_steps(&breakdown, out)?;
    }

    writeln!(
        out,
        "{} ({})",
        breakdown.final_price,
        formatter.format_money(breakdown.final_price)
    )?;
    Ok(())
}

fn write_steps(breakdown: &PriceBreakdown, out: &mut impl Write) -> Result<(), CommandError> {
    writeln!(out, "{:<14} {:>12}", "base", breakdown.base_price)?;
    for step in &breakdown.steps {
        writeln!(
            out,
            "{:<14} {:>12} -> {}",
            step.source.to_string(),
            format!("-{}", step.amount.round_dp(2).normalize()),
            step.price_after.round_dp(2).normalize()
        )?;
    }
    Ok(())
}
