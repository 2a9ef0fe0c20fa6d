//! Display formatting for prices and compound discounts.

use std::cmp::Reverse;

use rust_decimal::{Decimal, RoundingStrategy};

use super::discount::parse_number;
use crate::types::{CurrencyCode, Money};

/// Immutable currency formatter.
///
/// Construct once per currency and reuse; it holds no interior state.
///
/// ```
/// use dealfinder_core::{CurrencyCode, CurrencyFormatter, Money};
///
/// let formatter = CurrencyFormatter::new(CurrencyCode::USD);
/// assert_eq!(formatter.format_money(Money::new(123_450)), "$1,234.50");
/// assert_eq!(formatter.format_compound_discount("10%+5"), "$5.00 + 10%");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CurrencyFormatter {
    currency: CurrencyCode,
}

impl CurrencyFormatter {
    /// Create a formatter for one currency.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self { currency }
    }

    /// The currency this formatter renders.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Format an amount in whole currency units, e.g. `-$1,234.50`.
    ///
    /// Rounds to the currency's minor digits, halves away from zero.
    #[must_use]
    pub fn format_major(&self, amount: Decimal) -> String {
        let digits = self.currency.minor_digits();
        let mut rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded.set_sign_positive(true);
        rounded.rescale(digits);

        let text = rounded.to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

        let mut out = String::with_capacity(text.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(self.currency.symbol());
        out.push_str(&group_thousands(whole));
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Format an amount given in minor units.
    #[must_use]
    pub fn format_money(&self, money: Money) -> String {
        self.format_major(Decimal::new(money.minor(), self.currency.minor_digits()))
    }

    /// Render a `+`-joined discount string for display.
    ///
    /// Percentage tokens are kept as written; flat tokens are whole-unit
    /// amounts rendered as currency (or passed through if they are not
    /// numeric). Tokens are ordered longest rendering first, ties keeping
    /// source order, and joined with `" + "`.
    #[must_use]
    pub fn format_compound_discount(&self, input: &str) -> String {
        let mut tokens: Vec<String> = input
            .split('+')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                if token.contains('%') {
                    token.to_owned()
                } else {
                    parse_number(token)
                        .map_or_else(|| token.to_owned(), |amount| self.format_major(amount))
                }
            })
            .collect();

        tokens.sort_by_key(|token| Reverse(token.chars().count()));
        tokens.join(" + ")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
