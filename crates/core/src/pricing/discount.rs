//! Discount instrument parsing.
//!
//! Discount records carry free-form strings that mix two semantics:
//!
//! - `"12.5%"` - a percentage of the price being reduced
//! - `"5"` - a flat amount in whole currency units (converted to minor units)
//!
//! Several instruments can be stacked in one string with `+`, e.g. `"10%+5"`.
//! All string handling lives here; the reducer only ever sees
//! [`DiscountDescriptor`] values.

use rust_decimal::Decimal;

use super::error::DiscountParseError;

/// Largest decimal exponent accepted in scientific notation.
const MAX_EXPONENT: u32 = 28;

/// One typed discount operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountDescriptor {
    /// Reduce the price by this many percent of itself. Not bounded to 0..=100.
    Percentage(Decimal),
    /// Reduce the price by a fixed amount, in minor currency units.
    Flat(Decimal),
}

impl DiscountDescriptor {
    /// Parse a single discount token.
    ///
    /// A token containing `%` is a percentage: everything from the first `%`
    /// onward is dropped and the rest is the percentage value. Any other token
    /// is a flat amount in whole currency units and is scaled by 100 into
    /// minor units. Surrounding whitespace is ignored.
    ///
    /// ```
    /// use dealfinder_core::DiscountDescriptor;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(
    ///     DiscountDescriptor::parse("10%").unwrap(),
    ///     DiscountDescriptor::Percentage(Decimal::from(10))
    /// );
    /// assert_eq!(
    ///     DiscountDescriptor::parse("2.5").unwrap(),
    ///     DiscountDescriptor::Flat(Decimal::from(250))
    /// );
    /// assert!(DiscountDescriptor::parse("abc").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DiscountParseError::InvalidToken`] if the numeric part is
    /// empty, not a decimal literal, or too large to represent.
    pub fn parse(token: &str) -> Result<Self, DiscountParseError> {
        let trimmed = token.trim();

        if let Some((percent, _)) = trimmed.split_once('%') {
            return parse_number(percent.trim())
                .map(Self::Percentage)
                .ok_or_else(|| DiscountParseError::invalid(token));
        }

        parse_number(trimmed)
            .and_then(|whole_units| whole_units.checked_mul(Decimal::ONE_HUNDRED))
            .map(Self::Flat)
            .ok_or_else(|| DiscountParseError::invalid(token))
    }

    /// Returns `true` for percentage descriptors.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        matches!(self, Self::Percentage(_))
    }
}

/// An ordered stack of discounts parsed from one `+`-joined string.
///
/// Source order is preserved; the reducer applies tokens in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CompoundDiscount(Vec<DiscountDescriptor>);

impl CompoundDiscount {
    /// An empty compound discount (a no-op).
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse a `+`-joined discount string.
    ///
    /// Empty or whitespace-only input yields an empty compound discount.
    ///
    /// # Errors
    ///
    /// Returns the first token that fails [`DiscountDescriptor::parse`],
    /// including empty tokens such as the trailing one in `"10%+"`.
    pub fn parse(input: &str) -> Result<Self, DiscountParseError> {
        if input.trim().is_empty() {
            return Ok(Self::empty());
        }

        input
            .split('+')
            .map(DiscountDescriptor::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The parsed descriptors, in source order.
    #[must_use]
    pub fn descriptors(&self) -> &[DiscountDescriptor] {
        &self.0
    }

    /// Iterate over descriptors in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, DiscountDescriptor> {
        self.0.iter()
    }

    /// Number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<DiscountDescriptor>> for CompoundDiscount {
    fn from(descriptors: Vec<DiscountDescriptor>) -> Self {
        Self(descriptors)
    }
}

impl<'a> IntoIterator for &'a CompoundDiscount {
    type Item = &'a DiscountDescriptor;
    type IntoIter = std::slice::Iter<'a, DiscountDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::str::FromStr for CompoundDiscount {
    type Err = DiscountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse an optional discount string; `None` is an empty compound discount.
///
/// # Errors
///
/// See [`CompoundDiscount::parse`].
pub fn parse_compound_discount(input: Option<&str>) -> Result<CompoundDiscount, DiscountParseError> {
    input.map_or_else(|| Ok(CompoundDiscount::empty()), CompoundDiscount::parse)
}

/// Parse a plain decimal literal: optional `-`, digits with an optional
/// fraction (`"5"`, `"2.5"`, `".5"`, `"5."`), and an optional `e`/`E`
/// exponent. Anything else, including trailing garbage, is rejected.
pub(crate) fn parse_number(literal: &str) -> Option<Decimal> {
    let (negative, unsigned) = literal
        .strip_prefix('-')
        .map_or((false, literal), |rest| (true, rest));
    let (mantissa, exponent) = unsigned
        .split_once(['e', 'E'])
        .map_or((unsigned, None), |(m, e)| (m, Some(e)));
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    let mut value: Decimal = normalized.parse().ok()?;

    if let Some(exponent) = exponent {
        value = apply_exponent(value, exponent)?;
    }

    if negative {
        value.set_sign_negative(true);
    }
    Some(value.normalize())
}

fn apply_exponent(value: Decimal, exponent: &str) -> Option<Decimal> {
    let (negative, digits) = exponent
        .strip_prefix('-')
        .map_or((false, exponent), |rest| (true, rest));
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }

    let power: u32 = digits.parse().ok()?;
    if power > MAX_EXPONENT {
        return None;
    }

    (0..power).try_fold(value, |acc, _| {
        if negative {
            acc.checked_div(Decimal::TEN)
        } else {
            acc.checked_mul(Decimal::TEN)
        }
    })
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
