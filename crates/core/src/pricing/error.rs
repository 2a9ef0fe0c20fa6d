//! Pricing error types.

/// A discount token that is not a valid percentage or flat literal.
///
/// Malformed tokens come from bad upstream discount records; they are never
/// coerced to zero.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountParseError {
    /// The token (as it appeared in the source string) is not numeric.
    #[error("invalid discount token {token:?}")]
    InvalidToken {
        /// The offending token.
        token: String,
    },
}

impl DiscountParseError {
    pub(crate) fn invalid(token: &str) -> Self {
        Self::InvalidToken {
            token: token.to_owned(),
        }
    }
}

/// Errors that can occur while resolving a price.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// A discount string could not be parsed.
    #[error(transparent)]
    Parse(#[from] DiscountParseError),
    /// Intermediate or final arithmetic left the representable range.
    #[error("price arithmetic out of range while applying {stage}")]
    OutOfRange {
        /// The reduction stage that overflowed.
        stage: &'static str,
    },
}
