//! Format a compound discount for display.
//!
//! ```bash
//! df-cli format "10%+5"          # $5.00 + 10%
//! df-cli --currency EUR format 5 # €5.00
//! ```

use std::io::Write;

use dealfinder_core::CurrencyFormatter;

use super::CommandError;

/// Write the display form of `discount`.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn run(
    discount: &str,
    formatter: &CurrencyFormatter,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    writeln!(out, "{}", formatter.format_compound_discount(discount))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dealfinder_core::CurrencyCode;

    use super::*;

    #[test]
    fn test_format_uses_formatter_currency() {
        let mut out = Vec::new();
        run("10%+5", &CurrencyFormatter::new(CurrencyCode::GBP), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "£5.00 + 10%\n");
    }
}
