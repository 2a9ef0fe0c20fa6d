//! Resolve prices for a file of deal records.
//!
//! # Usage
//!
//! ```bash
//! df-cli deals fixtures/deals.yaml
//! df-cli deals deals.json --json
//! ```
//!
//! Every record is priced even when some fail; failures are logged and the
//! command exits non-zero at the end.

use std::io::Write;
use std::path::Path;

use dealfinder_core::{CurrencyFormatter, DealRecord, PriceQuote};
use serde::Serialize;
use tracing::{error, info};

use super::CommandError;

/// Supported deal file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DealsFormat {
    Json,
    Yaml,
}

impl DealsFormat {
    fn from_path(path: &Path) -> Result<Self, CommandError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(CommandError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// A priced deal, as emitted with `--json`.
#[derive(Debug, Serialize)]
struct PricedDeal<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_code: Option<&'a str>,
    #[serde(flatten)]
    quote: PriceQuote,
}

/// Read and decode a deals file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unsupported extension,
/// or does not decode as a list of deal records.
pub async fn load(path: &Path) -> Result<Vec<DealRecord>, CommandError> {
    let format = DealsFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path).await?;
    let deals = parse(format, &content)?;
    info!(path = %path.display(), deals = deals.len(), "Loaded deals");
    Ok(deals)
}

fn parse(format: DealsFormat, content: &str) -> Result<Vec<DealRecord>, CommandError> {
    Ok(match format {
        DealsFormat::Json => serde_json::from_str(content)?,
        DealsFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

/// Price every deal and write one line (or one JSON array) of results.
///
/// # Errors
///
/// Returns [`CommandError::FailedDeals`] if any record failed to resolve, or
/// an I/O error if writing fails.
pub fn report(
    deals: &[DealRecord],
    formatter: &CurrencyFormatter,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut priced = Vec::with_capacity(deals.len());
    let mut failed = 0;

    for deal in deals {
        match deal.resolve() {
            Ok(quote) => priced.push(PricedDeal {
                title: &deal.title,
                coupon_code: deal.coupon.as_ref().and_then(|coupon| coupon.code.as_deref()),
                quote,
            }),
            Err(e) => {
                failed += 1;
                error!(title = %deal.title, error = %e, "Failed to price deal");
            }
        }
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &priced)?;
        writeln!(out)?;
    } else {
        for deal in &priced {
            write!(
                out,
                "{}: {} -> {} (save {}, {}% off)",
                deal.title,
                formatter.format_money(deal.quote.base_price),
                formatter.format_money(deal.quote.final_price),
                formatter.format_money(deal.quote.savings),
                deal.quote.percent_off
            )?;
            if let Some(code) = deal.coupon_code {
                write!(out, " [code {code}]")?;
            }
            writeln!(out)?;
        }
    }

    if failed > 0 {
        return Err(CommandError::FailedDeals {
            failed,
            total: deals.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dealfinder_core::CurrencyCode;

    use super::*;

    const DEALS_YAML: &str = r#"
- title: Espresso machine
  price: 25000
  coupon:
    code: BREW10
    discount: "10%"
  discounts:
    - retailer: Acme
      discount: "5"
  cashback:
    percent: 5
- title: Broken listing
  price: 1000
  coupon:
    discount: "ten percent"
"#;

    fn report_to_string(
        deals: &[DealRecord],
        json: bool,
    ) -> (Result<(), CommandError>, String) {
        let mut out = Vec::new();
        let result = report(
            deals,
            &CurrencyFormatter::new(CurrencyCode::USD),
            json,
            &mut out,
        );
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DealsFormat::from_path(Path::new("deals.JSON")).unwrap(),
            DealsFormat::Json
        );
        assert_eq!(
            DealsFormat::from_path(Path::new("deals.yml")).unwrap(),
            DealsFormat::Yaml
        );
        assert!(matches!(
            DealsFormat::from_path(Path::new("deals.csv")),
            Err(CommandError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let deals = parse(DealsFormat::Yaml, DEALS_YAML).unwrap();
        assert_eq!(deals.len(), 2);
        assert_eq!(deals.first().unwrap().discounts.len(), 1);
    }

    #[test]
    fn test_report_continues_after_failure() {
        let deals = parse(DealsFormat::Yaml, DEALS_YAML).unwrap();
        let (result, output) = report_to_string(&deals, false);

        // 25000 - 2500 = 22500, - 500 = 22000, - 5% = 20900
        assert_eq!(
            output,
            "Espresso machine: $250.00 -> $209.00 (save $41.00, 16% off) [code BREW10]\n"
        );
        assert!(matches!(
            result,
            Err(CommandError::FailedDeals {
                failed: 1,
                total: 2
            })
        ));
    }

    #[test]
    fn test_report_json() {
        let deals = parse(
            DealsFormat::Json,
            r#"[{ "title": "Kettle", "price": 4000, "discounts": [{ "discount": "25%" }] }]"#,
        )
        .unwrap();
        let (result, output) = report_to_string(&deals, true);
        assert!(result.is_ok());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["title"], "Kettle");
        assert_eq!(value[0]["final_price"], 3000);
        assert_eq!(value[0]["percent_off"], 25);
        assert!(value[0].get("coupon_code").is_none());
    }

    #[test]
    fn test_report_shows_coupon_code() {
        let deals = parse(
            DealsFormat::Json,
            r#"[
                { "title": "Lamp", "price": 500, "coupon": { "code": "FREESHIP" } },
                { "title": "Mug", "price": 1000, "coupon": { "code": "MUG2", "discount": "2" } }
            ]"#,
        )
        .unwrap();

        let (result, output) = report_to_string(&deals, false);
        assert!(result.is_ok());
        assert_eq!(
            output,
            "Lamp: $5.00 -> $5.00 (save $0.00, 0% off) [code FREESHIP]\n\
             Mug: $10.00 -> $8.00 (save $2.00, 20% off) [code MUG2]\n"
        );

        let (_, json) = report_to_string(&deals, true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["coupon_code"], "MUG2");
    }
}
