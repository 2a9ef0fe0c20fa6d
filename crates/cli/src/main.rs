//! Dealfinder CLI - Price resolution and discount formatting tools.
//!
//! # Usage
//!
//! ```bash
//! # Resolve one price (amounts in minor units, flat discounts in whole units)
//! df-cli resolve --base 1000 --coupon 10% --discount 10% --cashback 10
//!
//! # Price every deal in a YAML or JSON file
//! df-cli deals deals.yaml
//!
//! # Render a compound discount for display
//! df-cli --currency INR format "10%+5"
//! ```
//!
//! # Commands
//!
//! - `resolve` - Resolve a single price, optionally explaining each step
//! - `deals` - Resolve prices for a file of deal records
//! - `format` - Format a compound discount string
//!
//! Results go to stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dealfinder_core::{CurrencyCode, CurrencyFormatter};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::resolve::ResolveArgs;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "df-cli")]
#[command(author, version, about = "Dealfinder price tools")]
struct Cli {
    /// Currency used for display (overrides `DEALFINDER_CURRENCY`)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the final price for a base price and its instruments
    Resolve {
        /// Base price in minor units (cents)
        #[arg(long)]
        base: Option<i64>,

        /// Coupon discount, computed against the base price (e.g. "10%+5")
        #[arg(long, allow_hyphen_values = true)]
        coupon: Option<String>,

        /// Additional discount, applied to the running price (repeatable)
        #[arg(long = "discount", allow_hyphen_values = true)]
        discounts: Vec<String>,

        /// Cashback percentage, applied last
        #[arg(long, allow_hyphen_values = true)]
        cashback: Option<Decimal>,

        /// Print every reduction step
        #[arg(long)]
        explain: bool,

        /// Print the full breakdown as JSON
        #[arg(long, conflicts_with = "explain")]
        json: bool,
    },
    /// Resolve prices for a YAML or JSON file of deal records
    Deals {
        /// Path to a `.yaml`, `.yml` or `.json` file
        path: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Format a compound discount for display
    Format {
        /// Discount string (e.g. "10%+5")
        discount: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format));

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dealfinder_cli=info,dealfinder_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

async fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = CurrencyFormatter::new(cli.currency.unwrap_or(config.currency));
    tracing::debug!(currency = %formatter.currency(), "Using currency");

    match cli.command {
        Commands::Resolve {
            base,
            coupon,
            discounts,
            cashback,
            explain,
            json,
        } => {
            let args = ResolveArgs {
                base,
                coupon,
                discounts,
                cashback,
                explain,
                json,
            };
            commands::resolve::run(&args, &formatter, &mut std::io::stdout().lock())?;
        }
        Commands::Deals { path, json } => {
            let deals = commands::deals::load(&path).await?;
            commands::deals::report(&deals, &formatter, json, &mut std::io::stdout().lock())?;
        }
        Commands::Format { discount } => {
            commands::format::run(&discount, &formatter, &mut std::io::stdout().lock())?;
        }
    }

    std::io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_args() {
        let cli = Cli::try_parse_from([
            "df-cli",
            "--currency",
            "eur",
            "resolve",
            "--base",
            "1000",
            "--discount",
            "10%",
            "--discount",
            "-5%",
            "--cashback",
            "2.5",
        ]);
        let Ok(cli) = cli else {
            panic!("arguments should parse");
        };
        assert_eq!(cli.currency, Some(CurrencyCode::EUR));
        match cli.command {
            Commands::Resolve {
                base,
                discounts,
                cashback,
                ..
            } => {
                assert_eq!(base, Some(1000));
                assert_eq!(discounts, ["10%", "-5%"]);
                assert_eq!(cashback, Some(Decimal::new(25, 1)));
            }
            _ => panic!("expected resolve"),
        }
    }
}
