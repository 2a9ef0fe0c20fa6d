//! Subcommand implementations.
//!
//! Commands write their results to the supplied writer (stdout in `main`) and
//! log diagnostics through `tracing`.

use std::path::PathBuf;

use dealfinder_core::PriceError;
use thiserror::Error;

pub mod deals;
pub mod format;
pub mod resolve;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported deals file {0}: expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),
    #[error("{failed} of {total} deals could not be priced")]
    FailedDeals { failed: usize, total: usize },
}
