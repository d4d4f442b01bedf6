//! Error types shared across the report pipeline.

use crate::data::{BucketError, LoaderError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Recoverable per-chart failures. Each one replaces a single chart with an
/// inline placeholder; the rest of the report still renders.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
    #[error("No data available for '{0}'")]
    EmptyAggregate(String),
    #[error("Median of '{column}' is undefined ({count} value(s) present)")]
    UndefinedMedian { column: String, count: usize },
    #[error("{rows} row(s) of '{column}' fall outside every bucket")]
    BucketCoverageGap { column: String, rows: usize },
    #[error("Invalid bucket definition: {0}")]
    InvalidBuckets(#[from] BucketError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Fatal failures that abort a whole render pass.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to load dataset: {0}")]
    Load(#[from] LoaderError),
}
