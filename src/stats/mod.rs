//! Stats module - aggregations over the dataset

mod calculator;

pub use calculator::{ColumnSummary, FrequencyTable, StatsCalculator};
