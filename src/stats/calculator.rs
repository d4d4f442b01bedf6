//! Statistics Calculator Module
//! Frequency tables, medians and numeric column summaries.

use crate::data::DataProcessor;
use crate::error::ChartError;
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Category label to count, descending by count.
///
/// Ties keep the order in which categories first appear in the column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Group values by exact text; `None` entries are skipped.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for value in values.into_iter().flatten() {
            let label = value.as_ref();
            match index.get(label) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(label.to_string(), entries.len());
                    entries.push((label.to_string(), 1));
                }
            }
        }

        // Stable sort keeps first-appearance order among equal counts
        entries.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Same table in reverse order (ascending by count for bar display).
    pub fn reversed(&self) -> Self {
        Self {
            entries: self.entries.iter().rev().cloned().collect(),
        }
    }
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            median: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles the aggregations the charts consume.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Frequency table of a categorical column.
    pub fn frequency_table(df: &DataFrame, column: &str) -> Result<FrequencyTable, ChartError> {
        let values = DataProcessor::text_column(df, column)?;
        let table = FrequencyTable::from_values(values);
        if table.is_empty() {
            return Err(ChartError::EmptyAggregate(column.to_string()));
        }
        Ok(table)
    }

    /// Median with the mean of the two middle values for even sizes.
    pub fn median(values: &[f64]) -> Option<f64> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        Some(median)
    }

    /// Summary of one numeric column's non-missing values.
    pub fn summarize(df: &DataFrame, column: &str) -> Result<ColumnSummary, ChartError> {
        let values = DataProcessor::present_values(df, column)?;
        let Some(median) = Self::median(&values) else {
            return Ok(ColumnSummary {
                column: column.to_string(),
                ..ColumnSummary::default()
            });
        };

        Ok(ColumnSummary {
            column: column.to_string(),
            count: values.len(),
            mean: Statistics::mean(&values),
            std: Statistics::std_dev(&values),
            min: Statistics::min(&values),
            median,
            max: Statistics::max(&values),
        })
    }

    /// Summaries of every numeric column, in frame order.
    pub fn summarize_numeric(df: &DataFrame) -> Vec<ColumnSummary> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .filter_map(|col| Self::summarize(df, col.name().as_str()).ok())
            .collect()
    }

    /// Percentages of `counts` rounded to one decimal place.
    ///
    /// When plain rounding drifts more than 0.1 away from 100, the labels are
    /// re-apportioned by largest remainder over tenths of a percent so they
    /// sum to exactly 100.0.
    pub fn percentage_labels(counts: &[usize]) -> Vec<f64> {
        let total: usize = counts.iter().sum();
        if total == 0 {
            return vec![0.0; counts.len()];
        }

        // Round half up in tenths of a percent
        let rounded: Vec<usize> = counts
            .iter()
            .map(|&c| (c * 2000 + total) / (2 * total))
            .collect();
        let sum: usize = rounded.iter().sum();
        if sum.abs_diff(1000) <= 1 {
            return rounded.into_iter().map(|t| t as f64 / 10.0).collect();
        }

        let mut tenths: Vec<usize> = counts.iter().map(|&c| c * 1000 / total).collect();
        let assigned: usize = tenths.iter().sum();

        // Hand out the leftover tenths to the largest remainders, earliest first
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(counts[i] * 1000 % total));
        for &i in order.iter().take(1000 - assigned) {
            tenths[i] += 1;
        }

        tenths.into_iter().map(|t| t as f64 / 10.0).collect()
    }
}
