//! Data Processor Module
//! Column extraction and derived fields (market value bins, age histogram).

use crate::data::BucketSet;
use crate::error::ChartError;
use polars::prelude::*;

/// Name of the derived market value bucket column.
pub const MARKET_VALUE_BIN: &str = "Market value bin";

/// Dataset with one derived column appended.
#[derive(Debug, Clone)]
pub struct DerivedColumn {
    pub frame: DataFrame,
    pub name: String,
    /// Rows whose value fell outside every bucket (left null).
    pub gaps: usize,
}

/// Equal-width binning of a numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Handles column extraction and derivation. Never mutates its input frame.
pub struct DataProcessor;

impl DataProcessor {
    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ChartError> {
        df.column(name)
            .map_err(|_| ChartError::MissingColumn(name.to_string()))
    }

    /// Numeric values of a column; nulls, NaN and unparseable text become `None`.
    pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, ChartError> {
        let column = Self::column(df, name)?;
        let values = column.cast(&DataType::Float64)?;
        let values = values
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Non-missing numeric values of a column.
    pub fn present_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ChartError> {
        Ok(Self::numeric_column(df, name)?.into_iter().flatten().collect())
    }

    /// Categorical values of a column as text; nulls become `None`.
    pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ChartError> {
        let column = Self::column(df, name)?;
        let values = column.cast(&DataType::String)?;
        let values = values
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(values)
    }

    /// Append a bucket-label column derived from `source`.
    ///
    /// Missing inputs stay missing. Values no bucket covers are left null and
    /// counted in `gaps`.
    pub fn derive_buckets(
        df: &DataFrame,
        source: &str,
        buckets: &BucketSet,
        target: &str,
    ) -> Result<DerivedColumn, ChartError> {
        let values = Self::numeric_column(df, source)?;

        let mut gaps = 0;
        let labels: Vec<Option<&str>> = values
            .iter()
            .map(|value| {
                let value = (*value)?;
                let label = buckets.label_for(value);
                if label.is_none() {
                    gaps += 1;
                }
                label
            })
            .collect();

        if gaps > 0 {
            log::warn!("{gaps} value(s) of '{source}' are outside the bucket range");
        }

        let mut frame = df.clone();
        frame.with_column(Series::new(target.into(), labels))?;

        Ok(DerivedColumn {
            frame,
            name: target.to_string(),
            gaps,
        })
    }

    /// Bin values into `bins` equal-width bins over `[min, max]`.
    ///
    /// The last bin is closed on the right. A constant series is binned over
    /// `[v - 0.5, v + 0.5]`. Returns `None` for an empty series.
    pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
        if values.is_empty() {
            return None;
        }
        let bins = bins.max(1);

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + i as f64 * width })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MARKET_VALUE_EDGES, MARKET_VALUE_LABELS};

    fn market_value() -> BucketSet {
        BucketSet::new(&MARKET_VALUE_EDGES, &MARKET_VALUE_LABELS).unwrap()
    }

    fn market_frame(values: Vec<Option<f64>>) -> DataFrame {
        DataFrame::new(vec![Column::new("Market value".into(), values)]).unwrap()
    }

    #[test]
    fn test_missing_column() {
        let df = market_frame(vec![Some(1.0)]);
        let err = DataProcessor::numeric_column(&df, "Age").unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(name) if name == "Age"));
    }

    #[test]
    fn test_numeric_column_from_integers() {
        let df = DataFrame::new(vec![Column::new("Goals scored".into(), vec![0i64, 5, 10])])
            .unwrap();
        let values = DataProcessor::present_values(&df, "Goals scored").unwrap();
        assert_eq!(values, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_nan_is_missing() {
        let df = market_frame(vec![Some(1.0), Some(f64::NAN), None]);
        let values = DataProcessor::numeric_column(&df, "Market value").unwrap();
        assert_eq!(values, vec![Some(1.0), None, None]);
    }

    #[test]
    fn test_text_column_keeps_nulls() {
        let df = DataFrame::new(vec![Column::new(
            "Current club".into(),
            vec![Some("Ajax"), None, Some("Inter")],
        )])
        .unwrap();
        let values = DataProcessor::text_column(&df, "Current club").unwrap();
        assert_eq!(
            values,
            vec![Some("Ajax".to_string()), None, Some("Inter".to_string())]
        );
    }

    #[test]
    fn test_derive_market_value_buckets() {
        let df = market_frame(vec![
            Some(500_000.0),
            Some(2_000_000.0),
            Some(7_000_000.0),
            Some(20_000_000.0),
        ]);
        let derived = DataProcessor::derive_buckets(
            &df,
            "Market value",
            &market_value(),
            MARKET_VALUE_BIN,
        )
        .unwrap();

        assert_eq!(derived.gaps, 0);
        let labels = DataProcessor::text_column(&derived.frame, MARKET_VALUE_BIN).unwrap();
        assert_eq!(
            labels,
            vec![
                Some("<1M".to_string()),
                Some("1M-5M".to_string()),
                Some("5M-10M".to_string()),
                Some("10M-50M".to_string()),
            ]
        );

        // Original frame is untouched
        assert_eq!(df.width(), 1);
        assert_eq!(derived.frame.width(), 2);
    }

    #[test]
    fn test_derive_reports_gaps_and_keeps_missing() {
        let df = market_frame(vec![Some(-5.0), None, Some(3_000_000.0)]);
        let derived = DataProcessor::derive_buckets(
            &df,
            "Market value",
            &market_value(),
            MARKET_VALUE_BIN,
        )
        .unwrap();

        assert_eq!(derived.gaps, 1);
        let labels = DataProcessor::text_column(&derived.frame, MARKET_VALUE_BIN).unwrap();
        assert_eq!(labels, vec![None, None, Some("1M-5M".to_string())]);
    }

    #[test]
    fn test_age_histogram_scenario() {
        let hist = DataProcessor::histogram(&[20.0, 22.0, 30.0], 20).unwrap();

        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_eq!(hist.edges[0], 20.0);
        assert_eq!(hist.edges[20], 30.0);
        assert!((hist.bin_width() - 0.5).abs() < 1e-12);
        assert!(hist.counts.iter().all(|&c| c <= 3));
        assert_eq!(hist.total(), 3);

        // 20 -> first bin, 22 -> bin 4, 30 -> closed last bin
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[4], 1);
        assert_eq!(hist.counts[19], 1);
    }

    #[test]
    fn test_constant_histogram() {
        let hist = DataProcessor::histogram(&[25.0, 25.0], 20).unwrap();
        assert_eq!(hist.edges[0], 24.5);
        assert_eq!(hist.edges[20], 25.5);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.counts.iter().filter(|&&c| c == 2).count(), 1);
    }

    #[test]
    fn test_empty_histogram() {
        assert!(DataProcessor::histogram(&[], 20).is_none());
    }
}
