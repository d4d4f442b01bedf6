//! Bucket Definitions
//! Named half-open ranges used to discretize a numeric column.

use thiserror::Error;

/// Edges of the market value buckets, in euros.
pub const MARKET_VALUE_EDGES: [f64; 5] = [
    0.0,
    1_000_000.0,
    5_000_000.0,
    10_000_000.0,
    f64::INFINITY,
];

pub const MARKET_VALUE_LABELS: [&str; 4] = ["<1M", "1M-5M", "5M-10M", "10M-50M"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BucketError {
    #[error("Expected {expected} edges for {labels} labels, got {found}")]
    EdgeCount {
        expected: usize,
        labels: usize,
        found: usize,
    },
    #[error("First bucket must start at 0, found {0}")]
    NotFromZero(f64),
    #[error("Bucket '{0}' has an empty or inverted range")]
    EmptyRange(String),
    #[error("Last bucket must extend to infinity, found {0}")]
    Bounded(f64),
}

/// One labeled range `[lower, upper)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
}

impl Bucket {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// Ordered, contiguous buckets covering `[0, inf)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet {
    buckets: Vec<Bucket>,
}

impl BucketSet {
    /// Build from `labels.len() + 1` ascending edges.
    ///
    /// Bucket `i` covers `[edges[i], edges[i + 1])`. Sharing edges between
    /// neighbours keeps the set contiguous; the checks below reject gaps at
    /// either end and empty ranges.
    pub fn new(edges: &[f64], labels: &[&str]) -> Result<Self, BucketError> {
        if labels.is_empty() || edges.len() != labels.len() + 1 {
            return Err(BucketError::EdgeCount {
                expected: labels.len() + 1,
                labels: labels.len(),
                found: edges.len(),
            });
        }
        if edges[0] != 0.0 {
            return Err(BucketError::NotFromZero(edges[0]));
        }
        let last = edges[edges.len() - 1];
        if last != f64::INFINITY {
            return Err(BucketError::Bounded(last));
        }

        let mut buckets = Vec::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            let (lower, upper) = (edges[i], edges[i + 1]);
            // NaN edges fail this comparison too
            if !(lower < upper) {
                return Err(BucketError::EmptyRange(label.to_string()));
            }
            buckets.push(Bucket {
                lower,
                upper,
                label: label.to_string(),
            });
        }

        Ok(Self { buckets })
    }

    /// Label of the bucket containing `value`, or `None` outside `[0, inf)`.
    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.buckets
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.label.as_str())
    }
}
