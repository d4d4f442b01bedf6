//! Chart Planner Module
//! Maps each analytical question to a concrete chart specification.

use crate::charts::spec::{
    BarSeries, ChartBody, ChartSpec, Orientation, Overlay, PieSeries, PieSlice, PlannedChart,
    QuadrantCounts, ScatterSeries,
};
use crate::data::{BucketSet, DataProcessor};
use crate::error::ChartError;
use crate::stats::{FrequencyTable, StatsCalculator};
use polars::prelude::*;

/// How a categorical breakdown is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownStyle {
    /// Horizontal bars, largest category on top.
    Bars,
    /// Pie with percentage labels.
    Pie,
}

/// An analytical question the report answers with one chart.
#[derive(Debug, Clone)]
pub enum Question {
    /// Equal-width histogram of a numeric column.
    Distribution {
        id: &'static str,
        title: &'static str,
        column: &'static str,
        bins: usize,
    },
    /// Counts per category of a categorical column.
    Breakdown {
        id: &'static str,
        title: &'static str,
        column: &'static str,
        style: BreakdownStyle,
    },
    /// Share of rows per named bucket of a numeric column.
    ///
    /// Bucket `i` covers `[edges[i], edges[i + 1])` and is named `labels[i]`.
    BucketShare {
        id: &'static str,
        title: &'static str,
        column: &'static str,
        derived: &'static str,
        edges: &'static [f64],
        labels: &'static [&'static str],
    },
    /// Scatter of two numeric columns with median reference lines.
    Correlation {
        id: &'static str,
        title: &'static str,
        x: &'static str,
        y: &'static str,
    },
}

impl Question {
    pub fn id(&self) -> &'static str {
        match self {
            Question::Distribution { id, .. }
            | Question::Breakdown { id, .. }
            | Question::BucketShare { id, .. }
            | Question::Correlation { id, .. } => *id,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Question::Distribution { title, .. }
            | Question::Breakdown { title, .. }
            | Question::BucketShare { title, .. }
            | Question::Correlation { title, .. } => *title,
        }
    }
}

/// Builds chart specifications from the dataset.
pub struct ChartPlanner;

impl ChartPlanner {
    /// Plan one chart. Failures are logged and returned as placeholders.
    pub fn plan(df: &DataFrame, question: &Question) -> PlannedChart {
        match Self::build(df, question) {
            Ok(spec) => {
                log::debug!(
                    "Planned '{}' ({:?}) from {:?}",
                    spec.id,
                    spec.kind(),
                    spec.inputs
                );
                PlannedChart::Ready(spec)
            }
            Err(error) => {
                log::warn!("Chart '{}' unavailable: {}", question.title(), error);
                PlannedChart::Failed {
                    id: question.id(),
                    title: question.title().to_string(),
                    error,
                }
            }
        }
    }

    /// Plan two independent charts for side-by-side display.
    pub fn plan_pair(
        df: &DataFrame,
        left: &Question,
        right: &Question,
    ) -> (PlannedChart, PlannedChart) {
        (Self::plan(df, left), Self::plan(df, right))
    }

    fn build(df: &DataFrame, question: &Question) -> Result<ChartSpec, ChartError> {
        match question {
            Question::Distribution {
                id,
                title,
                column,
                bins,
            } => Self::histogram_spec(df, *id, title, column, *bins),
            Question::Breakdown {
                id,
                title,
                column,
                style,
            } => {
                let table = StatsCalculator::frequency_table(df, column)?;
                let body = match style {
                    BreakdownStyle::Bars => Self::bar_body(&table),
                    BreakdownStyle::Pie => Self::pie_body(&table),
                };
                Ok(Self::spec(*id, title, vec![column.to_string()], body))
            }
            Question::BucketShare {
                id,
                title,
                column,
                derived,
                edges,
                labels,
            } => {
                let buckets = BucketSet::new(edges, labels)?;
                let derived = DataProcessor::derive_buckets(df, column, &buckets, derived)?;
                if derived.gaps > 0 {
                    return Err(ChartError::BucketCoverageGap {
                        column: column.to_string(),
                        rows: derived.gaps,
                    });
                }
                let table = StatsCalculator::frequency_table(&derived.frame, &derived.name)?;
                Ok(Self::spec(
                    *id,
                    title,
                    vec![column.to_string()],
                    Self::pie_body(&table),
                ))
            }
            Question::Correlation { id, title, x, y } => {
                Self::scatter_spec(df, *id, title, x, y)
            }
        }
    }

    fn spec(id: &'static str, title: &str, inputs: Vec<String>, body: ChartBody) -> ChartSpec {
        ChartSpec {
            id,
            title: title.to_string(),
            inputs,
            body,
            overlays: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn histogram_spec(
        df: &DataFrame,
        id: &'static str,
        title: &str,
        column: &str,
        bins: usize,
    ) -> Result<ChartSpec, ChartError> {
        let values = DataProcessor::present_values(df, column)?;
        let histogram = DataProcessor::histogram(&values, bins)
            .ok_or_else(|| ChartError::EmptyAggregate(column.to_string()))?;
        Ok(Self::spec(
            id,
            title,
            vec![column.to_string()],
            ChartBody::Histogram(histogram),
        ))
    }

    fn bar_body(table: &FrequencyTable) -> ChartBody {
        // Reverse so the largest category is drawn last, at the top
        ChartBody::Bar(BarSeries {
            bars: table.reversed().entries().to_vec(),
        })
    }

    fn pie_body(table: &FrequencyTable) -> ChartBody {
        let counts: Vec<usize> = table.entries().iter().map(|(_, count)| *count).collect();
        let percents = StatsCalculator::percentage_labels(&counts);
        ChartBody::Pie(PieSeries {
            slices: table
                .entries()
                .iter()
                .zip(percents)
                .map(|((label, count), percent)| PieSlice {
                    label: label.clone(),
                    count: *count,
                    percent,
                })
                .collect(),
        })
    }

    fn scatter_spec(
        df: &DataFrame,
        id: &'static str,
        title: &str,
        x: &str,
        y: &str,
    ) -> Result<ChartSpec, ChartError> {
        let xs = DataProcessor::numeric_column(df, x)?;
        let ys = DataProcessor::numeric_column(df, y)?;

        let points: Vec<[f64; 2]> = xs
            .iter()
            .zip(&ys)
            .filter_map(|(xv, yv)| Some([(*xv)?, (*yv)?]))
            .collect();
        if points.is_empty() {
            return Err(ChartError::EmptyAggregate(format!("{x} / {y}")));
        }

        let mut notes = Vec::new();
        let x_values: Vec<f64> = xs.into_iter().flatten().collect();
        let y_values: Vec<f64> = ys.into_iter().flatten().collect();
        let x_median = Self::overlay_median(&x_values, x, &mut notes);
        let y_median = Self::overlay_median(&y_values, y, &mut notes);

        let mut overlays = Vec::new();
        if let Some(value) = y_median {
            overlays.push(Overlay {
                orientation: Orientation::Horizontal,
                value,
                label: format!("Median {y}"),
            });
        }
        if let Some(value) = x_median {
            overlays.push(Overlay {
                orientation: Orientation::Vertical,
                value,
                label: format!("Median {x}"),
            });
        }

        let quadrants = match (x_median, y_median) {
            (Some(mx), Some(my)) => Some(QuadrantCounts::tally(&points, mx, my)),
            _ => None,
        };

        Ok(ChartSpec {
            id,
            title: title.to_string(),
            inputs: vec![x.to_string(), y.to_string()],
            body: ChartBody::Scatter(ScatterSeries {
                x_label: x.to_string(),
                y_label: y.to_string(),
                points,
                quadrants,
            }),
            overlays,
            notes,
        })
    }

    /// Median for a reference line; needs at least two values.
    fn overlay_median(values: &[f64], column: &str, notes: &mut Vec<String>) -> Option<f64> {
        if values.len() < 2 {
            let error = ChartError::UndefinedMedian {
                column: column.to_string(),
                count: values.len(),
            };
            log::warn!("Omitting median line: {error}");
            notes.push(error.to_string());
            return None;
        }
        StatsCalculator::median(values)
    }
}
