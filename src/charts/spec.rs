//! Chart Specification Module
//! Immutable descriptions of each chart, decoupled from drawing.

use crate::data::Histogram;
use crate::error::ChartError;

/// Kind of visual a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Histogram,
    Bar,
    Pie,
    Scatter,
    /// Two independent charts rendered side by side.
    MultiPanel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Reference line drawn over a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub orientation: Orientation,
    pub value: f64,
    pub label: String,
}

/// Horizontal bars, listed bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub bars: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSeries {
    pub slices: Vec<PieSlice>,
}

/// Position of a point relative to the x and y medians.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    HighXHighY,
    LowXHighY,
    LowXLowY,
    HighXLowY,
}

impl Quadrant {
    /// Points exactly on a median line count as low on that axis.
    pub fn classify(point: [f64; 2], x_median: f64, y_median: f64) -> Self {
        match (point[0] > x_median, point[1] > y_median) {
            (true, true) => Quadrant::HighXHighY,
            (false, true) => Quadrant::LowXHighY,
            (false, false) => Quadrant::LowXLowY,
            (true, false) => Quadrant::HighXLowY,
        }
    }

    pub fn describe(&self, x: &str, y: &str) -> String {
        let (xs, ys) = match self {
            Quadrant::HighXHighY => ("high", "high"),
            Quadrant::LowXHighY => ("low", "high"),
            Quadrant::LowXLowY => ("low", "low"),
            Quadrant::HighXLowY => ("high", "low"),
        };
        format!("{xs} {x} / {ys} {y}")
    }
}

/// Point counts per quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadrantCounts {
    pub high_x_high_y: usize,
    pub low_x_high_y: usize,
    pub low_x_low_y: usize,
    pub high_x_low_y: usize,
}

impl QuadrantCounts {
    pub fn tally(points: &[[f64; 2]], x_median: f64, y_median: f64) -> Self {
        let mut counts = Self::default();
        for &point in points {
            match Quadrant::classify(point, x_median, y_median) {
                Quadrant::HighXHighY => counts.high_x_high_y += 1,
                Quadrant::LowXHighY => counts.low_x_high_y += 1,
                Quadrant::LowXLowY => counts.low_x_low_y += 1,
                Quadrant::HighXLowY => counts.high_x_low_y += 1,
            }
        }
        counts
    }

    pub fn get(&self, quadrant: Quadrant) -> usize {
        match quadrant {
            Quadrant::HighXHighY => self.high_x_high_y,
            Quadrant::LowXHighY => self.low_x_high_y,
            Quadrant::LowXLowY => self.low_x_low_y,
            Quadrant::HighXLowY => self.high_x_low_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<[f64; 2]>,
    /// Present only when both medians are defined.
    pub quadrants: Option<QuadrantCounts>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Histogram(Histogram),
    Bar(BarSeries),
    Pie(PieSeries),
    Scatter(ScatterSeries),
}

/// One chart, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub id: &'static str,
    pub title: String,
    /// Dataset columns the chart reads.
    pub inputs: Vec<String>,
    pub body: ChartBody,
    pub overlays: Vec<Overlay>,
    /// Warnings shown under the chart.
    pub notes: Vec<String>,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        match self.body {
            ChartBody::Histogram(_) => ChartKind::Histogram,
            ChartBody::Bar(_) => ChartKind::Bar,
            ChartBody::Pie(_) => ChartKind::Pie,
            ChartBody::Scatter(_) => ChartKind::Scatter,
        }
    }

    pub fn overlay(&self, orientation: Orientation) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.orientation == orientation)
    }
}

/// Outcome of planning one chart.
#[derive(Debug)]
pub enum PlannedChart {
    Ready(ChartSpec),
    Failed {
        id: &'static str,
        title: String,
        error: ChartError,
    },
}

impl PlannedChart {
    pub fn id(&self) -> &'static str {
        match self {
            PlannedChart::Ready(spec) => spec.id,
            PlannedChart::Failed { id, .. } => *id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PlannedChart::Ready(spec) => &spec.title,
            PlannedChart::Failed { title, .. } => title,
        }
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            PlannedChart::Ready(spec) => Some(spec),
            PlannedChart::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ChartError> {
        match self {
            PlannedChart::Ready(_) => None,
            PlannedChart::Failed { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_high_goals_low_assists() {
        assert_eq!(
            Quadrant::classify([10.0, 2.0], 5.0, 5.0),
            Quadrant::HighXLowY
        );
        assert_eq!(
            Quadrant::HighXLowY.describe("Goals scored", "Assists"),
            "high Goals scored / low Assists"
        );
    }

    #[test]
    fn test_points_on_median_are_low() {
        assert_eq!(Quadrant::classify([5.0, 5.0], 5.0, 5.0), Quadrant::LowXLowY);
        assert_eq!(Quadrant::classify([5.0, 6.0], 5.0, 5.0), Quadrant::LowXHighY);
    }

    #[test]
    fn test_tally() {
        let points = [[0.0, 0.0], [5.0, 5.0], [10.0, 2.0], [7.0, 9.0]];
        let counts = QuadrantCounts::tally(&points, 5.0, 5.0);
        assert_eq!(counts.get(Quadrant::LowXLowY), 2);
        assert_eq!(counts.get(Quadrant::HighXLowY), 1);
        assert_eq!(counts.get(Quadrant::HighXHighY), 1);
        assert_eq!(counts.get(Quadrant::LowXHighY), 0);
    }
}
