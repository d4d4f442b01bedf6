//! Report Layout Module
//! Fixed ordering of tables, full-width charts and side-by-side pairs.

use crate::charts::planner::{BreakdownStyle, ChartPlanner, Question};
use crate::charts::spec::{ChartKind, PlannedChart};
use crate::data::{
    columns, DataSource, MARKET_VALUE_BIN, MARKET_VALUE_EDGES, MARKET_VALUE_LABELS,
};
use crate::error::ReportError;
use crate::stats::{ColumnSummary, StatsCalculator};
use polars::prelude::*;

/// Options shaping the report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Include the youth/senior country comparison section.
    pub country_comparison: bool,
    pub age_bins: usize,
    pub preview_rows: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            country_comparison: false,
            age_bins: 20,
            preview_rows: 500,
        }
    }
}

/// One position in the page narrative, before any data is read.
#[derive(Debug, Clone)]
pub enum Slot {
    Heading { level: u8, text: &'static str },
    DatasetTable,
    SummaryTable,
    Single(Question),
    Pair(Question, Question),
}

/// First rows of the dataset, rendered as text.
#[derive(Debug, Clone, Default)]
pub struct DatasetPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl DatasetPreview {
    pub fn from_frame(df: &DataFrame, limit: usize) -> Self {
        let shown = df.height().min(limit);
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..shown)
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        // Display would wrap text in quotes
                        Ok(AnyValue::String(s)) => s.to_string(),
                        Ok(AnyValue::StringOwned(s)) => s.to_string(),
                        Ok(value) => value.to_string(),
                    })
                    .collect()
            })
            .collect();

        Self {
            columns,
            rows,
            total_rows: df.height(),
        }
    }
}

/// A rendered unit of the report.
#[derive(Debug)]
pub enum LayoutBlock {
    Heading { level: u8, text: &'static str },
    Dataset(DatasetPreview),
    Summary(Vec<ColumnSummary>),
    Full(PlannedChart),
    Pair(PlannedChart, PlannedChart),
}

impl LayoutBlock {
    /// Chart kind of the block, if it holds charts.
    pub fn chart_kind(&self) -> Option<ChartKind> {
        match self {
            LayoutBlock::Full(chart) => chart.spec().map(|spec| spec.kind()),
            LayoutBlock::Pair(..) => Some(ChartKind::MultiPanel),
            _ => None,
        }
    }

    pub fn charts(&self) -> Vec<&PlannedChart> {
        match self {
            LayoutBlock::Full(chart) => vec![chart],
            LayoutBlock::Pair(left, right) => vec![left, right],
            _ => Vec::new(),
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Default)]
pub struct Report {
    pub blocks: Vec<LayoutBlock>,
}

impl Report {
    pub fn charts(&self) -> impl Iterator<Item = &PlannedChart> {
        self.blocks.iter().flat_map(|block| block.charts())
    }

    pub fn chart_ids(&self) -> Vec<&'static str> {
        self.charts().map(|chart| chart.id()).collect()
    }

    pub fn failed_count(&self) -> usize {
        self.charts().filter(|chart| chart.error().is_some()).count()
    }
}

/// Builds the report page from a dataset.
pub struct ReportComposer;

impl ReportComposer {
    /// Page narrative in display order.
    pub fn slots(options: &LayoutOptions) -> Vec<Slot> {
        let mut slots = vec![
            Slot::Heading {
                level: 2,
                text: "Dataset",
            },
            Slot::DatasetTable,
            Slot::SummaryTable,
            Slot::Heading {
                level: 2,
                text: "Data Analysis",
            },
            Slot::Heading {
                level: 3,
                text: "Player Info",
            },
            Slot::Single(Question::Distribution {
                id: "age_histogram",
                title: "Age Distribution of Players",
                column: columns::AGE,
                bins: options.age_bins,
            }),
        ];

        if options.country_comparison {
            slots.push(Slot::Pair(
                Question::Breakdown {
                    id: "youth_country_bars",
                    title: "Youth Team Country Distribution of Players",
                    column: columns::YOUTH_TEAM_COUNTRY,
                    style: BreakdownStyle::Bars,
                },
                Question::Breakdown {
                    id: "senior_country_bars",
                    title: "Senior Debut Country Distribution of Players",
                    column: columns::SENIOR_DEBUT_COUNTRY,
                    style: BreakdownStyle::Bars,
                },
            ));
            slots.push(Slot::Pair(
                Question::Breakdown {
                    id: "youth_country_pie",
                    title: "Youth Team Country Share of Players",
                    column: columns::YOUTH_TEAM_COUNTRY,
                    style: BreakdownStyle::Pie,
                },
                Question::Breakdown {
                    id: "senior_country_pie",
                    title: "Senior Debut Country Share of Players",
                    column: columns::SENIOR_DEBUT_COUNTRY,
                    style: BreakdownStyle::Pie,
                },
            ));
        }

        slots.extend([
            Slot::Pair(
                Question::Breakdown {
                    id: "club_bars",
                    title: "Clubs Distribution of Players",
                    column: columns::CURRENT_CLUB,
                    style: BreakdownStyle::Bars,
                },
                Question::Breakdown {
                    id: "league_bars",
                    title: "Club League Distribution of Players",
                    column: columns::CLUB_LEAGUE,
                    style: BreakdownStyle::Bars,
                },
            ),
            Slot::Heading {
                level: 3,
                text: "Player Performance",
            },
            Slot::Single(Question::BucketShare {
                id: "market_value_pie",
                title: "Market Value Distribution of Players",
                column: columns::MARKET_VALUE,
                derived: MARKET_VALUE_BIN,
                edges: &MARKET_VALUE_EDGES,
                labels: &MARKET_VALUE_LABELS,
            }),
            Slot::Pair(
                Question::Correlation {
                    id: "goals_vs_assists",
                    title: "Goals Scored vs. Assists",
                    x: columns::GOALS_SCORED,
                    y: columns::ASSISTS,
                },
                Question::Correlation {
                    id: "goals_vs_selections",
                    title: "Goals Scored vs. Selections",
                    x: columns::GOALS_SCORED,
                    y: columns::SELECTIONS,
                },
            ),
        ]);

        slots
    }

    /// Plan every slot against the dataset. Each chart fails independently.
    pub fn compose(df: &DataFrame, options: &LayoutOptions) -> Report {
        let blocks = Self::slots(options)
            .into_iter()
            .map(|slot| match slot {
                Slot::Heading { level, text } => LayoutBlock::Heading { level, text },
                Slot::DatasetTable => {
                    LayoutBlock::Dataset(DatasetPreview::from_frame(df, options.preview_rows))
                }
                Slot::SummaryTable => LayoutBlock::Summary(StatsCalculator::summarize_numeric(df)),
                Slot::Single(question) => LayoutBlock::Full(ChartPlanner::plan(df, &question)),
                Slot::Pair(left, right) => {
                    let (left, right) = ChartPlanner::plan_pair(df, &left, &right);
                    LayoutBlock::Pair(left, right)
                }
            })
            .collect();

        Report { blocks }
    }

    /// Fetch a snapshot and compose the report. Load failure aborts the pass
    /// before any chart is planned.
    pub fn render_pass(
        source: &mut dyn DataSource,
        options: &LayoutOptions,
    ) -> Result<Report, ReportError> {
        let df = source.snapshot().map_err(|e| {
            log::error!("Render pass aborted, {}: {}", source.describe(), e);
            e
        })?;

        let report = Self::compose(&df, options);
        let kinds: Vec<ChartKind> = report
            .blocks
            .iter()
            .filter_map(LayoutBlock::chart_kind)
            .collect();
        log::debug!("Chart blocks {:?}, charts {:?}", kinds, report.chart_ids());
        log::info!(
            "Rendered {} charts from {} rows ({} unavailable)",
            report.charts().count(),
            df.height(),
            report.failed_count()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LoaderError;
    use crate::error::ChartError;

    struct FrameSource(Option<DataFrame>);

    impl DataSource for FrameSource {
        fn describe(&self) -> String {
            "test frame".to_string()
        }

        fn is_live(&self) -> bool {
            false
        }

        fn snapshot(&mut self) -> Result<DataFrame, LoaderError> {
            self.0.clone().ok_or(LoaderError::NoData)
        }
    }

    fn players() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Age".into(), vec![20i64, 22, 30, 27]),
            Column::new("Current club".into(), vec!["Ajax", "Inter", "Ajax", "Porto"]),
            Column::new(
                "Club league".into(),
                vec!["Eredivisie", "Serie A", "Eredivisie", "Liga Portugal"],
            ),
            Column::new(
                "Market value".into(),
                vec![500_000i64, 2_000_000, 7_000_000, 20_000_000],
            ),
            Column::new("Goals scored".into(), vec![0i64, 5, 10, 3]),
            Column::new("Assists".into(), vec![0i64, 5, 2, 1]),
            Column::new("Selections".into(), vec![3i64, 40, 61, 12]),
        ])
        .unwrap()
    }

    #[test]
    fn test_fixed_chart_order() {
        let report = ReportComposer::compose(&players(), &LayoutOptions::default());
        assert_eq!(
            report.chart_ids(),
            vec![
                "age_histogram",
                "club_bars",
                "league_bars",
                "market_value_pie",
                "goals_vs_assists",
                "goals_vs_selections",
            ]
        );
        assert_eq!(report.failed_count(), 0);
    }

    #[test]
    fn test_dataset_table_comes_first() {
        let report = ReportComposer::compose(&players(), &LayoutOptions::default());
        let first_table = report
            .blocks
            .iter()
            .position(|b| matches!(b, LayoutBlock::Dataset(_)))
            .unwrap();
        let first_chart = report
            .blocks
            .iter()
            .position(|b| b.chart_kind().is_some())
            .unwrap();
        assert!(first_table < first_chart);
    }

    #[test]
    fn test_block_kinds() {
        let report = ReportComposer::compose(&players(), &LayoutOptions::default());
        let kinds: Vec<ChartKind> = report.blocks.iter().filter_map(|b| b.chart_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Histogram,
                ChartKind::MultiPanel,
                ChartKind::Pie,
                ChartKind::MultiPanel,
            ]
        );
    }

    #[test]
    fn test_country_variant_inserted_after_age() {
        let options = LayoutOptions {
            country_comparison: true,
            ..LayoutOptions::default()
        };
        let report = ReportComposer::compose(&players(), &options);
        let ids = report.chart_ids();
        assert_eq!(
            &ids[..6],
            &[
                "age_histogram",
                "youth_country_bars",
                "senior_country_bars",
                "youth_country_pie",
                "senior_country_pie",
                "club_bars",
            ]
        );
    }

    #[test]
    fn test_missing_country_columns_fail_only_those_charts() {
        let options = LayoutOptions {
            country_comparison: true,
            ..LayoutOptions::default()
        };
        let report = ReportComposer::compose(&players(), &options);
        assert_eq!(report.failed_count(), 4);

        let failed: Vec<&'static str> = report
            .charts()
            .filter(|c| matches!(c.error(), Some(ChartError::MissingColumn(_))))
            .map(|c| c.id())
            .collect();
        assert!(failed.iter().all(|id| id.contains("country")));

        // Charts after the failures still render
        let last = report.charts().last().unwrap();
        assert_eq!(last.id(), "goals_vs_selections");
        assert!(last.spec().is_some());
    }

    #[test]
    fn test_dataset_preview() {
        let preview = DatasetPreview::from_frame(&players(), 2);
        assert_eq!(preview.columns.len(), 7);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 4);
        assert_eq!(preview.rows[0][1], "Ajax");
        assert_eq!(preview.rows[1][0], "22");
    }

    #[test]
    fn test_dataset_preview_keeps_quotes_in_text() {
        let df = DataFrame::new(vec![
            Column::new(
                "Current club".into(),
                vec![Some("\"Los Blancos\""), None, Some("Ajax")],
            ),
            Column::new("Market value".into(), vec![Some(1.5), Some(2.0), None]),
        ])
        .unwrap();

        let preview = DatasetPreview::from_frame(&df, 10);
        assert_eq!(preview.rows[0][0], "\"Los Blancos\"");
        assert_eq!(preview.rows[1][0], "");
        assert_eq!(preview.rows[2][0], "Ajax");
        assert_eq!(preview.rows[0][1], "1.5");
        assert_eq!(preview.rows[2][1], "");
    }

    #[test]
    fn test_render_pass_aborts_without_dataset() {
        let mut source = FrameSource(None);
        let result = ReportComposer::render_pass(&mut source, &LayoutOptions::default());
        assert!(matches!(result, Err(ReportError::Load(LoaderError::NoData))));
    }

    #[test]
    fn test_render_pass_with_dataset() {
        let mut source = FrameSource(Some(players()));
        let report = ReportComposer::render_pass(&mut source, &LayoutOptions::default()).unwrap();
        assert_eq!(report.charts().count(), 6);
    }
}
