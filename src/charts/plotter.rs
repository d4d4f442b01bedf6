//! Chart Plotter Module
//! Draws chart specifications with egui_plot. Every call is independent:
//! all styling and data come from the specification passed in.

use crate::charts::layout::DatasetPreview;
use crate::charts::spec::{
    BarSeries, ChartBody, ChartSpec, Orientation, PieSeries, PlannedChart, Quadrant,
    ScatterSeries,
};
use crate::data::Histogram;
use crate::error::ChartError;
use crate::stats::ColumnSummary;
use egui::{Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, GridMark, HLine, Legend, LineStyle, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text, VLine,
};
use std::f64::consts::TAU;

pub const CHART_HEIGHT: f32 = 320.0;
const BAR_ROW_HEIGHT: f32 = 16.0;

pub const SERIES_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
const Y_MEDIAN_COLOR: Color32 = Color32::from_rgb(220, 53, 69); // Red
const X_MEDIAN_COLOR: Color32 = Color32::from_rgb(41, 98, 255); // Blue
const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(96, 125, 139), // Blue Grey
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(0, 188, 212),  // Cyan
];

/// Draws charts and tables onto an egui surface.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a planned chart, or its placeholder if planning failed.
    pub fn draw_planned(ui: &mut egui::Ui, planned: &PlannedChart) {
        match planned {
            PlannedChart::Ready(spec) => Self::draw(ui, spec),
            PlannedChart::Failed { title, error, .. } => Self::draw_placeholder(ui, title, error),
        }
    }

    /// Draw one chart specification with its title and notes.
    pub fn draw(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.label(RichText::new(&spec.title).size(15.0).strong());
        ui.add_space(4.0);

        match &spec.body {
            ChartBody::Histogram(hist) => Self::draw_histogram(ui, spec, hist),
            ChartBody::Bar(bars) => Self::draw_bars(ui, spec, bars),
            ChartBody::Pie(pie) => Self::draw_pie(ui, spec, pie),
            ChartBody::Scatter(scatter) => Self::draw_scatter(ui, spec, scatter),
        }

        for note in &spec.notes {
            ui.label(
                RichText::new(format!("⚠ {note}"))
                    .size(11.0)
                    .color(WARNING_COLOR),
            );
        }
    }

    /// Inline message shown in place of a chart that could not be built.
    pub fn draw_placeholder(ui: &mut egui::Ui, title: &str, error: &ChartError) {
        egui::Frame::none()
            .rounding(5.0)
            .stroke(Stroke::new(1.5, WARNING_COLOR))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_height(80.0);
                ui.label(RichText::new(title).size(15.0).strong());
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!("⚠ Chart unavailable: {error}"))
                        .size(12.0)
                        .color(WARNING_COLOR),
                );
            });
    }

    fn draw_histogram(ui: &mut egui::Ui, spec: &ChartSpec, hist: &Histogram) {
        let width = hist.bin_width();
        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .zip(hist.edges.windows(2))
            .map(|(&count, edge)| Bar::new((edge[0] + edge[1]) / 2.0, count as f64).width(width))
            .collect();

        let column = spec.inputs.first().cloned().unwrap_or_default();

        Plot::new(format!("histogram_{}", spec.id))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(column)
            .y_axis_label("Count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(SERIES_COLOR)
                        .name(spec.title.as_str()),
                );
            });

        ui.label(
            RichText::new(format!("{} values in {} bins", hist.total(), hist.counts.len()))
                .size(11.0)
                .color(Color32::GRAY),
        );
    }

    fn draw_bars(ui: &mut egui::Ui, spec: &ChartSpec, series: &BarSeries) {
        let labels: Vec<String> = series.bars.iter().map(|(label, _)| label.clone()).collect();
        let n = labels.len();
        let height = (n as f32 * BAR_ROW_HEIGHT).max(CHART_HEIGHT);

        let bars: Vec<Bar> = series
            .bars
            .iter()
            .enumerate()
            .map(|(i, (label, count))| {
                Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .name(label.as_str())
            })
            .collect();

        Plot::new(format!("bars_{}", spec.id))
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Count")
            // One tick per category
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().color(SERIES_COLOR));
            });
    }

    /// Start and end angle of each wedge, counter-clockwise from the x axis.
    pub fn wedge_angles(pie: &PieSeries) -> Vec<(f64, f64)> {
        let total: usize = pie.slices.iter().map(|s| s.count).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut start = 0.0;
        pie.slices
            .iter()
            .map(|slice| {
                let end = start + slice.count as f64 / total as f64 * TAU;
                let wedge = (start, end);
                start = end;
                wedge
            })
            .collect()
    }

    fn draw_pie(ui: &mut egui::Ui, spec: &ChartSpec, pie: &PieSeries) {
        let wedges = Self::wedge_angles(pie);

        Plot::new(format!("pie_{}", spec.id))
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .legend(Legend::default())
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.2)
            .include_y(1.2)
            .show(ui, |plot_ui| {
                for (i, (slice, &(start, end))) in pie.slices.iter().zip(&wedges).enumerate() {
                    let color = PALETTE[i % PALETTE.len()];

                    // Fan of arc points around the centre, about one per 2 degrees
                    let steps = (((end - start) / TAU * 180.0).ceil() as usize).max(2);
                    let mut points = vec![[0.0, 0.0]];
                    points.extend((0..=steps).map(|k| {
                        let a = start + (end - start) * k as f64 / steps as f64;
                        [a.cos(), a.sin()]
                    }));

                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(points))
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                            .name(slice.label.as_str()),
                    );

                    let mid = (start + end) / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{:.1}%", slice.percent))
                            .size(11.0)
                            .color(Color32::WHITE),
                    ));
                    plot_ui.text(Text::new(
                        PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                        RichText::new(&slice.label).size(11.0),
                    ));
                }
            });
    }

    fn draw_scatter(ui: &mut egui::Ui, spec: &ChartSpec, scatter: &ScatterSeries) {
        Plot::new(format!("scatter_{}", spec.id))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(scatter.x_label.as_str())
            .y_axis_label(scatter.y_label.as_str())
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(scatter.points.clone()))
                        .radius(3.0)
                        .color(SERIES_COLOR)
                        .name("Players"),
                );

                // Red for the y median, blue for the x median
                if let Some(overlay) = spec.overlay(Orientation::Horizontal) {
                    plot_ui.hline(
                        HLine::new(overlay.value)
                            .color(Y_MEDIAN_COLOR)
                            .style(LineStyle::dashed_loose())
                            .name(overlay.label.as_str()),
                    );
                }
                if let Some(overlay) = spec.overlay(Orientation::Vertical) {
                    plot_ui.vline(
                        VLine::new(overlay.value)
                            .color(X_MEDIAN_COLOR)
                            .style(LineStyle::dashed_loose())
                            .name(overlay.label.as_str()),
                    );
                }
            });

        if let Some(counts) = &scatter.quadrants {
            ui.horizontal_wrapped(|ui| {
                for quadrant in [
                    Quadrant::HighXHighY,
                    Quadrant::LowXHighY,
                    Quadrant::LowXLowY,
                    Quadrant::HighXLowY,
                ] {
                    ui.label(
                        RichText::new(format!(
                            "{}: {}",
                            quadrant.describe(&scatter.x_label, &scatter.y_label),
                            counts.get(quadrant)
                        ))
                        .size(11.0)
                        .color(Color32::GRAY),
                    );
                    ui.add_space(8.0);
                }
            });
        }
    }

    /// Dataset rows as a scrollable striped grid.
    pub fn draw_dataset_table(ui: &mut egui::Ui, preview: &DatasetPreview) {
        ui.label(
            RichText::new(format!(
                "Showing {} of {} rows",
                preview.rows.len(),
                preview.total_rows
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        egui::ScrollArea::both()
            .id_salt("dataset_table")
            .max_height(300.0)
            .show(ui, |ui| {
                egui::Grid::new("dataset_grid")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in &preview.columns {
                            ui.label(RichText::new(column).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in &preview.rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Per-column summary statistics table.
    pub fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        if summaries.is_empty() {
            return;
        }

        let fmt = |v: f64| {
            if v.is_nan() {
                "-".to_string()
            } else {
                format!("{:.2}", v)
            }
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Column", "N", "Mean", "Std", "Min", "Median", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for s in summaries {
                            ui.label(RichText::new(&s.column).size(11.0));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            for v in [s.mean, s.std, s.min, s.median, s.max] {
                                ui.label(RichText::new(fmt(v)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::spec::PieSlice;

    fn slice(label: &str, count: usize) -> PieSlice {
        PieSlice {
            label: label.to_string(),
            count,
            percent: 0.0,
        }
    }

    #[test]
    fn test_wedges_cover_full_circle() {
        let pie = PieSeries {
            slices: vec![slice("a", 2), slice("b", 1), slice("c", 1)],
        };
        let wedges = ChartPlotter::wedge_angles(&pie);
        assert_eq!(wedges.len(), 3);
        assert_eq!(wedges[0].0, 0.0);
        assert!((wedges[0].1 - TAU / 2.0).abs() < 1e-12);
        assert!((wedges[2].1 - TAU).abs() < 1e-12);
        for pair in wedges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_empty_pie_has_no_wedges() {
        let pie = PieSeries { slices: Vec::new() };
        assert!(ChartPlotter::wedge_angles(&pie).is_empty());
    }
}
