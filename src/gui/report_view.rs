//! Report View Widget
//! Scrollable central panel drawing the report blocks in order.
//! Side-by-side pairs share the row width equally.

use crate::charts::{ChartPlotter, LayoutBlock, PlannedChart, Report};
use egui::{Color32, RichText, ScrollArea};

const BLOCK_SPACING: f32 = 15.0;

/// Holds the latest report and draws it.
#[derive(Default)]
pub struct ReportView {
    report: Option<Report>,
    error: Option<String>,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: Report) {
        self.report = Some(report);
        self.error = None;
    }

    /// Replace the report with a load failure message.
    pub fn set_error(&mut self, error: String) {
        self.report = None;
        self.error = Some(error);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(format!("⚠ {error}"))
                        .size(18.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(report) = &self.report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("Data Analysis Project").size(26.0));
                ui.add_space(BLOCK_SPACING);

                for block in &report.blocks {
                    Self::draw_block(ui, block);
                    ui.add_space(BLOCK_SPACING);
                }
            });
    }

    fn draw_block(ui: &mut egui::Ui, block: &LayoutBlock) {
        match block {
            LayoutBlock::Heading { level, text } => {
                let size = if *level <= 2 { 22.0 } else { 18.0 };
                ui.label(RichText::new(*text).size(size).strong());
            }
            LayoutBlock::Dataset(preview) => ChartPlotter::draw_dataset_table(ui, preview),
            LayoutBlock::Summary(summaries) => ChartPlotter::draw_summary_table(ui, summaries),
            LayoutBlock::Full(chart) => Self::draw_card(ui, chart),
            LayoutBlock::Pair(left, right) => {
                ui.columns(2, |columns| {
                    Self::draw_card(&mut columns[0], left);
                    Self::draw_card(&mut columns[1], right);
                });
            }
        }
    }

    fn draw_card(ui: &mut egui::Ui, chart: &PlannedChart) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ChartPlotter::draw_planned(ui, chart);
            });
    }
}
