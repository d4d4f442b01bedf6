//! Player Report Main Application
//! Main window with control panel and report view.
//!
//! Each render pass runs synchronously on the UI thread: fetch a snapshot,
//! plan every chart, hand the finished report to the view.

use crate::charts::ReportComposer;
use crate::config::{ReportConfig, SourceConfig};
use crate::data::{source_from_config, DataSource};
use crate::gui::{ControlPanel, ControlPanelAction, ReportView};
use egui::SidePanel;
use std::time::{Duration, Instant};

/// Main application window.
pub struct ReportApp {
    config: ReportConfig,
    source: Box<dyn DataSource>,
    control_panel: ControlPanel,
    report_view: ReportView,
    last_pass: Option<Instant>,
}

impl ReportApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ReportConfig) -> Self {
        let source = source_from_config(&config.source);
        let mut control_panel = ControlPanel::new();
        control_panel.set_source(source.describe(), source.is_live());
        control_panel.country_comparison = config.country_comparison;

        let mut app = Self {
            config,
            source,
            control_panel,
            report_view: ReportView::new(),
            last_pass: None,
        };
        app.render();
        app
    }

    /// Run one render pass.
    fn render(&mut self) {
        let options = self.config.layout_options();
        match ReportComposer::render_pass(self.source.as_mut(), &options) {
            Ok(report) => {
                let failed = report.failed_count();
                let total = report.charts().count();
                let status = if failed == 0 {
                    format!("Rendered {} charts", total)
                } else {
                    format!("Rendered {} charts, {} unavailable", total, failed)
                };
                self.control_panel.set_status(&status);
                self.report_view.set_report(report);
            }
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {}", e));
                self.report_view.set_error(e.to_string());
            }
        }
        self.last_pass = Some(Instant::now());
    }

    /// Switch to a static CSV picked by the user.
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            log::info!("Switching data source to {}", path.display());
            self.config.source = SourceConfig::Static { path };
            self.source = source_from_config(&self.config.source);
            self.control_panel
                .set_source(self.source.describe(), self.source.is_live());
            self.render();
        }
    }

    /// Interval until the next live re-render, if auto refresh is on.
    fn refresh_interval(&self) -> Option<Duration> {
        if !self.source.is_live() {
            return None;
        }
        self.config
            .source
            .refresh_secs()
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

impl eframe::App for ReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(interval) = self.refresh_interval() {
            let due = self
                .last_pass
                .map_or(true, |last| last.elapsed() >= interval);
            if due {
                self.render();
            }
            ctx.request_repaint_after(interval);
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| match self.control_panel.show(ui) {
                ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                ControlPanelAction::Refresh => self.render(),
                ControlPanelAction::LayoutChanged => {
                    self.config.country_comparison = self.control_panel.country_comparison;
                    self.render();
                }
                ControlPanelAction::None => {}
            });

        // Central panel - Report
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(ui);
        });
    }
}
