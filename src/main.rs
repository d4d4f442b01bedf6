//! Player Report - EURO squad dataset analysis
//!
//! Loads the player dataset, derives summary statistics and binned
//! categories, and lays out a fixed sequence of tables and charts.

mod charts;
mod config;
mod data;
mod error;
mod gui;
mod stats;

use config::ReportConfig;
use eframe::egui;
use gui::ReportApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match ReportConfig::resolve(std::env::args_os().nth(1).map(PathBuf::from)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e:#}; falling back to defaults");
            ReportConfig::default()
        }
    };
    log::info!("Using data source {:?}", config.source);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Data Analysis Project"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Data Analysis Project",
        options,
        Box::new(|cc| Ok(Box::new(ReportApp::new(cc, config)))),
    )
}
