//! Control Panel Widget
//! Left side panel with data source and refresh controls.

use egui::{Color32, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub source_label: String,
    pub is_live: bool,
    pub country_comparison: bool,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            source_label: String::new(),
            is_live: false,
            country_comparison: false,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&mut self, label: String, is_live: bool) {
        self.source_label = label;
        self.is_live = is_live;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Player Report")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mode = if self.is_live { "LIVE" } else { "STATIC" };
                    ui.label(RichText::new(mode).size(11.0).strong().color(if self.is_live {
                        Color32::from_rgb(40, 167, 69)
                    } else {
                        Color32::GRAY
                    }));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
                ui.label(RichText::new(&self.source_label).size(12.0));
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Layout Section =====
        ui.label(RichText::new("⚙️ Layout").size(14.0).strong());
        ui.add_space(5.0);

        if ui
            .checkbox(&mut self.country_comparison, "Country comparison")
            .changed()
        {
            action = ControlPanelAction::LayoutChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("⟳ Refresh").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Refresh;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("unavailable") {
            Color32::from_rgb(243, 156, 18)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Refresh,
    LayoutChanged,
}
