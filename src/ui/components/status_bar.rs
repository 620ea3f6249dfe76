use chrono::{DateTime, Local};
use eframe::egui;

pub struct StatusCounts {
    pub legacy_databases: usize,
    pub modern_databases: usize,
    pub connections: usize,
}

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        status_message: &str,
        counts: &StatusCounts,
        last_saved: Option<DateTime<Local>>,
    ) {
        ui.horizontal(|ui| {
            ui.label(status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(saved) = last_saved {
                    ui.label(format!("Saved {}", saved.format("%H:%M:%S")));
                    ui.separator();
                }
                ui.label(format!(
                    "{} legacy / {} modern databases, {} connections",
                    counts.legacy_databases, counts.modern_databases, counts.connections
                ));
            });
        });
    }
}
