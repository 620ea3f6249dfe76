use crate::geometry::FrameLayout;
use crate::models::DatabaseSystem;
use crate::ui::components::{CardView, DatabaseCard, MappingEvent};
use crate::ui::styles;
use eframe::egui;

/// One side of the mapping: header, "Add Database" and a scrolling list of cards.
pub struct DatabaseSystemPanel {
    card: DatabaseCard,
}

impl DatabaseSystemPanel {
    pub fn new() -> Self {
        Self {
            card: DatabaseCard::new(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        system: &DatabaseSystem,
        view: &CardView,
        layout: &mut FrameLayout,
    ) -> Option<MappingEvent> {
        let mut event = None;
        let accent = styles::side_accent(view.side);
        let count = system.databases.len();

        egui::Frame::none()
            .fill(styles::side_tint(view.side))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.heading(
                            egui::RichText::new(format!("{} Databases", view.side.label()))
                                .strong()
                                .color(accent),
                        );
                        ui.label(format!(
                            "{} database{}",
                            count,
                            if count == 1 { "" } else { "s" }
                        ));
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if add_database_button(ui, accent).clicked() {
                            event = Some(MappingEvent::AddDatabase(view.side));
                        }
                    });
                });
            });

        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .id_source(view.side.as_str())
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for database in &system.databases {
                    if let Some(card_event) = self.card.show(ui, database, view, layout) {
                        event = Some(card_event);
                    }
                    ui.add_space(8.0);
                }

                if system.databases.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(egui::RichText::new("🗄").size(40.0).weak());
                        ui.label(egui::RichText::new("No databases yet").strong());
                        ui.label(
                            egui::RichText::new(format!(
                                "Add your first {} database to get started",
                                view.side.as_str()
                            ))
                            .small(),
                        );
                        ui.add_space(8.0);
                        if add_database_button(ui, accent).clicked() {
                            event = Some(MappingEvent::AddDatabase(view.side));
                        }
                    });
                }
            });

        event
    }
}

fn add_database_button(ui: &mut egui::Ui, accent: egui::Color32) -> egui::Response {
    let button = egui::Button::new(egui::RichText::new("➕ Add Database").color(egui::Color32::WHITE))
        .fill(accent);
    ui.add(button)
}
