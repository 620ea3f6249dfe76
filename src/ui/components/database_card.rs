use crate::geometry::FrameLayout;
use crate::interaction::ConnectionController;
use crate::models::{DatabaseConfig, Side, TableInfo};
use crate::store::EntityStore;
use crate::store::LinkStore;
use crate::ui::styles;
use eframe::egui;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum MappingEvent {
    AddDatabase(Side),
    RenameDatabase(String, String),
    SetSchema(String, String),
    DeleteDatabase(String),
    ToggleTables(String),
    AddTable(String),
    RenameTable(String, String),
    DeleteTable(String),
    SelectTable(String, Side),
    Disconnect(String),
}

/// Read-only state the cards need to decide how each table looks.
pub struct CardView<'a> {
    pub side: Side,
    pub entities: &'a EntityStore,
    pub links: &'a LinkStore,
    pub controller: &'a ConnectionController,
    pub collapsed: &'a HashSet<String>,
}

pub struct DatabaseCard;

impl DatabaseCard {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        database: &DatabaseConfig,
        view: &CardView,
        layout: &mut FrameLayout,
    ) -> Option<MappingEvent> {
        let mut event = None;
        let accent = styles::side_accent(view.side);

        egui::Frame::group(ui.style())
            .fill(ui.visuals().panel_fill)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("🗄").color(accent).size(18.0));

                    let mut name = database.name.clone();
                    let name_edit = egui::TextEdit::singleline(&mut name)
                        .hint_text("Database name")
                        .font(egui::TextStyle::Heading)
                        .desired_width(ui.available_width() - 40.0);
                    if ui.add(name_edit).changed() {
                        event = Some(MappingEvent::RenameDatabase(database.id.clone(), name));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(egui::RichText::new("🗑").color(styles::DANGER));
                        if ui.add(delete).on_hover_text("Delete database").clicked() {
                            event = Some(MappingEvent::DeleteDatabase(database.id.clone()));
                        }
                    });
                });

                let mut schema = database.schema.clone();
                let schema_edit = egui::TextEdit::singleline(&mut schema)
                    .hint_text("Schema (optional)")
                    .desired_width(f32::INFINITY);
                if ui.add(schema_edit).changed() {
                    event = Some(MappingEvent::SetSchema(database.id.clone(), schema));
                }

                ui.separator();

                let expanded = !view.collapsed.contains(&database.id);
                ui.horizontal(|ui| {
                    let arrow = if expanded { "▼" } else { "▶" };
                    if ui.button(arrow).clicked() {
                        event = Some(MappingEvent::ToggleTables(database.id.clone()));
                    }
                    ui.label(format!("Tables ({})", database.tables.len()));
                    if !expanded && !database.tables.is_empty() {
                        ui.label(egui::RichText::new("- collapsed").small().weak());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let add = egui::Button::new(egui::RichText::new("➕ Add").color(egui::Color32::WHITE))
                            .fill(accent);
                        if ui.add(add).clicked() {
                            event = Some(MappingEvent::AddTable(database.id.clone()));
                        }
                    });
                });

                if expanded {
                    for table in &database.tables {
                        if let Some(table_event) = self.table_row(ui, table, view, layout) {
                            event = Some(table_event);
                        }
                    }

                    if database.tables.is_empty() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(8.0);
                            ui.label(egui::RichText::new("No tables yet").weak());
                            ui.add_space(8.0);
                        });
                    }
                }
            });

        event
    }

    fn table_row(
        &mut self,
        ui: &mut egui::Ui,
        table: &TableInfo,
        view: &CardView,
        layout: &mut FrameLayout,
    ) -> Option<MappingEvent> {
        let mut event = None;

        let is_source = view.controller.is_source(&table.id);
        let partner = view.links.partner_of(&table.id);
        let is_target = view.controller.is_target_side(view.side);

        let (fill, stroke) = if is_source {
            (styles::SOURCE_FILL, styles::SOURCE_STROKE)
        } else if partner.is_some() {
            (styles::side_tint(view.side), styles::side_accent(view.side))
        } else if is_target {
            (styles::TARGET_FILL, styles::TARGET_STROKE)
        } else {
            (ui.visuals().extreme_bg_color, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };

        let response = egui::Frame::none()
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .rounding(6.0)
            .inner_margin(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let (icon, hint) = if is_source {
                        ("⏺", "Click again to cancel")
                    } else if is_target {
                        ("🎯", "Click to connect")
                    } else {
                        ("🔗", "Start a connection from this table")
                    };
                    if ui.selectable_label(is_source, icon).on_hover_text(hint).clicked() {
                        event = Some(MappingEvent::SelectTable(table.id.clone(), view.side));
                    }

                    let mut name = table.name.clone();
                    let name_edit = egui::TextEdit::singleline(&mut name)
                        .hint_text("Table name")
                        .font(egui::TextStyle::Monospace)
                        .desired_width(ui.available_width() * 0.5);
                    if ui.add(name_edit).changed() {
                        event = Some(MappingEvent::RenameTable(table.id.clone(), name));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text("Delete table").clicked() {
                            event = Some(MappingEvent::DeleteTable(table.id.clone()));
                        }

                        if let Some(partner_id) = partner {
                            if ui.small_button("✖").on_hover_text("Remove connection").clicked() {
                                event = Some(MappingEvent::Disconnect(table.id.clone()));
                            }
                            let partner_name = view
                                .entities
                                .table(partner_id)
                                .map(|t| t.name.as_str())
                                .unwrap_or("?");
                            let arrow = match view.side {
                                Side::Legacy => "→",
                                Side::Modern => "←",
                            };
                            ui.label(
                                egui::RichText::new(format!("{} {}", arrow, partner_name))
                                    .small()
                                    .color(styles::side_accent(view.side.other())),
                            );
                        }
                    });
                });
            })
            .response;

        // Rows clipped away by the scroll area have no usable position
        if ui.is_rect_visible(response.rect) {
            layout.record(&table.id, response.rect);
        }

        event
    }
}
