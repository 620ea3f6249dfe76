use eframe::egui;

#[derive(Debug)]
pub enum MenuBarEvent {
    Save,
    CancelConnection,
    Quit,
}

pub struct MenuBar;

impl MenuBar {
    pub fn new() -> Self {
        Self
    }

    /// `pending` is the name of the table a connection is being drawn from.
    pub fn show(&mut self, ui: &mut egui::Ui, pending: Option<&str>) -> Option<MenuBarEvent> {
        let mut event = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Save").clicked() {
                    event = Some(MenuBarEvent::Save);
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    event = Some(MenuBarEvent::Quit);
                }
            });

            ui.menu_button("Connections", |ui| {
                let cancel = egui::Button::new("Cancel pending connection");
                if ui.add_enabled(pending.is_some(), cancel).clicked() {
                    event = Some(MenuBarEvent::CancelConnection);
                    ui.close_menu();
                }
            });

            ui.separator();
            ui.label(egui::RichText::new("Database Schema Mapping Tool").strong());

            if let Some(name) = pending {
                ui.separator();
                ui.label(format!("Connecting from {} (Esc to cancel)", name));
            }
        });

        event
    }
}
