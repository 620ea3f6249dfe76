use crate::config::Config;
use crate::geometry::{ConnectionLines, FrameLayout, LayoutEventHub, LayoutTracker};
use crate::ids::UuidGenerator;
use crate::interaction::{ConnectionController, SelectOutcome};
use crate::models::Side;
use crate::persistence::{self, FileStore, KeyValueStore, MemoryStore, Snapshot};
use crate::store::{StoreError, Workspace};
use crate::ui::components::*;
use crate::ui::setup_styles;
use chrono::{DateTime, Local};
use eframe::egui;
use std::collections::HashSet;

pub struct SchemaMapperApp {
    // Mapping state
    pub workspace: Workspace,
    pub controller: ConnectionController,

    // Persistence
    storage: Box<dyn KeyValueStore>,
    saved_revision: u64,
    last_saved: Option<DateTime<Local>>,

    // Connection line geometry
    layout_events: LayoutEventHub,
    layout_tracker: LayoutTracker,
    lines: ConnectionLines,

    // UI state
    pub collapsed_databases: HashSet<String>,
    pub status_message: String,

    // UI Components
    menu_bar: MenuBar,
    status_bar: StatusBar,
    legacy_panel: DatabaseSystemPanel,
    modern_panel: DatabaseSystemPanel,
    lines_view: ConnectionLinesView,
}

impl SchemaMapperApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        setup_styles(&cc.egui_ctx);

        let storage = Self::open_storage(&config);
        let workspace = persistence::load(storage.as_ref()).into_workspace(Box::new(UuidGenerator));

        let layout_events = LayoutEventHub::new();
        let layout_tracker = LayoutTracker::new(layout_events.clone());
        let mut lines = ConnectionLines::new(config.line_inset);
        lines.mount(
            &layout_events,
            workspace.connections(),
            workspace.links_revision(),
            &FrameLayout::new(),
        );

        Self {
            saved_revision: workspace.revision(),
            workspace,
            controller: ConnectionController::new(),
            storage,
            last_saved: None,
            layout_events,
            layout_tracker,
            lines,
            collapsed_databases: HashSet::new(),
            status_message: "Ready".to_string(),
            menu_bar: MenuBar::new(),
            status_bar: StatusBar::new(),
            legacy_panel: DatabaseSystemPanel::new(),
            modern_panel: DatabaseSystemPanel::new(),
            lines_view: ConnectionLinesView::new(),
        }
    }

    fn open_storage(config: &Config) -> Box<dyn KeyValueStore> {
        match config.data_dir() {
            Ok(dir) => {
                tracing::info!("Storing mapping in {}", dir.display());
                Box::new(FileStore::new(dir))
            }
            Err(e) => {
                tracing::warn!("No data directory ({}), changes will not be kept", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn save_state(&mut self) {
        let snapshot = Snapshot::capture(&self.workspace);
        match persistence::save(self.storage.as_mut(), &snapshot) {
            Ok(()) => {
                self.saved_revision = self.workspace.revision();
                self.last_saved = Some(Local::now());
            }
            Err(e) => {
                tracing::error!("Failed to save mapping: {}", e);
                self.status_message = format!("Save failed: {}", e);
            }
        }
    }

    fn table_name(&self, table_id: &str) -> String {
        self.workspace
            .entities()
            .table(table_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| table_id.to_string())
    }

    fn handle_mapping_event(&mut self, event: MappingEvent) {
        let result: Result<(), StoreError> = match event {
            MappingEvent::AddDatabase(side) => {
                let id = self.workspace.add_database(side);
                if let Some(db) = self.workspace.entities().group(&id) {
                    self.status_message = format!("Added {}", db.name);
                }
                Ok(())
            }
            MappingEvent::RenameDatabase(id, name) => self.workspace.rename_database(&id, &name),
            MappingEvent::SetSchema(id, schema) => self.workspace.set_database_schema(&id, &schema),
            MappingEvent::DeleteDatabase(id) => {
                self.workspace.delete_database(&id).map(|tables| {
                    for table_id in &tables {
                        self.controller.forget_table(table_id);
                    }
                    self.collapsed_databases.remove(&id);
                    self.status_message = format!("Deleted database with {} tables", tables.len());
                })
            }
            MappingEvent::ToggleTables(id) => {
                if !self.collapsed_databases.remove(&id) {
                    self.collapsed_databases.insert(id);
                }
                Ok(())
            }
            MappingEvent::AddTable(database_id) => self.workspace.add_table(&database_id).map(|_| ()),
            MappingEvent::RenameTable(id, name) => self.workspace.rename_table(&id, &name),
            MappingEvent::DeleteTable(id) => {
                let name = self.table_name(&id);
                self.workspace.delete_table(&id).map(|()| {
                    self.controller.forget_table(&id);
                    self.status_message = format!("Deleted table {}", name);
                })
            }
            MappingEvent::SelectTable(id, side) => {
                let name = self.table_name(&id);
                self.status_message = match self.controller.select(&id, side, &mut self.workspace) {
                    SelectOutcome::Started => {
                        format!("Connecting from {}: pick a {} table", name, side.other())
                    }
                    SelectOutcome::Cancelled => "Connection cancelled".to_string(),
                    SelectOutcome::Linked(_) => format!("Connected {}", name),
                    SelectOutcome::Rejected(e) => format!("Could not connect: {}", e),
                };
                Ok(())
            }
            MappingEvent::Disconnect(table_id) => {
                if self.workspace.disconnect(&table_id) {
                    self.status_message = format!("Removed connection from {}", self.table_name(&table_id));
                }
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!("Ignoring edit: {}", e);
            self.status_message = format!("Error: {}", e);
        }
    }

    fn status_counts(&self) -> StatusCounts {
        StatusCounts {
            legacy_databases: self.workspace.system(Side::Legacy).databases.len(),
            modern_databases: self.workspace.system(Side::Modern).databases.len(),
            connections: self.workspace.connections().len(),
        }
    }
}

impl eframe::App for SchemaMapperApp {
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.save_state();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.controller.is_connecting() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.cancel();
            self.status_message = "Connection cancelled".to_string();
        }

        // Top menu bar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            let pending = self.controller.pending().map(|p| self.table_name(&p.table_id));
            if let Some(event) = self.menu_bar.show(ui, pending.as_deref()) {
                match event {
                    MenuBarEvent::Save => {
                        self.save_state();
                        self.status_message = "Saved".to_string();
                    }
                    MenuBarEvent::CancelConnection => {
                        self.controller.cancel();
                        self.status_message = "Connection cancelled".to_string();
                    }
                    MenuBarEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                }
            }
        });

        // Bottom status bar
        let counts = self.status_counts();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar.show(ui, &self.status_message, &counts, self.last_saved);
        });

        // Both sides, collecting table positions as they are drawn
        let mut layout = FrameLayout::new();
        let mut events = Vec::new();
        let container = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let container = ui.max_rect();
                layout.set_container(container);

                ui.columns(2, |columns| {
                    for (column, side) in columns.iter_mut().zip(Side::all()) {
                        let view = CardView {
                            side,
                            entities: self.workspace.entities(),
                            links: self.workspace.links(),
                            controller: &self.controller,
                            collapsed: &self.collapsed_databases,
                        };
                        let panel = match side {
                            Side::Legacy => &mut self.legacy_panel,
                            Side::Modern => &mut self.modern_panel,
                        };
                        if let Some(event) = panel.show(column, self.workspace.system(side), &view, &mut layout) {
                            events.push(event);
                        }
                    }
                });

                container
            })
            .inner;

        if !events.is_empty() {
            for event in events {
                self.handle_mapping_event(event);
            }
            // Positions shift after edits; draw the next frame right away
            ctx.request_repaint();
        }

        self.layout_tracker.observe(&layout);
        self.lines.update(
            self.workspace.connections(),
            self.workspace.links_revision(),
            &layout,
        );
        self.lines_view.show(ctx, container, self.lines.segments());

        if self.workspace.revision() != self.saved_revision {
            self.save_state();
        }
    }
}

impl Drop for SchemaMapperApp {
    fn drop(&mut self) {
        self.lines.unmount();
        tracing::debug!(
            "Connection lines unmounted ({} layout subscribers left)",
            self.layout_events.subscriber_count()
        );
    }
}
