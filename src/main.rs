mod app;
mod config;
mod geometry;
mod ids;
mod interaction;
mod models;
mod persistence;
mod store;
mod ui;

use app::SchemaMapperApp;
use config::Config;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => {
            // Write the file back so the available settings are discoverable
            if let Err(e) = config.save() {
                tracing::warn!("Could not write settings: {}", e);
            }
            config
        }
        Err(e) => {
            tracing::warn!("Using default settings: {}", e);
            Config::new()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Database Schema Mapping Tool"),
        ..Default::default()
    };

    eframe::run_native(
        "Schema Mapper",
        options,
        Box::new(|cc| Box::new(SchemaMapperApp::new(cc, config))),
    )
}
