use crate::models::Side;
use eframe::egui;
use egui::Color32;

pub const LINE_COLOR: Color32 = Color32::from_rgb(16, 185, 129);
pub const SOURCE_FILL: Color32 = Color32::from_rgb(254, 243, 199);
pub const SOURCE_STROKE: Color32 = Color32::from_rgb(252, 211, 77);
pub const TARGET_FILL: Color32 = Color32::from_rgb(243, 244, 246);
pub const TARGET_STROKE: Color32 = Color32::from_rgb(156, 163, 175);
pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);

/// Setup fonts: proportional body text, monospace for table names
pub fn setup_styles(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(13.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(13.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(18.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::new(10.0, egui::FontFamily::Proportional)
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(12.0, egui::FontFamily::Monospace)
    );

    ctx.set_style(style);
}

pub fn side_accent(side: Side) -> Color32 {
    match side {
        Side::Legacy => Color32::from_rgb(37, 99, 235),
        Side::Modern => Color32::from_rgb(22, 163, 74),
    }
}

/// Background for a side's header and its connected tables.
pub fn side_tint(side: Side) -> Color32 {
    match side {
        Side::Legacy => Color32::from_rgb(219, 234, 254),
        Side::Modern => Color32::from_rgb(220, 252, 231),
    }
}
