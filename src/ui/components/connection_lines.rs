use crate::geometry::LineSegment;
use crate::ui::styles;
use eframe::egui;
use egui::{Pos2, Rect, Shape, Stroke};

const STROKE_WIDTH: f32 = 3.0;
const DASH: f32 = 8.0;
const GAP: f32 = 4.0;
const ARROW_LENGTH: f32 = 10.0;
const ARROW_HALF_WIDTH: f32 = 3.5;

/// Paints connection segments as dashed arrows on a foreground layer above both panels.
pub struct ConnectionLinesView;

impl ConnectionLinesView {
    pub fn new() -> Self {
        Self
    }

    /// `container` is the rect the segment coordinates are relative to.
    pub fn show(&mut self, ctx: &egui::Context, container: Rect, segments: &[LineSegment]) {
        let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("connection_lines"));
        let painter = ctx.layer_painter(layer).with_clip_rect(container);
        let stroke = Stroke::new(STROKE_WIDTH, styles::LINE_COLOR);

        for segment in segments {
            let start = container.min + segment.start.to_vec2();
            let end = container.min + segment.end.to_vec2();

            painter.extend(Shape::dashed_line(&[start, end], stroke, DASH, GAP));
            if let Some(head) = arrow_head(start, end) {
                painter.add(Shape::convex_polygon(head.to_vec(), styles::LINE_COLOR, Stroke::NONE));
            }
        }
    }
}

/// Triangle pointing at `end`, or `None` for a zero-length segment.
fn arrow_head(start: Pos2, end: Pos2) -> Option<[Pos2; 3]> {
    let delta = end - start;
    if delta.length() < f32::EPSILON {
        return None;
    }

    let dir = delta.normalized();
    let normal = egui::vec2(-dir.y, dir.x);
    let back = end - dir * ARROW_LENGTH;
    Some([end, back + normal * ARROW_HALF_WIDTH, back - normal * ARROW_HALF_WIDTH])
}
