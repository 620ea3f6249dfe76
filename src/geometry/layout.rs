use crate::geometry::{LayoutEvent, LayoutEventHub};
use egui::Rect;
use std::collections::BTreeMap;

/// Where things are on screen right now.
pub trait LayoutSource {
    fn container_rect(&self) -> Option<Rect>;
    /// `None` when the table is not currently rendered (collapsed, scrolled away, deleted).
    fn element_rect(&self, table_id: &str) -> Option<Rect>;
}

/// Rects collected while drawing one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameLayout {
    container: Option<Rect>,
    elements: BTreeMap<String, Rect>,
}

impl FrameLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_container(&mut self, rect: Rect) {
        self.container = Some(rect);
    }

    pub fn record(&mut self, table_id: &str, rect: Rect) {
        self.elements.insert(table_id.to_string(), rect);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl LayoutSource for FrameLayout {
    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn element_rect(&self, table_id: &str) -> Option<Rect> {
        self.elements.get(table_id).copied()
    }
}

/// Diffs consecutive frames and publishes the resulting layout events.
pub struct LayoutTracker {
    hub: LayoutEventHub,
    previous: FrameLayout,
}

impl LayoutTracker {
    pub fn new(hub: LayoutEventHub) -> Self {
        Self {
            hub,
            previous: FrameLayout::new(),
        }
    }

    pub fn observe(&mut self, current: &FrameLayout) -> usize {
        let mut published = 0;

        let old_size = self.previous.container.map(|r| r.size());
        let new_size = current.container.map(|r| r.size());
        if old_size != new_size {
            self.hub.publish(LayoutEvent::Resized);
            published += 1;
        }

        if self.previous.elements != current.elements {
            self.hub.publish(LayoutEvent::SubtreeMutated);
            published += 1;
        }

        if published > 0 {
            tracing::trace!("Layout changed ({} tables rendered)", current.len());
            self.previous = current.clone();
        }
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn frame(width: f32, tables: &[(&str, Rect)]) -> FrameLayout {
        let mut layout = FrameLayout::new();
        layout.set_container(Rect::from_min_max(pos2(0.0, 0.0), pos2(width, 600.0)));
        for (id, rect) in tables {
            layout.record(id, *rect);
        }
        layout
    }

    #[test]
    fn test_first_frame_reports_everything() {
        let hub = LayoutEventHub::new();
        let subscription = hub.subscribe();
        let mut tracker = LayoutTracker::new(hub.clone());
        let rect = Rect::from_min_size(pos2(10.0, 10.0), egui::vec2(100.0, 20.0));

        tracker.observe(&frame(800.0, &[("t1", rect)]));

        assert_eq!(
            subscription.take_events(),
            vec![LayoutEvent::Resized, LayoutEvent::SubtreeMutated]
        );
    }

    #[test]
    fn test_unchanged_frame_is_silent() {
        let hub = LayoutEventHub::new();
        let subscription = hub.subscribe();
        let mut tracker = LayoutTracker::new(hub.clone());
        let rect = Rect::from_min_size(pos2(10.0, 10.0), egui::vec2(100.0, 20.0));

        tracker.observe(&frame(800.0, &[("t1", rect)]));
        subscription.take_events();

        assert_eq!(tracker.observe(&frame(800.0, &[("t1", rect)])), 0);
        assert!(subscription.take_events().is_empty());
    }

    #[test]
    fn test_hidden_table_is_a_subtree_mutation() {
        let hub = LayoutEventHub::new();
        let subscription = hub.subscribe();
        let mut tracker = LayoutTracker::new(hub.clone());
        let rect = Rect::from_min_size(pos2(10.0, 10.0), egui::vec2(100.0, 20.0));

        tracker.observe(&frame(800.0, &[("t1", rect)]));
        subscription.take_events();
        tracker.observe(&frame(800.0, &[]));

        assert_eq!(subscription.take_events(), vec![LayoutEvent::SubtreeMutated]);
    }

    #[test]
    fn test_container_resize_is_reported() {
        let hub = LayoutEventHub::new();
        let subscription = hub.subscribe();
        let mut tracker = LayoutTracker::new(hub.clone());

        tracker.observe(&frame(800.0, &[]));
        subscription.take_events();
        tracker.observe(&frame(640.0, &[]));

        assert_eq!(subscription.take_events(), vec![LayoutEvent::Resized]);
    }

    #[test]
    fn test_frame_layout_resolves_recorded_tables_only() {
        let rect = Rect::from_min_size(pos2(1.0, 2.0), egui::vec2(3.0, 4.0));
        let layout = frame(100.0, &[("t1", rect)]);

        assert_eq!(layout.element_rect("t1"), Some(rect));
        assert_eq!(layout.element_rect("t2"), None);
        assert!(layout.container_rect().is_some());
    }
}
