use crate::geometry::{LayoutEventHub, LayoutSource, Subscription};
use crate::models::TableConnection;
use egui::{pos2, Pos2};

/// How far line ends sit inside the table rows they attach to.
pub const DEFAULT_EDGE_INSET: f32 = 8.0;

/// Screen-space geometry for one connection, relative to the container's top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub connection_id: String,
    pub start: Pos2,
    pub end: Pos2,
}

/// Lays out one segment per connection whose endpoints are both on screen.
///
/// Segments run from the vertical middle of the legacy table's right edge to
/// the vertical middle of the modern table's left edge and keep the order of
/// `links`. Connections with an endpoint that isn't rendered are skipped, and
/// without a container nothing is drawn at all.
pub fn recompute(links: &[TableConnection], layout: &dyn LayoutSource, inset: f32) -> Vec<LineSegment> {
    let Some(container) = layout.container_rect() else {
        return Vec::new();
    };

    links
        .iter()
        .filter_map(|conn| {
            let a = layout.element_rect(&conn.a_table_id)?;
            let b = layout.element_rect(&conn.b_table_id)?;

            Some(LineSegment {
                connection_id: conn.id.clone(),
                start: pos2(
                    a.right() - container.left() - inset,
                    a.center().y - container.top(),
                ),
                end: pos2(
                    b.left() - container.left() + inset,
                    b.center().y - container.top(),
                ),
            })
        })
        .collect()
}

/// Keeps the connection segments in step with the links and the live layout.
///
/// While mounted it holds a [`Subscription`] to layout events; `update`
/// recomputes when the links revision moved or any event arrived since the
/// previous call (a burst of events costs one recompute).
pub struct ConnectionLines {
    inset: f32,
    segments: Vec<LineSegment>,
    subscription: Option<Subscription>,
    links_revision: Option<u64>,
}

impl ConnectionLines {
    pub fn new(inset: f32) -> Self {
        Self {
            inset,
            segments: Vec::new(),
            subscription: None,
            links_revision: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn mount(
        &mut self,
        hub: &LayoutEventHub,
        links: &[TableConnection],
        links_revision: u64,
        layout: &dyn LayoutSource,
    ) {
        self.refresh(links, links_revision, layout);
        self.subscription = Some(hub.subscribe());
    }

    /// Returns true if the segments were recomputed.
    pub fn update(&mut self, links: &[TableConnection], links_revision: u64, layout: &dyn LayoutSource) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };

        let events = subscription.take_events();
        if events.is_empty() && self.links_revision == Some(links_revision) {
            return false;
        }

        self.refresh(links, links_revision, layout);
        true
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
        self.links_revision = None;
        self.segments.clear();
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    fn refresh(&mut self, links: &[TableConnection], links_revision: u64, layout: &dyn LayoutSource) {
        self.segments = recompute(links, layout, self.inset);
        self.links_revision = Some(links_revision);
        tracing::trace!(
            "Recomputed {} of {} connection lines",
            self.segments.len(),
            links.len()
        );
    }
}
