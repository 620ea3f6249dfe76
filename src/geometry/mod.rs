mod engine;
mod events;
mod layout;

pub use engine::{recompute, ConnectionLines, LineSegment, DEFAULT_EDGE_INSET};
pub use events::{LayoutEvent, LayoutEventHub, Subscription};
pub use layout::{FrameLayout, LayoutSource, LayoutTracker};
