mod connection_lines;
mod database_card;
mod database_system;
mod menu_bar;
mod status_bar;

pub use connection_lines::ConnectionLinesView;
pub use database_card::{CardView, DatabaseCard, MappingEvent};
pub use database_system::DatabaseSystemPanel;
pub use menu_bar::{MenuBar, MenuBarEvent};
pub use status_bar::{StatusBar, StatusCounts};
