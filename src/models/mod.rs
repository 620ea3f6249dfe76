mod connection;
mod database;
mod side;

pub use connection::TableConnection;
pub use database::{DatabaseConfig, DatabaseSystem, TableInfo};
pub use side::Side;
