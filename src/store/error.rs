use crate::models::Side;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown database: {0}")]
    UnknownDatabase(String),
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Tables {0} and {1} are on the same side")]
    SameSide(String, String),
    #[error("Table {table} is not on the {expected} side")]
    WrongSide { table: String, expected: Side },
}
