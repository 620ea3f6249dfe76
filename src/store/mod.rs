mod entities;
mod error;
mod links;
mod workspace;

pub use entities::EntityStore;
pub use error::StoreError;
pub use links::LinkStore;
pub use workspace::Workspace;
