use crate::models::Side;
use crate::store::{StoreError, Workspace};

/// The table picked as the first end of a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    pub table_id: String,
    pub side: Side,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Idle,
    Pending(PendingConnection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Started,
    Cancelled,
    Linked(String),
    Rejected(StoreError),
}

/// Turns "pick a table, then pick a table on the other side" into links.
#[derive(Debug, Default)]
pub struct ConnectionController {
    state: ConnectionState,
}

impl ConnectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingConnection> {
        match &self.state {
            ConnectionState::Idle => None,
            ConnectionState::Pending(pending) => Some(pending),
        }
    }

    pub fn is_connecting(&self) -> bool {
        self.pending().is_some()
    }

    pub fn is_source(&self, table_id: &str) -> bool {
        self.pending().is_some_and(|p| p.table_id == table_id)
    }

    /// True when a connection is pending from the other side, i.e. tables
    /// on `side` are valid targets.
    pub fn is_target_side(&self, side: Side) -> bool {
        self.pending().is_some_and(|p| p.side != side)
    }

    pub fn select(&mut self, table_id: &str, side: Side, workspace: &mut Workspace) -> SelectOutcome {
        match std::mem::take(&mut self.state) {
            ConnectionState::Idle => {
                self.state = ConnectionState::Pending(PendingConnection {
                    table_id: table_id.to_string(),
                    side,
                });
                SelectOutcome::Started
            }
            ConnectionState::Pending(pending) if pending.side == side => SelectOutcome::Cancelled,
            ConnectionState::Pending(pending) => {
                let (legacy, modern) = match pending.side {
                    Side::Legacy => (pending.table_id.as_str(), table_id),
                    Side::Modern => (table_id, pending.table_id.as_str()),
                };
                match workspace.connect(legacy, modern) {
                    Ok(id) => SelectOutcome::Linked(id),
                    Err(e) => {
                        tracing::warn!("Connection rejected: {}", e);
                        SelectOutcome::Rejected(e)
                    }
                }
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = ConnectionState::Idle;
    }

    /// Drops the pending selection if it points at a table that no longer exists.
    pub fn forget_table(&mut self, table_id: &str) {
        if self.is_source(table_id) {
            self.cancel();
        }
    }
}
