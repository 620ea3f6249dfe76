use crate::ids::IdGenerator;
use crate::models::{DatabaseSystem, Side, TableConnection};
use crate::store::{EntityStore, LinkStore, StoreError};

/// Session-wide state: both database sets plus the links between them.
///
/// Every mutation goes through here so that table and database deletes
/// cascade into the link store. `revision` moves on every successful
/// mutation, `links_revision` only when the set of links changes.
pub struct Workspace {
    entities: EntityStore,
    links: LinkStore,
    ids: Box<dyn IdGenerator>,
    revision: u64,
    links_revision: u64,
}

impl Workspace {
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            entities: EntityStore::new(),
            links: LinkStore::new(),
            ids,
            revision: 0,
            links_revision: 0,
        }
    }

    /// Rebuilds a workspace from stored data. Links are replayed through
    /// `create_link`, so dangling or conflicting ones are dropped.
    pub fn restore(
        legacy: DatabaseSystem,
        modern: DatabaseSystem,
        connections: Vec<TableConnection>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let mut workspace = Self {
            entities: EntityStore::from_systems(legacy, modern),
            ..Self::new(ids)
        };

        let total = connections.len();
        for conn in connections {
            if let Err(e) = workspace.links.create_link(
                &conn.a_table_id,
                &conn.b_table_id,
                &workspace.entities,
                conn.id.clone(),
            ) {
                tracing::warn!("Dropping stored connection {}: {}", conn.id, e);
            }
        }

        if workspace.links.len() < total {
            tracing::warn!(
                "Restored {} of {} stored connections",
                workspace.links.len(),
                total
            );
        }
        workspace
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn links(&self) -> &LinkStore {
        &self.links
    }

    pub fn system(&self, side: Side) -> &DatabaseSystem {
        self.entities.system(side)
    }

    pub fn connections(&self) -> &[TableConnection] {
        self.links.as_slice()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn links_revision(&self) -> u64 {
        self.links_revision
    }

    fn touch(&mut self, links_changed: bool) {
        self.revision += 1;
        if links_changed {
            self.links_revision += 1;
        }
    }

    pub fn add_database(&mut self, side: Side) -> String {
        let id = self.entities.add_group(side, self.ids.as_mut());
        tracing::debug!("Added database {} on {} side", id, side);
        self.touch(false);
        id
    }

    pub fn rename_database(&mut self, database_id: &str, name: &str) -> Result<(), StoreError> {
        self.entities.rename_group(database_id, name)?;
        self.touch(false);
        Ok(())
    }

    pub fn set_database_schema(&mut self, database_id: &str, schema: &str) -> Result<(), StoreError> {
        self.entities.set_group_schema(database_id, schema)?;
        self.touch(false);
        Ok(())
    }

    /// Deletes a database, its tables and every link touching those tables.
    /// Returns the ids of the removed tables.
    pub fn delete_database(&mut self, database_id: &str) -> Result<Vec<String>, StoreError> {
        let tables = self.entities.delete_group(database_id)?;
        let dropped: usize = tables
            .iter()
            .map(|t| self.links.remove_links_referencing(t))
            .sum();

        tracing::debug!(
            "Deleted database {} ({} tables, {} connections)",
            database_id,
            tables.len(),
            dropped
        );
        self.touch(dropped > 0);
        Ok(tables)
    }

    pub fn add_table(&mut self, database_id: &str) -> Result<String, StoreError> {
        let id = self.entities.add_table(database_id, self.ids.as_mut())?;
        tracing::debug!("Added table {} to {}", id, database_id);
        self.touch(false);
        Ok(id)
    }

    pub fn rename_table(&mut self, table_id: &str, name: &str) -> Result<(), StoreError> {
        self.entities.rename_table(table_id, name)?;
        self.touch(false);
        Ok(())
    }

    pub fn delete_table(&mut self, table_id: &str) -> Result<(), StoreError> {
        self.entities.delete_table(table_id)?;
        let dropped = self.links.remove_links_referencing(table_id);
        tracing::debug!("Deleted table {} ({} connections)", table_id, dropped);
        self.touch(dropped > 0);
        Ok(())
    }

    /// Links a legacy table to a modern table. Returns the new connection id.
    pub fn connect(&mut self, a_table_id: &str, b_table_id: &str) -> Result<String, StoreError> {
        let id = self.ids.next_id("connection");
        self.links
            .create_link(a_table_id, b_table_id, &self.entities, id.clone())?;
        tracing::debug!("Connected {} -> {} as {}", a_table_id, b_table_id, id);
        self.touch(true);
        Ok(id)
    }

    pub fn disconnect(&mut self, table_id: &str) -> bool {
        let removed = self.links.remove_link(table_id);
        if removed {
            tracing::debug!("Disconnected {}", table_id);
            self.touch(true);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn workspace() -> Workspace {
        Workspace::new(Box::new(SequentialIds::default()))
    }

    #[test]
    fn test_orders_scenario() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        let modern = ws.add_database(Side::Modern);
        let t1 = ws.add_table(&legacy).unwrap();
        ws.rename_table(&t1, "orders").unwrap();
        let t2 = ws.add_table(&modern).unwrap();
        ws.rename_table(&t2, "orders_v2").unwrap();

        ws.connect(&t1, &t2).unwrap();
        assert_eq!(ws.connections().len(), 1);
        assert_eq!(ws.connections()[0].a_table_id, t1);
        assert_eq!(ws.connections()[0].b_table_id, t2);

        let t3 = ws.add_table(&modern).unwrap();
        ws.connect(&t1, &t3).unwrap();
        assert_eq!(ws.connections().len(), 1);
        assert_eq!(ws.connections()[0].a_table_id, t1);
        assert_eq!(ws.connections()[0].b_table_id, t3);
    }

    #[test]
    fn test_delete_table_cascades_and_is_idempotent() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        let modern = ws.add_database(Side::Modern);
        let a = ws.add_table(&legacy).unwrap();
        let b = ws.add_table(&modern).unwrap();
        ws.connect(&a, &b).unwrap();
        let links_before = ws.links_revision();

        ws.delete_table(&b).unwrap();
        assert!(ws.connections().is_empty());
        assert!(ws.links_revision() > links_before);

        let revision = ws.revision();
        assert_eq!(ws.delete_table(&b), Err(StoreError::UnknownTable(b.clone())));
        assert_eq!(ws.revision(), revision);
        assert!(ws.entities().table(&a).is_some());
    }

    #[test]
    fn test_delete_database_cascades_to_links() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        let other_legacy = ws.add_database(Side::Legacy);
        let modern = ws.add_database(Side::Modern);
        let a1 = ws.add_table(&legacy).unwrap();
        let a2 = ws.add_table(&legacy).unwrap();
        let a3 = ws.add_table(&other_legacy).unwrap();
        let b1 = ws.add_table(&modern).unwrap();
        let b2 = ws.add_table(&modern).unwrap();
        let b3 = ws.add_table(&modern).unwrap();
        ws.connect(&a1, &b1).unwrap();
        ws.connect(&a2, &b2).unwrap();
        ws.connect(&a3, &b3).unwrap();

        let removed = ws.delete_database(&legacy).unwrap();

        assert_eq!(removed, vec![a1.clone(), a2.clone()]);
        assert!(ws.entities().table(&a1).is_none());
        assert_eq!(ws.connections().len(), 1);
        assert_eq!(ws.connections()[0].a_table_id, a3);
        assert!(!ws.links().is_connected(&b1));
        assert!(!ws.links().is_connected(&b2));
    }

    #[test]
    fn test_rejected_link_does_not_bump_revision() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        let a = ws.add_table(&legacy).unwrap();
        let b = ws.add_table(&legacy).unwrap();
        let revision = ws.revision();

        assert!(ws.connect(&a, &b).is_err());
        assert_eq!(ws.revision(), revision);
        assert_eq!(ws.links_revision(), 0);
    }

    #[test]
    fn test_renames_do_not_touch_links_revision() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        ws.rename_database(&legacy, "crm").unwrap();
        ws.set_database_schema(&legacy, "sales").unwrap();

        assert_eq!(ws.revision(), 3);
        assert_eq!(ws.links_revision(), 0);
        assert_eq!(ws.system(Side::Legacy).databases[0].name, "crm");
    }

    #[test]
    fn test_restore_keeps_ids_and_drops_dangling_links() {
        let mut ws = workspace();
        let legacy = ws.add_database(Side::Legacy);
        let modern = ws.add_database(Side::Modern);
        let a = ws.add_table(&legacy).unwrap();
        let b = ws.add_table(&modern).unwrap();

        let connections = vec![
            TableConnection {
                id: "connection-kept".to_string(),
                a_table_id: a.clone(),
                b_table_id: b.clone(),
            },
            TableConnection {
                id: "connection-dangling".to_string(),
                a_table_id: a.clone(),
                b_table_id: "missing".to_string(),
            },
        ];

        let restored = Workspace::restore(
            ws.system(Side::Legacy).clone(),
            ws.system(Side::Modern).clone(),
            connections,
            Box::new(SequentialIds::default()),
        );

        assert_eq!(restored.connections().len(), 1);
        assert_eq!(restored.connections()[0].id, "connection-kept");
        assert_eq!(restored.system(Side::Legacy), ws.system(Side::Legacy));
    }
}
