use crate::ids::IdGenerator;
use crate::models::{DatabaseConfig, DatabaseSystem, Side, TableInfo};
use crate::store::StoreError;

/// The two database sets being mapped. Databases own their tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    legacy: DatabaseSystem,
    modern: DatabaseSystem,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_systems(legacy: DatabaseSystem, modern: DatabaseSystem) -> Self {
        Self { legacy, modern }
    }

    pub fn system(&self, side: Side) -> &DatabaseSystem {
        match side {
            Side::Legacy => &self.legacy,
            Side::Modern => &self.modern,
        }
    }

    fn system_mut(&mut self, side: Side) -> &mut DatabaseSystem {
        match side {
            Side::Legacy => &mut self.legacy,
            Side::Modern => &mut self.modern,
        }
    }

    pub fn group(&self, group_id: &str) -> Option<&DatabaseConfig> {
        Side::all()
            .into_iter()
            .find_map(|side| self.system(side).database(group_id))
    }

    fn group_mut(&mut self, group_id: &str) -> Option<&mut DatabaseConfig> {
        let side = self.side_of_group(group_id)?;
        self.system_mut(side).database_mut(group_id)
    }

    pub fn side_of_group(&self, group_id: &str) -> Option<Side> {
        Side::all()
            .into_iter()
            .find(|side| self.system(*side).database(group_id).is_some())
    }

    pub fn table(&self, table_id: &str) -> Option<&TableInfo> {
        Side::all()
            .into_iter()
            .flat_map(|side| self.system(side).tables())
            .find(|t| t.id == table_id)
    }

    pub fn side_of_table(&self, table_id: &str) -> Option<Side> {
        Side::all()
            .into_iter()
            .find(|side| self.system(*side).tables().any(|t| t.id == table_id))
    }

    fn table_mut(&mut self, table_id: &str) -> Option<&mut TableInfo> {
        self.legacy
            .databases
            .iter_mut()
            .chain(self.modern.databases.iter_mut())
            .find_map(|db| db.table_mut(table_id))
    }

    pub fn add_group(&mut self, side: Side, ids: &mut dyn IdGenerator) -> String {
        let system = self.system_mut(side);
        let id = ids.next_id(&format!("{}-db", side));
        system.databases.push(DatabaseConfig {
            id: id.clone(),
            name: format!("{}_database_{}", side, system.databases.len() + 1),
            schema: String::new(),
            tables: vec![],
        });
        id
    }

    pub fn rename_group(&mut self, group_id: &str, name: &str) -> Result<(), StoreError> {
        let group = self
            .group_mut(group_id)
            .ok_or_else(|| StoreError::UnknownDatabase(group_id.to_string()))?;
        group.name = name.to_string();
        Ok(())
    }

    pub fn set_group_schema(&mut self, group_id: &str, schema: &str) -> Result<(), StoreError> {
        let group = self
            .group_mut(group_id)
            .ok_or_else(|| StoreError::UnknownDatabase(group_id.to_string()))?;
        group.schema = schema.to_string();
        Ok(())
    }

    /// Removes the database and returns the ids of the tables it owned.
    pub fn delete_group(&mut self, group_id: &str) -> Result<Vec<String>, StoreError> {
        let side = self
            .side_of_group(group_id)
            .ok_or_else(|| StoreError::UnknownDatabase(group_id.to_string()))?;
        let system = self.system_mut(side);

        let index = system
            .databases
            .iter()
            .position(|db| db.id == group_id)
            .ok_or_else(|| StoreError::UnknownDatabase(group_id.to_string()))?;
        let removed = system.databases.remove(index);

        Ok(removed.tables.into_iter().map(|t| t.id).collect())
    }

    pub fn add_table(&mut self, group_id: &str, ids: &mut dyn IdGenerator) -> Result<String, StoreError> {
        let group = self
            .group_mut(group_id)
            .ok_or_else(|| StoreError::UnknownDatabase(group_id.to_string()))?;

        let id = ids.next_id(&format!("{}-table", group.id));
        group.tables.push(TableInfo {
            id: id.clone(),
            name: format!("table_{}", group.tables.len() + 1),
            database_id: group.id.clone(),
            columns: Some(vec![]),
        });
        Ok(id)
    }

    pub fn rename_table(&mut self, table_id: &str, name: &str) -> Result<(), StoreError> {
        let table = self
            .table_mut(table_id)
            .ok_or_else(|| StoreError::UnknownTable(table_id.to_string()))?;
        table.name = name.to_string();
        Ok(())
    }

    pub fn delete_table(&mut self, table_id: &str) -> Result<(), StoreError> {
        for db in self
            .legacy
            .databases
            .iter_mut()
            .chain(self.modern.databases.iter_mut())
        {
            if let Some(index) = db.tables.iter().position(|t| t.id == table_id) {
                db.tables.remove(index);
                return Ok(());
            }
        }
        Err(StoreError::UnknownTable(table_id.to_string()))
    }
}
