use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub id: String,
    pub name: String,
    pub database_id: String,
    // Not interpreted by the editor, kept so hand-edited files survive a save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
}

impl DatabaseConfig {
    pub fn table_mut(&mut self, table_id: &str) -> Option<&mut TableInfo> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }
}

/// All databases on one side of the mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSystem {
    #[serde(default)]
    pub databases: Vec<DatabaseConfig>,
}

impl DatabaseSystem {
    pub fn database(&self, database_id: &str) -> Option<&DatabaseConfig> {
        self.databases.iter().find(|db| db.id == database_id)
    }

    pub fn database_mut(&mut self, database_id: &str) -> Option<&mut DatabaseConfig> {
        self.databases.iter_mut().find(|db| db.id == database_id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableInfo> {
        self.databases.iter().flat_map(|db| db.tables.iter())
    }
}
