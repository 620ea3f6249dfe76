use anyhow::Result;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::ids::IdGenerator;
use crate::models::{DatabaseSystem, Side, TableConnection};
use crate::store::Workspace;

pub const LEGACY_KEY: &str = "legacySystem";
pub const MODERN_KEY: &str = "modernSystem";
pub const CONNECTIONS_KEY: &str = "connections";

/// Byte storage addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".config").join("schema-mapper").join("data"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if path.exists() {
            Ok(Some(fs::read(&path)?))
        } else {
            Ok(None)
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Everything that gets persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub legacy: DatabaseSystem,
    pub modern: DatabaseSystem,
    pub connections: Vec<TableConnection>,
}

impl Snapshot {
    pub fn capture(workspace: &Workspace) -> Self {
        Self {
            legacy: workspace.system(Side::Legacy).clone(),
            modern: workspace.system(Side::Modern).clone(),
            connections: workspace.connections().to_vec(),
        }
    }

    pub fn into_workspace(self, ids: Box<dyn IdGenerator>) -> Workspace {
        Workspace::restore(self.legacy, self.modern, self.connections, ids)
    }
}

/// Reads one section. Anything unreadable or malformed is logged and treated as absent.
fn load_section<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("Could not read {}: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", key, e);
            T::default()
        }
    }
}

pub fn load(store: &dyn KeyValueStore) -> Snapshot {
    let snapshot = Snapshot {
        legacy: load_section(store, LEGACY_KEY),
        modern: load_section(store, MODERN_KEY),
        connections: load_section(store, CONNECTIONS_KEY),
    };
    tracing::info!(
        "Loaded {} legacy and {} modern databases, {} connections",
        snapshot.legacy.databases.len(),
        snapshot.modern.databases.len(),
        snapshot.connections.len()
    );
    snapshot
}

pub fn save(store: &mut dyn KeyValueStore, snapshot: &Snapshot) -> Result<()> {
    store.set(LEGACY_KEY, &serde_json::to_vec_pretty(&snapshot.legacy)?)?;
    store.set(MODERN_KEY, &serde_json::to_vec_pretty(&snapshot.modern)?)?;
    store.set(CONNECTIONS_KEY, &serde_json::to_vec_pretty(&snapshot.connections)?)?;
    Ok(())
}
