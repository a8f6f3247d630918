use crate::db::{registry::SchemaRegistry, store::DataStore};
use serde::Serialize;

///
/// StorageReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StorageReport {
    pub entities: Vec<EntityStorageReport>,
}

impl StorageReport {
    pub(crate) fn build(registry: &SchemaRegistry, store: &DataStore) -> Self {
        let entities = registry
            .iter()
            .map(|model| {
                let rows = store.rows(model.path);

                EntityStorageReport {
                    path: model.path,
                    entity_name: model.entity_name,
                    rows: rows.map_or(0, |rows| rows.len() as u64),
                    bytes: rows.map_or(0, |rows| rows.memory_bytes()),
                }
            })
            .collect();

        Self { entities }
    }

    #[must_use]
    pub fn entity(&self, path: &str) -> Option<&EntityStorageReport> {
        self.entities.iter().find(|entity| entity.path == path)
    }
}

///
/// EntityStorageReport
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityStorageReport {
    pub path: &'static str,
    pub entity_name: &'static str,
    pub rows: u64,
    pub bytes: u64,
}
