use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    key::Key,
    serialize::{SerializeError, deserialize_bounded},
    traits::EntityKind,
};
use derive_more::{Deref, DerefMut};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// DataKey
///
/// Fully-qualified row address: entity path plus primary key.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct DataKey {
    entity_path: &'static str,
    key: Key,
}

impl DataKey {
    #[must_use]
    pub const fn new(entity_path: &'static str, key: Key) -> Self {
        Self { entity_path, key }
    }

    #[must_use]
    pub const fn entity_path(&self) -> &'static str {
        self.entity_path
    }

    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_path, self.key)
    }
}

///
/// RawRowError
///

#[derive(Debug, ThisError)]
pub enum RawRowError {
    #[error("row exceeds max size: {len} bytes (limit {max_bytes})")]
    TooLarge { len: usize, max_bytes: u32 },
}

impl From<RawRowError> for InternalError {
    fn from(err: RawRowError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Store, err.to_string())
    }
}

///
/// RawRow
/// Encoded entity bytes, bounded by the configured row limit.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawRow(Vec<u8>);

impl RawRow {
    pub fn try_new(bytes: Vec<u8>, max_bytes: u32) -> Result<Self, RawRowError> {
        if bytes.len() > max_bytes as usize {
            return Err(RawRowError::TooLarge {
                len: bytes.len(),
                max_bytes,
            });
        }

        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn try_decode<E: EntityKind>(&self) -> Result<E, SerializeError> {
        deserialize_bounded::<E>(&self.0, self.0.len())
    }
}

///
/// EntityRef
///
/// Outgoing strong reference held by a stored row.
/// Kept alongside the row so deletes can unwind the reverse index
/// without decoding the row.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct EntityRef {
    pub field_name: &'static str,
    pub target: DataKey,
}

///
/// StoredRow
///

#[derive(Clone, Debug)]
pub struct StoredRow {
    pub raw: RawRow,
    pub refs: Vec<EntityRef>,
}

///
/// EntityRows
/// Rows of one entity, ordered by primary key.
///

#[derive(Debug, Default, Deref, DerefMut)]
pub struct EntityRows(BTreeMap<Key, StoredRow>);

impl EntityRows {
    /// Sum of encoded bytes across all rows.
    #[must_use]
    pub fn memory_bytes(&self) -> u64 {
        self.values().map(|row| row.raw.len() as u64).sum()
    }
}

///
/// DataStore
///
/// In-memory row store keyed by entity path.
///

#[derive(Debug, Default)]
pub struct DataStore {
    entities: BTreeMap<&'static str, EntityRows>,
}

impl DataStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of one entity, if any were ever written.
    #[must_use]
    pub fn rows(&self, entity_path: &str) -> Option<&EntityRows> {
        self.entities.get(entity_path)
    }

    /// Rows of one entity, creating the bucket on first write.
    pub fn rows_mut(&mut self, entity_path: &'static str) -> &mut EntityRows {
        self.entities.entry(entity_path).or_default()
    }

    #[must_use]
    pub fn get(&self, data_key: &DataKey) -> Option<&StoredRow> {
        self.rows(data_key.entity_path())
            .and_then(|rows| rows.get(data_key.key()))
    }

    #[must_use]
    pub fn contains(&self, data_key: &DataKey) -> bool {
        self.get(data_key).is_some()
    }

    /// Insert or overwrite a row, returning the previous one.
    pub fn put(&mut self, data_key: DataKey, row: StoredRow) -> Option<StoredRow> {
        let DataKey { entity_path, key } = data_key;

        self.rows_mut(entity_path).insert(key, row)
    }

    pub fn remove(&mut self, data_key: &DataKey) -> Option<StoredRow> {
        self.entities
            .get_mut(data_key.entity_path())
            .and_then(|rows| rows.remove(data_key.key()))
    }
}

///
/// TESTS
///
