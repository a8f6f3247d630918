//! Embedded persistence engine.
//!
//! `Db` owns the schema registry, the row store, and the reverse relation
//! index behind one lock. Every write holds the write lock for its whole
//! check-then-commit window, so primary-key uniqueness and strong-relation
//! checks cannot race.

mod executor;
mod registry;
mod relation;
mod report;
mod store;


pub use registry::SchemaRegistry;
pub use relation::ReverseIndex;
pub use report::{EntityStorageReport, StorageReport};
pub use store::{DataKey, DataStore, EntityRef, EntityRows, RawRow, RawRowError, StoredRow};

use crate::{
    config::DbConfig,
    error::{ErrorClass, ErrorOrigin, InternalError},
    key::Key,
    traits::{EntityKind, FieldValue},
    types::Ref,
};
use executor::{DeleteExecutor, LoadExecutor, SaveExecutor};
use parking_lot::RwLock;

/// `tracing` target for engine events.
pub(crate) const LOG_TARGET: &str = "kennel::db";

///
/// DbState
/// Everything guarded by the engine lock.
///

#[derive(Debug, Default)]
pub(crate) struct DbState {
    pub(crate) registry: SchemaRegistry,
    pub(crate) store: DataStore,
    pub(crate) reverse: ReverseIndex,
}

///
/// Db
///
/// Explicit store handle. Entities stay plain values; all persistence
/// behavior is reached through this type.
///

#[derive(Debug, Default)]
pub struct Db {
    config: DbConfig,
    state: RwLock<DbState>,
}

impl Db {
    /// Build an empty engine from a validated configuration.
    pub fn new(config: DbConfig) -> Result<Self, InternalError> {
        config.validate()?;

        Ok(Self {
            config,
            state: RwLock::new(DbState::default()),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DbConfig {
        &self.config
    }

    // ======================================================================
    // Schema
    // ======================================================================

    /// Register an entity's declared model.
    pub fn register<E: EntityKind>(&self) -> Result<(), InternalError> {
        self.state.write().registry.register(E::MODEL)?;
        tracing::debug!(target: LOG_TARGET, entity = E::PATH, "entity registered");

        Ok(())
    }

    #[must_use]
    pub fn is_registered<E: EntityKind>(&self) -> bool {
        self.state.read().registry.is_registered(E::PATH)
    }

    // ======================================================================
    // Writes
    // ======================================================================

    /// Insert a new row; fails if the primary key is already stored.
    pub fn insert<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        SaveExecutor::<E>::new(self).insert(entity)
    }

    /// Overwrite an existing row; fails if the primary key is not stored.
    pub fn update<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        SaveExecutor::<E>::new(self).update(entity)
    }

    /// Insert or overwrite.
    pub fn replace<E: EntityKind>(&self, entity: E) -> Result<E, InternalError> {
        SaveExecutor::<E>::new(self).replace(entity)
    }

    /// Delete by primary key. Returns whether a row was removed.
    pub fn delete<E: EntityKind>(&self, key: &E::Key) -> Result<bool, InternalError> {
        DeleteExecutor::<E>::new(self).delete(key)
    }

    // ======================================================================
    // Reads
    // ======================================================================

    pub fn load<E: EntityKind>(&self, key: &E::Key) -> Result<Option<E>, InternalError> {
        LoadExecutor::<E>::new(self).load(key)
    }

    /// Load by primary key, treating absence as an error.
    pub fn get<E: EntityKind>(&self, key: &E::Key) -> Result<E, InternalError> {
        self.load::<E>(key)?
            .ok_or_else(|| InternalError::store_not_found(format!("{}/{key:?}", E::PATH)))
    }

    pub fn exists<E: EntityKind>(&self, key: &E::Key) -> Result<bool, InternalError> {
        LoadExecutor::<E>::new(self).exists(key)
    }

    pub fn count<E: EntityKind>(&self) -> Result<usize, InternalError> {
        LoadExecutor::<E>::new(self).count()
    }

    /// Every stored row of `E`, in primary-key order.
    pub fn load_all<E: EntityKind>(&self) -> Result<Vec<E>, InternalError> {
        LoadExecutor::<E>::new(self).load_all()
    }

    /// Follow a to-one reference. Dangling references resolve to `None`.
    pub fn resolve<T: EntityKind>(&self, target: &Ref<T>) -> Result<Option<T>, InternalError> {
        self.load::<T>(target.key())
    }

    // ======================================================================
    // Diagnostics
    // ======================================================================

    /// Point-in-time row counts and sizes for every registered entity.
    #[must_use]
    pub fn storage_report(&self) -> StorageReport {
        let state = self.state.read();

        StorageReport::build(&state.registry, &state.store)
    }
}

/// Build the storage address of one primary key.
pub(crate) fn data_key_for<E: EntityKind>(key: &E::Key) -> Result<DataKey, InternalError> {
    let value = key.to_value();
    let key = Key::try_from_value(&value).map_err(|err| {
        InternalError::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Store,
            format!(
                "primary key not storage-compatible: {} value={value} ({err})",
                E::PATH
            ),
        )
    })?;

    Ok(DataKey::new(E::PATH, key))
}
