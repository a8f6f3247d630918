use crate::{
    db::{
        Db, LOG_TARGET, data_key_for,
        relation::{strong_refs_for, validate_save_strong_relations},
        store::{DataKey, RawRow, StoredRow},
    },
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, Span, record},
    serialize::serialize,
    traits::{EntityKind, FieldValue},
};
use std::marker::PhantomData;

///
/// SaveMode
///
/// Insert  : will only insert a row if the key is free
/// Replace : will write the row regardless of what was there
/// Update  : will only change an existing row
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum SaveMode {
    #[default]
    Insert,
    Replace,
    Update,
}

///
/// SaveRule
///
/// Canonical save precondition on the current row.
///

#[derive(Clone, Copy)]
enum SaveRule {
    RequireAbsent,
    RequirePresent,
    AllowAny,
}

impl SaveRule {
    const fn from_mode(mode: SaveMode) -> Self {
        match mode {
            SaveMode::Insert => Self::RequireAbsent,
            SaveMode::Update => Self::RequirePresent,
            SaveMode::Replace => Self::AllowAny,
        }
    }
}

///
/// SaveExecutor
///

pub(crate) struct SaveExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> SaveExecutor<'a, E> {
    #[must_use]
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Insert a brand-new entity (errors if the key already exists).
    pub(crate) fn insert(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Insert, entity)
    }

    /// Update an existing entity (errors if it does not exist).
    pub(crate) fn update(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Update, entity)
    }

    /// Replace an entity, inserting if missing.
    pub(crate) fn replace(&self, entity: E) -> Result<E, InternalError> {
        self.save_entity(SaveMode::Replace, entity)
    }

    fn save_entity(&self, mode: SaveMode, entity: E) -> Result<E, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Save);

        // Phase 1: everything that does not need the store.
        Self::preflight_fields(&entity)?;
        let data_key = data_key_for::<E>(&entity.key())?;
        let refs = strong_refs_for(&entity)?;
        let raw = RawRow::try_new(serialize(&entity)?, self.db.config.max_row_bytes)?;

        // Phase 2: check and commit under the write lock. Sinks may call back
        // into the engine, so events are only recorded once it is released.
        let mut events = Vec::new();
        let result = self.commit(mode, &data_key, StoredRow { raw, refs }, &mut events);
        for event in events {
            record(event);
        }
        result?;

        span.set_rows(1);
        tracing::debug!(target: LOG_TARGET, entity = E::PATH, key = %data_key, ?mode, "row saved");

        Ok(entity)
    }

    fn commit(
        &self,
        mode: SaveMode,
        data_key: &DataKey,
        row: StoredRow,
        events: &mut Vec<MetricsEvent>,
    ) -> Result<(), InternalError> {
        let mut guard = self.db.state.write();
        let state = &mut *guard;
        state.registry.try_get(E::PATH)?;

        let previous_refs = state.store.get(data_key).map(|stored| stored.refs.clone());
        match (SaveRule::from_mode(mode), previous_refs.is_some()) {
            (SaveRule::RequireAbsent, true) => {
                events.push(MetricsEvent::UniqueViolation {
                    entity_path: E::PATH,
                });
                tracing::warn!(target: LOG_TARGET, entity = E::PATH, key = %data_key, "insert rejected: primary key exists");

                return Err(InternalError::primary_key_conflict(
                    E::PATH,
                    data_key.key().to_string(),
                ));
            }
            (SaveRule::RequirePresent, false) => {
                return Err(InternalError::store_not_found(data_key.to_string()));
            }
            _ => {}
        }

        if self.db.config.enforce_relations {
            validate_save_strong_relations::<E>(
                &state.registry,
                &state.store,
                data_key,
                &row.refs,
                events,
            )
            .inspect_err(|err| {
                tracing::warn!(target: LOG_TARGET, entity = E::PATH, key = %data_key, error = %err, "save rejected");
            })?;
        }

        if let Some(previous_refs) = previous_refs {
            state.reverse.remove_refs(data_key, &previous_refs);
        }
        state.reverse.insert_refs(data_key, &row.refs);
        state.store.put(data_key.clone(), row);

        Ok(())
    }

    // Check the instance against its declared model before it is encoded.
    fn preflight_fields(entity: &E) -> Result<(), InternalError> {
        let model = E::MODEL;

        if model.path != E::PATH || model.primary_key.name != E::PRIMARY_KEY {
            return Err(InternalError::schema_invariant(format!(
                "entity model disagrees with its type: type={} pk={} model={} model_pk={}",
                E::PATH,
                E::PRIMARY_KEY,
                model.path,
                model.primary_key.name,
            )));
        }

        for field in model.fields {
            let value = entity.get_value(field.name).ok_or_else(|| {
                InternalError::executor_invariant(format!(
                    "entity field missing: {} field={}",
                    E::PATH,
                    field.name
                ))
            })?;

            if !value.fits_kind(&field.kind) {
                return Err(InternalError::executor_invariant(format!(
                    "entity field value does not match declared kind: {} field={} kind={:?} value={value}",
                    E::PATH,
                    field.name,
                    field.kind,
                )));
            }
        }

        let declared_key = entity.get_value(E::PRIMARY_KEY);
        if declared_key != Some(entity.key().to_value()) {
            return Err(InternalError::executor_invariant(format!(
                "primary key field disagrees with entity key: {} field={}",
                E::PATH,
                E::PRIMARY_KEY,
            )));
        }

        Ok(())
    }
}
