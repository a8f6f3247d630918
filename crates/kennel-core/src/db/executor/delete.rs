use crate::{
    db::{
        DataKey, Db, LOG_TARGET, data_key_for, relation::validate_delete_strong_relations,
    },
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, Span, record},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// DeleteExecutor
///

pub(crate) struct DeleteExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> DeleteExecutor<'a, E> {
    #[must_use]
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    /// Remove one row. Missing rows are not an error.
    pub(crate) fn delete(&self, key: &E::Key) -> Result<bool, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Delete);
        let data_key = data_key_for::<E>(key)?;

        // Sinks may call back into the engine; record only after unlocking.
        let mut events = Vec::new();
        let result = self.remove(&data_key, &mut events);
        for event in events {
            record(event);
        }

        let removed = result?;
        if removed {
            span.set_rows(1);
            tracing::debug!(target: LOG_TARGET, entity = E::PATH, key = %data_key, "row deleted");
        }

        Ok(removed)
    }

    fn remove(
        &self,
        data_key: &DataKey,
        events: &mut Vec<MetricsEvent>,
    ) -> Result<bool, InternalError> {
        let mut guard = self.db.state.write();
        let state = &mut *guard;
        state.registry.try_get(E::PATH)?;

        if !state.store.contains(data_key) {
            return Ok(false);
        }

        if self.db.config.enforce_relations {
            validate_delete_strong_relations::<E>(&state.reverse, data_key, events).inspect_err(
                |err| {
                    tracing::warn!(target: LOG_TARGET, entity = E::PATH, key = %data_key, error = %err, "delete rejected");
                },
            )?;
        }

        let Some(row) = state.store.remove(data_key) else {
            return Err(InternalError::executor_invariant(format!(
                "row vanished under write lock: {data_key}"
            )));
        };
        state.reverse.remove_refs(data_key, &row.refs);

        Ok(true)
    }
}
