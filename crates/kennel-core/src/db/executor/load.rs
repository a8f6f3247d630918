use crate::{
    db::{DataKey, Db, data_key_for, executor::decode_row},
    error::InternalError,
    obs::sink::{ExecKind, Span},
    traits::EntityKind,
};
use std::marker::PhantomData;

///
/// LoadExecutor
///

pub(crate) struct LoadExecutor<'a, E: EntityKind> {
    db: &'a Db,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> LoadExecutor<'a, E> {
    #[must_use]
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }

    pub(crate) fn load(&self, key: &E::Key) -> Result<Option<E>, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Load);
        let data_key = data_key_for::<E>(key)?;

        let state = self.db.state.read();
        state.registry.try_get(E::PATH)?;

        let Some(row) = state.store.get(&data_key) else {
            return Ok(None);
        };
        let entity = decode_row::<E>(&data_key, row)?;
        span.set_rows(1);

        Ok(Some(entity))
    }

    pub(crate) fn load_all(&self) -> Result<Vec<E>, InternalError> {
        let mut span = Span::<E>::new(ExecKind::Load);

        let state = self.db.state.read();
        state.registry.try_get(E::PATH)?;

        let Some(rows) = state.store.rows(E::PATH) else {
            return Ok(Vec::new());
        };

        let entities = rows
            .iter()
            .map(|(key, row)| decode_row::<E>(&DataKey::new(E::PATH, key.clone()), row))
            .collect::<Result<Vec<_>, _>>()?;
        span.set_rows(entities.len() as u64);

        Ok(entities)
    }

    pub(crate) fn exists(&self, key: &E::Key) -> Result<bool, InternalError> {
        let data_key = data_key_for::<E>(key)?;

        let state = self.db.state.read();
        state.registry.try_get(E::PATH)?;

        Ok(state.store.contains(&data_key))
    }

    pub(crate) fn count(&self) -> Result<usize, InternalError> {
        let state = self.db.state.read();
        state.registry.try_get(E::PATH)?;

        Ok(state.store.rows(E::PATH).map_or(0, |rows| rows.len()))
    }
}
