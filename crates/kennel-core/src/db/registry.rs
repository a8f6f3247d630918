use crate::{
    error::InternalError,
    model::entity::{EntityModel, SchemaError},
};
use std::collections::BTreeMap;

///
/// SchemaRegistry
///
/// Entity models known to one `Db`, keyed by entity path.
///

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    models: BTreeMap<&'static str, &'static EntityModel>,
}

impl SchemaRegistry {
    /// Validate and register one entity model.
    pub fn register(&mut self, model: &'static EntityModel) -> Result<(), SchemaError> {
        model.validate()?;

        if self.models.contains_key(model.path) {
            return Err(SchemaError::AlreadyRegistered(model.path.to_string()));
        }
        self.models.insert(model.path, model);

        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        self.models.contains_key(path)
    }

    /// Look up a registered model by path.
    pub fn try_get(&self, path: &str) -> Result<&'static EntityModel, InternalError> {
        self.models
            .get(path)
            .copied()
            .ok_or_else(|| InternalError::unsupported_entity_path(path))
    }

    /// Iterate registered models in path order.
    pub fn iter(&self) -> impl Iterator<Item = &'static EntityModel> {
        self.models.values().copied()
    }
}
