use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    model::field::{EntityFieldKind, EntityFieldModel, RelationStrength},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// EntityModel
/// Statically declared runtime model for one entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for dispatch and diagnostics).
    pub path: &'static str,
    /// Stable external name used in keys and routing.
    pub entity_name: &'static str,
    /// Primary key field (points at an entry in `fields`).
    pub primary_key: &'static EntityFieldModel,
    /// Ordered field list.
    pub fields: &'static [EntityFieldModel],
}

impl EntityModel {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static EntityFieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Position of a field in the declared field order.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Declared field names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// Relation fields declared on this entity.
    pub fn relations(&self) -> impl Iterator<Item = RelationModel> {
        self.fields.iter().filter_map(RelationModel::from_field)
    }

    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.entity_name.is_empty() {
            return Err(SchemaError::EmptyEntityName {
                path: self.path.to_string(),
            });
        }

        if self.fields.is_empty() {
            return Err(SchemaError::NoFields {
                path: self.path.to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    path: self.path.to_string(),
                    field: field.name.to_string(),
                });
            }
        }

        let pk = self.primary_key;
        let Some(declared) = self.field(pk.name) else {
            return Err(SchemaError::PrimaryKeyNotAField {
                path: self.path.to_string(),
                field: pk.name.to_string(),
            });
        };

        if declared.kind != pk.kind {
            return Err(SchemaError::PrimaryKeyKindMismatch {
                path: self.path.to_string(),
                field: pk.name.to_string(),
            });
        }

        if !pk.kind.is_keyable() {
            return Err(SchemaError::PrimaryKeyNotKeyable {
                path: self.path.to_string(),
                field: pk.name.to_string(),
            });
        }

        Ok(())
    }
}

///
/// RelationModel
///
/// Lightweight relation descriptor extracted from field metadata.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RelationModel {
    pub field_name: &'static str,
    pub target_path: &'static str,
    pub target_entity_name: &'static str,
    pub strength: RelationStrength,
}

impl RelationModel {
    const fn from_field(field: &EntityFieldModel) -> Option<Self> {
        match field.kind {
            EntityFieldKind::Relation {
                target_path,
                target_entity_name,
                strength,
            } => Some(Self {
                field_name: field.name,
                target_path,
                target_entity_name,
                strength,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_strong(&self) -> bool {
        matches!(self.strength, RelationStrength::Strong)
    }
}

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("entity '{path}' has an empty entity name")]
    EmptyEntityName { path: String },

    #[error("entity '{path}' declares no fields")]
    NoFields { path: String },

    #[error("entity '{path}' declares field '{field}' more than once")]
    DuplicateField { path: String, field: String },

    #[error("entity '{path}' primary key '{field}' is not a declared field")]
    PrimaryKeyNotAField { path: String, field: String },

    #[error("entity '{path}' primary key '{field}' disagrees with its declared kind")]
    PrimaryKeyKindMismatch { path: String, field: String },

    #[error("entity '{path}' primary key '{field}' is not a keyable kind")]
    PrimaryKeyNotKeyable { path: String, field: String },

    #[error("entity '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl SchemaError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyRegistered(_) => ErrorClass::InvariantViolation,
            _ => ErrorClass::Unsupported,
        }
    }
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        Self::new(err.class(), ErrorOrigin::Schema, err.to_string())
    }
}

///
/// TESTS
///
