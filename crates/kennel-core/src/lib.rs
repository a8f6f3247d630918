//! Core runtime for Kennel: entity traits, values, the embedded engine, and
//! the vocabulary exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod key;
pub mod model;
pub mod obs;
pub mod serialize;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, stores, serializers, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{
            entity::EntityModel,
            field::{EntityFieldKind, EntityFieldModel, RelationStrength},
        },
        traits::{
            EntityIdentity, EntityKey, EntityKind, EntitySchema, EntityValue, FieldValue,
            FieldValues, Path,
        },
        types::Ref,
        value::Value,
    };
}
