
// -----------------------------------------------------------------------------
// Standard re-exports for `traits::X` ergonomics
// -----------------------------------------------------------------------------

pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use std::{fmt::Debug, hash::Hash};

use crate::{model::entity::EntityModel, types::Ref, value::Value};

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified schema path.
///

pub trait Path {
    const PATH: &'static str;
}

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what an entity is*, not how it is stored
// or manipulated at runtime.
//

///
/// EntityKey
///
/// Associates an entity with the Rust type used as its primary key.
///
/// ## Semantics
/// - `Self::Key` is the in-memory representation of the primary key
/// - Keys are plain values (String, u64, i64)
/// - Typed identity is provided by `Ref<Self>`, not by the key itself
///

pub trait EntityKey {
    type Key: Clone + Debug + Eq + Ord + Hash + FieldValue + Serialize + DeserializeOwned + 'static;
}

///
/// EntityIdentity
///
/// Primary-key metadata about an entity.
///

pub trait EntityIdentity: EntityKey {
    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
}

///
/// EntitySchema
///
/// Declared schema facts for an entity.
///

pub trait EntitySchema: EntityIdentity {
    const MODEL: &'static EntityModel;
}

// ============================================================================
// ENTITY VALUES
// ============================================================================

///
/// EntityValue
///
/// A concrete entity value that can present its identity at boundaries.
///

pub trait EntityValue: EntityIdentity + FieldValues + Sized {
    /// Primary-key value of this instance.
    fn key(&self) -> Self::Key;

    /// Typed reference to this instance.
    fn id(&self) -> Ref<Self> {
        Ref::new(self.key())
    }
}

///
/// EntityKind
///
/// Fully storable entity.
///
/// This is the *maximum* entity contract and should only be
/// required by code that actually touches storage.
///

pub trait EntityKind:
    EntitySchema + EntityValue + Path + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

// ============================================================================
// FIELD VALUES
// ============================================================================

///
/// FieldValue
///
/// Conversion of one Rust field into its runtime `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

///
/// FieldValues
///
/// Name-based field access for an entity instance.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}

macro_rules! impl_field_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_field_value_uint {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Uint(u64::from(*self))
                }
            }
        )*
    };
}

impl_field_value_int!(i8, i16, i32, i64);
impl_field_value_uint!(u8, u16, u32, u64);
