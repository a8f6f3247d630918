use crate::{
    traits::{EntityKey, FieldValue},
    value::Value,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

///
/// Ref
///
/// Typed to-one reference to another entity's primary key.
/// This is an *identity type*, not a semantic value: it never embeds the
/// target, and the engine resolves it by key lookup on demand.
///
/// Generic identity wrappers never derive their std traits; the bounds
/// must sit on `E::Key`, not on `E`.
///

#[repr(transparent)]
pub struct Ref<E>
where
    E: EntityKey,
{
    key: E::Key,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Ref<E>
where
    E: EntityKey,
{
    /// Construct a Ref from a primary-key value.
    #[must_use]
    pub const fn new(key: E::Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Borrow the referenced primary key.
    #[must_use]
    pub const fn key(&self) -> &E::Key {
        &self.key
    }

    /// Convert the referenced key into a semantic Value.
    pub fn as_value(&self) -> Value {
        self.key.to_value()
    }
}

impl<E> Clone for Ref<E>
where
    E: EntityKey,
{
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<E> fmt::Debug for Ref<E>
where
    E: EntityKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.key).finish()
    }
}

impl<E> fmt::Display for Ref<E>
where
    E: EntityKey,
    E::Key: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}

impl<E> Eq for Ref<E> where E: EntityKey {}

impl<E> PartialEq for Ref<E>
where
    E: EntityKey,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E> FieldValue for Ref<E>
where
    E: EntityKey,
{
    fn to_value(&self) -> Value {
        self.as_value()
    }
}

impl<E> Hash for Ref<E>
where
    E: EntityKey,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<E> Ord for Ref<E>
where
    E: EntityKey,
{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

impl<E> PartialOrd for Ref<E>
where
    E: EntityKey,
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Serialize for Ref<E>
where
    E: EntityKey,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.key.serialize(serializer)
    }
}

impl<'de, E> Deserialize<'de> for Ref<E>
where
    E: EntityKey,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = E::Key::deserialize(deserializer)?;

        Ok(Self::new(key))
    }
}

///
/// TESTS
///
