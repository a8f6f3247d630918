#[cfg(test)]
mod tests;

use crate::model::field::EntityFieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Runtime projection of one entity field.
///
/// Null        → the field’s value is Option::None.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_uint(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Stable lowercase label used in diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Text(_) => "text",
        }
    }

    /// Returns true if this value may be stored in a field of `kind`.
    ///
    /// `Null` is accepted for every kind; nullability is a property of the
    /// Rust field type, not of the runtime model. Relation fields carry the
    /// target's key, so any keyable scalar is accepted there.
    #[must_use]
    pub const fn fits_kind(&self, kind: &EntityFieldKind) -> bool {
        match (self, kind) {
            (Self::Null, _)
            | (Self::Bool(_), EntityFieldKind::Bool)
            | (Self::Int(_), EntityFieldKind::Int)
            | (Self::Uint(_), EntityFieldKind::Uint)
            | (Self::Text(_), EntityFieldKind::Text)
            | (
                Self::Int(_) | Self::Uint(_) | Self::Text(_),
                EntityFieldKind::Relation { .. },
            )
            | (_, EntityFieldKind::Unsupported) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
