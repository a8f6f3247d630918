use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Key
///
/// Storage projection of a primary key.
/// Only keyable scalar values convert into a `Key`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Key {
    Int(i64),
    Uint(u64),
    Text(String),
}

impl Key {
    /// Convert a primary-key `Value` into its storage key.
    pub fn try_from_value(value: &Value) -> Result<Self, KeyError> {
        match value {
            Value::Int(v) => Ok(Self::Int(*v)),
            Value::Uint(v) => Ok(Self::Uint(*v)),
            Value::Text(v) => Ok(Self::Text(v.clone())),
            Value::Null => Err(KeyError::Null),
            other => Err(KeyError::NotKeyable {
                label: other.label(),
            }),
        }
    }

    /// Return the key as a semantic Value.
    #[must_use]
    pub fn as_value(&self) -> Value {
        match self {
            Self::Int(v) => Value::Int(*v),
            Self::Uint(v) => Value::Uint(*v),
            Self::Text(v) => Value::Text(v.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

///
/// KeyError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum KeyError {
    #[error("primary key value is null")]
    Null,

    #[error("value of kind '{label}' cannot be used as a key")]
    NotKeyable { label: &'static str },
}

///
/// TESTS
///
