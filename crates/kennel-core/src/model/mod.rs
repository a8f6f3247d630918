//! Runtime data model definitions.
//!
//! Types in `model` are the statically declared schema of each entity. The
//! engine reads them when an entity is registered and again on every write
//! to find the primary key and relation fields.
//!
//! In general:
//! - Entity crates declare *what exists* as `const` models
//! - `db` decides *what runs* against them
pub mod entity;
pub mod field;
