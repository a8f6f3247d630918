//! Entity declarations for Kennel.
//!
//! Each entity is a plain value type plus a statically declared
//! `EntityModel`; storing it goes through an explicit `kennel_core::db::Db`.

mod dog;
mod person;

pub use dog::Dog;
pub use person::Person;

use kennel_core::{db::Db, error::InternalError};

/// Register every entity declared in this crate.
///
/// `Person` is registered first so `Dog`'s strong owner relation has a
/// registered target.
pub fn register_all(db: &Db) -> Result<(), InternalError> {
    db.register::<Person>()?;
    db.register::<Dog>()?;

    Ok(())
}
