use kennel_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Person
/// Owner of zero or more dogs, keyed by a numeric id.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub age: i32,
}

impl Person {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
}

static FIELDS: [EntityFieldModel; 3] = [
    EntityFieldModel::new("id", EntityFieldKind::Uint),
    EntityFieldModel::new("name", EntityFieldKind::Text),
    EntityFieldModel::new("age", EntityFieldKind::Int),
];

static MODEL: EntityModel = EntityModel {
    path: Person::PATH,
    entity_name: Person::ENTITY_NAME,
    primary_key: &FIELDS[0],
    fields: &FIELDS,
};

impl Path for Person {
    const PATH: &'static str = "kennel_schema::Person";
}

impl EntityKey for Person {
    type Key = u64;
}

impl EntityIdentity for Person {
    const ENTITY_NAME: &'static str = "Person";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for Person {
    const MODEL: &'static EntityModel = &MODEL;
}

impl FieldValues for Person {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "age" => Some(self.age.to_value()),
            _ => None,
        }
    }
}

impl EntityValue for Person {
    fn key(&self) -> u64 {
        self.id
    }
}

impl EntityKind for Person {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_declares_id_as_primary_key() {
        assert_eq!(Person::MODEL.primary_key.name, "id");
        assert_eq!(Person::MODEL.field_names().collect::<Vec<_>>(), ["id", "name", "age"]);
        Person::MODEL.validate().expect("valid model");
    }

    #[test]
    fn id_refers_to_the_primary_key() {
        let person = Person::new(7, "Ada", 36);

        assert_eq!(person.id(), Ref::new(7));
        assert_eq!(person.get_value("id"), Some(Value::Uint(7)));
    }
}
