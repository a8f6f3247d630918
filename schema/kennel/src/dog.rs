use crate::Person;
use kennel_core::prelude::*;
use serde::{Deserialize, Serialize};

///
/// Dog
///
/// Keyed by `name`. The owner is held as a reference to the `Person`'s
/// primary key and resolved through the engine, never embedded.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Dog {
    pub name: String,
    pub age: i32,
    pub breed: Option<String>,

    /// Pinned, not cleared: deleting a referenced `Person` is refused.
    pub owner: Option<Ref<Person>>,
}

impl Dog {
    /// Build a dog. A missing name becomes the empty string; `breed` and
    /// `owner` are kept exactly as given.
    #[must_use]
    pub fn new(
        name: Option<impl Into<String>>,
        age: i32,
        breed: Option<String>,
        owner: Option<Ref<Person>>,
    ) -> Self {
        Self {
            name: name.map(Into::into).unwrap_or_default(),
            age,
            breed,
            owner,
        }
    }
}

static FIELDS: [EntityFieldModel; 4] = [
    EntityFieldModel::new("name", EntityFieldKind::Text),
    EntityFieldModel::new("age", EntityFieldKind::Int),
    EntityFieldModel::new("breed", EntityFieldKind::Text),
    EntityFieldModel::new(
        "owner",
        EntityFieldKind::Relation {
            target_path: Person::PATH,
            target_entity_name: Person::ENTITY_NAME,
            strength: RelationStrength::Strong,
        },
    ),
];

static MODEL: EntityModel = EntityModel {
    path: Dog::PATH,
    entity_name: Dog::ENTITY_NAME,
    primary_key: &FIELDS[0],
    fields: &FIELDS,
};

impl Path for Dog {
    const PATH: &'static str = "kennel_schema::Dog";
}

impl EntityKey for Dog {
    type Key = String;
}

impl EntityIdentity for Dog {
    const ENTITY_NAME: &'static str = "Dog";
    const PRIMARY_KEY: &'static str = "name";
}

impl EntitySchema for Dog {
    const MODEL: &'static EntityModel = &MODEL;
}

impl FieldValues for Dog {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.to_value()),
            "age" => Some(self.age.to_value()),
            "breed" => Some(self.breed.to_value()),
            "owner" => Some(self.owner.to_value()),
            _ => None,
        }
    }
}

impl EntityValue for Dog {
    fn key(&self) -> String {
        self.name.clone()
    }
}

impl EntityKind for Dog {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owner_strategy() -> impl Strategy<Value = Option<Ref<Person>>> {
        proptest::option::of(any::<u64>().prop_map(Ref::new))
    }

    #[test]
    fn missing_name_becomes_empty_string() {
        let dog = Dog::new(None::<String>, 3, Some("Labrador".into()), None);

        assert_eq!(
            dog,
            Dog {
                name: String::new(),
                age: 3,
                breed: Some("Labrador".into()),
                owner: None,
            }
        );
    }

    #[test]
    fn named_dog_keeps_owner_and_null_breed() {
        let owner = Ref::<Person>::new(11);
        let dog = Dog::new(Some("Rex"), 5, None, Some(owner.clone()));

        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.age, 5);
        assert_eq!(dog.breed, None);
        assert_eq!(dog.owner, Some(owner));
    }

    #[test]
    fn model_describes_four_fields_keyed_by_name() {
        let model = Dog::MODEL;

        assert_eq!(model.entity_name, "Dog");
        assert_eq!(model.primary_key.name, "name");
        assert_eq!(
            model.field_names().collect::<Vec<_>>(),
            ["name", "age", "breed", "owner"]
        );
        model.validate().expect("valid model");
    }

    #[test]
    fn owner_is_a_strong_relation_to_person() {
        let relations: Vec<_> = Dog::MODEL.relations().collect();

        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].field_name, "owner");
        assert_eq!(relations[0].target_path, Person::PATH);
        assert!(relations[0].is_strong());
    }

    #[test]
    fn absent_breed_and_owner_project_to_null() {
        let dog = Dog::new(Some("Rex"), 5, None, None);

        assert_eq!(dog.get_value("breed"), Some(Value::Null));
        assert_eq!(dog.get_value("owner"), Some(Value::Null));
        assert_eq!(dog.get_value("name"), Some(Value::from("Rex")));
        assert_eq!(dog.get_value("collar"), None);
    }

    #[test]
    fn owner_projects_to_the_person_key() {
        let dog = Dog::new(Some("Rex"), 5, None, Some(Ref::new(4)));

        assert_eq!(dog.get_value("owner"), Some(Value::Uint(4)));
        assert_eq!(dog.id(), Ref::new("Rex".to_string()));
    }

    proptest! {
        #[test]
        fn name_is_kept_verbatim(name in any::<String>()) {
            let dog = Dog::new(Some(name.clone()), 0, None, None);

            prop_assert_eq!(dog.name, name);
        }

        #[test]
        fn every_age_is_kept(age in any::<i32>()) {
            let dog = Dog::new(None::<String>, age, None, None);

            prop_assert_eq!(dog.age, age);
            prop_assert_eq!(dog.name, "");
        }

        #[test]
        fn breed_and_owner_pass_through(
            breed in proptest::option::of(any::<String>()),
            owner in owner_strategy(),
        ) {
            let dog = Dog::new(Some("Rex"), 1, breed.clone(), owner.clone());

            prop_assert_eq!(dog.breed, breed);
            prop_assert_eq!(dog.owner, owner);
        }

        #[test]
        fn identical_inputs_build_equal_independent_values(
            name in proptest::option::of(any::<String>()),
            age in any::<i32>(),
            breed in proptest::option::of(any::<String>()),
            owner in owner_strategy(),
        ) {
            let first = Dog::new(name.clone(), age, breed.clone(), owner.clone());
            let mut second = Dog::new(name, age, breed, owner);
            prop_assert_eq!(&first, &second);

            second.age = second.age.wrapping_add(1);
            prop_assert_ne!(first.age, second.age);
        }
    }
}
