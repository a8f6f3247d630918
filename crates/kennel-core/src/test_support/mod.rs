//! Hand-declared entities for core-only tests.

use crate::{
    model::{
        entity::EntityModel,
        field::{EntityFieldKind, EntityFieldModel, RelationStrength},
    },
    traits::{
        EntityIdentity, EntityKey, EntityKind, EntitySchema, EntityValue, FieldValue, FieldValues,
        Path,
    },
    types::Ref,
    value::Value,
};
use serde::{Deserialize, Serialize};

pub(crate) const KEEPER_PATH: &str = "kennel_core::test_support::Keeper";
pub(crate) const PET_PATH: &str = "kennel_core::test_support::Pet";
pub(crate) const NODE_PATH: &str = "kennel_core::test_support::Node";

///
/// Keeper
/// Relation target keyed by an unsigned id.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Keeper {
    pub(crate) id: u64,
    pub(crate) name: String,
}

static KEEPER_FIELDS: [EntityFieldModel; 2] = [
    EntityFieldModel::new("id", EntityFieldKind::Uint),
    EntityFieldModel::new("name", EntityFieldKind::Text),
];

static KEEPER_MODEL: EntityModel = EntityModel {
    path: KEEPER_PATH,
    entity_name: "Keeper",
    primary_key: &KEEPER_FIELDS[0],
    fields: &KEEPER_FIELDS,
};

impl Path for Keeper {
    const PATH: &'static str = KEEPER_PATH;
}

impl EntityKey for Keeper {
    type Key = u64;
}

impl EntityIdentity for Keeper {
    const ENTITY_NAME: &'static str = "Keeper";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for Keeper {
    const MODEL: &'static EntityModel = &KEEPER_MODEL;
}

impl FieldValues for Keeper {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            _ => None,
        }
    }
}

impl EntityValue for Keeper {
    fn key(&self) -> u64 {
        self.id
    }
}

impl EntityKind for Keeper {}

///
/// Pet
/// Text-keyed entity with one strong and one weak relation to `Keeper`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Pet {
    pub(crate) name: String,
    pub(crate) keeper: Option<Ref<Keeper>>,
    pub(crate) vet: Option<Ref<Keeper>>,
}

static PET_FIELDS: [EntityFieldModel; 3] = [
    EntityFieldModel::new("name", EntityFieldKind::Text),
    EntityFieldModel::new(
        "keeper",
        EntityFieldKind::Relation {
            target_path: KEEPER_PATH,
            target_entity_name: "Keeper",
            strength: RelationStrength::Strong,
        },
    ),
    EntityFieldModel::new(
        "vet",
        EntityFieldKind::Relation {
            target_path: KEEPER_PATH,
            target_entity_name: "Keeper",
            strength: RelationStrength::Weak,
        },
    ),
];

static PET_MODEL: EntityModel = EntityModel {
    path: PET_PATH,
    entity_name: "Pet",
    primary_key: &PET_FIELDS[0],
    fields: &PET_FIELDS,
};

impl Pet {
    pub(crate) fn new(name: &str, keeper: Option<u64>, vet: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            keeper: keeper.map(Ref::new),
            vet: vet.map(Ref::new),
        }
    }
}

impl Path for Pet {
    const PATH: &'static str = PET_PATH;
}

impl EntityKey for Pet {
    type Key = String;
}

impl EntityIdentity for Pet {
    const ENTITY_NAME: &'static str = "Pet";
    const PRIMARY_KEY: &'static str = "name";
}

impl EntitySchema for Pet {
    const MODEL: &'static EntityModel = &PET_MODEL;
}

impl FieldValues for Pet {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => Some(self.name.to_value()),
            "keeper" => Some(self.keeper.to_value()),
            "vet" => Some(self.vet.to_value()),
            _ => None,
        }
    }
}

impl EntityValue for Pet {
    fn key(&self) -> String {
        self.name.clone()
    }
}

impl EntityKind for Pet {}

///
/// Node
/// Tree node whose strong `parent` relation targets its own entity.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Node {
    pub(crate) id: u64,
    pub(crate) parent: Option<Ref<Node>>,
}

static NODE_FIELDS: [EntityFieldModel; 2] = [
    EntityFieldModel::new("id", EntityFieldKind::Uint),
    EntityFieldModel::new(
        "parent",
        EntityFieldKind::Relation {
            target_path: NODE_PATH,
            target_entity_name: "Node",
            strength: RelationStrength::Strong,
        },
    ),
];

static NODE_MODEL: EntityModel = EntityModel {
    path: NODE_PATH,
    entity_name: "Node",
    primary_key: &NODE_FIELDS[0],
    fields: &NODE_FIELDS,
};

impl Node {
    pub(crate) fn new(id: u64, parent: Option<u64>) -> Self {
        Self {
            id,
            parent: parent.map(Ref::new),
        }
    }
}

impl Path for Node {
    const PATH: &'static str = NODE_PATH;
}

impl EntityKey for Node {
    type Key = u64;
}

impl EntityIdentity for Node {
    const ENTITY_NAME: &'static str = "Node";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntitySchema for Node {
    const MODEL: &'static EntityModel = &NODE_MODEL;
}

impl FieldValues for Node {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "parent" => Some(self.parent.to_value()),
            _ => None,
        }
    }
}

impl EntityValue for Node {
    fn key(&self) -> u64 {
        self.id
    }
}

impl EntityKind for Node {}

///
/// Misdeclared
/// Entity whose model names a primary key it does not declare.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct Misdeclared {
    pub(crate) id: u64,
}

static MISDECLARED_FIELDS: [EntityFieldModel; 1] =
    [EntityFieldModel::new("id", EntityFieldKind::Uint)];

static MISDECLARED_KEY: EntityFieldModel = EntityFieldModel::new("uid", EntityFieldKind::Uint);

static MISDECLARED_MODEL: EntityModel = EntityModel {
    path: "kennel_core::test_support::Misdeclared",
    entity_name: "Misdeclared",
    primary_key: &MISDECLARED_KEY,
    fields: &MISDECLARED_FIELDS,
};

impl Path for Misdeclared {
    const PATH: &'static str = "kennel_core::test_support::Misdeclared";
}

impl EntityKey for Misdeclared {
    type Key = u64;
}

impl EntityIdentity for Misdeclared {
    const ENTITY_NAME: &'static str = "Misdeclared";
    const PRIMARY_KEY: &'static str = "uid";
}

impl EntitySchema for Misdeclared {
    const MODEL: &'static EntityModel = &MISDECLARED_MODEL;
}

impl FieldValues for Misdeclared {
    fn get_value(&self, field: &str) -> Option<Value> {
        (field == "id").then(|| self.id.to_value())
    }
}

impl EntityValue for Misdeclared {
    fn key(&self) -> u64 {
        self.id
    }
}

impl EntityKind for Misdeclared {}
