///
/// EntityFieldModel
/// Runtime field metadata used by the engine for keys and relations.
///

#[derive(Debug)]
pub struct EntityFieldModel {
    /// Field name as used in rows and diagnostics.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: EntityFieldKind,
}

impl EntityFieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: EntityFieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// EntityFieldKind
///
/// Minimal type surface needed by the engine.
/// Aligned with `Value` variants; this is a lossy projection of Rust types.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityFieldKind {
    Bool,
    Int,
    Uint,
    Text,

    /// To-one reference to another entity, stored as the target's key.
    Relation {
        target_path: &'static str,
        target_entity_name: &'static str,
        strength: RelationStrength,
    },

    /// Marker for fields the engine never inspects.
    Unsupported,
}

impl EntityFieldKind {
    /// Returns true if a field of this kind may serve as a primary key.
    #[must_use]
    pub const fn is_keyable(&self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Text)
    }
}

///
/// RelationStrength
///
/// Strong relations must point at an existing row and pin their target
/// against deletion. Weak relations are never checked.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelationStrength {
    Strong,
    Weak,
}
