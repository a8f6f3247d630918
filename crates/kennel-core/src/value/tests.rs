use super::*;
use crate::model::field::RelationStrength;

const OWNER_KIND: EntityFieldKind = EntityFieldKind::Relation {
    target_path: "kennel::Person",
    target_entity_name: "Person",
    strength: RelationStrength::Strong,
};

#[test]
fn null_fits_every_kind() {
    for kind in [
        EntityFieldKind::Bool,
        EntityFieldKind::Int,
        EntityFieldKind::Uint,
        EntityFieldKind::Text,
        OWNER_KIND,
    ] {
        assert!(Value::Null.fits_kind(&kind), "null rejected for {kind:?}");
    }
}

#[test]
fn scalars_only_fit_their_own_kind() {
    assert!(Value::Int(-3).fits_kind(&EntityFieldKind::Int));
    assert!(!Value::Int(-3).fits_kind(&EntityFieldKind::Text));
    assert!(Value::from("Rex").fits_kind(&EntityFieldKind::Text));
    assert!(!Value::from("Rex").fits_kind(&EntityFieldKind::Uint));
    assert!(!Value::Bool(true).fits_kind(&OWNER_KIND));
    assert!(Value::Uint(7).fits_kind(&OWNER_KIND));
}

#[test]
fn empty_text_is_not_null() {
    let empty = Value::from("");

    assert!(!empty.is_null());
    assert_eq!(empty.as_text(), Some(""));
    assert_ne!(empty, Value::Null);
}

#[test]
fn accessors_reject_other_variants() {
    assert_eq!(Value::Int(5).as_int(), Some(5));
    assert_eq!(Value::Int(5).as_uint(), None);
    assert_eq!(Value::Uint(5).as_uint(), Some(5));
    assert_eq!(Value::Uint(5).as_text(), None);
}

#[test]
fn display_quotes_text() {
    assert_eq!(Value::from("Rex").to_string(), "\"Rex\"");
    assert_eq!(Value::Int(-1).to_string(), "-1");
    assert_eq!(Value::Null.to_string(), "null");
}
