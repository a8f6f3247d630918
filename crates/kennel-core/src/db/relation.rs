//! Module: relation
//! Responsibility: strong-relation extraction, save-time existence checks,
//! and the reverse index that blocks deletes of referenced rows.
//! Weak relations never reach this module's checks.

use crate::{
    db::{
        registry::SchemaRegistry,
        store::{DataKey, DataStore, EntityRef},
    },
    error::{ErrorClass, ErrorOrigin, InternalError},
    key::Key,
    obs::sink::MetricsEvent,
    traits::{EntityKind, FieldValues},
    value::Value,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// ReverseIndex
///
/// Target row → set of (source row, relation field) holding a strong
/// reference to it.
///

#[derive(Debug, Default)]
pub struct ReverseIndex {
    inbound: BTreeMap<DataKey, BTreeSet<(DataKey, &'static str)>>,
}

impl ReverseIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every outgoing reference of `source`.
    pub fn insert_refs(&mut self, source: &DataKey, refs: &[EntityRef]) {
        for entity_ref in refs {
            self.inbound
                .entry(entity_ref.target.clone())
                .or_default()
                .insert((source.clone(), entity_ref.field_name));
        }
    }

    /// Forget every outgoing reference of `source`.
    pub fn remove_refs(&mut self, source: &DataKey, refs: &[EntityRef]) {
        for entity_ref in refs {
            let Some(sources) = self.inbound.get_mut(&entity_ref.target) else {
                continue;
            };
            sources.remove(&(source.clone(), entity_ref.field_name));
            if sources.is_empty() {
                self.inbound.remove(&entity_ref.target);
            }
        }
    }

    /// Rows (in key order) that reference `target`, with the relation field.
    pub fn referrers(&self, target: &DataKey) -> impl Iterator<Item = (&DataKey, &'static str)> {
        self.inbound
            .get(target)
            .into_iter()
            .flat_map(BTreeSet::iter)
            .map(|(source, field)| (source, *field))
    }

    /// Number of strong references pointing at `target`.
    #[must_use]
    pub fn referrer_count(&self, target: &DataKey) -> usize {
        self.inbound.get(target).map_or(0, BTreeSet::len)
    }
}

/// Extract the strong, non-null relation keys held by one entity.
pub(crate) fn strong_refs_for<E>(entity: &E) -> Result<Vec<EntityRef>, InternalError>
where
    E: EntityKind,
{
    let mut refs = Vec::new();

    for relation in E::MODEL.relations().filter(|relation| relation.is_strong()) {
        let value = entity.get_value(relation.field_name).ok_or_else(|| {
            InternalError::executor_invariant(format!(
                "entity field missing: {} field={}",
                E::PATH,
                relation.field_name
            ))
        })?;

        if value.is_null() {
            continue;
        }

        let key = relation_key::<E>(relation.field_name, relation.target_path, &value)?;
        refs.push(EntityRef {
            field_name: relation.field_name,
            target: DataKey::new(relation.target_path, key),
        });
    }

    Ok(refs)
}

// Convert one relation value into the target's storage key.
fn relation_key<E>(field_name: &str, target_path: &str, value: &Value) -> Result<Key, InternalError>
where
    E: EntityKind,
{
    Key::try_from_value(value).map_err(|err| {
        InternalError::new(
            ErrorClass::Unsupported,
            ErrorOrigin::Relation,
            format!(
                "strong relation key not storage-compatible: source={} field={field_name} target={target_path} value={value} ({err})",
                E::PATH,
            ),
        )
    })
}

/// Check that every strong reference of a save candidate points at a stored row.
///
/// Metrics go to `events`; the caller records them once the engine lock is
/// released.
pub(crate) fn validate_save_strong_relations<E>(
    registry: &SchemaRegistry,
    store: &DataStore,
    source: &DataKey,
    refs: &[EntityRef],
    events: &mut Vec<MetricsEvent>,
) -> Result<(), InternalError>
where
    E: EntityKind,
{
    let mut lookups = 0u64;

    for entity_ref in refs {
        let target_path = entity_ref.target.entity_path();

        if !registry.is_registered(target_path) {
            return Err(InternalError::new(
                ErrorClass::Unsupported,
                ErrorOrigin::Relation,
                format!(
                    "strong relation target not registered: source={} field={} target={target_path}",
                    E::PATH,
                    entity_ref.field_name,
                ),
            ));
        }

        // A row may reference itself; it exists once this save commits.
        if &entity_ref.target == source {
            continue;
        }

        lookups += 1;
        if !store.contains(&entity_ref.target) {
            events.push(MetricsEvent::RelationValidation {
                entity_path: E::PATH,
                lookups,
                blocked_deletes: 0,
            });

            return Err(InternalError::relation_target_missing(
                E::PATH,
                entity_ref.field_name,
                target_path,
                entity_ref.target.key().to_string(),
            ));
        }
    }

    if lookups > 0 {
        events.push(MetricsEvent::RelationValidation {
            entity_path: E::PATH,
            lookups,
            blocked_deletes: 0,
        });
    }

    Ok(())
}

/// Reject deleting a row that another row still references strongly.
pub(crate) fn validate_delete_strong_relations<E>(
    index: &ReverseIndex,
    target: &DataKey,
    events: &mut Vec<MetricsEvent>,
) -> Result<(), InternalError>
where
    E: EntityKind,
{
    // A row referencing itself does not pin itself.
    let Some((source, field_name)) = index.referrers(target).find(|(source, _)| *source != target)
    else {
        return Ok(());
    };

    events.push(MetricsEvent::RelationValidation {
        entity_path: E::PATH,
        lookups: 1,
        blocked_deletes: 1,
    });

    Err(InternalError::relation_delete_blocked(
        E::PATH,
        target.key().to_string(),
        source.entity_path(),
        field_name,
    ))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOG: &str = "test::Dog";
    const PERSON: &str = "test::Person";

    fn dog(name: &str) -> DataKey {
        DataKey::new(DOG, Key::Text(name.into()))
    }

    fn person(id: u64) -> DataKey {
        DataKey::new(PERSON, Key::Uint(id))
    }

    fn owner_ref(id: u64) -> Vec<EntityRef> {
        vec![EntityRef {
            field_name: "owner",
            target: person(id),
        }]
    }

    #[test]
    fn reverse_index_tracks_referrers() {
        let mut index = ReverseIndex::new();
        index.insert_refs(&dog("Rex"), &owner_ref(1));
        index.insert_refs(&dog("Ace"), &owner_ref(1));

        assert_eq!(index.referrer_count(&person(1)), 2);
        assert_eq!(
            index.referrers(&person(1)).next(),
            Some((&dog("Ace"), "owner"))
        );
        assert_eq!(index.referrer_count(&person(2)), 0);
    }

    #[test]
    fn removing_last_referrer_clears_target() {
        let mut index = ReverseIndex::new();
        index.insert_refs(&dog("Rex"), &owner_ref(1));
        index.remove_refs(&dog("Rex"), &owner_ref(1));

        assert!(index.referrers(&person(1)).next().is_none());
        assert!(index.inbound.is_empty());
    }

    #[test]
    fn removing_unknown_refs_is_a_no_op() {
        let mut index = ReverseIndex::new();
        index.insert_refs(&dog("Rex"), &owner_ref(1));
        index.remove_refs(&dog("Ace"), &owner_ref(1));
        index.remove_refs(&dog("Rex"), &owner_ref(2));

        assert_eq!(index.referrer_count(&person(1)), 1);
    }

    proptest! {
        #[test]
        fn insert_then_remove_leaves_index_empty(
            edges in prop::collection::vec(("[a-d]", 0u64..4), 0..24)
        ) {
            let mut index = ReverseIndex::new();
            for (name, id) in &edges {
                index.insert_refs(&dog(name), &owner_ref(*id));
            }
            for (name, id) in &edges {
                index.remove_refs(&dog(name), &owner_ref(*id));
            }

            prop_assert!(index.inbound.is_empty());
        }
    }
}
