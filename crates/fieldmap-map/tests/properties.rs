//! Property tests for the mapping invariants.

use std::collections::{HashMap, HashSet};

use fieldmap_map::{Gesture, MappingSession};
use fieldmap_model::{CorrespondenceId, FieldId, MappingStatus, Side};
use proptest::prelude::*;

fn names(prefix: &str, len: usize) -> Vec<String> {
    (0..len).map(|i| format!("{prefix}_{i}")).collect()
}

fn session(source_len: usize, target_len: usize) -> MappingSession {
    let mut session = MappingSession::new(names("src", source_len), names("tgt", target_len))
        .expect("column names are valid");
    session.seed();
    session
}

fn arb_side() -> impl Strategy<Value = Side> + Clone {
    prop_oneof![Just(Side::Source), Just(Side::Target)]
}

/// Gestures over small id ranges, so most of them hit existing entries and
/// some of them miss.
fn arb_gesture() -> impl Strategy<Value = Gesture> {
    let cid = (1u64..10).prop_map(CorrespondenceId::sequential);
    let source = (1u64..7).prop_map(|n| FieldId::sequential(Side::Source, n));
    let target = (1u64..7).prop_map(|n| FieldId::sequential(Side::Target, n));
    let field = (arb_side(), 1u64..7).prop_map(|(side, n)| (side, FieldId::sequential(side, n)));

    prop_oneof![
        cid.clone().prop_map(|id| Gesture::Accept { id }),
        Just(Gesture::AcceptAll),
        (source, target).prop_map(|(source, target)| Gesture::Connect { source, target }),
        cid.clone().prop_map(|id| Gesture::Remove { id }),
        (field.clone(), 0usize..7)
            .prop_map(|((side, field), index)| Gesture::Reorder { side, field, index }),
        field
            .clone()
            .prop_map(|(side, field)| Gesture::MoveUp { side, field }),
        field.prop_map(|(side, field)| Gesture::MoveDown { side, field }),
        Just(Gesture::ClearSuggestions),
        (cid, -50.0f64..50.0).prop_map(|(id, offset)| Gesture::SetOffset { id, offset }),
    ]
}

fn arb_reorder() -> impl Strategy<Value = Gesture> {
    let field = (arb_side(), 1u64..7).prop_map(|(side, n)| (side, FieldId::sequential(side, n)));
    prop_oneof![
        (field.clone(), 0usize..7)
            .prop_map(|((side, field), index)| Gesture::Reorder { side, field, index }),
        field
            .clone()
            .prop_map(|(side, field)| Gesture::MoveUp { side, field }),
        field.prop_map(|(side, field)| Gesture::MoveDown { side, field }),
    ]
}

proptest! {
    #[test]
    fn no_two_correspondences_link_the_same_pair(
        source_len in 0usize..6,
        target_len in 0usize..6,
        gestures in prop::collection::vec(arb_gesture(), 0..40),
    ) {
        let mut session = session(source_len, target_len);
        for gesture in &gestures {
            let _ = session.apply(gesture);
        }
        let mut seen = HashSet::new();
        for corr in session.store().iter() {
            let pair = (corr.source_field_id.clone(), corr.target_field_id.clone());
            prop_assert!(seen.insert(pair), "duplicate link {}", corr.id);
        }
    }

    #[test]
    fn confirmed_links_never_return_to_suggested(
        gestures in prop::collection::vec(arb_gesture(), 0..40),
    ) {
        let mut session = session(5, 5);
        let mut confirmed: HashMap<CorrespondenceId, MappingStatus> = HashMap::new();
        for gesture in &gestures {
            let _ = session.apply(gesture);
            for corr in session.store().iter() {
                if let Some(previous) = confirmed.get(&corr.id) {
                    prop_assert_eq!(*previous, corr.status);
                }
                if corr.status.is_confirmed() {
                    confirmed.insert(corr.id.clone(), corr.status);
                }
            }
        }
    }

    #[test]
    fn reorders_never_touch_correspondences(
        source_len in 0usize..7,
        target_len in 0usize..7,
        reorders in prop::collection::vec(arb_reorder(), 0..30),
    ) {
        let mut session = session(source_len, target_len);
        session.apply(&Gesture::Connect {
            source: FieldId::sequential(Side::Source, 1),
            target: FieldId::sequential(Side::Target, 2),
        }).ok();
        let before = session.store().correspondences().to_vec();
        let names_before: Vec<(String, FieldId)> = session
            .registry()
            .source()
            .iter()
            .map(|f| (f.name.clone(), f.id.clone()))
            .collect();

        for gesture in &reorders {
            let _ = session.apply(gesture);
        }

        prop_assert_eq!(session.store().correspondences(), before.as_slice());
        for (name, id) in names_before {
            let field = session.registry().field(Side::Source, &id);
            prop_assert_eq!(field.map(|f| f.name.as_str()), Some(name.as_str()));
        }
        for side in [Side::Source, Side::Target] {
            for (idx, field) in session.registry().sequence(side).iter().enumerate() {
                prop_assert_eq!(field.sequence_index, idx);
            }
        }
    }

    #[test]
    fn seeding_twice_changes_nothing(
        source_len in 0usize..8,
        target_len in 0usize..8,
        gestures in prop::collection::vec(arb_gesture(), 0..10),
    ) {
        let mut session = session(source_len, target_len);
        prop_assert_eq!(session.store().len(), source_len.min(target_len));
        for gesture in &gestures {
            let _ = session.apply(gesture);
        }
        let before = session.store().correspondences().to_vec();
        prop_assert!(session.seed().is_empty());
        prop_assert_eq!(session.store().correspondences(), before.as_slice());
    }

    #[test]
    fn clear_suggestions_removes_exactly_the_suggested(
        gestures in prop::collection::vec(arb_gesture(), 0..30),
    ) {
        let mut session = session(5, 5);
        for gesture in &gestures {
            let _ = session.apply(gesture);
        }
        let expected: Vec<_> = session
            .store()
            .iter()
            .filter(|c| c.status != MappingStatus::Suggested)
            .cloned()
            .collect();
        let suggested = session.store().count_with_status(MappingStatus::Suggested);

        prop_assert_eq!(session.clear_suggestions(), suggested);
        prop_assert_eq!(session.store().correspondences(), expected.as_slice());
    }

    #[test]
    fn rejected_gestures_leave_state_unchanged(
        gestures in prop::collection::vec(arb_gesture(), 0..30),
    ) {
        let mut session = session(4, 4);
        for gesture in &gestures {
            let store_before = session.store().correspondences().to_vec();
            let source_before = session.registry().source().clone();
            let target_before = session.registry().target().clone();
            if session.apply(gesture).is_err() {
                prop_assert_eq!(session.store().correspondences(), store_before.as_slice());
                prop_assert_eq!(session.registry().source(), &source_before);
                prop_assert_eq!(session.registry().target(), &target_before);
            }
        }
    }
}
