//! Slot-sequence transforms: resize reconciliation and per-slot edits.
//!
//! All functions mutate the sequence in place and never fail. Unknown ids are
//! ignored because callers derive them from the same state.

use crate::domain::{GridSpec, Language, ShotContent, ShotSlot};

/// Bring `slots` to the size of `spec`.
///
/// Surviving positions are kept as-is, including content and pending state.
/// New positions get fresh slots (`id = position + 1`, shot type cycled).
/// Shrinking drops the tail for good. Returns `true` if the length changed.
pub fn reconcile<S: AsRef<str>>(
    slots: &mut Vec<ShotSlot>,
    spec: &GridSpec,
    shot_type_cycle: &[S],
) -> bool {
    let target = spec.total_slots();
    if slots.len() == target {
        return false;
    }

    slots.truncate(target);
    let start = slots.len();
    slots.extend((start..target).map(|position| ShotSlot::fresh(position, shot_type_cycle)));
    true
}

/// Replace the shot type of the slot with `id`.
pub fn set_shot_type(slots: &mut [ShotSlot], id: u32, new_type: &str) {
    if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
        slot.shot_type = new_type.to_string();
    }
}

/// Set one language of the slot's content, creating an empty counterpart if needed.
pub fn set_shot_content(slots: &mut [ShotSlot], id: u32, language: Language, text: &str) {
    if let Some(slot) = slots.iter_mut().find(|slot| slot.id == id) {
        slot.content.get_or_insert_with(ShotContent::default).set(language, text);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{SHOT_TYPES, grid};

    fn grid_of(rows: u32, cols: u32) -> GridSpec {
        grid::resolve(rows, cols, format!("{}x{}", rows, cols))
    }

    #[test]
    fn empty_to_three_by_three_assigns_sequential_ids_and_cycled_types() {
        let mut slots = Vec::new();
        assert!(reconcile(&mut slots, &grid_of(3, 3), &SHOT_TYPES));

        assert_eq!(slots.len(), 9);
        for (index, slot) in slots.iter().enumerate() {
            assert_eq!(slot.id, index as u32 + 1);
            assert_eq!(slot.shot_type, SHOT_TYPES[index % SHOT_TYPES.len()]);
            assert!(slot.content.is_none());
            assert!(!slot.is_pending);
        }
    }

    #[test]
    fn matching_length_is_a_no_op() {
        let mut slots = Vec::new();
        reconcile(&mut slots, &grid_of(2, 2), &SHOT_TYPES);
        set_shot_type(&mut slots, 1, "Close-Up");
        let before = slots.clone();

        assert!(!reconcile(&mut slots, &grid_of(1, 4), &SHOT_TYPES));
        assert_eq!(slots, before);
    }

    #[test]
    fn shrinking_then_growing_loses_truncated_content() {
        let mut slots = Vec::new();
        reconcile(&mut slots, &grid_of(3, 3), &SHOT_TYPES);
        set_shot_content(&mut slots, 2, Language::En, "kept");
        set_shot_content(&mut slots, 5, Language::En, "lost");

        reconcile(&mut slots, &grid_of(2, 2), &SHOT_TYPES);
        assert_eq!(slots.len(), 4);

        reconcile(&mut slots, &grid_of(3, 3), &SHOT_TYPES);
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[1].content.as_ref().unwrap().primary, "kept");
        for slot in &slots[4..] {
            assert!(slot.content.is_none(), "slot {} should be fresh", slot.id);
            assert_eq!(slot.shot_type, SHOT_TYPES[(slot.id as usize - 1) % SHOT_TYPES.len()]);
        }
    }

    #[test]
    fn surviving_slots_keep_pending_state() {
        let mut slots = Vec::new();
        reconcile(&mut slots, &grid_of(2, 2), &SHOT_TYPES);
        slots[0].is_pending = true;

        reconcile(&mut slots, &grid_of(3, 3), &SHOT_TYPES);
        assert!(slots[0].is_pending);
    }

    #[test]
    fn set_shot_type_ignores_unknown_id() {
        let mut slots = Vec::new();
        reconcile(&mut slots, &grid_of(2, 2), &SHOT_TYPES);
        let before = slots.clone();

        set_shot_type(&mut slots, 42, "Close-Up");
        assert_eq!(slots, before);

        set_shot_type(&mut slots, 3, "Close-Up");
        assert_eq!(slots[2].shot_type, "Close-Up");
        assert_eq!(slots[0], before[0]);
    }

    #[test]
    fn set_shot_content_creates_empty_counterpart() {
        let mut slots = Vec::new();
        reconcile(&mut slots, &grid_of(1, 2), &SHOT_TYPES);
        slots[0].is_pending = true;

        set_shot_content(&mut slots, 1, Language::Zh, "雨中街道");
        let content = slots[0].content.as_ref().unwrap();
        assert_eq!(content.secondary, "雨中街道");
        assert_eq!(content.primary, "");
        assert!(slots[0].is_pending);
        assert_eq!(slots[0].shot_type, SHOT_TYPES[0]);
    }

    proptest! {
        #[test]
        fn reconcile_matches_grid_and_preserves_prefix(
            first in (1u32..6, 1u32..6),
            second in (1u32..6, 1u32..6),
        ) {
            let mut slots = Vec::new();
            reconcile(&mut slots, &grid_of(first.0, first.1), &SHOT_TYPES);
            for id in 1..=slots.len() as u32 {
                set_shot_content(&mut slots, id, Language::En, &format!("shot {}", id));
            }
            let before = slots.clone();

            let spec = grid_of(second.0, second.1);
            reconcile(&mut slots, &spec, &SHOT_TYPES);

            prop_assert_eq!(slots.len(), spec.total_slots());
            for (index, slot) in slots.iter().enumerate() {
                prop_assert_eq!(slot.id, index as u32 + 1);
                match before.get(index) {
                    Some(previous) => prop_assert_eq!(slot, previous),
                    None => prop_assert!(slot.content.is_none()),
                }
            }
        }

        #[test]
        fn content_edit_never_touches_other_language(text in ".{0,40}", english in any::<bool>()) {
            let mut slots = Vec::new();
            reconcile(&mut slots, &grid_of(1, 1), &SHOT_TYPES);
            set_shot_content(&mut slots, 1, Language::En, "original en");
            set_shot_content(&mut slots, 1, Language::Zh, "original zh");

            let (edited, untouched) =
                if english { (Language::En, Language::Zh) } else { (Language::Zh, Language::En) };
            set_shot_content(&mut slots, 1, edited, &text);

            let content = slots[0].content.as_ref().unwrap();
            prop_assert_eq!(content.get(edited), text.as_str());
            prop_assert_eq!(content.get(untouched), format!("original {}", untouched.code()));
        }
    }
}
