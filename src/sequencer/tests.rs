//! Sequencer Tests
//!
//! Worked menu-editing scenarios plus the ordering invariants, checked after
//! every operation in a scripted editing session.

use super::*;
use crate::domain::{CategoryMarker, DomainError, MenuItem};

fn item(id: &str) -> MenuItem {
    MenuItem::new(id.to_string(), id.to_uppercase())
}

fn placed(id: &str, order: i32) -> MenuItem {
    let mut item = item(id);
    item.display_order = order;
    item
}

fn placed_marker(id: &str, name: &str, order: i32) -> CategoryMarker {
    let mut marker = CategoryMarker::new(id.to_string(), name.to_string());
    marker.display_order = order;
    marker
}

fn abc() -> Sequence {
    build(vec![placed("a", 0), placed("b", 1), placed("c", 2)], vec![])
}

/// Ids in sequence order
fn ids(seq: &Sequence) -> Vec<&str> {
    seq.entries().iter().map(MenuEntry::id).collect()
}

/// Density and anchor correctness
fn assert_invariants(seq: &Sequence) {
    let mut last_item: Option<&str> = None;
    for (position, entry) in seq.entries().iter().enumerate() {
        assert_eq!(entry.display_order(), position as i32, "order at {}", position);
        match entry {
            MenuEntry::MenuItem(item) => last_item = Some(&item.id),
            MenuEntry::CategoryMarker(marker) => {
                assert_eq!(marker.anchor_item_id.as_deref(), last_item, "anchor of {}", marker.id)
            }
        }
    }
}

#[test]
fn test_insert_marker_after_item() {
    let seq = insert_marker(&abc(), "m1".to_string(), "Coffee".to_string(), MarkerPosition::After("a".to_string())).unwrap();

    assert_eq!(ids(&seq), vec!["a", "m1", "b", "c"]);
    let marker = seq.marker("m1").unwrap();
    assert_eq!(marker.name, "Coffee");
    assert_eq!(marker.display_order, 1);
    assert_eq!(marker.anchor_item_id.as_deref(), Some("a"));
    assert_eq!(seq.menu_item("b").unwrap().display_order, 2);
    assert_eq!(seq.menu_item("c").unwrap().display_order, 3);
}

#[test]
fn test_move_marker_to_end() {
    let seq = insert_marker(&abc(), "m1".to_string(), "Coffee".to_string(), MarkerPosition::After("a".to_string())).unwrap();
    let moved = reorder(&seq, 1, 3).unwrap();

    assert_eq!(ids(&moved), vec!["a", "b", "c", "m1"]);
    let marker = moved.marker("m1").unwrap();
    assert_eq!(marker.display_order, 3);
    assert_eq!(marker.anchor_item_id.as_deref(), Some("c"));
}

#[test]
fn test_removing_anchor_item_unanchors_marker() {
    let seq = insert_marker(&abc(), "m1".to_string(), "Coffee".to_string(), MarkerPosition::After("a".to_string())).unwrap();
    let removed = remove_menu_item(&seq, "a").unwrap();

    assert_eq!(ids(&removed), vec!["m1", "b", "c"]);
    let marker = removed.marker("m1").unwrap();
    assert_eq!(marker.display_order, 0);
    assert_eq!(marker.anchor_item_id, None);
    assert_invariants(&removed);
}

#[test]
fn test_empty_name_marker_in_empty_sequence() {
    let seq = insert_marker(&Sequence::new(), "m1".to_string(), String::new(), MarkerPosition::Start).unwrap();

    assert_eq!(seq.len(), 1);
    let marker = seq.marker("m1").unwrap();
    assert_eq!(marker.name, "");
    assert_eq!(marker.display_order, 0);
    assert_eq!(marker.anchor_item_id, None);
}

#[test]
fn test_remove_unknown_item_leaves_sequence() {
    let seq = build(vec![placed("a", 0), placed("b", 1)], vec![]);
    let before = seq.clone();

    let err = remove_menu_item(&seq, "nonexistent-id").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
    assert_eq!(seq, before);
    assert_eq!(ids(&seq), vec!["a", "b"]);
}

#[test]
fn test_remove_marker_densifies() {
    let seq = build(vec![placed("a", 0), placed("b", 2)], vec![placed_marker("m1", "Tea", 1)]);
    let removed = remove_marker(&seq, "m1").unwrap();

    assert_eq!(ids(&removed), vec!["a", "b"]);
    assert_eq!(removed.menu_item("b").unwrap().display_order, 1);
}

#[test]
fn test_remove_marker_keeps_other_anchors() {
    let seq = build(
        vec![placed("a", 0), placed("b", 2)],
        vec![placed_marker("m1", "Tea", 1), placed_marker("m2", "Cake", 3)],
    );
    let removed = remove_marker(&seq, "m1").unwrap();

    assert_eq!(seq.marker("m2").unwrap().anchor_item_id, removed.marker("m2").unwrap().anchor_item_id);
    assert_eq!(removed.marker("m2").unwrap().display_order, 2);
}

#[test]
fn test_insert_marker_start_and_end() {
    let start = insert_marker(&abc(), "s".to_string(), "First".to_string(), MarkerPosition::Start).unwrap();
    assert_eq!(ids(&start), vec!["s", "a", "b", "c"]);
    assert_eq!(start.marker("s").unwrap().anchor_item_id, None);

    let end = insert_marker(&abc(), "e".to_string(), "Last".to_string(), MarkerPosition::End).unwrap();
    assert_eq!(ids(&end), vec!["a", "b", "c", "e"]);
    assert_eq!(end.marker("e").unwrap().anchor_item_id.as_deref(), Some("c"));
}

#[test]
fn test_insert_marker_after_unknown_item() {
    let seq = abc();
    let err = insert_marker(&seq, "m".to_string(), "X".to_string(), MarkerPosition::After("zzz".to_string())).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    // A marker id is not a valid anchor
    let with_marker = insert_marker(&seq, "m".to_string(), "X".to_string(), MarkerPosition::End).unwrap();
    let err = insert_marker(&with_marker, "n".to_string(), "Y".to_string(), MarkerPosition::After("m".to_string())).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn test_duplicate_ids_conflict() {
    let seq = abc();
    assert!(matches!(
        insert_menu_item(&seq, item("b"), None),
        Err(DomainError::Conflict(_))
    ));
    assert!(matches!(
        insert_marker(&seq, "a".to_string(), "Dup".to_string(), MarkerPosition::End),
        Err(DomainError::Conflict(_))
    ));
}

#[test]
fn test_insert_menu_item_positions() {
    let seq = abc();
    let appended = insert_menu_item(&seq, item("d"), None).unwrap();
    assert_eq!(ids(&appended), vec!["a", "b", "c", "d"]);

    let front = insert_menu_item(&seq, item("d"), Some(0)).unwrap();
    assert_eq!(ids(&front), vec!["d", "a", "b", "c"]);

    let at_len = insert_menu_item(&seq, item("d"), Some(3)).unwrap();
    assert_eq!(ids(&at_len), ids(&appended));

    assert_eq!(
        insert_menu_item(&seq, item("d"), Some(4)),
        Err(DomainError::IndexOutOfRange { index: 4, len: 3 })
    );
}

#[test]
fn test_insert_item_before_marker_takes_over_anchor() {
    let seq = build(vec![placed("a", 0), placed("b", 2)], vec![placed_marker("m1", "Tea", 1)]);
    let inserted = insert_menu_item(&seq, item("x"), Some(1)).unwrap();

    assert_eq!(ids(&inserted), vec!["a", "x", "m1", "b"]);
    assert_eq!(inserted.marker("m1").unwrap().anchor_item_id.as_deref(), Some("x"));
}

#[test]
fn test_reorder_marker_to_front_unanchors() {
    let seq = insert_marker(&abc(), "m1".to_string(), "Coffee".to_string(), MarkerPosition::End).unwrap();
    let moved = reorder(&seq, 3, 0).unwrap();

    assert_eq!(ids(&moved), vec!["m1", "a", "b", "c"]);
    assert_eq!(moved.marker("m1").unwrap().anchor_item_id, None);
}

#[test]
fn test_reorder_item_reanchors_markers() {
    let seq = build(
        vec![placed("a", 0), placed("b", 2), placed("c", 3)],
        vec![placed_marker("m1", "Tea", 1)],
    );
    // Drag "a" below the marker: the marker now leads the menu
    let moved = reorder(&seq, 0, 1).unwrap();

    assert_eq!(ids(&moved), vec!["m1", "a", "b", "c"]);
    assert_eq!(moved.marker("m1").unwrap().anchor_item_id, None);
    assert_invariants(&moved);
}

#[test]
fn test_reorder_same_index_is_identity() {
    let seq = abc();
    assert_eq!(reorder(&seq, 1, 1).unwrap(), seq);
}

#[test]
fn test_reorder_out_of_range() {
    let seq = abc();
    let before = seq.clone();
    assert_eq!(reorder(&seq, 3, 0), Err(DomainError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(reorder(&seq, 0, 3), Err(DomainError::IndexOutOfRange { index: 3, len: 3 }));
    assert!(reorder(&Sequence::new(), 0, 0).is_err());
    assert_eq!(seq, before);
}

#[test]
fn test_rename_marker() {
    let seq = insert_marker(&abc(), "m1".to_string(), "Cofee".to_string(), MarkerPosition::After("b".to_string())).unwrap();
    let renamed = rename_marker(&seq, "m1", "Coffee".to_string()).unwrap();

    assert_eq!(renamed.marker("m1").unwrap().name, "Coffee");
    assert_eq!(ids(&renamed), ids(&seq));
    assert_eq!(renamed.markers()[0].anchor_item_id, seq.markers()[0].anchor_item_id);

    let cleared = rename_marker(&renamed, "m1", String::new()).unwrap();
    assert_eq!(cleared.marker("m1").unwrap().name, "");

    assert!(matches!(rename_marker(&seq, "a", "Nope".to_string()), Err(DomainError::NotFound(_))));
}

#[test]
fn test_remove_marker_rejects_item_id() {
    let seq = abc();
    assert!(matches!(remove_marker(&seq, "a"), Err(DomainError::NotFound(_))));
    assert!(matches!(remove_menu_item(&Sequence::new(), "a"), Err(DomainError::NotFound(_))));
}

#[test]
fn test_build_tie_break_items_first() {
    let seq = build(
        vec![placed("a", 0), placed("b", 1)],
        vec![placed_marker("m1", "Tea", 1)],
    );
    assert_eq!(ids(&seq), vec!["a", "b", "m1"]);
    assert_eq!(seq.marker("m1").unwrap().anchor_item_id.as_deref(), Some("b"));
}

#[test]
fn test_build_densifies_sparse_orders() {
    let seq = build(
        vec![placed("b", 30), placed("a", 10)],
        vec![placed_marker("m1", "Tea", 20), placed_marker("m0", "Top", -5)],
    );
    assert_eq!(ids(&seq), vec!["m0", "a", "m1", "b"]);
    assert_invariants(&seq);
}

#[test]
fn test_build_round_trip() {
    let seq = build(
        vec![placed("a", 0), placed("b", 2), placed("c", 4)],
        vec![placed_marker("m1", "Tea", 1), placed_marker("m2", "Cake", 3)],
    );
    let rebuilt = build(seq.items(), seq.markers());
    assert_eq!(rebuilt, seq);
}

#[test]
fn test_sections() {
    let seq = build(
        vec![placed("a", 0), placed("b", 2), placed("c", 3)],
        vec![placed_marker("m1", "Tea", 1), placed_marker("m2", "Empty", 4)],
    );
    let sections = seq.sections();

    assert_eq!(sections.len(), 3);
    assert!(sections[0].marker.is_none());
    assert_eq!(sections[0].items.len(), 1);
    assert_eq!(sections[1].marker.as_ref().unwrap().name, "Tea");
    let tea: Vec<&str> = sections[1].items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(tea, vec!["b", "c"]);
    assert!(sections[2].items.is_empty());
}

#[test]
fn test_sections_start_with_marker() {
    let seq = insert_marker(&abc(), "m".to_string(), "All".to_string(), MarkerPosition::Start).unwrap();
    let sections = seq.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].items.len(), 3);
}

#[test]
fn test_entry_serialization_is_tagged() {
    let seq = insert_marker(&build(vec![placed("a", 0)], vec![]), "m".to_string(), "Tea".to_string(), MarkerPosition::End).unwrap();
    let json = serde_json::to_value(&seq).unwrap();

    assert_eq!(json[0]["kind"], "menu_item");
    assert_eq!(json[1]["kind"], "category_marker");
    assert_eq!(json[1]["anchor_item_id"], "a");
    assert_eq!(json[1]["display_order"], 1);
}

/// A scripted editing session; invariants are checked after every step and
/// replaying the script gives the identical result.
#[test]
fn test_editing_session_invariants_and_determinism() {
    fn session() -> Vec<Sequence> {
        let mut history = vec![build(
            vec![placed("a", 0), placed("b", 1), placed("c", 2), placed("d", 3)],
            vec![],
        )];
        let steps: Vec<Box<dyn Fn(&Sequence) -> Sequence>> = vec![
            Box::new(|s: &Sequence| insert_marker(s, "m1".to_string(), "Hot".to_string(), MarkerPosition::Start).unwrap()),
            Box::new(|s: &Sequence| insert_marker(s, "m2".to_string(), "Cold".to_string(), MarkerPosition::After("b".to_string())).unwrap()),
            Box::new(|s: &Sequence| reorder(s, 5, 1).unwrap()),
            Box::new(|s: &Sequence| reorder(s, 0, 5).unwrap()),
            Box::new(|s: &Sequence| remove_menu_item(s, "b").unwrap()),
            Box::new(|s: &Sequence| insert_menu_item(s, item("e"), Some(2)).unwrap()),
            Box::new(|s: &Sequence| insert_marker(s, "m3".to_string(), String::new(), MarkerPosition::End).unwrap()),
            Box::new(|s: &Sequence| rename_marker(s, "m3", "Dessert".to_string()).unwrap()),
            Box::new(|s: &Sequence| remove_marker(s, "m2").unwrap()),
            Box::new(|s: &Sequence| reorder(s, 4, 0).unwrap()),
        ];
        for step in &steps {
            let next = step(history.last().unwrap());
            history.push(next);
        }
        history
    }

    let first = session();
    for seq in &first {
        assert_invariants(seq);
        assert_eq!(build(seq.items(), seq.markers()), *seq);
    }
    assert_eq!(first, session());
}

#[test]
fn test_reorder_is_permutation() {
    let seq = build(
        vec![placed("a", 0), placed("b", 2), placed("c", 3)],
        vec![placed_marker("m1", "Tea", 1), placed_marker("m2", "Cake", 4)],
    );
    let mut original: Vec<&str> = ids(&seq);
    original.sort();

    for from in 0..seq.len() {
        for to in 0..seq.len() {
            let moved = reorder(&seq, from, to).unwrap();
            assert_invariants(&moved);
            assert_eq!(moved.get(to).unwrap().id(), seq.get(from).unwrap().id());

            let mut after: Vec<&str> = ids(&moved);
            after.sort();
            assert_eq!(after, original);
            for entry in moved.entries() {
                if let MenuEntry::CategoryMarker(marker) = entry {
                    assert_eq!(marker.name, seq.marker(&marker.id).unwrap().name);
                }
            }
        }
    }
}

#[test]
fn test_failed_operations_leave_input_untouched() {
    let seq = build(vec![placed("a", 0), placed("b", 2)], vec![placed_marker("m1", "Tea", 1)]);
    let before = seq.clone();

    assert!(insert_menu_item(&seq, item("z"), Some(9)).is_err());
    assert!(insert_menu_item(&seq, item("a"), None).is_err());
    assert!(remove_menu_item(&seq, "m1").is_err());
    assert!(insert_marker(&seq, "m1".to_string(), "X".to_string(), MarkerPosition::Start).is_err());
    assert!(insert_marker(&seq, "n".to_string(), "X".to_string(), MarkerPosition::After("q".to_string())).is_err());
    assert!(remove_marker(&seq, "q").is_err());
    assert!(reorder(&seq, 0, 7).is_err());
    assert!(rename_marker(&seq, "q", "X".to_string()).is_err());

    assert_eq!(seq, before);
}
