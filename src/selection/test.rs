use super::*;

use std::collections::HashSet;

fn ids(v: &[&str]) -> Vec<RowId> {
    v.iter().map(|s| s.to_string()).collect()
}

fn id_set(v: &[&str]) -> HashSet<RowId> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn toggle_row_multi_adds_and_removes() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("r1");
    sel.toggle_row("r3");
    assert!(sel.is_selected("r1"));
    assert!(sel.is_selected("r3"));
    assert!(!sel.is_selected("r2"));

    sel.toggle_row("r1");
    assert!(!sel.is_selected("r1"));
    assert_eq!(sel.len(), 1);
}

#[test]
fn toggle_row_single_replaces() {
    let mut sel = SelectionModel::new(SelectionMode::Single);
    sel.toggle_row("r1");
    sel.toggle_row("r2");
    assert!(!sel.is_selected("r1"));
    assert!(sel.is_selected("r2"));
    assert_eq!(sel.len(), 1);

    // Toggling the selected row deselects it.
    sel.toggle_row("r2");
    assert!(sel.is_empty());
}

#[test]
fn toggle_all_scopes_to_visible_ids() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    // 100-row dataset filtered down to 10 visible: only those 10 select.
    let visible: Vec<RowId> = (0..10).map(|i| format!("r{i}")).collect();
    sel.toggle_all(&visible);

    assert_eq!(sel.len(), 10);
    assert!(sel.is_selected("r0"));
    assert!(!sel.is_selected("r57"));
}

#[test]
fn toggle_all_when_all_selected_clears_visible_only() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("offpage");
    let visible = ids(&["r1", "r2"]);
    sel.toggle_all(&visible);
    assert_eq!(sel.len(), 3);

    sel.toggle_all(&visible);
    assert!(!sel.is_selected("r1"));
    assert!(!sel.is_selected("r2"));
    assert!(sel.is_selected("offpage"));
}

#[test]
fn toggle_all_partial_selection_completes() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("r1");
    sel.toggle_all(&ids(&["r1", "r2", "r3"]));
    assert_eq!(sel.len(), 3);
}

#[test]
fn toggle_all_empty_visible_is_noop() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("r1");
    sel.toggle_all(&[]);
    assert!(sel.is_selected("r1"));
}

#[test]
fn toggle_all_ignored_in_single_mode() {
    let mut sel = SelectionModel::new(SelectionMode::Single);
    sel.toggle_all(&ids(&["r1", "r2"]));
    assert!(sel.is_empty());
}

#[test]
fn set_selection_single_keeps_at_most_one() {
    let mut sel = SelectionModel::new(SelectionMode::Single);
    sel.set_selection(id_set(&["r1", "r2", "r3"]));
    assert_eq!(sel.len(), 1);
}

#[test]
fn retain_ids_prunes_stale_selection() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("r1");
    sel.toggle_row("r2");

    // Dataset replaced with {r2, r3}: r1 is stale.
    let changed = sel.retain_ids(&id_set(&["r2", "r3"]));
    assert!(changed);
    assert_eq!(sel.selected_ids(), &id_set(&["r2"]));

    let changed = sel.retain_ids(&id_set(&["r2", "r3"]));
    assert!(!changed);
}

#[test]
fn summary_classifies_none_some_all() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    let visible = ids(&["a", "b", "c"]);

    assert_eq!(sel.summary(&visible).state, SelectionState::None);

    sel.toggle_row("b");
    let s = sel.summary(&visible);
    assert_eq!(s.selected_count, 1);
    assert_eq!(s.total_count, 3);
    assert_eq!(s.state, SelectionState::Some);

    sel.toggle_all(&visible);
    let s = sel.summary(&visible);
    assert_eq!(s.selected_count, 3);
    assert_eq!(s.state, SelectionState::All);
}

#[test]
fn summary_of_empty_visible_is_none() {
    let sel = SelectionModel::new(SelectionMode::Multi);
    let s = sel.summary(&[]);
    assert_eq!(s.state, SelectionState::None);
    assert_eq!(s.total_count, 0);
}

#[test]
fn selection_survives_reordering_of_visible_ids() {
    let mut sel = SelectionModel::new(SelectionMode::Multi);
    sel.toggle_row("r1");
    sel.toggle_row("r3");

    // A sort permutes positions; identity keying is untouched.
    let resorted = ids(&["r3", "r2", "r1"]);
    assert!(sel.is_selected("r1"));
    assert!(sel.is_selected("r3"));
    assert_eq!(sel.summary(&resorted).selected_count, 2);
}
