use super::*;

#[derive(Debug)]
struct Run {
    name: String,
    status: String,
}

fn name_cell(r: &Run) -> String {
    r.name.clone()
}

fn status_cell(r: &Run) -> String {
    r.status.clone()
}

fn defs() -> Vec<ColumnDef<Run>> {
    vec![
        ColumnDef::selection(|_| " ".to_string()),
        ColumnDef::new("name", "Name", name_cell).with_sizes(4, 20, 40),
        ColumnDef::new("status", "Status", status_cell).with_sizes(6, 10, 16),
        ColumnDef::actions("", |_| "⋯".to_string()),
    ]
}

#[test]
fn layout_declaration_order_by_default() {
    let defs = defs();
    let layout = layout_columns(
        &defs,
        &ColumnOrder::new(),
        &ColumnVisibility::new(),
        &ColumnSizing::new(),
    );
    let ids: Vec<&str> = layout.iter().map(|c| defs[c.def_index].id.as_str()).collect();
    assert_eq!(ids, vec!["__select", "name", "status", "__actions"]);
}

#[test]
fn layout_applies_order_permutation_between_pinned_edges() {
    let defs = defs();
    let order = ColumnOrder::from_ids(&["status", "name"]);
    let layout = layout_columns(&defs, &order, &ColumnVisibility::new(), &ColumnSizing::new());
    let ids: Vec<&str> = layout.iter().map(|c| defs[c.def_index].id.as_str()).collect();
    assert_eq!(ids, vec!["__select", "status", "name", "__actions"]);
}

#[test]
fn unordered_ids_append_in_declaration_order() {
    let order = ColumnOrder::from_ids(&["status"]);
    let declared = vec!["name".to_string(), "status".to_string(), "agent".to_string()];
    assert_eq!(
        order.apply(&declared),
        vec!["status".to_string(), "name".to_string(), "agent".to_string()]
    );
}

#[test]
fn order_drops_ids_for_missing_columns() {
    let order = ColumnOrder::from_ids(&["gone", "status"]);
    let declared = vec!["name".to_string(), "status".to_string()];
    assert_eq!(
        order.apply(&declared),
        vec!["status".to_string(), "name".to_string()]
    );
}

#[test]
fn with_moved_produces_new_permutation() {
    let declared = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let moved = ColumnOrder::new().with_moved(&declared, "c", 0);
    assert_eq!(moved.ids(), &["c".to_string(), "a".to_string(), "b".to_string()]);

    // Out-of-range target clamps to the end.
    let moved = ColumnOrder::new().with_moved(&declared, "a", 99);
    assert_eq!(moved.ids(), &["b".to_string(), "c".to_string(), "a".to_string()]);
}

#[test]
fn hidden_column_excluded_but_sizing_survives() {
    let defs = defs();
    let mut sizing = ColumnSizing::new();
    sizing.set("status", 12);

    let hidden = ColumnVisibility::new().with_toggled("status");
    let layout = layout_columns(&defs, &ColumnOrder::new(), &hidden, &sizing);
    let ids: Vec<&str> = layout.iter().map(|c| defs[c.def_index].id.as_str()).collect();
    assert_eq!(ids, vec!["__select", "name", "__actions"]);

    // Re-showing restores the prior width.
    let shown = hidden.with_toggled("status");
    let layout = layout_columns(&defs, &ColumnOrder::new(), &shown, &sizing);
    let status = layout
        .iter()
        .find(|c| defs[c.def_index].id == "status")
        .unwrap();
    assert_eq!(status.width, 12);
}

#[test]
fn resize_clamps_to_min() {
    let def = ColumnDef::new("name", "Name", name_cell).with_sizes(40, 50, 90);
    let sizing = ColumnSizing::new().resized(&def, -50);
    assert_eq!(sizing.get("name"), Some(40));
}

#[test]
fn resize_clamps_to_max() {
    let def = ColumnDef::new("name", "Name", name_cell).with_sizes(4, 10, 20);
    let sizing = ColumnSizing::new().resized(&def, 500);
    assert_eq!(sizing.get("name"), Some(20));
}

#[test]
fn resize_steps_from_current_override() {
    let def = ColumnDef::new("name", "Name", name_cell).with_sizes(4, 10, 40);
    let sizing = ColumnSizing::new().resized(&def, 5).resized(&def, 5);
    assert_eq!(sizing.get("name"), Some(20));
}

#[test]
fn normalize_collapses_inverted_bounds() {
    let mut def = ColumnDef::new("name", "Name", name_cell).with_sizes(30, 10, 20);
    def.normalize();
    assert_eq!(def.max_size, 30);
    assert_eq!(def.initial_size, 30);
}

#[test]
fn normalize_clamps_initial_into_range() {
    let mut def = ColumnDef::new("name", "Name", name_cell).with_sizes(10, 99, 20);
    def.normalize();
    assert_eq!(def.initial_size, 20);
}

#[test]
fn sizing_width_clamped_in_layout() {
    let defs = defs();
    let mut sizing = ColumnSizing::new();
    // A controlled caller can hand us an out-of-bounds width; layout clamps.
    sizing.set("status", 200);
    let layout = layout_columns(&defs, &ColumnOrder::new(), &ColumnVisibility::new(), &sizing);
    let status = layout
        .iter()
        .find(|c| defs[c.def_index].id == "status")
        .unwrap();
    assert_eq!(status.width, 16);
}

#[test]
fn synthetic_columns_are_not_data() {
    let defs = defs();
    assert!(!defs[0].is_data());
    assert!(!defs[3].is_data());
    assert!(defs[1].is_data());
    assert!(!defs[0].sortable);
    assert!(!defs[3].resizable);
}
