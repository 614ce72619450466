use super::*;

use crate::sort::SortDescriptor;

#[derive(Debug)]
struct Run {
    id: String,
    agent: String,
    duration: String,
}

fn run(id: &str, agent: &str, duration: &str) -> Run {
    Run {
        id: id.to_string(),
        agent: agent.to_string(),
        duration: duration.to_string(),
    }
}

fn run_id(r: &Run) -> String {
    r.id.clone()
}

fn agent_cell(r: &Run) -> String {
    r.agent.clone()
}

fn duration_cell(r: &Run) -> String {
    r.duration.clone()
}

fn defs() -> Vec<ColumnDef<Run>> {
    vec![
        ColumnDef::new("agent", "Agent", agent_cell),
        ColumnDef::new("duration", "Duration", duration_cell),
    ]
}

fn rows() -> Vec<Run> {
    vec![
        run("a", "planner", "30"),
        run("b", "executor", "7"),
        run("c", "critic", "120"),
    ]
}

#[test]
fn unsorted_model_preserves_input_order() {
    let rows = rows();
    let model = RowModel::build(&rows, &defs(), &SortDescriptor::new(), RowIdSource::Extract(run_id));
    assert_eq!(model.len(), 3);
    assert_eq!(model.id_at(0), Some("a"));
    assert_eq!(model.id_at(2), Some("c"));
    assert_eq!(model.source_index(1), Some(1));
}

#[test]
fn index_id_source_numbers_rows() {
    let rows = rows();
    let model = RowModel::build(&rows, &defs(), &SortDescriptor::new(), RowIdSource::Index);
    assert_eq!(model.id_at(0), Some("0"));
    assert_eq!(model.position_of("2"), Some(2));
}

#[test]
fn text_sort_orders_by_accessor() {
    let rows = rows();
    let sort = SortDescriptor::single("agent", SortDirection::Ascending);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.ids(), &["c".to_string(), "b".to_string(), "a".to_string()]);
}

#[test]
fn numeric_columns_sort_numerically_not_lexically() {
    let rows = rows();
    let sort = SortDescriptor::single("duration", SortDirection::Ascending);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    // Lexical order would put "120" before "30" and "7".
    assert_eq!(model.ids(), &["b".to_string(), "a".to_string(), "c".to_string()]);
}

#[test]
fn descending_reverses() {
    let rows = rows();
    let sort = SortDescriptor::single("duration", SortDirection::Descending);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.ids(), &["c".to_string(), "a".to_string(), "b".to_string()]);
}

#[test]
fn custom_comparator_wins_over_probe() {
    let rows = rows();
    let mut defs = defs();
    // Compare agents by string length instead of alphabetically.
    defs[0] = defs[0]
        .clone()
        .with_compare(|a, b| a.agent.len().cmp(&b.agent.len()));
    let sort = SortDescriptor::single("agent", SortDirection::Ascending);
    let model = RowModel::build(&rows, &defs, &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.ids(), &["c".to_string(), "a".to_string(), "b".to_string()]);
}

#[test]
fn multi_sort_breaks_ties_with_later_entries() {
    let rows = vec![
        run("a", "planner", "30"),
        run("b", "planner", "7"),
        run("c", "critic", "120"),
    ];
    let mut sort = SortDescriptor::new();
    sort.toggle("agent", true);
    sort.toggle("duration", true);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.ids(), &["c".to_string(), "b".to_string(), "a".to_string()]);
}

#[test]
fn sort_entry_for_unknown_column_is_ignored() {
    let rows = rows();
    let sort = SortDescriptor::single("nope", SortDirection::Ascending);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.id_at(0), Some("a"));
}

#[test]
fn duplicate_ids_last_write_wins() {
    let rows = vec![run("dup", "planner", "1"), run("dup", "critic", "2")];
    let model = RowModel::build(&rows, &defs(), &SortDescriptor::new(), RowIdSource::Extract(run_id));
    assert_eq!(model.len(), 2);
    assert_eq!(model.position_of("dup"), Some(1));
}

#[test]
fn empty_rows_build_empty_model() {
    let rows: Vec<Run> = Vec::new();
    let model = RowModel::build(&rows, &defs(), &SortDescriptor::new(), RowIdSource::Extract(run_id));
    assert!(model.is_empty());
    assert_eq!(model.id_at(0), None);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let rows = vec![
        run("a", "planner", "5"),
        run("b", "planner", "5"),
        run("c", "planner", "5"),
    ];
    let sort = SortDescriptor::single("agent", SortDirection::Ascending);
    let model = RowModel::build(&rows, &defs(), &sort, RowIdSource::Extract(run_id));
    assert_eq!(model.ids(), &["a".to_string(), "b".to_string(), "c".to_string()]);
}
