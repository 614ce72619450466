//! Column definitions and the two independent layout states over them:
//! sizing, and ordering/visibility. The derived visible-column list is what
//! the renderer and hit-testing consume.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::warn;

/// What a column is for. Selection markers pin left, row actions pin right;
/// both are excluded from reorder, resize, hide, and sort. Only `Data`
/// columns participate in layout interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Selection,
    Data,
    Action,
}

/// Per-column definition. `accessor` produces the cell text for a row;
/// `compare` orders two rows when this column sorts (falling back to a
/// numeric-aware comparison of accessor output when absent).
#[derive(Debug)]
pub struct ColumnDef<T> {
    pub id: String,
    pub title: String,
    pub accessor: fn(&T) -> String,
    pub compare: Option<fn(&T, &T) -> Ordering>,
    pub min_size: u16,
    pub max_size: u16,
    pub initial_size: u16,
    pub sortable: bool,
    pub hideable: bool,
    pub resizable: bool,
    pub role: ColumnRole,
}

// Manual impl: a derive would demand `T: Clone`, but only fn pointers and
// plain data are stored.
impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            accessor: self.accessor,
            compare: self.compare,
            min_size: self.min_size,
            max_size: self.max_size,
            initial_size: self.initial_size,
            sortable: self.sortable,
            hideable: self.hideable,
            resizable: self.resizable,
            role: self.role,
        }
    }
}

impl<T> ColumnDef<T> {
    pub fn new(id: &str, title: &str, accessor: fn(&T) -> String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            accessor,
            compare: None,
            min_size: 4,
            max_size: 80,
            initial_size: 16,
            sortable: true,
            hideable: true,
            resizable: true,
            role: ColumnRole::Data,
        }
    }

    /// Selection-marker column: fixed narrow width, pinned left.
    pub fn selection(accessor: fn(&T) -> String) -> Self {
        Self {
            id: "__select".to_string(),
            title: String::new(),
            accessor,
            compare: None,
            min_size: 3,
            max_size: 3,
            initial_size: 3,
            sortable: false,
            hideable: false,
            resizable: false,
            role: ColumnRole::Selection,
        }
    }

    /// Row-actions column: pinned right.
    pub fn actions(title: &str, accessor: fn(&T) -> String) -> Self {
        Self {
            id: "__actions".to_string(),
            title: title.to_string(),
            accessor,
            compare: None,
            min_size: 4,
            max_size: 24,
            initial_size: 8,
            sortable: false,
            hideable: false,
            resizable: false,
            role: ColumnRole::Action,
        }
    }

    pub fn with_compare(mut self, compare: fn(&T, &T) -> Ordering) -> Self {
        self.compare = Some(compare);
        self
    }

    pub fn with_sizes(mut self, min: u16, initial: u16, max: u16) -> Self {
        self.min_size = min;
        self.initial_size = initial;
        self.max_size = max;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn not_hideable(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn not_resizable(mut self) -> Self {
        self.resizable = false;
        self
    }

    pub fn is_data(&self) -> bool {
        self.role == ColumnRole::Data
    }

    /// Clamp a proposed width into `[min_size, max_size]`.
    pub fn clamp_width(&self, width: u16) -> u16 {
        width.clamp(self.min_size, self.max_size)
    }

    /// Resolve contradictory size bounds at init rather than at interaction
    /// time: `min > max` collapses to the min, initial clamps into range.
    pub fn normalize(&mut self) {
        if self.min_size > self.max_size {
            warn!(
                column = %self.id,
                min = self.min_size,
                max = self.max_size,
                "column min_size exceeds max_size; collapsing to min_size"
            );
            self.max_size = self.min_size;
        }
        self.initial_size = self.clamp_width(self.initial_size);
    }
}

/// `columnId → width` overrides. Entries survive hiding, so a re-shown
/// column comes back at its prior width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSizing {
    widths: HashMap<String, u16>,
}

impl ColumnSizing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<u16> {
        self.widths.get(id).copied()
    }

    pub fn set(&mut self, id: &str, width: u16) {
        self.widths.insert(id.to_string(), width);
    }

    /// Candidate sizing after resizing `def` by `delta` cells, clamped to the
    /// column's bounds. Current width comes from the override or the
    /// definition's initial size.
    pub fn resized<T>(&self, def: &ColumnDef<T>, delta: i32) -> Self {
        let current = self.get(&def.id).unwrap_or(def.initial_size);
        let proposed = (i32::from(current) + delta).clamp(0, i32::from(u16::MAX)) as u16;
        let mut next = self.clone();
        next.set(&def.id, def.clamp_width(proposed));
        next
    }
}

/// Permutation of data-column ids. Ids absent from the permutation render in
/// declaration order, appended after the ordered ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnOrder {
    ids: Vec<String>,
}

impl ColumnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Effective order over `declared` (declaration-ordered data-column ids):
    /// permutation entries that still exist, then unmentioned ids appended.
    pub fn apply(&self, declared: &[String]) -> Vec<String> {
        let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();
        let mut out: Vec<String> = self
            .ids
            .iter()
            .filter(|id| declared_set.contains(id.as_str()))
            .cloned()
            .collect();
        for id in declared {
            if !out.contains(id) {
                out.push(id.clone());
            }
        }
        out
    }

    /// Candidate order with `id` moved to `target_index` within the effective
    /// order. Out-of-range targets clamp to the end.
    pub fn with_moved(&self, declared: &[String], id: &str, target_index: usize) -> Self {
        let mut ids = self.apply(declared);
        if let Some(from) = ids.iter().position(|c| c == id) {
            let moved = ids.remove(from);
            let target = target_index.min(ids.len());
            ids.insert(target, moved);
        }
        Self { ids }
    }
}

/// Hidden-column set. Only hideable data columns may enter it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibility {
    hidden: HashSet<String>,
}

impl ColumnVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn hidden_ids(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    /// Candidate visibility with `id` toggled.
    pub fn with_toggled(&self, id: &str) -> Self {
        let mut next = self.clone();
        if !next.hidden.remove(id) {
            next.hidden.insert(id.to_string());
        }
        next
    }
}

/// One entry of the derived visible/ordered/sized column list. `def_index`
/// points back into the declared `ColumnDef` slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutColumn {
    pub def_index: usize,
    pub width: u16,
}

/// Derive the visible column list: selection columns pinned left in
/// declaration order, data columns per the order permutation with hidden ones
/// dropped, action columns pinned right.
pub fn layout_columns<T>(
    defs: &[ColumnDef<T>],
    order: &ColumnOrder,
    visibility: &ColumnVisibility,
    sizing: &ColumnSizing,
) -> Vec<LayoutColumn> {
    let width_of = |def: &ColumnDef<T>| {
        def.clamp_width(sizing.get(&def.id).unwrap_or(def.initial_size))
    };

    let mut out = Vec::with_capacity(defs.len());

    for (i, def) in defs.iter().enumerate() {
        if def.role == ColumnRole::Selection {
            out.push(LayoutColumn {
                def_index: i,
                width: width_of(def),
            });
        }
    }

    let declared: Vec<String> = defs
        .iter()
        .filter(|d| d.is_data())
        .map(|d| d.id.clone())
        .collect();
    for id in order.apply(&declared) {
        if visibility.is_hidden(&id) {
            continue;
        }
        if let Some(i) = defs.iter().position(|d| d.id == id) {
            out.push(LayoutColumn {
                def_index: i,
                width: width_of(&defs[i]),
            });
        }
    }

    for (i, def) in defs.iter().enumerate() {
        if def.role == ColumnRole::Action {
            out.push(LayoutColumn {
                def_index: i,
                width: width_of(def),
            });
        }
    }

    out
}

#[cfg(test)]
mod test;
