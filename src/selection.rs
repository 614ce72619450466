//! Row selection keyed by row identity, never by position, so a selection
//! survives sorting and column changes and can be revalidated cheaply when
//! the dataset is replaced.

use std::collections::HashSet;

use crate::rowmodel::RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one row selected; toggling another row replaces it
    Single,
    /// Any number of rows selected
    #[default]
    Multi,
}

/// Aggregate selection state relative to the visible row model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Some,
    All,
}

/// What a header checkbox or bulk-action bar needs to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected_count: usize,
    pub total_count: usize,
    pub state: SelectionState,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl SelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> &HashSet<RowId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle one row. Single mode replaces the selection rather than adding.
    pub fn toggle_row(&mut self, id: &str) {
        if self.selected.contains(id) {
            self.selected.remove(id);
            return;
        }
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(id.to_string());
    }

    /// Page-scoped select-all over the ids currently in the row model.
    ///
    /// When every visible id is already selected, the visible ids are
    /// deselected (off-model ids a controlled caller put in stay put);
    /// otherwise all visible ids join the selection. Single mode ignores
    /// the operation entirely.
    pub fn toggle_all(&mut self, visible_ids: &[RowId]) {
        if self.mode == SelectionMode::Single || visible_ids.is_empty() {
            return;
        }

        let all_selected = visible_ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in visible_ids {
                self.selected.remove(id);
            }
        } else {
            for id in visible_ids {
                self.selected.insert(id.clone());
            }
        }
    }

    /// Replace the selection wholesale (controlled-mode intake). Single mode
    /// keeps at most one id.
    pub fn set_selection(&mut self, ids: HashSet<RowId>) {
        self.selected = ids;
        if self.mode == SelectionMode::Single && self.selected.len() > 1 {
            let keep = self.selected.iter().next().cloned();
            self.selected.clear();
            if let Some(id) = keep {
                self.selected.insert(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop ids absent from the new dataset. Returns true when anything was
    /// pruned, so the orchestrator knows to report a selection change.
    pub fn retain_ids(&mut self, valid: &HashSet<RowId>) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| valid.contains(id));
        self.selected.len() != before
    }

    /// Summary over the current row model's ids. Selected ids outside the
    /// visible set count toward neither bucket.
    pub fn summary(&self, visible_ids: &[RowId]) -> SelectionSummary {
        let total_count = visible_ids.len();
        let selected_count = visible_ids
            .iter()
            .filter(|id| self.selected.contains(id.as_str()))
            .count();

        let state = if selected_count == 0 {
            SelectionState::None
        } else if selected_count == total_count {
            SelectionState::All
        } else {
            SelectionState::Some
        };

        SelectionSummary {
            selected_count,
            total_count,
            state,
        }
    }
}

#[cfg(test)]
mod test;
