//! Sort intent: an ordered descriptor of (column, direction) pairs with
//! tri-state toggling. Comparators live with the column definitions; the row
//! model applies them.

/// Sorting direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header affordance glyph
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// One column's position in the sort order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Ordered sort intent. No column appears twice; earlier entries take
/// precedence when the row model compares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortDescriptor {
    entries: Vec<SortEntry>,
}

impl SortDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(column_id: &str, direction: SortDirection) -> Self {
        Self {
            entries: vec![SortEntry {
                column_id: column_id.to_string(),
                direction,
            }],
        }
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direction of `column_id` within the descriptor, if present
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|e| e.column_id == column_id)
            .map(|e| e.direction)
    }

    /// 1-based precedence of `column_id`, for multi-sort header badges
    pub fn precedence_of(&self, column_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.column_id == column_id)
            .map(|i| i + 1)
    }

    /// Cycle a column through absent → ascending → descending → absent.
    ///
    /// With `multi_sort` off, the whole descriptor is replaced so at most one
    /// column is sorted. With it on, the column's entry is appended, cycled,
    /// or removed in place without disturbing the other entries.
    pub fn toggle(&mut self, column_id: &str, multi_sort: bool) {
        let existing = self.entries.iter().position(|e| e.column_id == column_id);

        if !multi_sort {
            let next = match existing.map(|i| self.entries[i].direction) {
                None => Some(SortDirection::Ascending),
                Some(SortDirection::Ascending) => Some(SortDirection::Descending),
                Some(SortDirection::Descending) => None,
            };
            self.entries.clear();
            if let Some(direction) = next {
                self.entries.push(SortEntry {
                    column_id: column_id.to_string(),
                    direction,
                });
            }
            return;
        }

        match existing {
            None => self.entries.push(SortEntry {
                column_id: column_id.to_string(),
                direction: SortDirection::Ascending,
            }),
            Some(i) => match self.entries[i].direction {
                SortDirection::Ascending => {
                    self.entries[i].direction = SortDirection::Descending;
                }
                SortDirection::Descending => {
                    self.entries.remove(i);
                }
            },
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries whose column no longer exists or is no longer sortable.
    pub fn retain_columns<F: Fn(&str) -> bool>(&mut self, keep: F) {
        self.entries.retain(|e| keep(&e.column_id));
    }
}
