//! The row model: the ordered row set currently rendered, after external
//! filtering (the caller's job) and internal sorting, before windowing.
//! Row identity is derived here and everything row-keyed hangs off it.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use crate::column::ColumnDef;
use crate::sort::{SortDescriptor, SortDirection};
use crate::util::{parse_numeric, CellType};

/// Stable row identity. Selection and focus key off this, never off position.
pub type RowId = String;

/// Threshold for sorting with rayon instead of serially
const PARALLEL_THRESHOLD: usize = 10_000;

/// Maximum cells sampled when probing a column for the fallback comparator
const TYPE_PROBE_SAMPLE_SIZE: usize = 20;

/// Where row ids come from: an extractor over the row value, or the row's
/// position in the supplied array. Index-derived ids are only stable while
/// the dataset is append-only; callers with mutable datasets should extract.
#[derive(Debug)]
pub enum RowIdSource<T> {
    Index,
    Extract(fn(&T) -> String),
}

// Manual impls: a derive would demand `T: Clone`/`T: Copy`, but only fn
// pointers are stored.
impl<T> Clone for RowIdSource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RowIdSource<T> {}

impl<T> RowIdSource<T> {
    fn id_for(&self, row: &T, index: usize) -> RowId {
        match self {
            RowIdSource::Index => index.to_string(),
            RowIdSource::Extract(f) => f(row),
        }
    }
}

/// How one sort entry compares two rows once the column is resolved
enum ResolvedCompare<T> {
    Custom(fn(&T, &T) -> Ordering),
    Numeric(fn(&T) -> String),
    Text(fn(&T) -> String),
}

impl<T> ResolvedCompare<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        match self {
            ResolvedCompare::Custom(f) => f(a, b),
            ResolvedCompare::Numeric(accessor) => {
                let av = parse_numeric(&accessor(a)).unwrap_or(f64::NAN);
                let bv = parse_numeric(&accessor(b)).unwrap_or(f64::NAN);
                av.total_cmp(&bv)
            }
            ResolvedCompare::Text(accessor) => accessor(a).cmp(&accessor(b)),
        }
    }
}

/// Probe a column's accessor output to decide numeric vs text comparison.
/// Samples up to `TYPE_PROBE_SAMPLE_SIZE` non-empty cells.
fn probe_cell_type<T>(rows: &[T], accessor: fn(&T) -> String) -> CellType {
    let mut numeric_count = 0;
    let mut total_count = 0;

    for row in rows {
        if total_count >= TYPE_PROBE_SAMPLE_SIZE {
            break;
        }
        let cell = accessor(row);
        let trimmed = cell.trim();
        if !trimmed.is_empty() {
            total_count += 1;
            if parse_numeric(trimmed).is_some() {
                numeric_count += 1;
            }
        }
    }

    if total_count > 0 && numeric_count * 2 >= total_count {
        CellType::Numeric
    } else {
        CellType::Text
    }
}

/// The ordered, identity-indexed view over the caller's rows.
#[derive(Debug, Clone, Default)]
pub struct RowModel {
    /// Display position → index into the caller's row array
    source_indices: Vec<usize>,
    /// Display position → row id (parallel to `source_indices`)
    ids: Vec<RowId>,
    /// Row id → display position. Duplicate ids resolve last-write-wins.
    positions: HashMap<RowId, usize>,
}

impl RowModel {
    /// Build the row model: derive ids, apply the sort descriptor using the
    /// columns' comparators, and index by identity.
    pub fn build<T: Sync>(
        rows: &[T],
        defs: &[ColumnDef<T>],
        sort: &SortDescriptor,
        id_source: RowIdSource<T>,
    ) -> Self {
        let mut indices: Vec<usize> = (0..rows.len()).collect();

        let resolved: Vec<(ResolvedCompare<T>, SortDirection)> = sort
            .entries()
            .iter()
            .filter_map(|entry| {
                let def = defs
                    .iter()
                    .find(|d| d.id == entry.column_id && d.is_data() && d.sortable)?;
                let cmp = match def.compare {
                    Some(f) => ResolvedCompare::Custom(f),
                    None => match probe_cell_type(rows, def.accessor) {
                        CellType::Numeric => ResolvedCompare::Numeric(def.accessor),
                        CellType::Text => ResolvedCompare::Text(def.accessor),
                    },
                };
                Some((cmp, entry.direction))
            })
            .collect();

        if !resolved.is_empty() {
            let compare = |&a: &usize, &b: &usize| -> Ordering {
                for (cmp, direction) in &resolved {
                    let ord = cmp.compare(&rows[a], &rows[b]);
                    let ord = match direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            };

            if rows.len() >= PARALLEL_THRESHOLD {
                indices.par_sort_by(compare);
            } else {
                indices.sort_by(compare);
            }
        }

        let ids: Vec<RowId> = indices
            .iter()
            .map(|&i| id_source.id_for(&rows[i], i))
            .collect();

        let mut positions = HashMap::with_capacity(ids.len());
        for (pos, id) in ids.iter().enumerate() {
            if positions.insert(id.clone(), pos).is_some() {
                // Latent caller bug, tolerated: the later row wins the index.
                debug!(row_id = %id, "duplicate row id in dataset");
            }
        }

        Self {
            source_indices: indices,
            ids,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Index into the caller's row array for a display position
    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.source_indices.get(position).copied()
    }

    pub fn id_at(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Ids in display order
    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    pub fn id_set(&self) -> HashSet<RowId> {
        self.ids.iter().cloned().collect()
    }
}

#[cfg(test)]
mod test;
