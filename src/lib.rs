//! A virtualized data-grid engine for terminal operations dashboards.
//!
//! `opsgrid` renders unbounded row sets with a bounded on-screen footprint:
//! only the rows intersecting the viewport (plus overscan) are materialized,
//! with spacer rows standing in for the rest. Around that core it coordinates
//! sort, selection, column layout, keyboard focus, and pagination, keeping
//! row-keyed state consistent while the dataset is replaced out from under it.
//!
//! The engine performs no I/O and owns no event loop. The host application
//! feeds it rows, key/mouse events, and a render area; the engine reports
//! every state change through callbacks so the host can either observe them
//! (uncontrolled mode) or own the canonical value itself (controlled mode).

pub mod column;
pub mod grid;
pub mod nav;
pub mod pagination;
pub mod rowmodel;
pub mod selection;
pub mod sort;
pub mod theme;
pub mod util;
pub mod window;

pub use column::{ColumnDef, ColumnOrder, ColumnRole, ColumnSizing, ColumnVisibility};
pub use grid::{Controlled, Grid, GridCallbacks, GridProps, RowIdSource};
pub use nav::{Focus, NavOutcome};
pub use pagination::{ClientPager, ClientPagination, CursorPagination, PaginationConfig, PaginationMode};
pub use rowmodel::{RowId, RowModel};
pub use selection::{SelectionModel, SelectionMode, SelectionState, SelectionSummary};
pub use sort::{SortDescriptor, SortDirection, SortEntry};
pub use theme::GridTheme;
pub use window::{ViewportWindow, WindowCalculator};
