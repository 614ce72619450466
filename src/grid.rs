//! The grid orchestrator: composes the row model, column layout, windowing,
//! selection, focus, and pagination behind one state surface, and routes
//! key/mouse events into them.
//!
//! Every state slice is either engine-owned (uncontrolled) or caller-owned
//! (controlled, supplied through [`Controlled`]). In both cases the engine
//! computes the candidate next value and reports it through the matching
//! callback exactly once per discrete event; the candidate is committed to
//! engine-owned state only when the slice is uncontrolled, and rendering
//! always reads the controlled value when one is present.

pub mod render;

use std::collections::HashSet;
use std::ops::Range;

use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::column::{
    layout_columns, ColumnDef, ColumnOrder, ColumnRole, ColumnSizing, ColumnVisibility,
    LayoutColumn,
};
use crate::nav::{self, Focus, NavOutcome};
use crate::pagination::{CursorPagination, PaginationConfig, PaginationMode};
use crate::rowmodel::{RowId, RowModel};
use crate::selection::{SelectionMode, SelectionModel, SelectionSummary};
use crate::sort::SortDescriptor;
use crate::theme::GridTheme;
use crate::window::WindowCalculator;

pub use crate::rowmodel::RowIdSource;

/// Skeleton rows shown while `is_loading`
const SKELETON_ROWS: usize = 8;

/// Rows scrolled per wheel notch
const WHEEL_SCROLL_STEP: usize = 3;

/// Static grid configuration, fixed for the instance lifetime.
pub struct GridProps<T> {
    pub columns: Vec<ColumnDef<T>>,
    pub id_source: RowIdSource<T>,
    pub selection_mode: SelectionMode,
    pub pagination: PaginationConfig,
    /// Estimated row height in cells before a row is measured
    pub row_height_estimate: usize,
    /// Measured height of a materialized row; `None` means every row is one
    /// cell tall and the estimate is never corrected
    pub row_height: Option<fn(&T) -> usize>,
    /// Extra rows materialized above and below the visible range
    pub overscan: usize,
    pub theme: GridTheme,
}

impl<T> GridProps<T> {
    pub fn new(columns: Vec<ColumnDef<T>>, id_source: RowIdSource<T>) -> Self {
        Self {
            columns,
            id_source,
            selection_mode: SelectionMode::Multi,
            pagination: PaginationConfig::default(),
            row_height_estimate: 1,
            row_height: None,
            overscan: 3,
            theme: GridTheme::default(),
        }
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_row_height(mut self, estimate: usize, measure: fn(&T) -> usize) -> Self {
        self.row_height_estimate = estimate;
        self.row_height = Some(measure);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_theme(mut self, theme: GridTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Caller-owned state fragments. A `Some` slice is controlled: the engine
/// renders the caller's value and only proposes changes through callbacks.
#[derive(Debug, Clone, Default)]
pub struct Controlled {
    pub sort: Option<SortDescriptor>,
    pub selection: Option<HashSet<RowId>>,
    pub visibility: Option<ColumnVisibility>,
    pub order: Option<ColumnOrder>,
    pub sizing: Option<ColumnSizing>,
    pub page_index: Option<usize>,
}

/// Change notifications. Each fires at most once per discrete state-changing
/// event, controlled or not, so a controlled caller can intercept the
/// candidate and an uncontrolled caller can observe the commit.
#[derive(Default)]
pub struct GridCallbacks {
    pub on_sort_change: Option<Box<dyn FnMut(&SortDescriptor)>>,
    pub on_selection_change: Option<Box<dyn FnMut(&HashSet<RowId>)>>,
    pub on_column_visibility_change: Option<Box<dyn FnMut(&ColumnVisibility)>>,
    pub on_column_order_change: Option<Box<dyn FnMut(&ColumnOrder)>>,
    pub on_column_sizing_change: Option<Box<dyn FnMut(&ColumnSizing)>>,
    pub on_row_click: Option<Box<dyn FnMut(&str)>>,
    pub on_row_activate: Option<Box<dyn FnMut(&str)>>,
    pub on_page_change: Option<Box<dyn FnMut(usize)>>,
    pub on_next_page: Option<Box<dyn FnMut()>>,
    pub on_previous_page: Option<Box<dyn FnMut()>>,
}

/// Modal pointer interaction in progress. While any drag is active, row
/// clicks are suppressed; release or capture loss always terminates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Drag {
    None,
    /// Header pressed but not yet moved: a release in place is a sort click,
    /// movement turns it into a reorder drag
    HeaderPress { def_index: usize, start_x: u16, multi: bool },
    Resize { def_index: usize, start_x: u16, current_x: u16 },
    Reorder { def_index: usize, current_x: u16 },
}

/// One rendered column's horizontal extent, captured at render time for
/// pointer hit-testing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnSpan {
    pub def_index: usize,
    pub x: u16,
    pub width: u16,
}

impl ColumnSpan {
    pub(crate) fn contains(&self, x: u16) -> bool {
        self.x <= x && x < self.x + self.width
    }

    pub(crate) fn right_edge(&self) -> u16 {
        self.x + self.width
    }
}

/// Geometry of the last render, used to translate pointer coordinates back
/// into grid targets. Purely presentational state; recomputed every render.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderLayout {
    pub valid: bool,
    pub header_y: u16,
    pub body: Rect,
    pub columns: Vec<ColumnSpan>,
    pub prev_hit: Option<Range<u16>>,
    pub next_hit: Option<Range<u16>>,
    /// Set only when a footer was rendered; without it the body owns the
    /// last line.
    pub footer_y: Option<u16>,
}

pub struct Grid<T> {
    props: GridProps<T>,
    rows: Vec<T>,
    is_loading: bool,

    // Engine-owned state slices (used when the matching Controlled slot is None)
    sort: SortDescriptor,
    selection: SelectionModel,
    visibility: ColumnVisibility,
    order: ColumnOrder,
    sizing: ColumnSizing,
    pager: PaginationMode,

    controlled: Controlled,
    callbacks: GridCallbacks,

    focus: Focus,
    focused: bool,
    scroll_offset: usize,
    window: WindowCalculator,
    row_model: RowModel,
    drag: Drag,
    pub(crate) layout: RenderLayout,
}

impl<T: Sync> Grid<T> {
    pub fn new(mut props: GridProps<T>) -> Self {
        for def in &mut props.columns {
            def.normalize();
        }
        let selection = SelectionModel::new(props.selection_mode);
        let pager = props.pagination.clone().resolve();
        let window = WindowCalculator::new(props.row_height_estimate);

        let mut grid = Self {
            rows: Vec::new(),
            is_loading: false,
            sort: SortDescriptor::new(),
            selection,
            visibility: ColumnVisibility::new(),
            order: ColumnOrder::new(),
            sizing: ColumnSizing::new(),
            pager,
            controlled: Controlled::default(),
            callbacks: GridCallbacks::default(),
            focus: Focus::Unfocused,
            focused: false,
            scroll_offset: 0,
            window,
            row_model: RowModel::default(),
            drag: Drag::None,
            layout: RenderLayout::default(),
            props,
        };
        grid.rebuild_row_model();
        grid
    }

    pub fn callbacks_mut(&mut self) -> &mut GridCallbacks {
        &mut self.callbacks
    }

    /// Caller-owned state intake. Mutating a slice to `Some` switches it to
    /// controlled mode; back to `None` returns ownership to the engine.
    pub fn controlled_mut(&mut self) -> &mut Controlled {
        &mut self.controlled
    }

    // ---- data intake -------------------------------------------------------

    /// Replace the dataset. Row-keyed state is revalidated: stale selection
    /// ids are dropped (reported through `on_selection_change`), focus is
    /// clamped into the new length, the client pager re-clamps its page.
    /// Column-keyed layout state is untouched.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.rebuild_row_model();

        let valid = self.row_model.id_set();
        let mut candidate = self.effective_selection_model();
        if candidate.retain_ids(&valid) {
            self.report_selection(candidate);
        }

        if let PaginationMode::Client(pager) = &mut self.pager {
            pager.clamp(self.row_model.len());
        }
        self.focus = self.focus.clamped(self.display_range().len());
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Update cursor-pagination affordances from a fresh server response.
    /// No-op outside cursor mode.
    pub fn set_cursor_pagination(&mut self, cursor: CursorPagination) {
        if let PaginationMode::Cursor(state) = &mut self.pager {
            *state = cursor;
        }
    }

    /// Whether the grid container holds input focus. Key events are ignored
    /// while it does not, checked per event, so inputs elsewhere in the host
    /// app are unaffected.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    // ---- effective state (controlled wins over owned) ----------------------

    pub fn sort(&self) -> &SortDescriptor {
        self.controlled.sort.as_ref().unwrap_or(&self.sort)
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        self.controlled.visibility.as_ref().unwrap_or(&self.visibility)
    }

    pub fn order(&self) -> &ColumnOrder {
        self.controlled.order.as_ref().unwrap_or(&self.order)
    }

    pub fn sizing(&self) -> &ColumnSizing {
        self.controlled.sizing.as_ref().unwrap_or(&self.sizing)
    }

    pub fn selected_ids(&self) -> HashSet<RowId> {
        match &self.controlled.selection {
            Some(set) => set.clone(),
            None => self.selection.selected_ids().clone(),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        match &self.controlled.selection {
            Some(set) => set.contains(id),
            None => self.selection.is_selected(id),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn row_model(&self) -> &RowModel {
        &self.row_model
    }

    /// Selection summary over the ids currently in view (current page in
    /// client-paging mode, the whole row model otherwise)
    pub fn selection_summary(&self) -> SelectionSummary {
        let model = self.effective_selection_model();
        model.summary(&self.display_ids())
    }

    fn effective_selection_model(&self) -> SelectionModel {
        match &self.controlled.selection {
            Some(set) => {
                let mut model = SelectionModel::new(self.props.selection_mode);
                model.set_selection(set.clone());
                model
            }
            None => self.selection.clone(),
        }
    }

    // ---- row model ---------------------------------------------------------

    fn rebuild_row_model(&mut self) {
        let sort = self.sort().clone();
        self.row_model = RowModel::build(&self.rows, &self.props.columns, &sort, self.props.id_source);
    }

    fn effective_page_index(&self) -> usize {
        match &self.pager {
            PaginationMode::Client(pager) => {
                self.controlled.page_index.unwrap_or(pager.page_index())
            }
            _ => 0,
        }
    }

    /// Range of row-model positions currently displayed
    pub(crate) fn display_range(&self) -> Range<usize> {
        match &self.pager {
            PaginationMode::Client(pager) => {
                pager.slice_at(self.effective_page_index(), self.row_model.len())
            }
            _ => 0..self.row_model.len(),
        }
    }

    pub(crate) fn display_len(&self) -> usize {
        self.display_range().len()
    }

    /// Row-model id for a display position
    pub(crate) fn display_id(&self, display_index: usize) -> Option<&str> {
        let range = self.display_range();
        let position = range.start.checked_add(display_index)?;
        if position >= range.end {
            return None;
        }
        self.row_model.id_at(position)
    }

    fn display_ids(&self) -> Vec<RowId> {
        let range = self.display_range();
        self.row_model.ids()[range].to_vec()
    }

    /// Caller row for a display position
    pub(crate) fn display_row(&self, display_index: usize) -> Option<&T> {
        let range = self.display_range();
        let position = range.start + display_index;
        if position >= range.end {
            return None;
        }
        self.rows.get(self.row_model.source_index(position)?)
    }

    /// Visible/ordered/sized column list, with a live resize-drag previewed
    pub(crate) fn visible_columns(&self) -> Vec<LayoutColumn> {
        let mut sizing = self.sizing().clone();
        if let Drag::Resize {
            def_index,
            start_x,
            current_x,
        } = self.drag
        {
            if let Some(def) = self.props.columns.get(def_index) {
                let delta = i32::from(current_x) - i32::from(start_x);
                sizing = sizing.resized(def, delta);
            }
        }
        layout_columns(&self.props.columns, self.order(), self.visibility(), &sizing)
    }

    // ---- state-changing operations ----------------------------------------

    /// Tri-state sort toggle for a column; ignored for non-sortable or
    /// synthetic columns.
    pub fn toggle_sort(&mut self, column_id: &str, multi_sort: bool) {
        let Some(def) = self.props.columns.iter().find(|d| d.id == column_id) else {
            return;
        };
        if !def.sortable || !def.is_data() {
            return;
        }

        let mut candidate = self.sort().clone();
        candidate.toggle(column_id, multi_sort);

        if let Some(cb) = self.callbacks.on_sort_change.as_mut() {
            cb(&candidate);
        }
        if self.controlled.sort.is_none() {
            self.sort = candidate;
        }
        self.rebuild_row_model();
        self.focus = self.focus.clamped(self.display_len());
    }

    pub fn clear_sort(&mut self) {
        let mut candidate = self.sort().clone();
        if candidate.is_empty() {
            return;
        }
        candidate.clear();
        if let Some(cb) = self.callbacks.on_sort_change.as_mut() {
            cb(&candidate);
        }
        if self.controlled.sort.is_none() {
            self.sort = candidate;
        }
        self.rebuild_row_model();
    }

    /// Toggle selection of one row by id
    pub fn toggle_row_selection(&mut self, id: &str) {
        let mut candidate = self.effective_selection_model();
        candidate.toggle_row(id);
        self.report_selection(candidate);
    }

    /// Page-scoped select-all over the rows currently in view
    pub fn toggle_select_all(&mut self) {
        let visible = self.display_ids();
        let mut candidate = self.effective_selection_model();
        let before = candidate.len();
        candidate.toggle_all(&visible);
        if candidate.len() != before {
            self.report_selection(candidate);
        }
    }

    fn report_selection(&mut self, candidate: SelectionModel) {
        if let Some(cb) = self.callbacks.on_selection_change.as_mut() {
            cb(candidate.selected_ids());
        }
        if self.controlled.selection.is_none() {
            self.selection = candidate;
        }
    }

    /// Toggle visibility of a hideable data column
    pub fn toggle_column_visibility(&mut self, column_id: &str) {
        let Some(def) = self.props.columns.iter().find(|d| d.id == column_id) else {
            return;
        };
        if !def.hideable || !def.is_data() {
            return;
        }

        let candidate = self.visibility().with_toggled(column_id);
        if let Some(cb) = self.callbacks.on_column_visibility_change.as_mut() {
            cb(&candidate);
        }
        if self.controlled.visibility.is_none() {
            self.visibility = candidate;
        }
    }

    /// Move a data column to `target_index` within the effective data-column
    /// order
    pub fn move_column(&mut self, column_id: &str, target_index: usize) {
        let Some(def) = self.props.columns.iter().find(|d| d.id == column_id) else {
            return;
        };
        if !def.is_data() {
            return;
        }

        let declared: Vec<String> = self
            .props
            .columns
            .iter()
            .filter(|d| d.is_data())
            .map(|d| d.id.clone())
            .collect();
        let candidate = self.order().with_moved(&declared, column_id, target_index);

        if let Some(cb) = self.callbacks.on_column_order_change.as_mut() {
            cb(&candidate);
        }
        if self.controlled.order.is_none() {
            self.order = candidate;
        }
    }

    /// Resize a resizable data column by `delta` cells, clamped to its bounds
    pub fn resize_column(&mut self, column_id: &str, delta: i32) {
        let Some(def) = self.props.columns.iter().find(|d| d.id == column_id) else {
            return;
        };
        if !def.resizable || !def.is_data() {
            return;
        }

        let candidate = self.sizing().resized(def, delta);
        if let Some(cb) = self.callbacks.on_column_sizing_change.as_mut() {
            cb(&candidate);
        }
        if self.controlled.sizing.is_none() {
            self.sizing = candidate;
        }
    }

    // ---- pagination --------------------------------------------------------

    pub fn next_page(&mut self) {
        let len = self.row_model.len();
        match &mut self.pager {
            PaginationMode::Client(pager) => {
                let index = self.controlled.page_index.unwrap_or(pager.page_index());
                if index + 1 >= pager.page_count(len) {
                    return;
                }
                let candidate = index + 1;
                if let Some(cb) = self.callbacks.on_page_change.as_mut() {
                    cb(candidate);
                }
                if self.controlled.page_index.is_none() {
                    pager.set_page_index(candidate, len);
                }
            }
            PaginationMode::Cursor(cursor) => {
                if cursor.has_next_page {
                    if let Some(cb) = self.callbacks.on_next_page.as_mut() {
                        cb();
                    }
                }
                return;
            }
            PaginationMode::None => return,
        }
        self.focus = self.focus.clamped(self.display_len());
    }

    pub fn previous_page(&mut self) {
        let len = self.row_model.len();
        match &mut self.pager {
            PaginationMode::Client(pager) => {
                let index = self.controlled.page_index.unwrap_or(pager.page_index());
                if index == 0 {
                    return;
                }
                let candidate = index - 1;
                if let Some(cb) = self.callbacks.on_page_change.as_mut() {
                    cb(candidate);
                }
                if self.controlled.page_index.is_none() {
                    pager.set_page_index(candidate, len);
                }
            }
            PaginationMode::Cursor(cursor) => {
                if cursor.has_previous_page {
                    if let Some(cb) = self.callbacks.on_previous_page.as_mut() {
                        cb();
                    }
                }
                return;
            }
            PaginationMode::None => return,
        }
        self.focus = self.focus.clamped(self.display_len());
    }

    pub fn set_page_size(&mut self, size: usize) {
        let len = self.row_model.len();
        if let PaginationMode::Client(pager) = &mut self.pager {
            let before = pager.page_index();
            pager.set_page_size(size, len);
            if pager.page_index() != before {
                if let Some(cb) = self.callbacks.on_page_change.as_mut() {
                    cb(pager.page_index());
                }
            }
        }
    }

    pub(crate) fn pager(&self) -> &PaginationMode {
        &self.pager
    }

    // ---- event routing -----------------------------------------------------

    /// Route a key event. Returns whether the grid consumed it. Events are
    /// dropped unless the grid holds input focus.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.focused {
            return false;
        }

        let multi = self.props.selection_mode == SelectionMode::Multi;
        let (focus, outcome) = nav::transition(self.focus, key, self.display_len(), multi);
        self.focus = focus;

        match outcome {
            NavOutcome::Ignored => false,
            NavOutcome::FocusMoved(index) => {
                self.scroll_into_view(index);
                true
            }
            NavOutcome::Activated(index) => {
                if let Some(id) = self.display_id(index).map(str::to_string) {
                    if let Some(cb) = self.callbacks.on_row_activate.as_mut() {
                        cb(&id);
                    }
                }
                true
            }
            NavOutcome::ToggleSelection(index) => {
                if let Some(id) = self.display_id(index).map(str::to_string) {
                    self.toggle_row_selection(&id);
                }
                true
            }
            NavOutcome::Exited => true,
        }
    }

    /// Minimal scroll adjustment bringing a display row into view (nearest
    /// alignment). Client paging renders whole pages, so nothing scrolls.
    fn scroll_into_view(&mut self, display_index: usize) {
        if self.pager.is_client() || !self.layout.valid {
            return;
        }
        let viewport = usize::from(self.layout.body.height);
        self.scroll_offset = self.window.scroll_to(
            display_index,
            viewport,
            self.scroll_offset,
            self.display_len(),
        );
    }

    pub fn scroll_by(&mut self, delta: isize) {
        if self.pager.is_client() {
            return;
        }
        let viewport = usize::from(self.layout.body.height);
        let next = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.scroll_offset = self.window.clamp_offset(next, viewport, self.display_len());
    }

    /// Route a mouse event using the geometry of the last render.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if !self.layout.valid {
            return false;
        }

        match event.kind {
            MouseEventKind::ScrollDown => {
                self.scroll_by(WHEEL_SCROLL_STEP as isize);
                true
            }
            MouseEventKind::ScrollUp => {
                self.scroll_by(-(WHEEL_SCROLL_STEP as isize));
                true
            }
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(event),
            MouseEventKind::Drag(MouseButton::Left) => self.handle_drag_move(event.column),
            MouseEventKind::Up(MouseButton::Left) => self.handle_release(event.column),
            _ => false,
        }
    }

    /// Capture loss (terminal focus lost, pointer grabbed elsewhere): no drag
    /// is left open. An in-flight resize commits, a reorder cancels.
    pub fn handle_focus_lost(&mut self) {
        match self.drag {
            Drag::None | Drag::HeaderPress { .. } => {}
            Drag::Resize {
                def_index,
                start_x,
                current_x,
            } => {
                self.commit_resize(def_index, start_x, current_x);
            }
            Drag::Reorder { .. } => {
                debug!("reorder drag cancelled by capture loss");
            }
        }
        self.drag = Drag::None;
    }

    fn handle_press(&mut self, event: &MouseEvent) -> bool {
        let (x, y) = (event.column, event.row);

        if y == self.layout.header_y {
            // Resize handle: the cell either side of a resizable column's
            // right edge.
            if let Some(def_index) = self.resize_handle_at(x) {
                self.drag = Drag::Resize {
                    def_index,
                    start_x: x,
                    current_x: x,
                };
                return true;
            }

            if let Some(span) = self.layout.columns.iter().find(|s| s.contains(x)).copied() {
                let def = &self.props.columns[span.def_index];
                match def.role {
                    ColumnRole::Selection => {
                        self.toggle_select_all();
                        return true;
                    }
                    ColumnRole::Data => {
                        self.drag = Drag::HeaderPress {
                            def_index: span.def_index,
                            start_x: x,
                            multi: event.modifiers.contains(KeyModifiers::SHIFT),
                        };
                        return true;
                    }
                    ColumnRole::Action => return false,
                }
            }
            return false;
        }

        if Some(y) == self.layout.footer_y {
            if let Some(range) = &self.layout.prev_hit {
                if range.contains(&x) {
                    self.previous_page();
                    return true;
                }
            }
            if let Some(range) = &self.layout.next_hit {
                if range.contains(&x) {
                    self.next_page();
                    return true;
                }
            }
            return false;
        }

        // Body click. Suppressed while a drag is in flight.
        if self.drag != Drag::None {
            return false;
        }
        if let Some(display_index) = self.display_index_at(y) {
            self.focus = Focus::Row(display_index);
            let Some(id) = self.display_id(display_index).map(str::to_string) else {
                return false;
            };

            let on_selection_cell = self
                .layout
                .columns
                .iter()
                .find(|s| s.contains(x))
                .map(|s| self.props.columns[s.def_index].role == ColumnRole::Selection)
                .unwrap_or(false);

            if on_selection_cell {
                self.toggle_row_selection(&id);
            } else if let Some(cb) = self.callbacks.on_row_click.as_mut() {
                cb(&id);
            }
            return true;
        }
        false
    }

    fn handle_drag_move(&mut self, x: u16) -> bool {
        match self.drag {
            Drag::None => false,
            Drag::HeaderPress {
                def_index, start_x, ..
            } => {
                if x != start_x {
                    self.drag = Drag::Reorder {
                        def_index,
                        current_x: x,
                    };
                }
                true
            }
            Drag::Resize {
                def_index, start_x, ..
            } => {
                self.drag = Drag::Resize {
                    def_index,
                    start_x,
                    current_x: x,
                };
                true
            }
            Drag::Reorder { def_index, .. } => {
                self.drag = Drag::Reorder {
                    def_index,
                    current_x: x,
                };
                true
            }
        }
    }

    fn handle_release(&mut self, x: u16) -> bool {
        let drag = self.drag;
        self.drag = Drag::None;

        match drag {
            Drag::None => false,
            Drag::HeaderPress {
                def_index, multi, ..
            } => {
                let id = self.props.columns[def_index].id.clone();
                self.toggle_sort(&id, multi);
                true
            }
            Drag::Resize {
                def_index,
                start_x,
                ..
            } => {
                self.commit_resize(def_index, start_x, x);
                true
            }
            Drag::Reorder { def_index, .. } => {
                // A drop outside the header cancels the reorder.
                match self.reorder_target_at(x) {
                    Some(target_index) => {
                        let id = self.props.columns[def_index].id.clone();
                        self.move_column(&id, target_index);
                    }
                    None => debug!("reorder drag dropped outside a valid target"),
                }
                true
            }
        }
    }

    fn commit_resize(&mut self, def_index: usize, start_x: u16, end_x: u16) {
        let delta = i32::from(end_x) - i32::from(start_x);
        if delta == 0 {
            return;
        }
        let id = self.props.columns[def_index].id.clone();
        self.resize_column(&id, delta);
    }

    /// Resizable column whose right edge sits at or next to `x`
    fn resize_handle_at(&self, x: u16) -> Option<usize> {
        self.layout
            .columns
            .iter()
            .find(|span| {
                let edge = span.right_edge();
                (x == edge || x + 1 == edge) && {
                    let def = &self.props.columns[span.def_index];
                    def.resizable && def.is_data()
                }
            })
            .map(|span| span.def_index)
    }

    /// Data-column position a reorder drop at `x` lands on, or `None` when
    /// outside the header's data columns
    fn reorder_target_at(&self, x: u16) -> Option<usize> {
        self.layout
            .columns
            .iter()
            .filter(|span| self.props.columns[span.def_index].is_data())
            .position(|span| span.contains(x))
    }

    /// Display row under a screen y coordinate
    fn display_index_at(&mut self, y: u16) -> Option<usize> {
        let body = self.layout.body;
        if y < body.y || y >= body.y + body.height {
            return None;
        }
        let within = usize::from(y - body.y);

        if self.pager.is_client() {
            // Unwindowed page: rows stack one per measured height from the top.
            let mut offset = 0usize;
            for display_index in 0..self.display_len() {
                let height = self.display_row_height(display_index);
                if within < offset + height {
                    return Some(display_index);
                }
                offset += height;
            }
            return None;
        }

        self.window
            .index_at_offset(self.scroll_offset + within, self.display_len())
    }

    /// Height of one display row: the measure callback if configured, the
    /// estimate otherwise
    pub(crate) fn display_row_height(&self, display_index: usize) -> usize {
        match (self.props.row_height, self.display_row(display_index)) {
            (Some(measure), Some(row)) => measure(row).max(1),
            _ => self.props.row_height_estimate.max(1),
        }
    }

    pub(crate) fn drag(&self) -> Drag {
        self.drag
    }

    pub(crate) fn props(&self) -> &GridProps<T> {
        &self.props
    }

    pub(crate) fn window_mut(&mut self) -> &mut WindowCalculator {
        &mut self.window
    }

    pub(crate) fn skeleton_rows() -> usize {
        SKELETON_ROWS
    }

    pub(crate) fn clamp_scroll(&mut self) {
        let viewport = usize::from(self.layout.body.height);
        let len = self.display_len();
        self.scroll_offset = self.window.clamp_offset(self.scroll_offset, viewport, len);
    }
}
