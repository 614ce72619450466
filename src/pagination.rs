//! Two mutually exclusive pagination strategies: client-side page slicing
//! over a fully materialized row array, and cursor-based load-more where the
//! server owns true ordering and the grid only forwards intent.

use tracing::warn;

/// Client-side paging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPagination {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for ClientPagination {
    fn default() -> Self {
        Self {
            page_size: 25,
            page_size_options: vec![10, 25, 50, 100],
        }
    }
}

/// Cursor paging: the caller owns the page boundaries and hands us only the
/// affordance state. Intent flows back through the grid's page callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPagination {
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Raw pagination config as supplied by the caller. Setting both strategies
/// is a precondition violation; it resolves with documented precedence
/// rather than failing.
#[derive(Debug, Clone, Default)]
pub struct PaginationConfig {
    pub client: Option<ClientPagination>,
    pub cursor: Option<CursorPagination>,
}

impl PaginationConfig {
    pub fn client(config: ClientPagination) -> Self {
        Self {
            client: Some(config),
            cursor: None,
        }
    }

    pub fn cursor(config: CursorPagination) -> Self {
        Self {
            client: None,
            cursor: Some(config),
        }
    }

    /// Resolve the configured strategy. Cursor wins when both are set.
    pub fn resolve(self) -> PaginationMode {
        match (self.client, self.cursor) {
            (Some(_), Some(cursor)) => {
                warn!("both pagination strategies configured; cursor mode wins");
                PaginationMode::Cursor(cursor)
            }
            (None, Some(cursor)) => PaginationMode::Cursor(cursor),
            (Some(client), None) => PaginationMode::Client(ClientPager::new(client)),
            (None, None) => PaginationMode::None,
        }
    }
}

/// The resolved, active strategy
#[derive(Debug, Clone, Default)]
pub enum PaginationMode {
    #[default]
    None,
    Client(ClientPager),
    Cursor(CursorPagination),
}

impl PaginationMode {
    pub fn is_client(&self) -> bool {
        matches!(self, PaginationMode::Client(_))
    }
}

/// Page slicing over a fully loaded row model. Client paging and windowing
/// both claim "which rows are current", so while a `ClientPager` is active
/// the grid renders whole pages and virtualization is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPager {
    page_index: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
}

impl ClientPager {
    pub fn new(config: ClientPagination) -> Self {
        Self {
            page_index: 0,
            page_size: config.page_size.max(1),
            page_size_options: config.page_size_options,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Number of pages over a row model of `len` rows; an empty model still
    /// has one (empty) page.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Row-model range for the current page, clamped to the model length
    pub fn slice(&self, len: usize) -> std::ops::Range<usize> {
        self.slice_at(self.page_index, len)
    }

    /// Row-model range for an arbitrary page index (controlled-mode callers
    /// hold the canonical index themselves)
    pub fn slice_at(&self, page_index: usize, len: usize) -> std::ops::Range<usize> {
        let start = (page_index * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    /// Jump straight to a page, clamped into range
    pub fn set_page_index(&mut self, page_index: usize, len: usize) {
        self.page_index = page_index.min(self.page_count(len) - 1);
    }

    pub fn has_next_page(&self, len: usize) -> bool {
        self.page_index + 1 < self.page_count(len)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn next_page(&mut self, len: usize) {
        if self.has_next_page(len) {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Change the page size, re-clamping the page index so the view never
    /// points past the last page.
    pub fn set_page_size(&mut self, size: usize, len: usize) {
        self.page_size = size.max(1);
        self.page_index = self.page_index.min(self.page_count(len) - 1);
    }

    /// Re-clamp after the row model shrank (data change)
    pub fn clamp(&mut self, len: usize) {
        self.page_index = self.page_index.min(self.page_count(len) - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_cursor_when_both_set() {
        let config = PaginationConfig {
            client: Some(ClientPagination::default()),
            cursor: Some(CursorPagination {
                has_next_page: true,
                has_previous_page: false,
            }),
        };
        assert!(matches!(config.resolve(), PaginationMode::Cursor(_)));
    }

    #[test]
    fn resolve_none_when_unconfigured() {
        assert!(matches!(
            PaginationConfig::default().resolve(),
            PaginationMode::None
        ));
    }

    #[test]
    fn slice_walks_pages() {
        let mut pager = ClientPager::new(ClientPagination {
            page_size: 10,
            page_size_options: vec![10, 25],
        });
        assert_eq!(pager.slice(35), 0..10);

        pager.next_page(35);
        assert_eq!(pager.slice(35), 10..20);

        pager.next_page(35);
        pager.next_page(35);
        assert_eq!(pager.slice(35), 30..35);

        // Already on the last page.
        pager.next_page(35);
        assert_eq!(pager.page_index(), 3);
    }

    #[test]
    fn previous_page_saturates_at_zero() {
        let mut pager = ClientPager::new(ClientPagination::default());
        pager.previous_page();
        assert_eq!(pager.page_index(), 0);
        assert!(!pager.has_previous_page());
    }

    #[test]
    fn page_count_rounds_up_and_floors_at_one() {
        let pager = ClientPager::new(ClientPagination {
            page_size: 10,
            page_size_options: vec![],
        });
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.page_count(10), 1);
        assert_eq!(pager.page_count(11), 2);
    }

    #[test]
    fn set_page_size_reclamps_index() {
        let mut pager = ClientPager::new(ClientPagination {
            page_size: 10,
            page_size_options: vec![],
        });
        pager.next_page(100);
        pager.next_page(100);
        assert_eq!(pager.page_index(), 2);

        pager.set_page_size(50, 100);
        assert_eq!(pager.page_index(), 1);
        assert_eq!(pager.slice(100), 50..100);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut pager = ClientPager::new(ClientPagination {
            page_size: 10,
            page_size_options: vec![],
        });
        pager.next_page(100);
        pager.next_page(100);
        pager.clamp(15);
        assert_eq!(pager.page_index(), 1);
    }

    #[test]
    fn zero_page_size_floors_at_one() {
        let pager = ClientPager::new(ClientPagination {
            page_size: 0,
            page_size_options: vec![],
        });
        assert_eq!(pager.page_size(), 1);
    }
}
