//! Pagination types
//!
//! Defines the pagination state and stop conditions shared by strategies.

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: Vec<(String, String)>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl ToString) -> Self {
        Self::Continue {
            query_params: vec![(key.into(), value.to_string())],
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// What a strategy needs to know about one fetched page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Number of records on the page
    pub records: usize,
    /// Total page count reported by the server, if any
    pub total_pages: Option<u32>,
}

/// Condition that ends pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// Stop when a page has no records
    EmptyPage,

    /// Stop when the page number reaches the reported total pages
    TotalPages,

    /// Stop after this many pages have been fetched
    MaxPages(u32),
}

/// Result of checking a stop condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// Continue pagination
    Continue,
    /// Stop pagination
    Stop,
}

impl StopResult {
    /// Check if we should stop
    pub fn should_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Page number of the last fetched page (0 before the first fetch)
    pub page: u32,
    /// Number of pages fetched so far
    pub pages_fetched: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record a fetched page
    pub fn record_page(&mut self, page: u32, records: usize) {
        self.page = page;
        self.pages_fetched += 1;
        self.total_fetched += records as u64;
    }
}

/// Check a stop condition against the page just fetched
pub fn check_stop_condition(
    condition: &StopCondition,
    info: &PageInfo,
    state: &PaginationState,
) -> StopResult {
    let stop = match condition {
        StopCondition::EmptyPage => info.records == 0,
        StopCondition::TotalPages => info.total_pages.is_some_and(|total| state.page >= total),
        StopCondition::MaxPages(max) => state.pages_fetched >= *max,
    };

    if stop {
        StopResult::Stop
    } else {
        StopResult::Continue
    }
}
