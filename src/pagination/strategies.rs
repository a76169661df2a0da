//! Pagination strategy implementations

use super::types::{check_stop_condition, NextPage, PageInfo, PaginationState, StopCondition};

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., `?page=2`)
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number (usually 0 or 1)
    pub start_page: u32,
    /// Stop conditions, any of which ends pagination
    pub stop_conditions: Vec<StopCondition>,
}

impl PageNumberPaginator {
    /// Create a new page number paginator that stops on an empty page
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            stop_conditions: vec![StopCondition::EmptyPage],
        }
    }

    /// Add a stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_conditions.push(condition);
        self
    }

    /// Query parameters for the first request
    pub fn initial_params(&self) -> Vec<(String, String)> {
        vec![(self.page_param.clone(), self.start_page.to_string())]
    }

    /// Page number requested next, given the current state
    pub fn current_page(&self, state: &PaginationState) -> u32 {
        if state.pages_fetched == 0 {
            self.start_page
        } else {
            state.page + 1
        }
    }

    /// Record a fetched page and decide whether to continue
    pub fn process_page(&self, info: PageInfo, state: &mut PaginationState) -> NextPage {
        let page = self.current_page(state);
        state.record_page(page, info.records);

        if state.done
            || self
                .stop_conditions
                .iter()
                .any(|c| check_stop_condition(c, &info, state).should_stop())
        {
            state.mark_done();
            return NextPage::Done;
        }

        NextPage::with_param(&self.page_param, state.page + 1)
    }
}
