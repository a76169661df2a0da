//! Pagination module
//!
//! Supports: Page Number
//!
//! # Overview
//!
//! The pagination module tracks where a paged listing is and decides, from
//! each response, whether another page should be requested. Callers can also
//! end pagination early through [`PaginationState::mark_done`] once they have
//! collected enough records.

mod strategies;
mod types;

pub use strategies::PageNumberPaginator;
pub use types::{check_stop_condition, NextPage, PageInfo, PaginationState, StopCondition, StopResult};
