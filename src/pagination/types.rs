//! Pagination types and traits

use crate::error::Result;
use crate::types::{Record, StringMap};
use async_trait::async_trait;

/// Query parameter carrying the page number
pub const PAGE_NUMBER_PARAM: &str = "page_number";

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Page numbers start at 1
pub const FIRST_PAGE: u32 = 1;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page next
    Continue { page: u32 },
    /// No more pages
    Done,
}

/// Tracks pagination state during one fetch
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Page number of the most recent request
    pub page: u32,
    /// Total records fetched so far
    pub total_fetched: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: FIRST_PAGE,
            total_fetched: 0,
        }
    }
}

impl PaginationState {
    /// State before the first request
    pub fn new() -> Self {
        Self::default()
    }

    /// Records still allowed under `max_records`
    pub fn remaining(&self, max_records: usize) -> usize {
        max_records.saturating_sub(self.total_fetched)
    }
}

/// Page number pagination with a total record cap
///
/// Continues while the last page was full (`len == page_size`) and fewer
/// than `max_records` records have been gathered.
#[derive(Debug, Clone, Copy)]
pub struct PageNumberPaginator {
    /// Records per page
    pub page_size: u32,
    /// Cap on total records (`usize::MAX` for everything)
    pub max_records: usize,
}

impl PageNumberPaginator {
    pub fn new(page_size: u32, max_records: usize) -> Self {
        Self {
            page_size,
            max_records,
        }
    }

    /// `page_size` and `page_number` for `page`
    pub fn page_params(&self, page: u32) -> StringMap {
        let mut params = StringMap::new();
        params.insert(PAGE_SIZE_PARAM.to_string(), self.page_size.to_string());
        params.insert(PAGE_NUMBER_PARAM.to_string(), page.to_string());
        params
    }

    /// Account for a fetched page and decide whether to continue
    pub fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.total_fetched += records_count;

        if records_count != self.page_size as usize || state.remaining(self.max_records) == 0 {
            return NextPage::Done;
        }

        state.page += 1;
        NextPage::Continue { page: state.page }
    }
}

/// Something that can return one page of records for a set of query
/// parameters
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page selected by `params`
    async fn fetch_page(&self, params: &StringMap) -> Result<Vec<Record>>;
}
