//! Pagination module
//!
//! EC3 collections only support page-number pagination (`page_size` and
//! `page_number` query parameters); there is no cursor. The end of the data
//! is inferred from a short page, and callers cap the total with
//! `max_records`.
//!
//! # Failure policy
//!
//! A failure on the first page propagates. A failure on any later page ends
//! pagination and the records gathered so far are returned, so a short
//! result may mean either "no more data" or "a later page failed".

mod fetcher;
mod types;

pub use fetcher::fetch_pages;
pub use types::{
    NextPage, PageNumberPaginator, PageSource, PaginationState, FIRST_PAGE, PAGE_NUMBER_PARAM,
    PAGE_SIZE_PARAM,
};
