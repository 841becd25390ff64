//! The paginated fetch loop

use super::types::{NextPage, PageNumberPaginator, PageSource, PaginationState};
use crate::error::Result;
use crate::types::{Record, StringMap};
use tracing::{debug, warn};

/// Fetch pages from `source` until a short page or the record cap
///
/// `base_params` are sent with every request; the paginator's page
/// parameters are layered on top. Records are concatenated in page order and
/// truncated to `max_records`.
pub async fn fetch_pages<S>(
    source: &S,
    base_params: &StringMap,
    paginator: &PageNumberPaginator,
) -> Result<Vec<Record>>
where
    S: PageSource + ?Sized,
{
    let mut state = PaginationState::new();
    let mut params = base_params.clone();
    params.extend(paginator.page_params(state.page));

    let mut records = source.fetch_page(&params).await?;
    let mut next = paginator.process_page(records.len(), &mut state);

    while let NextPage::Continue { page } = next {
        params.extend(paginator.page_params(page));

        match source.fetch_page(&params).await {
            Ok(page_records) => {
                debug!(page, count = page_records.len(), "Fetched page");
                let count = page_records.len();
                records.extend(page_records);
                next = paginator.process_page(count, &mut state);
            }
            Err(e) => {
                warn!(
                    page,
                    fetched = records.len(),
                    error = %e,
                    "Page request failed, returning records fetched so far"
                );
                break;
            }
        }
    }

    records.truncate(paginator.max_records);
    debug!(
        pages = state.page,
        records = records.len(),
        "Pagination complete"
    );
    Ok(records)
}
