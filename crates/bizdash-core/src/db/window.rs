use crate::db::query::PageSpec;

///
/// PageWindow
///
/// Resolved slice bounds for one page. Out-of-range pages are clamped to
/// the last page; `clamped` records that it happened.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PageWindow {
    pub(crate) page_number: u32,
    pub(crate) total_pages: u32,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) clamped: bool,
}

/// Compute the page window for `total` filtered rows.
///
/// `total_pages` is never below 1, so an empty result is one empty page.
/// `page` must already be validated (`page >= 1`, `page_size > 0`).
#[must_use]
pub(crate) fn page_window(total: usize, page: PageSpec) -> PageWindow {
    let page_size = usize::try_from(page.page_size).unwrap_or(usize::MAX).max(1);
    let pages = total.div_ceil(page_size).max(1);
    let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);

    let requested = page.page.max(1);
    let page_number = requested.min(total_pages);

    let index = usize::try_from(page_number - 1).unwrap_or(usize::MAX);
    let start = index.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    PageWindow {
        page_number,
        total_pages,
        start,
        end,
        clamped: page_number != requested,
    }
}
