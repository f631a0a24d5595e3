//! Fixed-size pages over an ordered list, and the page-number control.

use serde::{Serialize, Serializer};

/// Events per page.
pub const PAGE_SIZE: usize = 5;

/// Above this many pages the control collapses ranges into ellipses.
const MAX_LINKS_WITHOUT_ELLIPSIS: usize = 5;

/// Number of pages for `count` items; at least 1, even for an empty list
#[must_use]
pub const fn total_pages(count: usize, page_size: usize) -> usize {
    let page_size = if page_size == 0 { 1 } else { page_size };
    let pages = count.div_ceil(page_size);
    if pages == 0 { 1 } else { pages }
}

/// Clamp a requested page into `1..=total`
#[must_use]
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// The items on 1-indexed page `page`; out-of-range pages are clamped
#[must_use]
pub fn page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let page = clamp_page(page, total_pages(items.len(), page_size));
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// One entry of the page-number control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    /// A clickable page number
    Page(usize),
    /// A gap marker; never clickable
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Page(number) => number.serialize(serializer),
            Self::Ellipsis => serializer.serialize_str("…"),
        }
    }
}

/// Page numbers to show for `current` of `total`
///
/// Up to five pages are all listed. Beyond that: the first page, a three-wide window
/// around `current` (pinned to 2..=4 near the start and to the last four pages near the
/// end), ellipses for the gaps, and the last page.
#[must_use]
pub fn page_numbers(current: usize, total: usize) -> Vec<PageLink> {
    if total <= MAX_LINKS_WITHOUT_ELLIPSIS {
        return (1..=total.max(1)).map(PageLink::Page).collect();
    }

    let current = clamp_page(current, total);
    let mut start = current.saturating_sub(1).max(2);
    let mut end = (current + 1).min(total - 1);
    if current <= 3 {
        end = 4;
    } else if current >= total - 2 {
        start = total - 3;
    }

    let mut links = vec![PageLink::Page(1)];
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}

/// Everything needed to render the pagination control
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageControls {
    /// Current page (clamped)
    pub current: usize,
    /// Total pages, at least 1
    pub total_pages: usize,
    /// Whether the control is shown at all
    pub visible: bool,
    /// Target of the "previous" button; `None` when disabled
    pub previous: Option<usize>,
    /// Target of the "next" button; `None` when disabled
    pub next: Option<usize>,
    /// Page links and ellipses
    pub links: Vec<PageLink>,
}

impl PageControls {
    /// Build the control for `current` of `total_pages`
    #[must_use]
    pub fn new(current: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let current = clamp_page(current, total_pages);
        let visible = total_pages > 1;

        Self {
            current,
            total_pages,
            visible,
            previous: (current > 1).then(|| current - 1),
            next: (current < total_pages).then(|| current + 1),
            links: if visible { page_numbers(current, total_pages) } else { Vec::new() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use PageLink::{Ellipsis, Page};

    #[test]
    fn test_ten_pages_first() {
        assert_eq!(page_numbers(1, 10), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]);
    }

    #[test]
    fn test_ten_pages_middle() {
        assert_eq!(
            page_numbers(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_ten_pages_last() {
        assert_eq!(page_numbers(10, 10), vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]);
    }

    #[test]
    fn test_near_start_boundary() {
        assert_eq!(page_numbers(3, 10), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]);
        assert_eq!(
            page_numbers(4, 10),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_six_pages_have_no_duplicate_numbers() {
        assert_eq!(page_numbers(1, 6), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]);
        assert_eq!(page_numbers(4, 6), vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]);
    }

    #[test]
    fn test_five_or_fewer_pages_are_all_listed() {
        assert_eq!(page_numbers(2, 5), (1..=5).map(Page).collect::<Vec<_>>());
        assert_eq!(page_numbers(1, 1), vec![Page(1)]);
    }

    #[test]
    fn test_seven_events_split_five_and_two() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(total_pages(items.len(), PAGE_SIZE), 2);
        assert_eq!(page(&items, 1, PAGE_SIZE), &[1, 2, 3, 4, 5]);
        assert_eq!(page(&items, 2, PAGE_SIZE), &[6, 7]);
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(page(&items, 0, PAGE_SIZE), &[1, 2, 3, 4, 5]);
        assert_eq!(page(&items, 9, PAGE_SIZE), &[6, 7]);
        assert!(page::<u32>(&[], 3, PAGE_SIZE).is_empty());
    }

    #[test]
    fn test_empty_list_has_one_page_and_hidden_controls() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
        let controls = PageControls::new(1, 1);
        assert!(!controls.visible);
        assert!(controls.links.is_empty());
        assert_eq!(controls.previous, None);
        assert_eq!(controls.next, None);
    }

    #[test]
    fn test_boundary_buttons_are_disabled() {
        let first = PageControls::new(1, 3);
        assert_eq!((first.previous, first.next), (None, Some(2)));
        let last = PageControls::new(3, 3);
        assert_eq!((last.previous, last.next), (Some(2), None));
    }

    #[test]
    fn test_ellipsis_serializes_as_marker() {
        let json = serde_json::to_string(&page_numbers(5, 10)).unwrap_or_default();
        assert_eq!(json, r#"[1,"…",4,5,6,"…",10]"#);
    }

    proptest! {
        #[test]
        fn test_pages_partition_the_list(len in 0_usize..200, size in 1_usize..12) {
            let items: Vec<usize> = (0..len).collect();
            let total = total_pages(len, size);
            let concatenated: Vec<usize> = (1..=total)
                .flat_map(|p| page(&items, p, size).iter().copied())
                .collect();
            prop_assert_eq!(concatenated, items);
            prop_assert_eq!(total, len.div_ceil(size).max(1));
        }

        #[test]
        fn test_links_are_increasing_and_bounded(total in 1_usize..60, current in 1_usize..60) {
            let links = page_numbers(current, total);
            let numbers: Vec<usize> = links
                .iter()
                .filter_map(|l| match l { Page(n) => Some(*n), Ellipsis => None })
                .collect();
            prop_assert_eq!(numbers.first().copied(), Some(1));
            prop_assert_eq!(numbers.last().copied(), Some(total));
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(links.windows(2).all(|w| !(w[0] == Ellipsis && w[1] == Ellipsis)));
        }
    }
}
