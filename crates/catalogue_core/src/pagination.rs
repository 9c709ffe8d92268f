use crate::PageSize;

/// Most page numbers the pager shows at once.
pub const PAGER_WINDOW: u32 = 5;

/// `ceil(total_items / page_size)`; zero items means zero pages.
pub fn total_pages(total_items: u64, page_size: PageSize) -> u32 {
    let pages = total_items.div_ceil(u64::from(page_size.get()));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 1-based positions of the first and last item on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemRange {
    pub start_item: u64,
    pub end_item: u64,
}

/// Range of items shown on `page`. Both ends are 0 for an empty collection.
/// A page past the end is treated as the last page.
pub fn item_range(page: u32, page_size: PageSize, total_items: u64) -> ItemRange {
    if total_items == 0 {
        return ItemRange::default();
    }
    let last = total_pages(total_items, page_size);
    let page = u64::from(page.clamp(1, last));
    let size = u64::from(page_size.get());
    ItemRange {
        start_item: (page - 1) * size + 1,
        end_item: (page * size).min(total_items),
    }
}

/// Contiguous page numbers around `current`, at most [`PAGER_WINDOW`] long.
///
/// The window is centred on the current page and shifted inwards near
/// either end so that it always holds `min(PAGER_WINDOW, total_pages)`
/// numbers within `[1, total_pages]`.
pub fn pager_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let len = PAGER_WINDOW.min(total_pages);
    let start = current
        .saturating_sub(PAGER_WINDOW / 2)
        .max(1)
        .min(total_pages - len + 1);
    (start..=start + (len - 1)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagerControls {
    pub pages: Vec<u32>,
    pub current: u32,
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
}

pub fn pager(current: u32, total_pages: u32) -> PagerControls {
    PagerControls {
        pages: pager_window(current, total_pages),
        current,
        first_enabled: current > 1,
        previous_enabled: current > 1,
        next_enabled: current < total_pages,
        last_enabled: current < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centred_in_the_middle() {
        assert_eq!(pager_window(8, 16), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_shifts_at_both_ends() {
        assert_eq!(pager_window(2, 16), vec![1, 2, 3, 4, 5]);
        assert_eq!(pager_window(15, 16), vec![12, 13, 14, 15, 16]);
    }

    #[test]
    fn window_stays_in_range_at_the_page_limit() {
        let last = u32::MAX;
        assert_eq!(
            pager_window(last, last),
            vec![last - 4, last - 3, last - 2, last - 1, last]
        );
        assert_eq!(pager(last, last).pages.len(), 5);
    }

    #[test]
    fn short_collections_show_every_page() {
        assert_eq!(pager_window(2, 3), vec![1, 2, 3]);
        assert!(pager_window(1, 0).is_empty());
    }
}
