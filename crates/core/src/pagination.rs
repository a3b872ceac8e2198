//! Fixed-size page math and link info for list endpoints.

use serde::Serialize;

/// Every list endpoint serves pages of exactly this many records.
pub const PAGE_SIZE: i64 = 10;

/// Clamp a 1-indexed page number to the valid range.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Row offset of a 1-indexed page.
pub fn page_offset(page: i64) -> i64 {
    (page - 1) * PAGE_SIZE
}

/// Link block returned alongside paged data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    pub count: i64,
    pub pages: i64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl PageInfo {
    /// Compute link info for `page` of a listing served at `list_url`.
    ///
    /// `next` exists while a later page still holds records; `prev` for any
    /// page past the first. `pages` is the floor of `count / PAGE_SIZE`.
    pub fn new(count: i64, page: i64, list_url: &str) -> Self {
        let next = (page * PAGE_SIZE < count).then(|| format!("{list_url}?page={}", page + 1));
        let prev = (page > 1).then(|| format!("{list_url}?page={}", page - 1));
        PageInfo {
            count,
            pages: count / PAGE_SIZE,
            next,
            prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_missing_and_underflowing_pages() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
        assert_eq!(clamp_page(Some(4)), 4);
    }

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 10);
        assert_eq!(page_offset(5), 40);
    }

    #[test]
    fn fifteen_records_page_two_is_the_last_page() {
        let info = PageInfo::new(15, 2, "http://localhost:3000/read_char_all");
        assert_eq!(info.count, 15);
        assert_eq!(info.pages, 1);
        assert_eq!(info.next, None);
        assert_eq!(
            info.prev.as_deref(),
            Some("http://localhost:3000/read_char_all?page=1")
        );
    }

    #[test]
    fn first_page_of_a_long_listing_links_forward_only() {
        let info = PageInfo::new(35, 1, "http://x/read_location_all");
        assert_eq!(info.pages, 3);
        assert_eq!(info.next.as_deref(), Some("http://x/read_location_all?page=2"));
        assert_eq!(info.prev, None);
    }

    #[test]
    fn exact_multiple_has_no_next_on_final_page() {
        let info = PageInfo::new(20, 2, "http://x/read_char_all");
        assert_eq!(info.pages, 2);
        assert_eq!(info.next, None);
    }

    #[test]
    fn empty_collection_has_no_links() {
        let info = PageInfo::new(0, 1, "http://x/read_char_all");
        assert_eq!(info.count, 0);
        assert_eq!(info.pages, 0);
        assert_eq!(info.next, None);
        assert_eq!(info.prev, None);
    }
}
