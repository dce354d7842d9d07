use serde::Serialize;

/// 1-indexed page window. Page and limit values below 1 are clamped to 1
/// rather than rejected, so a malformed query degrades to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn clamped(page: Option<i64>, limit: Option<i64>, default_limit: i64) -> Self {
        PageRequest {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Envelope returned alongside every paginated listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl Pagination {
    /// `total_items` is the count of records matching the filter before the
    /// page window is applied; `total_pages` is its ceiling division by the
    /// page size.
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        Pagination {
            current_page: request.page,
            total_pages: {
                // Equivalent to i64::div_ceil, which is still unstable on stable Rust.
                let d = total_items / request.limit;
                let r = total_items % request.limit;
                if (r > 0 && request.limit > 0) || (r < 0 && request.limit < 0) {
                    d + 1
                } else {
                    d
                }
            },
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, 0)]
    #[case(1, 5, 1)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(23, 10, 3)]
    fn total_pages_is_ceiling_of_total_over_limit(
        #[case] total: i64,
        #[case] limit: i64,
        #[case] expected: i64,
    ) {
        let pagination = Pagination::new(PageRequest { page: 1, limit }, total);
        assert_eq!(pagination.total_pages, expected);
        assert_eq!(pagination.total_items, total);
    }

    #[rstest]
    #[case(None, None, 1, 5)]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(Some(-3), Some(-10), 1, 1)]
    #[case(Some(2), Some(10), 2, 10)]
    fn clamps_page_and_limit_below_one(
        #[case] page: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] expected_page: i64,
        #[case] expected_limit: i64,
    ) {
        let request = PageRequest::clamped(page, limit, 5);
        assert_eq!(request.page, expected_page);
        assert_eq!(request.limit, expected_limit);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 7, 14)]
    fn offset_is_zero_indexed_window_start(
        #[case] page: i64,
        #[case] limit: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(PageRequest { page, limit }.offset(), expected);
    }

    #[test]
    fn page_windows_partition_the_matching_records() {
        // 23 matching records in pages of 10: [0, 10), [10, 20), [20, 23).
        let total = 23;
        let limit = 10;
        let pagination = Pagination::new(PageRequest { page: 1, limit }, total);

        let mut covered = 0;
        for page in 1..=pagination.total_pages {
            let start = PageRequest { page, limit }.offset();
            let window = (total - start).min(limit);
            assert!(window > 0, "page {} would be empty", page);
            assert_eq!(start, covered);
            covered += window;
        }
        assert_eq!(covered, total);
    }
}
