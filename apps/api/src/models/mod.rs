pub mod assessment;
pub mod candidate;
pub mod job;

use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    /// Slices one 1-based page out of already filtered items. Without a page
    /// number every item is returned. `total` always counts every match.
    pub fn paginate(items: Vec<T>, page: Option<usize>, page_size: Option<usize>) -> Self {
        let total = items.len();
        let data = match page {
            Some(page) => {
                let size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
                let start = page.saturating_sub(1).saturating_mul(size);
                items.into_iter().skip(start).take(size).collect()
            }
            None => items,
        };
        ListResponse { data, total }
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices_one_based_pages() {
        let page = ListResponse::paginate((0..20).collect(), Some(2), Some(9));
        assert_eq!(page.data, (9..18).collect::<Vec<_>>());
        assert_eq!(page.total, 20);

        let last = ListResponse::paginate((0..20).collect(), Some(3), Some(9));
        assert_eq!(last.data, vec![18, 19]);
    }

    #[test]
    fn test_paginate_without_page_returns_everything() {
        let all = ListResponse::paginate(vec!["a", "b"], None, Some(1));
        assert_eq!(all.data, vec!["a", "b"]);
        assert_eq!(all.total, 2);
    }

    #[test]
    fn test_paginate_past_the_end_is_empty() {
        let page = ListResponse::paginate(vec![1, 2, 3], Some(5), Some(2));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }
}
