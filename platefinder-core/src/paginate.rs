pub const DEFAULT_PAGE_SIZE: usize = 7;

/// Returns the 1-indexed `page` of `items`, `page_size` elements at most.
/// Out-of-range pages, page 0 and a zero page size all yield an empty slice.
pub fn paginate<T>(items: &[T], page: u32, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page as usize - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn num_pages(len: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size) as u32
}

/// Which neighbouring pages can be navigated to from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageNav {
    pub prev: Option<u32>,
    pub next: Option<u32>,
}

pub fn page_nav(page: u32, num_pages: u32) -> PageNav {
    if num_pages <= 1 || page == 0 || page > num_pages {
        return PageNav::default();
    }
    if page == 1 {
        return PageNav { prev: None, next: Some(2) };
    }
    if page == num_pages {
        return PageNav { prev: Some(page - 1), next: None };
    }
    PageNav { prev: Some(page - 1), next: Some(page + 1) }
}

pub fn page_label(page: u32, num_pages: u32) -> String {
    format!("{page}/{num_pages} page(s)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<u32> {
        (1..=10).collect()
    }

    #[test]
    fn ten_items_split_seven_and_three() {
        let items = ten();
        assert_eq!(paginate(&items, 1, 7), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(paginate(&items, 2, 7), &[8, 9, 10]);
        assert_eq!(num_pages(items.len(), 7), 2);
    }

    #[test]
    fn pages_concatenate_back_to_input() {
        let items: Vec<u32> = (0..23).collect();
        for size in 1..=25 {
            let pages = num_pages(items.len(), size);
            let mut joined = Vec::new();
            for p in 1..=pages {
                let slice = paginate(&items, p, size);
                assert!(slice.len() <= size);
                joined.extend_from_slice(slice);
            }
            assert_eq!(joined, items, "page size {size}");
        }
    }

    #[test]
    fn empty_input_is_always_empty() {
        let items: Vec<u32> = Vec::new();
        for p in 0..5 {
            assert!(paginate(&items, p, 7).is_empty());
        }
        assert_eq!(num_pages(0, 7), 0);
    }

    #[test]
    fn past_the_end_and_degenerate_arguments() {
        let items = ten();
        assert!(paginate(&items, 3, 7).is_empty());
        assert!(paginate(&items, u32::MAX, 7).is_empty());
        assert!(paginate(&items, 0, 7).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert_eq!(num_pages(10, 0), 0);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (0..14).collect();
        assert_eq!(num_pages(items.len(), 7), 2);
        assert_eq!(paginate(&items, 2, 7).len(), 7);
        assert!(paginate(&items, 3, 7).is_empty());
    }

    #[test]
    fn nav_rules() {
        assert_eq!(page_nav(1, 1), PageNav::default());
        assert_eq!(page_nav(1, 3), PageNav { prev: None, next: Some(2) });
        assert_eq!(page_nav(2, 3), PageNav { prev: Some(1), next: Some(3) });
        assert_eq!(page_nav(3, 3), PageNav { prev: Some(2), next: None });
        assert_eq!(page_nav(4, 3), PageNav::default());
        assert_eq!(page_nav(1, 0), PageNav::default());
    }

    #[test]
    fn label_format() {
        assert_eq!(page_label(2, 5), "2/5 page(s)");
    }
}
