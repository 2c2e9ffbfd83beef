//! Fixed-size page slicing for the list operation

/// Movies per page in list responses
pub const PAGE_SIZE: usize = 3;

/// Slice one page out of an already sorted collection.
///
/// Returns the page and the total page count (`ceil(len / page_size)`).
/// `page_number` is 1-based; 0 is treated as the first page. Pages past the
/// end come back empty, and a zero `page_size` yields no pages at all.
pub fn paginate<T>(items: &[T], page_number: usize, page_size: usize) -> (&[T], usize) {
    if page_size == 0 {
        return (&items[..0], 0);
    }

    let len = items.len();
    let total_pages = len.div_ceil(page_size);

    let start = page_number
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);

    (&items[start..end], total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> Vec<u32> {
        (1..=7).collect()
    }

    #[test]
    fn first_page_of_seven() {
        let items = seven();
        let (page, total) = paginate(&items, 1, PAGE_SIZE);
        assert_eq!(page, &[1, 2, 3]);
        assert_eq!(total, 3);
    }

    #[test]
    fn last_partial_page() {
        let items = seven();
        let (page, total) = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(page, &[7]);
        assert_eq!(total, 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items = seven();
        let (page, total) = paginate(&items, 4, PAGE_SIZE);
        assert!(page.is_empty());
        assert_eq!(total, 3);

        let (page, _) = paginate(&items, usize::MAX, PAGE_SIZE);
        assert!(page.is_empty());
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let items: Vec<u32> = Vec::new();
        let (page, total) = paginate(&items, 1, PAGE_SIZE);
        assert!(page.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn page_zero_clamps_to_first_page() {
        let items = seven();
        let (page, _) = paginate(&items, 0, PAGE_SIZE);
        assert_eq!(page, &[1, 2, 3]);
    }

    #[test]
    fn zero_page_size_yields_nothing() {
        let items = seven();
        let (page, total) = paginate(&items, 1, 0);
        assert!(page.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn pages_concatenate_to_collection() {
        for len in 1..=20u32 {
            let items: Vec<u32> = (0..len).collect();
            let (_, total) = paginate(&items, 1, PAGE_SIZE);
            assert_eq!(total, (len as usize).div_ceil(PAGE_SIZE));

            let rebuilt: Vec<u32> = (1..=total)
                .flat_map(|page_number| paginate(&items, page_number, PAGE_SIZE).0.to_vec())
                .collect();
            assert_eq!(rebuilt, items, "collection of {len} items");
        }
    }
}
