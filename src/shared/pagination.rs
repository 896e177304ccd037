//! In-memory pagination over fully loaded result sets.
//!
//! List queries load every matching row and slice the page out afterwards, so
//! a page is stable under repeated calls for the same input (not a live
//! cursor). Out-of-range requests degrade to an empty page, never an error.

/// Returns the zero-based `page` of `size` items from `items`.
pub fn paginate<T>(items: Vec<T>, page: usize, size: usize) -> Vec<T> {
    let start = page.saturating_mul(size);
    if start >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(start).take(size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_exact_size_returns_everything() {
        let items = vec![1, 2, 3, 4, 5];
        assert_eq!(paginate(items.clone(), 0, items.len()), items);
    }

    #[test]
    fn result_never_exceeds_page_size() {
        let items: Vec<i32> = (0..17).collect();
        for page in 0..6 {
            for size in 0..7 {
                assert!(paginate(items.clone(), page, size).len() <= size);
            }
        }
    }

    #[test]
    fn pages_partition_the_input() {
        let items: Vec<i32> = (0..10).collect();
        assert_eq!(paginate(items.clone(), 0, 4), vec![0, 1, 2, 3]);
        assert_eq!(paginate(items.clone(), 1, 4), vec![4, 5, 6, 7]);
        assert_eq!(paginate(items.clone(), 2, 4), vec![8, 9]);
    }

    #[test]
    fn page_beyond_range_is_empty() {
        let items = vec![1, 2, 3];
        assert!(paginate(items.clone(), 1, 3).is_empty());
        assert!(paginate(items.clone(), 100, 50).is_empty());
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(paginate(vec![1, 2, 3], 0, 0).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(paginate(Vec::<i32>::new(), 0, 50).is_empty());
    }

    #[test]
    fn huge_page_and_size_do_not_overflow() {
        assert!(paginate(vec![1], usize::MAX, usize::MAX).is_empty());
    }
}
