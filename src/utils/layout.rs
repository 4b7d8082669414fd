/// Split leaderboard chips into a top-heavy two-row layout.
///
/// Two or fewer items share the top row. Otherwise the top row takes the
/// larger half. Order is preserved.
pub fn compute_pyramid_rows<T>(items: &[T]) -> (&[T], &[T]) {
    let n = items.len();
    let top_count = if n <= 2 { n } else { n.div_ceil(2) };
    items.split_at(top_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_sizes() {
        let cases = [(0, 0, 0), (1, 1, 0), (2, 2, 0), (3, 2, 1), (4, 2, 2), (9, 5, 4), (10, 5, 5)];
        for (n, top, bottom) in cases {
            let items: Vec<usize> = (0..n).collect();
            let (t, b) = compute_pyramid_rows(&items);
            assert_eq!((t.len(), b.len()), (top, bottom), "n={}", n);
        }
    }

    #[test]
    fn test_invariants_hold_for_all_sizes() {
        for n in 0..50 {
            let items: Vec<usize> = (0..n).collect();
            let (top, bottom) = compute_pyramid_rows(&items);
            assert_eq!(top.len() + bottom.len(), n);
            assert!(top.len() >= bottom.len());
            let rejoined: Vec<usize> = top.iter().chain(bottom).copied().collect();
            assert_eq!(rejoined, items);
        }
    }
}
