//! Utility functions and helpers.

/// Returns `n * (n - 1) / 2`, the number of unordered pairs of `n` items.
#[must_use]
pub const fn choose2(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Iterates over all pairs `(items[i], items[j])` with `i < j`, in order.
pub fn pairs<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, &a)| items[i + 1..].iter().map(move |&b| (a, b)))
}
