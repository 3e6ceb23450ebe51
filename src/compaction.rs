//! Single-pass compaction of dense, parallel backing storage.
//!
//! Removal positions are collected up front, sorted, and then skipped during
//! one linear scan that slides every survivor down into the first free slot.
//! The caller owns the storage; `compact` only drives the moves so that a
//! position index can be rewritten in the same pass.

/// Sorts and deduplicates resolved removal positions in place.
pub(crate) fn normalize(positions: &mut Vec<usize>) {
    positions.sort_unstable();
    positions.dedup();
}

/// Compacts `len` dense slots, skipping the ones listed in `removed`.
///
/// `removed` must be strictly ascending and every entry must be `< len`.
/// For each survivor after the first removed slot, `relocate(from, to)` is
/// called exactly once with `to < from`, in ascending order of `from`. The
/// callback is expected to swap slot `from` into slot `to`; after the pass the
/// removed entries occupy `new_len..len` and can be truncated away.
///
/// Returns the number of surviving slots.
pub(crate) fn compact<F>(len: usize, removed: &[usize], mut relocate: F) -> usize
where
    F: FnMut(usize, usize),
{
    let Some(&first) = removed.first() else {
        return len;
    };
    debug_assert!(removed.windows(2).all(|w| w[0] < w[1]));
    debug_assert!(removed.last().is_some_and(|&p| p < len));

    let mut pending = removed.iter().copied().peekable();
    let mut write = first;
    for read in first..len {
        if pending.next_if_eq(&read).is_some() {
            continue;
        }
        relocate(read, write);
        write += 1;
    }
    debug_assert_eq!(write, len - removed.len());
    write
}
