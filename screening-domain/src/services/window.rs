use chrono::{Duration, NaiveDateTime};

use crate::entities::Transaction;
use crate::value_objects::RowId;

/// Two-pointer scan over a chronologically ordered sequence.
///
/// Returns, in ascending order, every position covered by a contiguous run
/// whose span is at most `window` and whose length is at least `min_count`.
/// A span exactly equal to `window` is inside the window. Overlapping runs
/// are merged, so each position appears once.
pub fn dense_window_positions<T, F>(
    items: &[T],
    window: Duration,
    min_count: usize,
    timestamp: F,
) -> Vec<usize>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let min_count = min_count.max(1);
    let mut positions = Vec::new();
    if items.len() < min_count {
        return positions;
    }

    let mut start = 0;
    let mut next_unmarked = 0;
    for end in 0..items.len() {
        let end_time = timestamp(&items[end]);
        while start < end && end_time - timestamp(&items[start]) > window {
            start += 1;
        }
        if end - start + 1 >= min_count {
            positions.extend(start.max(next_unmarked)..=end);
            next_unmarked = end + 1;
        }
    }
    positions
}

/// Rows of `group` that sit inside any dense window.
pub fn dense_window_rows(group: &[&Transaction], window: Duration, min_count: usize) -> Vec<RowId> {
    dense_window_positions(group, window, min_count, |transaction| transaction.timestamp)
        .into_iter()
        .map(|position| group[position].row)
        .collect()
}
