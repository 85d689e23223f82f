//! Set differences between two weekly charts, matched by natural key.

use crate::snapshot::{ChartSnapshot, Entry};

/// Entries of `previous` that are not on `current`.
///
/// The result keeps `previous`'s order, so the entries appear by last week's
/// rank. Each returned entry is the previous week's row: its `rank` is the last
/// position it held before leaving.
///
/// # Arguments
/// * `previous` - Last week's chart.
/// * `current` - This week's chart.
pub fn uncharted_entries<'a>(
    previous: &'a ChartSnapshot,
    current: &ChartSnapshot,
) -> Vec<&'a Entry> {
    let current_keys = current.keys();
    previous
        .iter()
        .filter(|entry| !current_keys.contains(&entry.key()))
        .collect()
}

/// Entries making their first ever chart appearance, in chart order.
pub fn new_entries(current: &ChartSnapshot) -> Vec<&Entry> {
    current.iter().filter(|entry| entry.is_new).collect()
}

/// Entries that have charted before, dropped off, and came back this week.
///
/// An entry qualifies when its natural key is absent from `previous` and it is
/// not flagged new. The `is_new` flag alone decides between debut and
/// re-entry; a new entry is never reported here.
///
/// # Arguments
/// * `previous` - Last week's chart.
/// * `current` - This week's chart.
pub fn re_entries<'a>(previous: &ChartSnapshot, current: &'a ChartSnapshot) -> Vec<&'a Entry> {
    let previous_keys = previous.keys();
    current
        .iter()
        .filter(|entry| !entry.is_new && !previous_keys.contains(&entry.key()))
        .collect()
}
