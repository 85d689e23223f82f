use crate::error::{ChartError, Result};

/// Natural key of a song: the (title, artist) pair.
///
/// Songs are matched across weeks by this key, never by rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EntryKey {
    pub title: String,
    pub artist: String,
}

impl EntryKey {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        EntryKey {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// One song's standing on a weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Entry {
    pub rank: u32,
    /// Position last week, 0 when the song was not on last week's chart.
    pub last_pos: u32,
    pub peak_pos: u32,
    /// Cumulative weeks on chart, this week included.
    pub weeks: u32,
    /// True only on the song's first ever appearance.
    pub is_new: bool,
    pub title: String,
    pub artist: String,
}

impl Entry {
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.title.as_str(), self.artist.as_str())
    }

    /// Week-over-week rank change, positive towards #1.
    ///
    /// Returns `None` when the entry has no position last week.
    pub fn delta(&self) -> Option<i64> {
        if self.last_pos == 0 {
            None
        } else {
            Some(i64::from(self.last_pos) - i64::from(self.rank))
        }
    }
}

/// One week's chart, ordered by rank (index 0 is #1).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChartSnapshot {
    name: String,
    date: chrono::NaiveDate,
    entries: Vec<Entry>,
}

impl ChartSnapshot {
    /// Builds a validated snapshot.
    ///
    /// Entries are sorted by rank, after which every rank must equal its
    /// 1-based position. Peak position and weeks must be at least 1 and the
    /// natural key must be unique within the chart.
    ///
    /// # Arguments
    /// * `name` - Chart name, e.g. `hot-100`.
    /// * `date` - The date the chart is issued for.
    /// * `entries` - Rows in any order.
    ///
    /// # Errors
    /// * `ChartError::MalformedEntry` naming the offending position.
    pub fn new(
        name: impl Into<String>,
        date: chrono::NaiveDate,
        mut entries: Vec<Entry>,
    ) -> Result<Self> {
        let name = name.into();
        let source_name = format!("{} {}", name, date);
        entries.sort_by_key(|entry| entry.rank);

        let mut seen = std::collections::HashSet::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let line = i as u64 + 1;
            if entry.title.trim().is_empty() || entry.artist.trim().is_empty() {
                let details = "title and artist are required";
                return Err(ChartError::malformed(&source_name, line, details));
            }
            if entry.rank as usize != i + 1 {
                return Err(ChartError::malformed(
                    &source_name,
                    line,
                    format!("expected rank {} but found {}", i + 1, entry.rank),
                ));
            }
            if entry.peak_pos == 0 {
                let details = "peak position must be at least 1";
                return Err(ChartError::malformed(&source_name, line, details));
            }
            if entry.weeks == 0 {
                let details = "weeks on chart must be at least 1";
                return Err(ChartError::malformed(&source_name, line, details));
            }
            if !seen.insert(entry.key()) {
                return Err(ChartError::malformed(
                    &source_name,
                    line,
                    format!("duplicate entry \"{}\" by {}", entry.title, entry.artist),
                ));
            }
        }

        Ok(ChartSnapshot { name, date, entries })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> chrono::NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `count` entries in rank order.
    pub fn top(&self, count: usize) -> &[Entry] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Natural keys of every entry, for set lookups.
    pub fn keys(&self) -> std::collections::HashSet<EntryKey> {
        self.entries.iter().map(Entry::key).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn entry(
        title: &str,
        rank: u32,
        last_pos: u32,
        peak_pos: u32,
        weeks: u32,
        is_new: bool,
    ) -> Entry {
        Entry {
            rank,
            last_pos,
            peak_pos,
            weeks,
            is_new,
            title: title.to_string(),
            artist: format!("{} Artist", title),
        }
    }

    pub(crate) fn date(s: &str) -> chrono::NaiveDate {
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_sorts_entries_by_rank() {
        let chart = ChartSnapshot::new(
            "hot-100",
            date("2024-03-02"),
            vec![entry("B", 2, 1, 1, 4, false), entry("A", 1, 2, 1, 3, false)],
        )
        .unwrap();

        let titles: Vec<_> = chart.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn new_rejects_rank_gaps() {
        let err = ChartSnapshot::new(
            "hot-100",
            date("2024-03-02"),
            vec![entry("A", 1, 0, 1, 1, true), entry("B", 3, 0, 3, 1, true)],
        )
        .unwrap_err();

        assert!(matches!(err, ChartError::MalformedEntry { line: 2, .. }));
    }

    #[test]
    fn new_rejects_duplicate_natural_keys() {
        let twin = entry("A", 2, 0, 2, 1, true);
        let rows = vec![entry("A", 1, 0, 1, 1, true), twin];
        let err = ChartSnapshot::new("hot-100", date("2024-03-02"), rows).unwrap_err();

        assert!(err.to_string().contains("duplicate entry"));
    }

    #[test]
    fn new_rejects_zero_weeks_and_peak() {
        let day = date("2024-03-02");
        let zero_weeks = ChartSnapshot::new("hot-100", day, vec![entry("A", 1, 0, 1, 0, true)]);
        let zero_peak = ChartSnapshot::new("hot-100", day, vec![entry("A", 1, 0, 0, 1, true)]);

        assert!(zero_weeks.is_err());
        assert!(zero_peak.is_err());
    }

    #[test]
    fn delta_is_none_without_last_position() {
        assert_eq!(entry("A", 5, 0, 5, 1, true).delta(), None);
        assert_eq!(entry("A", 5, 15, 5, 3, false).delta(), Some(10));
        assert_eq!(entry("A", 30, 10, 2, 9, false).delta(), Some(-20));
    }

    #[test]
    fn top_is_clamped_to_chart_length() {
        let chart =
            ChartSnapshot::new("hot-100", date("2024-03-02"), vec![entry("A", 1, 0, 1, 1, true)])
                .unwrap();

        assert_eq!(chart.top(20).len(), 1);
        assert_eq!(chart.top(0).len(), 0);
    }
}
