//! Decision tables mapping an entry to the narrative variant that describes it.

use crate::movement::Move;
use crate::snapshot::Entry;

/// Narrative variant a renderer picks its template by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    TopEntry,
    Debut,
    ReEntry,
    LeftAfterOneWeek,
    LeftFromPeak,
    Left,
    RoseToPeak,
    Rose,
    FellFromPeak,
    Fell,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopEntry => "top_entry",
            Self::Debut => "debut",
            Self::ReEntry => "re_entry",
            Self::LeftAfterOneWeek => "left_after_one_week",
            Self::LeftFromPeak => "left_from_peak",
            Self::Left => "left",
            Self::RoseToPeak => "rose_to_peak",
            Self::Rose => "rose",
            Self::FellFromPeak => "fell_from_peak",
            Self::Fell => "fell",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the variant for an entry that left the chart.
///
/// `entry` is last week's row, so `rank` is its final position. A one-week
/// stay is checked first and wins even when that position was also its peak.
pub fn classify_dropped(entry: &Entry) -> Variant {
    if entry.weeks == 1 {
        Variant::LeftAfterOneWeek
    } else if entry.rank == entry.peak_pos {
        Variant::LeftFromPeak
    } else {
        Variant::Left
    }
}

/// Picks the variant for a big move.
pub fn classify_move(m: &Move<'_>) -> Variant {
    if m.delta > 0 {
        if m.entry.rank == m.entry.peak_pos {
            Variant::RoseToPeak
        } else {
            Variant::Rose
        }
    } else if m.entry.last_pos == m.entry.peak_pos {
        Variant::FellFromPeak
    } else {
        Variant::Fell
    }
}
