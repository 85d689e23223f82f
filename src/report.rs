use crate::classify::{self, Variant};
use crate::compare;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::movement;
use crate::provider::{ChartProvider, fetch_pair};
use crate::snapshot::{ChartSnapshot, Entry};

/// Report sections, in the order they are always emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Top,
    Dropped,
    Debuts,
    ReEntries,
    BigMoves,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 5] = [
        SectionKind::Top,
        SectionKind::Dropped,
        SectionKind::Debuts,
        SectionKind::ReEntries,
        SectionKind::BigMoves,
    ];
}

/// One classified entry, ready for template substitution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportItem {
    pub entry: Entry,
    /// Rank change, present for big moves and for top entries that charted last week.
    pub delta: Option<i64>,
    pub variant: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub items: Vec<ReportItem>,
}

/// Dates printed in the report header, all derived from the chart date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ReportDates {
    pub chart_date: chrono::NaiveDate,
    /// Charts are published four days before the date they carry.
    pub release_date: chrono::NaiveDate,
    /// First day of the tracking week.
    pub window_start: chrono::NaiveDate,
    /// Last day of the tracking week.
    pub window_end: chrono::NaiveDate,
}

impl ReportDates {
    pub fn for_chart(chart_date: chrono::NaiveDate) -> Self {
        ReportDates {
            chart_date,
            release_date: chart_date - chrono::Days::new(4),
            window_start: chart_date - chrono::Days::new(15),
            window_end: chart_date - chrono::Days::new(9),
        }
    }
}

/// Everything a renderer needs for one week's recap.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChartReport {
    pub chart: String,
    pub chart_title: String,
    pub top_count: usize,
    pub dates: ReportDates,
    pub sections: Vec<ReportSection>,
}

impl ChartReport {
    /// Items of one section; empty when the section has nothing to report.
    pub fn section(&self, kind: SectionKind) -> &[ReportItem] {
        self.sections
            .iter()
            .find(|section| section.kind == kind)
            .map(|section| section.items.as_slice())
            .unwrap_or(&[])
    }
}

fn items<'a, I>(entries: I, variant: fn(&Entry) -> Variant) -> Vec<ReportItem>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .map(|entry| ReportItem {
            entry: entry.clone(),
            delta: None,
            variant: variant(entry),
        })
        .collect()
}

/// Runs both engines over a pair of charts and packages the results.
///
/// The report holds its own copies of the entries, so it outlives the
/// snapshots it was built from.
///
/// # Arguments
/// * `current` - This week's chart.
/// * `previous` - Last week's chart.
/// * `config` - Top-N count, chart title and move thresholds.
///
/// # Returns
/// * `ChartReport` - Five sections in `SectionKind::ORDER`.
pub fn assemble(
    current: &ChartSnapshot,
    previous: &ChartSnapshot,
    config: &ReportConfig,
) -> ChartReport {
    let top: Vec<ReportItem> = current
        .top(config.top_count)
        .iter()
        .map(|entry| ReportItem {
            entry: entry.clone(),
            delta: entry.delta(),
            variant: Variant::TopEntry,
        })
        .collect();

    let dropped =
        items(compare::uncharted_entries(previous, current), classify::classify_dropped);
    let debuts = items(compare::new_entries(current), |_| Variant::Debut);
    let re_entries = items(compare::re_entries(previous, current), |_| Variant::ReEntry);

    let big_moves: Vec<ReportItem> = movement::big_moves(current, &config.thresholds)
        .iter()
        .map(|m| ReportItem {
            entry: m.entry.clone(),
            delta: Some(m.delta),
            variant: classify::classify_move(m),
        })
        .collect();

    tracing::info!(
        chart = current.name(),
        date = %current.date(),
        dropped = dropped.len(),
        debuts = debuts.len(),
        re_entries = re_entries.len(),
        big_moves = big_moves.len(),
        "assembled chart report"
    );

    let sections = vec![
        ReportSection { kind: SectionKind::Top, items: top },
        ReportSection { kind: SectionKind::Dropped, items: dropped },
        ReportSection { kind: SectionKind::Debuts, items: debuts },
        ReportSection { kind: SectionKind::ReEntries, items: re_entries },
        ReportSection { kind: SectionKind::BigMoves, items: big_moves },
    ];

    ChartReport {
        chart: current.name().to_string(),
        chart_title: config.chart_title.clone(),
        top_count: config.top_count,
        dates: ReportDates::for_chart(current.date()),
        sections,
    }
}

/// Fetches this week's and last week's charts and builds the report.
///
/// # Arguments
/// * `provider` - Source of chart snapshots.
/// * `date` - Any day in the target chart week.
/// * `config` - Report settings; `config.chart` selects the chart.
///
/// # Errors
/// * Any provider error. Nothing is assembled unless both charts load.
pub fn analyze<P: ChartProvider + ?Sized>(
    provider: &P,
    date: chrono::NaiveDate,
    config: &ReportConfig,
) -> Result<ChartReport> {
    config.validate()?;
    let (current, previous) = fetch_pair(provider, &config.chart, date)?;
    tracing::debug!(
        current = %current.date(),
        previous = %previous.date(),
        current_entries = current.len(),
        previous_entries = previous.len(),
        "fetched chart pair"
    );
    Ok(assemble(&current, &previous, config))
}
