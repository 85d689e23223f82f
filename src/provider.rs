use crate::error::{ChartError, Result};
use crate::snapshot::{ChartSnapshot, Entry};

/// A chart is issued once per week; any day of that week resolves to it.
const DAYS_PER_CHART_WEEK: u64 = 7;

/// Source of weekly chart snapshots.
///
/// Implementations must be `Sync` so the current and previous week can be
/// fetched on separate rayon workers.
pub trait ChartProvider: Sync {
    /// Returns the chart issued for the week containing `date`.
    ///
    /// # Errors
    /// * `ChartError::DataUnavailable` if no such chart exists.
    /// * `ChartError::MalformedEntry` if the chart data is invalid.
    fn fetch_chart(&self, chart_name: &str, date: chrono::NaiveDate) -> Result<ChartSnapshot>;
}

/// Dates a request for `date` may resolve to, in order of preference.
fn chart_week(date: chrono::NaiveDate) -> impl Iterator<Item = chrono::NaiveDate> {
    (0..DAYS_PER_CHART_WEEK)
        .filter_map(move |offset| date.checked_add_days(chrono::Days::new(offset)))
}

/// Represents a single row of a chart CSV file.
#[derive(Debug, serde::Deserialize)]
struct CsvRecord {
    rank: u32,
    title: String,
    artist: String,
    peak_pos: u32,
    #[serde(default)]
    last_pos: Option<u32>,
    weeks: u32,
    is_new: bool,
}

impl From<CsvRecord> for Entry {
    fn from(record: CsvRecord) -> Self {
        Entry {
            rank: record.rank,
            last_pos: record.last_pos.unwrap_or(0),
            peak_pos: record.peak_pos,
            weeks: record.weeks,
            is_new: record.is_new,
            title: record.title,
            artist: record.artist,
        }
    }
}

/// Reads charts from `<data_dir>/<chart_name>/<YYYY-MM-DD>.csv`.
///
/// Files need a header row with the columns
/// `rank,title,artist,peak_pos,last_pos,weeks,is_new`; `last_pos` may be empty.
#[derive(Debug, Clone)]
pub struct CsvChartProvider {
    data_dir: std::path::PathBuf,
}

impl CsvChartProvider {
    pub fn new<P: Into<std::path::PathBuf>>(data_dir: P) -> Self {
        CsvChartProvider { data_dir: data_dir.into() }
    }

    /// Path of the chart file for one exact chart date.
    pub fn chart_path(&self, chart_name: &str, date: chrono::NaiveDate) -> std::path::PathBuf {
        self.data_dir
            .join(chart_name)
            .join(format!("{}.csv", date.format("%Y-%m-%d")))
    }

    /// Parses every record of a chart file into entries.
    ///
    /// # Arguments
    /// * `reader` - CSV reader positioned before the header row.
    /// * `source_name` - Name used in error messages (usually the file path).
    ///
    /// # Returns
    /// * `Result<Vec<Entry>>` - Rows in file order.
    ///
    /// # Errors
    /// * `ChartError::MalformedEntry` if a record is missing a column or holds a
    ///   bad value.
    fn read_entries<R: std::io::Read>(
        reader: &mut csv::Reader<R>,
        source_name: &str,
    ) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for result in reader.deserialize::<CsvRecord>() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                ChartError::malformed(source_name, line, e.to_string())
            })?;
            entries.push(Entry::from(record));
        }
        Ok(entries)
    }

    fn load(
        &self,
        chart_name: &str,
        date: chrono::NaiveDate,
        path: &std::path::Path,
    ) -> Result<ChartSnapshot> {
        let source_name = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| {
            ChartError::unavailable(chart_name, date, format!("cannot open {}: {}", source_name, e))
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let entries = Self::read_entries(&mut reader, &source_name)?;
        tracing::debug!(path = %source_name, entries = entries.len(), "read chart file");
        ChartSnapshot::new(chart_name, date, entries)
    }
}

impl ChartProvider for CsvChartProvider {
    fn fetch_chart(&self, chart_name: &str, date: chrono::NaiveDate) -> Result<ChartSnapshot> {
        for chart_date in chart_week(date) {
            let path = self.chart_path(chart_name, chart_date);
            if path.is_file() {
                tracing::info!(
                    chart = chart_name,
                    requested = %date,
                    resolved = %chart_date,
                    "loading chart"
                );
                return self.load(chart_name, chart_date, &path);
            }
        }
        Err(ChartError::unavailable(
            chart_name,
            date,
            format!("no chart file in {}", self.data_dir.join(chart_name).display()),
        ))
    }
}

/// Keeps snapshots in memory, keyed by chart name and chart date.
#[derive(Debug, Clone, Default)]
pub struct MemoryChartProvider {
    charts: std::collections::HashMap<(String, chrono::NaiveDate), ChartSnapshot>,
}

impl MemoryChartProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a snapshot under its own name and date, replacing any previous one.
    pub fn insert(&mut self, snapshot: ChartSnapshot) {
        self.charts
            .insert((snapshot.name().to_string(), snapshot.date()), snapshot);
    }
}

impl ChartProvider for MemoryChartProvider {
    fn fetch_chart(&self, chart_name: &str, date: chrono::NaiveDate) -> Result<ChartSnapshot> {
        chart_week(date)
            .find_map(|chart_date| self.charts.get(&(chart_name.to_string(), chart_date)))
            .cloned()
            .ok_or_else(|| ChartError::unavailable(chart_name, date, "not in memory"))
    }
}

/// Fetches the chart for `date` and the chart exactly one week earlier.
///
/// Both requests run concurrently through `rayon::join`; they share no data
/// and the engines only see them once both have completed.
///
/// # Returns
/// * `Result<(ChartSnapshot, ChartSnapshot)>` - `(current, previous)`.
///
/// # Errors
/// * The first failure of either fetch. No partial pair is returned.
pub fn fetch_pair<P: ChartProvider + ?Sized>(
    provider: &P,
    chart_name: &str,
    date: chrono::NaiveDate,
) -> Result<(ChartSnapshot, ChartSnapshot)> {
    let previous_date = date
        .checked_sub_days(chrono::Days::new(DAYS_PER_CHART_WEEK))
        .ok_or_else(|| {
            ChartError::unavailable(chart_name, date, "no previous week before this date")
        })?;

    let (current, previous) = rayon::join(
        || provider.fetch_chart(chart_name, date),
        || provider.fetch_chart(chart_name, previous_date),
    );
    Ok((current?, previous?))
}
