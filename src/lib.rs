//! Week-over-week comparison of music charts.
//!
//! Two snapshots (this week and last week) go in; a report comes out that
//! lists the top entries, songs that left the chart, debuts, re-entries and
//! big rank moves, each tagged with the narrative variant that describes it.

pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod movement;
pub mod provider;
pub mod render;
pub mod report;
pub mod snapshot;
pub mod utils;

pub use classify::Variant;
pub use config::ReportConfig;
pub use error::{ChartError, Result};
pub use movement::{Move, MoveThresholds};
pub use provider::{ChartProvider, CsvChartProvider, MemoryChartProvider};
pub use report::{ChartReport, ReportItem, ReportSection, SectionKind, analyze, assemble};
pub use snapshot::{ChartSnapshot, Entry, EntryKey};
