//! Error types shared by the provider, the engines and the renderer.

use thiserror::Error;

/// Main error type for chart analysis runs.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The provider has no chart for the requested date.
    #[error("no '{chart}' chart available for {date}: {reason}")]
    DataUnavailable {
        chart: String,
        date: chrono::NaiveDate,
        reason: String,
    },

    /// An entry could not be turned into a valid snapshot row.
    #[error("malformed entry in {source_name} (line {line}): {details}")]
    MalformedEntry {
        source_name: String,
        line: u64,
        details: String,
    },

    /// Configuration values that cannot drive a report.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A report template failed to parse or render.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl ChartError {
    /// Shorthand for a malformed row reported against a snapshot source.
    pub fn malformed(
        source_name: impl Into<String>,
        line: u64,
        details: impl Into<String>,
    ) -> Self {
        ChartError::MalformedEntry {
            source_name: source_name.into(),
            line,
            details: details.into(),
        }
    }

    pub fn unavailable(chart: &str, date: chrono::NaiveDate, reason: impl Into<String>) -> Self {
        ChartError::DataUnavailable {
            chart: chart.to_string(),
            date,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
