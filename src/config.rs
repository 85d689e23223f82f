use crate::error::{ChartError, Result};
use crate::movement::MoveThresholds;
use crate::render::Templates;

pub const DEFAULT_CHART: &str = "hot-100";
pub const DEFAULT_CHART_TITLE: &str = "[i]Billboard[/i] Hot 100";
pub const DEFAULT_TOP_COUNT: usize = 20;
pub const DEFAULT_DATA_DIR: &str = "charts";

/// Settings for one analysis run.
///
/// Every field has a default, so a config file only needs the values it
/// changes. Command-line flags are applied on top of whatever is loaded here.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Chart name handed to the provider.
    pub chart: String,
    /// Title used in the rendered header.
    pub chart_title: String,
    /// Number of entries in the top section.
    pub top_count: usize,
    /// Root directory of the CSV chart files.
    pub data_dir: std::path::PathBuf,
    pub thresholds: MoveThresholds,
    pub templates: Templates,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            chart: DEFAULT_CHART.to_string(),
            chart_title: DEFAULT_CHART_TITLE.to_string(),
            top_count: DEFAULT_TOP_COUNT,
            data_dir: std::path::PathBuf::from(DEFAULT_DATA_DIR),
            thresholds: MoveThresholds::default(),
            templates: Templates::default(),
        }
    }
}

impl ReportConfig {
    /// Loads a TOML config file and validates it.
    ///
    /// # Arguments
    /// * `path` - Path to the `.toml` file.
    ///
    /// # Returns
    /// * `Result<ReportConfig>` - Loaded settings with defaults for missing keys.
    ///
    /// # Errors
    /// * If the file cannot be read or parsed.
    /// * If a value fails `validate`.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: ReportConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_count == 0 {
            let reason = "top_count must be a positive integer";
            return Err(ChartError::InvalidConfig(reason.to_string()));
        }
        if self.chart.trim().is_empty() {
            return Err(ChartError::InvalidConfig("chart name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recap.toml");
        let raw = concat!(
            "top_count = 10\n\n",
            "[thresholds]\nany_delta = 25\n\n",
            "[templates]\ntop_header = \"Top {{topCount}}:\"\n",
        );
        std::fs::write(&path, raw).unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.top_count, 10);
        assert_eq!(config.chart, DEFAULT_CHART);
        assert_eq!(config.thresholds.any_delta, 25);
        assert_eq!(config.thresholds.top_rank, 50);
        assert_eq!(config.templates.top_header, "Top {{topCount}}:");
        assert_eq!(config.templates.top_footer, Templates::default().top_footer);
    }

    #[test]
    fn zero_top_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recap.toml");
        std::fs::write(&path, "top_count = 0\n").unwrap();

        assert!(matches!(ReportConfig::load(&path), Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recap.toml");
        std::fs::write(&path, "top_count = \"many\"\n").unwrap();

        assert!(matches!(ReportConfig::load(&path), Err(ChartError::Toml(_))));
    }
}
