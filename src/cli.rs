/// Output flavour of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Forum-ready text from the configured templates.
    Bbcode,
    /// The classified report as JSON.
    Json,
}

/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub date: Option<chrono::NaiveDate>,
    pub data_dir: Option<std::path::PathBuf>,
    pub chart: Option<String>,
    pub top: Option<usize>,
    pub config: Option<std::path::PathBuf>,
    pub format: OutputFormat,
    pub output: Option<std::path::PathBuf>,
}

/// Command-line arguments parser using Clap.
///
/// Every flag is optional; unset values fall back to the config file and then
/// to built-in defaults.
impl Args {
    /// Parses the process arguments, exiting with usage on error.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    /// Parses an explicit argument list (the first item is the binary name).
    ///
    /// # Errors
    /// * If an argument is unknown or fails its value parser.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Bbcode,
        };

        Args {
            date: matches.get_one::<chrono::NaiveDate>("date").copied(),
            data_dir: matches.get_one::<String>("data-dir").map(std::path::PathBuf::from),
            chart: matches.get_one::<String>("chart").cloned(),
            top: matches.get_one::<usize>("top").copied(),
            config: matches.get_one::<String>("config").map(std::path::PathBuf::from),
            format,
            output: matches.get_one::<String>("output").map(std::path::PathBuf::from),
        }
    }
}

fn command() -> clap::Command {
    clap::Command::new("chart-recap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize a weekly music chart against the week before")
        .arg(
            clap::Arg::new("date")
                .short('d')
                .long("date")
                .help("Any day in the chart week to analyze, YYYY-MM-DD (default: today)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(chart_recap::utils::parse_date)),
        )
        .arg(
            clap::Arg::new("data-dir")
                .short('i')
                .long("data-dir")
                .help("Directory holding <chart>/<YYYY-MM-DD>.csv files")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("chart")
                .long("chart")
                .help("Chart name, used as the sub-directory of the data dir")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("top")
                .short('t')
                .long("top")
                .help("Number of entries in the top section")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_usize_positive)),
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML file with report settings and templates")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("format")
                .short('f')
                .long("format")
                .help("Output format")
                .value_parser(["bbcode", "json"])
                .default_value("bbcode")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the report to this file instead of stdout")
                .num_args(1),
        )
}

/// Validates that the top count is a positive integer.
///
/// # Arguments
/// * `s` - String representation of the count.
///
/// # Returns
/// * `Result<usize>` - Validated count.
fn parse_usize_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Not a valid number: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_unset() {
        let args = Args::try_parse_from(["chart-recap"]).unwrap();
        assert!(args.date.is_none());
        assert!(args.top.is_none());
        assert_eq!(args.format, OutputFormat::Bbcode);
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "chart-recap",
            "--date",
            "2024-03-02",
            "--data-dir",
            "charts",
            "--chart",
            "billboard-200",
            "--top",
            "10",
            "--format",
            "json",
            "-o",
            "out/recap.json",
        ])
        .unwrap();

        assert_eq!(args.date, chrono::NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(args.chart.as_deref(), Some("billboard-200"));
        assert_eq!(args.top, Some(10));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output, Some(std::path::PathBuf::from("out/recap.json")));
    }

    #[test]
    fn rejects_zero_top_and_bad_date() {
        assert!(Args::try_parse_from(["chart-recap", "--top", "0"]).is_err());
        assert!(Args::try_parse_from(["chart-recap", "--date", "yesterday"]).is_err());
        assert!(Args::try_parse_from(["chart-recap", "--format", "html"]).is_err());
    }
}
