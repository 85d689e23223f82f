mod cli;

use anyhow::Context;
use chart_recap::{CsvChartProvider, ReportConfig, analyze, render, utils};

/// Main entry point of the application.
///
/// This function orchestrates the entire workflow:
/// 1. Parses command-line arguments.
/// 2. Loads the config file and applies command-line overrides.
/// 3. Fetches this week's and last week's charts.
/// 4. Assembles and renders the report.
/// 5. Prints it or writes it to the output file.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Success or an error if any step fails.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let total_start = std::time::Instant::now();
    let args = cli::Args::parse();

    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(chart) = args.chart {
        config.chart = chart;
    }
    if let Some(top) = args.top {
        config.top_count = top;
    }

    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::info!(
        chart = %config.chart,
        %date,
        data_dir = %config.data_dir.display(),
        "Start analysis"
    );

    let provider = CsvChartProvider::new(&config.data_dir);
    let report = analyze(&provider, date, &config)
        .with_context(|| format!("Failed to analyze '{}' chart for {}", config.chart, date))?;

    let rendered = match args.format {
        cli::OutputFormat::Bbcode => render::render_text(&report, &config.templates)?,
        cli::OutputFormat::Json => render::render_json(&report)?,
    };

    match &args.output {
        Some(path) => {
            utils::ensure_parent_dir_exist(path).with_context(|| {
                format!("Failed to create parent directory of {}", path.display())
            })?;
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => print!("{}", rendered),
    }

    tracing::info!(elapsed = ?total_start.elapsed(), "Analysis completed");
    Ok(())
}
