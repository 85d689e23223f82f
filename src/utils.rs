/// Parses a `%Y-%m-%d` date string (e.g. "2024-03-02").
///
/// # Arguments
/// * `date_str` - Date in ISO format.
///
/// # Returns
/// * `Result<NaiveDate, String>` - The date, or a message suitable for clap.
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, String> {
    chrono::NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Not a valid YYYY-MM-DD date: {}", e))
}

/// Formats a date the way the report prints it: weekday, month, day, year.
///
/// The day of month is not padded.
///
/// # Example Output
/// ```text
/// Saturday, March 2, 2024
/// ```
pub fn format_long_date(date: chrono::NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Creates the parent directory of `path` if it does not exist yet.
///
/// # Arguments
/// * `path` - Path of a file about to be written.
///
/// # Returns
/// * `std::io::Result<()>` - Success or the error from directory creation.
pub fn ensure_parent_dir_exist<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
