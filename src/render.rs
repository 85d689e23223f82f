//! Turns an assembled report into text.
//!
//! Templates are Handlebars strings rendered without HTML escaping. The
//! defaults produce BBCode forum markup; nothing upstream of this module
//! knows about markup.

use handlebars::Handlebars;
use serde_json::{Map, Value, json};

use crate::classify::Variant;
use crate::error::Result;
use crate::report::{ChartReport, ReportItem, SectionKind};
use crate::utils;

/// Every header, entry line and footer the renderer emits.
///
/// Entry templates may use `{{rank}}`, `{{artist}}`, `{{title}}`,
/// `{{weeks}}`, `{{peak}}`, `{{lastPos}}`, `{{plural}}` and `{{delta}}`. All
/// templates may use `{{topCount}}`, `{{chartTitle}}`, `{{chartDate}}`,
/// `{{releaseDate}}`, `{{startDate}}` and `{{endDate}}`. Single braces are
/// plain text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Templates {
    pub chart_header: String,

    pub top_header: String,
    pub top_entry: String,
    pub top_footer: String,

    pub dropped_header: String,
    pub left: String,
    pub left_from_peak: String,
    pub left_after_one_week: String,
    pub dropped_footer: String,

    pub debut_header: String,
    pub debut: String,
    pub debut_footer: String,

    pub re_entry_header: String,
    pub re_entry: String,
    pub re_entry_footer: String,

    pub big_moves_header: String,
    pub rose: String,
    pub rose_to_peak: String,
    pub fell: String,
    pub fell_from_peak: String,
    pub big_moves_footer: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            chart_header: "The {{chartTitle}} chart dated {{chartDate}} was released on {{releaseDate}}. This chart tracks United States airplay, sales, and streaming beginning on {{startDate}} and ending on {{endDate}}.\n".to_string(),

            top_header: "These songs are in the top {{topCount}} this week:[list=1]".to_string(),
            top_entry: "[*][b]{{artist}}[/b] - \"{{title}}\", {{weeks}} week{{plural}} on chart, peaked at #{{peak}}".to_string(),
            top_footer: "[/list]\n".to_string(),

            dropped_header: "These songs left the chart this week:[list]".to_string(),
            left: "[*][b]{{artist}}[/b] - \"{{title}}\" left the chart after {{weeks}} weeks. It peaked at #{{peak}} and its position last week was #{{lastPos}}.".to_string(),
            left_from_peak: "[*][b]{{artist}}[/b] - \"{{title}}\" left the chart after {{weeks}} weeks from its peak position at #{{peak}}.".to_string(),
            left_after_one_week: "[*][b]{{artist}}[/b] - \"{{title}}\" left the chart after {{weeks}} week at #{{peak}}.".to_string(),
            dropped_footer: "[/list]\n".to_string(),

            debut_header: "These songs made their debut on the Hot 100 this week:[list]".to_string(),
            debut: "[*][b]{{artist}}[/b] - \"{{title}}\" entered the chart for the first time at #{{peak}}.".to_string(),
            debut_footer: "[/list]\n".to_string(),

            re_entry_header: "These songs re-entered the chart this week:[list]".to_string(),
            re_entry: "[*][b]{{artist}}[/b] - \"{{title}}\" re-entered the chart this week at #{{rank}}. It has spent {{weeks}} weeks on the chart, peaking at #{{peak}}.".to_string(),
            re_entry_footer: "[/list]\n".to_string(),

            big_moves_header: "These songs made big moves:[list]".to_string(),
            rose: "[*][b]{{artist}}[/b] - \"{{title}}\" rose {{delta}} spots from #{{lastPos}} to #{{rank}}. It has spent {{weeks}} weeks on the chart, peaking at #{{peak}}.".to_string(),
            rose_to_peak: "[*][b]{{artist}}[/b] - \"{{title}}\" rose {{delta}} spots from #{{lastPos}} to #{{rank}}, its all-time peak. It has spent {{weeks}} weeks on the chart.".to_string(),
            fell: "[*][b]{{artist}}[/b] - \"{{title}}\" fell {{delta}} spots from #{{lastPos}} to #{{rank}}. It has spent {{weeks}} weeks on the chart, peaking at #{{peak}}.".to_string(),
            fell_from_peak: "[*][b]{{artist}}[/b] - \"{{title}}\" fell {{delta}} spots to #{{rank}} from its all-time peak at #{{lastPos}}. It has spent {{weeks}} weeks on the chart.".to_string(),
            big_moves_footer: "[/list]\n".to_string(),
        }
    }
}

impl Templates {
    fn entry(&self, variant: Variant) -> &str {
        match variant {
            Variant::TopEntry => self.top_entry.as_str(),
            Variant::Debut => self.debut.as_str(),
            Variant::ReEntry => self.re_entry.as_str(),
            Variant::LeftAfterOneWeek => self.left_after_one_week.as_str(),
            Variant::LeftFromPeak => self.left_from_peak.as_str(),
            Variant::Left => self.left.as_str(),
            Variant::RoseToPeak => self.rose_to_peak.as_str(),
            Variant::Rose => self.rose.as_str(),
            Variant::FellFromPeak => self.fell_from_peak.as_str(),
            Variant::Fell => self.fell.as_str(),
        }
    }

    fn frame(&self, kind: SectionKind) -> (&str, &str) {
        match kind {
            SectionKind::Top => (self.top_header.as_str(), self.top_footer.as_str()),
            SectionKind::Dropped => (self.dropped_header.as_str(), self.dropped_footer.as_str()),
            SectionKind::Debuts => (self.debut_header.as_str(), self.debut_footer.as_str()),
            SectionKind::ReEntries => {
                (self.re_entry_header.as_str(), self.re_entry_footer.as_str())
            }
            SectionKind::BigMoves => {
                (self.big_moves_header.as_str(), self.big_moves_footer.as_str())
            }
        }
    }
}

fn report_vars(report: &ChartReport) -> Map<String, Value> {
    let mut vars = Map::new();
    vars.insert("topCount".into(), json!(report.top_count));
    vars.insert("chartTitle".into(), json!(report.chart_title));
    vars.insert("chartDate".into(), json!(utils::format_long_date(report.dates.chart_date)));
    vars.insert("releaseDate".into(), json!(utils::format_long_date(report.dates.release_date)));
    vars.insert("startDate".into(), json!(utils::format_long_date(report.dates.window_start)));
    vars.insert("endDate".into(), json!(utils::format_long_date(report.dates.window_end)));
    vars
}

fn item_vars(item: &ReportItem, kind: SectionKind, globals: &Map<String, Value>) -> Value {
    let entry = &item.entry;
    // A dropped entry is last week's row, so its rank is the last position it held.
    let last_pos = match kind {
        SectionKind::Dropped => entry.rank,
        _ => entry.last_pos,
    };

    let mut vars = globals.clone();
    vars.insert("rank".into(), json!(entry.rank));
    vars.insert("artist".into(), json!(entry.artist));
    vars.insert("title".into(), json!(entry.title));
    vars.insert("weeks".into(), json!(entry.weeks));
    vars.insert("peak".into(), json!(entry.peak_pos));
    vars.insert("lastPos".into(), json!(last_pos));
    vars.insert("plural".into(), json!(if entry.weeks > 1 { "s" } else { "" }));
    vars.insert("delta".into(), json!(item.delta.map(i64::abs)));
    Value::Object(vars)
}

/// Renders the whole report with the given templates.
///
/// Output starts with the chart header, followed by each section's header,
/// one line per item and the footer. Empty sections still print their
/// header and footer.
///
/// # Errors
/// * `ChartError::Template` if a template does not parse or render.
pub fn render_text(report: &ChartReport, templates: &Templates) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let globals = report_vars(report);
    let header_vars = Value::Object(globals.clone());
    let mut out = String::new();

    out.push_str(&handlebars.render_template(&templates.chart_header, &header_vars)?);
    out.push('\n');

    for section in &report.sections {
        let (header, footer) = templates.frame(section.kind);
        out.push_str(&handlebars.render_template(header, &header_vars)?);
        out.push('\n');

        for item in &section.items {
            let vars = item_vars(item, section.kind, &globals);
            out.push_str(&handlebars.render_template(templates.entry(item.variant), &vars)?);
            out.push('\n');
        }

        out.push_str(&handlebars.render_template(footer, &header_vars)?);
        out.push('\n');
    }
    Ok(out)
}

/// Serializes the report as pretty-printed JSON for other tools.
pub fn render_json(report: &ChartReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
