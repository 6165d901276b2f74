//! Human-readable and JSON rendering of check results

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::runner::{CheckReport, Summary};

const NAME_WIDTH: usize = 40;

/// JSON document printed with `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub checked_at: String,
    pub summary: Summary,
    pub results: &'a [CheckReport],
}

impl<'a> JsonReport<'a> {
    pub fn new(reports: &'a [CheckReport], checked_at: DateTime<Utc>) -> Self {
        Self {
            checked_at: checked_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary: Summary::from_reports(reports),
            results: reports,
        }
    }
}

pub fn render_json(reports: &[CheckReport], checked_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(reports, checked_at))
}

/// Render reports as a table followed by a summary
pub fn render_table(reports: &[CheckReport]) -> String {
    let mut out = format!(
        "{:<width$} {:<8} {}\n{}\n",
        "SOURCE",
        "STATE",
        "DETAILS",
        "=".repeat(NAME_WIDTH + 40),
        width = NAME_WIDTH
    );

    for report in reports {
        let item = &report.item;
        let name = truncate(&format!("{}/{}", item.module, item.filename), NAME_WIDTH);
        let details = match (&report.error, &item.new_version) {
            (Some(error), _) => format!("error: {}", error),
            (None, Some(new)) => format!("new version: {}", new.url),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "{:<width$} {:<8} {}\n",
            name,
            item.state.as_str(),
            details,
            width = NAME_WIDTH
        ));
    }

    let summary = Summary::from_reports(reports);
    out.push_str(&format!(
        "\nSummary:\n   Valid: {}\n   Broken: {}\n   Unknown: {}\n   Updates: {}\n   Errors: {}\n   Total: {}\n",
        summary.valid, summary.broken, summary.unknown, summary.updates, summary.errors, summary.total
    ));
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
