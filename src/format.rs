//! Format verification reports as text or JSON.

use crate::error::{ApiError, SnapshotError};
use crate::verify::{DiffEntry, VerifyReport, VerifySummary};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

/// Width of the widest label, `[MODIFIED]`
const LABEL_WIDTH: usize = 10;

/// Line category in a check report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLabel {
    Ok,
    Modified,
    Missing,
    Added,
    Error,
}

impl ReportLabel {
    fn text(&self) -> &'static str {
        match self {
            ReportLabel::Ok => "[OK]",
            ReportLabel::Modified => "[MODIFIED]",
            ReportLabel::Missing => "[MISSING]",
            ReportLabel::Added => "[ADDED]",
            ReportLabel::Error => "[ERROR]",
        }
    }
}

impl From<DiffEntry> for ReportLabel {
    fn from(entry: DiffEntry) -> Self {
        match entry {
            DiffEntry::Unchanged => ReportLabel::Ok,
            DiffEntry::Modified => ReportLabel::Modified,
            DiffEntry::Missing => ReportLabel::Missing,
        }
    }
}

/// Terminal styling switch
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Palette { color: false }
    }

    /// Padded, optionally colored label
    pub fn label(&self, label: ReportLabel) -> String {
        let padded = format!("{:<width$}", label.text(), width = LABEL_WIDTH);
        if !self.color {
            return padded;
        }
        match label {
            ReportLabel::Ok => padded.green().to_string(),
            ReportLabel::Modified => padded.red().to_string(),
            ReportLabel::Missing => padded.yellow().to_string(),
            ReportLabel::Added => padded.cyan().to_string(),
            ReportLabel::Error => padded.red().bold().to_string(),
        }
    }

    /// `[+]` marker for confirmations
    pub fn success(&self) -> String {
        if self.color {
            "[+]".green().to_string()
        } else {
            "[+]".to_string()
        }
    }
}

/// One line per snapshot entry, then additions, then a summary table.
/// With `quiet`, unchanged entries are left out.
pub fn format_check_text(report: &VerifyReport, palette: Palette, quiet: bool) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        match &entry.result {
            Ok(DiffEntry::Unchanged) if quiet => {}
            Ok(verdict) => {
                out.push_str(&format!(
                    "{} {}\n",
                    palette.label((*verdict).into()),
                    entry.path
                ));
            }
            Err(err) => {
                out.push_str(&format!(
                    "{} {} ({})\n",
                    palette.label(ReportLabel::Error),
                    entry.path,
                    error_cause(err)
                ));
            }
        }
    }
    for path in &report.added {
        out.push_str(&format!("{} {}\n", palette.label(ReportLabel::Added), path));
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format_summary_table(&report.summary()));
    out
}

/// Verdict counts as a table
pub fn format_summary_table(summary: &VerifySummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Status", "Files"]);
    for (label, count) in [
        ("OK", summary.unchanged),
        ("MODIFIED", summary.modified),
        ("MISSING", summary.missing),
        ("ADDED", summary.added),
        ("ERROR", summary.errors),
    ] {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    table.to_string()
}

/// Machine-readable report: `{ entries, added, summary, drift }`
pub fn format_check_json(report: &VerifyReport) -> Result<String, ApiError> {
    let entries: Vec<serde_json::Value> = report
        .entries
        .iter()
        .map(|entry| match &entry.result {
            Ok(verdict) => json!({ "path": entry.path, "status": verdict }),
            Err(err) => json!({
                "path": entry.path,
                "status": "error",
                "error": err.to_string(),
            }),
        })
        .collect();
    let out = json!({
        "entries": entries,
        "added": report.added,
        "summary": report.summary(),
        "drift": report.has_drift(),
    });
    serde_json::to_string_pretty(&out).map_err(|e| ApiError::from(SnapshotError::Encode(e)))
}

fn error_cause(err: &SnapshotError) -> String {
    match err {
        SnapshotError::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
