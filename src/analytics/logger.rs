use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::block::IndentStyle;
use crate::normalize::Blockified;

// ---------------------------------------------------------------------------
// Render log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the render log (`~/.blockify/render-log.jsonl` by
/// default).
///
/// One entry is written per `render` or `preview` invocation, successful or
/// not. Used by `blockify stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLogEntry {
    pub timestamp: String,
    /// CLI command that produced the entry: `"render"` or `"preview"`.
    pub command: String,
    /// Number of input lines.
    pub lines: usize,
    /// Classified indentation style (only set on success).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub indent_style: Option<IndentStyle>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tab_width: Option<usize>,
    /// Chars of common indent removed per line.
    #[serde(default)]
    pub common_indent: usize,
    /// Output block width in chars.
    #[serde(default)]
    pub width: usize,
    #[serde(default = "default_true")]
    pub success: bool,
    /// Contract violation message when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    /// Wall-clock time spent in the normalizer (microseconds).
    #[serde(default)]
    pub duration_us: u64,
}

fn default_true() -> bool {
    true
}

impl RenderLogEntry {
    /// Entry for a block that normalized cleanly.
    pub fn success(command: &str, lines: usize, output: &Blockified, elapsed: Duration) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            lines,
            indent_style: Some(output.indent_style),
            tab_width: Some(output.tab_width),
            common_indent: output.common_indent,
            width: output.width,
            success: true,
            error: None,
            duration_us: duration_micros(elapsed),
        }
    }

    /// Entry for a block rejected by the normalizer.
    pub fn failure(command: &str, lines: usize, error: &str, elapsed: Duration) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            command: command.to_string(),
            lines,
            indent_style: None,
            tab_width: None,
            common_indent: 0,
            width: 0,
            success: false,
            error: Some(error.to_string()),
            duration_us: duration_micros(elapsed),
        }
    }
}

fn duration_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Append an entry to the render log at `path`.
///
/// Best-effort: `None` (logging disabled) and I/O failures are ignored so a
/// logging problem never fails a render.
pub fn log_render(path: Option<&Path>, entry: &RenderLogEntry) {
    if let Some(path) = path {
        let _ = append_log_entry(path, entry);
    }
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from the render log.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<RenderLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| serde_json::from_str::<RenderLogEntry>(&line).ok())
        .collect()
}

/// Read log entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(path: &Path, days: Option<u32>) -> Vec<RenderLogEntry> {
    let entries = read_all_entries(path);

    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_log_entry(path: &Path, entry: &RenderLogEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> Blockified {
        Blockified {
            lines: Vec::new(),
            indent_style: IndentStyle::Tab,
            tab_width: 2,
            common_indent: 2,
            width: 7,
        }
    }

    #[test]
    fn entries_round_trip_through_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("render-log.jsonl");

        let ok = RenderLogEntry::success("render", 2, &sample_output(), Duration::from_micros(40));
        let failed = RenderLogEntry::failure("preview", 1, "bad range", Duration::from_micros(5));
        log_render(Some(path.as_path()), &ok);
        log_render(Some(path.as_path()), &failed);

        let entries = read_all_entries(&path);
        assert_eq!(entries, vec![ok, failed]);
        assert_eq!(entries[0].indent_style, Some(IndentStyle::Tab));
        assert_eq!(entries[0].duration_us, 40);
        assert_eq!(entries[1].error.as_deref(), Some("bad range"));
    }

    #[test]
    fn indent_style_is_written_as_kebab_case() {
        let entry = RenderLogEntry::success("render", 2, &sample_output(), Duration::ZERO);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""indent_style":"tab""#));

        let parsed: RenderLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.indent_style, Some(IndentStyle::Tab));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render-log.jsonl");
        let entry = RenderLogEntry::failure("render", 0, "x", Duration::ZERO);
        let mut content = String::from("not json\n");
        content.push_str(&serde_json::to_string(&entry).unwrap());
        content.push('\n');
        fs::write(&path, content).unwrap();

        assert_eq!(read_all_entries(&path).len(), 1);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_all_entries(&dir.path().join("absent.jsonl")).is_empty());
    }

    #[test]
    fn disabled_logging_writes_nothing() {
        let entry = RenderLogEntry::failure("render", 0, "x", Duration::ZERO);
        log_render(None, &entry);
    }

    #[test]
    fn day_filter_drops_old_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render-log.jsonl");
        let mut old = RenderLogEntry::failure("render", 0, "x", Duration::ZERO);
        old.timestamp = "2000-01-01T00:00:00+00:00".to_string();
        let fresh = RenderLogEntry::success("render", 1, &sample_output(), Duration::ZERO);
        log_render(Some(path.as_path()), &old);
        log_render(Some(path.as_path()), &fresh);

        assert_eq!(read_entries_since_days(&path, None).len(), 2);
        assert_eq!(read_entries_since_days(&path, Some(7)), vec![fresh]);
    }
}
