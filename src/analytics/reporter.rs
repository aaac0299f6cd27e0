use std::path::Path;

use crate::analytics::logger::{self, RenderLogEntry};
use crate::block::IndentStyle;

// ---------------------------------------------------------------------------
// Aggregate stats
// ---------------------------------------------------------------------------

/// Aggregated render statistics for `blockify stats`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub total_renders: usize,
    pub failures: usize,
    pub total_lines: usize,
    pub style_distribution: StyleDistribution,
    /// Mean common indent stripped per successful render (chars).
    pub avg_common_indent: f64,
    /// Mean normalizer time per render (microseconds).
    pub avg_duration_us: f64,
}

/// How often each indentation style was classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDistribution {
    pub space: usize,
    pub tab: usize,
}

impl StyleDistribution {
    /// Share of `count` among all classified renders (0.0–100.0).
    pub fn pct(&self, count: usize) -> f64 {
        let total = self.space + self.tab;
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats from the render log, optionally filtered to the
/// last `days` days.
pub fn compute_stats(path: &Path, days: Option<u32>) -> Stats {
    let entries = logger::read_entries_since_days(path, days);
    build_stats(&entries)
}

fn build_stats(entries: &[RenderLogEntry]) -> Stats {
    if entries.is_empty() {
        return Stats::default();
    }

    let total_renders = entries.len();
    let failures = entries.iter().filter(|e| !e.success).count();
    let total_lines = entries.iter().map(|e| e.lines).sum();

    let mut style_distribution = StyleDistribution::default();
    for entry in entries {
        match entry.indent_style {
            Some(IndentStyle::Space) => style_distribution.space += 1,
            Some(IndentStyle::Tab) => style_distribution.tab += 1,
            None => {}
        }
    }

    let successes = total_renders - failures;
    let avg_common_indent = if successes == 0 {
        0.0
    } else {
        entries
            .iter()
            .filter(|e| e.success)
            .map(|e| e.common_indent)
            .sum::<usize>() as f64
            / successes as f64
    };
    let avg_duration_us =
        entries.iter().map(|e| e.duration_us).sum::<u64>() as f64 / total_renders as f64;

    Stats {
        total_renders,
        failures,
        total_lines,
        style_distribution,
        avg_common_indent,
        avg_duration_us,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
