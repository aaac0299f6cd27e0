//! CLI command implementations for blockify.
//!
//! Provides subcommand handlers for:
//! - `blockify render [FILE]` — JSON request in, normalized JSON block out
//! - `blockify preview [FILE]` — plain text in, colored block preview out
//! - `blockify detect [FILE]` — report the detected indentation
//! - `blockify stats` — aggregate the render log
//! - `blockify config show|init|set|reset` — configuration management

pub mod protocol;

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::reporter::{self, Stats};
use crate::block::{self, AddedLine, HighlightRange};
use crate::config::{self, BlockifyConfig, schema::IndentStyleSetting};
use crate::editor::{DocumentPosition, StaticSettings};
use crate::normalize::detect;
use crate::run;

use protocol::RenderRequest;

/// Output format for `blockify stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Editor settings given on the command line. They win over the request
/// and the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub tab_width: Option<usize>,
    pub indent_style: Option<IndentStyleSetting>,
}

/// Combine config, request, and command-line settings (later wins).
fn resolve_settings(
    config: &BlockifyConfig,
    request: SettingsOverrides,
    flags: SettingsOverrides,
) -> StaticSettings {
    let mut settings = config.editor_settings();
    for layer in [request, flags] {
        if let Some(width) = layer.tab_width {
            settings.tab_width = width;
        }
        if let Some(style) = layer.indent_style {
            settings.indent_style = style.as_hint();
        }
    }
    settings
}

/// Read the whole input file, or stdin when no path is given.
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed reading input from stdin")?;
            Ok(buf)
        }
    }
}

// ---------------------------------------------------------------------------
// blockify render
// ---------------------------------------------------------------------------

/// Normalize a JSON render request and write the JSON result to stdout.
pub fn run_render(input: Option<&Path>, flags: SettingsOverrides, pretty: bool) -> Result<()> {
    let raw = read_input(input)?;
    let json = render_json(&raw, &config::load(), flags, pretty)?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{json}").context("failed writing render response to stdout")?;
    Ok(())
}

/// Parse a request, normalize it, and serialize the response.
pub fn render_json(
    raw: &str,
    config: &BlockifyConfig,
    flags: SettingsOverrides,
    pretty: bool,
) -> Result<String> {
    let request: RenderRequest =
        serde_json::from_str(raw).context("invalid render request JSON")?;

    let request_overrides = SettingsOverrides {
        tab_width: request.tab_width,
        indent_style: request.indent_style.map(IndentStyleSetting::from),
    };
    let settings = resolve_settings(config, request_overrides, flags);

    let output = run::execute_render(
        "render",
        config,
        &settings,
        &request.document,
        request.position,
        &request.lines,
    )?;

    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    };
    json.context("failed to serialize render response")
}

// ---------------------------------------------------------------------------
// blockify preview
// ---------------------------------------------------------------------------

/// Normalize plain text lines and print the block with visible glyphs.
pub fn run_preview(input: Option<&Path>, flags: SettingsOverrides) -> Result<()> {
    let raw = read_input(input)?;
    let config = config::load();
    let settings = resolve_settings(&config, SettingsOverrides::default(), flags);
    let lines = block::lines_from_text(&raw);

    let output = run::execute_render(
        "preview",
        &config,
        &settings,
        &input.map(|p| p.display().to_string()).unwrap_or_default(),
        DocumentPosition::default(),
        &lines,
    )?;
    let glyph = config.blockify_options()?.glyph;

    println!("{}", "blockify preview".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Indent style: ".bold(), output.indent_style);
    println!("  {} {}", "Tab width:    ".bold(), output.tab_width);
    println!("  {} {} chars", "Common indent:".bold(), output.common_indent);
    println!("  {} {} chars", "Block width:  ".bold(), output.width);
    println!();

    for line in &output.lines {
        println!("{}{}", styled_line(line, glyph), "│".dimmed());
    }

    Ok(())
}

/// Replace glyph units with a visible middle dot.
fn visible_glyphs(text: &str, glyph: char) -> String {
    text.chars()
        .map(|c| if c == glyph { '·' } else { c })
        .collect()
}

/// Render one output line: glyphs dimmed, highlighted ranges in green.
fn styled_line(line: &AddedLine, glyph: char) -> String {
    let shown_text = visible_glyphs(&line.line_text, glyph);
    let mut out = String::new();
    for (index, (c, shown)) in line.line_text.chars().zip(shown_text.chars()).enumerate() {
        let shown = shown.to_string();
        let highlighted = line.ranges.iter().any(|r| in_range(r, index));
        let piece = if highlighted {
            shown.as_str().on_green().black()
        } else if c == glyph {
            shown.as_str().dimmed()
        } else {
            shown.as_str().normal()
        };
        out.push_str(&piece.to_string());
    }
    out
}

fn in_range(range: &HighlightRange, index: usize) -> bool {
    range.start <= index && index < range.end
}

// ---------------------------------------------------------------------------
// blockify detect
// ---------------------------------------------------------------------------

/// Print the indentation detected in plain text.
pub fn run_detect(input: Option<&Path>) -> Result<()> {
    let raw = read_input(input)?;
    let detected = detect::detect_indent(&raw);

    match detected.style {
        Some(style) => {
            println!("  {} {}", "Style: ".bold(), style);
            println!("  {} {}", "Amount:".bold(), detected.amount);
            println!(
                "  {} {:?}",
                "Indent:".bold(),
                detected.indent_string()
            );
        }
        None => println!("{}", "No indentation found.".yellow()),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// blockify stats
// ---------------------------------------------------------------------------

/// Show render statistics from the render log.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let config = config::load();
    let Some(path) = config.log_path() else {
        println!("{}", "Render logging is disabled.".yellow());
        return Ok(());
    };

    let stats = reporter::compute_stats(&path, days);
    if stats.total_renders == 0 {
        println!(
            "{}",
            "No data yet. Run blockify render or preview to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", stats_json(&stats)?),
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &Stats) {
    println!("{}", "blockify Render Report".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("  {} {}", "Total renders:".bold(), stats.total_renders);
    println!("  {} {}", "Failures:     ".bold(), stats.failures);
    println!("  {} {}", "Lines handled:".bold(), stats.total_lines);
    println!(
        "  {} {:.1} chars",
        "Avg indent:   ".bold(),
        stats.avg_common_indent
    );
    println!(
        "  {} {:.0} µs",
        "Avg time:     ".bold(),
        stats.avg_duration_us
    );
    println!();

    let dist = &stats.style_distribution;
    println!("{}", "Indent Styles".bold().cyan());
    println!(
        "  Space: {} ({:.0}%)  Tab: {} ({:.0}%)",
        dist.space,
        dist.pct(dist.space),
        dist.tab,
        dist.pct(dist.tab),
    );
}

fn stats_json(stats: &Stats) -> Result<String> {
    let value = serde_json::json!({
        "total_renders": stats.total_renders,
        "failures": stats.failures,
        "total_lines": stats.total_lines,
        "avg_common_indent": stats.avg_common_indent,
        "avg_duration_us": stats.avg_duration_us,
        "style_distribution": {
            "space": stats.style_distribution.space,
            "tab": stats.style_distribution.tab,
        },
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn print_stats_csv(stats: &Stats) {
    println!("total_renders,failures,total_lines,avg_common_indent,avg_duration_us,space,tab");
    println!(
        "{},{},{},{:.1},{:.0},{},{}",
        stats.total_renders,
        stats.failures,
        stats.total_lines,
        stats.avg_common_indent,
        stats.avg_duration_us,
        stats.style_distribution.space,
        stats.style_distribution.tab,
    );
}

// ---------------------------------------------------------------------------
// blockify config
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective blockify Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.blockify/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.blockify/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".blockify.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".blockify.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "BLOCKIFY_* environment variables".dimmed()
    );

    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
