use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use blockify::cli::{self, SettingsOverrides};
use blockify::config::{self, schema::IndentStyleSetting};

#[derive(Debug, Parser)]
#[command(name = "blockify")]
#[command(about = "Normalize added-line blocks for inline overlay rendering")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a JSON render request (file or stdin) and print the JSON result
    Render {
        /// Request file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Pretty-print the JSON response
        #[arg(long)]
        pretty: bool,
    },
    /// Normalize plain text lines and show the resulting block
    Preview {
        /// Text file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Detect the indentation style of plain text
    Detect {
        /// Text file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Show render statistics from the render log
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Args)]
struct SettingsArgs {
    /// Columns per tab, overriding config and request
    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,
    /// Document indentation hint: auto, space, tab
    #[arg(long, value_name = "STYLE", value_parser = parse_style_arg)]
    indent_style: Option<IndentStyleSetting>,
}

impl From<SettingsArgs> for SettingsOverrides {
    fn from(args: SettingsArgs) -> Self {
        Self {
            tab_width: args.tab_width,
            indent_style: args.indent_style,
        }
    }
}

fn parse_style_arg(raw: &str) -> Result<IndentStyleSetting, String> {
    config::parse_indent_style(raw).ok_or_else(|| format!("expected auto, space, or tab: {raw}"))
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.blockify/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key (e.g. editor.tab_width) in the global config
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Render {
            input,
            settings,
            pretty,
        } => cli::run_render(input.as_deref(), settings.into(), pretty),
        Commands::Preview { input, settings } => {
            cli::run_preview(input.as_deref(), settings.into())
        }
        Commands::Detect { input } => cli::run_detect(input.as_deref()),
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
