/// Configuration schema and defaults for blockify.
///
/// Defines the TOML-serializable configuration structure with its sections:
/// `[editor]`, `[render]`, and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

use crate::block::{IndentStyle, UNICODE_SPACE};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level blockify configuration.
///
/// Maps directly to the `~/.blockify/config.toml` and `.blockify.toml` file
/// schemas. Missing sections fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockifyConfig {
    pub editor: EditorConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [editor]
// ---------------------------------------------------------------------------

/// Document indentation hint used when a block has no indentation of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentStyleSetting {
    /// No hint: blocks without evidence are treated as space-indented.
    #[default]
    Auto,
    Space,
    Tab,
}

impl IndentStyleSetting {
    /// The hint handed to the normalizer, if any.
    pub fn as_hint(self) -> Option<IndentStyle> {
        match self {
            Self::Auto => None,
            Self::Space => Some(IndentStyle::Space),
            Self::Tab => Some(IndentStyle::Tab),
        }
    }
}

impl From<IndentStyle> for IndentStyleSetting {
    fn from(style: IndentStyle) -> Self {
        match style {
            IndentStyle::Space => Self::Space,
            IndentStyle::Tab => Self::Tab,
        }
    }
}

impl std::fmt::Display for IndentStyleSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Space => write!(f, "space"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

/// Stand-in for the host editor's per-document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Columns per tab character.
    pub tab_width: usize,
    /// Document indentation hint: `auto`, `space`, or `tab`.
    pub indent_style: IndentStyleSetting,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            indent_style: IndentStyleSetting::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// [render]
// ---------------------------------------------------------------------------

/// Output rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Glyph unit: a single whitespace char, or a code point like `U+2007`.
    pub glyph: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            glyph: UNICODE_SPACE.to_string(),
        }
    }
}

impl RenderConfig {
    /// The configured glyph as a char, if it parses.
    pub fn glyph_char(&self) -> Option<char> {
        parse_glyph(&self.glyph)
    }
}

/// Parse a glyph setting: a single char, or `U+XXXX` hex notation.
pub fn parse_glyph(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(c);
    }

    let hex = raw
        .strip_prefix("U+")
        .or_else(|| raw.strip_prefix("u+"))?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Render log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether render events are logged.
    pub enabled: bool,
    /// Path to the render log file. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.blockify/render-log.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl BlockifyConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `blockify config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# blockify Configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (BLOCKIFY_*)
#   2. Project config (.blockify.toml in current directory)
#   3. User global config (~/.blockify/config.toml)
#   4. Built-in defaults

[editor]
tab_width = 4            # Columns per tab when a block is tab-indented
indent_style = "auto"    # auto | space | tab (used only when a block has no indentation)

[render]
glyph = "\u00A0"       # Single whitespace char or "U+XXXX"

[logging]
enabled = true
path = "~/.blockify/render-log.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
