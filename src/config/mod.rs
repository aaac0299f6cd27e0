/// Configuration system for blockify.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::BlockifyConfig::default()`]
/// 2. **User global config** — `~/.blockify/config.toml`
/// 3. **Project local config** — `.blockify.toml` in the current working directory
/// 4. **Environment variables** — `BLOCKIFY_*` overrides (highest precedence)
///
/// Later layers win key by key. Keys no layer sets fall back to defaults.
///
/// # Usage
///
/// ```rust,ignore
/// use blockify::config;
///
/// let cfg = config::load();
/// let settings = cfg.editor_settings();
/// let options = cfg.blockify_options()?;
/// ```
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::BlockifyConfig;

use crate::editor::StaticSettings;
use crate::normalize::BlockifyOptions;
use crate::normalize::rewrite::MAX_TAB_WIDTH;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved blockify configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> BlockifyConfig {
    let mut merged = toml::Value::Table(toml::Table::new());

    for path in [global_config_path(), project_config_path()] {
        if let Some(layer) = load_toml_file(path) {
            merge_toml(&mut merged, layer);
        }
    }

    let mut config: BlockifyConfig = merged.try_into().unwrap_or_default();
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content does not fit the schema. A broken config file must not stop
/// rendering.
fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    value.clone().try_into::<BlockifyConfig>().ok()?;
    Some(value)
}

/// Deep-merge a config layer into the accumulated TOML tree.
///
/// Tables merge key by key; any other value in `overlay` replaces the base.
/// Keys a layer leaves unset keep the value from earlier layers.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// Resolution into normalizer inputs
// ---------------------------------------------------------------------------

impl BlockifyConfig {
    /// Editor settings backed by the `[editor]` section.
    pub fn editor_settings(&self) -> StaticSettings {
        StaticSettings::new(self.editor.tab_width, self.editor.indent_style.as_hint())
    }

    /// Normalizer options backed by the `[render]` section.
    pub fn blockify_options(&self) -> Result<BlockifyOptions> {
        let glyph = self
            .render
            .glyph_char()
            .with_context(|| format!("invalid render.glyph '{}'", self.render.glyph))?;
        if !glyph.is_whitespace() {
            anyhow::bail!("render.glyph must be a whitespace character, got {glyph:?}");
        }
        Ok(BlockifyOptions { glyph })
    }

    /// Resolved render log path, or `None` when logging is disabled.
    pub fn log_path(&self) -> Option<PathBuf> {
        if !self.logging.enabled {
            return None;
        }
        expand_home(&self.logging.path)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> Option<PathBuf> {
    if path == "~" {
        return dirs::home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.blockify/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".blockify").join("config.toml"))
}

/// Path to the project local config: `.blockify.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".blockify.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BLOCKIFY_TAB_WIDTH` — columns per tab (1 to `MAX_TAB_WIDTH`)
/// - `BLOCKIFY_INDENT_STYLE` — `auto`, `space`, or `tab`
/// - `BLOCKIFY_GLYPH` — glyph unit (single char or `U+XXXX`)
/// - `BLOCKIFY_LOGGING` — render log on/off (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut BlockifyConfig) {
    if let Ok(val) = std::env::var("BLOCKIFY_TAB_WIDTH")
        && let Ok(width) = val.trim().parse::<usize>()
        && (1..=MAX_TAB_WIDTH).contains(&width)
    {
        config.editor.tab_width = width;
    }
    if let Ok(val) = std::env::var("BLOCKIFY_INDENT_STYLE")
        && let Some(style) = parse_indent_style(&val)
    {
        config.editor.indent_style = style;
    }
    if let Ok(val) = std::env::var("BLOCKIFY_GLYPH")
        && schema::parse_glyph(&val).is_some_and(char::is_whitespace)
    {
        config.render.glyph = val;
    }
    if let Ok(val) = std::env::var("BLOCKIFY_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Parse an indent style string.
pub fn parse_indent_style(val: &str) -> Option<schema::IndentStyleSetting> {
    match val.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(schema::IndentStyleSetting::Auto),
        "space" | "spaces" => Some(schema::IndentStyleSetting::Space),
        "tab" | "tabs" => Some(schema::IndentStyleSetting::Tab),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.blockify/config.toml`.
///
/// Creates the `~/.blockify/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.blockify/ directory")?;
    }

    fs::write(&path, BlockifyConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Reads the current global config (or defaults), updates the specified key,
/// and writes the result back. Supports dotted keys like `editor.tab_width`.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&BlockifyConfig::default())
            .context("failed to serialize default config")?
    };

    let output = update_toml(&content, key, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Apply a dotted-key update to TOML text and check the result still loads.
fn update_toml(content: &str, key: &str, value: &str) -> Result<String> {
    let mut root: toml::Value =
        toml::from_str(content).context("failed to parse config as TOML value")?;

    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    let parsed: BlockifyConfig =
        toml::from_str(&output).with_context(|| format!("invalid value for '{key}': {value}"))?;
    if !(1..=MAX_TAB_WIDTH).contains(&parsed.editor.tab_width) {
        anyhow::bail!("editor.tab_width must be between 1 and {MAX_TAB_WIDTH}");
    }
    parsed.blockify_options()?;

    Ok(output)
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::IndentStyle;
    use schema::IndentStyleSetting;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn parse_indent_style_handles_variants() {
        assert_eq!(parse_indent_style("auto"), Some(IndentStyleSetting::Auto));
        assert_eq!(parse_indent_style("Spaces"), Some(IndentStyleSetting::Space));
        assert_eq!(parse_indent_style(" tab "), Some(IndentStyleSetting::Tab));
        assert_eq!(parse_indent_style("both"), None);
    }

    #[test]
    fn editor_settings_follow_config() {
        let mut config = BlockifyConfig::default();
        config.editor.tab_width = 2;
        config.editor.indent_style = IndentStyleSetting::Tab;
        let settings = config.editor_settings();
        assert_eq!(settings.tab_width, 2);
        assert_eq!(settings.indent_style, Some(IndentStyle::Tab));
    }

    #[test]
    fn blockify_options_reject_bad_glyph() {
        let mut config = BlockifyConfig::default();
        config.render.glyph = "two".to_string();
        assert!(config.blockify_options().is_err());

        config.render.glyph = "x".to_string();
        assert!(config.blockify_options().is_err());

        config.render.glyph = "U+2007".to_string();
        assert_eq!(config.blockify_options().unwrap().glyph, '\u{2007}');
    }

    #[test]
    fn log_path_is_none_when_disabled() {
        let mut config = BlockifyConfig::default();
        config.logging.enabled = false;
        assert!(config.log_path().is_none());
    }

    #[test]
    fn expand_home_leaves_absolute_paths() {
        assert_eq!(
            expand_home("/tmp/log.jsonl"),
            Some(PathBuf::from("/tmp/log.jsonl"))
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.jsonl"), Some(home.join("x.jsonl")));
        }
    }

    #[test]
    fn merge_toml_keeps_keys_the_overlay_leaves_unset() {
        let mut base: toml::Value =
            toml::from_str("[editor]\ntab_width = 2\nindent_style = \"tab\"\n").unwrap();
        let overlay: toml::Value =
            toml::from_str("[editor]\ntab_width = 8\n[logging]\nenabled = false\n").unwrap();
        merge_toml(&mut base, overlay);

        let config: BlockifyConfig = base.try_into().unwrap();
        assert_eq!(config.editor.tab_width, 8);
        assert_eq!(config.editor.indent_style, IndentStyleSetting::Tab);
        assert!(!config.logging.enabled);
        assert_eq!(config.render, schema::RenderConfig::default());
    }

    #[test]
    fn set_toml_value_updates_integer() {
        let mut root: toml::Value = toml::from_str("[editor]\ntab_width = 4\n").unwrap();
        set_toml_value(&mut root, "editor.tab_width", "2").unwrap();
        assert_eq!(root["editor"]["tab_width"].as_integer(), Some(2));
    }

    #[test]
    fn set_toml_value_updates_bool() {
        let mut root: toml::Value = toml::from_str("[logging]\nenabled = true\n").unwrap();
        set_toml_value(&mut root, "logging.enabled", "off").unwrap();
        assert_eq!(root["logging"]["enabled"].as_bool(), Some(false));
    }

    #[test]
    fn set_toml_value_rejects_unknown_keys() {
        let mut root: toml::Value = toml::from_str("[editor]\ntab_width = 4\n").unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "1").is_err());
        assert!(set_toml_value(&mut root, "editor.nope", "1").is_err());
        assert!(set_toml_value(&mut root, "", "1").is_err());
    }

    #[test]
    fn update_toml_rejects_invalid_values() {
        let defaults = toml::to_string_pretty(&BlockifyConfig::default()).unwrap();
        assert!(update_toml(&defaults, "editor.indent_style", "diagonal").is_err());
        assert!(update_toml(&defaults, "render.glyph", "abc").is_err());
        assert!(update_toml(&defaults, "editor.tab_width", "wide").is_err());
        assert!(update_toml(&defaults, "editor.tab_width", "0").is_err());
        assert!(update_toml(&defaults, "editor.tab_width", "100000").is_err());

        let updated = update_toml(&defaults, "editor.indent_style", "tab").unwrap();
        let config: BlockifyConfig = toml::from_str(&updated).unwrap();
        assert_eq!(config.editor.indent_style, IndentStyleSetting::Tab);
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: BlockifyConfig = toml::from_str(&toml_str).unwrap();
    }
}
