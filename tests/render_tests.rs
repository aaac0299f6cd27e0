/// Render-request tests.
///
/// Drive `render_json` the way `blockify render` does: a JSON request in,
/// a JSON response out, with settings layered from config, request, and
/// command-line flags. Each test logs into its own temp directory.
use blockify::analytics::{logger, reporter};
use blockify::cli::{SettingsOverrides, render_json};
use blockify::config::BlockifyConfig;
use blockify::config::schema::IndentStyleSetting;
use serde_json::Value;

fn config_in(dir: &tempfile::TempDir) -> BlockifyConfig {
    let mut config = BlockifyConfig::default();
    config.logging.path = dir.path().join("render-log.jsonl").display().to_string();
    config
}

fn render(config: &BlockifyConfig, request: &str, flags: SettingsOverrides) -> Value {
    let json = render_json(request, config, flags, false).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn response_uses_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let request = r#"{"document": "file:///a.rs", "lines": [
        {"lineText": "    hello", "ranges": [[4, 9]]},
        {"lineText": "        world"}
    ]}"#;

    let out = render(&config, request, SettingsOverrides::default());

    assert_eq!(out["indentStyle"], "space");
    assert_eq!(out["tabWidth"], 4);
    assert_eq!(out["commonIndent"], 4);
    assert_eq!(out["width"], 9);
    assert_eq!(out["lines"][0]["lineText"], "hello\u{a0}\u{a0}\u{a0}\u{a0}");
    assert_eq!(out["lines"][0]["ranges"], serde_json::json!([[0, 5]]));
    assert_eq!(out["lines"][1]["ranges"], serde_json::json!([]));
}

#[test]
fn request_tab_width_beats_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.editor.tab_width = 8;
    let request = r#"{"tabWidth": 2, "lines": [{"lineText": "\tx"}, {"lineText": "\t\ty"}]}"#;

    let out = render(&config, request, SettingsOverrides::default());

    assert_eq!(out["tabWidth"], 2);
    assert_eq!(out["indentStyle"], "tab");
    assert_eq!(out["commonIndent"], 2);
}

#[test]
fn flags_beat_request() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let request = r#"{"tabWidth": 2, "indentStyle": "space", "lines": [{"lineText": "x"}]}"#;
    let flags = SettingsOverrides {
        tab_width: Some(3),
        indent_style: Some(IndentStyleSetting::Tab),
    };

    let out = render(&config, request, flags);

    assert_eq!(out["tabWidth"], 3);
    assert_eq!(out["indentStyle"], "tab");
}

#[test]
fn malformed_request_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let err = render_json("{not json", &config, SettingsOverrides::default(), false).unwrap_err();
    assert!(err.to_string().contains("invalid render request"));
}

#[test]
fn bad_range_fails_and_is_counted_in_stats() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let log = dir.path().join("render-log.jsonl");

    render(
        &config,
        r#"{"lines": [{"lineText": "\ta"}, {"lineText": "\t\tb"}]}"#,
        SettingsOverrides::default(),
    );
    let bad = r#"{"lines": [{"lineText": "ab", "ranges": [[0, 5]]}]}"#;
    assert!(render_json(bad, &config, SettingsOverrides::default(), false).is_err());

    let entries = logger::read_all_entries(&log);
    assert_eq!(entries.len(), 2);

    let stats = reporter::compute_stats(&log, None);
    assert_eq!(stats.total_renders, 2);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.style_distribution.tab, 1);
    assert_eq!(stats.total_lines, 3);
}

#[test]
fn huge_request_tab_width_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let request = r#"{"tabWidth": 18446744073709551615, "lines": [
        {"lineText": "\tx"},
        {"lineText": "\t\ty"}
    ]}"#;

    let err = render_json(request, &config, SettingsOverrides::default(), false).unwrap_err();
    assert!(err.to_string().contains("tab width must be between 1 and"));

    let entries = logger::read_all_entries(&dir.path().join("render-log.jsonl"));
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].success);
}

#[test]
fn pretty_output_is_multiline_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let json = render_json(
        r#"{"lines": [{"lineText": "x"}]}"#,
        &config,
        SettingsOverrides::default(),
        true,
    )
    .unwrap();

    assert!(json.contains('\n'));
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["width"], 1);
}
