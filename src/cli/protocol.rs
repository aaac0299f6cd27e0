use serde::Deserialize;

use crate::block::{AddedLine, IndentStyle};
use crate::editor::DocumentPosition;

/// Render request read by `blockify render`.
///
/// Field names follow the editor's camelCase decoration records:
///
/// ```json
/// {"document": "file:///src/main.rs",
///  "position": {"line": 12, "character": 0},
///  "tabWidth": 2,
///  "lines": [{"lineText": "\thello", "ranges": [[1, 6]]}]}
/// ```
///
/// `tabWidth` and `indentStyle` override the configured editor settings for
/// this request only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub position: DocumentPosition,
    #[serde(default)]
    pub tab_width: Option<usize>,
    #[serde(default)]
    pub indent_style: Option<IndentStyle>,
    pub lines: Vec<AddedLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::HighlightRange;

    #[test]
    fn deserializes_full_request() {
        let input = r#"{
            "document": "file:///a.rs",
            "position": {"line": 3, "character": 4},
            "tabWidth": 2,
            "indentStyle": "tab",
            "lines": [{"lineText": "\thello", "ranges": [[1, 6]]}]
        }"#;
        let request: RenderRequest = serde_json::from_str(input).unwrap();

        assert_eq!(request.document, "file:///a.rs");
        assert_eq!(request.position, DocumentPosition::new(3, 4));
        assert_eq!(request.tab_width, Some(2));
        assert_eq!(request.indent_style, Some(IndentStyle::Tab));
        assert_eq!(request.lines[0].line_text, "\thello");
        assert_eq!(request.lines[0].ranges, vec![HighlightRange::new(1, 6)]);
    }

    #[test]
    fn deserializes_minimal_request() {
        let request: RenderRequest = serde_json::from_str(r#"{"lines": []}"#).unwrap();
        assert!(request.document.is_empty());
        assert_eq!(request.position, DocumentPosition::default());
        assert_eq!(request.tab_width, None);
        assert!(request.lines.is_empty());
    }

    #[test]
    fn rejects_request_without_lines() {
        assert!(serde_json::from_str::<RenderRequest>(r#"{"document": "x"}"#).is_err());
    }
}
