//! Boundary to the host editor's per-document settings.
//!
//! The normalizer never reads editor configuration itself. Callers hand it an
//! [`EditorSettings`] implementation; [`StaticSettings`] covers the CLI and
//! tests, where the values come from config or the request.

use serde::{Deserialize, Serialize};

use crate::block::IndentStyle;

/// Zero-based position inside a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPosition {
    pub line: u32,
    pub character: u32,
}

impl DocumentPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Editor-side queries consumed by the normalizer. Both must be synchronous
/// and free of side effects.
pub trait EditorSettings {
    /// Indentation style the editor detected for the whole document, if any.
    ///
    /// Only a fallback: block-level detection wins whenever the block has
    /// indentation of its own.
    fn indentation_style(&self, document: &str) -> Option<IndentStyle>;

    /// Columns one tab occupies at `position` in `document`. Must be >= 1.
    fn tab_width(&self, document: &str, position: DocumentPosition) -> usize;
}

/// Fixed settings that ignore the document and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSettings {
    pub tab_width: usize,
    pub indent_style: Option<IndentStyle>,
}

impl StaticSettings {
    pub fn new(tab_width: usize, indent_style: Option<IndentStyle>) -> Self {
        Self {
            tab_width,
            indent_style,
        }
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            indent_style: None,
        }
    }
}

impl EditorSettings for StaticSettings {
    fn indentation_style(&self, _document: &str) -> Option<IndentStyle> {
        self.indent_style
    }

    fn tab_width(&self, _document: &str, _position: DocumentPosition) -> usize {
        self.tab_width
    }
}
