//! Block normalizer for inline added-lines overlays.
//!
//! Turns a diff hunk of inserted lines into a rectangular block whose left
//! margin sits on column 0 and whose indentation is made of fixed-width glyph
//! units, keeping highlight ranges in step with every text change.
//!
//! # Pipeline Stages
//!
//! 1. **Classify** — detect space vs tab indentation over the whole block
//!    ([`detect`]).
//! 2. **Rewrite** — replace leading whitespace with glyph units, expanding
//!    tabs to the editor's tab width ([`rewrite`]).
//! 3. **Strip** — remove the indentation shared by every line ([`strip`]).
//! 4. **Pad** — right-pad every line to the widest one ([`pad`]).
//!
//! Each stage reads a borrowed block and returns a new one; the caller's
//! block is never mutated.

pub mod detect;
pub mod pad;
pub mod rewrite;
pub mod strip;

use serde::Serialize;

use crate::block::text::char_len;
use crate::block::{AddedLine, IndentStyle, UNICODE_SPACE};
use crate::editor::{DocumentPosition, EditorSettings};
use crate::error::BlockError;

// ---------------------------------------------------------------------------
// Options and output
// ---------------------------------------------------------------------------

/// Rendering knobs that do not come from the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockifyOptions {
    /// Fixed-width whitespace char used for indentation and padding.
    pub glyph: char,
}

impl Default for BlockifyOptions {
    fn default() -> Self {
        Self {
            glyph: UNICODE_SPACE,
        }
    }
}

/// Result of the full pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blockified {
    /// Normalized, rectangular lines.
    pub lines: Vec<AddedLine>,
    /// Style the classifier settled on.
    pub indent_style: IndentStyle,
    /// Tab width reported by the editor for the target position.
    pub tab_width: usize,
    /// Chars of common indentation removed from every line.
    pub common_indent: usize,
    /// Width of every output line, in chars.
    pub width: usize,
}

// ---------------------------------------------------------------------------
// Pipeline orchestrator
// ---------------------------------------------------------------------------

/// Run the full pipeline with the default glyph unit.
pub fn blockify<S: EditorSettings + ?Sized>(
    settings: &S,
    document: &str,
    position: DocumentPosition,
    lines: &[AddedLine],
) -> Result<Blockified, BlockError> {
    blockify_with(settings, document, position, lines, &BlockifyOptions::default())
}

/// Run the full pipeline: classify → rewrite → strip → pad.
///
/// Fails only on caller contract violations (malformed ranges, a zero tab
/// width, a non-whitespace glyph). Empty and all-blank blocks are valid.
pub fn blockify_with<S: EditorSettings + ?Sized>(
    settings: &S,
    document: &str,
    position: DocumentPosition,
    lines: &[AddedLine],
    options: &BlockifyOptions,
) -> Result<Blockified, BlockError> {
    let indent_style =
        detect::classify_indentation(lines, settings.indentation_style(document));
    let tab_width = settings.tab_width(document, position);

    let rewritten = rewrite::rewrite_indentation(lines, indent_style, tab_width, options.glyph)?;

    let common_indent = char_len(strip::common_indent(&rewritten));
    let stripped = strip::strip_common_indent(&rewritten)?;

    let padded = pad::pad_trailing(&stripped, options.glyph)?;
    let width = pad::max_width(&padded);

    Ok(Blockified {
        lines: padded,
        indent_style,
        tab_width,
        common_indent,
        width,
    })
}

/// Glyph units must be whitespace so the stripper sees them as indentation.
pub(crate) fn ensure_glyph(glyph: char) -> Result<(), BlockError> {
    if glyph.is_whitespace() {
        Ok(())
    } else {
        Err(BlockError::InvalidGlyph(glyph))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
