//! Normalize blocks of added lines for inline overlay rendering.
//!
//! The core is [`normalize::blockify`]: detect the block's indentation style,
//! rewrite leading whitespace as fixed-width glyph units, strip the indent
//! shared by every line, and pad the block into a rectangle, keeping
//! highlight ranges aligned with the text throughout.
//!
//! ```rust
//! use blockify::{AddedLine, DocumentPosition, StaticSettings, blockify};
//!
//! let lines = vec![AddedLine::plain("    hello"), AddedLine::plain("        world")];
//! let out = blockify(&StaticSettings::default(), "doc", DocumentPosition::default(), &lines)?;
//! assert_eq!(out.common_indent, 4);
//! assert!(out.lines.iter().all(|line| line.width() == 9));
//! # Ok::<(), blockify::BlockError>(())
//! ```

pub mod analytics;
pub mod block;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod normalize;
pub mod run;

pub use block::{AddedLine, HighlightRange, IndentStyle, UNICODE_SPACE};
pub use editor::{DocumentPosition, EditorSettings, StaticSettings};
pub use error::BlockError;
pub use normalize::{Blockified, BlockifyOptions, blockify, blockify_with};
