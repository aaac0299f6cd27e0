use thiserror::Error;

/// Contract violations detected while normalizing an added-lines block.
///
/// Every variant points at malformed input from the caller (the code that
/// built the block). Offsets are never clamped to hide these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("line {line}: range [{start}, {end}) is outside a line of {len} chars")]
    RangeOutOfBounds {
        line: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("line {line}: range starting at {start} cannot shift left by {shift}")]
    RangeUnderflow {
        line: usize,
        start: usize,
        shift: usize,
    },
    #[error(
        "tab width must be between 1 and {max}, got {0}",
        max = crate::normalize::rewrite::MAX_TAB_WIDTH
    )]
    InvalidTabWidth(usize),
    #[error("glyph unit {0:?} is not a whitespace character")]
    InvalidGlyph(char),
}
