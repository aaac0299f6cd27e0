use std::time::Instant;

use anyhow::Result;

use crate::analytics::logger::{RenderLogEntry, log_render};
use crate::block::AddedLine;
use crate::config::BlockifyConfig;
use crate::editor::{DocumentPosition, EditorSettings};
use crate::normalize::{self, Blockified};

/// Normalize a block for a CLI command and record the outcome.
///
/// This is the shared entry point for `blockify render` and
/// `blockify preview`:
///
/// 1. Resolves the glyph from `[render]`
/// 2. Runs the normalizer pipeline, timing it
/// 3. Appends a success or failure entry to the render log (best-effort)
///
/// Contract violations are returned as errors after being logged.
pub fn execute_render<S: EditorSettings + ?Sized>(
    command: &str,
    config: &BlockifyConfig,
    settings: &S,
    document: &str,
    position: DocumentPosition,
    lines: &[AddedLine],
) -> Result<Blockified> {
    let options = config.blockify_options()?;
    let log_path = config.log_path();

    let started = Instant::now();
    let result = normalize::blockify_with(settings, document, position, lines, &options);
    let elapsed = started.elapsed();

    match result {
        Ok(output) => {
            log_render(
                log_path.as_deref(),
                &RenderLogEntry::success(command, lines.len(), &output, elapsed),
            );
            Ok(output)
        }
        Err(error) => {
            log_render(
                log_path.as_deref(),
                &RenderLogEntry::failure(command, lines.len(), &error.to_string(), elapsed),
            );
            Err(error.into())
        }
    }
}
