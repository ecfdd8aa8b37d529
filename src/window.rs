//! Context window selection over embedded original source text.

use crate::error::Error;
use crate::types::{LineEnding, SourceLine};

/// Select the bounded window of lines shown around `target_line` (1-based):
/// up to two lines before, the target, and one line after, clipped at both
/// ends of the file. Near the top (`target_line < 3`) the window runs from
/// line 1 through the target.
///
/// Text without any line separator is a degenerate single-line source and
/// yields exactly one line numbered 1, whatever the target.
///
/// A target past the end of the text yields an empty window; the caller
/// decides whether that is worth reporting.
///
/// # Errors
///
/// Returns `Error::InvalidPosition` for `target_line == 0` rather than
/// guessing at a window nobody asked for.
pub fn build_window(
    source_text: &str,
    target_line: u32,
    line_ending: LineEnding,
) -> Result<Vec<SourceLine>, Error> {
    if target_line == 0 {
        return Err(Error::InvalidPosition { line: target_line });
    }

    let separator = line_ending.separator_for(source_text);
    if !source_text.contains(separator) {
        return Ok(vec![SourceLine {
            number: 1,
            text: source_text.to_string(),
        }]);
    }

    let target = usize::try_from(target_line).unwrap_or(usize::MAX);
    let start = target.saturating_sub(3);
    let end = if target < 3 { target } else { target.saturating_add(1) };

    let window = source_text
        .split(separator)
        .enumerate()
        .skip(start)
        .take(end.saturating_sub(start))
        .map(|(index, text)| SourceLine {
            number: u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1),
            text: text.to_string(),
        })
        .collect();

    Ok(window)
}
