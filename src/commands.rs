//! Core CLI commands for mapref: show, resolve, locate.

use std::path::Path;
use std::process::ExitCode;

use crate::decoder::Decoder;
use crate::diagnostics;
use crate::error::Error;
use crate::locator;
use crate::presenter;
use crate::resolver;
use crate::types::{LineEnding, Position, SourceContext};
use crate::window;

/// Resolve a generated position and print the annotated source snippet.
///
/// A diagnostic aid never crashes its caller: every dead end (no map,
/// unmapped position, missing embedded content, undecodable map) exits 1
/// with nothing on stdout. `verbose` renders the retained reason to stderr;
/// malformed input exits 2.
pub fn show(file: &Path, position_arg: &str, line_ending: LineEnding, verbose: bool) -> ExitCode {
    match source_context(file, position_arg, line_ending) {
        Ok(context) => {
            presenter::present(&context, |line| println!("{line}"));
            ExitCode::SUCCESS
        },
        Err(e) => nothing_to_show(&e, verbose),
    }
}

/// Resolve a generated position and print only `source:line:column`.
pub fn resolve_only(file: &Path, position_arg: &str, verbose: bool) -> ExitCode {
    let resolved = parse_position(position_arg)
        .and_then(|position| locate_map(file).map(|map| (map, position)))
        .and_then(|(map, position)| resolver::resolve(&Decoder, &map, position));

    match resolved {
        Ok(resolved) => {
            let location = format!(
                "{}:{}:{}",
                resolved.source_path, resolved.position.line, resolved.position.column
            );
            match &resolved.name {
                Some(name) => println!("{location} ({name})"),
                None => println!("{location}"),
            }
            ExitCode::SUCCESS
        },
        Err(e) => nothing_to_show(&e, verbose),
    }
}

/// Print the companion map path for a generated file, if one exists.
pub fn locate(file: &Path) -> ExitCode {
    match locator::find_map_path(file) {
        Some(map_path) => {
            println!("{}", map_path.display());
            ExitCode::SUCCESS
        },
        None => ExitCode::FAILURE,
    }
}

/// Run the full pipeline: locate the map, resolve the position, build the
/// context window.
///
/// # Errors
///
/// Returns the first dead end hit by any stage; see each stage for the
/// variants it produces. An empty window (map pointing past the end of the
/// embedded text) becomes `Error::LineOutOfRange` so a returned context
/// always has lines to show.
fn source_context(
    file: &Path,
    position_arg: &str,
    line_ending: LineEnding,
) -> Result<SourceContext, Error> {
    let position = parse_position(position_arg)?;
    let map_path = locate_map(file)?;
    let resolved = resolver::resolve(&Decoder, &map_path, position)?;

    let lines = window::build_window(&resolved.content, resolved.position.line, line_ending)?;
    if lines.is_empty() {
        let separator = line_ending.separator_for(&resolved.content);
        return Err(Error::LineOutOfRange {
            line_count: resolved.content.split(separator).count(),
            target_line: resolved.position.line,
        });
    }

    Ok(SourceContext {
        lines,
        position: resolved.position,
        source_path: resolved.source_path,
    })
}

/// Locate the companion map or report its absence as a typed dead end.
///
/// # Errors
///
/// Returns `Error::MapNotFound` when no `.map` sibling exists.
fn locate_map(file: &Path) -> Result<std::path::PathBuf, Error> {
    locator::find_map_path(file).ok_or_else(|| Error::MapNotFound {
        path: file.to_path_buf(),
    })
}

/// Parse a `LINE:COLUMN` argument into a position.
///
/// # Errors
///
/// Returns `Error::PositionSyntax` for anything that isn't two integers
/// separated by a colon, and `Error::InvalidPosition` for line 0.
fn parse_position(arg: &str) -> Result<Position, Error> {
    let syntax = || Error::PositionSyntax {
        arg: arg.to_string(),
    };

    let (line, column) = arg.split_once(':').ok_or_else(syntax)?;
    let line: u32 = line.trim().parse().map_err(|_err| syntax())?;
    let column: u32 = column.trim().parse().map_err(|_err| syntax())?;

    if line == 0 {
        return Err(Error::InvalidPosition { line });
    }
    Ok(Position::new(line, column))
}

/// Map a dead end to its exit code, optionally explaining it on stderr.
/// Input errors are the user's to fix and always get the diagnostic.
fn nothing_to_show(e: &Error, verbose: bool) -> ExitCode {
    let usage_error = matches!(
        e,
        Error::InvalidPosition { .. } | Error::PositionSyntax { .. }
    );

    if verbose || usage_error {
        diagnostics::print_error(e);
    }

    if usage_error {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::parse_position;
    use crate::error::Error;
    use crate::types::Position;

    #[test]
    fn parses_line_and_column() {
        assert_eq!(parse_position("7:2").unwrap(), Position::new(7, 2));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_position(" 12 : 0 ").unwrap(), Position::new(12, 0));
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(matches!(
            parse_position("12").unwrap_err(),
            Error::PositionSyntax { .. }
        ));
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert!(matches!(
            parse_position("a:b").unwrap_err(),
            Error::PositionSyntax { .. }
        ));
    }

    #[test]
    fn rejects_line_zero() {
        assert!(matches!(
            parse_position("0:4").unwrap_err(),
            Error::InvalidPosition { line: 0 }
        ));
    }
}
