use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Resolution dead-ends are normal outcomes, so each block explains what
/// happened and, where there is one, the step that would change it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::MapNotFound { path } => format!("\
# No Source Map

`{}` has no companion `.map` file.

Nothing to show — the file was probably built without map generation.
", path.display()),

        Error::Unmapped { line, column } => format!("\
# Unmapped Position

Generated position {line}:{column} falls in a gap the map does not cover.
"),

        Error::MissingSourceContent { source_path } => format!("\
# No Embedded Source

The map resolves to `{source_path}` but embeds no content for it.

## Fix

Rebuild with embedded sources (e.g. `sourcesContent` enabled).
"),

        Error::UnsupportedMapVersion { version } => format!("\
# Unsupported Map Version

The map declares version {version}; only version 3 is supported.
"),

        Error::PositionSyntax { arg } => format!("\
# Invalid Position

`{arg}` is not a position.

## Fix

Pass the position as LINE:COLUMN, for example:

    mapref show dist/bundle.js 1:10
"),

        Error::InvalidPosition { line } => format!("\
# Invalid Position

Line numbers start at 1; got {line}.
"),

        Error::LineOutOfRange { target_line, line_count } => format!("\
# Line Out Of Range

The map points at line {target_line}, but the embedded source only has
{line_count} lines. The map and the embedded text likely disagree.
"),

        Error::DecodeFailed { reason } => format!("\
# Error: Map Decode Failed

{reason}
"),

        Error::MapInvalid(e) => format!("\
# Error: Invalid Map JSON

{e}
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
    }
}
