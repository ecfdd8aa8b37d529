//! Core domain types for positions, mappings, and source snippets.

/// Line-splitting convention used when turning embedded source text into
/// numbered lines. The map's embedded text was authored on some platform;
/// splitting on the wrong separator silently shifts every line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Detect the separator from the text itself: `\r\n` if present, else `\n`.
    #[default]
    Auto,
    /// Force Windows-style `\r\n`.
    CrLf,
    /// Force Unix-style `\n`.
    Lf,
}

impl LineEnding {
    /// The separator to split `text` on under this convention.
    pub fn separator_for(self, text: &str) -> &'static str {
        return match self {
            LineEnding::Auto => {
                if text.contains("\r\n") {
                    "\r\n"
                } else {
                    "\n"
                }
            },
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        };
    }
}

/// A location within a text file. Lines are 1-based, columns 0-based,
/// matching the convention of source map consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based column number.
    pub column: u32,
    /// One-based line number.
    pub line: u32,
}

impl Position {
    /// Construct a position from a 1-based line and 0-based column.
    pub const fn new(line: u32, column: u32) -> Self {
        return Self { column, line };
    }
}

/// Raw output of a source map query, before validation. The decoding engine
/// returns all-`None` fields when a position falls in an unmapped gap.
#[derive(Debug, Clone, Default)]
pub struct RawMapping {
    /// Zero-based original column, if mapped.
    pub column: Option<u32>,
    /// One-based original line, if mapped.
    pub line: Option<u32>,
    /// Original identifier name at this position, if recorded.
    pub name: Option<String>,
    /// Original source path, if mapped.
    pub source: Option<String>,
}

/// A validated resolution: the original position plus the full embedded
/// source text it points into. Source path and content are non-empty
/// by construction.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    /// Full embedded original source text.
    pub content: String,
    /// Original identifier name at the position, if the map recorded one.
    pub name: Option<String>,
    /// Original position within `content`.
    pub position: Position,
    /// Original source path as recorded in the map.
    pub source_path: String,
}

/// The final result handed to the presenter: a bounded window of original
/// source lines around the resolved position. `lines` is non-empty,
/// contiguous, and ordered by line number ascending.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Display window of original source lines.
    pub lines: Vec<SourceLine>,
    /// Resolved original position; its line is marked when shown.
    pub position: Position,
    /// Resolved original source path.
    pub source_path: String,
}

/// One line of original source, numbered from 1 in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// One-based line number within the full original text.
    pub number: u32,
    /// Line content without its trailing separator.
    pub text: String,
}
