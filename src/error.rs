/// Crate-level error types for mapref diagnostics.
use std::path::PathBuf;

/// Every way a resolution can come up empty, plus hard input errors.
///
/// Resolution failures are normal outcomes for a diagnostic aid — the caller
/// never crashes on them — but each variant retains enough context to explain
/// *why* nothing was shown when the user asks for it.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The map file parsed as JSON but its mappings could not be decoded.
    #[error("map decode failed: {reason}")]
    DecodeFailed {
        /// Description of the decode failure.
        reason: String,
    },

    /// A queried position had a non-positive line number.
    #[error("invalid position: line must be >= 1, got {line}")]
    InvalidPosition {
        /// The rejected line number.
        line: u32,
    },

    /// Underlying I/O error while reading the map file.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The resolved line falls outside the embedded source text.
    #[error("line {target_line} is outside the source ({line_count} lines)")]
    LineOutOfRange {
        /// Number of lines in the embedded source text.
        line_count: usize,
        /// The 1-based line that was requested.
        target_line: u32,
    },

    /// The map file is not valid JSON.
    #[error("map invalid: {0}")]
    MapInvalid(
        /// The wrapped JSON deserialization error.
        #[from]
        serde_json::Error,
    ),

    /// No companion `.map` file exists next to the generated file.
    #[error("no source map found for {}", path.display())]
    MapNotFound {
        /// The generated file that has no companion map.
        path: PathBuf,
    },

    /// The position resolved but the map embeds no content for its source.
    #[error("no embedded content for source `{source_path}`")]
    MissingSourceContent {
        /// Original source path whose content is missing.
        source_path: String,
    },

    /// A position argument did not match the `LINE:COLUMN` form.
    #[error("cannot parse position `{arg}` (expected LINE:COLUMN)")]
    PositionSyntax {
        /// The argument that failed to parse.
        arg: String,
    },

    /// The queried position falls in an unmapped gap of the map.
    #[error("position {line}:{column} is not mapped to any original source")]
    Unmapped {
        /// Zero-based generated column that was queried.
        column: u32,
        /// One-based generated line that was queried.
        line: u32,
    },

    /// The map declares a version this decoder does not understand.
    #[error("unsupported source map version {version} (expected 3)")]
    UnsupportedMapVersion {
        /// The declared version number.
        version: u32,
    },
}
