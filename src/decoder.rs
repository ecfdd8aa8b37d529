//! Built-in source map v3 decoder.
//!
//! Parses the JSON envelope with serde, decodes the VLQ `mappings` string
//! into per-line segment tables, and answers original-position queries with
//! greatest-lower-bound bias on the generated column — the same bias the
//! reference consumers use, so a column inside a mapped span resolves to the
//! span's start.

use crate::engine::{MapConsumer, MapEngine};
use crate::error::Error;
use crate::types::{Position, RawMapping};
use crate::vlq;

/// The built-in decoding engine. Stateless; all state lives in the
/// [`DecodedMap`] it produces.
pub struct Decoder;

/// Raw JSON structure of a source map file.
#[derive(serde::Deserialize)]
struct RawSourceMap {
    /// VLQ-encoded mapping lines, `;`-separated.
    mappings: String,
    /// Original identifier names referenced by mapping segments.
    #[serde(default)]
    names: Vec<String>,
    /// Optional prefix applied to every source path.
    #[serde(default, rename = "sourceRoot")]
    source_root: Option<String>,
    /// Original source paths.
    sources: Vec<String>,
    /// Embedded original source texts, parallel to `sources`.
    #[serde(default, rename = "sourcesContent")]
    sources_content: Vec<Option<String>>,
    /// Declared format version; only 3 is supported.
    version: u32,
}

/// One decoded mapping segment on a generated line. Original fields are
/// `None` for 1-field segments, which map generated ranges to no source.
struct Segment {
    /// Zero-based generated column where this segment starts.
    generated_column: u32,
    /// Index into the `names` table, if the segment carries one.
    name_index: Option<usize>,
    /// Zero-based original column.
    original_column: Option<u32>,
    /// Zero-based original line.
    original_line: Option<u32>,
    /// Index into the `sources` table.
    source_index: Option<usize>,
}

/// A fully decoded map, queryable by generated position.
pub struct DecodedMap {
    /// Per-generated-line segment tables, sorted by generated column.
    lines: Vec<Vec<Segment>>,
    /// Original identifier names.
    names: Vec<String>,
    /// Source paths with `sourceRoot` already applied.
    sources: Vec<String>,
    /// Embedded source texts, parallel to `sources`.
    sources_content: Vec<Option<String>>,
}

impl MapEngine for Decoder {
    type Consumer = DecodedMap;

    fn open(&self, map_text: &str) -> Result<DecodedMap, Error> {
        let raw: RawSourceMap = serde_json::from_str(map_text)?;
        if raw.version != 3 {
            return Err(Error::UnsupportedMapVersion { version: raw.version });
        }

        let lines = decode_mapping_lines(&raw.mappings)?;
        let sources = raw
            .sources
            .iter()
            .map(|s| join_source_root(raw.source_root.as_deref(), s))
            .collect();

        Ok(DecodedMap {
            lines,
            names: raw.names,
            sources,
            sources_content: raw.sources_content,
        })
    }
}

impl MapConsumer for DecodedMap {
    fn close(&mut self) {
        self.lines.clear();
        self.names.clear();
        self.sources.clear();
        self.sources_content.clear();
    }

    fn original_position_for(&self, position: Position) -> RawMapping {
        let Some(line_index) = usize::try_from(position.line)
            .ok()
            .and_then(|line| line.checked_sub(1))
        else {
            return RawMapping::default();
        };
        let Some(segments) = self.lines.get(line_index) else {
            return RawMapping::default();
        };

        // Greatest segment start at or before the queried column.
        let found = segments
            .iter()
            .rev()
            .find(|s| s.generated_column <= position.column);

        match found {
            Some(segment) => self.mapping_for_segment(segment),
            None => RawMapping::default(),
        }
    }

    fn source_content_for(&self, source_path: &str) -> Option<String> {
        let index = self.sources.iter().position(|s| s == source_path)?;
        self.sources_content.get(index).and_then(Clone::clone)
    }
}

impl DecodedMap {
    /// Expand a segment's table indices into a nullable mapping.
    /// A segment without a source index is an unmapped span.
    fn mapping_for_segment(&self, segment: &Segment) -> RawMapping {
        let Some(source_index) = segment.source_index else {
            return RawMapping::default();
        };

        RawMapping {
            column: segment.original_column,
            line: segment.original_line.map(|l| l.saturating_add(1)),
            name: segment
                .name_index
                .and_then(|i| self.names.get(i).cloned()),
            source: self.sources.get(source_index).cloned(),
        }
    }
}

/// Decode the full `mappings` string into per-line segment tables.
///
/// Generated column deltas reset at every `;`; source index, original line,
/// original column, and name index deltas run across the whole string.
///
/// # Errors
///
/// Returns `Error::DecodeFailed` on malformed VLQ, unexpected field counts,
/// or deltas that drive a running value negative.
fn decode_mapping_lines(mappings: &str) -> Result<Vec<Vec<Segment>>, Error> {
    let mut lines = Vec::new();
    let mut source_index: i64 = 0;
    let mut original_line: i64 = 0;
    let mut original_column: i64 = 0;
    let mut name_index: i64 = 0;

    for line in mappings.split(';') {
        let mut segments: Vec<Segment> = Vec::new();
        let mut generated_column: i64 = 0;

        for encoded in line.split(',') {
            if encoded.is_empty() {
                continue;
            }
            let fields = vlq::decode_segment(encoded)?;

            let segment = match fields.as_slice() {
                [gc] => {
                    generated_column += gc;
                    Segment {
                        generated_column: non_negative(generated_column, "generated column")?,
                        name_index: None,
                        original_column: None,
                        original_line: None,
                        source_index: None,
                    }
                },
                [gc, si, ol, oc] => {
                    generated_column += gc;
                    source_index += si;
                    original_line += ol;
                    original_column += oc;
                    Segment {
                        generated_column: non_negative(generated_column, "generated column")?,
                        name_index: None,
                        original_column: Some(non_negative(original_column, "original column")?),
                        original_line: Some(non_negative(original_line, "original line")?),
                        source_index: Some(index_value(source_index, "source index")?),
                    }
                },
                [gc, si, ol, oc, ni] => {
                    generated_column += gc;
                    source_index += si;
                    original_line += ol;
                    original_column += oc;
                    name_index += ni;
                    Segment {
                        generated_column: non_negative(generated_column, "generated column")?,
                        name_index: Some(index_value(name_index, "name index")?),
                        original_column: Some(non_negative(original_column, "original column")?),
                        original_line: Some(non_negative(original_line, "original line")?),
                        source_index: Some(index_value(source_index, "source index")?),
                    }
                },
                other => {
                    return Err(Error::DecodeFailed {
                        reason: format!("mapping segment has {} fields", other.len()),
                    });
                },
            };

            segments.push(segment);
        }

        segments.sort_unstable_by_key(|s| s.generated_column);
        lines.push(segments);
    }

    Ok(lines)
}

/// Convert a running delta sum to `u32`, rejecting negative values.
///
/// # Errors
///
/// Returns `Error::DecodeFailed` naming the field when the value is out of range.
fn non_negative(value: i64, field: &str) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_err| Error::DecodeFailed {
        reason: format!("{field} out of range: {value}"),
    })
}

/// Convert a running delta sum to a table index, rejecting negative values.
///
/// # Errors
///
/// Returns `Error::DecodeFailed` naming the field when the value is out of range.
fn index_value(value: i64, field: &str) -> Result<usize, Error> {
    usize::try_from(value).map_err(|_err| Error::DecodeFailed {
        reason: format!("{field} out of range: {value}"),
    })
}

/// Prefix a source path with the map's `sourceRoot`, if any.
fn join_source_root(root: Option<&str>, source: &str) -> String {
    match root {
        None | Some("") => source.to_string(),
        Some(root) => format!("{}/{source}", root.trim_end_matches('/')),
    }
}
