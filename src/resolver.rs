//! Position resolution: map text in, validated original source out.

use std::path::Path;

use crate::engine::{ConsumerGuard, MapConsumer, MapEngine};
use crate::error::Error;
use crate::types::{Position, RawMapping, ResolvedSource};

/// Resolve a generated position through the map at `map_path` and fetch the
/// embedded original source text it points into.
///
/// The consumer opened here is closed on every exit path, including the `?`
/// returns, because a diagnostic helper must not leak decoder resources no
/// matter how the lookup goes.
///
/// # Errors
///
/// Returns `Error::InvalidPosition` for a zero line, `Error::Io` when the
/// map cannot be read, the engine's open errors for undecodable maps,
/// `Error::Unmapped` when the position falls in an unmapped gap, and
/// `Error::MissingSourceContent` when the map embeds no text for the
/// resolved source. Every variant means "nothing to show" to the CLI; the
/// detail exists for diagnostics, not control flow.
pub fn resolve<E: MapEngine>(
    engine: &E,
    map_path: &Path,
    position: Position,
) -> Result<ResolvedSource, Error> {
    if position.line == 0 {
        return Err(Error::InvalidPosition { line: position.line });
    }

    let map_text = std::fs::read_to_string(map_path)?;
    let consumer = ConsumerGuard::new(engine.open(&map_text)?);

    let raw = consumer.original_position_for(position);
    let valid = validate_mapping(raw, position)?;

    let content = consumer
        .source_content_for(&valid.source)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::MissingSourceContent {
            source_path: valid.source.clone(),
        })?;

    Ok(ResolvedSource {
        content,
        name: valid.name,
        position: valid.position,
        source_path: valid.source,
    })
}

/// A raw mapping that passed validation.
struct ValidMapping {
    /// Original identifier name, if recorded.
    name: Option<String>,
    /// Original position, both coordinates present.
    position: Position,
    /// Non-empty original source path.
    source: String,
}

/// Accept a raw mapping only when the source path is non-empty and both the
/// line and the column are present. Anything else is an unmapped gap — a
/// partial mapping is useless to the caller.
fn validate_mapping(raw: RawMapping, queried: Position) -> Result<ValidMapping, Error> {
    let unmapped = Error::Unmapped {
        column: queried.column,
        line: queried.line,
    };

    let Some(source) = raw.source.filter(|s| !s.is_empty()) else {
        return Err(unmapped);
    };
    let (Some(line), Some(column)) = (raw.line, raw.column) else {
        return Err(unmapped);
    };

    Ok(ValidMapping {
        name: raw.name,
        position: Position::new(line, column),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::resolve;
    use crate::engine::{MapConsumer, MapEngine};
    use crate::error::Error;
    use crate::types::{Position, RawMapping};

    /// Fake engine whose consumers count how many remain open, so tests can
    /// assert the release guarantee on every exit path.
    struct FakeEngine {
        content: Option<String>,
        fail_open: bool,
        mapping: RawMapping,
        open_consumers: Arc<AtomicUsize>,
    }

    struct FakeConsumer {
        content: Option<String>,
        mapping: RawMapping,
        open_consumers: Arc<AtomicUsize>,
    }

    impl MapEngine for FakeEngine {
        type Consumer = FakeConsumer;

        fn open(&self, _map_text: &str) -> Result<FakeConsumer, Error> {
            if self.fail_open {
                return Err(Error::DecodeFailed {
                    reason: "fake decode failure".to_string(),
                });
            }
            self.open_consumers.fetch_add(1, Ordering::SeqCst);
            Ok(FakeConsumer {
                content: self.content.clone(),
                mapping: self.mapping.clone(),
                open_consumers: Arc::clone(&self.open_consumers),
            })
        }
    }

    impl MapConsumer for FakeConsumer {
        fn close(&mut self) {
            self.open_consumers.fetch_sub(1, Ordering::SeqCst);
        }

        fn original_position_for(&self, _position: Position) -> RawMapping {
            self.mapping.clone()
        }

        fn source_content_for(&self, _source_path: &str) -> Option<String> {
            self.content.clone()
        }
    }

    fn mapped(source: &str, line: u32, column: u32) -> RawMapping {
        RawMapping {
            column: Some(column),
            line: Some(line),
            name: None,
            source: Some(source.to_string()),
        }
    }

    fn engine(mapping: RawMapping, content: Option<&str>) -> FakeEngine {
        FakeEngine {
            content: content.map(String::from),
            fail_open: false,
            mapping,
            open_consumers: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn temp_map() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        file
    }

    #[test]
    fn returns_decoded_values_exactly() {
        let map = temp_map();
        let fake = engine(mapped("a.ts", 7, 2), Some("let a = 1;"));

        let resolved = resolve(&fake, map.path(), Position::new(1, 10)).unwrap();
        assert_eq!(resolved.source_path, "a.ts");
        assert_eq!(resolved.position, Position::new(7, 2));
        assert_eq!(resolved.content, "let a = 1;");
        assert_eq!(fake.open_consumers.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn name_passes_through_when_recorded() {
        let map = temp_map();
        let mut mapping = mapped("a.ts", 7, 2);
        mapping.name = Some("divide".to_string());
        let fake = engine(mapping, Some("let a = 1;"));

        let resolved = resolve(&fake, map.path(), Position::new(1, 10)).unwrap();
        assert_eq!(resolved.name.as_deref(), Some("divide"));
    }

    #[test]
    fn unmapped_gap_is_rejected() {
        let map = temp_map();
        let fake = engine(RawMapping::default(), Some("text"));

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::Unmapped { line: 1, column: 0 }));
        assert_eq!(fake.open_consumers.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_line_or_column_is_rejected() {
        let map = temp_map();
        let partial = RawMapping {
            column: None,
            line: Some(7),
            name: None,
            source: Some("a.ts".to_string()),
        };
        let fake = engine(partial, Some("text"));

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::Unmapped { .. }));
    }

    #[test]
    fn empty_source_path_is_rejected() {
        let map = temp_map();
        let fake = engine(mapped("", 7, 2), Some("text"));

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::Unmapped { .. }));
    }

    #[test]
    fn missing_content_downgrades_resolution() {
        let map = temp_map();
        let fake = engine(mapped("a.ts", 7, 2), None);

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::MissingSourceContent { .. }));
        assert_eq!(fake.open_consumers.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_content_downgrades_resolution() {
        let map = temp_map();
        let fake = engine(mapped("a.ts", 7, 2), Some(""));

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::MissingSourceContent { .. }));
    }

    #[test]
    fn zero_line_fails_fast() {
        let map = temp_map();
        let fake = engine(mapped("a.ts", 7, 2), Some("text"));

        let err = resolve(&fake, map.path(), Position::new(0, 5)).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { line: 0 }));
        // Rejected before the engine was ever opened.
        assert_eq!(fake.open_consumers.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unreadable_map_is_an_io_error() {
        let fake = engine(mapped("a.ts", 7, 2), Some("text"));
        let missing = std::path::Path::new("/nonexistent/bundle.js.map");

        let err = resolve(&fake, missing, Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn failed_open_leaves_nothing_behind() {
        let map = temp_map();
        let fake = FakeEngine {
            content: None,
            fail_open: true,
            mapping: RawMapping::default(),
            open_consumers: Arc::new(AtomicUsize::new(0)),
        };

        let err = resolve(&fake, map.path(), Position::new(1, 0)).unwrap_err();
        assert!(matches!(err, Error::DecodeFailed { .. }));
        assert_eq!(fake.open_consumers.load(Ordering::SeqCst), 0);
    }
}
