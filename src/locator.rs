//! Companion map location: `bundle.js` -> `bundle.js.map`.

use std::path::{Path, PathBuf};

/// Determine the companion map path for a generated file and confirm it
/// exists. The map is expected at the generated path with `.map` appended to
/// the full file name (`set_extension` would eat the `.js`), and only
/// existence is checked — content validation belongs to the decoder.
///
/// Absence is a normal outcome: files compiled without map generation simply
/// have nothing to show.
pub fn find_map_path(generated: &Path) -> Option<PathBuf> {
    let mut name = generated.as_os_str().to_os_string();
    name.push(".map");
    let candidate = PathBuf::from(name);

    if candidate.exists() {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::find_map_path;

    #[test]
    fn finds_sibling_map() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("bundle.js");
        std::fs::write(&generated, "x").unwrap();
        std::fs::write(dir.path().join("bundle.js.map"), "{}").unwrap();

        let found = find_map_path(&generated);
        assert_eq!(found, Some(dir.path().join("bundle.js.map")));
    }

    #[test]
    fn absent_map_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("bundle.js");
        std::fs::write(&generated, "x").unwrap();

        assert_eq!(find_map_path(&generated), None);
    }

    #[test]
    fn appends_to_full_name_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let generated = dir.path().join("app.min.js");
        // A map named `app.min.map` (extension replacement) must NOT match.
        std::fs::write(dir.path().join("app.min.map"), "{}").unwrap();

        assert_eq!(find_map_path(&generated), None);
    }
}
