//! Fixture tests for the export transform.
//!
//! Every `<name>.before.js` in `tests/data/transform-exports` is transformed
//! and compared byte for byte with `<name>.after.js`. A module without legacy
//! exports is expected to come back unchanged.

use esmport_transform::transform;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/transform-exports")
}

fn fixtures() -> Vec<(String, PathBuf, PathBuf)> {
    let mut fixtures: Vec<_> = fs::read_dir(fixture_dir())
        .expect("fixture directory exists")
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let file_name = path.file_name()?.to_str()?;
            let name = file_name.strip_suffix(".before.js")?.to_string();
            let after = path.with_file_name(format!("{}.after.js", name));
            Some((name, path, after))
        })
        .collect();
    fixtures.sort();
    fixtures
}

#[test]
fn test_fixtures() {
    let fixtures = fixtures();
    assert!(fixtures.len() >= 4, "missing fixtures in {}", fixture_dir().display());

    for (name, before, after) in fixtures {
        let source = fs::read_to_string(&before).unwrap();
        let expected = fs::read_to_string(&after)
            .unwrap_or_else(|e| panic!("{}: missing {}: {}", name, after.display(), e));

        let output = transform(&source, Some(&before))
            .unwrap_or_else(|e| panic!("{}: {}", name, e))
            .unwrap_or_else(|| source.clone());
        assert_eq!(output, expected, "fixture {}", name);
    }
}

#[test]
fn test_fixtures_are_stable() {
    for (name, _, after) in fixtures() {
        let source = fs::read_to_string(&after).unwrap();
        let output = transform(&source, Some(&after)).unwrap_or_else(|e| panic!("{}: {}", name, e));

        // Only deferred require sites may remain
        assert_eq!(output, None, "fixture {} is not a fixed point", name);
    }
}
