//! Esmport Driver Library
//!
//! File handling for the `esmport` binary: reading modules, running the
//! export transform and writing results back.

pub mod logging;
pub mod report;

use anyhow::Context;
use esmport_transform::{transform_with, TransformError, TransformOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// One module run through the transform.
#[derive(Debug)]
pub struct Processed {
    pub path: PathBuf,
    pub source: String,
    /// `Ok(None)` when the module has no legacy exports
    pub result: Result<Option<String>, TransformError>,
}

impl Processed {
    /// Transformed text that differs from the input.
    pub fn changed(&self) -> Option<&str> {
        match &self.result {
            Ok(Some(output)) if *output != self.source => Some(output.as_str()),
            _ => None,
        }
    }

    pub fn filename(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

pub fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Transforms the module at `path` without touching the file.
pub fn process_file(path: &Path, options: &TransformOptions) -> anyhow::Result<Processed> {
    let source = read_source(path)?;
    let result = transform_with(&source, Some(path), options);
    match &result {
        Ok(Some(_)) => info!(file = %path.display(), "rewrote exports"),
        Ok(None) => info!(file = %path.display(), "no legacy exports"),
        Err(e) => info!(file = %path.display(), code = e.code(), "transform failed"),
    }

    Ok(Processed {
        path: path.to_path_buf(),
        source,
        result,
    })
}

/// Writes the transformed text back; returns whether the file changed.
pub fn write_back(processed: &Processed) -> anyhow::Result<bool> {
    let Some(output) = processed.changed() else {
        return Ok(false);
    };
    fs::write(&processed.path, output)
        .with_context(|| format!("failed to write {}", processed.path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_and_write_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.js");
        fs::write(&path, "exports.a = 1;\n").unwrap();

        let processed = process_file(&path, &TransformOptions::default()).unwrap();
        assert_eq!(processed.changed(), Some("export const a = 1;\n"));
        assert!(write_back(&processed).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "export const a = 1;\n");

        let again = process_file(&path, &TransformOptions::default()).unwrap();
        assert_eq!(again.changed(), None);
        assert!(!write_back(&again).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = process_file(&dir.path().join("missing.js"), &TransformOptions::default()).unwrap_err();
        assert!(error.to_string().starts_with("failed to read"));
    }

    #[test]
    fn test_transform_error_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.js");
        fs::write(&path, "exports = {};\n").unwrap();

        let processed = process_file(&path, &TransformOptions::default()).unwrap();
        let error = processed.result.unwrap_err();
        assert_eq!(error.code(), "E0100");
        assert_eq!(error.file.as_deref(), Some(path.as_path()));
    }
}
