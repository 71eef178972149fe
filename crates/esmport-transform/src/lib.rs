//! # Esmport Transform
//!
//! Rewrites the legacy export statements of one module into declarative
//! exports:
//!
//! - `exports.name = function ...` and arrow functions become `export function name`
//! - `exports.name = local` sites are collected into one trailing `export { ... }` list
//! - `exports.name = require(...)` is left for the import rewrite
//! - any other value becomes `export const name = ...`
//! - `module.exports = Name` becomes `export { Name }` plus `export default Name`
//!
//! Modules mixing idioms are rejected before anything is changed.

use esmport_parser::{print, Module, PrintOptions};
use std::path::Path;
use tracing::debug;

pub mod classify;
pub mod error;
pub mod queries;
pub mod rewrite;

pub use classify::{classify, Style};
pub use error::{DeclarationKind, StyleConflict, TransformError, TransformErrorKind};
pub use rewrite::rewrite;

/// The export object
pub const EXPORTS: &str = "exports";
/// The module object owning `module.exports`
pub const MODULE: &str = "module";
/// Calls left to the import rewrite
pub const REQUIRE: &str = "require";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub print: PrintOptions,
}

/// Transforms `source` with default options.
///
/// Returns `Ok(None)` when the module has no legacy export to rewrite.
pub fn transform(source: &str, file: Option<&Path>) -> Result<Option<String>, TransformError> {
    transform_with(source, file, &TransformOptions::default())
}

pub fn transform_with(
    source: &str,
    file: Option<&Path>,
    options: &TransformOptions,
) -> Result<Option<String>, TransformError> {
    let mut module =
        Module::parse(source, 0).map_err(|e| TransformError::syntax(e, source).with_file(file))?;

    let Some(style) = classify(&module).map_err(|e| e.with_file(file))? else {
        return Ok(None);
    };
    rewrite(&mut module, &style).map_err(|e| e.with_file(file))?;

    // Only deferred require sites were found
    if !module.is_modified() {
        debug!("nothing rewritten");
        return Ok(None);
    }
    Ok(Some(print(&module, &options.print)))
}

/// Whether transforming `source` would change it.
pub fn check(source: &str, file: Option<&Path>) -> Result<bool, TransformError> {
    Ok(transform(source, file)?.map_or(false, |output| output != source))
}
