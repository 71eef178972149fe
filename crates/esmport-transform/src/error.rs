//! Transform failures with file and source location

use esmport_ast::{LineIndex, Location, Span};
use esmport_parser::{ParseError, TreeError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which declaration occurred more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `const alias = exports;`
    ExportAlias,
    /// `module.exports = Name;`
    ModuleExports,
    /// `export default ...`
    DefaultExport,
    /// Two sites exporting the same name
    Export(String),
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::ExportAlias => write!(f, "exports alias"),
            DeclarationKind::ModuleExports => write!(f, "module.exports"),
            DeclarationKind::DefaultExport => write!(f, "default export"),
            DeclarationKind::Export(name) => write!(f, "`{}` export", name),
        }
    }
}

/// The idiom found next to `module.exports = Name;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleConflict {
    ExportAlias,
    NamedExports,
}

impl fmt::Display for StyleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleConflict::ExportAlias => write!(f, "exports alias"),
            StyleConflict::NamedExports => write!(f, "normal exports"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformErrorKind {
    #[error("Syntax error: {}", .0.message)]
    Syntax(ParseError),

    #[error("The exports object is reassigned")]
    BadExportAlias,

    #[error("Multiple {what} declarations found")]
    MultipleDeclarations { what: DeclarationKind },

    #[error("Both module.exports and {with} found")]
    ConflictingExportStyle { with: StyleConflict },

    #[error("Assigning `{object}.{name}` next to `module.exports = {object}` is not supported")]
    UnsupportedCombination { object: String, name: String },

    #[error("`{name}` is a reserved word and cannot name an exported declaration")]
    ReservedExportName { name: String },

    #[error("`{object}.{name}` exports the exports object itself")]
    SelfExport { object: String, name: String },

    #[error("`{object}.{name}` is assigned outside a top-level export statement")]
    NestedExportAssignment { object: String, name: String },

    #[error("`{object}.{name}` is read but never exported")]
    UndefinedExport { object: String, name: String },

    #[error("`{object}` is used as a value and cannot be rewritten")]
    ExportObjectValue { object: String },

    #[error("Internal rewrite failure: {0}")]
    Tree(#[from] TreeError),
}

impl TransformErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            TransformErrorKind::Syntax(_) => "E0001",
            TransformErrorKind::BadExportAlias => "E0100",
            TransformErrorKind::MultipleDeclarations { .. } => "E0101",
            TransformErrorKind::ConflictingExportStyle { .. } => "E0102",
            TransformErrorKind::UnsupportedCombination { .. } => "E0103",
            TransformErrorKind::ReservedExportName { .. } => "E0104",
            TransformErrorKind::SelfExport { .. } => "E0105",
            TransformErrorKind::NestedExportAssignment { .. } => "E0106",
            TransformErrorKind::Tree(_) => "E0107",
            TransformErrorKind::UndefinedExport { .. } => "E0108",
            TransformErrorKind::ExportObjectValue { .. } => "E0109",
        }
    }
}

/// A failed transform.
///
/// `location` is absent for module-level conflicts that have no single
/// offending statement; `file` is absent when the caller did not name one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformError {
    pub kind: TransformErrorKind,
    pub file: Option<PathBuf>,
    pub location: Option<Location>,
    pub span: Option<Span>,
}

impl TransformError {
    pub fn new(kind: TransformErrorKind) -> Self {
        Self {
            kind,
            file: None,
            location: None,
            span: None,
        }
    }

    /// An error pointing at `span` of `source`.
    pub fn at(kind: TransformErrorKind, source: &str, span: Span) -> Self {
        let location = LineIndex::new(source).location(source, span.start);
        Self {
            kind,
            file: None,
            location: Some(location),
            span: Some(span),
        }
    }

    pub fn syntax(error: ParseError, source: &str) -> Self {
        let span = error.span;
        Self::at(TransformErrorKind::Syntax(error), source, span)
    }

    pub fn with_file(mut self, file: Option<&Path>) -> Self {
        if let Some(file) = file {
            self.file = Some(file.to_path_buf());
        }
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.file, &self.location) {
            (Some(file), Some(loc)) => {
                write!(f, " (at {}:{}:{})", file.display(), loc.line, loc.column)
            }
            (Some(file), None) => write!(f, " (at {})", file.display()),
            (None, Some(loc)) => write!(f, " (at {}:{})", loc.line, loc.column),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for TransformError {}

impl From<TreeError> for TransformError {
    fn from(error: TreeError) -> Self {
        Self::new(TransformErrorKind::Tree(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "a();\nconst lib = exports;\n";

    #[test]
    fn test_display_with_file_and_location() {
        let span = Span::new(5, 25, 0);
        let error = TransformError::at(
            TransformErrorKind::MultipleDeclarations {
                what: DeclarationKind::ExportAlias,
            },
            SOURCE,
            span,
        )
        .with_file(Some(Path::new("lib/common.js")));

        assert_eq!(error.location, Some(Location { line: 2, column: 1 }));
        assert_eq!(
            error.to_string(),
            "Multiple exports alias declarations found (at lib/common.js:2:1)"
        );
    }

    #[test]
    fn test_display_omits_missing_parts() {
        let conflict = TransformErrorKind::ConflictingExportStyle {
            with: StyleConflict::NamedExports,
        };

        let bare = TransformError::new(conflict.clone());
        assert_eq!(bare.to_string(), "Both module.exports and normal exports found");

        let with_file = TransformError::new(conflict).with_file(Some(Path::new("a.js")));
        assert_eq!(
            with_file.to_string(),
            "Both module.exports and normal exports found (at a.js)"
        );

        let no_file = TransformError::at(TransformErrorKind::BadExportAlias, SOURCE, Span::new(2, 3, 0));
        assert_eq!(no_file.to_string(), "The exports object is reassigned (at 1:3)");
    }

    #[test]
    fn test_codes() {
        assert_eq!(TransformError::new(TransformErrorKind::BadExportAlias).code(), "E0100");
        let tree: TransformError = TreeError::UnknownStatement(esmport_ast::StmtId(3)).into();
        assert_eq!(tree.code(), "E0107");
        assert_eq!(tree.to_string(), "Internal rewrite failure: unknown statement #3");

        let undefined = TransformErrorKind::UndefinedExport {
            object: "exports".to_string(),
            name: "missing".to_string(),
        };
        assert_eq!(undefined.code(), "E0108");
        assert_eq!(undefined.to_string(), "`exports.missing` is read but never exported");
    }

    #[test]
    fn test_duplicate_export_message() {
        let kind = TransformErrorKind::MultipleDeclarations {
            what: DeclarationKind::Export("run".to_string()),
        };
        assert_eq!(kind.to_string(), "Multiple `run` export declarations found");
        assert_eq!(kind.code(), "E0101");
    }
}
