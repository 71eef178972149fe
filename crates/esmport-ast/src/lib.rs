//! # Esmport AST
//!
//! Syntax data shared by the lexer, the parser and the export transform.
//! Statements are kept at the top level of a module only; the expression
//! shapes the transform cares about are normalized, everything else is
//! carried as an opaque span over the original source.

use std::fmt;

// =============================================================================
// Core Types (kept in lib.rs - used by all modules)
// =============================================================================

/// Source location information (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub file_id: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, file_id: usize) -> Self {
        Self { start, end, file_id }
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            file_id: self.file_id,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// AST node wrapper that includes span information
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Node<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { span, value }
    }
}

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// =============================================================================
// Module Declarations
// =============================================================================

pub mod comment;
pub mod expr;
pub mod stmt;
pub mod line_index;

pub use comment::*;
pub use expr::*;
pub use stmt::*;
pub use line_index::{LineIndex, Location};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_and_contains() {
        let a = Span::new(4, 10, 0);
        let b = Span::new(8, 20, 0);
        let merged = a.merge(&b);
        assert_eq!(merged, Span::new(4, 20, 0));
        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
        assert!(!a.contains(&b));
        assert_eq!(merged.len(), 16);
    }

    #[test]
    fn test_empty_span() {
        assert!(Span::new(3, 3, 0).is_empty());
        assert!(!Span::new(3, 4, 0).is_empty());
    }
}
