//! Comment trivia

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `#!...` on the first line
    Hashbang,
}

/// A comment together with the span of its full text, delimiters included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub span: Span,
}

impl Comment {
    pub fn new(kind: CommentKind, span: Span) -> Self {
        Self { kind, span }
    }
}
