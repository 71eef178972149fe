//! Statement definitions for the AST

use super::*;
use std::fmt;
use std::ops::Range;

/// Stable handle of a statement parsed from source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtId(pub usize);

impl fmt::Display for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Top-level statement of a module
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub id: StmtId,
    pub kind: StmtKind,
    /// Code of the statement, terminating semicolon included
    pub span: Span,
    /// Comments attached in front of the statement
    pub leading: Vec<Comment>,
    /// Comments that start on the line the statement ends on
    pub trailing: Vec<Comment>,
    /// Index range into the owning module's token list
    pub tokens: Range<usize>,
}

impl Stmt {
    /// Offset where the statement's attached trivia begins.
    pub fn lead_start(&self) -> usize {
        self.leading
            .first()
            .map(|c| c.span.start)
            .unwrap_or(self.span.start)
    }

    /// Offset where the statement's trailing comments end.
    pub fn full_end(&self) -> usize {
        self.trailing
            .last()
            .map(|c| c.span.end)
            .unwrap_or(self.span.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `;`
    Empty,

    /// Expression statement that is a single assignment: `target op value`
    Assign(Assign),

    /// `const|let|var ...`
    VarDecl(VarDecl),

    /// `import ...`
    Import,

    /// `export default ...`
    ExportDefault,

    /// Any other `export ...`
    Export,

    /// Declarations, control flow and non-assignment expressions
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: AssignTarget,
    pub op: AssignOp,
    pub value: Node<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`, `||=`, ...
    Compound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `name = ...`
    Ident(Node<Ident>),

    /// `object.property = ...`
    Member {
        object: Node<Ident>,
        property: Node<Ident>,
    },

    /// Patterns, computed members, deeper chains
    Other(Span),
}

impl AssignTarget {
    pub fn span(&self) -> Span {
        match self {
            AssignTarget::Ident(ident) => ident.span,
            AssignTarget::Member { object, property } => object.span.merge(&property.span),
            AssignTarget::Other(span) => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKind::Var => write!(f, "var"),
            VarKind::Let => write!(f, "let"),
            VarKind::Const => write!(f, "const"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// `None` for destructuring patterns
    pub name: Option<Node<Ident>>,
    pub init: Option<Node<Expr>>,
}
