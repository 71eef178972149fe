//! Expression shapes for the AST
//!
//! Only the shapes that decide how an export is rewritten are modelled.
//! Parameter lists and bodies are spans over the source so they can be
//! reproduced verbatim.

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare identifier reference: `foo`
    Ident(Ident),

    /// Function expression: `function name(a, b) { ... }`
    Function(FunctionExpr),

    /// Arrow function: `(a, b) => ...`
    Arrow(ArrowExpr),

    /// Call whose callee is a bare identifier: `require('./x')`
    Call(CallExpr),

    /// Anything else (literals, objects, member chains, `new`, ...)
    Other,
}

impl Expr {
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn is_function_like(&self) -> bool {
        matches!(self, Expr::Function(_) | Expr::Arrow(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub name: Option<Node<Ident>>,
    /// Parameter list including the parentheses
    pub params: Span,
    /// Body including the braces
    pub body: Span,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowExpr {
    pub params: ArrowParams,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowParams {
    /// `x => ...`
    Ident(Span),
    /// `(x, y) => ...`, parentheses included
    Parenthesized(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// `=> { ... }`, braces included
    Block(Span),
    /// `=> expr`
    Expr(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Node<Ident>,
    /// Argument list including the parentheses
    pub args: Span,
}

impl CallExpr {
    pub fn is_call_to(&self, name: &str) -> bool {
        self.callee.value.name == name
    }
}
