//! Structural queries recognizing legacy export statements
//!
//! Every query is a pure predicate over one normalized statement; results
//! come back in source order and the module is never touched.

use crate::{EXPORTS, MODULE};
use esmport_ast::*;
use esmport_lexer::{template_substitutions, Token, TokenKind};
use esmport_parser::Module;
use std::borrow::Cow;

/// The closed set of legacy export shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern<'a> {
    /// `name = ...` anywhere in the statement
    BadExportReassignment { name: &'a str },
    /// `const alias = name;`
    AliasDeclaration { name: &'a str },
    /// `alias.prop = expr;`
    ExportSite { alias: &'a str },
    /// `module.exports = Identifier;`
    DefaultExportAssignment,
}

impl Pattern<'_> {
    pub fn matches(&self, module: &Module, stmt: &Stmt) -> bool {
        match *self {
            Pattern::BadExportReassignment { name } => reassigns(module, stmt, name),
            Pattern::AliasDeclaration { name } => AliasDeclaration::from_stmt(stmt, name).is_some(),
            Pattern::ExportSite { alias } => {
                ExportSite::from_stmt(stmt).map_or(false, |site| site.object == alias)
            }
            Pattern::DefaultExportAssignment => DefaultExport::from_stmt(stmt).is_some(),
        }
    }
}

pub fn find<'m>(module: &'m Module, pattern: Pattern<'_>) -> Vec<&'m Stmt> {
    module.find(|stmt| pattern.matches(module, stmt))
}

pub fn bad_export_reassignment<'m>(module: &'m Module, name: &str) -> Vec<&'m Stmt> {
    find(module, Pattern::BadExportReassignment { name })
}

pub fn alias_declaration<'m>(module: &'m Module, name: &str) -> Vec<&'m Stmt> {
    find(module, Pattern::AliasDeclaration { name })
}

pub fn export_site<'m>(module: &'m Module, alias: &str) -> Vec<&'m Stmt> {
    find(module, Pattern::ExportSite { alias })
}

pub fn default_export_assignment(module: &Module) -> Vec<&Stmt> {
    find(module, Pattern::DefaultExportAssignment)
}

// =============================================================================
// Typed views
// =============================================================================

/// `const alias = exports;`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDeclaration {
    pub stmt: StmtId,
    pub alias: Node<Ident>,
}

impl AliasDeclaration {
    pub fn from_stmt(stmt: &Stmt, target: &str) -> Option<Self> {
        let StmtKind::VarDecl(decl) = &stmt.kind else {
            return None;
        };
        let [declarator] = decl.declarators.as_slice() else {
            return None;
        };
        if decl.kind != VarKind::Const {
            return None;
        }

        let alias = declarator.name.as_ref()?;
        let init = declarator.init.as_ref()?.value.as_ident()?;
        (init.name == target).then(|| Self {
            stmt: stmt.id,
            alias: alias.clone(),
        })
    }
}

/// `object.name = value;` as a top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSite {
    pub stmt: StmtId,
    pub object: String,
    pub object_span: Span,
    pub name: Node<Ident>,
    pub value: Node<Expr>,
}

impl ExportSite {
    pub fn from_stmt(stmt: &Stmt) -> Option<Self> {
        let StmtKind::Assign(assign) = &stmt.kind else {
            return None;
        };
        if assign.op != AssignOp::Assign {
            return None;
        }
        let AssignTarget::Member { object, property } = &assign.target else {
            return None;
        };

        Some(Self {
            stmt: stmt.id,
            object: object.value.name.clone(),
            object_span: object.span,
            name: property.clone(),
            value: assign.value.clone(),
        })
    }

    pub fn export_name(&self) -> &str {
        &self.name.value.name
    }
}

/// `module.exports = Local;`
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultExport {
    pub stmt: StmtId,
    pub local: Node<Ident>,
}

impl DefaultExport {
    pub fn from_stmt(stmt: &Stmt) -> Option<Self> {
        let site = ExportSite::from_stmt(stmt)?;
        if site.object != MODULE || site.export_name() != EXPORTS {
            return None;
        }
        let local = site.value.value.as_ident()?.clone();
        Some(Self {
            stmt: stmt.id,
            local: Node::new(local, site.value.span),
        })
    }
}

// =============================================================================
// Token-level queries
// =============================================================================

/// A `object.name` member access found in the module's tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRef {
    pub stmt: StmtId,
    /// `object.name`, both parts included
    pub span: Span,
    pub name: String,
    /// Written to by an assignment operator, `++` or `--`
    pub assigned: bool,
    /// The target of a top-level `object.name = ...` statement
    pub is_site_target: bool,
}

/// Every `object.name` access in statements still present in the module.
pub fn member_references(module: &Module, object: &str) -> Vec<MemberRef> {
    let mut refs = Vec::new();

    for stmt in module.find(|_| true) {
        let site_target = ExportSite::from_stmt(stmt)
            .filter(|site| site.object == object)
            .map(|site| site.name.span);

        for tokens in token_groups(module, stmt) {
            let tokens = tokens.as_ref();
            for (index, window) in tokens.windows(3).enumerate() {
                let [head, dot, property] = window else {
                    continue;
                };
                if !head.is_ident(object)
                    || dot.kind != TokenKind::Dot
                    || !property.kind.is_word()
                    || is_property_access(tokens, index)
                {
                    continue;
                }

                let before = index.checked_sub(1).map(|i| tokens[i].kind);
                let after = tokens.get(index + 3).map(|token| token.kind);
                let assigned = after.map_or(false, |kind| {
                    kind.is_assign_op() || matches!(kind, TokenKind::PlusPlus | TokenKind::MinusMinus)
                }) || matches!(before, Some(TokenKind::PlusPlus | TokenKind::MinusMinus));

                refs.push(MemberRef {
                    stmt: stmt.id,
                    span: head.span.merge(&property.span),
                    name: property.value.clone(),
                    assigned,
                    is_site_target: site_target == Some(property.span),
                });
            }
        }
    }

    refs
}

/// Uses of `name` as a plain value: not a property, not followed by `.`,
/// not an object literal key.
pub fn bare_references(module: &Module, name: &str) -> Vec<Span> {
    let mut spans = Vec::new();

    for stmt in module.find(|_| true) {
        for tokens in token_groups(module, stmt) {
            let tokens = tokens.as_ref();
            for (index, token) in tokens.iter().enumerate() {
                if !token.is_ident(name) || is_property_access(tokens, index) {
                    continue;
                }
                let next = tokens.get(index + 1).map(|token| token.kind);
                let before = index.checked_sub(1).map(|i| tokens[i].kind);
                let is_key = next == Some(TokenKind::Colon)
                    && matches!(before, Some(TokenKind::LBrace | TokenKind::Comma));
                if next == Some(TokenKind::Dot) || is_key {
                    continue;
                }
                spans.push(token.span);
            }
        }
    }

    spans.sort_by_key(|span| span.start);
    spans
}

/// Whether an `export` statement already exposes a binding named `name`.
///
/// Covers `export class|function|const|let|var name` and the exported side
/// of `export { a as name }` lists.
pub fn exports_name(module: &Module, name: &str) -> bool {
    module
        .find(|stmt| stmt.kind == StmtKind::Export)
        .into_iter()
        .any(|stmt| {
            let tokens = module.tokens_of(stmt);
            match tokens.get(1).map(|token| token.kind) {
                Some(TokenKind::LBrace) => tokens[2..]
                    .split(|token| matches!(token.kind, TokenKind::Comma | TokenKind::RBrace))
                    .take_while(|specifier| !specifier.is_empty())
                    .any(|specifier| specifier.last().map_or(false, |last| last.value == name)),
                _ => tokens[1..]
                    .iter()
                    .find(|token| {
                        !matches!(
                            token.kind,
                            TokenKind::Class
                                | TokenKind::Function
                                | TokenKind::Star
                                | TokenKind::Const
                                | TokenKind::Let
                                | TokenKind::Var
                        ) && !token.is_ident("async")
                    })
                    .map_or(false, |token| token.is_ident(name)),
            }
        })
}

/// `tokens[index]` is the property of a member access (`a.x`, `a?.x`).
fn is_property_access(tokens: &[Token], index: usize) -> bool {
    index
        .checked_sub(1)
        .map_or(false, |i| matches!(tokens[i].kind, TokenKind::Dot | TokenKind::QuestionDot))
}

fn reassigns(module: &Module, stmt: &Stmt, name: &str) -> bool {
    let in_declaration = matches!(stmt.kind, StmtKind::VarDecl(_));

    token_groups(module, stmt).iter().any(|tokens| {
        let tokens: &[Token] = tokens;
        tokens.windows(2).enumerate().any(|(index, pair)| {
            if !pair[0].is_ident(name) || !pair[1].kind.is_assign_op() {
                return false;
            }
            let before = index.checked_sub(1).map(|i| tokens[i].kind);
            match before {
                Some(TokenKind::Dot | TokenKind::QuestionDot) => false,
                // `const exports = ...` declares rather than reassigns
                Some(TokenKind::Var | TokenKind::Let | TokenKind::Const) => false,
                Some(TokenKind::Comma) => !in_declaration,
                _ => true,
            }
        })
    })
}

/// The statement's tokens, then the tokens of every template substitution
/// inside it.
fn token_groups<'m>(module: &'m Module, stmt: &Stmt) -> Vec<Cow<'m, [Token]>> {
    let tokens = module.tokens_of(stmt);
    let mut groups = vec![Cow::Borrowed(tokens)];
    for template in tokens.iter().filter(|token| token.kind == TokenKind::TemplateLiteral) {
        groups.extend(
            template_substitutions(module.source(), template.span)
                .into_iter()
                .map(Cow::Owned),
        );
    }
    groups
}
