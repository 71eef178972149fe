//! Expression shape recognition
//!
//! Works on the token slice of one statement. Only the outermost shape is
//! recognized; nested expressions stay opaque and are carried as spans.

use super::*;

/// Global value names that are not module bindings.
const GLOBAL_VALUES: &[&str] = &["undefined", "NaN", "Infinity"];

/// Classifies an expression statement.
pub(crate) fn expression_statement(tokens: &[Token]) -> StmtKind {
    let tokens = strip_semicolon(tokens);

    let mut assign_at = None;
    for (index, token) in top_level(tokens) {
        match token.kind {
            // Sequence expressions are never a single assignment
            TokenKind::Comma => return StmtKind::Other,
            TokenKind::Question | TokenKind::FatArrow if assign_at.is_none() => {
                return StmtKind::Other;
            }
            kind if kind.is_assign_op() && assign_at.is_none() => assign_at = Some(index),
            _ => {}
        }
    }

    let Some(at) = assign_at else {
        return StmtKind::Other;
    };
    let (target, value) = (&tokens[..at], &tokens[at + 1..]);
    let Some(value_span) = covering(value) else {
        return StmtKind::Other;
    };
    if target.is_empty() {
        return StmtKind::Other;
    }

    let op = if tokens[at].kind == TokenKind::Eq {
        AssignOp::Assign
    } else {
        AssignOp::Compound
    };

    StmtKind::Assign(Assign {
        target: assign_target(target),
        op,
        value: Node::new(expression(value), value_span),
    })
}

/// Splits a `const|let|var` statement into its declarators.
pub(crate) fn var_declaration(tokens: &[Token]) -> VarDecl {
    let tokens = strip_semicolon(tokens);
    let kind = match tokens.first().map(|token| token.kind) {
        Some(TokenKind::Let) => VarKind::Let,
        Some(TokenKind::Const) => VarKind::Const,
        _ => VarKind::Var,
    };

    let body = tokens.get(1..).unwrap_or_default();
    let mut declarators = Vec::new();
    let mut start = 0;
    for (index, token) in top_level(body) {
        if token.kind == TokenKind::Comma {
            declarators.push(declarator(&body[start..index]));
            start = index + 1;
        }
    }
    if start < body.len() {
        declarators.push(declarator(&body[start..]));
    }

    VarDecl { kind, declarators }
}

fn declarator(tokens: &[Token]) -> Declarator {
    let eq = top_level(tokens)
        .find(|(_, token)| token.kind == TokenKind::Eq)
        .map(|(index, _)| index);

    let (binding, init) = match eq {
        Some(index) => (&tokens[..index], &tokens[index + 1..]),
        None => (tokens, &tokens[tokens.len()..]),
    };

    let name = match binding {
        [name] if name.kind == TokenKind::Identifier => Some(ident_node(name)),
        _ => None,
    };
    let init = covering(init).map(|span| Node::new(expression(init), span));

    Declarator { name, init }
}

fn assign_target(tokens: &[Token]) -> AssignTarget {
    match tokens {
        [name] if name.kind == TokenKind::Identifier => AssignTarget::Ident(ident_node(name)),
        [object, dot, property]
            if object.kind == TokenKind::Identifier
                && dot.kind == TokenKind::Dot
                && property.kind.is_word() =>
        {
            AssignTarget::Member {
                object: ident_node(object),
                property: ident_node(property),
            }
        }
        _ => AssignTarget::Other(covering(tokens).unwrap_or(tokens[0].span)),
    }
}

pub(crate) fn expression(tokens: &[Token]) -> Expr {
    match tokens {
        [name] if name.kind == TokenKind::Identifier && !GLOBAL_VALUES.contains(&name.value.as_str()) => {
            Expr::Ident(Ident::new(name.value.clone()))
        }
        _ => function_expr(tokens)
            .or_else(|| arrow_expr(tokens))
            .or_else(|| call_expr(tokens))
            .unwrap_or(Expr::Other),
    }
}

/// `[async] function [*] [name] (params) { body }`
fn function_expr(tokens: &[Token]) -> Option<Expr> {
    let is_async = is_async_prefix(tokens);
    let mut pos = usize::from(is_async);

    if tokens.get(pos)?.kind != TokenKind::Function {
        return None;
    }
    pos += 1;

    let is_generator = tokens.get(pos)?.kind == TokenKind::Star;
    if is_generator {
        pos += 1;
    }

    let name = match tokens.get(pos) {
        Some(token) if token.kind == TokenKind::Identifier => {
            pos += 1;
            Some(ident_node(token))
        }
        _ => None,
    };

    let params_close = matching(tokens, pos, TokenKind::LParen)?;
    let params = tokens[pos].span.merge(&tokens[params_close].span);

    let body_open = params_close + 1;
    let body_close = matching(tokens, body_open, TokenKind::LBrace)?;
    if body_close != tokens.len() - 1 {
        // Immediately invoked or otherwise continued
        return None;
    }

    Some(Expr::Function(FunctionExpr {
        name,
        params,
        body: tokens[body_open].span.merge(&tokens[body_close].span),
        is_async,
        is_generator,
    }))
}

/// `[async] param => body` and `[async] (params) => body`
fn arrow_expr(tokens: &[Token]) -> Option<Expr> {
    let is_async = is_async_prefix(tokens)
        && matches!(tokens[1].kind, TokenKind::Identifier | TokenKind::LParen);
    let pos = usize::from(is_async);

    let first = tokens.get(pos)?;
    let (params, arrow) = match first.kind {
        TokenKind::Identifier => (ArrowParams::Ident(first.span), pos + 1),
        TokenKind::LParen => {
            let close = matching(tokens, pos, TokenKind::LParen)?;
            (
                ArrowParams::Parenthesized(first.span.merge(&tokens[close].span)),
                close + 1,
            )
        }
        _ => return None,
    };

    if tokens.get(arrow)?.kind != TokenKind::FatArrow {
        return None;
    }

    let rest = &tokens[arrow + 1..];
    let span = covering(rest)?;
    let body = if matching(rest, 0, TokenKind::LBrace) == Some(rest.len() - 1) {
        ArrowBody::Block(span)
    } else {
        ArrowBody::Expr(span)
    };

    Some(Expr::Arrow(ArrowExpr {
        params,
        body,
        is_async,
    }))
}

/// `callee(args)` with a bare identifier callee
fn call_expr(tokens: &[Token]) -> Option<Expr> {
    match tokens {
        [callee, open, ..] if callee.kind == TokenKind::Identifier && open.kind == TokenKind::LParen => {
            let close = matching(tokens, 1, TokenKind::LParen)?;
            if close != tokens.len() - 1 {
                return None;
            }
            Some(Expr::Call(CallExpr {
                callee: ident_node(callee),
                args: open.span.merge(&tokens[close].span),
            }))
        }
        _ => None,
    }
}

// =============================================================================
// Token slice helpers
// =============================================================================

/// Tokens outside any bracket pair, with their index.
fn top_level(tokens: &[Token]) -> impl Iterator<Item = (usize, &Token)> + '_ {
    let mut depth = 0usize;
    tokens.iter().enumerate().filter(move |(_, token)| {
        let at_top = depth == 0;
        match token.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        at_top
    })
}

/// Index of the closer matching the `open` delimiter at `tokens[at]`.
fn matching(tokens: &[Token], at: usize, open: TokenKind) -> Option<usize> {
    if tokens.get(at)?.kind != open {
        return None;
    }

    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(at) {
        match token.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_async_prefix(tokens: &[Token]) -> bool {
    match tokens {
        [first, second, ..] => first.is_ident("async") && !second.newline_before,
        _ => false,
    }
}

fn strip_semicolon(tokens: &[Token]) -> &[Token] {
    match tokens.split_last() {
        Some((last, rest)) if last.kind == TokenKind::Semicolon => rest,
        _ => tokens,
    }
}

fn covering(tokens: &[Token]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(first.span.merge(&last.span))
}

fn ident_node(token: &Token) -> Node<Ident> {
    Node::new(Ident::new(token.value.clone()), token.span)
}
