//! Core Parser struct and main parsing methods

use super::*;

/// Statement-level parser for JavaScript modules
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
}

impl Parser {
    /// Creates a new parser from a token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Splits the token stream into top-level statements.
    pub fn parse_program(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            let first = self.current;
            let kind = self.parse_module_item()?;
            let span = self.tokens[first].span.merge(&self.previous_token().span);

            stmts.push(Stmt {
                id: StmtId(stmts.len()),
                kind,
                span,
                leading: Vec::new(),
                trailing: Vec::new(),
                tokens: first..self.current,
            });
        }

        Ok(stmts)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

/// Parses `source` into a module tree.
pub fn parse_module(source: &str, file_id: usize) -> ParseResult<Module> {
    let mut lexer = Lexer::with_file_id(source, file_id);
    let tokens = lexer.tokenize();

    if let Some(bad) = tokens.iter().find(|token| token.kind == TokenKind::Error) {
        return Err(ParseError::new(bad.value.clone(), bad.span));
    }

    let mut parser = Parser::new(tokens);
    let mut stmts = parser.parse_program()?;
    comments::attach_comments(&mut stmts, lexer.take_comments(), source);

    Ok(Module::new(
        source.to_string(),
        file_id,
        parser.into_tokens(),
        stmts,
    ))
}
