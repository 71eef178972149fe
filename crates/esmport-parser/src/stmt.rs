//! Statement parsing
//!
//! Statements are not built into a tree; the parser only decides where each
//! one ends. Declarations and control flow follow the statement grammar,
//! expression and variable statements end at `;` or at an automatic
//! semicolon insertion point.

use super::*;

impl Parser {
    // =========================================================================
    // Module Items
    // =========================================================================

    pub(crate) fn parse_module_item(&mut self) -> ParseResult<StmtKind> {
        let start = self.current;

        match self.current_token().kind {
            TokenKind::Import
                if !matches!(self.peek_kind(1), Some(TokenKind::LParen | TokenKind::Dot)) =>
            {
                self.scan_to_statement_end()?;
                Ok(StmtKind::Import)
            }
            TokenKind::Export => self.parse_export(),
            TokenKind::Const | TokenKind::Let | TokenKind::Var => {
                self.scan_to_statement_end()?;
                Ok(StmtKind::VarDecl(expr::var_declaration(
                    &self.tokens[start..self.current],
                )))
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(StmtKind::Empty)
            }
            _ if self.is_statement_keyword() => {
                self.parse_statement()?;
                Ok(StmtKind::Other)
            }
            _ => {
                self.scan_to_statement_end()?;
                Ok(expr::expression_statement(&self.tokens[start..self.current]))
            }
        }
    }

    fn parse_export(&mut self) -> ParseResult<StmtKind> {
        self.advance(); // export

        if self.check(&TokenKind::Default) {
            self.advance();
            if self.is_declaration_start() {
                self.parse_statement()?;
            } else {
                self.scan_to_statement_end()?;
            }
            return Ok(StmtKind::ExportDefault);
        }

        if self.is_declaration_start() {
            self.parse_statement()?;
        } else {
            // export const ..., export { ... } from ..., export * ...
            self.scan_to_statement_end()?;
        }
        Ok(StmtKind::Export)
    }

    fn is_declaration_start(&self) -> bool {
        matches!(self.current_token().kind, TokenKind::Function | TokenKind::Class)
            || self.is_async_function()
    }

    /// Statements whose extent is decided by grammar rather than by ASI.
    fn is_statement_keyword(&self) -> bool {
        match self.current_token().kind {
            TokenKind::LBrace
            | TokenKind::If
            | TokenKind::For
            | TokenKind::While
            | TokenKind::With
            | TokenKind::Do
            | TokenKind::Try
            | TokenKind::Switch
            | TokenKind::Debugger => true,
            TokenKind::Identifier => {
                self.is_async_function() || self.peek_kind(1) == Some(&TokenKind::Colon)
            }
            _ => self.is_declaration_start(),
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> ParseResult<()> {
        match self.current_token().kind {
            TokenKind::LBrace => self.skip_block(),
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Function => self.skip_function(),
            TokenKind::Identifier if self.is_async_function() => self.skip_function(),
            TokenKind::Class => self.skip_class(),
            TokenKind::If => {
                self.advance();
                self.skip_parenthesized()?;
                self.parse_statement()?;
                if self.check(&TokenKind::Else) {
                    self.advance();
                    self.parse_statement()?;
                }
                Ok(())
            }
            TokenKind::For => {
                self.advance();
                if self.current_token().is_ident("await") {
                    self.advance();
                }
                self.skip_parenthesized()?;
                self.parse_statement()
            }
            TokenKind::While | TokenKind::With => {
                self.advance();
                self.skip_parenthesized()?;
                self.parse_statement()
            }
            TokenKind::Do => {
                self.advance();
                self.parse_statement()?;
                self.consume(TokenKind::While)?;
                self.skip_parenthesized()?;
                self.consume_semicolon();
                Ok(())
            }
            TokenKind::Try => {
                self.advance();
                self.skip_block()?;
                if self.check(&TokenKind::Catch) {
                    self.advance();
                    if self.check(&TokenKind::LParen) {
                        self.skip_parenthesized()?;
                    }
                    self.skip_block()?;
                }
                if self.check(&TokenKind::Finally) {
                    self.advance();
                    self.skip_block()?;
                }
                Ok(())
            }
            TokenKind::Switch => {
                self.advance();
                self.skip_parenthesized()?;
                self.skip_block()
            }
            TokenKind::Debugger => {
                self.advance();
                self.consume_semicolon();
                Ok(())
            }
            TokenKind::Identifier if self.peek_kind(1) == Some(&TokenKind::Colon) => {
                // Labeled statement
                self.advance();
                self.advance();
                self.parse_statement()
            }
            _ => self.scan_to_statement_end(),
        }
    }

    fn skip_function(&mut self) -> ParseResult<()> {
        if self.current_token().is_ident("async") {
            self.advance();
        }
        self.consume(TokenKind::Function)?;
        if self.check(&TokenKind::Star) {
            self.advance();
        }
        if self.current_token().kind.is_word() {
            self.advance();
        }
        self.skip_parenthesized()?;
        self.skip_block()
    }

    fn skip_class(&mut self) -> ParseResult<()> {
        self.advance(); // class
        if self.check(&TokenKind::Identifier) {
            self.advance();
        }
        if self.check(&TokenKind::Extends) {
            self.advance();
            // Heritage expression runs up to the class body
            while !self.check(&TokenKind::LBrace) {
                match self.current_token().kind {
                    TokenKind::LParen | TokenKind::LBracket => self.skip_balanced()?,
                    TokenKind::Eof => return Err(self.unexpected()),
                    _ => {
                        self.advance();
                    }
                }
            }
        }
        self.skip_block()
    }

    /// Advances past an expression-like statement.
    pub(crate) fn scan_to_statement_end(&mut self) -> ParseResult<()> {
        let first = self.current;

        while !self.is_at_end() {
            if self.current > first && self.at_asi_boundary() {
                break;
            }

            match self.current_token().kind {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced()?;
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    return Err(self.unexpected());
                }
                _ => {
                    self.advance();
                }
            }
        }
        Ok(())
    }

    /// A line break where a semicolon is inserted before the current token.
    fn at_asi_boundary(&self) -> bool {
        let token = self.current_token();
        if !token.newline_before || token.kind == TokenKind::LBrace {
            return false;
        }
        // `++` and `--` are not continuations, so `a\n++b` splits as well
        self.previous_token().kind.ends_expression() && !token.kind.continues_expression()
    }
}
