//! Helper methods and utilities

use super::*;

impl Parser {
    // =========================================================================
    // Utility Methods (Token Manipulation)
    // =========================================================================

    pub(crate) fn current_token(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    pub(crate) fn previous_token(&self) -> &Token {
        &self.tokens[(self.current.saturating_sub(1)).min(self.tokens.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous_token()
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.current_token().kind == kind
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.current + offset).map(|token| &token.kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.current_token().kind == TokenKind::Eof
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> ParseResult<&Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {:?}, found {:?}", kind, self.current_token().kind)))
        }
    }

    pub(crate) fn consume_semicolon(&mut self) {
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError::new(message, self.current_token().span)
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        let token = self.current_token();
        if token.kind == TokenKind::Eof {
            self.error("Unexpected end of input".to_string())
        } else {
            self.error(format!("Unexpected token '{}'", token.value))
        }
    }

    /// `async function` with no line break in between.
    pub(crate) fn is_async_function(&self) -> bool {
        self.current_token().is_ident("async")
            && self.peek_kind(1) == Some(&TokenKind::Function)
            && !self.tokens[self.current + 1].newline_before
    }

    // =========================================================================
    // Delimiter Skipping
    // =========================================================================

    /// Skips from an opening delimiter past its matching closer.
    pub(crate) fn skip_balanced(&mut self) -> ParseResult<()> {
        let open = self.current_token().span;
        let mut closers = Vec::new();

        loop {
            let token = self.current_token();
            match token.kind {
                TokenKind::LParen => closers.push(TokenKind::RParen),
                TokenKind::LBracket => closers.push(TokenKind::RBracket),
                TokenKind::LBrace => closers.push(TokenKind::RBrace),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if closers.pop() != Some(token.kind) {
                        return Err(self.unexpected());
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::new("Unclosed delimiter", open));
                }
                _ => {}
            }
            self.advance();

            if closers.is_empty() {
                return Ok(());
            }
        }
    }

    pub(crate) fn skip_parenthesized(&mut self) -> ParseResult<()> {
        if !self.check(&TokenKind::LParen) {
            return Err(self.error(format!("Expected '(', found {:?}", self.current_token().kind)));
        }
        self.skip_balanced()
    }

    pub(crate) fn skip_block(&mut self) -> ParseResult<()> {
        if !self.check(&TokenKind::LBrace) {
            return Err(self.error(format!("Expected '{{', found {:?}", self.current_token().kind)));
        }
        self.skip_balanced()
    }
}
