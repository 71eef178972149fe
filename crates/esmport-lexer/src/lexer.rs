use esmport_ast::{Comment, CommentKind, Span};
use crate::token::{keyword, Token, TokenKind};

/// Punctuators, longest first so the first prefix match wins.
const PUNCTUATORS: &[(&str, TokenKind)] = &[
    (">>>=", TokenKind::GtGtGtEq),
    ("...", TokenKind::DotDotDot),
    ("===", TokenKind::EqEqEq),
    ("!==", TokenKind::BangEqEq),
    ("**=", TokenKind::StarStarEq),
    ("<<=", TokenKind::LtLtEq),
    (">>=", TokenKind::GtGtEq),
    (">>>", TokenKind::GtGtGt),
    ("&&=", TokenKind::AmpAmpEq),
    ("||=", TokenKind::PipePipeEq),
    ("??=", TokenKind::QuestionQuestionEq),
    ("=>", TokenKind::FatArrow),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::BangEq),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("??", TokenKind::QuestionQuestion),
    ("?.", TokenKind::QuestionDot),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("%=", TokenKind::PercentEq),
    ("&=", TokenKind::AmpEq),
    ("|=", TokenKind::PipeEq),
    ("^=", TokenKind::CaretEq),
    ("**", TokenKind::StarStar),
    ("<<", TokenKind::LtLt),
    (">>", TokenKind::GtGt),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Eq),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("!", TokenKind::Bang),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("?", TokenKind::Question),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    ("@", TokenKind::At),
];

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_ident_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric() || ch == '\u{200c}' || ch == '\u{200d}'
}

/// The lexer/tokenizer for JavaScript modules.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::str::CharIndices<'a>,
    current_pos: usize,
    current_char: Option<char>,
    file_id: usize,
    comments: Vec<Comment>,
    prev_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer from source code.
    pub fn new(source: &'a str) -> Self {
        Self::with_file_id(source, 0)
    }

    /// Creates a new lexer with a specific file ID.
    pub fn with_file_id(source: &'a str, file_id: usize) -> Self {
        let mut chars = source.char_indices();
        let current_char = chars.next().map(|(_, c)| c);
        Self {
            source,
            chars,
            current_pos: 0,
            current_char,
            file_id,
            comments: Vec::new(),
            prev_kind: None,
        }
    }

    /// Tokenizes the entire source code and returns all tokens.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Comments seen so far, in source order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Gets the next token from the source.
    pub fn next_token(&mut self) -> Token {
        let newline_before = match self.skip_whitespace_and_comments() {
            Ok(newline) => newline,
            Err(error_token) => return error_token,
        };

        let mut token = self.scan_token();
        token.newline_before = newline_before;
        self.prev_kind = Some(token.kind);
        token
    }

    fn scan_token(&mut self) -> Token {
        let start = self.current_pos;

        let Some(ch) = self.current_char else {
            return Token::new(TokenKind::Eof, Span::new(start, start, self.file_id), String::new());
        };

        match ch {
            '"' | '\'' => self.read_string_literal(ch),
            '`' => self.read_template_literal(),
            '0'..='9' => self.read_number(),
            '.' if self.peek().map_or(false, |c| c.is_ascii_digit()) => self.read_number(),
            '#' if self.peek().map_or(false, is_ident_start) => {
                self.advance();
                self.read_identifier_or_keyword(start, TokenKind::PrivateName)
            }
            '/' if self.regex_allowed() => self.read_regex(),
            _ if is_ident_start(ch) => self.read_identifier_or_keyword(start, TokenKind::Identifier),
            _ => self.read_punctuator(),
        }
    }

    // Helper methods

    fn advance(&mut self) {
        if let Some((pos, ch)) = self.chars.next() {
            self.current_pos = pos;
            self.current_char = Some(ch);
        } else {
            self.current_pos = self.source.len();
            self.current_char = None;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next().map(|(_, c)| c)
    }

    fn finish(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            Span::new(start, self.current_pos, self.file_id),
            self.source[start..self.current_pos].to_string(),
        )
    }

    fn error(&self, start: usize, message: &str) -> Token {
        Token::new(
            TokenKind::Error,
            Span::new(start, self.current_pos, self.file_id),
            message.to_string(),
        )
    }

    fn regex_allowed(&self) -> bool {
        self.prev_kind.map_or(true, |kind| !kind.ends_expression())
    }

    /// Skips trivia, recording comments. Returns whether a line break was crossed.
    fn skip_whitespace_and_comments(&mut self) -> Result<bool, Token> {
        let mut newline = false;

        if self.current_pos == 0 && self.current_char == Some('#') && self.peek() == Some('!') {
            let start = self.current_pos;
            self.skip_single_line_comment();
            self.record_comment(CommentKind::Hashbang, start);
        }

        loop {
            match self.current_char {
                Some(ch) if is_line_terminator(ch) => {
                    newline = true;
                    self.advance();
                }
                Some(ch) if ch.is_whitespace() || ch == '\u{feff}' => {
                    self.advance();
                }
                Some('/') if self.peek() == Some('/') => {
                    let start = self.current_pos;
                    self.skip_single_line_comment();
                    self.record_comment(CommentKind::Line, start);
                }
                Some('/') if self.peek() == Some('*') => {
                    let start = self.current_pos;
                    if !self.skip_multi_line_comment() {
                        return Err(self.error(start, "Unterminated multi-line comment"));
                    }
                    if self.source[start..self.current_pos].contains(is_line_terminator) {
                        newline = true;
                    }
                    self.record_comment(CommentKind::Block, start);
                }
                _ => break,
            }
        }
        Ok(newline)
    }

    fn record_comment(&mut self, kind: CommentKind, start: usize) {
        self.comments
            .push(Comment::new(kind, Span::new(start, self.current_pos, self.file_id)));
    }

    /// Stops in front of the line terminator so it still counts as a line break.
    fn skip_single_line_comment(&mut self) {
        while let Some(ch) = self.current_char {
            if is_line_terminator(ch) {
                break;
            }
            self.advance();
        }
    }

    fn skip_multi_line_comment(&mut self) -> bool {
        // Skip /*
        self.advance();
        self.advance();

        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance(); // *
                self.advance(); // /
                return true;
            }
            self.advance();
        }
        false // Unterminated
    }

    fn read_string_literal(&mut self, quote: char) -> Token {
        let start = self.current_pos;
        self.advance(); // Skip opening quote

        let mut value = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                self.advance(); // Skip closing quote
                return Token::new(
                    TokenKind::StringLiteral,
                    Span::new(start, self.current_pos, self.file_id),
                    value,
                );
            } else if ch == '\\' {
                self.advance();
                match self.current_char {
                    Some('u') => {
                        self.advance();
                        value.push(self.read_unicode_escape());
                    }
                    Some('x') => {
                        self.advance();
                        value.push(self.read_hex_digits(2));
                    }
                    Some('\r') => {
                        // Line continuation, CRLF counts as one terminator
                        self.advance();
                        if self.current_char == Some('\n') {
                            self.advance();
                        }
                    }
                    Some(escaped) => {
                        match escaped {
                            'n' => value.push('\n'),
                            'r' => value.push('\r'),
                            't' => value.push('\t'),
                            'b' => value.push('\u{8}'),
                            'f' => value.push('\u{c}'),
                            'v' => value.push('\u{b}'),
                            '0' => value.push('\0'),
                            '\n' | '\u{2028}' | '\u{2029}' => {}
                            _ => value.push(escaped),
                        }
                        self.advance();
                    }
                    None => break,
                }
            } else if is_line_terminator(ch) {
                return self.error(start, "Unterminated string literal");
            } else {
                value.push(ch);
                self.advance();
            }
        }

        self.error(start, "Unterminated string literal")
    }

    fn read_unicode_escape(&mut self) -> char {
        if self.current_char != Some('{') {
            return self.read_hex_digits(4);
        }

        self.advance();
        let mut code = 0u32;
        while let Some(digit) = self.current_char.and_then(|c| c.to_digit(16)) {
            code = code.saturating_mul(16).saturating_add(digit);
            self.advance();
        }
        if self.current_char == Some('}') {
            self.advance();
        }
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }

    fn read_hex_digits(&mut self, count: usize) -> char {
        let mut code = 0u32;
        for _ in 0..count {
            match self.current_char.and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    code = code * 16 + digit;
                    self.advance();
                }
                None => break,
            }
        }
        char::from_u32(code).unwrap_or('\u{FFFD}')
    }

    /// Reads a whole template literal, `${ }` substitutions included, as one token.
    fn read_template_literal(&mut self) -> Token {
        let start = self.current_pos;
        self.advance(); // Skip opening backtick

        loop {
            match self.current_char {
                None => return self.error(start, "Unterminated template literal"),
                Some('`') => {
                    self.advance();
                    return self.finish(TokenKind::TemplateLiteral, start);
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    self.advance();
                    if !self.skip_substitution() {
                        return self.error(start, "Unterminated template literal");
                    }
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Skips the inside of `${ ... }` up to and including the closing brace.
    fn skip_substitution(&mut self) -> bool {
        let mut depth = 1usize;

        while let Some(ch) = self.current_char {
            match ch {
                '{' => {
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return true;
                    }
                }
                '"' | '\'' => {
                    if self.read_string_literal(ch).kind == TokenKind::Error {
                        return false;
                    }
                }
                '`' => {
                    if self.read_template_literal().kind == TokenKind::Error {
                        return false;
                    }
                }
                '/' if self.peek() == Some('/') => self.skip_single_line_comment(),
                '/' if self.peek() == Some('*') => {
                    if !self.skip_multi_line_comment() {
                        return false;
                    }
                }
                _ => self.advance(),
            }
        }
        false
    }

    fn read_regex(&mut self) -> Token {
        let start = self.current_pos;
        self.advance(); // Skip opening slash

        let mut in_class = false;
        loop {
            match self.current_char {
                None => return self.error(start, "Unterminated regular expression"),
                Some(ch) if is_line_terminator(ch) => {
                    return self.error(start, "Unterminated regular expression");
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char {
                        Some(ch) if !is_line_terminator(ch) => self.advance(),
                        _ => return self.error(start, "Unterminated regular expression"),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.advance();
                }
                Some(']') => {
                    in_class = false;
                    self.advance();
                }
                Some('/') if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        // Flags
        while self.current_char.map_or(false, is_ident_part) {
            self.advance();
        }

        self.finish(TokenKind::RegexLiteral, start)
    }

    fn read_number(&mut self) -> Token {
        let start = self.current_pos;

        if self.current_char == Some('0')
            && matches!(self.peek(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'))
        {
            self.advance(); // 0
            self.advance(); // radix
            while self.current_char.map_or(false, |c| c.is_ascii_hexdigit() || c == '_') {
                self.advance();
            }
        } else {
            self.skip_digits();

            if self.current_char == Some('.') {
                self.advance();
                self.skip_digits();
            }

            if matches!(self.current_char, Some('e' | 'E')) {
                self.advance();
                if matches!(self.current_char, Some('+' | '-')) {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        // BigInt suffix
        if self.current_char == Some('n') {
            self.advance();
            return self.finish(TokenKind::BigIntLiteral, start);
        }

        self.finish(TokenKind::NumberLiteral, start)
    }

    fn skip_digits(&mut self) {
        while self.current_char.map_or(false, |c| c.is_ascii_digit() || c == '_') {
            self.advance();
        }
    }

    fn read_identifier_or_keyword(&mut self, start: usize, kind: TokenKind) -> Token {
        while self.current_char.map_or(false, is_ident_part) {
            self.advance();
        }

        let value = &self.source[start..self.current_pos];
        let kind = if kind == TokenKind::Identifier {
            keyword(value).unwrap_or(TokenKind::Identifier)
        } else {
            kind
        };

        Token::new(kind, Span::new(start, self.current_pos, self.file_id), value.to_string())
    }

    fn read_punctuator(&mut self) -> Token {
        let start = self.current_pos;
        let rest = &self.source[start..];

        let Some(&(text, mut kind)) = PUNCTUATORS.iter().find(|(text, _)| rest.starts_with(text)) else {
            let ch = self.current_char.unwrap_or_default();
            self.advance();
            return self.error(start, &format!("Unexpected character: {}", ch));
        };

        let mut len = text.len();
        // `a?.5:b` is a conditional, not optional chaining
        if kind == TokenKind::QuestionDot && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            kind = TokenKind::Question;
            len = 1;
        }

        for _ in 0..len {
            self.advance();
        }
        self.finish(kind, start)
    }
}

/// Tokens of each `${ ... }` substitution of the template literal at `span`.
///
/// Returns one group per substitution, those of nested templates included,
/// with spans relative to `source`. Scanning stops at the first malformed
/// substitution.
pub fn template_substitutions(source: &str, span: Span) -> Vec<Vec<Token>> {
    let mut groups = Vec::new();
    let raw = source.as_bytes();
    let mut pos = span.start + 1;

    while pos < span.end {
        match raw[pos] {
            b'\\' => pos += 2,
            b'$' if raw.get(pos + 1) == Some(&b'{') => {
                let start = pos + 2;
                let mut lexer = Lexer::with_file_id(&source[start..span.end], span.file_id);
                let mut group = Vec::new();
                let mut nested = Vec::new();
                let mut depth = 0usize;

                let close = loop {
                    let mut token = lexer.next_token();
                    token.span = Span::new(start + token.span.start, start + token.span.end, span.file_id);
                    match token.kind {
                        TokenKind::Eof | TokenKind::Error => return groups,
                        TokenKind::RBrace if depth == 0 => break token.span.end,
                        TokenKind::RBrace => depth -= 1,
                        TokenKind::LBrace => depth += 1,
                        TokenKind::TemplateLiteral => {
                            nested.extend(template_substitutions(source, token.span))
                        }
                        _ => {}
                    }
                    group.push(token);
                };

                groups.push(group);
                groups.append(&mut nested);
                pos = close;
            }
            _ => pos += 1,
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keywords() {
        let source = "let const var function return if else export default";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!(tokens[1].kind, TokenKind::Const);
        assert_eq!(tokens[2].kind, TokenKind::Var);
        assert_eq!(tokens[3].kind, TokenKind::Function);
        assert_eq!(tokens[4].kind, TokenKind::Return);
        assert_eq!(tokens[5].kind, TokenKind::If);
        assert_eq!(tokens[6].kind, TokenKind::Else);
        assert_eq!(tokens[7].kind, TokenKind::Export);
        assert_eq!(tokens[8].kind, TokenKind::Default);
    }

    #[test]
    fn test_contextual_words_are_identifiers() {
        let source = "async await of from as module exports require undefined";
        let tokens = Lexer::new(source).tokenize();

        for token in &tokens[..9] {
            assert_eq!(token.kind, TokenKind::Identifier, "{}", token.value);
        }
        assert!(tokens[6].is_ident("exports"));
    }

    #[test]
    fn test_numbers() {
        let source = "123 45.67 0x1A 0o77 0b1010 1_000_000 .5 1e-3 42n";
        let tokens = Lexer::new(source).tokenize();

        let values: Vec<&str> = tokens[..9].iter().map(|t| t.value.as_str()).collect();
        assert_eq!(
            values,
            ["123", "45.67", "0x1A", "0o77", "0b1010", "1_000_000", ".5", "1e-3", "42n"]
        );
        assert!(tokens[..8].iter().all(|t| t.kind == TokenKind::NumberLiteral));
        assert_eq!(tokens[8].kind, TokenKind::BigIntLiteral);
    }

    #[test]
    fn test_strings() {
        let source = r#""hello" 'wor\'ld' 'a\nb'"#;
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, "hello");
        assert_eq!(tokens[1].value, "wor'ld");
        assert_eq!(tokens[2].value, "a\nb");
        assert_eq!(&source[tokens[1].span.start..tokens[1].span.end], r#"'wor\'ld'"#);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = Lexer::new("'abc\nx").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].value, "Unterminated string literal");
    }

    #[test]
    fn test_template_with_substitutions() {
        let source = "`a ${b + `c ${d}`} ${ {e: 1}.e }` x";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::TemplateLiteral);
        assert_eq!(tokens[0].value, "`a ${b + `c ${d}`} ${ {e: 1}.e }`");
        assert_eq!(tokens[1].value, "x");
    }

    #[test]
    fn test_template_substitution_tokens() {
        let source = "x = `a ${b.c} \\${no} ${ {d: `${e}`}.d }`;";
        let tokens = Lexer::new(source).tokenize();
        let template = tokens.iter().find(|t| t.kind == TokenKind::TemplateLiteral).unwrap();

        let groups: Vec<Vec<&str>> = template_substitutions(source, template.span)
            .iter()
            .map(|group| group.iter().map(|t| &source[t.span.start..t.span.end]).collect())
            .collect();
        assert_eq!(
            groups,
            vec![
                vec!["b", ".", "c"],
                vec!["{", "d", ":", "`${e}`", "}", ".", "d"],
                vec!["e"],
            ]
        );
    }

    #[test]
    fn test_regex_versus_division() {
        assert_eq!(
            kinds("x = /ab+c/gi.test(s)"),
            [
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::RegexLiteral,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a / b / c"),
            [
                TokenKind::Identifier,
                TokenKind::Slash,
                TokenKind::Identifier,
                TokenKind::Slash,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_regex_with_class_and_escapes() {
        let source = r"if (!/^[/\]]+\d$/.test(part)) throw 1;";
        let tokens = Lexer::new(source).tokenize();
        let regex = tokens.iter().find(|t| t.kind == TokenKind::RegexLiteral).unwrap();
        assert_eq!(regex.value, r"/^[/\]]+\d$/");
    }

    #[test]
    fn test_operators() {
        // Leading identifier so the slash lexes as division
        let source = "a / + - * % ** += -= === !== <= >= && || ?? ?. >>>= => ...";
        let tokens = Lexer::new(source).tokenize();
        let expected = [
            TokenKind::Slash,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Percent,
            TokenKind::StarStar,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::EqEqEq,
            TokenKind::BangEqEq,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::QuestionQuestion,
            TokenKind::QuestionDot,
            TokenKind::GtGtGtEq,
            TokenKind::FatArrow,
            TokenKind::DotDotDot,
        ];
        for (token, kind) in tokens[1..].iter().zip(expected) {
            assert_eq!(token.kind, kind, "{}", token.value);
        }
    }

    #[test]
    fn test_optional_chain_versus_conditional() {
        assert_eq!(
            kinds("a?.5:1"),
            [
                TokenKind::Identifier,
                TokenKind::Question,
                TokenKind::NumberLiteral,
                TokenKind::Colon,
                TokenKind::NumberLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_recorded() {
        let source = "#!/usr/bin/env node\n// Single line comment\nlet x = 5;\n/* Multi-line\n   comment */\nconst y = 10;";
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        let comments = lexer.take_comments();

        assert_eq!(tokens[0].kind, TokenKind::Let);
        assert_eq!(tokens[5].kind, TokenKind::Const);
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].kind, CommentKind::Hashbang);
        assert_eq!(comments[1].kind, CommentKind::Line);
        assert_eq!(&source[comments[1].span.start..comments[1].span.end], "// Single line comment");
        assert_eq!(comments[2].kind, CommentKind::Block);
    }

    #[test]
    fn test_newline_before() {
        let tokens = Lexer::new("a\nb /* x */ c /*\n*/ d").tokenize();

        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
        assert!(!tokens[2].newline_before);
        assert!(tokens[3].newline_before);
    }

    #[test]
    fn test_identifiers() {
        let source = "foo bar_123 _private $jquery #secret café";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens[0].value, "foo");
        assert_eq!(tokens[1].value, "bar_123");
        assert_eq!(tokens[2].value, "_private");
        assert_eq!(tokens[3].value, "$jquery");
        assert_eq!(tokens[4].kind, TokenKind::PrivateName);
        assert_eq!(tokens[4].value, "#secret");
        assert_eq!(tokens[5].kind, TokenKind::Identifier);
        assert_eq!(tokens[5].value, "café");
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = Lexer::new("a ∆ b").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].value, "Unexpected character: ∆");
    }
}
