use esmport_ast::Span;

/// Represents the different kinds of tokens in JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,

    // Literals
    NumberLiteral,
    BigIntLiteral,
    StringLiteral,
    TemplateLiteral,
    RegexLiteral,

    // Identifiers
    Identifier,
    PrivateName,       // #name

    // Operators
    Plus,              // +
    Minus,             // -
    Star,              // *
    Slash,             // /
    Percent,           // %
    StarStar,          // **
    Eq,                // =
    EqEq,              // ==
    EqEqEq,            // ===
    BangEq,            // !=
    BangEqEq,          // !==
    Lt,                // <
    Gt,                // >
    LtEq,              // <=
    GtEq,              // >=
    AmpAmp,            // &&
    PipePipe,          // ||
    Bang,              // !
    Amp,               // &
    Pipe,              // |
    Caret,             // ^
    Tilde,             // ~
    LtLt,              // <<
    GtGt,              // >>
    GtGtGt,            // >>>
    PlusEq,            // +=
    MinusEq,           // -=
    StarEq,            // *=
    SlashEq,           // /=
    PercentEq,         // %=
    StarStarEq,        // **=
    AmpAmpEq,          // &&=
    PipePipeEq,        // ||=
    QuestionQuestionEq,// ??=
    LtLtEq,            // <<=
    GtGtEq,            // >>=
    GtGtGtEq,          // >>>=
    AmpEq,             // &=
    PipeEq,            // |=
    CaretEq,           // ^=
    QuestionQuestion,  // ??
    QuestionDot,       // ?.
    PlusPlus,          // ++
    MinusMinus,        // --
    FatArrow,          // =>
    DotDotDot,         // ...

    // Delimiters
    LParen,            // (
    RParen,            // )
    LBrace,            // {
    RBrace,            // }
    LBracket,          // [
    RBracket,          // ]
    Semicolon,         // ;
    Comma,             // ,
    Dot,               // .
    Colon,             // :
    Question,          // ?
    At,                // @

    // Special
    Eof,
    Error,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Break
                | TokenKind::Case
                | TokenKind::Catch
                | TokenKind::Class
                | TokenKind::Const
                | TokenKind::Continue
                | TokenKind::Debugger
                | TokenKind::Default
                | TokenKind::Delete
                | TokenKind::Do
                | TokenKind::Else
                | TokenKind::Enum
                | TokenKind::Export
                | TokenKind::Extends
                | TokenKind::False
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::Function
                | TokenKind::If
                | TokenKind::Import
                | TokenKind::In
                | TokenKind::Instanceof
                | TokenKind::Let
                | TokenKind::New
                | TokenKind::Null
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::Switch
                | TokenKind::This
                | TokenKind::Throw
                | TokenKind::True
                | TokenKind::Try
                | TokenKind::Typeof
                | TokenKind::Var
                | TokenKind::Void
                | TokenKind::While
                | TokenKind::With
                | TokenKind::Yield
        )
    }

    /// Identifiers and keywords; anything usable as a property name after `.`
    pub fn is_word(self) -> bool {
        self == TokenKind::Identifier || self.is_keyword()
    }

    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::StarStarEq
                | TokenKind::AmpAmpEq
                | TokenKind::PipePipeEq
                | TokenKind::QuestionQuestionEq
                | TokenKind::LtLtEq
                | TokenKind::GtGtEq
                | TokenKind::GtGtGtEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
        )
    }

    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::StarStar
                | TokenKind::EqEq
                | TokenKind::EqEqEq
                | TokenKind::BangEq
                | TokenKind::BangEqEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
                | TokenKind::Amp
                | TokenKind::Pipe
                | TokenKind::Caret
                | TokenKind::LtLt
                | TokenKind::GtGt
                | TokenKind::GtGtGt
                | TokenKind::QuestionQuestion
                | TokenKind::In
                | TokenKind::Instanceof
        )
    }

    /// Tokens after which an expression may be complete.
    ///
    /// A `/` following one of these is division; after anything else it
    /// starts a regular expression.
    pub fn ends_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::PrivateName
                | TokenKind::NumberLiteral
                | TokenKind::BigIntLiteral
                | TokenKind::StringLiteral
                | TokenKind::TemplateLiteral
                | TokenKind::RegexLiteral
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::Null
                | TokenKind::True
                | TokenKind::False
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    /// Tokens that can continue an expression started on a previous line.
    pub fn continues_expression(self) -> bool {
        self.is_binary_op()
            || self.is_assign_op()
            || matches!(
                self,
                TokenKind::Dot
                    | TokenKind::QuestionDot
                    | TokenKind::LParen
                    | TokenKind::LBracket
                    | TokenKind::Comma
                    | TokenKind::Question
                    | TokenKind::Colon
                    | TokenKind::FatArrow
                    | TokenKind::TemplateLiteral
            )
    }
}

/// Maps a reserved word to its keyword kind.
pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "let" => TokenKind::Let,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "yield" => TokenKind::Yield,
        _ => return None,
    };
    Some(kind)
}

/// Words that cannot name a binding in module code.
pub fn is_reserved_word(word: &str) -> bool {
    keyword(word).is_some()
        || matches!(
            word,
            "await" | "implements" | "interface" | "package" | "private" | "protected" | "public" | "static"
        )
}

/// Represents a token with its kind, span, and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Identifier name, cooked string contents, raw text for everything else
    pub value: String,
    /// A line terminator separates this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, span: Span, value: String) -> Self {
        Self {
            kind,
            span,
            value,
            newline_before: false,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for an identifier token spelled `name` (contextual keywords included).
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.value == name
    }
}
