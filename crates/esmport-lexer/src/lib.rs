pub mod token;
pub mod lexer;

// Re-export all public types from modules
pub use token::{keyword, is_reserved_word, Token, TokenKind};
pub use lexer::{template_substitutions, Lexer};
