//! The raw token type and its kind enum.
//!
//!     A token is a `{ kind, literal }` pair. The kind is a closed enum; the
//!     literal preserves the exact source text for words, numbers and
//!     undefined characters, and carries the canonical spelling for fixed
//!     punctuation. Tokens are immutable once created.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of token kinds.
///
/// Punctuation and operators carry a fixed literal; `Word`, `Number` and
/// `Undefined` preserve the source text verbatim. `Newline` and `Eof` are
/// the two line/stream sentinels every multi-token scan terminates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Undefined,

    Minus,
    Plus,
    Asterisk,
    Slash,
    Equals,

    Word,
    Number,

    Hash,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Bang,
    Underscore,

    EqualsCompare,
    NotEquals,
    Gt,
    Lt,
    GtOrEquals,
    LtOrEquals,

    Newline,
    Eof,
}

/// The terminator set that ends any single-line scan.
pub const LINE_END: [TokenKind; 2] = [TokenKind::Newline, TokenKind::Eof];

impl TokenKind {
    /// The fixed literal for this kind, if it has one.
    pub fn fixed_literal(&self) -> Option<&'static str> {
        match self {
            TokenKind::Minus => Some("-"),
            TokenKind::Plus => Some("+"),
            TokenKind::Asterisk => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Equals => Some("="),
            TokenKind::Hash => Some("#"),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::LBracket => Some("["),
            TokenKind::RBracket => Some("]"),
            TokenKind::Colon => Some(":"),
            TokenKind::Bang => Some("!"),
            TokenKind::Underscore => Some("_"),
            TokenKind::EqualsCompare => Some("=="),
            TokenKind::NotEquals => Some("!="),
            TokenKind::Gt => Some(">"),
            TokenKind::Lt => Some("<"),
            TokenKind::GtOrEquals => Some(">="),
            TokenKind::LtOrEquals => Some("<="),
            TokenKind::Newline => Some("\n"),
            TokenKind::Eof => Some(""),
            TokenKind::Undefined | TokenKind::Word | TokenKind::Number => None,
        }
    }

    /// Display name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Undefined => "undefined",
            TokenKind::Word => "word",
            TokenKind::Number => "number",
            TokenKind::Newline => "ENDL",
            TokenKind::Eof => "EOF",
            other => other
                .fixed_literal()
                .unwrap_or("undefined"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A raw lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    /// A token for a kind with a fixed literal.
    pub fn fixed(kind: TokenKind) -> Self {
        let literal = kind
            .fixed_literal()
            .unwrap_or_default();
        Token::new(kind, literal)
    }

    pub fn word(literal: impl Into<String>) -> Self {
        Token::new(TokenKind::Word, literal)
    }

    pub fn number(literal: impl Into<String>) -> Self {
        Token::new(TokenKind::Number, literal)
    }

    pub fn undefined(literal: impl Into<String>) -> Self {
        Token::new(TokenKind::Undefined, literal)
    }

    pub fn newline() -> Self {
        Token::fixed(TokenKind::Newline)
    }

    pub fn eof() -> Self {
        Token::fixed(TokenKind::Eof)
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Membership test against a set of kinds.
    pub fn is_kind_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// True for the kinds that end a line scan.
    pub fn ends_line(&self) -> bool {
        self.is_kind_of(&LINE_END)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}
