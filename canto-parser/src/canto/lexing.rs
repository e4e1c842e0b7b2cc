//! Lexer
//!
//!     This module turns a complete source string into a flat, ordered token
//!     stream terminated by exactly one end-of-file sentinel. Raw scanning is
//!     done with a logos-derived enum; a thin conversion layer maps the raw
//!     matches onto the public `{ kind, literal }` token type and appends the
//!     sentinel. The stream is final: no token is ever revised after being
//!     pushed, and there is no backtracking.
//!
//! Scanning Rules
//!
//!     Runs of spaces are consumed silently; a newline emits its own token
//!     because statements are line-oriented. Two-character comparisons win
//!     over their one-character prefixes by longest match. Words are a
//!     maximal run of letters, digits, dots and dashes starting with a
//!     letter, preserved verbatim, so `times.md` and `x-times-y` stay whole.
//!     An underscore is always its own token; pairs of them delimit
//!     actual-parameter groups later on. Numbers are a maximal run of digits
//!     and dots.
//!
//! Failure Semantics
//!
//!     A number with more than one dot is a fatal lexical error that aborts
//!     the whole tokenize call. Any other unrecognized byte degrades to a
//!     single-character undefined token instead of failing, which keeps the
//!     lexer usable on half-written sources.

use log::debug;
use logos::Logos;

use super::errors::SyntaxError;
use super::token::{Token, TokenKind};

/// Raw scan failures, before conversion to public tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RawLexError {
    /// A byte no rule matches. Degrades to an undefined token.
    #[default]
    UnknownCharacter,
    /// A numeric literal with a second dot. Fatal.
    TooManyDots,
}

/// Raw token from logos, before conversion to `Token`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawLexError)]
#[logos(skip r" +")]
enum RawToken {
    #[token("\n")]
    Newline,

    #[token("#")]
    Hash,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,

    #[token("==")]
    EqualsCompare,
    #[token("=")]
    Equals,
    #[token("!=")]
    NotEquals,
    #[token("!")]
    Bang,
    #[token(">=")]
    GtOrEquals,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtOrEquals,
    #[token("<")]
    Lt,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token("_")]
    Underscore,

    #[regex(r"[A-Za-z][A-Za-z0-9.\-]*", |lex| lex.slice().to_string())]
    Word(String),

    #[regex(r"[0-9.]+", validate_number)]
    Number(String),
}

/// Numbers may contain at most one dot.
fn validate_number(lex: &mut logos::Lexer<RawToken>) -> Result<String, RawLexError> {
    let slice = lex.slice();
    if slice.matches('.').count() > 1 {
        return Err(RawLexError::TooManyDots);
    }
    Ok(slice.to_string())
}

impl RawToken {
    fn into_token(self) -> Token {
        match self {
            RawToken::Newline => Token::newline(),
            RawToken::Hash => Token::fixed(TokenKind::Hash),
            RawToken::Minus => Token::fixed(TokenKind::Minus),
            RawToken::Plus => Token::fixed(TokenKind::Plus),
            RawToken::Asterisk => Token::fixed(TokenKind::Asterisk),
            RawToken::Slash => Token::fixed(TokenKind::Slash),
            RawToken::EqualsCompare => Token::fixed(TokenKind::EqualsCompare),
            RawToken::Equals => Token::fixed(TokenKind::Equals),
            RawToken::NotEquals => Token::fixed(TokenKind::NotEquals),
            RawToken::Bang => Token::fixed(TokenKind::Bang),
            RawToken::GtOrEquals => Token::fixed(TokenKind::GtOrEquals),
            RawToken::Gt => Token::fixed(TokenKind::Gt),
            RawToken::LtOrEquals => Token::fixed(TokenKind::LtOrEquals),
            RawToken::Lt => Token::fixed(TokenKind::Lt),
            RawToken::LParen => Token::fixed(TokenKind::LParen),
            RawToken::RParen => Token::fixed(TokenKind::RParen),
            RawToken::LBracket => Token::fixed(TokenKind::LBracket),
            RawToken::RBracket => Token::fixed(TokenKind::RBracket),
            RawToken::Colon => Token::fixed(TokenKind::Colon),
            RawToken::Underscore => Token::fixed(TokenKind::Underscore),
            RawToken::Word(literal) => Token::word(literal),
            RawToken::Number(literal) => Token::number(literal),
        }
    }
}

/// Tokenize a complete source string.
///
/// The result always ends with exactly one end-of-file token; empty input
/// tokenizes to just that sentinel. The only failure is a numeric literal
/// with more than one dot.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(raw) => tokens.push(raw.into_token()),
            Err(RawLexError::TooManyDots) => {
                return Err(SyntaxError::new("number has more than one dot"));
            }
            Err(RawLexError::UnknownCharacter) => {
                tokens.push(Token::undefined(lexer.slice()));
            }
        }
    }

    tokens.push(Token::eof());
    debug!("lexer produced {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn literals(source: &str) -> Vec<String> {
        tokenize(source)
            .expect("tokenize failed")
            .into_iter()
            .map(|t| t.literal)
            .collect()
    }

    #[test]
    fn test_empty_source_is_one_eof() {
        let tokens = tokenize("").expect("tokenize failed");
        assert_eq!(tokens, vec![Token::eof()]);
    }

    #[test]
    fn test_single_word_declaration() {
        assert_eq!(
            kinds("# moi"),
            vec![TokenKind::Hash, TokenKind::Word, TokenKind::Eof]
        );
        assert_eq!(literals("# moi"), vec!["#", "moi", ""]);
    }

    #[test]
    fn test_multiple_declaration_marks() {
        assert_eq!(
            kinds("## moi"),
            vec![TokenKind::Hash, TokenKind::Hash, TokenKind::Word, TokenKind::Eof]
        );
    }

    #[test]
    fn test_underscore_delimited_arguments() {
        assert_eq!(
            literals("# from _foo_ to _bar and baz_"),
            vec!["#", "from", "_", "foo", "_", "to", "_", "bar", "and", "baz", "_", ""]
        );
        assert_eq!(
            kinds("from _1_"),
            vec![
                TokenKind::Word,
                TokenKind::Underscore,
                TokenKind::Number,
                TokenKind::Underscore,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_multiple_lines() {
        assert_eq!(
            kinds("# foo\nbar"),
            vec![TokenKind::Hash, TokenKind::Word, TokenKind::Newline, TokenKind::Word, TokenKind::Eof]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(literals("10 1.0 .234"), vec!["10", "1.0", ".234", ""]);
        assert_eq!(
            kinds("10 1.0 .234"),
            vec![TokenKind::Number, TokenKind::Number, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_linked_method() {
        assert_eq!(
            literals("[2 times 5](times.md#x-times-y)"),
            vec!["[", "2", "times", "5", "]", "(", "times.md", "#", "x-times-y", ")", ""]
        );
    }

    #[rstest]
    #[case("- + * / =", vec![TokenKind::Minus, TokenKind::Plus, TokenKind::Asterisk, TokenKind::Slash, TokenKind::Equals, TokenKind::Eof])]
    #[case("== != > < >= <=", vec![TokenKind::EqualsCompare, TokenKind::NotEquals, TokenKind::Gt, TokenKind::Lt, TokenKind::GtOrEquals, TokenKind::LtOrEquals, TokenKind::Eof])]
    #[case("!", vec![TokenKind::Bang, TokenKind::Eof])]
    #[case("foo: bar", vec![TokenKind::Word, TokenKind::Colon, TokenKind::Word, TokenKind::Eof])]
    fn test_operator_tokens(#[case] source: &str, #[case] expected: Vec<TokenKind>) {
        assert_eq!(kinds(source), expected);
    }

    #[test]
    fn test_too_many_dots_is_fatal() {
        let err = tokenize("1.0.0").expect_err("expected a syntax error");
        assert_eq!(err.message, "number has more than one dot");
    }

    #[test]
    fn test_unknown_bytes_degrade_to_undefined() {
        let tokens = tokenize("a % b").expect("tokenize failed");
        assert_eq!(
            tokens,
            vec![
                Token::word("a"),
                Token::undefined("%"),
                Token::word("b"),
                Token::eof()
            ]
        );
    }

    #[test]
    fn test_comparison_lookahead_priority() {
        assert_eq!(
            kinds("a >= 1"),
            vec![TokenKind::Word, TokenKind::GtOrEquals, TokenKind::Number, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a = = 1"),
            vec![TokenKind::Word, TokenKind::Equals, TokenKind::Equals, TokenKind::Number, TokenKind::Eof]
        );
    }
}
