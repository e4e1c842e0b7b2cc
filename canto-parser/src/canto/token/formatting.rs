//! Canonical text rendering for token slices.
//!
//!     The pipeline's canonical output joins tokens with single spaces. The
//!     exceptions are newlines, which never carry surrounding spaces, and the
//!     end-of-file sentinel, which renders as nothing.

use super::core::{Token, TokenKind};

/// Render a token slice back to canonical text.
///
/// Tokens on one line are separated by single spaces. A newline token ends
/// the line without a trailing space, and the following line starts without
/// a leading one.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line_started = false;
    for token in tokens {
        match token.kind {
            TokenKind::Eof => {}
            TokenKind::Newline => {
                out.push('\n');
                line_started = false;
            }
            _ => {
                if line_started {
                    out.push(' ');
                }
                out.push_str(&token.literal);
                line_started = true;
            }
        }
    }
    out
}

/// Render a token slice with no separators at all.
///
/// Used for link bodies, where `times.md#x-times-y` must come back out
/// exactly as it went in.
pub fn detokenize_compact(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Eof | TokenKind::Newline))
        .map(|t| t.literal.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detokenize_single_line() {
        let tokens = vec![
            Token::word("five"),
            Token::fixed(TokenKind::Plus),
            Token::number("5"),
        ];
        assert_eq!(detokenize(&tokens), "five + 5");
    }

    #[test]
    fn test_detokenize_newline_spacing() {
        let tokens = vec![
            Token::word("a"),
            Token::newline(),
            Token::word("b"),
            Token::eof(),
        ];
        assert_eq!(detokenize(&tokens), "a\nb");
    }

    #[test]
    fn test_detokenize_compact_link() {
        let tokens = vec![
            Token::word("times.md"),
            Token::fixed(TokenKind::Hash),
            Token::word("x-times-y"),
        ];
        assert_eq!(detokenize_compact(&tokens), "times.md#x-times-y");
    }
}
