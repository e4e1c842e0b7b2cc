//! Import link recognizer: `[description](link)`.
//!
//!     Both halves are kept. The description is prose shown to readers; the
//!     link body is an address and renders back without separators.

use crate::canto::errors::VerifyError;
use crate::canto::token::{PreImport, Token, TokenKind};

use super::cursor::find_ahead;

pub struct ImportRecognizer;

impl ImportRecognizer {
    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        if !tokens[at].is_kind(TokenKind::LBracket) {
            return false;
        }
        match find_ahead(tokens, at + 1, &[TokenKind::RBracket]) {
            Some(close) => tokens[close + 1].is_kind(TokenKind::LParen),
            None => false,
        }
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        self.walk(tokens, at).map(|_| ())
    }

    /// Walk the import's extent.
    ///
    /// Returns the index just past the closing brace.
    pub(crate) fn walk(&self, tokens: &[Token], at: usize) -> Result<usize, VerifyError> {
        if !tokens[at].is_kind(TokenKind::LBracket) {
            return Err(VerifyError::new("Import: should start with ["));
        }

        let bracket_close = find_ahead(tokens, at + 1, &[TokenKind::RBracket])
            .ok_or_else(|| VerifyError::new("Import: closing bracket is missing."))?;

        let open = &tokens[bracket_close + 1];
        if !open.is_kind(TokenKind::LParen) {
            return Err(VerifyError::new(format!(
                "Import: unexpected token after brackets: {}",
                open.literal
            )));
        }

        let brace_close = find_ahead(tokens, bracket_close + 2, &[TokenKind::RParen])
            .ok_or_else(|| VerifyError::new("Import: closing brace is missing."))?;
        if brace_close == bracket_close + 2 {
            return Err(VerifyError::new("Import: link should not be empty"));
        }

        Ok(brace_close + 1)
    }

    /// Materialize the import. Only valid after `verify` passed.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreImport, usize) {
        let bracket_close =
            find_ahead(tokens, at + 1, &[TokenKind::RBracket]).unwrap_or(at + 1);
        let brace_close =
            find_ahead(tokens, bracket_close + 2, &[TokenKind::RParen]).unwrap_or(bracket_close + 2);

        let import = PreImport {
            description: tokens[at + 1..bracket_close].to_vec(),
            link: tokens[bracket_close + 2..brace_close].to_vec(),
        };
        (import, brace_close + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;

    #[test]
    fn test_link_with_description() {
        let tokens = tokenize("[2 times 5](times.md#x-times-y)").expect("tokenize failed");
        let recognizer = ImportRecognizer;
        assert!(recognizer.check(&tokens, 0));
        recognizer.verify(&tokens, 0).expect("verify failed");
        let (import, end) = recognizer.create(&tokens, 0);
        assert_eq!(import.to_string(), "[2 times 5](times.md#x-times-y)");
        assert_eq!(tokens[end].kind, TokenKind::Eof);
    }

    #[test]
    fn test_missing_closing_bracket() {
        let tokens = tokenize("[description").expect("tokenize failed");
        let err = ImportRecognizer
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Import: closing bracket is missing.");
    }

    #[test]
    fn test_unexpected_token_after_brackets() {
        let tokens = tokenize("[description] extra").expect("tokenize failed");
        let err = ImportRecognizer
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Import: unexpected token after brackets: extra");
    }

    #[test]
    fn test_empty_link() {
        let tokens = tokenize("[description]()").expect("tokenize failed");
        let err = ImportRecognizer
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Import: link should not be empty");
    }

    #[test]
    fn test_missing_closing_brace() {
        let tokens = tokenize("[description](link").expect("tokenize failed");
        let err = ImportRecognizer
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Import: closing brace is missing.");
    }
}
