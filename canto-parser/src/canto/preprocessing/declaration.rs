//! Declaration recognizer.
//!
//!     A declaration heading is one or more `#` markers followed by a
//!     well-formed identifier running to the end of the line. The marker
//!     count is the declaration's nesting depth.

use crate::canto::errors::VerifyError;
use crate::canto::token::{PreDeclaration, Token, TokenKind};

use super::cursor::count_while;
use super::identifier::IdentifierRecognizer;

pub struct DefinitionRecognizer;

impl DefinitionRecognizer {
    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        tokens[at].is_kind(TokenKind::Hash)
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        let depth = count_while(tokens, at, &[TokenKind::Hash]);
        if depth == 0 {
            return Err(VerifyError::new("Definition: must start with #"));
        }
        IdentifierRecognizer::new()
            .verify(tokens, at + depth)
            .map_err(|e| e.context("Definition"))
    }

    /// Materialize the declaration. Only valid after `verify` passed.
    ///
    /// The cursor is left on the line terminator.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreDeclaration, usize) {
        let depth = count_while(tokens, at, &[TokenKind::Hash]);
        let (name, end) = IdentifierRecognizer::new().create(tokens, at + depth);
        (PreDeclaration { depth, name }, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;

    #[test]
    fn test_single_depth_declaration() {
        let tokens = tokenize("# test").expect("tokenize failed");
        let recognizer = DefinitionRecognizer;
        assert!(recognizer.check(&tokens, 0));
        recognizer.verify(&tokens, 0).expect("verify failed");
        let (declaration, _) = recognizer.create(&tokens, 0);
        assert_eq!(declaration.depth, 1);
        assert_eq!(declaration.name.to_string(), "test");
    }

    #[test]
    fn test_marker_count_is_depth() {
        let tokens = tokenize("#### tester").expect("tokenize failed");
        let (declaration, _) = DefinitionRecognizer.create(&tokens, 0);
        assert_eq!(declaration.depth, 4);
        assert_eq!(declaration.name.to_string(), "tester");
    }

    #[test]
    fn test_declaration_with_parameters() {
        let tokens = tokenize("# (foo) test (bar) test (doodle doo)").expect("tokenize failed");
        DefinitionRecognizer.verify(&tokens, 0).expect("verify failed");
        let (declaration, _) = DefinitionRecognizer.create(&tokens, 0);
        assert_eq!(declaration.name.parameter_count(), 3);
        assert_eq!(
            declaration.name.to_string(),
            "(foo) test (bar) test (doodle doo)"
        );
    }

    #[test]
    fn test_empty_declaration_name() {
        let tokens = tokenize("##").expect("tokenize failed");
        let err = DefinitionRecognizer
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Definition: Identifier: should not be blank");
    }
}
