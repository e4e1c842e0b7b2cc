//! Assignment recognizer.
//!
//!     An assignment is an identifier, an un-nested equals sign, and a value
//!     expression running to the end of the line. An equals sign inside a
//!     bracket, parenthesis or underscore group does not make the line an
//!     assignment. The target identifier must end exactly at the equals
//!     sign, and the right-hand side must not be empty.

use crate::canto::errors::VerifyError;
use crate::canto::token::{PreAssignment, Token, TokenKind};

use super::expression::ExpressionRecognizer;
use super::identifier::IdentifierRecognizer;

pub struct AssignmentRecognizer;

/// Find a top-level equals sign on the current line.
fn find_unnested_equals(tokens: &[Token], at: usize) -> Option<usize> {
    let mut brackets = 0usize;
    let mut parens = 0usize;
    let mut in_underscores = false;

    let mut i = at;
    loop {
        let token = &tokens[i];
        if token.ends_line() {
            return None;
        }
        match token.kind {
            TokenKind::LBracket => brackets += 1,
            TokenKind::RBracket => brackets = brackets.saturating_sub(1),
            TokenKind::LParen => parens += 1,
            TokenKind::RParen => parens = parens.saturating_sub(1),
            TokenKind::Underscore => in_underscores = !in_underscores,
            TokenKind::Equals if brackets == 0 && parens == 0 && !in_underscores => {
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
}

impl AssignmentRecognizer {
    fn target_recognizer(&self) -> IdentifierRecognizer {
        IdentifierRecognizer::until(&[TokenKind::Equals])
    }

    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        find_unnested_equals(tokens, at).is_some()
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        let target = self.target_recognizer();
        target
            .verify(tokens, at)
            .map_err(|e| e.context("Assignment"))?;

        let end = target.walk(tokens, at).unwrap_or(at);
        if !tokens[end].is_kind(TokenKind::Equals) {
            return Err(VerifyError::new(
                "Assignment: identifier should end with an equals sign",
            ));
        }

        if tokens[end + 1].ends_line() {
            return Err(VerifyError::new("Assignment: cannot assign empty"));
        }

        ExpressionRecognizer::new()
            .verify(tokens, end + 1)
            .map_err(|e| e.context("Assignment"))
    }

    /// Materialize the assignment. Only valid after `verify` passed.
    ///
    /// The cursor is left on the line terminator.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreAssignment, usize) {
        let (target, equals) = self.target_recognizer().create(tokens, at);
        let (value, end) = ExpressionRecognizer::new().create(tokens, equals + 1);
        (PreAssignment { target, value }, end)
    }
}
