//! Parameter recognizer, in its two flavors.
//!
//!     The formal flavor wraps a nested identifier between parentheses and
//!     belongs to declarations and assignment targets. The actual flavor
//!     wraps an expression between a pair of underscores and belongs to call
//!     sites. A parameter must open and close on one line, and its body must
//!     not be empty.

use crate::canto::errors::VerifyError;
use crate::canto::token::{PreParameter, Token, TokenKind};

use super::cursor::find_ahead;
use super::expression::ExpressionRecognizer;
use super::identifier::IdentifierRecognizer;

#[derive(Clone, Copy, PartialEq)]
enum Flavor {
    Formal,
    Actual,
}

pub struct ParameterRecognizer {
    flavor: Flavor,
}

impl ParameterRecognizer {
    /// `( identifier )`, the declaration-side flavor.
    pub fn formal() -> Self {
        ParameterRecognizer {
            flavor: Flavor::Formal,
        }
    }

    /// `_ expression _`, the call-site flavor.
    pub fn actual() -> Self {
        ParameterRecognizer {
            flavor: Flavor::Actual,
        }
    }

    fn open(&self) -> TokenKind {
        match self.flavor {
            Flavor::Formal => TokenKind::LParen,
            Flavor::Actual => TokenKind::Underscore,
        }
    }

    fn close(&self) -> TokenKind {
        match self.flavor {
            Flavor::Formal => TokenKind::RParen,
            Flavor::Actual => TokenKind::Underscore,
        }
    }

    fn missing_close_message(&self) -> &'static str {
        match self.flavor {
            Flavor::Formal => "Parameter: missing closing parenthesis",
            Flavor::Actual => "Parameter: missing closing underscore",
        }
    }

    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        tokens[at].is_kind(self.open())
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        self.walk(tokens, at).map(|_| ())
    }

    /// Walk the parameter's extent, validating the body.
    ///
    /// Returns the index just past the closing delimiter.
    pub(crate) fn walk(&self, tokens: &[Token], at: usize) -> Result<usize, VerifyError> {
        if !self.check(tokens, at) {
            return Err(VerifyError::new(
                "Parameter: should start with an opening delimiter",
            ));
        }

        let close = find_ahead(tokens, at + 1, &[self.close()])
            .ok_or_else(|| VerifyError::new(self.missing_close_message()))?;
        if close == at + 1 {
            return Err(VerifyError::new("Parameter: should not be empty"));
        }

        match self.flavor {
            Flavor::Formal => IdentifierRecognizer::until(&[TokenKind::RParen])
                .verify(tokens, at + 1)
                .map_err(|e| e.context("Parameter"))?,
            Flavor::Actual => ExpressionRecognizer::until(&[TokenKind::Underscore])
                .verify(tokens, at + 1)
                .map_err(|e| e.context("Parameter"))?,
        }

        Ok(close + 1)
    }

    /// Materialize the parameter. Only valid after `verify` passed.
    ///
    /// The cursor is left just past the closing delimiter.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreParameter, usize) {
        match self.flavor {
            Flavor::Formal => {
                let (inner, end) =
                    IdentifierRecognizer::until(&[TokenKind::RParen]).create(tokens, at + 1);
                (PreParameter::Formal(inner), end + 1)
            }
            Flavor::Actual => {
                let (inner, end) =
                    ExpressionRecognizer::until(&[TokenKind::Underscore]).create(tokens, at + 1);
                (PreParameter::Actual(inner), end + 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;

    #[test]
    fn test_formal_parameter() {
        let tokens = tokenize("(foo bar)").expect("tokenize failed");
        let recognizer = ParameterRecognizer::formal();
        assert!(recognizer.check(&tokens, 0));
        recognizer.verify(&tokens, 0).expect("verify failed");
        let (parameter, end) = recognizer.create(&tokens, 0);
        assert_eq!(parameter.to_string(), "(foo bar)");
        assert_eq!(tokens[end].kind, TokenKind::Eof);
    }

    #[test]
    fn test_actual_parameter_with_expression_body() {
        let tokens = tokenize("_3 + foo_").expect("tokenize failed");
        let recognizer = ParameterRecognizer::actual();
        recognizer.verify(&tokens, 0).expect("verify failed");
        let (parameter, _) = recognizer.create(&tokens, 0);
        assert_eq!(parameter.to_string(), "_3 + foo_");
    }

    #[test]
    fn test_unterminated_parameter() {
        let tokens = tokenize("(foo").expect("tokenize failed");
        let err = ParameterRecognizer::formal()
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Parameter: missing closing parenthesis");
    }

    #[test]
    fn test_unterminated_across_lines() {
        let tokens = tokenize("(foo\n)").expect("tokenize failed");
        let err = ParameterRecognizer::formal()
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Parameter: missing closing parenthesis");
    }

    #[test]
    fn test_empty_parameter() {
        let tokens = tokenize("()").expect("tokenize failed");
        let err = ParameterRecognizer::formal()
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Parameter: should not be empty");
    }

    #[test]
    fn test_illegal_body_is_wrapped_with_context() {
        let tokens = tokenize("(3)").expect("tokenize failed");
        let err = ParameterRecognizer::formal()
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Parameter: Identifier: illegal token: 3");
    }
}
