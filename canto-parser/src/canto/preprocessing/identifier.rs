//! Identifier recognizer.
//!
//!     An identifier is a run of word tokens and embedded parameter groups,
//!     stopping at a caller-supplied terminator set. Declarations read to the
//!     end of the line, assignment targets stop at the equals sign, and
//!     parameter bodies stop at their closing delimiter. Operators, numbers
//!     and other structure are illegal in a plain identifier; they are only
//!     legal inside embedded parameters.

use crate::canto::errors::VerifyError;
use crate::canto::token::{IdentifierPart, PreIdentifier, Token, TokenKind};

use super::parameter::ParameterRecognizer;

pub struct IdentifierRecognizer {
    stops: Vec<TokenKind>,
}

impl IdentifierRecognizer {
    /// Recognize up to the end of the line.
    pub fn new() -> Self {
        IdentifierRecognizer { stops: Vec::new() }
    }

    /// Recognize up to the first token of the given kinds (or line end).
    pub fn until(stops: &[TokenKind]) -> Self {
        IdentifierRecognizer {
            stops: stops.to_vec(),
        }
    }

    fn stops_at(&self, token: &Token) -> bool {
        token.ends_line() || token.is_kind_of(&self.stops)
    }

    /// Cheap applicability test: there is something before the terminator.
    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        !self.stops_at(&tokens[at])
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        if !self.check(tokens, at) {
            return Err(VerifyError::new("Identifier: should not be blank"));
        }
        self.walk(tokens, at).map(|_| ())
    }

    /// Walk the identifier's extent, validating as we go.
    ///
    /// Returns the index of the terminating token (not consumed).
    pub(crate) fn walk(&self, tokens: &[Token], at: usize) -> Result<usize, VerifyError> {
        let mut i = at;
        loop {
            let token = &tokens[i];
            if self.stops_at(token) {
                return Ok(i);
            }
            match token.kind {
                TokenKind::Word => i += 1,
                TokenKind::LParen => i = ParameterRecognizer::formal().walk(tokens, i)?,
                TokenKind::Underscore => i = ParameterRecognizer::actual().walk(tokens, i)?,
                _ => {
                    return Err(VerifyError::new(format!(
                        "Identifier: illegal token: {}",
                        token.literal
                    )))
                }
            }
        }
    }

    /// Materialize the identifier. Only valid after `verify` passed.
    ///
    /// The cursor is left on the terminating token.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreIdentifier, usize) {
        let mut parts = Vec::new();
        let mut i = at;
        while !self.stops_at(&tokens[i]) {
            match tokens[i].kind {
                TokenKind::Word => {
                    parts.push(IdentifierPart::Word(tokens[i].clone()));
                    i += 1;
                }
                TokenKind::LParen => {
                    let (parameter, next) = ParameterRecognizer::formal().create(tokens, i);
                    parts.push(IdentifierPart::Parameter(parameter));
                    i = next;
                }
                TokenKind::Underscore => {
                    let (parameter, next) = ParameterRecognizer::actual().create(tokens, i);
                    parts.push(IdentifierPart::Parameter(parameter));
                    i = next;
                }
                // Unverified input; skip rather than loop forever.
                _ => i += 1,
            }
        }
        (PreIdentifier::new(parts), i)
    }
}

impl Default for IdentifierRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;

    fn recognize(source: &str) -> PreIdentifier {
        let tokens = tokenize(source).expect("tokenize failed");
        let recognizer = IdentifierRecognizer::new();
        recognizer.verify(&tokens, 0).expect("verify failed");
        recognizer.create(&tokens, 0).0
    }

    #[test]
    fn test_plain_words() {
        let ident = recognize("too test");
        assert_eq!(ident.to_string(), "too test");
        assert_eq!(ident.parameter_count(), 0);
    }

    #[test]
    fn test_formal_parameters() {
        let ident = recognize("test (foo) and (bar baz)");
        assert_eq!(ident.to_string(), "test (foo) and (bar baz)");
        assert_eq!(ident.parameter_count(), 2);
        assert_eq!(ident.parameter_names(), vec!["foo", "bar baz"]);
    }

    #[test]
    fn test_actual_parameters() {
        let ident = recognize("from _1_ to _3 + foo_");
        assert_eq!(ident.to_string(), "from _1_ to _3 + foo_");
        assert_eq!(ident.parameter_count(), 2);
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let tokens = tokenize("").expect("tokenize failed");
        let err = IdentifierRecognizer::new()
            .verify(&tokens, 0)
            .expect_err("expected a verify error");
        assert_eq!(err.message, "Identifier: should not be blank");
    }

    #[test]
    fn test_illegal_tokens_are_rejected() {
        for (source, illegal) in [("foo + bar", "+"), ("foo 3", "3"), ("foo # bar", "#")] {
            let tokens = tokenize(source).expect("tokenize failed");
            let err = IdentifierRecognizer::new()
                .verify(&tokens, 0)
                .expect_err("expected a verify error");
            assert_eq!(
                err.message,
                format!("Identifier: illegal token: {}", illegal)
            );
        }
    }

    #[test]
    fn test_stops_at_caller_terminator() {
        let tokens = tokenize("target = value").expect("tokenize failed");
        let recognizer = IdentifierRecognizer::until(&[TokenKind::Equals]);
        recognizer.verify(&tokens, 0).expect("verify failed");
        let (ident, end) = recognizer.create(&tokens, 0);
        assert_eq!(ident.to_string(), "target");
        assert_eq!(tokens[end].kind, TokenKind::Equals);
    }
}
