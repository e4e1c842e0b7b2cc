//! Expression recognizer.
//!
//!     An expression is a flat run over a fixed legal token set. Import
//!     links and actual-flavor parameters are recognized recursively and
//!     nested in the item list; everything else stays flat. No precedence or
//!     grouping is imposed here; that is the parser's job.

use crate::canto::errors::VerifyError;
use crate::canto::token::{ExprItem, PreExpression, Token, TokenKind};

use super::import::ImportRecognizer;
use super::parameter::ParameterRecognizer;

/// Kinds a flat expression run may contain.
const LEGAL: [TokenKind; 21] = [
    TokenKind::EqualsCompare,
    TokenKind::Word,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Slash,
    TokenKind::Asterisk,
    TokenKind::Colon,
    TokenKind::Bang,
    TokenKind::Underscore,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Gt,
    TokenKind::GtOrEquals,
    TokenKind::Lt,
    TokenKind::LtOrEquals,
    TokenKind::NotEquals,
    TokenKind::Number,
    TokenKind::Newline,
    TokenKind::Eof,
];

pub struct ExpressionRecognizer {
    stops: Vec<TokenKind>,
}

impl ExpressionRecognizer {
    /// Recognize up to the end of the line.
    pub fn new() -> Self {
        ExpressionRecognizer { stops: Vec::new() }
    }

    /// Recognize up to the first token of the given kinds (or line end).
    pub fn until(stops: &[TokenKind]) -> Self {
        ExpressionRecognizer {
            stops: stops.to_vec(),
        }
    }

    fn stops_at(&self, token: &Token) -> bool {
        token.ends_line() || token.is_kind_of(&self.stops)
    }

    pub fn check(&self, tokens: &[Token], at: usize) -> bool {
        tokens[at].is_kind_of(&LEGAL)
    }

    pub fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        self.walk(tokens, at).map(|_| ())
    }

    /// Walk the expression's extent, validating nested groups.
    ///
    /// Returns the index of the terminating token (not consumed).
    pub(crate) fn walk(&self, tokens: &[Token], at: usize) -> Result<usize, VerifyError> {
        let mut i = at;
        loop {
            let token = &tokens[i];
            if self.stops_at(token) {
                return Ok(i);
            }
            if token.is_kind(TokenKind::Underscore) {
                i = ParameterRecognizer::actual()
                    .walk(tokens, i)
                    .map_err(|e| e.context("Expression"))?;
                continue;
            }
            if token.is_kind(TokenKind::LBracket) && ImportRecognizer.check(tokens, i) {
                i = ImportRecognizer
                    .walk(tokens, i)
                    .map_err(|e| e.context("Expression"))?;
                continue;
            }
            if !token.is_kind_of(&LEGAL) {
                return Err(VerifyError::new(format!(
                    "Expression: illegal symbol: {}",
                    token.literal
                )));
            }
            i += 1;
        }
    }

    /// Materialize the expression. Only valid after `verify` passed.
    ///
    /// The cursor is left on the terminating token.
    pub fn create(&self, tokens: &[Token], at: usize) -> (PreExpression, usize) {
        let mut items = Vec::new();
        let mut i = at;
        while !self.stops_at(&tokens[i]) {
            if tokens[i].is_kind(TokenKind::Underscore) {
                let (parameter, next) = ParameterRecognizer::actual().create(tokens, i);
                items.push(ExprItem::Parameter(parameter));
                i = next;
                continue;
            }
            if tokens[i].is_kind(TokenKind::LBracket) && ImportRecognizer.check(tokens, i) {
                let (import, next) = ImportRecognizer.create(tokens, i);
                items.push(ExprItem::Import(import));
                i = next;
                continue;
            }
            items.push(ExprItem::Token(tokens[i].clone()));
            i += 1;
        }
        (PreExpression::new(items), i)
    }
}

impl Default for ExpressionRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
