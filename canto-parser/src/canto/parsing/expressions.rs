//! Expression construction.
//!
//!     Classic precedence climbing over the flat item run of a
//!     pre-expression. The operator table is fixed: equality binds loosest,
//!     then relational, additive, multiplicative, and unary prefix binds
//!     tightest. Equal precedence binds left-to-right; the climb only
//!     recurses while the peeked operator binds strictly tighter.
//!
//!     Prefix positions accept a number literal, a minus or bang, a
//!     parenthesized sub-expression, an import link, and a word that
//!     resolves as a call or as a local parameter name.

use crate::canto::ast::{
    AstCall, AstExpression, AstIdentifier, AstInfix, AstLink, AstNumber, AstPrefix,
};
use crate::canto::errors::ParseError;
use crate::canto::token::{ExprItem, Token, TokenKind};

use super::calls::resolve;
use super::ParseContext;

/// Operator binding strength, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Prefix,
}

/// Kinds that may appear in infix position.
pub(crate) const INFIX_KINDS: [TokenKind; 10] = [
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Asterisk,
    TokenKind::Slash,
    TokenKind::EqualsCompare,
    TokenKind::NotEquals,
    TokenKind::Gt,
    TokenKind::Lt,
    TokenKind::GtOrEquals,
    TokenKind::LtOrEquals,
];

pub(crate) fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::EqualsCompare | TokenKind::NotEquals => Precedence::Equality,
        TokenKind::Gt | TokenKind::Lt | TokenKind::GtOrEquals | TokenKind::LtOrEquals => {
            Precedence::Relational
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Multiplicative,
        _ => Precedence::Lowest,
    }
}

/// One expression parse over a pre-expression's items.
pub(crate) struct ExpressionParser<'a> {
    items: &'a [ExprItem],
    at: usize,
    context: &'a ParseContext<'a>,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(items: &'a [ExprItem], context: &'a ParseContext<'a>) -> Self {
        ExpressionParser {
            items,
            at: 0,
            context,
        }
    }

    pub fn parse(mut self) -> Result<AstExpression, ParseError> {
        let expression = self.parse_expression(Precedence::Lowest)?;
        if let Some(item) = self.items.get(self.at) {
            return Err(ParseError::new(format!(
                "Expression: unexpected trailing item: {}",
                item
            )));
        }
        Ok(expression)
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<AstExpression, ParseError> {
        let mut left = self.parse_prefix()?;
        while let Some(kind) = self.peek_infix() {
            if precedence >= precedence_of(kind) {
                break;
            }
            left = self.parse_infix(left)?;
        }
        Ok(left)
    }

    fn peek_infix(&self) -> Option<TokenKind> {
        match self.items.get(self.at) {
            Some(ExprItem::Token(token)) if token.is_kind_of(&INFIX_KINDS) => Some(token.kind),
            _ => None,
        }
    }

    fn parse_prefix(&mut self) -> Result<AstExpression, ParseError> {
        let item = self
            .items
            .get(self.at)
            .ok_or_else(|| ParseError::new("Expression: expected an expression"))?;

        match item {
            ExprItem::Import(import) => {
                self.at += 1;
                Ok(AstExpression::Link(AstLink {
                    import: import.clone(),
                }))
            }
            ExprItem::Parameter(parameter) => Err(ParseError::new(format!(
                "Expression: no prefix processor found for parameter group {}",
                parameter
            ))),
            ExprItem::Token(token) => {
                let token = token.clone();
                match token.kind {
                    TokenKind::Number => {
                        self.at += 1;
                        number_literal(&token)
                    }
                    TokenKind::Minus | TokenKind::Bang => {
                        self.at += 1;
                        let right = self.parse_expression(Precedence::Prefix)?;
                        Ok(AstExpression::Prefix(Box::new(AstPrefix {
                            operator: token,
                            right,
                        })))
                    }
                    TokenKind::LParen => {
                        self.at += 1;
                        let inner = self.parse_expression(Precedence::Lowest)?;
                        match self.items.get(self.at) {
                            Some(ExprItem::Token(t)) if t.kind == TokenKind::RParen => {
                                self.at += 1;
                                Ok(inner)
                            }
                            _ => Err(ParseError::new(
                                "Expression: expected a closing parenthesis",
                            )),
                        }
                    }
                    TokenKind::Word => self.parse_word(&token),
                    other => Err(ParseError::new(format!(
                        "Expression: no prefix processor found for type: {}",
                        other.name()
                    ))),
                }
            }
        }
    }

    fn parse_word(&mut self, token: &Token) -> Result<AstExpression, ParseError> {
        let context = self.context;
        if let Some(found) = resolve(
            context.tree,
            context.scope,
            context.phrases,
            self.items,
            self.at,
        ) {
            let site = self.items[self.at..self.at + found.consumed].to_vec();
            self.at += found.consumed;
            return Ok(AstExpression::Call(AstCall {
                site,
                target: found.target,
                argument_count: found.arguments.len(),
            }));
        }

        if context.locals.iter().any(|name| name == &token.literal) {
            self.at += 1;
            return Ok(AstExpression::Identifier(AstIdentifier {
                token: token.clone(),
            }));
        }

        Err(ParseError::new(format!(
            "Expression: unknown identifier: {}",
            token.literal
        )))
    }

    fn parse_infix(&mut self, left: AstExpression) -> Result<AstExpression, ParseError> {
        let operator = match self.items.get(self.at) {
            Some(ExprItem::Token(token)) => token.clone(),
            _ => return Err(ParseError::new("Expression: expected an infix operator")),
        };
        let precedence = precedence_of(operator.kind);
        self.at += 1;
        let right = self.parse_expression(precedence)?;
        Ok(AstExpression::Infix(Box::new(AstInfix {
            left,
            operator,
            right,
        })))
    }
}

fn number_literal(token: &Token) -> Result<AstExpression, ParseError> {
    let value: f64 = token.literal.parse().map_err(|_| {
        ParseError::new(format!(
            "Expression: invalid number literal: {}",
            token.literal
        ))
    })?;
    Ok(AstExpression::Number(AstNumber {
        token: token.clone(),
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table_order() {
        assert!(Precedence::Lowest < Precedence::Equality);
        assert!(Precedence::Equality < Precedence::Relational);
        assert!(Precedence::Relational < Precedence::Additive);
        assert!(Precedence::Additive < Precedence::Multiplicative);
        assert!(Precedence::Multiplicative < Precedence::Prefix);
    }

    #[test]
    fn test_precedence_of_kinds() {
        assert_eq!(precedence_of(TokenKind::EqualsCompare), Precedence::Equality);
        assert_eq!(precedence_of(TokenKind::GtOrEquals), Precedence::Relational);
        assert_eq!(precedence_of(TokenKind::Minus), Precedence::Additive);
        assert_eq!(precedence_of(TokenKind::Slash), Precedence::Multiplicative);
        assert_eq!(precedence_of(TokenKind::Word), Precedence::Lowest);
    }

    #[test]
    fn test_number_literal_conversion() {
        let parsed = number_literal(&Token::number("3.5")).expect("parse failed");
        match parsed {
            AstExpression::Number(number) => assert_eq!(number.value, 3.5),
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number_literal() {
        let err = number_literal(&Token::number(".")).expect_err("expected a parse error");
        assert_eq!(err.message, "Expression: invalid number literal: .");
    }
}
