//! Pre-token types produced by the preprocessor recognizers.
//!
//!     A pre-token wraps an ordered run of raw tokens (and nested pre-tokens)
//!     under a semantic tag. The preprocessor turns the flat lexer stream
//!     into a flat pre-token stream; the scope builder then folds the stream
//!     into a nesting tree using the depth-tagged block markers.
//!
//! Identifiers and Parameters
//!
//!     An identifier is a run of words with embedded parameter slots. A
//!     parameter comes in two flavors: the formal flavor wraps a nested
//!     identifier between parentheses and appears in declarations and
//!     assignment targets (`# greet (name)`), while the actual flavor wraps
//!     an expression between a pair of underscores and appears at call sites
//!     (`greet _the king_`). Both flavors are positional and unnamed for
//!     matching purposes.
//!
//! Rendering
//!
//!     Every pre-token can render itself back to canonical text. Parts on a
//!     line are joined by single spaces; link bodies are joined with no
//!     separator so URLs survive the trip.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::core::Token;
use super::formatting::{detokenize, detokenize_compact};

/// One part of an identifier pattern: a literal word or a parameter slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IdentifierPart {
    Word(Token),
    Parameter(PreParameter),
}

impl fmt::Display for IdentifierPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierPart::Word(token) => write!(f, "{}", token.literal),
            IdentifierPart::Parameter(parameter) => write!(f, "{}", parameter),
        }
    }
}

/// An identifier pattern: words with embedded parameter slots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreIdentifier {
    pub parts: Vec<IdentifierPart>,
}

impl PreIdentifier {
    pub fn new(parts: Vec<IdentifierPart>) -> Self {
        PreIdentifier { parts }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of parameter slots in the pattern.
    pub fn parameter_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, IdentifierPart::Parameter(_)))
            .count()
    }

    /// Rendered parameter bodies, in slot order.
    ///
    /// For a declaration these are the formal parameter names that become
    /// visible inside its body.
    pub fn parameter_names(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                IdentifierPart::Parameter(PreParameter::Formal(inner)) => Some(inner.to_string()),
                IdentifierPart::Parameter(PreParameter::Actual(inner)) => Some(inner.to_string()),
                IdentifierPart::Word(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for PreIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A parameter slot.
///
/// The flavor is remembered so canonical rendering re-emits the delimiter
/// that was in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreParameter {
    /// `( identifier )` in a declaration or assignment target.
    Formal(PreIdentifier),
    /// `_ expression _` at a call site.
    Actual(PreExpression),
}

impl fmt::Display for PreParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreParameter::Formal(inner) => write!(f, "({})", inner),
            PreParameter::Actual(inner) => write!(f, "_{}_", inner),
        }
    }
}

/// One item in an expression's flat run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprItem {
    Token(Token),
    Parameter(PreParameter),
    Import(PreImport),
}

impl ExprItem {
    /// The raw token kind, when the item is a plain token.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ExprItem::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, ExprItem::Token(t) if t.kind == super::core::TokenKind::Word)
    }
}

impl fmt::Display for ExprItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprItem::Token(token) => write!(f, "{}", token.literal),
            ExprItem::Parameter(parameter) => write!(f, "{}", parameter),
            ExprItem::Import(import) => write!(f, "{}", import),
        }
    }
}

/// A flat expression run.
///
/// Imports and actual-flavor parameters are recognized recursively and
/// nested; every other legal token stays flat. Structure (precedence,
/// grouping) is only imposed later by the parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreExpression {
    pub items: Vec<ExprItem>,
}

impl PreExpression {
    pub fn new(items: Vec<ExprItem>) -> Self {
        PreExpression { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for PreExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// An import link: `[description](link)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreImport {
    pub description: Vec<Token>,
    pub link: Vec<Token>,
}

impl fmt::Display for PreImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]({})",
            detokenize(&self.description),
            detokenize_compact(&self.link)
        )
    }
}

/// A declaration heading: depth markers plus the declared identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreDeclaration {
    pub depth: usize,
    pub name: PreIdentifier,
}

/// An assignment: target identifier and value expression, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreAssignment {
    pub target: PreIdentifier,
    pub value: PreExpression,
}

/// A statement wrapping a single expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreExpressionStatement {
    pub expression: PreExpression,
}

/// A depth-tagged block marker.
///
/// Carries no payload. The preprocessor emits one immediately after every
/// declaration; the scope builder consumes them to reconstruct the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreBlock {
    pub depth: usize,
}

/// A statement-level pre-token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PreStatement {
    Declaration(PreDeclaration),
    Assignment(PreAssignment),
    Expression(PreExpressionStatement),
    Block(PreBlock),
}

impl fmt::Display for PreStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreStatement::Declaration(decl) => {
                write!(f, "{} {}", "#".repeat(decl.depth), decl.name)
            }
            PreStatement::Assignment(assign) => write!(f, "{} = {}", assign.target, assign.value),
            PreStatement::Expression(stmt) => write!(f, "{}", stmt.expression),
            PreStatement::Block(block) => write!(f, "[{}]", block.depth),
        }
    }
}
