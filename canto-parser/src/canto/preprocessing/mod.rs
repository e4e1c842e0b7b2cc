//! Preprocessor
//!
//!     This module restructures the flat token stream into semantically
//!     typed pre-tokens. A set of small recognizers each owns one syntactic
//!     shape. Every recognizer follows the same discipline:
//!
//!         check   cheap applicability test, no side effects
//!         verify  full validation without mutation, returns an error value
//!         create  materialize the node, advancing the cursor past it
//!
//!     `create` is only called after `verify` returned no error. This lets
//!     the orchestrating loop try several candidate recognizers at one
//!     cursor position without committing, and it keeps all user-surfaced
//!     errors as plain values.
//!
//! Statement Preparation
//!
//!     Statement-level recognizers are tried in order: declaration,
//!     assignment, expression statement. The prepared stream starts with a
//!     root block marker, and every declaration is followed immediately by a
//!     depth-tagged block marker that opens its body. The scope builder
//!     consumes these markers to reconstruct the nesting tree.
//!
//!     The first verification failure aborts the pass. There is no recovery
//!     and no partial stream.

pub mod assignment;
pub mod cursor;
pub mod declaration;
pub mod expression;
pub mod identifier;
pub mod import;
pub mod parameter;

use log::debug;

use super::errors::VerifyError;
use super::scoping::{gather_identifiers, ScopeBuilder, ScopeTree};
use super::token::{PreBlock, PreStatement, Token, TokenKind};

pub use assignment::AssignmentRecognizer;
pub use declaration::DefinitionRecognizer;
pub use expression::ExpressionRecognizer;
pub use identifier::IdentifierRecognizer;
pub use import::ImportRecognizer;
pub use parameter::ParameterRecognizer;

/// The statement-level recognizer contract.
pub trait StatementRecognizer {
    fn check(&self, tokens: &[Token], at: usize) -> bool;
    fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError>;
    fn create(&self, tokens: &[Token], at: usize) -> (PreStatement, usize);
}

impl StatementRecognizer for DefinitionRecognizer {
    fn check(&self, tokens: &[Token], at: usize) -> bool {
        DefinitionRecognizer::check(self, tokens, at)
    }

    fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        DefinitionRecognizer::verify(self, tokens, at)
    }

    fn create(&self, tokens: &[Token], at: usize) -> (PreStatement, usize) {
        let (declaration, end) = DefinitionRecognizer::create(self, tokens, at);
        (PreStatement::Declaration(declaration), end)
    }
}

impl StatementRecognizer for AssignmentRecognizer {
    fn check(&self, tokens: &[Token], at: usize) -> bool {
        AssignmentRecognizer::check(self, tokens, at)
    }

    fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        AssignmentRecognizer::verify(self, tokens, at)
    }

    fn create(&self, tokens: &[Token], at: usize) -> (PreStatement, usize) {
        let (assignment, end) = AssignmentRecognizer::create(self, tokens, at);
        (PreStatement::Assignment(assignment), end)
    }
}

/// Expression statement: a bare expression on its own line.
pub struct ExpressionStatementRecognizer;

impl StatementRecognizer for ExpressionStatementRecognizer {
    fn check(&self, tokens: &[Token], at: usize) -> bool {
        ExpressionRecognizer::new().check(tokens, at)
    }

    fn verify(&self, tokens: &[Token], at: usize) -> Result<(), VerifyError> {
        ExpressionRecognizer::new().verify(tokens, at)
    }

    fn create(&self, tokens: &[Token], at: usize) -> (PreStatement, usize) {
        let (expression, end) = ExpressionRecognizer::new().create(tokens, at);
        (
            PreStatement::Expression(super::token::PreExpressionStatement { expression }),
            end,
        )
    }
}

/// The statement recognizers in trial order.
fn statement_recognizers() -> Vec<Box<dyn StatementRecognizer>> {
    vec![
        Box::new(DefinitionRecognizer),
        Box::new(AssignmentRecognizer),
        Box::new(ExpressionStatementRecognizer),
    ]
}

/// Turn the token stream into the flat pre-token statement stream.
///
/// The stream opens with the root block marker, and every declaration is
/// followed by the block marker for its body.
pub fn prepare_statements(tokens: &[Token]) -> Result<Vec<PreStatement>, VerifyError> {
    let recognizers = statement_recognizers();
    let mut statements = vec![PreStatement::Block(PreBlock { depth: 0 })];

    let mut at = 0;
    while at < tokens.len() && !tokens[at].is_kind(TokenKind::Eof) {
        if tokens[at].is_kind(TokenKind::Newline) {
            at += 1;
            continue;
        }

        let mut matched = false;
        for recognizer in &recognizers {
            if recognizer.check(tokens, at) {
                recognizer.verify(tokens, at)?;
                let (statement, end) = recognizer.create(tokens, at);
                if let PreStatement::Declaration(declaration) = &statement {
                    let depth = declaration.depth;
                    statements.push(statement);
                    statements.push(PreStatement::Block(PreBlock { depth }));
                } else {
                    statements.push(statement);
                }
                at = end;
                matched = true;
                break;
            }
        }

        if !matched {
            // No recognizer claims this token; skip it.
            at += 1;
        }
    }

    Ok(statements)
}

/// The combined preprocessor pipeline: statement preparation, scope-tree
/// construction, identifier gathering.
pub fn preprocess(tokens: &[Token]) -> Result<ScopeTree, VerifyError> {
    let statements = prepare_statements(tokens)?;
    debug!("preprocessor produced {} statements", statements.len());

    let mut tree = ScopeBuilder::new().build(statements);
    gather_identifiers(&mut tree);
    debug!("scope tree holds {} scopes", tree.len());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;

    fn prepared(source: &str) -> Vec<String> {
        let tokens = tokenize(source).expect("tokenize failed");
        prepare_statements(&tokens)
            .expect("prepare failed")
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_source_is_root_block() {
        assert_eq!(prepared(""), vec!["[0]"]);
    }

    #[test]
    fn test_complete_statement_stream() {
        let statements = prepared(
            "2 + 3 * test _1_ and _2_\n# test _foo_ and _bar_\n[description](#link-to-nearest-method)\nbaz = 3",
        );
        assert_eq!(
            statements,
            vec![
                "[0]",
                "2 + 3 * test _1_ and _2_",
                "# test _foo_ and _bar_",
                "[1]",
                "[description](#link-to-nearest-method)",
                "baz = 3",
            ]
        );
    }

    #[test]
    fn test_block_marker_depth_follows_declaration() {
        let statements = prepared("### deep test");
        assert_eq!(statements, vec!["[0]", "### deep test", "[3]"]);
    }

    #[test]
    fn test_first_error_aborts() {
        let tokens = tokenize("# test\nfoo =").expect("tokenize failed");
        let err = prepare_statements(&tokens).expect_err("expected a verify error");
        assert_eq!(err.message, "Assignment: cannot assign empty");
    }

    #[test]
    fn test_blank_lines_produce_no_statements() {
        assert_eq!(prepared("\n\n5\n\n"), vec!["[0]", "5"]);
    }
}
