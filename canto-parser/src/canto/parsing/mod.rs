//! Parser
//!
//!     The parser walks the scope tree and emits the AST. It never mutates
//!     the tree; by the time it runs, the identifier tables are fully
//!     populated and the tree is read-only.
//!
//! Statement Dispatch
//!
//!     `parse_scope` iterates a scope's body. A declaration immediately
//!     followed by its nested scope becomes a declaration statement whose
//!     body is the recursively parsed child scope. Every other statement
//!     goes through the registered statement processors with the same
//!     check / verify / create discipline the preprocessor uses. The first
//!     verification failure is fatal for the pass; no partial AST is ever
//!     returned.
//!
//! Locals
//!
//!     While a declaration's body is being parsed, the declaration's formal
//!     parameter names are visible as plain identifier references, chained
//!     with any parameters of enclosing declarations. An assignment's value
//!     sees the assignment target's parameters the same way.

pub mod calls;
pub mod expressions;

use log::debug;

use super::ast::{
    AstAssignment, AstDeclaration, AstExpressionStatement, AstStatement, Program,
};
use super::errors::ParseError;
use super::phrases::PhraseTable;
use super::scoping::{ScopeEntry, ScopeId, ScopeTree};
use super::token::{ExprItem, PreStatement, TokenKind};

use calls::resolve;
use expressions::{ExpressionParser, INFIX_KINDS};

/// Everything a statement processor needs to see.
pub(crate) struct ParseContext<'a> {
    pub tree: &'a ScopeTree,
    pub scope: ScopeId,
    pub phrases: &'a PhraseTable,
    pub locals: &'a [String],
}

/// The statement-processor contract, mirroring the preprocessor recognizers.
pub(crate) trait StatementProcessor {
    fn check(&self, statement: &PreStatement) -> bool;
    fn verify(&self, statement: &PreStatement, context: &ParseContext) -> Result<(), ParseError>;
    fn create(
        &self,
        statement: &PreStatement,
        context: &ParseContext,
    ) -> Result<AstStatement, ParseError>;
}

/// Parse the scope tree into a program.
pub fn parse(tree: &ScopeTree, phrases: &PhraseTable) -> Result<Program, ParseError> {
    let parser = Parser { tree, phrases };
    let program = parser.parse_scope(tree.root(), &[])?;
    debug!("parser produced {} top-level statements", program.statements.len());
    Ok(program)
}

struct Parser<'a> {
    tree: &'a ScopeTree,
    phrases: &'a PhraseTable,
}

impl Parser<'_> {
    fn parse_scope(&self, id: ScopeId, locals: &[String]) -> Result<Program, ParseError> {
        let scope = self.tree.scope(id);
        let mut program = Program::new();

        let mut i = 0;
        while i < scope.body.len() {
            match &scope.body[i] {
                ScopeEntry::Statement(PreStatement::Declaration(declaration)) => {
                    let body = match scope.body.get(i + 1) {
                        Some(ScopeEntry::Scope(child)) => {
                            let mut body_locals = locals.to_vec();
                            body_locals.extend(declaration.name.parameter_names());
                            i += 1;
                            self.parse_scope(*child, &body_locals)?
                        }
                        _ => Program::new(),
                    };
                    program.add_statement(AstStatement::Declaration(AstDeclaration {
                        depth: declaration.depth,
                        name: declaration.name.clone(),
                        body,
                    }));
                    i += 1;
                }
                ScopeEntry::Statement(statement) => {
                    program.add_statement(self.create_statement(statement, id, locals)?);
                    i += 1;
                }
                ScopeEntry::Scope(_) => {
                    return Err(ParseError::new(
                        "Parser: scope without a preceding declaration",
                    ));
                }
            }
        }

        Ok(program)
    }

    fn create_statement(
        &self,
        statement: &PreStatement,
        scope: ScopeId,
        locals: &[String],
    ) -> Result<AstStatement, ParseError> {
        let context = ParseContext {
            tree: self.tree,
            scope,
            phrases: self.phrases,
            locals,
        };
        let processors: [&dyn StatementProcessor; 2] =
            [&ExpressionStatementProcessor, &AssignmentProcessor];

        for processor in processors {
            if processor.check(statement) {
                processor.verify(statement, &context)?;
                return processor.create(statement, &context);
            }
        }

        Err(ParseError::new(format!(
            "Parser: no processor for statement: {}",
            statement
        )))
    }
}

/// Processor for bare expression statements.
pub(crate) struct ExpressionStatementProcessor;

impl StatementProcessor for ExpressionStatementProcessor {
    fn check(&self, statement: &PreStatement) -> bool {
        matches!(statement, PreStatement::Expression(_))
    }

    fn verify(&self, statement: &PreStatement, context: &ParseContext) -> Result<(), ParseError> {
        match statement {
            PreStatement::Expression(inner) => verify_expression(&inner.expression.items, context),
            _ => Err(wrong_type("ExpressionStatement", statement)),
        }
    }

    fn create(
        &self,
        statement: &PreStatement,
        context: &ParseContext,
    ) -> Result<AstStatement, ParseError> {
        match statement {
            PreStatement::Expression(inner) => {
                let expression = ExpressionParser::new(&inner.expression.items, context).parse()?;
                Ok(AstStatement::Expression(AstExpressionStatement {
                    expression,
                }))
            }
            _ => Err(wrong_type("ExpressionStatement", statement)),
        }
    }
}

/// Processor for assignments.
pub(crate) struct AssignmentProcessor;

impl StatementProcessor for AssignmentProcessor {
    fn check(&self, statement: &PreStatement) -> bool {
        matches!(statement, PreStatement::Assignment(_))
    }

    fn verify(&self, statement: &PreStatement, context: &ParseContext) -> Result<(), ParseError> {
        match statement {
            PreStatement::Assignment(assignment) => {
                if assignment.target.is_empty() {
                    return Err(ParseError::new("Assignment: target identifier is missing"));
                }
                let locals = combined_locals(context, &assignment.target.parameter_names());
                let context = ParseContext {
                    tree: context.tree,
                    scope: context.scope,
                    phrases: context.phrases,
                    locals: &locals,
                };
                verify_expression(&assignment.value.items, &context)
            }
            _ => Err(wrong_type("Assignment", statement)),
        }
    }

    fn create(
        &self,
        statement: &PreStatement,
        context: &ParseContext,
    ) -> Result<AstStatement, ParseError> {
        match statement {
            PreStatement::Assignment(assignment) => {
                let parameters = assignment.target.parameter_names();
                let locals = combined_locals(context, &parameters);
                let context = ParseContext {
                    tree: context.tree,
                    scope: context.scope,
                    phrases: context.phrases,
                    locals: &locals,
                };
                let value = ExpressionParser::new(&assignment.value.items, &context).parse()?;
                Ok(AstStatement::Assignment(AstAssignment {
                    target: assignment.target.clone(),
                    parameters,
                    value,
                }))
            }
            _ => Err(wrong_type("Assignment", statement)),
        }
    }
}

fn combined_locals(context: &ParseContext, own: &[String]) -> Vec<String> {
    let mut locals = context.locals.to_vec();
    locals.extend_from_slice(own);
    locals
}

fn wrong_type(processor: &str, statement: &PreStatement) -> ParseError {
    ParseError::new(format!(
        "{}: pre-processed token is the wrong type: {}",
        processor, statement
    ))
}

/// Statement-level expression sanity checks, run before construction.
///
/// Rejects unknown identifiers, two numbers in a row, two identifiers in a
/// row, and two infix operators in a row unless the second starts a
/// negation. The first item must be something with a prefix form.
fn verify_expression(items: &[ExprItem], context: &ParseContext) -> Result<(), ParseError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Class {
        Number,
        Infix,
        Identifier,
        Other,
    }

    let mut last: Option<(Class, String)> = None;
    let mut i = 0;

    while i < items.len() {
        let item = &items[i];

        if item.is_word() {
            let word = item
                .token()
                .map(|t| t.literal.clone())
                .unwrap_or_default();
            if let Some((Class::Identifier, last_text)) = &last {
                return Err(ParseError::new(format!(
                    "Expression: unexpected two identifiers in a row {} and {}",
                    last_text, word
                )));
            }
            if let Some(found) = resolve(context.tree, context.scope, context.phrases, items, i) {
                i += found.consumed;
                last = Some((Class::Identifier, word));
                continue;
            }
            if context.locals.iter().any(|name| name == &word) {
                i += 1;
                last = Some((Class::Identifier, word));
                continue;
            }
            return Err(ParseError::new(format!(
                "Expression: unknown identifier: {}",
                word
            )));
        }

        match item {
            ExprItem::Token(token) => {
                let class = if token.kind == TokenKind::Number {
                    Class::Number
                } else if token.is_kind_of(&INFIX_KINDS) {
                    Class::Infix
                } else {
                    Class::Other
                };

                match &last {
                    None => {
                        let prefix_legal = matches!(
                            token.kind,
                            TokenKind::Number
                                | TokenKind::Minus
                                | TokenKind::Bang
                                | TokenKind::LParen
                        );
                        if !prefix_legal {
                            return Err(ParseError::new(format!(
                                "Expression: expected prefix token or identifier but got {}, literal: {}",
                                token.kind.name(),
                                token.literal
                            )));
                        }
                    }
                    Some((Class::Infix, last_text)) => {
                        if class == Class::Infix && token.kind != TokenKind::Minus {
                            return Err(ParseError::new(format!(
                                "Expression: unexpected two infix types in a row {} and {}",
                                last_text,
                                token.kind.name()
                            )));
                        }
                    }
                    Some((Class::Number, last_text)) => {
                        if class == Class::Number {
                            return Err(ParseError::new(format!(
                                "Expression: unexpected two numbers in a row {} and {}",
                                last_text, token.literal
                            )));
                        }
                    }
                    Some(_) => {}
                }

                let text = match class {
                    Class::Infix => token.kind.name().to_string(),
                    _ => token.literal.clone(),
                };
                last = Some((class, text));
            }
            ExprItem::Parameter(parameter) => {
                if last.is_none() {
                    return Err(ParseError::new(format!(
                        "Expression: expected prefix token or identifier but got parameter group {}",
                        parameter
                    )));
                }
                last = Some((Class::Other, parameter.to_string()));
            }
            ExprItem::Import(import) => {
                last = Some((Class::Other, import.to_string()));
            }
        }

        i += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;
    use crate::canto::preprocessing::preprocess;

    fn parsed(source: &str) -> Program {
        let tokens = tokenize(source).expect("tokenize failed");
        let tree = preprocess(&tokens).expect("preprocess failed");
        parse(&tree, &PhraseTable::empty()).expect("parse failed")
    }

    fn parse_error(source: &str) -> ParseError {
        let tokens = tokenize(source).expect("tokenize failed");
        let tree = preprocess(&tokens).expect("preprocess failed");
        parse(&tree, &PhraseTable::empty()).expect_err("expected a parse error")
    }

    #[test]
    fn test_empty_source() {
        let program = parsed("");
        assert!(program.statements.is_empty());
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn test_simple_expressions_and_prefixes() {
        assert_eq!(parsed("5\n-1\n!3.5").to_string(), "5\n(-1)\n(!3.5)\n");
    }

    #[test]
    fn test_infix_expressions() {
        assert_eq!(
            parsed("5 + 1\n6 - 1\n3 * 3\n4 / 4").to_string(),
            "(5 + 1)\n(6 - 1)\n(3 * 3)\n(4 / 4)\n"
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parsed("5 + 1 * -5 - 2 / 3").to_string(),
            "((5 + (1 * (-5))) - (2 / 3))\n"
        );
    }

    #[test]
    fn test_comparison_precedence() {
        assert_eq!(
            parsed("1 + 2 == 4 - 1").to_string(),
            "((1 + 2) == (4 - 1))\n"
        );
        assert_eq!(parsed("1 < 2 == 3 > 4").to_string(), "((1 < 2) == (3 > 4))\n");
    }

    #[test]
    fn test_grouped_expression() {
        assert_eq!(parsed("(5 + 1) * 2").to_string(), "((5 + 1) * 2)\n");
    }

    #[test]
    fn test_declaration_with_body() {
        let program = parsed("# test\n5 + 5");
        assert_eq!(program.to_string(), "# test\n(5 + 5)\n");
        assert_eq!(
            program.debug_tree(0),
            "PROGRAM\n  DECLARATION test\n  PROGRAM\n    EXPRESSION_STATEMENT->(NUMBER + NUMBER)\n"
        );
    }

    #[test]
    fn test_nested_declarations_render_their_depth() {
        let program = parsed("# test\n## too test\n### deep test\n## three test");
        assert_eq!(
            program.to_string(),
            "# test\n## too test\n### deep test\n## three test\n"
        );
    }

    #[test]
    fn test_call_resolution_with_argument_count() {
        let program = parsed("# foo (x)\nfoo 3");
        assert_eq!(
            program.debug_tree(0),
            "PROGRAM\n  DECLARATION foo (x)\n  PROGRAM\n    EXPRESSION_STATEMENT->CALL(1)\n"
        );
        assert_eq!(program.to_string(), "# foo (x)\nfoo 3\n");
    }

    #[test]
    fn test_unresolved_call_is_an_error() {
        let err = parse_error("foo");
        assert_eq!(err.message, "Expression: unknown identifier: foo");
    }

    #[test]
    fn test_call_resolves_through_enclosing_scopes() {
        let program = parsed("# foo (x)\n## bar\nfoo 3");
        assert_eq!(program.to_string(), "# foo (x)\n## bar\nfoo 3\n");
    }

    #[test]
    fn test_declaration_parameters_are_local_identifiers() {
        let program = parsed("# add (x) and (y)\nx + y");
        assert_eq!(program.to_string(), "# add (x) and (y)\n(x + y)\n");
    }

    #[test]
    fn test_assignment_statement() {
        let program = parsed("foo = 6");
        assert_eq!(program.to_string(), "foo = 6\n");
        assert_eq!(program.debug_tree(0), "PROGRAM\n  ASSIGNMENT(0)->NUMBER\n");
    }

    #[test]
    fn test_assignment_target_is_callable_afterwards() {
        let program = parsed("foo = 6\nfoo + 1");
        assert_eq!(program.to_string(), "foo = 6\n(foo + 1)\n");
    }

    #[test]
    fn test_assignment_with_parameters_sees_them_in_value() {
        let program = parsed("test (x) = x + 1");
        assert_eq!(program.to_string(), "test (x) = (x + 1)\n");
        assert_eq!(program.debug_tree(0), "PROGRAM\n  ASSIGNMENT(1)->(IDENTIFIER + NUMBER)\n");
    }

    #[test]
    fn test_two_numbers_in_a_row() {
        let err = parse_error("5 5");
        assert_eq!(err.message, "Expression: unexpected two numbers in a row 5 and 5");
    }

    #[test]
    fn test_two_infix_in_a_row() {
        let err = parse_error("5 + * 5");
        assert_eq!(
            err.message,
            "Expression: unexpected two infix types in a row + and *"
        );
    }

    #[test]
    fn test_infix_then_minus_is_negation() {
        assert_eq!(parsed("2 / -2").to_string(), "(2 / (-2))\n");
    }

    #[test]
    fn test_two_identifiers_in_a_row() {
        let err = parse_error("# foo\n# bar\nfoo bar");
        assert_eq!(
            err.message,
            "Expression: unexpected two identifiers in a row foo and bar"
        );
    }

    #[test]
    fn test_import_link_in_expression_position() {
        let program = parsed("[description](#link-to-nearest-method)");
        assert_eq!(program.to_string(), "[description](#link-to-nearest-method)\n");
        assert_eq!(program.debug_tree(0), "PROGRAM\n  EXPRESSION_STATEMENT->LINK\n");
    }

    #[test]
    fn test_key_phrase_resolution() {
        let tokens = tokenize("print 3 + 4").expect("tokenize failed");
        let tree = preprocess(&tokens).expect("preprocess failed");
        let program = parse(&tree, &PhraseTable::builtin()).expect("parse failed");
        assert_eq!(program.debug_tree(0), "PROGRAM\n  EXPRESSION_STATEMENT->CALL(1)\n");
        assert_eq!(program.to_string(), "print 3 + 4\n");
    }

    #[test]
    fn test_key_phrases_disabled_with_empty_table() {
        let err = parse_error("print 3 + 4");
        assert_eq!(err.message, "Expression: unknown identifier: print");
    }

    #[test]
    fn test_underscore_arguments_resolve() {
        let program = parsed("# test _foo_ and _bar_\n2 + 3 * test _1_ and _2_");
        assert_eq!(
            program.to_string(),
            "# test _foo_ and _bar_\n(2 + (3 * test _1_ and _2_))\n"
        );
    }

    #[test]
    fn test_declaration_shadowing_prefers_current_scope() {
        let program = parsed("# foo\n## foo\nfoo");
        let root_decl = match &program.statements[0] {
            AstStatement::Declaration(declaration) => declaration,
            other => panic!("expected a declaration, got {:?}", other),
        };
        let inner = match &root_decl.body.statements[0] {
            AstStatement::Declaration(declaration) => declaration,
            other => panic!("expected a declaration, got {:?}", other),
        };
        assert!(matches!(
            inner.body.statements[0],
            AstStatement::Expression(_)
        ));
    }
}
