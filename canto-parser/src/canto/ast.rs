//! AST definitions and rendering.
//!
//!     Each node family is a closed enum carrying per-kind payload structs;
//!     dispatch is by pattern matching. Nodes own their children. The only
//!     cross-reference is the call node's copy of the declaration pattern it
//!     resolved to, which carries no ownership of the scope tree.
//!
//! Rendering
//!
//!     `Display` re-emits canonical source text. Canonical form normalizes
//!     numbers (trailing zeros and a trailing dot are trimmed), prints every
//!     infix expression fully parenthesized, wraps unary expressions in
//!     parentheses, and ends every statement with exactly one newline.
//!     Declarations re-render their full depth so the canonical text parses
//!     back to the same nesting.
//!
//!     `debug_tree` is the diagnostic dump: one line per statement, node
//!     kinds only, two spaces of indent per depth level.

use std::fmt;

use super::token::{ExprItem, PreIdentifier, PreImport, Token};

/// An ordered list of statements; the whole parse result, and the body of
/// every declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<AstStatement>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            statements: Vec::new(),
        }
    }

    pub fn add_statement(&mut self, statement: AstStatement) {
        self.statements.push(statement);
    }

    /// Indented node-kind dump for diagnostics.
    pub fn debug_tree(&self, indent: usize) -> String {
        let mut out = format!("{}PROGRAM\n", "  ".repeat(indent));
        for statement in &self.statements {
            out.push_str(&statement.debug_tree(indent + 1));
        }
        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum AstStatement {
    Expression(AstExpressionStatement),
    Declaration(AstDeclaration),
    Assignment(AstAssignment),
}

impl AstStatement {
    pub fn debug_tree(&self, indent: usize) -> String {
        let pad = "  ".repeat(indent);
        match self {
            AstStatement::Expression(statement) => format!(
                "{}EXPRESSION_STATEMENT->{}\n",
                pad,
                statement.expression.kind_string()
            ),
            AstStatement::Declaration(declaration) => format!(
                "{}DECLARATION {}\n{}",
                pad,
                declaration.name,
                declaration.body.debug_tree(indent)
            ),
            AstStatement::Assignment(assignment) => format!(
                "{}ASSIGNMENT({})->{}\n",
                pad,
                assignment.parameters.len(),
                assignment.value.kind_string()
            ),
        }
    }
}

impl fmt::Display for AstStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstStatement::Expression(statement) => write!(f, "{}", statement),
            AstStatement::Declaration(declaration) => write!(f, "{}", declaration),
            AstStatement::Assignment(assignment) => write!(f, "{}", assignment),
        }
    }
}

/// A statement holding a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AstExpressionStatement {
    pub expression: AstExpression,
}

impl fmt::Display for AstExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.expression)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum AstExpression {
    Number(AstNumber),
    Prefix(Box<AstPrefix>),
    Infix(Box<AstInfix>),
    Identifier(AstIdentifier),
    Call(AstCall),
    Link(AstLink),
}

impl AstExpression {
    /// Compact node-kind form used by the debug tree.
    pub fn kind_string(&self) -> String {
        match self {
            AstExpression::Number(_) => "NUMBER".to_string(),
            AstExpression::Prefix(prefix) => {
                format!("{}{}", prefix.operator.literal, prefix.right.kind_string())
            }
            AstExpression::Infix(infix) => format!(
                "({} {} {})",
                infix.left.kind_string(),
                infix.operator.literal,
                infix.right.kind_string()
            ),
            AstExpression::Identifier(_) => "IDENTIFIER".to_string(),
            AstExpression::Call(call) => format!("CALL({})", call.argument_count),
            AstExpression::Link(_) => "LINK".to_string(),
        }
    }
}

impl fmt::Display for AstExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstExpression::Number(number) => write!(f, "{}", number),
            AstExpression::Prefix(prefix) => write!(f, "{}", prefix),
            AstExpression::Infix(infix) => write!(f, "{}", infix),
            AstExpression::Identifier(identifier) => write!(f, "{}", identifier),
            AstExpression::Call(call) => write!(f, "{}", call),
            AstExpression::Link(link) => write!(f, "{}", link),
        }
    }
}

/// A numeric literal, held as a double.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNumber {
    pub token: Token,
    pub value: f64,
}

/// Canonical number form: trailing zeros and a trailing dot are trimmed,
/// but the sole remaining digit never is.
pub(crate) fn canonical_number(value: f64) -> String {
    let formatted = value.to_string();
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

impl fmt::Display for AstNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", canonical_number(self.value))
    }
}

/// A unary operator applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct AstPrefix {
    pub operator: Token,
    pub right: AstExpression,
}

impl fmt::Display for AstPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator.literal, self.right)
    }
}

/// A binary operator with left and right operands.
#[derive(Debug, Clone, PartialEq)]
pub struct AstInfix {
    pub left: AstExpression,
    pub operator: Token,
    pub right: AstExpression,
}

impl fmt::Display for AstInfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator.literal, self.right)
    }
}

/// A bare parameter-name reference.
#[derive(Debug, Clone, PartialEq)]
pub struct AstIdentifier {
    pub token: Token,
}

impl fmt::Display for AstIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

/// A resolved call site.
///
/// `target` is a structural copy of the declaration pattern the site
/// matched; `site` is the matched input run, kept for canonical rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AstCall {
    pub site: Vec<ExprItem>,
    pub target: PreIdentifier,
    pub argument_count: usize,
}

impl fmt::Display for AstCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.site.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

/// An import link in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct AstLink {
    pub import: PreImport,
}

impl fmt::Display for AstLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.import)
    }
}

/// A declaration with its nested body program.
#[derive(Debug, Clone, PartialEq)]
pub struct AstDeclaration {
    pub depth: usize,
    pub name: PreIdentifier,
    pub body: Program,
}

impl fmt::Display for AstDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "#".repeat(self.depth), self.name)?;
        write!(f, "{}", self.body)
    }
}

/// An assignment with its ordered parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct AstAssignment {
    pub target: PreIdentifier,
    pub parameters: Vec<String>,
    pub value: AstExpression,
}

impl fmt::Display for AstAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {}", self.target, self.value)
    }
}
