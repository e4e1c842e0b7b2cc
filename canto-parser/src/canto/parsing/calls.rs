//! Call resolution.
//!
//!     Given a cursor positioned at a word inside an expression run, search
//!     the identifiers visible from the current scope outward for a pattern
//!     that structurally matches the input, then fall through to the
//!     key-phrase table. The current scope wins over ancestors; within one
//!     scope's list the first registered identifier wins; source scopes win
//!     over built-in phrases.
//!
//! Structural Matching
//!
//!     The pattern's parts and the input items are walked in lock-step. A
//!     literal word must match literal-for-literal. A parameter slot
//!     consumes exactly one explicit parameter group when the input has one
//!     at that position; otherwise it consumes a free run of items up to
//!     the item matching the pattern's next literal word, or to the end of
//!     the run when the slot is the pattern's last part. Parameter contents
//!     are never type-checked against the call, but an empty argument run
//!     fails the match.

use log::trace;

use crate::canto::phrases::PhraseTable;
use crate::canto::scoping::{ScopeId, ScopeTree};
use crate::canto::token::{ExprItem, IdentifierPart, PreIdentifier, TokenKind};

/// A successful resolution: the pattern, how many input items the site
/// consumed, and the per-slot argument runs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CallMatch {
    pub target: PreIdentifier,
    pub consumed: usize,
    pub arguments: Vec<Vec<ExprItem>>,
}

/// Resolve a call site against visible identifiers, then key phrases.
pub(crate) fn resolve(
    tree: &ScopeTree,
    scope: ScopeId,
    phrases: &PhraseTable,
    items: &[ExprItem],
    at: usize,
) -> Option<CallMatch> {
    let mut current = Some(scope);
    while let Some(id) = current {
        for identifier in &tree.scope(id).identifiers {
            if let Some(found) = match_pattern(identifier, items, at) {
                trace!("call site resolved to declared identifier: {}", identifier);
                return Some(found);
            }
        }
        current = tree.parent(id);
    }

    for phrase in phrases.iter() {
        if let Some(found) = match_pattern(&phrase.pattern, items, at) {
            trace!("call site resolved to key phrase: {}", phrase.name);
            return Some(found);
        }
    }

    None
}

/// Match one pattern against the input items starting at `at`.
pub(crate) fn match_pattern(
    pattern: &PreIdentifier,
    items: &[ExprItem],
    at: usize,
) -> Option<CallMatch> {
    if pattern.is_empty() {
        return None;
    }

    let mut i = at;
    let mut arguments: Vec<Vec<ExprItem>> = Vec::new();
    let parts = &pattern.parts;

    for (position, part) in parts.iter().enumerate() {
        match part {
            IdentifierPart::Word(word) => match items.get(i) {
                Some(ExprItem::Token(token))
                    if token.kind == TokenKind::Word && token.literal == word.literal =>
                {
                    i += 1;
                }
                _ => return None,
            },
            IdentifierPart::Parameter(_) => {
                // An explicit parameter group fills the slot by itself.
                if let Some(item @ ExprItem::Parameter(_)) = items.get(i) {
                    arguments.push(vec![item.clone()]);
                    i += 1;
                    continue;
                }

                // Otherwise the slot takes a free run up to the pattern's
                // next literal word. Two adjacent slots without explicit
                // delimiters cannot be split apart.
                let stop = match parts.get(position + 1) {
                    None => None,
                    Some(IdentifierPart::Word(word)) => Some(word.literal.as_str()),
                    Some(IdentifierPart::Parameter(_)) => return None,
                };

                let mut run = Vec::new();
                while let Some(item) = items.get(i) {
                    if let (Some(stop_word), ExprItem::Token(token)) = (stop, item) {
                        if token.kind == TokenKind::Word && token.literal == stop_word {
                            break;
                        }
                    }
                    run.push(item.clone());
                    i += 1;
                }
                if run.is_empty() {
                    return None;
                }
                arguments.push(run);
            }
        }
    }

    Some(CallMatch {
        target: pattern.clone(),
        consumed: i - at,
        arguments,
    })
}
