//! Identifier gathering.
//!
//!     Walks the scope tree depth-first and registers every declared name
//!     into the scope where call resolution should find it. A declaration's
//!     identifier belongs to the scope whose depth is strictly less than the
//!     declaration's depth, found by walking up from the scope holding the
//!     declaration. An assignment target belongs to the scope it appears in;
//!     assignments do not open new nesting.
//!
//!     After this pass every scope's identifier list is exactly the set of
//!     names visible at that nesting level, and the names visible to a
//!     statement are its scope's list plus the lists of all ancestors.

use crate::canto::token::{PreIdentifier, PreStatement};

use super::{ScopeEntry, ScopeId, ScopeTree};

enum Registration {
    Recurse(ScopeId),
    Declaration(usize, PreIdentifier),
    Assignment(PreIdentifier),
}

/// Populate every scope's identifier list.
pub fn gather_identifiers(tree: &mut ScopeTree) {
    gather_for_scope(tree, tree.root());
}

fn gather_for_scope(tree: &mut ScopeTree, id: ScopeId) {
    let registrations: Vec<Registration> = tree
        .scope(id)
        .body
        .iter()
        .filter_map(|entry| match entry {
            ScopeEntry::Scope(child) => Some(Registration::Recurse(*child)),
            ScopeEntry::Statement(PreStatement::Declaration(declaration)) => Some(
                Registration::Declaration(declaration.depth, declaration.name.clone()),
            ),
            ScopeEntry::Statement(PreStatement::Assignment(assignment)) => {
                Some(Registration::Assignment(assignment.target.clone()))
            }
            ScopeEntry::Statement(_) => None,
        })
        .collect();

    for registration in registrations {
        match registration {
            Registration::Recurse(child) => gather_for_scope(tree, child),
            Registration::Declaration(depth, identifier) => {
                let owner = owning_scope(tree, id, depth);
                tree.scope_mut(owner).identifiers.push(identifier);
            }
            Registration::Assignment(identifier) => {
                tree.scope_mut(id).identifiers.push(identifier);
            }
        }
    }
}

/// Walk up from `from` until the scope's depth is strictly less than the
/// declaration's depth.
fn owning_scope(tree: &ScopeTree, from: ScopeId, depth: usize) -> ScopeId {
    let mut current = from;
    while depth <= tree.scope(current).depth {
        match tree.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}
