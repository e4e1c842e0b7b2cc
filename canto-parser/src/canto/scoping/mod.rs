//! Scope tree construction.
//!
//!     The preprocessor emits a flat statement stream in which nesting is
//!     expressed only through depth-tagged block markers. This module folds
//!     that stream into a rooted tree of scopes.
//!
//! Ownership
//!
//!     All scopes live in one owning arena inside the tree; parents, children
//!     and body entries refer to each other through plain index handles.
//!     There are no owning back-references, so the structure is acyclic by
//!     construction and freely cloneable.
//!
//! Algorithm
//!
//!     A current-scope cursor starts empty.
//!
//!         - The first block marker creates the root scope at its depth.
//!         - Any later block marker first walks the cursor up while the
//!           marker's depth is not deeper than the current scope's depth
//!           (closing finished nested blocks and equal-depth siblings), then
//!           opens a new child scope and descends into it.
//!         - A declaration walks up the same way before it is appended, so a
//!           declaration always sits in its logical parent scope's body,
//!           immediately before the scope its block marker opens.
//!         - Every other statement is appended to the current scope's body.
//!
//!     The walk-up rule is what turns flat marker counts into a tree: in
//!     `# a` / `## b` / `### c` / `## d`, the marker for `d` closes both
//!     `c`'s and `b`'s scopes, making `d` a second child of `a`.

pub mod gather;

pub use gather::gather_identifiers;

use serde::Serialize;

use super::token::{PreIdentifier, PreStatement};

/// Index handle for a scope in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(usize);

/// One entry in a scope's ordered body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScopeEntry {
    Statement(PreStatement),
    Scope(ScopeId),
}

/// One nesting level: a declaration's body, or the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scope {
    pub depth: usize,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// Identifiers declared directly at this level, in registration order.
    pub identifiers: Vec<PreIdentifier>,
    pub body: Vec<ScopeEntry>,
}

impl Scope {
    fn new(depth: usize, parent: Option<ScopeId>) -> Self {
        Scope {
            depth,
            parent,
            children: Vec::new(),
            identifiers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// The rooted scope tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    /// Indented listing of every scope's identifiers, two spaces per depth
    /// level. Diagnostic output, also convenient in tests.
    pub fn identifiers_outline(&self) -> String {
        let mut out = String::new();
        self.outline_scope(self.root(), &mut out);
        out
    }

    fn outline_scope(&self, id: ScopeId, out: &mut String) {
        let scope = self.scope(id);
        for identifier in &scope.identifiers {
            out.push_str(&"  ".repeat(scope.depth));
            out.push_str(&identifier.to_string());
            out.push('\n');
        }
        for child in &scope.children {
            self.outline_scope(*child, out);
        }
    }
}

/// Folds the flat statement stream into a `ScopeTree`.
pub struct ScopeBuilder {
    scopes: Vec<Scope>,
    current: Option<ScopeId>,
}

impl ScopeBuilder {
    pub fn new() -> Self {
        ScopeBuilder {
            scopes: Vec::new(),
            current: None,
        }
    }

    pub fn build(mut self, statements: Vec<PreStatement>) -> ScopeTree {
        for statement in statements {
            match statement {
                PreStatement::Block(block) => self.open_block(block.depth),
                PreStatement::Declaration(declaration) => {
                    self.walk_up(declaration.depth);
                    self.append(ScopeEntry::Statement(PreStatement::Declaration(declaration)));
                }
                other => self.append(ScopeEntry::Statement(other)),
            }
        }

        if self.scopes.is_empty() {
            self.scopes.push(Scope::new(0, None));
        }
        ScopeTree {
            scopes: self.scopes,
        }
    }

    fn open_block(&mut self, depth: usize) {
        match self.current {
            None => {
                let id = self.alloc(Scope::new(depth, None));
                self.current = Some(id);
            }
            Some(_) => {
                self.walk_up(depth);
                let parent = self.current.unwrap_or(ScopeId(0));
                let child = self.alloc(Scope::new(depth, Some(parent)));
                self.scopes[parent.0].children.push(child);
                self.scopes[parent.0].body.push(ScopeEntry::Scope(child));
                self.current = Some(child);
            }
        }
    }

    /// Close scopes until the given depth is strictly deeper than the
    /// current scope's depth.
    fn walk_up(&mut self, depth: usize) {
        while let Some(id) = self.current {
            let scope = &self.scopes[id.0];
            if depth > scope.depth || scope.parent.is_none() {
                break;
            }
            self.current = scope.parent;
        }
    }

    fn append(&mut self, entry: ScopeEntry) {
        let id = match self.current {
            Some(id) => id,
            None => {
                let id = self.alloc(Scope::new(0, None));
                self.current = Some(id);
                id
            }
        };
        self.scopes[id.0].body.push(entry);
    }

    fn alloc(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(scope);
        id
    }
}

impl Default for ScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canto::lexing::tokenize;
    use crate::canto::preprocessing::prepare_statements;

    fn build(source: &str) -> ScopeTree {
        let tokens = tokenize(source).expect("tokenize failed");
        let statements = prepare_statements(&tokens).expect("prepare failed");
        ScopeBuilder::new().build(statements)
    }

    fn declaration_names(tree: &ScopeTree, id: ScopeId) -> Vec<String> {
        tree.scope(id)
            .body
            .iter()
            .filter_map(|entry| match entry {
                ScopeEntry::Statement(PreStatement::Declaration(d)) => Some(d.name.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_source_builds_bare_root() {
        let tree = build("");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.scope(tree.root()).depth, 0);
        assert!(tree.scope(tree.root()).body.is_empty());
    }

    #[test]
    fn test_every_scope_is_one_deeper_than_its_parent() {
        let tree = build("# a\n## b\n### c\n## d\n# e");
        for id in (0..tree.len()).map(ScopeId) {
            match tree.scope(id).parent {
                Some(parent) => {
                    assert_eq!(tree.scope(id).depth, tree.scope(parent).depth + 1);
                }
                None => assert_eq!(tree.scope(id).depth, 0),
            }
        }
    }

    #[test]
    fn test_sibling_closes_predecessor() {
        let tree = build("# a\n## b\n### c\n## d");
        let root = tree.root();
        assert_eq!(tree.scope(root).children.len(), 1);

        let a = tree.scope(root).children[0];
        assert_eq!(tree.scope(a).children.len(), 2);
        assert_eq!(declaration_names(&tree, a), vec!["b", "d"]);

        let b = tree.scope(a).children[0];
        assert_eq!(tree.scope(b).children.len(), 1);
        assert_eq!(declaration_names(&tree, b), vec!["c"]);

        let c = tree.scope(b).children[0];
        assert!(tree.scope(c).children.is_empty());
    }

    #[test]
    fn test_declaration_sits_before_its_scope() {
        let tree = build("# a\n## b\n## d");
        let a = tree.scope(tree.root()).children[0];
        let body = &tree.scope(a).body;
        assert_eq!(body.len(), 4);
        assert!(matches!(
            (&body[0], &body[1]),
            (
                ScopeEntry::Statement(PreStatement::Declaration(_)),
                ScopeEntry::Scope(_)
            )
        ));
        assert!(matches!(
            (&body[2], &body[3]),
            (
                ScopeEntry::Statement(PreStatement::Declaration(_)),
                ScopeEntry::Scope(_)
            )
        ));
    }

    #[test]
    fn test_plain_statements_stay_in_current_scope() {
        let tree = build("1 + 1\n# a\n2 + 2");
        let root_body = &tree.scope(tree.root()).body;
        assert_eq!(root_body.len(), 3);

        let a = tree.scope(tree.root()).children[0];
        assert_eq!(tree.scope(a).body.len(), 1);
    }
}
