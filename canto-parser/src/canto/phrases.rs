//! Key-phrase table.
//!
//!     Built-in phrases are declarations the runtime provides instead of the
//!     source. The table maps a phrase name to its declaration pattern (what
//!     call sites are matched against) and its call-expansion pattern (what
//!     an evaluator would receive). The core pipeline only reads the table;
//!     it is constructed once at pipeline setup and passed by reference into
//!     the call resolver, never consulted as ambient global state.
//!
//!     Key-phrase support is an optional extension. The pipeline works the
//!     same with an empty table; resolution then only ever sees identifiers
//!     declared in the source.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::token::{IdentifierPart, PreIdentifier, PreParameter, Token};

/// A token of a phrase's call-expansion pattern.
///
/// These are synthetic; the lexer never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExpansionToken {
    Print,
    Join,
    Argument,
}

/// One built-in phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phrase {
    pub name: String,
    /// Declaration pattern matched against call sites.
    pub pattern: PreIdentifier,
    /// Call-expansion pattern handed to later stages.
    pub expansion: Vec<ExpansionToken>,
}

/// A name-keyed collection of phrases, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PhraseTable {
    phrases: Vec<Phrase>,
}

impl PhraseTable {
    /// A table with no phrases; disables the key-phrase extension.
    pub fn empty() -> Self {
        PhraseTable::default()
    }

    /// The built-in phrases: `print` and `join`.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    pub fn insert(&mut self, phrase: Phrase) {
        self.phrases.push(phrase);
    }

    pub fn get(&self, name: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phrase> {
        self.phrases.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

static BUILTIN: Lazy<PhraseTable> = Lazy::new(|| {
    let mut table = PhraseTable::empty();
    table.insert(Phrase {
        name: "PRINT".to_string(),
        pattern: pattern(&[Part::Word("print"), Part::Slot("value")]),
        expansion: vec![ExpansionToken::Print, ExpansionToken::Argument],
    });
    table.insert(Phrase {
        name: "JOIN".to_string(),
        pattern: pattern(&[
            Part::Word("join"),
            Part::Slot("left"),
            Part::Word("and"),
            Part::Slot("right"),
        ]),
        expansion: vec![
            ExpansionToken::Join,
            ExpansionToken::Argument,
            ExpansionToken::Argument,
        ],
    });
    table
});

enum Part {
    Word(&'static str),
    Slot(&'static str),
}

fn pattern(parts: &[Part]) -> PreIdentifier {
    PreIdentifier::new(
        parts
            .iter()
            .map(|part| match part {
                Part::Word(text) => IdentifierPart::Word(Token::word(*text)),
                Part::Slot(name) => IdentifierPart::Parameter(PreParameter::Formal(
                    PreIdentifier::new(vec![IdentifierPart::Word(Token::word(*name))]),
                )),
            })
            .collect(),
    )
}
