//! Processing pipeline for the canto format.
//!
//!     The pipeline chains the three stages strictly in order: the lexer
//!     finishes before the preprocessor starts, and the preprocessor's scope
//!     tree is complete, identifiers gathered, before the parser reads it.
//!     Everything is synchronous and in-memory; the scope tree is treated as
//!     read-only once the parser runs.
//!
//! Usage
//!
//!     let pipeline = Pipeline::new();
//!     let program = pipeline.run("# greet (name)\n")?;
//!     println!("{}", program);
//!
//!     The stages are also exposed individually as `tokenize`, `preprocess`
//!     and `parse` for tools that want to stop midway.

use log::debug;

use super::ast::Program;
use super::errors::PipelineError;
use super::lexing::tokenize;
use super::parsing::parse;
use super::phrases::PhraseTable;
use super::preprocessing::preprocess;
use super::scoping::ScopeTree;
use super::token::Token;

/// The whole front end as one value.
///
/// Owns the key-phrase table the call resolver consults; construct with
/// [`PhraseTable::empty()`] to disable built-in phrases.
pub struct Pipeline {
    phrases: PhraseTable,
}

impl Pipeline {
    /// A pipeline with the built-in key phrases.
    pub fn new() -> Self {
        Pipeline {
            phrases: PhraseTable::builtin(),
        }
    }

    /// A pipeline with an explicit phrase table.
    pub fn with_phrases(phrases: PhraseTable) -> Self {
        Pipeline { phrases }
    }

    pub fn phrases(&self) -> &PhraseTable {
        &self.phrases
    }

    /// Tokenize only.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, PipelineError> {
        Ok(tokenize(source)?)
    }

    /// Tokenize and build the gathered scope tree.
    pub fn preprocess(&self, source: &str) -> Result<ScopeTree, PipelineError> {
        let tokens = tokenize(source)?;
        Ok(preprocess(&tokens)?)
    }

    /// Run the complete pipeline.
    pub fn run(&self, source: &str) -> Result<Program, PipelineError> {
        debug!("pipeline run over {} bytes of source", source.len());
        let tokens = tokenize(source)?;
        let tree = preprocess(&tokens)?;
        let program = parse(&tree, &self.phrases)?;
        Ok(program)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
