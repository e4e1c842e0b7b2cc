//! # canto-parser
//!
//! A parser for the canto format.
//!
//! Canto is a small declaration-oriented markup language. Headings introduced
//! by one or more `#` markers declare named, parameterized phrases whose
//! nesting depth equals the marker count; plain lines hold expressions,
//! assignments, and markdown-style links; a word run that structurally
//! matches an earlier phrase declaration is a call to it.
//!
//! The pipeline is a strict sequence of in-memory transformations:
//! tokenization, pre-token recognition, scope-tree construction, identifier
//! gathering, and AST construction with call resolution. Each stage finishes
//! completely before the next one starts, and the first error aborts the
//! whole pass. See the [pipeline](canto::pipeline) module for the facade.

pub mod canto;
