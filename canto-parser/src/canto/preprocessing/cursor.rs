//! Cursor helpers for token-slice scanning.
//!
//!     Recognizers never share iterator state. Each one receives an
//!     immutable token slice plus a position index and returns the new
//!     position explicitly. The helpers here implement the common scans:
//!     fast-forward to a target kind within the current line, and counting a
//!     run of equal kinds.

use crate::canto::token::{Token, TokenKind};

/// Find the first token at or after `at` whose kind is in `targets`.
///
/// The scan is bounded by the current line: reaching a newline or the
/// end-of-file sentinel before a target yields `None`, unless the target set
/// itself includes line enders. The token stream always terminates with the
/// end-of-file sentinel, so the scan cannot run off the slice.
pub(crate) fn find_ahead(tokens: &[Token], at: usize, targets: &[TokenKind]) -> Option<usize> {
    let mut i = at;
    loop {
        let token = &tokens[i];
        if token.is_kind_of(targets) {
            return Some(i);
        }
        if token.ends_line() {
            return None;
        }
        i += 1;
    }
}

/// Count the run of consecutive tokens of the given kinds starting at `at`.
pub(crate) fn count_while(tokens: &[Token], at: usize, kinds: &[TokenKind]) -> usize {
    let mut count = 0;
    while tokens[at + count].is_kind_of(kinds) {
        count += 1;
    }
    count
}
