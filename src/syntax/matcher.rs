//! Quote-aware pattern matching
//!
//! A candidate match that starts inside an unterminated double-quoted
//! region of the line is skipped. "Inside" is decided by quote parity: an
//! odd number of `"` bytes before the candidate. Backslash escapes and
//! single quotes are not considered, so `"a \" b"` confuses the parity;
//! grammars are written against this behavior.

use super::rules::{Match, Pattern};

/// Check whether byte `index` lies after an odd number of `"` in `text`
pub fn is_between_quotes(text: &str, index: usize) -> bool {
    let end = index.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'"').count() % 2 == 1
}

/// Find the next match of `pattern` at or after `from` that does not start
/// between quotes
///
/// Rejected candidates resume the search at their end, never their start.
pub fn find_next(pattern: &Pattern, text: &str, from: usize) -> Option<Match> {
    let mut pos = from;
    loop {
        let m = pattern.find_at(text, pos)?;
        if !is_between_quotes(text, m.whole.start) {
            return Some(m);
        }
        pos = m.whole.end;
    }
}

/// Iterator over successive non-overlapping quote-aware matches
pub struct QuoteAwareMatches<'p, 't> {
    pattern: &'p Pattern,
    text: &'t str,
    pos: usize,
}

impl Iterator for QuoteAwareMatches<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let m = find_next(self.pattern, self.text, self.pos)?;
        self.pos = m.whole.end;
        Some(m)
    }
}

/// Iterate over every quote-aware match of `pattern` in `text`
pub fn find_iter<'p, 't>(pattern: &'p Pattern, text: &'t str) -> QuoteAwareMatches<'p, 't> {
    QuoteAwareMatches {
        pattern,
        text,
        pos: 0,
    }
}
