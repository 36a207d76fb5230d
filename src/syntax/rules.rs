//! Patterns, rules and per-line state
//!
//! This module defines the compiled pattern and rule types a grammar is
//! made of, and the state threaded from one line to the next.

use std::ops::Range;

use regex::Regex;

use super::style::Span;
use super::tokens::StyleId;
use crate::error::{Error, Result};

/// A compiled pattern that is guaranteed never to match the empty string
///
/// The optional capture group selects the part of each match that gets
/// styled; the whole match still decides where searching resumes.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    group: usize,
}

/// One raw occurrence of a [`Pattern`] in a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Byte range of the whole match
    pub whole: Range<usize>,
    /// Byte range to style, `None` when the selected group did not take part
    pub styled: Option<Range<usize>>,
}

impl Pattern {
    /// Compile a pattern that styles its whole match
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_group(pattern, 0)
    }

    /// Compile a pattern that styles only capture group `group`
    pub fn with_group(pattern: &str, group: usize) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::grammar("empty pattern"));
        }

        let hir = regex_syntax::Parser::new()
            .parse(pattern)
            .map_err(|e| Error::grammar(format!("pattern `{}`: {}", pattern, e)))?;
        if hir.properties().minimum_len() == Some(0) {
            return Err(Error::grammar(format!(
                "pattern `{}` can match the empty string",
                pattern
            )));
        }

        let regex = Regex::new(pattern)
            .map_err(|e| Error::grammar(format!("pattern `{}`: {}", pattern, e)))?;
        if group >= regex.captures_len() {
            return Err(Error::grammar(format!(
                "pattern `{}` has no capture group {}",
                pattern, group
            )));
        }

        Ok(Self { regex, group })
    }

    /// The source text of this pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The capture group that gets styled (0 = whole match)
    pub fn group(&self) -> usize {
        self.group
    }

    /// Find the first raw match starting at or after byte `from`
    ///
    /// Anchors and word boundaries see the full line, so `^` only matches
    /// at offset 0.
    pub fn find_at(&self, text: &str, from: usize) -> Option<Match> {
        if from > text.len() {
            return None;
        }
        if self.group == 0 {
            return self.regex.find_at(text, from).map(|m| Match {
                whole: m.range(),
                styled: Some(m.range()),
            });
        }
        let caps = self.regex.captures_at(text, from)?;
        let whole = caps.get(0)?.range();
        Some(Match {
            whole,
            styled: caps.get(self.group).map(|g| g.range()),
        })
    }
}

/// A single pattern/style pair
#[derive(Debug, Clone)]
pub struct Rule {
    /// Compiled pattern
    pub pattern: Pattern,
    /// Style assigned to every accepted match
    pub style: StyleId,
}

impl Rule {
    /// Create a rule that styles whole matches
    pub fn new(pattern: &str, style: StyleId) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            style,
        })
    }

    /// Create a rule that styles one capture group of each match
    pub fn with_group(pattern: &str, group: usize, style: StyleId) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::with_group(pattern, group)?,
            style,
        })
    }
}

/// Line state for tracking block comments
///
/// Every document starts with [`LineState::default`] (outside a comment).
/// The state returned for line *i* is the input for line *i + 1*.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineState {
    /// Whether the line ended inside an unterminated block comment
    pub in_block_comment: bool,
}

impl LineState {
    /// State of ordinary code
    pub const CODE: LineState = LineState {
        in_block_comment: false,
    };

    /// State inside an open block comment
    pub const IN_COMMENT: LineState = LineState {
        in_block_comment: true,
    };

    /// Check if we're inside a block comment
    pub fn is_in_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Check if we're in normal code
    pub fn is_code(&self) -> bool {
        !self.in_block_comment
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans in painting order; later spans override earlier ones
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}
