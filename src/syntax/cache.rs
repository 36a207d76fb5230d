//! Per-document highlighting cache
//!
//! Keeps the spans and line states of one document and re-tokenizes only
//! what an edit can affect: the edited lines, and the lines after them
//! whose incoming state changed as a result.

use super::registry::{LanguageId, Registry};
use super::rules::LineState;
use super::style::Span;

#[derive(Debug, Clone)]
struct CachedLine {
    /// State this line was tokenized with
    start_state: LineState,
    /// State handed to the next line
    end_state: LineState,
    spans: Vec<Span>,
}

/// Highlighting cache for one document
#[derive(Debug, Clone)]
pub struct HighlightCache {
    /// Language of this document
    language: LanguageId,
    /// One entry per line, `None` until tokenized or after an edit
    lines: Vec<Option<CachedLine>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new(language: LanguageId) -> Self {
        Self {
            language,
            lines: Vec::new(),
        }
    }

    /// Language of this document
    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// Switch language; everything is re-tokenized on the next refresh
    pub fn set_language(&mut self, language: LanguageId) {
        self.language = language;
        self.invalidate_all();
    }

    /// Forget every cached line
    pub fn invalidate_all(&mut self) {
        self.lines.iter_mut().for_each(|line| *line = None);
    }

    /// The text of line `idx` changed
    pub fn edit_line(&mut self, idx: usize) {
        if let Some(line) = self.lines.get_mut(idx) {
            *line = None;
        }
    }

    /// A line was inserted before line `idx`
    pub fn insert_line(&mut self, idx: usize) {
        let idx = idx.min(self.lines.len());
        self.lines.insert(idx, None);
    }

    /// Line `idx` was removed
    pub fn remove_line(&mut self, idx: usize) {
        if idx < self.lines.len() {
            self.lines.remove(idx);
        }
    }

    /// Bring the cache up to date with `text`, returning how many lines
    /// were tokenized
    ///
    /// A cached line is reused only if it was tokenized with the state the
    /// previous line now ends in, so a changed state cascades forward until
    /// it settles.
    pub fn refresh<S: AsRef<str>>(&mut self, registry: &Registry, text: &[S]) -> usize {
        self.lines.resize(text.len(), None);

        let mut tokenized = 0;
        let mut state = LineState::default();
        for (line, cached) in text.iter().zip(self.lines.iter_mut()) {
            let fresh = matches!(cached, Some(c) if c.start_state == state);
            if !fresh {
                let result = registry.tokenize_line(self.language, line.as_ref(), state);
                *cached = Some(CachedLine {
                    start_state: state,
                    end_state: result.end_state,
                    spans: result.spans,
                });
                tokenized += 1;
            }
            if let Some(c) = cached {
                state = c.end_state;
            }
        }
        tokenized
    }

    /// Re-tokenize the whole document
    pub fn highlight_all<S: AsRef<str>>(&mut self, registry: &Registry, text: &[S]) -> usize {
        self.invalidate_all();
        self.refresh(registry, text)
    }

    /// Number of lines tracked
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cache tracks no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cached spans of line `idx`, `None` if it needs a refresh
    pub fn line_spans(&self, idx: usize) -> Option<&[Span]> {
        self.lines.get(idx)?.as_ref().map(|c| c.spans.as_slice())
    }

    /// Cached outgoing state of line `idx`
    pub fn end_state(&self, idx: usize) -> Option<LineState> {
        self.lines.get(idx)?.as_ref().map(|c| c.end_state)
    }
}
