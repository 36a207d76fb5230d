//! Presentation types and the styled span produced by tokenization
//!
//! A [`Span`] carries a semantic [`StyleId`]; hosts decide how to paint
//! it. [`Style`] and [`Color`] are the default terminal rendition.

use super::tokens::StyleId;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled range of one line
///
/// Offsets are byte offsets into the line and always fall on `char`
/// boundaries. `end` never exceeds the line length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Semantic style of the covered text
    pub style: StyleId,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: StyleId) -> Self {
        Self { start, end, style }
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check whether two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The covered text of `line`
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }
}

/// Resolve overlapping spans into per-byte styles, last span wins.
///
/// This is the painting order hosts must follow; the returned vector has
/// one entry per byte of `line`.
pub fn flatten(line: &str, spans: &[Span]) -> Vec<Option<StyleId>> {
    let mut styles = vec![None; line.len()];
    for span in spans {
        let end = span.end.min(line.len());
        for slot in &mut styles[span.start.min(end)..end] {
            *slot = Some(span.style);
        }
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_italic();
        assert_eq!(style.fg, Color::Red);
        assert!(style.bold);
        assert!(style.italic);
        assert!(!style.is_default());
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10, StyleId::Number);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(4, 4, StyleId::Number).is_empty());
        assert_eq!(span.text("0123456789ab"), "56789");
    }

    #[test]
    fn test_span_overlaps() {
        let a = Span::new(0, 3, StyleId::Attribute);
        let b = Span::new(3, 5, StyleId::Operator);
        let c = Span::new(2, 4, StyleId::Value);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_flatten_last_wins() {
        let line = "<tag>";
        let spans = [
            Span::new(0, 5, StyleId::Element),
            Span::new(0, 1, StyleId::Operator),
            Span::new(4, 5, StyleId::Operator),
        ];
        let styles = flatten(line, &spans);
        assert_eq!(styles[0], Some(StyleId::Operator));
        assert_eq!(styles[2], Some(StyleId::Element));
        assert_eq!(styles[4], Some(StyleId::Operator));
    }
}
