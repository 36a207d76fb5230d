//! Style tags for syntax highlighting
//!
//! This module defines the fixed set of semantic tags a grammar rule can
//! assign, and their default terminal styles.

use super::style::{Color, Style};

/// Semantic style tags assigned by grammar rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    /// Operators and delimiters (`=`, `{`, `</`, ...)
    Operator,
    /// Element, tag or section names
    Element,
    /// Attribute and key names
    Attribute,
    /// String values
    Value,
    /// Comments, single- and multi-line
    Comment,
    /// Numeric literals
    Number,
    /// Special tokens (`#name`, `<< ... >>`)
    Special,
    /// Macro references (`@name`, `$name`)
    Macro,
    /// Language keywords
    Keyword,
}

impl StyleId {
    /// Every style tag, in declaration order
    pub const ALL: [StyleId; 9] = [
        StyleId::Operator,
        StyleId::Element,
        StyleId::Attribute,
        StyleId::Value,
        StyleId::Comment,
        StyleId::Number,
        StyleId::Special,
        StyleId::Macro,
        StyleId::Keyword,
    ];

    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleId::Operator => Style::fg(Color::BrightBlack),
            StyleId::Element => Style::fg(Color::Blue).with_bold(),
            StyleId::Attribute => Style::fg(Color::Blue),
            StyleId::Value => Style::fg(Color::Red),
            StyleId::Comment => Style::fg(Color::Green).with_italic(),
            StyleId::Number => Style::fg(Color::Cyan),
            StyleId::Special => Style::fg(Color::BrightBlue).with_bold().with_italic(),
            StyleId::Macro => Style::fg(Color::Magenta),
            StyleId::Keyword => Style::fg(Color::BrightMagenta).with_bold(),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleId::Operator => "Operator",
            StyleId::Element => "Element",
            StyleId::Attribute => "Attribute",
            StyleId::Value => "Value",
            StyleId::Comment => "Comment",
            StyleId::Number => "Number",
            StyleId::Special => "Special",
            StyleId::Macro => "Macro",
            StyleId::Keyword => "Keyword",
        }
    }

    /// Parse a tag from its name, ignoring case (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
    }
}
