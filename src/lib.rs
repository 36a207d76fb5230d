//! codelight - line-oriented syntax highlighting
//!
//! Regex grammars for a markup language, a brace/key-value configuration
//! language and a scripting language, with block comments tracked from
//! line to line.

pub mod config;
pub mod error;
pub mod syntax;

pub use config::Config;
pub use error::{Error, Result};
pub use syntax::{
    Grammar, HighlightCache, HighlightResult, LanguageId, LineState, Registry, Rule, Span, StyleId,
};
