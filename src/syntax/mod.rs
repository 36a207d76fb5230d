//! Syntax highlighting engine
//!
//! A host feeds one line at a time together with the state the previous
//! line ended in, and gets back styled spans plus the state for the next
//! line:
//!
//! ```
//! use codelight::{LanguageId, LineState, Registry};
//!
//! let registry = Registry::new();
//! let lang = registry.resolve("model.zml");
//! assert_eq!(lang, LanguageId::Config);
//!
//! let mut state = LineState::default();
//! for line in ["a /* x", "y", "z */ b"] {
//!     let result = registry.tokenize_line(lang, line, state);
//!     state = result.end_state;
//! }
//! assert!(state.is_code());
//! ```

mod builtin;
mod cache;
mod grammar;
mod matcher;
mod registry;
mod rules;
mod style;
mod tokens;

pub use builtin::{config, markup, script};
pub use cache::HighlightCache;
pub use grammar::{BlockComment, Grammar};
pub use matcher::{find_iter, find_next, is_between_quotes, QuoteAwareMatches};
pub use registry::{LanguageId, Registry};
pub use rules::{HighlightResult, LineState, Match, Pattern, Rule};
pub use style::{flatten, Color, Span, Style};
pub use tokens::StyleId;
