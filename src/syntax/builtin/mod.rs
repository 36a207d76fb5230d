//! Built-in grammars
//!
//! Each grammar is built on first use and shared for the rest of the
//! process.

mod config_lang;
mod markup;
mod script;

use std::sync::OnceLock;

use log::error;

use super::grammar::Grammar;
use super::registry::LanguageId;
use super::tokens::StyleId;

/// The markup grammar (XML and friends)
pub fn markup() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(markup::markup_grammar)
}

/// The brace/key-value configuration grammar
pub fn config() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(config_lang::config_grammar)
}

/// The scripting-language grammar
pub fn script() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(script::script_grammar)
}

/// Look up the built-in grammar for a language
pub fn grammar(id: LanguageId) -> Option<&'static Grammar> {
    match id {
        LanguageId::Markup => Some(markup()),
        LanguageId::Config => Some(config()),
        LanguageId::Script => Some(script()),
        LanguageId::Custom(_) | LanguageId::Unknown => None,
    }
}

/// Every built-in language with its grammar
pub fn all_grammars() -> [(LanguageId, &'static Grammar); 3] {
    [
        (LanguageId::Markup, markup()),
        (LanguageId::Config, config()),
        (LanguageId::Script, script()),
    ]
}

// Built-in patterns are fixed; a failure here is a bug caught by the
// rule-count tests, so it is logged rather than propagated.

fn add(grammar: &mut Grammar, pattern: &str, style: StyleId) {
    if let Err(e) = grammar.rule(pattern, style) {
        error!("built-in grammar `{}`: {}", grammar.name(), e);
    }
}

fn add_group(grammar: &mut Grammar, pattern: &str, group: usize, style: StyleId) {
    if let Err(e) = grammar.group_rule(pattern, group, style) {
        error!("built-in grammar `{}`: {}", grammar.name(), e);
    }
}

fn block_comment(grammar: &mut Grammar, start: &str, end: &str) {
    if let Err(e) = grammar.set_block_comment(start, end) {
        error!("built-in grammar `{}`: {}", grammar.name(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_shared() {
        assert!(std::ptr::eq(markup(), markup()));
        assert!(std::ptr::eq(config(), grammar(LanguageId::Config).unwrap()));
        assert!(grammar(LanguageId::Unknown).is_none());
        assert!(grammar(LanguageId::Custom(0)).is_none());
    }

    #[test]
    fn test_builtins_are_valid() {
        for (_, grammar) in all_grammars() {
            assert!(grammar.validate().is_ok(), "{}", grammar.name());
            assert!(grammar.block_comment().is_some(), "{}", grammar.name());
            assert!(!grammar.extensions().is_empty(), "{}", grammar.name());
        }
    }
}
