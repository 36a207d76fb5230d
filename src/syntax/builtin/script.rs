//! Scripting-language (Lua) grammar

use super::{add, add_group, block_comment};
use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::StyleId;

const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Create the scripting grammar
pub fn script_grammar() -> Grammar {
    let mut grammar = Grammar::new("script");
    grammar.add_extension("lua");

    add(&mut grammar, &format!(r"\b(?:{})\b", KEYWORDS.join("|")), StyleId::Keyword);

    // Numbers: hex, decimal, float
    add(
        &mut grammar,
        r"\b0[xX][0-9a-fA-F]+\b|\b\d+(?:\.\d+)?(?:[eE][-+]?\d+)?\b",
        StyleId::Number,
    );

    // Operators and punctuation. A lone `-` is styled through group 1; a
    // `--` run matches the second branch, styles nothing and is skipped whole
    add(&mut grammar, r"[+*/%^#&|~<>=(){}\[\];:,.]+", StyleId::Operator);
    add_group(&mut grammar, r"(-)(?:[^-]|$)|--+", 1, StyleId::Operator);

    // Strings
    add(&mut grammar, r#""[^"]*""#, StyleId::Value);
    add(&mut grammar, r"'[^']*'", StyleId::Value);
    add(&mut grammar, r"\[\[.*?\]\]", StyleId::Value);

    // `--` line comments, but not the `--[[` block opener
    add(&mut grammar, r"--(?:\[?$|\[?[^\[].*)", StyleId::Comment);

    block_comment(&mut grammar, r"--\[\[", r"\]\]");

    grammar
}
