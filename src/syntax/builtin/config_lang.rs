//! Brace/key-value configuration grammar (zml, scone)

use super::{add, add_group, block_comment};
use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::StyleId;

/// Create the configuration grammar
pub fn config_grammar() -> Grammar {
    let mut grammar = Grammar::new("config");
    for ext in ["zml", "scone", "cfg", "conf"] {
        grammar.add_extension(ext);
    }

    // Section openers: `name {`, `name = [`
    add_group(&mut grammar, r"(\w+)\s*=?\s*[\{\[]", 1, StyleId::Element);

    // Keys: `key = value` and `key: value`
    add_group(&mut grammar, r"(\w+)\s*=", 1, StyleId::Attribute);
    add_group(&mut grammar, r"(\w+):(?:\s|$)", 1, StyleId::Attribute);

    // Strings
    add(&mut grammar, r#""[^"]*""#, StyleId::Value);

    // Specials: `#name` and `<< ... >>`
    add(&mut grammar, r"#\w+", StyleId::Special);
    add(&mut grammar, r"<<.*?>>", StyleId::Special);

    // Include marker
    add(&mut grammar, r"<--(?:\s|$)", StyleId::Macro);

    // Operators
    add(&mut grammar, r"[\{\}\[\]=:]", StyleId::Operator);

    // Numbers
    add(&mut grammar, r"[-+]?\b\d+(?:\.\d+)?(?:[eE][-+]?\d+)?\b", StyleId::Number);

    // Macros: `@name`, `$name`
    add(&mut grammar, r"[@\$]\w+", StyleId::Macro);

    // Line comments: `;`, `//` and `# `
    add(&mut grammar, r"(?:;|//|#(?:\s|$)).*", StyleId::Comment);

    block_comment(&mut grammar, r"/\*", r"\*/");

    grammar
}
