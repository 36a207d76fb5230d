//! Markup (XML) grammar

use super::{add, add_group, block_comment};
use crate::syntax::grammar::Grammar;
use crate::syntax::tokens::StyleId;

const NAME: &str = r"[A-Za-z_][\w:.\-]*";

/// Create the markup grammar
///
/// The element rule comes before the attribute rule so that attribute
/// names inside a tag paint over the element coloring.
pub fn markup_grammar() -> Grammar {
    let mut grammar = Grammar::new("markup");
    for ext in ["xml", "html", "htm", "svg", "xsd", "osim"] {
        grammar.add_extension(ext);
    }

    // Element names after `<`, `</` or `<?`
    add_group(&mut grammar, &format!(r"<\s*[/?]?\s*({})", NAME), 1, StyleId::Element);

    // Attribute names before `=`
    add_group(&mut grammar, &format!(r"({})\s*=", NAME), 1, StyleId::Attribute);

    // Quoted attribute values
    add(&mut grammar, r#""[^"]*""#, StyleId::Value);

    // Tag delimiters
    add(&mut grammar, r"<\?|\?>|</|/>|<|>", StyleId::Operator);

    // Numbers
    add(&mut grammar, r"[-+]?\b\d+(?:\.\d+)?(?:[eE][-+]?\d+)?\b", StyleId::Number);

    // Comments closed on the same line
    add(&mut grammar, r"<!--.*?-->", StyleId::Comment);

    block_comment(&mut grammar, r"<!--", r"-->");

    grammar
}
