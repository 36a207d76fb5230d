//! Grammar definitions for syntax highlighting
//!
//! A [`Grammar`] is an ordered list of rules plus an optional block-comment
//! delimiter pair. It is immutable once built and is shared by every
//! tokenization call for its language.

use log::trace;

use super::matcher;
use super::rules::{HighlightResult, LineState, Pattern, Rule};
use super::style::Span;
use super::tokens::StyleId;
use crate::error::{Error, Result};

/// Start and end delimiters of a comment that may span lines
#[derive(Debug, Clone)]
pub struct BlockComment {
    /// Pattern that opens the comment
    pub start: Pattern,
    /// Pattern that closes the comment
    pub end: Pattern,
}

/// A complete grammar for one language
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    extensions: Vec<String>,
    rules: Vec<Rule>,
    block_comment: Option<BlockComment>,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            rules: Vec::new(),
            block_comment: None,
        }
    }

    /// Language name (e.g. "markup")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File extensions this grammar claims, lower case
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Rules in application order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Block-comment delimiters, if the language has them
    pub fn block_comment(&self) -> Option<&BlockComment> {
        self.block_comment.as_ref()
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.trim_start_matches('.').to_lowercase());
    }

    /// Append a rule; rules added later paint over earlier ones
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Compile and append a rule styling whole matches
    pub fn rule(&mut self, pattern: &str, style: StyleId) -> Result<()> {
        self.add_rule(Rule::new(pattern, style)?);
        Ok(())
    }

    /// Compile and append a rule styling one capture group
    pub fn group_rule(&mut self, pattern: &str, group: usize, style: StyleId) -> Result<()> {
        self.add_rule(Rule::with_group(pattern, group, style)?);
        Ok(())
    }

    /// Set the block-comment delimiter pair
    pub fn set_block_comment(&mut self, start: &str, end: &str) -> Result<()> {
        self.block_comment = Some(BlockComment {
            start: Pattern::new(start)?,
            end: Pattern::new(end)?,
        });
        Ok(())
    }

    /// Check that this grammar can be registered
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::grammar("grammar has no name"));
        }
        if self.rules.is_empty() {
            return Err(Error::grammar(format!("grammar `{}` has no rules", self.name)));
        }
        Ok(())
    }

    /// Highlight a single line of text
    ///
    /// Takes the line text and the state from the previous line.
    /// Returns spans in painting order and the state for the next line.
    pub fn tokenize_line(&self, text: &str, prev_state: LineState) -> HighlightResult {
        let mut spans = Vec::new();
        self.apply_rules(text, &mut spans);

        let end_state = match &self.block_comment {
            Some(comment) => comment.scan(text, prev_state, &mut spans),
            None => LineState::CODE,
        };

        if end_state != prev_state {
            trace!(
                "{}: {:?} -> {:?} on {:?}",
                self.name,
                prev_state,
                end_state,
                text
            );
        }

        HighlightResult { spans, end_state }
    }

    /// Apply every rule in declaration order, ignoring block comments
    fn apply_rules(&self, text: &str, spans: &mut Vec<Span>) {
        for rule in &self.rules {
            for m in matcher::find_iter(&rule.pattern, text) {
                if let Some(range) = m.styled {
                    if !range.is_empty() {
                        spans.push(Span::new(range.start, range.end, rule.style));
                    }
                }
            }
        }
    }

    /// Build a grammar from a `[[grammar]]` configuration table
    ///
    /// ```toml
    /// name = "ini"
    /// extensions = ["ini"]
    /// comment-start = "/\\*"
    /// comment-end = "\\*/"
    /// [[rule]]
    /// pattern = "(\\w+)\\s*="
    /// style = "Attribute"
    /// group = 1
    /// ```
    pub fn from_toml(table: &toml::Table) -> Result<Self> {
        let name = table
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::grammar("grammar is missing a `name` string"))?;
        let mut grammar = Grammar::new(name);

        if let Some(exts) = table.get("extensions") {
            let exts = exts
                .as_array()
                .ok_or_else(|| Error::grammar(format!("`{}`: `extensions` must be an array", name)))?;
            for ext in exts {
                let ext = ext.as_str().ok_or_else(|| {
                    Error::grammar(format!("`{}`: extensions must be strings", name))
                })?;
                grammar.add_extension(ext);
            }
        }

        let start = table.get("comment-start").and_then(|v| v.as_str());
        let end = table.get("comment-end").and_then(|v| v.as_str());
        match (start, end) {
            (Some(start), Some(end)) => grammar.set_block_comment(start, end)?,
            (None, None) => {}
            _ => {
                return Err(Error::grammar(format!(
                    "`{}`: comment-start and comment-end must be given together",
                    name
                )))
            }
        }

        let rules = table
            .get("rule")
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or(&[]);
        for rule in rules {
            let rule = rule
                .as_table()
                .ok_or_else(|| Error::grammar(format!("`{}`: each rule must be a table", name)))?;
            let pattern = rule
                .get("pattern")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::grammar(format!("`{}`: rule is missing `pattern`", name)))?;
            let style = rule
                .get("style")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::grammar(format!("`{}`: rule is missing `style`", name)))?;
            let style = StyleId::from_name(style)
                .ok_or_else(|| Error::grammar(format!("`{}`: unknown style `{}`", name, style)))?;
            let group = match rule.get("group") {
                Some(v) => v
                    .as_integer()
                    .and_then(|g| usize::try_from(g).ok())
                    .ok_or_else(|| Error::grammar(format!("`{}`: bad rule group", name)))?,
                None => 0,
            };
            grammar.group_rule(pattern, group, style)?;
        }

        grammar.validate()?;
        Ok(grammar)
    }
}

impl BlockComment {
    /// Layer block-comment spans over `spans` and return the next state
    ///
    /// Openers are found with the quote-aware matcher; closers are plain
    /// searches since quotes mean nothing inside a comment.
    fn scan(&self, text: &str, state: LineState, spans: &mut Vec<Span>) -> LineState {
        let mut push = |start: usize, end: usize| {
            if start < end {
                spans.push(Span::new(start, end, StyleId::Comment));
            }
        };

        let mut cursor = 0;
        if state.is_in_comment() {
            // Only openers honor quote parity; closers are plain searches,
            // so `/* say "hi */` closes here.
            match self.end.find_at(text, 0) {
                Some(close) => {
                    push(0, close.whole.end);
                    cursor = close.whole.end;
                }
                None => {
                    push(0, text.len());
                    return LineState::IN_COMMENT;
                }
            }
        }

        while let Some(open) = matcher::find_next(&self.start, text, cursor) {
            // Plain search, as above
            match self.end.find_at(text, open.whole.end) {
                Some(close) => {
                    push(open.whole.start, close.whole.end);
                    cursor = close.whole.end;
                }
                None => {
                    push(open.whole.start, text.len());
                    return LineState::IN_COMMENT;
                }
            }
        }

        LineState::CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_grammar() -> Grammar {
        let mut grammar = Grammar::new("test");
        grammar.add_extension("test");
        grammar.rule(r"\b\d+\b", StyleId::Number).unwrap();
        grammar.rule(r#""[^"]*""#, StyleId::Value).unwrap();
        grammar.rule(r"//.*$", StyleId::Comment).unwrap();
        grammar.set_block_comment(r"/\*", r"\*/").unwrap();
        grammar
    }

    fn comments(result: &HighlightResult) -> Vec<(usize, usize)> {
        result
            .spans
            .iter()
            .filter(|s| s.style == StyleId::Comment)
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_simple_highlighting() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("let x = 42;", LineState::default());

        assert!(result.end_state.is_code());
        assert_eq!(result.spans, vec![Span::new(8, 10, StyleId::Number)]);
    }

    #[test]
    fn test_rules_apply_in_order() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line(r#"1 "2" // x"#, LineState::default());
        let styles: Vec<StyleId> = result.spans.iter().map(|s| s.style).collect();
        assert_eq!(styles, vec![StyleId::Number, StyleId::Value, StyleId::Comment]);
    }

    #[test]
    fn test_block_comment_on_one_line() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("a /* b */ c /* d */", LineState::default());
        assert!(result.end_state.is_code());
        assert_eq!(comments(&result), vec![(2, 9), (12, 19)]);
    }

    #[test]
    fn test_block_comment_opens() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("code /* comment", LineState::default());
        assert!(result.end_state.is_in_comment());
        assert_eq!(comments(&result), vec![(5, 15)]);
    }

    #[test]
    fn test_block_comment_continues() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("still in comment", LineState::IN_COMMENT);
        assert!(result.end_state.is_in_comment());
        assert_eq!(comments(&result), vec![(0, 16)]);
    }

    #[test]
    fn test_block_comment_closes_and_reopens() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("end */ code /* again", LineState::IN_COMMENT);
        assert!(result.end_state.is_in_comment());
        assert_eq!(comments(&result), vec![(0, 6), (12, 20)]);

        let result = grammar.tokenize_line("end */ code", LineState::IN_COMMENT);
        assert!(result.end_state.is_code());
        assert_eq!(comments(&result), vec![(0, 6)]);
    }

    #[test]
    fn test_empty_line_keeps_state() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line("", LineState::IN_COMMENT);
        assert!(result.end_state.is_in_comment());
        assert!(result.spans.is_empty());

        let result = grammar.tokenize_line("", LineState::CODE);
        assert!(result.end_state.is_code());
    }

    #[test]
    fn test_comment_opener_inside_string_ignored() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line(r#"x = "/* not a comment""#, LineState::CODE);
        assert!(result.end_state.is_code());
        assert!(comments(&result).is_empty());
    }

    #[test]
    fn test_closer_is_not_quote_aware() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line(r#"say "hi */ x"#, LineState::IN_COMMENT);
        assert!(result.end_state.is_code());
        assert_eq!(comments(&result), vec![(0, 10)]);
    }

    #[test]
    fn test_closer_after_opener_ignores_quotes() {
        let grammar = create_test_grammar();
        let result = grammar.tokenize_line(r#"/* "a */ b"#, LineState::CODE);
        assert!(result.end_state.is_code());
        assert_eq!(comments(&result), vec![(0, 8)]);
    }

    #[test]
    fn test_spans_stay_within_line() {
        let grammar = create_test_grammar();
        for (line, state) in [
            ("/* 1 2 3", LineState::CODE),
            ("x */ 4 // y", LineState::IN_COMMENT),
            ("\"5\" /**/ 6", LineState::CODE),
            ("é /* ü", LineState::CODE),
        ] {
            let result = grammar.tokenize_line(line, state);
            for span in &result.spans {
                assert!(span.start < span.end && span.end <= line.len(), "{:?}", span);
                assert!(line.is_char_boundary(span.start) && line.is_char_boundary(span.end));
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let grammar = create_test_grammar();
        for state in [LineState::CODE, LineState::IN_COMMENT] {
            let a = grammar.tokenize_line(r#"1 */ "x" /* 2"#, state);
            let b = grammar.tokenize_line(r#"1 */ "x" /* 2"#, state);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_grammar_without_block_comment() {
        let mut grammar = Grammar::new("plain");
        grammar.rule(r"#.*", StyleId::Comment).unwrap();
        let result = grammar.tokenize_line("a # b /*", LineState::CODE);
        assert!(result.end_state.is_code());
        assert_eq!(result.spans, vec![Span::new(2, 8, StyleId::Comment)]);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(Grammar::new("empty").validate(), Err(Error::InvalidGrammar(_))));
        assert!(matches!(Grammar::new(" ").validate(), Err(Error::InvalidGrammar(_))));
        assert!(create_test_grammar().validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Table = r#"
name = "ini"
extensions = ["INI", ".cfg"]
comment-start = "/\\*"
comment-end = "\\*/"

[[rule]]
pattern = "(\\w+)\\s*="
style = "Attribute"
group = 1

[[rule]]
pattern = "\\d+"
style = "number"
"#
        .parse()
        .unwrap();

        let grammar = Grammar::from_toml(&table).unwrap();
        assert_eq!(grammar.name(), "ini");
        assert_eq!(grammar.extensions(), &["ini".to_string(), "cfg".to_string()]);
        assert_eq!(grammar.rules().len(), 2);
        assert!(grammar.block_comment().is_some());

        let result = grammar.tokenize_line("size = 10 /* px", LineState::CODE);
        assert_eq!(result.spans[0], Span::new(0, 4, StyleId::Attribute));
        assert_eq!(result.spans[1], Span::new(7, 9, StyleId::Number));
        assert!(result.end_state.is_in_comment());
    }

    #[test]
    fn test_from_toml_rejects_bad_grammars() {
        let cases = [
            // no rules
            "name = \"a\"",
            // lone comment delimiter
            "name = \"b\"\ncomment-start = \"<<\"\n[[rule]]\npattern = \"x\"\nstyle = \"Value\"",
            // empty-matching pattern
            "name = \"c\"\n[[rule]]\npattern = \"x*\"\nstyle = \"Value\"",
            // unknown style
            "name = \"d\"\n[[rule]]\npattern = \"x\"\nstyle = \"Bogus\"",
            // missing name
            "[[rule]]\npattern = \"x\"\nstyle = \"Value\"",
        ];
        for case in cases {
            let table: toml::Table = case.parse().unwrap();
            assert!(
                matches!(Grammar::from_toml(&table), Err(Error::InvalidGrammar(_))),
                "accepted: {}",
                case
            );
        }
    }
}
