//! Language registry
//!
//! Maps file extensions to languages and owns the grammars added at
//! runtime. Reads take `&self` and may run on any number of threads;
//! registration takes `&mut self`, so sharing a registry that is still
//! being extended needs a lock (e.g. `RwLock<Registry>`).

use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::builtin;
use super::grammar::Grammar;
use super::rules::{HighlightResult, LineState};
use crate::error::{Error, Result};

/// Identifies the grammar used for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// XML-style markup
    Markup,
    /// Brace/key-value configuration files
    Config,
    /// The scripting language (Lua)
    Script,
    /// A grammar registered at runtime
    Custom(u16),
    /// No grammar: lines get no spans
    Unknown,
}

impl LanguageId {
    /// Look up a built-in language by name or alias
    pub fn from_builtin_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "markup" | "xml" => Some(LanguageId::Markup),
            "config" | "zml" | "scone" => Some(LanguageId::Config),
            "script" | "lua" => Some(LanguageId::Script),
            "unknown" | "plain" | "none" => Some(LanguageId::Unknown),
            _ => None,
        }
    }
}

/// Extension table and custom grammars
#[derive(Debug, Clone)]
pub struct Registry {
    /// Lower-case extension to language mapping
    extensions: HashMap<String, LanguageId>,
    /// Grammars registered at runtime, indexed by `LanguageId::Custom`
    custom: Vec<Grammar>,
    /// Language for extensions that are not in the table
    default: LanguageId,
}

impl Registry {
    /// Create a registry seeded with the built-in languages
    ///
    /// Unknown extensions resolve to [`LanguageId::Config`], the
    /// historical default; see [`Registry::set_default`].
    pub fn new() -> Self {
        let mut registry = Self {
            extensions: HashMap::new(),
            custom: Vec::new(),
            default: LanguageId::Config,
        };

        for (id, grammar) in builtin::all_grammars() {
            for ext in grammar.extensions() {
                registry.extensions.insert(ext.clone(), id);
            }
        }

        registry
    }

    /// Map an extension to a language, replacing any previous mapping
    ///
    /// A leading `.` is ignored and the extension is matched without
    /// regard to case.
    pub fn register_extension(&mut self, ext: &str, lang: LanguageId) {
        let ext = normalize_extension(ext);
        debug!("extension `{}` -> {:?}", ext, lang);
        self.extensions.insert(ext, lang);
    }

    /// Set the language returned for unregistered extensions
    pub fn set_default(&mut self, lang: LanguageId) {
        self.default = lang;
    }

    /// Language returned for unregistered extensions
    pub fn default_language(&self) -> LanguageId {
        self.default
    }

    /// Resolve a file name to a language
    ///
    /// The extension is the text after the last `.` of the final path
    /// component. Names without an extension, and extensions that are not
    /// registered, resolve to [`Registry::default_language`].
    pub fn resolve(&self, filename: &str) -> LanguageId {
        let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
        name.rsplit_once('.')
            .and_then(|(_, ext)| self.extensions.get(&ext.to_lowercase()))
            .copied()
            .unwrap_or(self.default)
    }

    /// Resolve a path to a language
    pub fn resolve_path(&self, path: &Path) -> LanguageId {
        match path.file_name() {
            Some(name) => self.resolve(&name.to_string_lossy()),
            None => self.default,
        }
    }

    /// Validate and add a custom grammar, registering its extensions
    ///
    /// A grammar with the name of an earlier custom grammar (ignoring case)
    /// replaces it and keeps its id. Built-in names are reserved.
    pub fn register_grammar(&mut self, grammar: Grammar) -> Result<LanguageId> {
        grammar.validate()?;
        if LanguageId::from_builtin_name(grammar.name()).is_some() {
            return Err(Error::grammar(format!(
                "`{}` is the name of a built-in language",
                grammar.name()
            )));
        }

        let existing = self
            .custom
            .iter()
            .position(|g| g.name().eq_ignore_ascii_case(grammar.name()));
        let index = existing.unwrap_or(self.custom.len());
        let id = match u16::try_from(index) {
            Ok(index) => LanguageId::Custom(index),
            Err(_) => return Err(Error::grammar("too many custom grammars")),
        };

        for ext in grammar.extensions() {
            self.register_extension(ext, id);
        }
        debug!(
            "grammar `{}` registered as {:?} with {} rules",
            grammar.name(),
            id,
            grammar.rules().len()
        );

        match existing {
            Some(index) => self.custom[index] = grammar,
            None => self.custom.push(grammar),
        }

        Ok(id)
    }

    /// Get the grammar for a language
    pub fn grammar(&self, id: LanguageId) -> Option<&Grammar> {
        match id {
            LanguageId::Custom(index) => self.custom.get(usize::from(index)),
            id => builtin::grammar(id),
        }
    }

    /// Find a language by its grammar name
    pub fn language_by_name(&self, name: &str) -> Option<LanguageId> {
        LanguageId::from_builtin_name(name).or_else(|| {
            self.custom
                .iter()
                .position(|g| g.name().eq_ignore_ascii_case(name))
                .map(|index| LanguageId::Custom(index as u16))
        })
    }

    /// List available grammar names
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = builtin::all_grammars()
            .into_iter()
            .map(|(_, g)| g.name())
            .chain(self.custom.iter().map(|g| g.name()))
            .collect();
        names.sort();
        names
    }

    /// Tokenize one line with the grammar of `lang`
    ///
    /// Languages without a grammar produce no spans and a code state.
    pub fn tokenize_line(&self, lang: LanguageId, line: &str, state: LineState) -> HighlightResult {
        match self.grammar(lang) {
            Some(grammar) => grammar.tokenize_line(line, state),
            None => HighlightResult {
                spans: Vec::new(),
                end_state: LineState::CODE,
            },
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
