//! Configuration file support
//!
//! Loads settings from ~/.codelight.toml (or %USERPROFILE%\.codelight.toml
//! on Windows). Every section is optional.
//!
//! Example:
//! ```toml
//! # language for unregistered extensions
//! default = "config"
//!
//! [extensions]
//! osim = "markup"
//! txt = "plain"
//!
//! [[grammar]]
//! name = "ini"
//! extensions = ["ini"]
//!
//! [[grammar.rule]]
//! pattern = '^\[(\w+)\]'
//! style = "Element"
//! group = 1
//!
//! [[grammar.rule]]
//! pattern = ';.*'
//! style = "Comment"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::syntax::{Grammar, Registry};

/// Configuration settings
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Language name for unregistered extensions
    pub default_language: Option<String>,
    /// Extension to language name overrides, in file order
    pub extensions: Vec<(String, String)>,
    /// Custom grammars
    pub grammars: Vec<Grammar>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".codelight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".codelight.toml"))
        }
    }

    /// Load configuration from the user's config file
    ///
    /// A missing file gives the defaults; a broken one is logged and
    /// ignored.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!(
            "loaded {}: {} extensions, {} grammars",
            path.display(),
            config.extensions.len(),
            config.grammars.len()
        );
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        let mut config = Config::default();

        for (key, value) in &table {
            match key.as_str() {
                "default" => {
                    let name = value
                        .as_str()
                        .ok_or_else(|| Error::Config("`default` must be a string".into()))?;
                    config.default_language = Some(name.to_string());
                }
                "extensions" => {
                    let map = value
                        .as_table()
                        .ok_or_else(|| Error::Config("`extensions` must be a table".into()))?;
                    for (ext, lang) in map {
                        let lang = lang.as_str().ok_or_else(|| {
                            Error::Config(format!("extension `{}` must map to a language name", ext))
                        })?;
                        config.extensions.push((ext.clone(), lang.to_string()));
                    }
                }
                "grammar" => {
                    let grammars = value
                        .as_array()
                        .ok_or_else(|| Error::Config("`grammar` must be an array of tables".into()))?;
                    for grammar in grammars {
                        let grammar = grammar.as_table().ok_or_else(|| {
                            Error::Config("`grammar` must be an array of tables".into())
                        })?;
                        config.grammars.push(Grammar::from_toml(grammar)?);
                    }
                }
                other => warn!("unknown configuration key `{}`", other),
            }
        }

        Ok(config)
    }

    /// Apply this configuration to a registry
    ///
    /// Grammars are registered first so that extension overrides and the
    /// default may name them.
    pub fn apply(&self, registry: &mut Registry) -> Result<()> {
        for grammar in &self.grammars {
            registry.register_grammar(grammar.clone())?;
        }

        for (ext, name) in &self.extensions {
            let lang = registry
                .language_by_name(name)
                .ok_or_else(|| Error::Config(format!("unknown language `{}` for `{}`", name, ext)))?;
            registry.register_extension(ext, lang);
        }

        if let Some(name) = &self.default_language {
            let lang = registry
                .language_by_name(name)
                .ok_or_else(|| Error::Config(format!("unknown default language `{}`", name)))?;
            registry.set_default(lang);
        }

        Ok(())
    }

    /// Apply this configuration, logging a failure instead of returning it
    ///
    /// Matches [`Config::load`], which also ignores a broken file. Entries
    /// applied before the failing one stay in effect. Returns whether
    /// everything applied.
    pub fn apply_lenient(&self, registry: &mut Registry) -> bool {
        match self.apply(registry) {
            Ok(()) => true,
            Err(e) => {
                warn!("configuration only partly applied: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{LanguageId, LineState, StyleId};

    const SAMPLE: &str = r#"
# codelight configuration
default = "plain"

[extensions]
osim = "markup"
ini = "ini"

[[grammar]]
name = "ini"
extensions = ["cfgx"]

[[grammar.rule]]
pattern = '^\[(\w+)\]'
style = "Element"
group = 1
"#;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(SAMPLE).unwrap();
        assert_eq!(config.default_language.as_deref(), Some("plain"));
        assert_eq!(config.extensions.len(), 2);
        assert!(config.extensions.contains(&("osim".to_string(), "markup".to_string())));
        assert_eq!(config.grammars.len(), 1);
        assert_eq!(config.grammars[0].name(), "ini");
    }

    #[test]
    fn test_apply_settings() {
        let config = Config::parse(SAMPLE).unwrap();
        let mut registry = Registry::new();
        config.apply(&mut registry).unwrap();

        let ini = registry.language_by_name("ini").unwrap();
        assert_eq!(registry.resolve("arm.osim"), LanguageId::Markup);
        assert_eq!(registry.resolve("a.ini"), ini);
        assert_eq!(registry.resolve("a.cfgx"), ini);
        assert_eq!(registry.resolve("a.nothing"), LanguageId::Unknown);

        let result = registry.tokenize_line(ini, "[core]", LineState::CODE);
        assert_eq!(result.spans[0].style, StyleId::Element);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").unwrap();
        let mut registry = Registry::new();
        config.apply(&mut registry).unwrap();
        assert_eq!(registry.resolve("x.unknownext"), LanguageId::Config);
    }

    #[test]
    fn test_unknown_language() {
        let config = Config::parse("[extensions]\nfoo = \"cobol\"").unwrap();
        let mut registry = Registry::new();
        assert!(matches!(config.apply(&mut registry), Err(Error::Config(_))));

        let config = Config::parse("default = \"cobol\"").unwrap();
        assert!(matches!(config.apply(&mut registry), Err(Error::Config(_))));
    }

    #[test]
    fn test_apply_lenient_keeps_going() {
        let contents = r#"
[extensions]
foo = "cobol"

[[grammar]]
name = "ini"
extensions = ["cfgx"]

[[grammar.rule]]
pattern = ';.*'
style = "Comment"
"#;
        let config = Config::parse(contents).unwrap();
        let mut registry = Registry::new();
        assert!(!config.apply_lenient(&mut registry));

        // Grammars registered before the bad entry remain usable
        let ini = registry.language_by_name("ini").unwrap();
        assert_eq!(registry.resolve("a.cfgx"), ini);
        assert_eq!(registry.resolve("a.lua"), LanguageId::Script);

        let config = Config::parse(SAMPLE).unwrap();
        assert!(config.apply_lenient(&mut Registry::new()));
    }

    #[test]
    fn test_invalid_grammar_is_reported() {
        let contents = "[[grammar]]\nname = \"bad\"\n[[grammar.rule]]\npattern = \"a*\"\nstyle = \"Value\"";
        assert!(matches!(Config::parse(contents), Err(Error::InvalidGrammar(_))));
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(Config::parse("default = "), Err(Error::Toml(_))));
        assert!(matches!(Config::parse("default = 3"), Err(Error::Config(_))));
        assert!(matches!(Config::parse("extensions = 1"), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = Path::new("/nonexistent/codelight/config.toml");
        assert!(matches!(Config::load_from(path), Err(Error::Io(_))));
    }
}
