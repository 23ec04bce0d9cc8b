//! Configuration loading
//!
//! `defaults/scoop.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`ScoopConfig`].

use crate::scoop::grammar::GrammarLayer;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/scoop.default.toml");

/// Top-level configuration consumed by scoop applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoopConfig {
    pub lexer: LexerConfig,
    pub grammar: GrammarConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexerConfig {
    pub capture_frontmatter: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            capture_frontmatter: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    pub layer: GrammarLayer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. a snippet passed on the command line.
    pub fn with_toml(mut self, text: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(text, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ScoopConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ScoopConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.lexer.capture_frontmatter);
        assert_eq!(config.grammar.layer, GrammarLayer::Base);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("grammar.layer", "named-arguments")
            .expect("override to apply")
            .set_override("lexer.capture_frontmatter", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.grammar.layer, GrammarLayer::NamedArguments);
        assert!(!config.lexer.capture_frontmatter);
    }

    #[test]
    fn layers_toml_text() {
        let config = Loader::new()
            .with_toml("[output]\nformat = \"json\"\n")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.grammar.layer, GrammarLayer::Base);
    }

    #[test]
    fn rejects_unknown_layer() {
        let result = Loader::new()
            .set_override("grammar.layer", "nonsense")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
