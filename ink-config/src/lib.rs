//! Shared configuration loader for the ink toolchain.
//!
//! `defaults/ink.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`InkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use ink_babel::formats::markdown::{Converter, MarkdownOptions, RuleSet};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/ink.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "ink.toml";

/// Top-level configuration consumed by ink applications.
#[derive(Debug, Clone, Deserialize)]
pub struct InkConfig {
    pub markdown: MarkdownConfig,
    pub convert: ConvertConfig,
}

/// Mirrors the knobs exposed by the Markdown converter.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_marker: char,
    pub strong_delimiter: String,
    pub em_delimiter: String,
    pub fence: String,
    pub hr: String,
    pub line_break: String,
    pub disabled_rules: Vec<String>,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            bullet_marker: config.bullet_marker,
            strong_delimiter: config.strong_delimiter.clone(),
            em_delimiter: config.em_delimiter.clone(),
            fence: config.fence.clone(),
            hr: config.hr.clone(),
            line_break: config.line_break.clone(),
        }
    }
}

impl MarkdownConfig {
    /// The standard rules minus `disabled_rules`. Unknown names are an error
    /// so that a typo does not silently keep a rule active.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let mut rules = RuleSet::standard();
        for name in &self.disabled_rules {
            if !rules.iter().any(|rule| rule.name() == name.as_str()) {
                return Err(ConfigError::Message(format!(
                    "unknown markdown rule '{name}' in disabled_rules (known: {})",
                    RuleSet::standard().names().join(", ")
                )));
            }
            rules = rules.without(name);
        }
        Ok(rules)
    }

    /// A converter built from these settings.
    pub fn converter(&self) -> Result<Converter, ConfigError> {
        Ok(Converter::new(self.rule_set()?, self.into()))
    }
}

/// Defaults for the convert and export commands.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Source format used when it cannot be detected from the file name.
    pub default_from: String,
    /// Export file name used when no output is given.
    pub default_output: String,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<InkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<InkConfig, ConfigError> {
    Loader::new().build()
}
