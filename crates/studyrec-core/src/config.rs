//! Configuration loader, engine settings and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys in env vars are separated by `__`, e.g. `APP_ENGINE__MIN_SCORE`.
//! Every key is optional; missing ones fall back to `Settings::default()`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, env_name };
        config.validate_for_env()?;
        Ok(config)
    }

    pub fn env_name(&self) -> &str { &self.env_name }

    /// Extracts the full typed settings tree, defaults filled in.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.engine.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self) -> anyhow::Result<()> {
        match self.env_name.as_str() {
            "prod" | "production" => {
                // Production must point at a real catalog, never the built-in sample.
                let settings = self.settings()?;
                if settings.catalog.path.is_none() {
                    return Err(anyhow::anyhow!("catalog.path must be set when RUST_ENV={}", self.env_name));
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// `.csv` or `.json` catalog file; `None` selects the built-in sample.
    pub path: Option<String>,
}

impl CatalogSettings {
    pub fn resolved_path(&self) -> Option<PathBuf> { self.path.as_deref().map(expand_path) }
}

/// Knobs for fitting the vector space and ranking against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Cap on vocabulary size, most frequent terms first. `None` keeps every term.
    pub max_features: Option<usize>,
    /// Shortest n-gram span indexed.
    pub min_n: usize,
    /// Longest n-gram span indexed.
    pub max_n: usize,
    pub stop_words: StopWords,
    pub ngram_stop_words: NgramStopWordPolicy,
    /// Results must score strictly above this to be returned.
    pub min_score: f32,
    pub default_top_n: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_features: Some(1000),
            min_n: 1,
            max_n: 2,
            stop_words: StopWords::default(),
            ngram_stop_words: NgramStopWordPolicy::default(),
            min_score: 0.0,
            default_top_n: 3,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == Some(0) {
            return Err(Error::InvalidConfig("max_features must be positive when set".into()));
        }
        if self.min_n == 0 || self.min_n > self.max_n {
            return Err(Error::InvalidConfig(format!(
                "invalid n-gram range ({}, {}): need 1 <= min_n <= max_n",
                self.min_n, self.max_n
            )));
        }
        if !(0.0..1.0).contains(&self.min_score) {
            return Err(Error::InvalidConfig(format!("min_score must be in [0, 1), got {}", self.min_score)));
        }
        if self.default_top_n == 0 {
            return Err(Error::InvalidConfig("default_top_n must be positive".into()));
        }
        Ok(())
    }
}

/// Stop-word source: a built-in list by name, or an explicit word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopWords {
    Builtin(BuiltinStopWords),
    Custom(Vec<String>),
}

impl Default for StopWords {
    fn default() -> Self { Self::Builtin(BuiltinStopWords::English) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStopWords {
    English,
    None,
}

/// How stop words interact with multi-word terms.
///
/// Unigram stop words are always dropped; this only decides n >= 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NgramStopWordPolicy {
    /// Join over the raw stream; drop the n-gram if any member is a stop word.
    #[default]
    DropIfAny,
    /// Remove stop words from the stream first, then join the survivors.
    Collapse,
    /// Join over the raw stream; drop the n-gram only if every member is a stop word.
    DropIfAll,
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
