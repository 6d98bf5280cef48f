//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (nested keys separated by `__`, e.g.
//! `APP_LEMMATIZE__BATCH_SIZE=100`). The merged result is extracted into a
//! [`PipelineConfig`] that callers pass explicitly into each component.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::corpus::DecodePolicy;
use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "en_core_web_lg";
pub const DEFAULT_BATCH_SIZE: usize = 50;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Self::defaults().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.pipeline()?;
        Ok(config)
    }

    /// Figment seeded with [`PipelineConfig::default`] and nothing else.
    pub fn defaults() -> Figment {
        Figment::from(Serialized::defaults(PipelineConfig::default()))
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Typed view of the whole configuration, validated.
    pub fn pipeline(&self) -> Result<PipelineConfig> {
        let cfg: PipelineConfig = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub paths: PathsConfig,
    pub corpus: CorpusConfig,
    pub lemmatize: LemmatizeConfig,
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.lemmatize.batch_size == 0 {
            return Err(Error::InvalidConfig("lemmatize.batch_size must be at least 1".into()));
        }
        if self.lemmatize.model.trim().is_empty() {
            return Err(Error::InvalidConfig("lemmatize.model must not be empty".into()));
        }
        Ok(())
    }
}

/// Project layout. Relative entries resolve against `project_root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub project_root: String,
    pub data_dir: String,
    pub raw_text_dir: String,
    pub processed_dir: String,
    pub model_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            project_root: ".".to_string(),
            data_dir: "data".to_string(),
            raw_text_dir: "data/raw/constitutions".to_string(),
            processed_dir: "data/processed".to_string(),
            model_dir: "models".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn root(&self) -> PathBuf {
        expand_path(&self.project_root)
    }

    pub fn data_dir(&self) -> PathBuf {
        resolve_with_base(&self.root(), &self.data_dir)
    }

    pub fn raw_text_dir(&self) -> PathBuf {
        resolve_with_base(&self.root(), &self.raw_text_dir)
    }

    pub fn processed_dir(&self) -> PathBuf {
        resolve_with_base(&self.root(), &self.processed_dir)
    }

    pub fn model_dir(&self) -> PathBuf {
        resolve_with_base(&self.root(), &self.model_dir)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub decode: DecodePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizeConfig {
    pub model: String,
    pub batch_size: usize,
    /// Version the model's `meta.json` is expected to carry; a mismatch is
    /// only warned about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_model_version: Option<String>,
}

impl Default for LemmatizeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            expected_model_version: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_project_layout() {
        let cfg = Config::from_figment(Config::defaults()).pipeline().expect("defaults");
        assert_eq!(cfg.lemmatize.model, "en_core_web_lg");
        assert_eq!(cfg.lemmatize.batch_size, 50);
        assert_eq!(cfg.corpus.decode, DecodePolicy::Lossy);
        assert_eq!(cfg.paths.raw_text_dir(), PathBuf::from("./data/raw/constitutions"));
        assert_eq!(cfg.paths.processed_dir(), PathBuf::from("./data/processed"));
    }

    #[test]
    fn toml_overrides_are_merged_over_defaults() {
        let figment = Config::defaults().merge(Toml::string(
            r#"
            [paths]
            project_root = "/srv/entrench"

            [corpus]
            decode = "strict"

            [lemmatize]
            batch_size = 8
            expected_model_version = "3.7.1"
            "#,
        ));
        let config = Config::from_figment(figment);
        let cfg = config.pipeline().expect("merged");
        assert_eq!(cfg.corpus.decode, DecodePolicy::Strict);
        assert_eq!(cfg.lemmatize.batch_size, 8);
        assert_eq!(cfg.lemmatize.model, DEFAULT_MODEL, "untouched keys keep defaults");
        assert_eq!(cfg.lemmatize.expected_model_version.as_deref(), Some("3.7.1"));
        assert_eq!(cfg.paths.data_dir(), PathBuf::from("/srv/entrench/data"));

        let size: usize = config.get("lemmatize.batch_size").expect("get");
        assert_eq!(size, 8);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let figment = Config::defaults().merge(Toml::string("[lemmatize]\nbatch_size = 0"));
        let err = Config::from_figment(figment).pipeline().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn absolute_paths_ignore_base() {
        let p = resolve_with_base(Path::new("/base"), "/abs/dir");
        assert_eq!(p, PathBuf::from("/abs/dir"));
        let p = resolve_with_base(Path::new("/base"), "rel/dir");
        assert_eq!(p, PathBuf::from("/base/rel/dir"));
    }
}
