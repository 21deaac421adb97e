//! # casegen-config
//!
//! Layered configuration loading for casegen using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CASEGEN_*` prefix, `__` as separator)
//! 2. `OPENAI_API_KEY` (alias for `llm.api_key`)
//! 3. Project-level `casegen.toml`
//! 4. User-level `~/.config/casegen/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CASEGEN_LLM__API_KEY` -> `llm.api_key`,
//! `CASEGEN_CORPUS__PATH` -> `corpus.path`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use casegen_config::CasegenConfig;
//!
//! let config = CasegenConfig::load_with_dotenv().expect("config");
//!
//! if !config.llm.is_configured() {
//!     eprintln!("no api key: every requirement will get a fallback test case");
//! }
//! ```

mod corpus;
mod embeddings;
mod error;
mod general;
mod llm;

pub use corpus::CorpusConfig;
pub use embeddings::EmbeddingsConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::LlmConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name, resolved against the current directory.
pub const LOCAL_CONFIG_FILE: &str = "casegen.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CasegenConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CasegenConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::raw().only(&["OPENAI_API_KEY"]).map(|_| "llm.api_key".into()))
            .merge(Env::prefixed("CASEGEN_").split("__"))
    }

    /// Range checks that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.concurrency".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".into(),
                reason: format!("{} is outside 0.0..=2.0", self.llm.temperature),
            });
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Required settings that are absent. The pipeline still runs without
    /// them, in degraded form.
    #[must_use]
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.llm.is_configured() {
            missing.push("llm.api_key");
        }
        missing
    }

    /// Copy safe to print.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            llm: self.llm.redacted(),
            ..self.clone()
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("casegen").join("config.toml"))
    }
}
