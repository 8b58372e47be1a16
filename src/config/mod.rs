// src/config/mod.rs
// Startup configuration. Built once in main and passed down; nothing global.

pub mod secrets;

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::prompt::{PromptTemplate, TemplateError};

pub use secrets::{SecretStore, DEFAULT_SECRETS_FILE};

/// Name of the credential in every secret source.
pub const API_KEY_SECRET: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not set in the environment or the secrets file")]
    MissingSecret { name: String },

    #[error("secrets file {} could not be read: {source}", path.display())]
    SecretStoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secrets file {} is malformed: {reason}", path.display())]
    SecretStoreMalformed { path: PathBuf, reason: String },

    #[error("prompt template {} is invalid: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    Temperature(f32),
}

impl ConfigError {
    /// Headline shown to the operator before the process exits.
    pub fn banner(&self) -> &'static str {
        match self {
            ConfigError::MissingSecret { .. }
            | ConfigError::SecretStoreUnreadable { .. }
            | ConfigError::SecretStoreMalformed { .. } => "⚠️ 尚未設定 API Key！請在 secrets 設定 GEMINI_API_KEY。",
            ConfigError::Template { .. } | ConfigError::Temperature(_) => "⚠️ 設定錯誤，服務未啟動。",
        }
    }
}

/// Everything that isn't a secret, as collected from flags and environment.
#[derive(Debug, Clone)]
pub struct ConfigOptions {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub api_base_url: String,
    pub temperature: Option<f32>,
    pub template: Option<PathBuf>,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            temperature: None,
            template: None,
        }
    }
}

/// A fully validated configuration. Holding one means the process can serve.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub temperature: Option<f32>,
    pub host: String,
    pub port: u16,
    pub template: PromptTemplate,
}

impl AppConfig {
    pub fn load(options: ConfigOptions, store: &SecretStore) -> Result<Self, ConfigError> {
        Self::load_with(options, store, |key| std::env::var(key).ok())
    }

    /// As [`AppConfig::load`], with `env` standing in for the process environment.
    pub fn load_with<F>(options: ConfigOptions, store: &SecretStore, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = store.get_with(API_KEY_SECRET, env)?;

        if let Some(t) = options.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Temperature(t));
            }
        }

        let template = match &options.template {
            Some(path) => {
                let template = PromptTemplate::from_file(path).map_err(|source| ConfigError::Template {
                    path: path.clone(),
                    source,
                })?;
                info!("Using prompt template from {}", path.display());
                template
            }
            None => PromptTemplate::default(),
        };

        Ok(Self {
            api_key,
            model: options.model,
            api_base_url: options.api_base_url.trim_end_matches('/').to_string(),
            temperature: options.temperature,
            host: options.host,
            port: options.port,
            template,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("temperature", &self.temperature)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}
