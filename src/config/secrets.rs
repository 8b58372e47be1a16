// src/config/secrets.rs
//! Secret lookup: process environment first, then a TOML secrets file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ConfigError;

/// Where the hosting environment drops secrets when they aren't exported.
pub const DEFAULT_SECRETS_FILE: &str = ".streamlit/secrets.toml";

/// Read-only view over the places a credential may come from.
#[derive(Debug, Clone)]
pub struct SecretStore {
    file: Option<PathBuf>,
}

impl SecretStore {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    /// Only the process environment.
    pub fn env_only() -> Self {
        Self { file: None }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Resolve `name` from the real process environment, then the file.
    pub fn get(&self, name: &str) -> Result<String, ConfigError> {
        self.get_with(name, |key| std::env::var(key).ok())
    }

    /// Resolve `name` using `env` in place of the process environment.
    pub fn get_with<F>(&self, name: &str, env: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env(name).and_then(non_blank) {
            debug!("secret {} resolved from environment", name);
            return Ok(value);
        }

        if let Some(path) = &self.file {
            if let Some(value) = read_from_file(path, name)? {
                debug!("secret {} resolved from {}", name, path.display());
                return Ok(value);
            }
        }

        Err(ConfigError::MissingSecret { name: name.to_string() })
    }
}

/// `Ok(None)` when the file doesn't exist or doesn't define `name`.
fn read_from_file(path: &Path, name: &str) -> Result<Option<String>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::SecretStoreUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| {
        ConfigError::SecretStoreMalformed {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        }
    })?;

    match table.get(name) {
        None => Ok(None),
        Some(toml::Value::String(value)) => Ok(non_blank(value.clone())),
        Some(other) => Err(ConfigError::SecretStoreMalformed {
            path: path.to_path_buf(),
            reason: format!("{} must be a string, found {}", name, other.type_str()),
        }),
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
