//! Layered configuration: defaults, then the TOML file, then the
//! environment, then command line flags.

use serde::Deserialize;
use showcase::config::{is_usable_token, TOKEN_ENV_VARS};
use showcase::{ResolutionStrategy, ShowcaseConfig, DEFAULT_HANDLE};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub handle: Option<String>,
    pub token: Option<String>,
    pub graphql_url: Option<String>,
    pub rest_base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_items: Option<usize>,
    pub strategy: Option<ResolutionStrategy>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

#[derive(Debug)]
pub struct Settings {
    pub config: ShowcaseConfig,
    pub handle: String,
    pub strategy: ResolutionStrategy,
}

impl Settings {
    pub fn resolve(
        file: FileConfig,
        lookup: impl Fn(&str) -> Option<String>,
        token_flag: Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut config = ShowcaseConfig::default();

        if let Some(url) = file.graphql_url {
            config = config.with_graphql_url(url);
        }
        if let Some(url) = file.rest_base_url {
            config = config.with_rest_base_url(url);
        }
        if let Some(user_agent) = file.user_agent {
            config = config.with_user_agent(user_agent);
        }
        if let Some(secs) = file.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(max_items) = file.max_items {
            config = config.with_max_items(max_items);
        }

        let env_token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .find(|value| is_usable_token(value));

        config.token = token_flag
            .filter(|token| is_usable_token(token))
            .or(env_token)
            .or(file.token);

        config.validate().map_err(SettingsError::Invalid)?;

        Ok(Self {
            config,
            handle: file.handle.unwrap_or_else(|| DEFAULT_HANDLE.to_string()),
            strategy: file.strategy.unwrap_or_default(),
        })
    }
}
