use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Token value shipped in sample `.env` files; treated as "not configured".
pub const PLACEHOLDER_TOKEN: &str = "your_github_token_here";
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "REACT_APP_GITHUB_TOKEN"];
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_REST_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_HANDLE: &str = "anixane";
/// GitHub allows at most six pinned items per profile.
pub const MAX_SHOWCASED: usize = 6;

/// Whether `value` can be sent as an access token. Blank values and the
/// placeholder are rejected.
pub fn is_usable_token(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != PLACEHOLDER_TOKEN
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub graphql_url: String,
    pub rest_base_url: String,
    pub user_agent: String,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub max_items: usize,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            token: None,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            rest_base_url: DEFAULT_REST_BASE_URL.to_string(),
            user_agent: format!("showcase/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(10),
            max_items: MAX_SHOWCASED,
        }
    }
}

impl ShowcaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the token taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ShowcaseConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .find(|value| is_usable_token(value));

        Self {
            token,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    pub fn with_rest_base_url(mut self, url: impl Into<String>) -> Self {
        self.rest_base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// The usable access token, if one is configured.
    ///
    /// Absent, blank and placeholder tokens all count as "not configured".
    pub fn credential(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|token| is_usable_token(token))
            .map(str::trim)
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    pub fn validate(&self) -> Result<(), String> {
        for (label, url) in [
            ("GraphQL URL", &self.graphql_url),
            ("REST base URL", &self.rest_base_url),
        ] {
            if url.is_empty() {
                return Err(format!("{} cannot be empty", label));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{} must start with http:// or https://", label));
            }
        }

        if self.user_agent.trim().is_empty() {
            return Err("User agent cannot be empty".to_string());
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than 0".to_string());
        }

        if !(1..=MAX_SHOWCASED).contains(&self.max_items) {
            return Err(format!(
                "Max items must be between 1 and {}",
                MAX_SHOWCASED
            ));
        }

        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
