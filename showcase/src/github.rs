use crate::config::ShowcaseConfig;
use crate::provider::{RepositoryProvider, ShowcaseError, ShowcaseResult};
use crate::types::{parse_records, ParseOutcome, RecordShape, RepositoryDescriptor};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};

const PINNED_REPOSITORIES_QUERY: &str = r#"
query PinnedRepositories($login: String!, $first: Int!) {
  user(login: $login) {
    pinnedItems(first: $first, types: REPOSITORY) {
      nodes {
        ... on Repository {
          name
          description
          url
          stargazerCount
          forkCount
          primaryLanguage {
            name
            color
          }
          diskUsage
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: PinnedVariables<'a>,
}

#[derive(Debug, Serialize)]
struct PinnedVariables<'a> {
    login: &'a str,
    first: usize,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PinnedData>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PinnedData {
    user: Option<PinnedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PinnedUser {
    pinned_items: Option<PinnedItems>,
}

#[derive(Debug, Deserialize)]
struct PinnedItems {
    #[serde(default)]
    nodes: Vec<Value>,
}

/// GitHub-backed repository provider.
///
/// Pinned items come from the GraphQL API and need a token; the star-ranked
/// listing uses the public REST API and sends the token only when one is set.
pub struct GitHubProvider {
    client: reqwest::Client,
    config: ShowcaseConfig,
}

impl GitHubProvider {
    pub fn new(config: ShowcaseConfig) -> ShowcaseResult<Self> {
        config
            .validate()
            .map_err(|message| ShowcaseError::InvalidConfig { message })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ShowcaseError::Unknown {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn with_default_config() -> ShowcaseResult<Self> {
        Self::new(ShowcaseConfig::from_env())
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    fn check_login(login: &str) -> ShowcaseResult<&str> {
        let login = login.trim();
        let valid = !login.is_empty()
            && login
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ShowcaseError::UserNotFound {
                login: login.to_string(),
            });
        }
        Ok(login)
    }

    fn status_error(status: reqwest::StatusCode, body: String) -> ShowcaseError {
        match status.as_u16() {
            401 => ShowcaseError::Authentication,
            403 if body.to_lowercase().contains("rate limit") => ShowcaseError::RateLimit,
            403 => ShowcaseError::Authentication,
            429 => ShowcaseError::RateLimit,
            code => ShowcaseError::Status { status: code, body },
        }
    }

    async fn read_body(response: reqwest::Response) -> ShowcaseResult<Vec<u8>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }
        Ok(response.bytes().await?.to_vec())
    }

    fn collect_records(
        &self,
        shape: RecordShape,
        login: &str,
        raw: &[Value],
    ) -> Vec<RepositoryDescriptor> {
        parse_records(shape, login, raw)
            .into_iter()
            .filter_map(|outcome| match outcome {
                ParseOutcome::Parsed(descriptor) => Some(descriptor),
                ParseOutcome::Rejected { index, reason } => {
                    warn!(index, %reason, "Skipping malformed repository record");
                    None
                }
            })
            .take(self.config.max_items)
            .collect()
    }

    fn graphql_failure(login: &str, errors: Vec<GraphQlErrorEntry>) -> ShowcaseError {
        if errors
            .iter()
            .any(|e| e.error_type.as_deref() == Some("NOT_FOUND"))
        {
            return ShowcaseError::UserNotFound {
                login: login.to_string(),
            };
        }
        ShowcaseError::GraphQl {
            messages: errors.into_iter().map(|e| e.message).collect(),
        }
    }
}

#[async_trait]
impl RepositoryProvider for GitHubProvider {
    async fn pinned_repositories(&self, login: &str) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
        let token = self
            .config
            .credential()
            .ok_or(ShowcaseError::Authentication)?;
        let login = Self::check_login(login)?;

        let request = GraphQlRequest {
            query: PINNED_REPOSITORIES_QUERY,
            variables: PinnedVariables {
                login,
                first: self.config.max_items,
            },
        };

        debug!("Requesting pinned repositories for {}", login);
        let start = Instant::now();

        let response = self
            .client
            .post(&self.config.graphql_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let payload: GraphQlResponse = serde_json::from_slice(&body)?;

        let data = match payload.data {
            Some(data) => data,
            None if !payload.errors.is_empty() => {
                return Err(Self::graphql_failure(login, payload.errors));
            }
            None => {
                return Err(ShowcaseError::GraphQl {
                    messages: vec!["response carried neither data nor errors".to_string()],
                });
            }
        };

        for entry in &payload.errors {
            debug!(
                error_type = entry.error_type.as_deref().unwrap_or("unknown"),
                "GraphQL reported: {}",
                entry.message
            );
        }

        // A missing user yields no pinned items rather than a failure.
        let nodes = data
            .user
            .and_then(|user| user.pinned_items)
            .map(|p| p.nodes)
            .unwrap_or_default();
        let repositories = self.collect_records(RecordShape::Pinned, login, &nodes);

        debug!(
            "Received {} pinned repositories in {:?}",
            repositories.len(),
            start.elapsed()
        );

        Ok(repositories)
    }

    async fn top_starred_repositories(
        &self,
        login: &str,
    ) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
        let login = Self::check_login(login)?;
        let url = format!(
            "{}/users/{}/repos",
            self.config.rest_base_url.trim_end_matches('/'),
            login
        );

        debug!("Requesting top starred repositories for {}", login);

        let mut request = self.client.get(&url).query(&[
            ("sort", "stars".to_string()),
            ("per_page", self.config.max_items.to_string()),
        ]);
        if let Some(token) = self.config.credential() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body = Self::read_body(response).await?;
        let items: Vec<Value> = serde_json::from_slice(&body)?;

        let mut repositories = self.collect_records(RecordShape::Rest, login, &items);
        repositories.sort_by(|a, b| b.star_count.cmp(&a.star_count));

        Ok(repositories)
    }

    fn provider_name(&self) -> &'static str {
        "github"
    }
}
