use crate::types::RepositoryDescriptor;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    #[error("User not found: {login}")]
    UserNotFound { login: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Authentication failed")]
    Authentication,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Unknown error: {message}")]
    Unknown { message: String },
}

pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// A source of repositories to showcase for an account.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// The account's curated (pinned) repositories, at most six.
    async fn pinned_repositories(&self, login: &str) -> ShowcaseResult<Vec<RepositoryDescriptor>>;

    /// The account's public repositories ranked by stars.
    async fn top_starred_repositories(
        &self,
        login: &str,
    ) -> ShowcaseResult<Vec<RepositoryDescriptor>>;

    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProvider;

    #[async_trait]
    impl RepositoryProvider for MockProvider {
        async fn pinned_repositories(
            &self,
            login: &str,
        ) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
            Ok(vec![RepositoryDescriptor::new(login, "pinned")])
        }

        async fn top_starred_repositories(
            &self,
            login: &str,
        ) -> ShowcaseResult<Vec<RepositoryDescriptor>> {
            Err(ShowcaseError::UserNotFound {
                login: login.to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider;

        let pinned = provider.pinned_repositories("octocat").await.unwrap();
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].url, "https://github.com/octocat/pinned");

        let err = provider.top_starred_repositories("octocat").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found: octocat");
        assert_eq!(provider.provider_name(), "mock");
    }

    #[test]
    fn test_graphql_error_message_joins() {
        let err = ShowcaseError::GraphQl {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "GraphQL error: first; second");
    }
}
