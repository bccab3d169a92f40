//! Tiered resolution of the repositories to showcase.
//!
//! Resolution never fails. Live data is used when a credential is configured
//! and the upstream returns at least one usable record; in every other case
//! the embedded fallback list is returned instead:
//!
//! 1. no credential (absent, blank or placeholder): no request is made
//! 2. transport, status or payload failure: logged as an error
//! 3. valid response with no repositories: logged informationally
//!
//! ```ignore
//! use showcase::{resolve_showcased_repositories, ShowcaseConfig};
//!
//! let repos = resolve_showcased_repositories("anixane", &ShowcaseConfig::from_env()).await;
//! assert!(repos.len() <= 6);
//! ```

use crate::config::ShowcaseConfig;
use crate::fallback::fallback_repositories;
use crate::github::GitHubProvider;
use crate::provider::{RepositoryProvider, ShowcaseError};
use crate::types::{RepositoryDescriptor, Resolution, ResolutionSource};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// How live data is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// The account's pinned repositories via the authenticated GraphQL API.
    #[default]
    Pinned,
    /// Public repositories ranked by stars via the REST API. Needs no token.
    TopStarred,
}

pub struct ShowcaseResolver {
    provider: Result<Box<dyn RepositoryProvider>, ShowcaseError>,
    credential_configured: bool,
    strategy: ResolutionStrategy,
    max_items: usize,
}

impl ShowcaseResolver {
    /// Builds a GitHub-backed resolver. A provider that cannot be built is
    /// remembered and reported on each resolution, which then falls back.
    pub fn from_config(config: &ShowcaseConfig) -> Self {
        let credential_configured = config.has_credential();
        let max_items = config.max_items;
        let provider = GitHubProvider::new(config.clone())
            .map(|p| Box::new(p) as Box<dyn RepositoryProvider>);

        Self {
            provider,
            credential_configured,
            strategy: ResolutionStrategy::default(),
            max_items,
        }
    }

    pub fn with_provider(provider: Box<dyn RepositoryProvider>, credential_configured: bool) -> Self {
        Self {
            provider: Ok(provider),
            credential_configured,
            strategy: ResolutionStrategy::default(),
            max_items: crate::config::MAX_SHOWCASED,
        }
    }

    pub fn with_strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    pub async fn resolve(&self, handle: &str) -> Vec<RepositoryDescriptor> {
        self.resolve_with_source(handle).await.repositories
    }

    pub async fn resolve_with_source(&self, handle: &str) -> Resolution {
        if self.strategy == ResolutionStrategy::Pinned && !self.credential_configured {
            info!("No GitHub token configured, using fallback repositories");
            return Self::fallback(ResolutionSource::FallbackNoCredential);
        }

        let provider = match &self.provider {
            Ok(provider) => provider,
            Err(e) => {
                error!(error = %e, "Repository provider unavailable, using fallback repositories");
                return Self::fallback(ResolutionSource::FallbackError);
            }
        };

        let result = match self.strategy {
            ResolutionStrategy::Pinned => provider.pinned_repositories(handle).await,
            ResolutionStrategy::TopStarred => provider.top_starred_repositories(handle).await,
        };

        match result {
            Ok(repositories) if repositories.is_empty() => {
                info!(
                    handle,
                    provider = provider.provider_name(),
                    "No repositories found upstream, using fallback repositories"
                );
                Self::fallback(ResolutionSource::FallbackEmpty)
            }
            Ok(mut repositories) => {
                repositories.truncate(self.max_items);
                info!(
                    handle,
                    count = repositories.len(),
                    "Resolved repositories from {}",
                    provider.provider_name()
                );
                Resolution {
                    repositories,
                    source: ResolutionSource::Live,
                }
            }
            Err(e) => {
                error!(
                    handle,
                    error = %e,
                    "Failed to fetch repositories, using fallback repositories"
                );
                Self::fallback(ResolutionSource::FallbackError)
            }
        }
    }

    fn fallback(source: ResolutionSource) -> Resolution {
        Resolution {
            repositories: fallback_repositories(),
            source,
        }
    }
}

/// Resolves the pinned repositories for `handle`, degrading to the fallback
/// list rather than failing.
pub async fn resolve_showcased_repositories(
    handle: &str,
    config: &ShowcaseConfig,
) -> Vec<RepositoryDescriptor> {
    ShowcaseResolver::from_config(config).resolve(handle).await
}
