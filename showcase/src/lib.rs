pub mod config;
pub mod display;
pub mod fallback;
pub mod github;
pub mod modal;
pub mod provider;
pub mod resolver;
pub mod section;
pub mod types;

pub use config::{ShowcaseConfig, DEFAULT_HANDLE, MAX_SHOWCASED, PLACEHOLDER_TOKEN};
pub use display::{format_size, language_badge, summary_line, LanguageBadge};
pub use fallback::fallback_repositories;
pub use github::GitHubProvider;
pub use modal::{ModalState, ScrollLock, ScrollLockGuard};
pub use provider::{RepositoryProvider, ShowcaseError, ShowcaseResult};
pub use resolver::{resolve_showcased_repositories, ResolutionStrategy, ShowcaseResolver};
pub use section::{refresh, LoadTicket, RepositorySection};
pub use types::{
    ParseOutcome, RecordShape, RepositoryDescriptor, Resolution, ResolutionSource,
    LANGUAGE_NOT_SPECIFIED, NO_DESCRIPTION,
};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::provider::*;
    pub use crate::resolver::*;
    pub use crate::types::*;
}
