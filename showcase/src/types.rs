use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NO_DESCRIPTION: &str = "No description provided";
pub const LANGUAGE_NOT_SPECIFIED: &str = "Not specified";
pub const GITHUB_WEB_URL: &str = "https://github.com";

/// A showcased repository, normalized from any upstream shape.
///
/// Every field carries a usable value so renderers never need to check for
/// missing data. Only the language colour is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub primary_language_name: String,
    pub primary_language_color: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub size_in_kilobytes: u64,
    pub url: String,
}

impl RepositoryDescriptor {
    /// A descriptor for `name` under `login` with every other field defaulted.
    pub fn new(login: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            url: repository_url(login, &name),
            name,
            description: NO_DESCRIPTION.to_string(),
            primary_language_name: LANGUAGE_NOT_SPECIFIED.to_string(),
            primary_language_color: None,
            star_count: 0,
            fork_count: 0,
            size_in_kilobytes: 0,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description).unwrap_or_else(|| NO_DESCRIPTION.to_string());
        self
    }

    pub fn with_language(mut self, name: Option<String>, color: Option<String>) -> Self {
        match non_blank(name) {
            Some(name) => {
                self.primary_language_name = name;
                self.primary_language_color = non_blank(color);
            }
            None => {
                self.primary_language_name = LANGUAGE_NOT_SPECIFIED.to_string();
                self.primary_language_color = None;
            }
        }
        self
    }

    pub fn with_counts(mut self, stars: u64, forks: u64) -> Self {
        self.star_count = stars;
        self.fork_count = forks;
        self
    }

    pub fn with_size(mut self, kilobytes: u64) -> Self {
        self.size_in_kilobytes = kilobytes;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn has_language(&self) -> bool {
        self.primary_language_name != LANGUAGE_NOT_SPECIFIED
    }
}

pub fn repository_url(login: &str, name: &str) -> String {
    format!("{}/{}/{}", GITHUB_WEB_URL, login, name)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryLanguage {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// A `pinnedItems` node as returned by the GraphQL API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepositoryNode {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stargazer_count: Option<u64>,
    pub fork_count: Option<u64>,
    pub primary_language: Option<PrimaryLanguage>,
    pub disk_usage: Option<u64>,
}

impl PinnedRepositoryNode {
    /// The link is always rebuilt from the login, never taken from `url`.
    pub fn into_descriptor(self, login: &str) -> RepositoryDescriptor {
        let (language, color) = match self.primary_language {
            Some(lang) => (lang.name, lang.color),
            None => (None, None),
        };

        RepositoryDescriptor::new(login, self.name)
            .with_description(self.description)
            .with_language(language, color)
            .with_counts(
                self.stargazer_count.unwrap_or(0),
                self.fork_count.unwrap_or(0),
            )
            .with_size(self.disk_usage.unwrap_or(0))
    }
}

/// An item of the REST `GET /users/{login}/repos` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub size: Option<u64>,
    pub html_url: Option<String>,
}

impl RestRepository {
    pub fn into_descriptor(self, login: &str) -> RepositoryDescriptor {
        let descriptor = RepositoryDescriptor::new(login, self.name)
            .with_id(self.id.to_string())
            .with_description(self.description)
            // The REST listing carries no language colour.
            .with_language(self.language, None)
            .with_counts(
                self.stargazers_count.unwrap_or(0),
                self.forks_count.unwrap_or(0),
            )
            .with_size(self.size.unwrap_or(0));

        match self.html_url {
            Some(url) if !url.is_empty() => descriptor.with_url(url),
            _ => descriptor,
        }
    }
}

/// Result of validating one raw upstream record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(RepositoryDescriptor),
    Rejected { index: usize, reason: String },
}

impl ParseOutcome {
    pub fn parsed(self) -> Option<RepositoryDescriptor> {
        match self {
            ParseOutcome::Parsed(descriptor) => Some(descriptor),
            ParseOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ParseOutcome::Rejected { .. })
    }
}

/// Which upstream shape a raw record is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Pinned,
    Rest,
}

pub fn parse_record(shape: RecordShape, login: &str, index: usize, raw: &Value) -> ParseOutcome {
    let parsed = match shape {
        RecordShape::Pinned => serde_json::from_value::<PinnedRepositoryNode>(raw.clone())
            .map(|node| (node.name.clone(), node.into_descriptor(login))),
        RecordShape::Rest => serde_json::from_value::<RestRepository>(raw.clone())
            .map(|repo| (repo.name.clone(), repo.into_descriptor(login))),
    };

    match parsed {
        Ok((name, _)) if name.trim().is_empty() => ParseOutcome::Rejected {
            index,
            reason: "repository name is empty".to_string(),
        },
        Ok((_, descriptor)) => ParseOutcome::Parsed(descriptor),
        Err(e) => ParseOutcome::Rejected {
            index,
            reason: e.to_string(),
        },
    }
}

pub fn parse_records(shape: RecordShape, login: &str, raw: &[Value]) -> Vec<ParseOutcome> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| parse_record(shape, login, index, value))
        .collect()
}

/// Where a resolved list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Live,
    FallbackNoCredential,
    FallbackEmpty,
    FallbackError,
}

impl ResolutionSource {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, ResolutionSource::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub repositories: Vec<RepositoryDescriptor>,
    pub source: ResolutionSource,
}
