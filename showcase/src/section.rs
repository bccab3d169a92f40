//! Per-view state for a collapsible repository section.
//!
//! Each load is stamped with a generation number. Only the most recently
//! started load may update the section, and nothing is applied once the
//! owning view has been disposed.

use crate::resolver::ShowcaseResolver;
use crate::types::{RepositoryDescriptor, Resolution, ResolutionSource};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

pub const LIVE_DATA_UNAVAILABLE: &str =
    "Failed to load GitHub repositories. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct RepositorySection {
    expanded: bool,
    loading: bool,
    error: Option<String>,
    repositories: Vec<RepositoryDescriptor>,
    source: Option<ResolutionSource>,
    generation: u64,
    disposed: bool,
}

impl RepositorySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message for the retry affordance, set when live data could not be
    /// fetched even though fallback repositories are shown.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn repositories(&self) -> &[RepositoryDescriptor] {
        &self.repositories
    }

    pub fn source(&self) -> Option<ResolutionSource> {
        self.source
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Flips the disclosure. Returns `true` when the caller should start a
    /// load: the section was just expanded, holds nothing and is idle.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded && self.repositories.is_empty() && !self.loading && !self.disposed
    }

    /// Stamps a new load. Returns `None` once the view has been disposed.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.disposed {
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Applies a finished load. Returns `false` if the result was discarded
    /// because a newer load was started or the view is gone.
    pub fn complete(&mut self, ticket: LoadTicket, resolution: Resolution) -> bool {
        if self.disposed || ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                disposed = self.disposed,
                "Discarding stale repository load"
            );
            return false;
        }

        self.loading = false;
        self.error = (resolution.source == ResolutionSource::FallbackError)
            .then(|| LIVE_DATA_UNAVAILABLE.to_string());
        self.repositories = resolution.repositories;
        self.source = Some(resolution.source);
        true
    }

    /// Starts a manual retry unless a load is already running.
    pub fn retry(&mut self) -> Option<LoadTicket> {
        if self.loading {
            return None;
        }
        self.begin_load()
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.loading = false;
    }
}

/// Runs one load for a section shared with other tasks.
///
/// The lock is only held to stamp and apply the load, never across the fetch,
/// so overlapping refreshes race freely and the newest one wins. A disposed
/// section is left untouched and nothing is fetched.
pub async fn refresh(
    section: &Mutex<RepositorySection>,
    resolver: &ShowcaseResolver,
    handle: &str,
) -> bool {
    let ticket = section
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .begin_load();
    let Some(ticket) = ticket else {
        return false;
    };

    let resolution = resolver.resolve_with_source(handle).await;

    section
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .complete(ticket, resolution)
}
