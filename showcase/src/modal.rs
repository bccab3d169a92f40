//! Scroll locking for modal dialogs.
//!
//! A [`ScrollLock`] is shared by everything rendered on one page. Each open
//! modal holds a [`ScrollLockGuard`]; the page stays locked while any guard is
//! alive and unlocks when the last one is dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Visibility of one modal dialog, e.g. a project or patent detail view.
#[derive(Debug)]
pub struct ModalState<T> {
    lock: ScrollLock,
    open: Option<(T, ScrollLockGuard)>,
}

impl<T> ModalState<T> {
    pub fn new(lock: ScrollLock) -> Self {
        Self { lock, open: None }
    }

    /// Shows `content`, replacing whatever the modal was showing.
    pub fn open(&mut self, content: T) {
        let guard = match self.open.take() {
            Some((_, guard)) => guard,
            None => self.lock.acquire(),
        };
        self.open = Some((content, guard));
    }

    /// Close button or escape key.
    pub fn close(&mut self) -> Option<T> {
        self.open.take().map(|(content, _guard)| content)
    }

    /// A click on the backdrop closes the modal; clicks inside it do not.
    pub fn click(&mut self, inside_content: bool) -> Option<T> {
        if inside_content {
            None
        } else {
            self.close()
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn content(&self) -> Option<&T> {
        self.open.as_ref().map(|(content, _)| content)
    }
}
