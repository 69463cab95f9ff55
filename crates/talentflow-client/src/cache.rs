//! A cached collection view with cooperative cancellation.
//!
//! The cache is an explicit, injectable object rather than a hidden
//! singleton, so every test can construct an isolated instance. In-flight
//! refetches are cancelled by bumping a generation counter: a refetch holds
//! the token it started with, and its result is discarded if the token has
//! gone stale by the time it lands. "Cancel" therefore means "ignore the
//! result when it eventually resolves", not a hard abort.

use std::sync::Mutex;

pub struct QueryCache<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    data: Option<Vec<T>>,
    generation: u64,
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                data: None,
                generation: 0,
            }),
        }
    }

    /// Clone of the current cached view; `None` before the first load.
    pub fn read(&self) -> Option<Vec<T>> {
        self.inner.lock().unwrap().data.clone()
    }

    /// Overwrite the cached view. Used for optimistic writes, where the new
    /// view must land regardless of generation.
    pub fn set(&self, data: Vec<T>) {
        self.inner.lock().unwrap().data = Some(data);
    }

    /// Roll the cached view back to a snapshot taken with [`read`]. A full
    /// overwrite, not a merge.
    ///
    /// [`read`]: QueryCache::read
    pub fn restore(&self, snapshot: Option<Vec<T>>) {
        self.inner.lock().unwrap().data = snapshot;
    }

    /// Cancel any in-flight refetch by bumping the generation. Returns the
    /// new token for the refetch that replaces it.
    pub fn cancel(&self) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.generation
    }

    /// Current generation token, without cancelling anything.
    pub fn token(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }

    /// Apply a refetch result if `token` is still current. Returns whether
    /// the data was applied; a stale token leaves the cache untouched.
    pub fn commit_if_current(&self, token: u64, data: Vec<T>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation != token {
            tracing::debug!(token, current = inner.generation, "stale refetch discarded");
            return false;
        }
        inner.data = Some(data);
        true
    }
}

impl<T: Clone> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let cache: QueryCache<u32> = QueryCache::new();
        assert!(cache.read().is_none());
        assert_eq!(cache.token(), 0);
    }

    #[test]
    fn set_then_read() {
        let cache = QueryCache::new();
        cache.set(vec![1, 2, 3]);
        assert_eq!(cache.read(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn commit_with_current_token_applies() {
        let cache = QueryCache::new();
        let token = cache.token();
        assert!(cache.commit_if_current(token, vec![7]));
        assert_eq!(cache.read(), Some(vec![7]));
    }

    #[test]
    fn cancel_invalidates_in_flight_commit() {
        let cache = QueryCache::new();
        cache.set(vec![1, 2]);
        let stale = cache.token();
        cache.cancel();
        assert!(!cache.commit_if_current(stale, vec![9, 9]));
        assert_eq!(cache.read(), Some(vec![1, 2]));
    }

    #[test]
    fn cancel_returns_token_that_still_commits() {
        let cache = QueryCache::new();
        let token = cache.cancel();
        assert!(cache.commit_if_current(token, vec![4]));
        assert_eq!(cache.read(), Some(vec![4]));
    }

    #[test]
    fn restore_is_a_full_overwrite() {
        let cache = QueryCache::new();
        cache.set(vec![1, 2, 3]);
        let snapshot = cache.read();
        cache.set(vec![3, 2, 1]);
        cache.restore(snapshot);
        assert_eq!(cache.read(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn restore_can_clear_back_to_unloaded() {
        let cache: QueryCache<u32> = QueryCache::new();
        let snapshot = cache.read();
        cache.set(vec![1]);
        cache.restore(snapshot);
        assert!(cache.read().is_none());
    }
}
