//! Read-through cache cells with explicit staleness.
//!
//! Server-derived collections are cached per named partition. Mutations
//! never merge server responses into the cache by hand; they declare
//! which partitions they dirty and the next read triggers a re-fetch.
//! This keeps each mutation's side effects explicit and testable.

use serde::{Deserialize, Serialize};

/// Named cache partitions. Each mutation's contract lists the
/// partitions it invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    /// All event records, including per-tier availability figures.
    Events,
    /// The flat category list.
    Categories,
    /// Categories bundled with their events.
    CategoriesWithEvents,
    /// Booking lists (the current user's and the admin view).
    Bookings,
}

/// What a consumer sees when reading a cache cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheRead<'a, T> {
    /// The cached value, if one has ever been loaded.
    pub value: Option<&'a T>,
    /// Whether the value must be re-fetched before next display.
    pub stale: bool,
}

/// A cached, server-owned value with its display states.
///
/// Every data-fetching view distinguishes loading, loaded, and failed
/// states; this cell carries all three so views never crash on an API
/// error and always have a retry affordance (re-dispatching the fetch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cached<T> {
    value: Option<T>,
    stale: bool,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cached<T> {
    /// An empty cell. It reports stale so the first read triggers a
    /// fetch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            stale: true,
            loading: false,
            error: None,
        }
    }

    /// Whether a fetch should be started: nothing usable cached and no
    /// request already in flight.
    #[must_use]
    pub const fn needs_fetch(&self) -> bool {
        !self.loading && (self.value.is_none() || self.stale)
    }

    /// Record that a fetch has started.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a freshly fetched value.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.stale = false;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed fetch. Any previously cached value is kept (and
    /// stays stale) so the view can show it alongside the error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Mark the value as needing a re-fetch before next display.
    pub const fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Read the cell with its staleness flag.
    #[must_use]
    pub const fn read(&self) -> CacheRead<'_, T> {
        CacheRead {
            value: self.value.as_ref(),
            stale: self.stale,
        }
    }

    /// The cached value, fresh or not.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether the value must be re-fetched before next display.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last fetch error, if the most recent attempt failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
