//! Loading/error/data slot shared by every feature store.
//!
//! Each fetch goes through [`Loadable::begin`], which hands out a
//! [`RequestToken`]. A completion is applied only if it carries the token of
//! the most recent request; anything older is reported stale and dropped.
//! Concurrent invocations of the same action therefore resolve to the
//! newest request, regardless of completion order.

use tracing::debug;

/// Generation stamp of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Outcome of [`Loadable::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

impl Resolution {
    pub fn is_applied(self) -> bool {
        self == Resolution::Applied
    }
}

/// `idle -> loading -> idle-with-data | idle-with-error`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
    generation: u64,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
            generation: 0,
        }
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Any request still in flight becomes stale.
    ///
    /// Existing data is kept so the view does not flash empty while
    /// refreshing; callers that need a wholesale replacement call
    /// [`clear`](Self::clear) first.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        RequestToken(self.generation)
    }

    /// Whether `token` belongs to the most recent request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.generation
    }

    /// Apply a completion if it is current.
    pub fn resolve(&mut self, token: RequestToken, result: Result<T, String>) -> Resolution {
        if !self.is_current(token) {
            debug!(
                token = token.0,
                current = self.generation,
                "dropping stale completion"
            );
            return Resolution::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
        Resolution::Applied
    }

    /// Drop data and error and invalidate any in-flight request.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.error = None;
        self.data = None;
    }

    /// Replace data directly (optimistic edits, event-driven updates).
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    pub fn is_idle(&self) -> bool {
        !self.loading
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
