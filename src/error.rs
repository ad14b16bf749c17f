//! Error types shared by `Queue` and `HashTable`.

use core::fmt;

/// Failures reported by the containers.
///
/// Absence of an element (empty queue, no predicate match) is not an error;
/// those operations return `None`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The allocator could not provide memory for a new queue link.
    ///
    /// `put` reports this through [`PutError`], which hands the element
    /// back; the queue is unchanged.
    #[error("failed to allocate a queue link")]
    LinkAllocation,

    /// The bucket array for a hash table could not be reserved.
    #[error("failed to allocate {buckets} hash table buckets")]
    BucketAllocation {
        /// Requested bucket count.
        buckets: usize,
    },

    /// A hash table was requested with zero buckets.
    #[error("a hash table needs at least one bucket")]
    ZeroBuckets,
}

/// A failed `put`: the cause, plus the element that was not stored.
#[derive(thiserror::Error)]
#[error("element not stored: {error}")]
pub struct PutError<T> {
    error: Error,
    element: T,
}

impl<T> PutError<T> {
    pub(crate) fn new(error: Error, element: T) -> Self {
        Self { error, element }
    }

    /// Why the element was not stored.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Takes back the element that was not stored.
    pub fn into_element(self) -> T {
        self.element
    }

    pub fn into_parts(self) -> (Error, T) {
        (self.error, self.element)
    }
}

// Manual so `PutError<T>` is `Debug` (and usable with `unwrap`) for any `T`.
impl<T> fmt::Debug for PutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PutError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Discards the element, keeping only the cause.
impl<T> From<PutError<T>> for Error {
    fn from(e: PutError<T>) -> Self {
        e.error
    }
}
