//! hashq: a generic linked queue with link recycling, and a fixed-size hash
//! table built by sharding a key space across an array of such queues.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: store and retrieve arbitrary owned records by key without the
//!   containers knowing anything about the record's shape.
//! - Layers:
//!   - Queue<T>: doubly linked FIFO owning its elements. Supports put/get,
//!     predicate search/remove from any position, whole-queue visitors and
//!     O(1) destructive concatenation. Freed links are kept on a bounded
//!     per-queue free-list for reuse.
//!   - hash: SuperFastHash reduced modulo the bucket count.
//!   - HashTable<T>: fixed array of `Queue<T>` buckets; every operation
//!     hashes the key bytes to one bucket and delegates to that queue.
//!
//! Constraints
//! - Single-threaded operation: no internal locking. Containers are
//!   `Send`/`Sync` exactly when `T` is, like `std` collections.
//! - No resizing: the bucket count is fixed when the table is opened, and
//!   per-bucket scans stay short only as long as the hash spreads keys well.
//! - Predicates decide matches. The table uses key bytes only to pick the
//!   bucket; the predicate receives the caller's key unchanged.
//! - No iterator objects: traversal happens through `apply`/`apply_mut`.
//!
//! Ownership
//! - `put` moves an element in; `get`/`remove` move it back out; `search`
//!   lends it. Dropping a container drops every element it still owns and
//!   releases every link, pooled ones included.
//! - `Queue::concat` consumes its argument, so the absorbed queue cannot be
//!   touched afterwards.
//!
//! Failure model
//! - Link and bucket-array allocation failures are reported as
//!   [`Error`] values instead of aborting. A failed `put` returns the
//!   element inside a [`PutError`] so the caller can retry.
//! - Absent elements are `None`, never errors.
//!
//! Logging
//! - Emits `log` records (table open/close at debug, queue concat/close at
//!   trace, allocation failure at warn). No logger is installed here.

pub mod error;
pub mod hash;
pub mod hash_table;
pub mod queue;
mod queue_proptest;

// Public surface
pub use error::{Error, PutError};
pub use hash_table::HashTable;
pub use queue::{Queue, DEFAULT_FREE_CAPACITY};
