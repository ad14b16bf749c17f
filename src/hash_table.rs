//! HashTable: a fixed array of `Queue` buckets indexed by `hash::bucket_index`.

use crate::error::{Error, PutError};
use crate::hash::bucket_index;
use crate::queue::{Queue, DEFAULT_FREE_CAPACITY};
use core::fmt;

/// An owning table of `T` keyed by byte strings.
///
/// The bucket count is fixed when the table is opened; the table never
/// resizes. Keys are any `K: AsRef<[u8]>`. Their bytes choose the bucket, and
/// the key itself is handed to the caller's predicate, which decides what a
/// match is. Equal keys may be stored more than once; lookups return the
/// earliest insertion in the bucket.
pub struct HashTable<T> {
    buckets: Box<[Queue<T>]>,
}

impl<T> HashTable<T> {
    /// Opens a table of `bucket_count` empty buckets.
    pub fn new(bucket_count: usize) -> Result<Self, Error> {
        Self::with_free_capacity(bucket_count, DEFAULT_FREE_CAPACITY)
    }

    /// Opens a table whose bucket queues each pool up to `free_capacity`
    /// spare links.
    pub fn with_free_capacity(bucket_count: usize, free_capacity: usize) -> Result<Self, Error> {
        if bucket_count == 0 {
            return Err(Error::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| Error::BucketAllocation {
                buckets: bucket_count,
            })?;
        buckets.extend((0..bucket_count).map(|_| Queue::with_free_capacity(free_capacity)));
        log::debug!("opened hash table: {bucket_count} buckets, {free_capacity} spare links each");
        Ok(Self {
            buckets: buckets.into_boxed_slice(),
        })
    }

    /// Number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of stored elements.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Queue::len).sum()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Queue::is_empty)
    }

    /// The bucket `key` hashes to.
    pub fn bucket_of<K>(&self, key: &K) -> usize
    where
        K: AsRef<[u8]> + ?Sized,
    {
        bucket_index(key.as_ref(), self.buckets.len())
    }

    /// Read access to one bucket, for inspecting load.
    pub fn bucket(&self, index: usize) -> Option<&Queue<T>> {
        self.buckets.get(index)
    }

    /// Stores `element` under `key`, at the back of its bucket. On failure
    /// the element is handed back in the [`PutError`].
    pub fn put<K>(&mut self, element: T, key: &K) -> Result<(), PutError<T>>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let i = self.bucket_of(key);
        self.buckets[i].put(element)
    }

    /// Calls `visit` on every element: bucket 0 front to back, then bucket 1,
    /// and so on.
    pub fn apply<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for bucket in self.buckets.iter().filter(|q| !q.is_empty()) {
            bucket.apply(&mut visit);
        }
    }

    /// Like [`apply`](HashTable::apply), with mutable access. Mutations must
    /// not change what the element's key hashes to.
    pub fn apply_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        for bucket in self.buckets.iter_mut().filter(|q| !q.is_empty()) {
            bucket.apply_mut(&mut visit);
        }
    }

    /// Returns the first element in `key`'s bucket for which
    /// `predicate(element, key)` holds.
    pub fn search<K, P>(&self, predicate: P, key: &K) -> Option<&T>
    where
        K: AsRef<[u8]> + ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        self.buckets[self.bucket_of(key)].search(predicate, key)
    }

    /// Like [`search`](HashTable::search), with mutable access to the match.
    pub fn search_mut<K, P>(&mut self, predicate: P, key: &K) -> Option<&mut T>
    where
        K: AsRef<[u8]> + ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let i = self.bucket_of(key);
        self.buckets[i].search_mut(predicate, key)
    }

    /// Removes and returns the first element in `key`'s bucket for which
    /// `predicate(element, key)` holds.
    pub fn remove<K, P>(&mut self, predicate: P, key: &K) -> Option<T>
    where
        K: AsRef<[u8]> + ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let i = self.bucket_of(key);
        self.buckets[i].remove(predicate, key)
    }
}

impl<T> Drop for HashTable<T> {
    fn drop(&mut self) {
        log::debug!(
            "closing hash table: {} buckets, {} elements",
            self.buckets.len(),
            self.len()
        );
    }
}

impl<T: fmt::Debug> fmt::Debug for HashTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buckets.iter()).finish()
    }
}
