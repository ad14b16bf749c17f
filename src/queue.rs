//! Queue: doubly linked FIFO with a bounded pool of recycled links.
//!
//! Links are individually allocated and owned by the queue. A link's `next`
//! edge is its owning edge (front to back); `prev` is a non-owning back
//! pointer used to stitch the chain when a link is removed from the middle.
//! Removed links go to a singly linked free-list (threaded through `next`)
//! until it holds `free_capacity` links; beyond that they are released.

use crate::error::{Error, PutError};
use core::fmt;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use std::alloc::{alloc, dealloc, Layout};

/// Spare links a queue keeps for reuse unless configured otherwise.
pub const DEFAULT_FREE_CAPACITY: usize = 50;

struct Link<T> {
    next: Option<NonNull<Link<T>>>,
    prev: Option<NonNull<Link<T>>>,
    // `None` only while the link sits on the free-list.
    element: Option<T>,
}

impl<T> Link<T> {
    const LAYOUT: Layout = Layout::new::<Self>();

    /// Allocates an uninitialized link, reporting exhaustion instead of aborting.
    fn alloc() -> Result<NonNull<Self>, Error> {
        // SAFETY: `Link<T>` always holds two pointers, so the layout is non-zero-sized.
        let raw = unsafe { alloc(Self::LAYOUT) } as *mut Self;
        NonNull::new(raw).ok_or(Error::LinkAllocation)
    }

    /// Drops the link's contents and returns its memory to the allocator.
    ///
    /// # Safety
    /// `link` must come from `Link::alloc`, be initialized, and be reachable
    /// from nowhere else afterwards.
    unsafe fn release(link: NonNull<Self>) {
        // SAFETY: delegated to caller
        unsafe {
            ptr::drop_in_place(link.as_ptr());
            dealloc(link.as_ptr() as *mut u8, Self::LAYOUT);
        }
    }
}

/// An owning FIFO queue of `T`.
///
/// Elements are appended with [`put`](Queue::put) and taken from the front
/// with [`get`](Queue::get). [`search`](Queue::search) and
/// [`remove`](Queue::remove) scan front to back with a caller-supplied
/// predicate; the first match wins. Dropping the queue drops every element
/// still stored and releases every link, pooled ones included.
pub struct Queue<T> {
    front: Option<NonNull<Link<T>>>,
    back: Option<NonNull<Link<T>>>,
    free: Option<NonNull<Link<T>>>,
    /// How many more links the free-list may take.
    spaces: usize,
    free_capacity: usize,
    len: usize,
    _owns: PhantomData<Box<Link<T>>>,
}

// SAFETY: the queue owns its links exclusively; moving it moves ownership of
// every `T` along with it.
unsafe impl<T: Send> Send for Queue<T> {}
// SAFETY: `&Queue<T>` only hands out `&T`.
unsafe impl<T: Sync> Sync for Queue<T> {}

impl<T> Queue<T> {
    /// Opens an empty queue that pools up to [`DEFAULT_FREE_CAPACITY`] links.
    pub fn new() -> Self {
        Self::with_free_capacity(DEFAULT_FREE_CAPACITY)
    }

    /// Opens an empty queue that pools up to `free_capacity` spare links.
    /// A capacity of 0 disables recycling.
    pub fn with_free_capacity(free_capacity: usize) -> Self {
        Self {
            front: None,
            back: None,
            free: None,
            spaces: free_capacity,
            free_capacity,
            len: 0,
            _owns: PhantomData,
        }
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    fn pop_spare(&mut self) -> Option<NonNull<Link<T>>> {
        let spare = self.free?;
        // SAFETY: free-list links are initialized and owned by this queue.
        self.free = unsafe { (*spare.as_ptr()).next };
        self.spaces += 1;
        Some(spare)
    }

    /// Pools an element-less link, or releases it if the pool is full.
    fn recycle(&mut self, link: NonNull<Link<T>>) {
        // SAFETY: `link` is initialized, unlinked from the chain and owned by us.
        unsafe {
            debug_assert!((*link.as_ptr()).element.is_none());
            if self.spaces > 0 {
                (*link.as_ptr()).prev = None;
                (*link.as_ptr()).next = self.free;
                self.free = Some(link);
                self.spaces -= 1;
            } else {
                Link::release(link);
            }
        }
    }

    /// Appends `element` at the back.
    ///
    /// Fails only if a new link cannot be allocated; the element then comes
    /// back inside the [`PutError`] and the queue is left as it was.
    pub fn put(&mut self, element: T) -> Result<(), PutError<T>> {
        let link = match self.pop_spare() {
            Some(spare) => spare,
            None => match Link::<T>::alloc() {
                Ok(link) => link,
                Err(error) => {
                    log::warn!("queue link allocation failed at len {}", self.len);
                    return Err(PutError::new(error, element));
                }
            },
        };
        // SAFETY: `link` is either fresh memory or a spare whose element is
        // `None`; overwriting it leaks nothing. `back` is a live link.
        unsafe {
            link.as_ptr().write(Link {
                next: None,
                prev: self.back,
                element: Some(element),
            });
            match self.back {
                Some(back) => (*back.as_ptr()).next = Some(link),
                None => self.front = Some(link),
            }
        }
        self.back = Some(link);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the front element, or `None` if the queue is empty.
    pub fn get(&mut self) -> Option<T> {
        let front = self.front?;
        // SAFETY: `front` is a live link of this queue.
        unsafe { self.unlink(front) }
    }

    /// Detaches `link` from the chain, recycles it and returns its element.
    ///
    /// # Safety
    /// `link` must be a live link of this queue.
    unsafe fn unlink(&mut self, link: NonNull<Link<T>>) -> Option<T> {
        // SAFETY: delegated to caller; neighbours are live links of this queue.
        let element = unsafe {
            let node = link.as_ptr();
            let (prev, next) = ((*node).prev, (*node).next);
            match prev {
                Some(p) => (*p.as_ptr()).next = next,
                None => self.front = next,
            }
            match next {
                Some(n) => (*n.as_ptr()).prev = prev,
                None => self.back = prev,
            }
            (*node).element.take()
        };
        self.len -= 1;
        self.recycle(link);
        element
    }

    /// Calls `visit` on every element, front to back.
    pub fn apply<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        let mut cursor = self.front;
        while let Some(link) = cursor {
            // SAFETY: live links stay valid for the duration of `&self`.
            let node = unsafe { link.as_ref() };
            if let Some(e) = &node.element {
                visit(e);
            }
            cursor = node.next;
        }
    }

    /// Calls `visit` on every element, front to back, with mutable access.
    /// The order and membership of the queue do not change.
    pub fn apply_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        let mut cursor = self.front;
        while let Some(link) = cursor {
            // SAFETY: `&mut self` gives exclusive access to every live link.
            let node = unsafe { &mut *link.as_ptr() };
            if let Some(e) = &mut node.element {
                visit(e);
            }
            cursor = node.next;
        }
    }

    fn find_link<K, P>(&self, mut predicate: P, key: &K) -> Option<NonNull<Link<T>>>
    where
        K: ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let mut cursor = self.front;
        while let Some(link) = cursor {
            // SAFETY: live links stay valid for the duration of `&self`.
            let node = unsafe { link.as_ref() };
            if node.element.as_ref().is_some_and(|e| predicate(e, key)) {
                return Some(link);
            }
            cursor = node.next;
        }
        None
    }

    /// Returns the first element, front to back, for which
    /// `predicate(element, key)` holds. The queue is not modified.
    pub fn search<K, P>(&self, predicate: P, key: &K) -> Option<&T>
    where
        K: ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let link = self.find_link(predicate, key)?;
        // SAFETY: the link is live and borrowed for as long as `&self`.
        unsafe { (*link.as_ptr()).element.as_ref() }
    }

    /// Like [`search`](Queue::search), with mutable access to the match.
    pub fn search_mut<K, P>(&mut self, predicate: P, key: &K) -> Option<&mut T>
    where
        K: ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let link = self.find_link(predicate, key)?;
        // SAFETY: the link is live and `&mut self` makes the borrow exclusive.
        unsafe { (*link.as_ptr()).element.as_mut() }
    }

    /// Removes and returns the first element, front to back, for which
    /// `predicate(element, key)` holds. The remaining elements keep their
    /// relative order.
    pub fn remove<K, P>(&mut self, predicate: P, key: &K) -> Option<T>
    where
        K: ?Sized,
        P: FnMut(&T, &K) -> bool,
    {
        let link = self.find_link(predicate, key)?;
        // SAFETY: `find_link` only returns live links of this queue.
        unsafe { self.unlink(link) }
    }

    /// Appends all of `other`'s elements after this queue's in O(1), then
    /// folds `other`'s spare links into this queue's pool (each subject to
    /// this queue's bound) and disposes of `other`.
    pub fn concat(&mut self, mut other: Queue<T>) {
        let moved = other.len;
        if let Some(other_front) = other.front.take() {
            match self.back {
                None => self.front = Some(other_front),
                // SAFETY: both links are live; `other` gives up ownership of its chain.
                Some(back) => unsafe {
                    (*back.as_ptr()).next = Some(other_front);
                    (*other_front.as_ptr()).prev = Some(back);
                },
            }
            self.back = other.back.take();
            self.len += moved;
            other.len = 0;
        }

        let mut folded = 0usize;
        while let Some(spare) = other.pop_spare() {
            self.recycle(spare);
            folded += 1;
        }
        log::trace!("concat moved {moved} elements, folded {folded} spare links");
    }

    #[cfg(any(test, feature = "pool-stats"))]
    /// Remaining room on the free-list.
    pub fn free_spaces(&self) -> usize {
        self.spaces
    }

    #[cfg(any(test, feature = "pool-stats"))]
    /// Element-less links currently pooled.
    pub fn spare_links(&self) -> usize {
        let mut n = 0;
        let mut cursor = self.free;
        while let Some(link) = cursor {
            n += 1;
            // SAFETY: free-list links are initialized and owned by this queue.
            cursor = unsafe { (*link.as_ptr()).next };
        }
        n
    }

    /// Upper bound on pooled links, as configured at construction.
    pub fn free_capacity(&self) -> usize {
        self.free_capacity
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    /// Releases every chain link (dropping its element) and every spare.
    /// The queue stays consistent after each release, so this can resume
    /// after an element's `Drop` panics. Returns the counts released.
    fn release_all(&mut self) -> (usize, usize) {
        let mut elements = 0usize;
        while let Some(link) = self.front {
            // SAFETY: `link` is the live front; it is detached before release.
            unsafe {
                self.front = (*link.as_ptr()).next;
                match self.front {
                    Some(next) => (*next.as_ptr()).prev = None,
                    None => self.back = None,
                }
                self.len -= 1;
                elements += 1;
                Link::release(link);
            }
        }

        let mut spares = 0usize;
        while let Some(spare) = self.pop_spare() {
            // SAFETY: popped spares are owned by us and hold no element.
            unsafe { Link::release(spare) };
            spares += 1;
        }
        (elements, spares)
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        // Keeps releasing the remaining links if an element's drop panics.
        struct DropGuard<'a, T>(&'a mut Queue<T>);

        impl<T> Drop for DropGuard<'_, T> {
            fn drop(&mut self) {
                self.0.release_all();
            }
        }

        let guard = DropGuard(self);
        let (elements, spares) = guard.0.release_all();
        core::mem::forget(guard);
        if elements > 0 || spares > 0 {
            log::trace!("closed queue: released {elements} elements, {spares} spare links");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        self.apply(|e| {
            list.entry(e);
        });
        list.finish()
    }
}
