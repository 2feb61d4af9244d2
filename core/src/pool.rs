//! Handle-indexed object pools.
//!
//! [`ObjectPool<K, T>`] stores values in a [`SlotMap`] and hands out
//! generational keys instead of pointers. A key that has been deallocated
//! never aliases a newer allocation, so stale handles are detected rather
//! than silently reading someone else's data.
//!
//! Pools have a fixed capacity chosen up front. What happens when that
//! capacity is reached is controlled by [`PoolLimitPolicy`]:
//! - [`Fixed`](PoolLimitPolicy::Fixed) fails the allocation with
//!   [`PoolError::Exhausted`]
//! - [`Expand`](PoolLimitPolicy::Expand) grows the pool by a quarter of its
//!   current capacity
//!
//! All operations take `&self`; the pool is guarded by an internal mutex and
//! can be shared between threads behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use chilli_core::pool::{ObjectPool, PoolLimitPolicy};
//!
//! chilli_core::pool::slotmap::new_key_type! { struct NameKey; }
//!
//! let pool = ObjectPool::<NameKey, String>::new(2, PoolLimitPolicy::Fixed);
//! let a = pool.allocate("a".to_string()).unwrap();
//! let _b = pool.allocate("b".to_string()).unwrap();
//! assert!(pool.allocate("c".to_string()).is_err());
//!
//! assert_eq!(pool.deallocate(a), "a");
//! assert_eq!(pool.len(), 1);
//! ```

use parking_lot::Mutex;
use slotmap::{Key, SlotMap};

pub use slotmap;

/// Behaviour of a pool once every slot is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolLimitPolicy {
    /// Allocation fails once the initial capacity is used.
    #[default]
    Fixed,
    /// The pool grows to make room for new allocations.
    Expand,
}

/// Errors returned by [`ObjectPool`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// A fixed-size pool has no free slots.
    #[error(
        "object pool exhausted (capacity {capacity}); allocate more upfront or use an expansion policy"
    )]
    Exhausted { capacity: usize },
}

#[derive(Debug)]
struct PoolInner<K: Key, T> {
    objects: SlotMap<K, T>,
    capacity: usize,
    initial_capacity: usize,
}

/// A thread-safe pool of `T` addressed by keys of type `K`.
#[derive(Debug)]
pub struct ObjectPool<K: Key, T> {
    inner: Mutex<PoolInner<K, T>>,
    limit_policy: PoolLimitPolicy,
}

impl<K: Key, T> ObjectPool<K, T> {
    /// Create a pool with room for `capacity` objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        assert!(capacity > 0, "Cannot create a pool of size 0");
        Self {
            inner: Mutex::new(PoolInner {
                objects: SlotMap::with_capacity_and_key(capacity),
                capacity,
                initial_capacity: capacity,
            }),
            limit_policy,
        }
    }

    /// Store `value` and return its key.
    pub fn allocate(&self, value: T) -> Result<K, PoolError> {
        let mut inner = self.inner.lock();
        if inner.objects.len() >= inner.capacity {
            match self.limit_policy {
                PoolLimitPolicy::Fixed => {
                    log::error!(
                        "ObjectPool out of memory (capacity {}). Allocate more upfront or change to an expansion policy",
                        inner.capacity
                    );
                    return Err(PoolError::Exhausted {
                        capacity: inner.capacity,
                    });
                }
                PoolLimitPolicy::Expand => {
                    let grow_by = (inner.capacity / 4).max(1);
                    inner.capacity += grow_by;
                    let additional = inner.capacity - inner.objects.len();
                    inner.objects.reserve(additional);
                    log::debug!("ObjectPool expanded to {} slots", inner.capacity);
                }
            }
        }
        Ok(inner.objects.insert(value))
    }

    /// Remove the object behind `key` and return it.
    ///
    /// # Panics
    ///
    /// Panics if `key` was not allocated from this pool or has already been
    /// deallocated.
    pub fn deallocate(&self, key: K) -> T {
        match self.inner.lock().objects.remove(key) {
            Some(value) => value,
            None => panic!("Cannot deallocate an object that is not owned by this pool"),
        }
    }

    /// True if `key` refers to a live object.
    pub fn contains(&self, key: K) -> bool {
        self.inner.lock().objects.contains_key(key)
    }

    /// Run `f` against the object behind `key`.
    ///
    /// The pool lock is held while `f` runs, so `f` must not call back into
    /// this pool.
    pub fn with<R>(&self, key: K, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.lock().objects.get(key).map(f)
    }

    /// Run `f` against the object behind `key` mutably.
    ///
    /// Same locking rules as [`with`](Self::with).
    pub fn with_mut<R>(&self, key: K, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.lock().objects.get_mut(key).map(f)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.inner.lock().objects.len()
    }

    /// True if no objects are allocated.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().objects.is_empty()
    }

    /// Current slot budget.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    pub fn limit_policy(&self) -> PoolLimitPolicy {
        self.limit_policy
    }

    /// Shrink the pool back to its initial capacity.
    ///
    /// # Panics
    ///
    /// Panics if any object is still allocated.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        assert!(
            inner.objects.is_empty(),
            "Cannot reset pool while {} objects are still allocated",
            inner.objects.len()
        );
        let initial = inner.initial_capacity;
        inner.objects = SlotMap::with_capacity_and_key(initial);
        inner.capacity = initial;
    }
}
