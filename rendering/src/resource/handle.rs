use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use chilli_core::pool::ObjectPool;

/// A resource type that lives in a render resource pool.
pub trait RenderResource: Send + Sync + 'static {
    /// Key type used to address the resource in its pool.
    type Key: slotmap::Key + Send + Sync;

    /// Human readable name used in log and panic messages.
    const KIND: &'static str;
}

/// Opaque identifier assigned by a command processor when it loads a
/// resource onto the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackendHandle(pub u64);

/// Backend state of a render resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceState {
    /// Allocated, waiting for its load command to be processed.
    #[default]
    Pending,
    /// Uploaded to the backend.
    Loaded(BackendHandle),
    /// Removed from the backend by its unload command.
    Unloaded,
}

/// Pool slot: a resource together with its backend state.
#[derive(Debug)]
pub struct Tracked<R> {
    resource: R,
    state: ResourceState,
}

impl<R> Tracked<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            state: ResourceState::Pending,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }
}

/// Pool storing every live resource of type `R`.
pub type ResourcePool<R> = ObjectPool<<R as RenderResource>::Key, Tracked<R>>;

/// Non-owning reference to a pooled render resource.
///
/// References are cheap to clone and can be stored in snapshots and
/// commands. They never keep the resource alive: once the owning
/// [`UniqueRenderResource`] is dropped, [`with`](Self::with) panics and
/// [`state`](Self::state) reports [`ResourceState::Unloaded`].
pub struct RenderResourceRef<R: RenderResource> {
    pool: Arc<ResourcePool<R>>,
    key: R::Key,
}

impl<R: RenderResource> RenderResourceRef<R> {
    pub(crate) fn new(pool: Arc<ResourcePool<R>>, key: R::Key) -> Self {
        Self { pool, key }
    }

    /// Pool key of the resource.
    pub fn key(&self) -> R::Key {
        self.key
    }

    /// Run `f` against the resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource has been released.
    pub fn with<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        match self.pool.with(self.key, |tracked| f(&tracked.resource)) {
            Some(value) => value,
            None => panic!("Cannot access a {} that has been released", R::KIND),
        }
    }

    /// Current backend state. Released resources report `Unloaded`.
    pub fn state(&self) -> ResourceState {
        self.pool
            .with(self.key, |tracked| tracked.state)
            .unwrap_or(ResourceState::Unloaded)
    }

    /// True once the load command has been processed.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state(), ResourceState::Loaded(_))
    }

    /// True while the owning handle still holds the pool slot.
    pub fn is_alive(&self) -> bool {
        self.pool.contains(self.key)
    }

    /// Backend handle of a loaded resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource is not loaded. Resources must not be read
    /// before their load command has been processed.
    pub fn backend_handle(&self) -> BackendHandle {
        match self.state() {
            ResourceState::Loaded(handle) => handle,
            state => panic!("Cannot use a {} that is not loaded ({state:?})", R::KIND),
        }
    }

    /// Record that the backend has loaded the resource.
    ///
    /// # Panics
    ///
    /// Panics if the resource is not pending or has been released.
    pub fn mark_loaded(&self, handle: BackendHandle) {
        let previous = self.pool.with_mut(self.key, |tracked| {
            let previous = tracked.state;
            if previous == ResourceState::Pending {
                tracked.state = ResourceState::Loaded(handle);
            }
            previous
        });
        match previous {
            Some(ResourceState::Pending) => {}
            Some(state) => panic!("Cannot load a {} that is {state:?}", R::KIND),
            None => panic!("Cannot load a {} that has been released", R::KIND),
        }
    }

    /// Record that the backend has unloaded the resource.
    pub fn mark_unloaded(&self) {
        self.pool
            .with_mut(self.key, |tracked| tracked.state = ResourceState::Unloaded);
    }

    /// True if the resource lives in `pool`.
    pub fn belongs_to(&self, pool: &Arc<ResourcePool<R>>) -> bool {
        Arc::ptr_eq(&self.pool, pool)
    }
}

impl<R: RenderResource> Clone for RenderResourceRef<R> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
            key: self.key,
        }
    }
}

impl<R: RenderResource> PartialEq for RenderResourceRef<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && Arc::ptr_eq(&self.pool, &other.pool)
    }
}

impl<R: RenderResource> Eq for RenderResourceRef<R> {}

impl<R: RenderResource> Hash for RenderResourceRef<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.pool).hash(state);
        self.key.hash(state);
    }
}

impl<R: RenderResource> fmt::Debug for RenderResourceRef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderResourceRef")
            .field("kind", &R::KIND)
            .field("key", &self.key)
            .finish()
    }
}

/// Owning handle to a pooled render resource.
///
/// Move-only. Dropping it releases the pool slot, so it should be handed
/// back to its manager for destruction: the manager keeps it alive until
/// the unload command has been processed by the backend.
pub struct UniqueRenderResource<R: RenderResource> {
    inner: RenderResourceRef<R>,
}

impl<R: RenderResource> UniqueRenderResource<R> {
    pub(crate) fn new(inner: RenderResourceRef<R>) -> Self {
        Self { inner }
    }

    /// Non-owning reference to the same resource.
    pub fn to_ref(&self) -> RenderResourceRef<R> {
        self.inner.clone()
    }
}

impl<R: RenderResource> Deref for UniqueRenderResource<R> {
    type Target = RenderResourceRef<R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<R: RenderResource> Drop for UniqueRenderResource<R> {
    fn drop(&mut self) {
        if !self.inner.pool.contains(self.inner.key) {
            return;
        }
        let tracked = self.inner.pool.deallocate(self.inner.key);
        if let ResourceState::Loaded(handle) = tracked.state {
            log::warn!(
                "{} {:?} released while still loaded on the backend",
                R::KIND,
                handle
            );
        }
    }
}

impl<R: RenderResource> fmt::Debug for UniqueRenderResource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueRenderResource")
            .field("kind", &R::KIND)
            .field("key", &self.inner.key)
            .finish()
    }
}
