use std::sync::Arc;

use parking_lot::Mutex;

use chilli_core::pool::PoolError;

use super::{RenderResource, RenderResourceRef, ResourcePool, Tracked, UniqueRenderResource};
use crate::config::PoolConfig;

/// A resource waiting for its load command, together with the data the
/// backend needs to build it.
#[derive(Debug)]
pub struct PendingLoad<R: RenderResource, D> {
    pub resource: RenderResourceRef<R>,
    pub data: D,
}

struct PendingLists<R: RenderResource, D> {
    loads: Vec<PendingLoad<R, D>>,
    unloads: Vec<UniqueRenderResource<R>>,
}

/// Deferred create/destroy bookkeeping shared by the resource managers.
///
/// [`create`](Self::create) allocates the resource immediately and queues a
/// pending load. [`destroy`](Self::destroy) queues the owning handle for
/// unloading; the slot is only released once whoever processes the unload
/// drops the handle. Both can be called from any thread.
/// [`drain`](Self::drain) hands everything queued so far to the caller,
/// normally a manager converting them into snapshot commands.
pub struct DeferredLifecycle<R: RenderResource, D> {
    pool: Arc<ResourcePool<R>>,
    pending: Mutex<PendingLists<R, D>>,
}

impl<R: RenderResource, D> DeferredLifecycle<R, D> {
    /// Create a lifecycle with its own pool.
    pub fn new(config: PoolConfig) -> Self {
        Self::with_pool(Arc::new(ResourcePool::<R>::new(
            config.capacity,
            config.limit_policy,
        )))
    }

    /// Create a lifecycle on top of an existing pool, so several lifecycles
    /// can hand out handles of the same resource type.
    pub fn with_pool(pool: Arc<ResourcePool<R>>) -> Self {
        Self {
            pool,
            pending: Mutex::new(PendingLists {
                loads: Vec::new(),
                unloads: Vec::new(),
            }),
        }
    }

    /// The pool backing this lifecycle.
    pub fn pool(&self) -> &Arc<ResourcePool<R>> {
        &self.pool
    }

    /// Allocate `resource` and queue its load with `data`.
    pub fn create(&self, resource: R, data: D) -> Result<UniqueRenderResource<R>, PoolError> {
        let key = self.pool.allocate(Tracked::new(resource))?;
        let unique = UniqueRenderResource::new(RenderResourceRef::new(Arc::clone(&self.pool), key));
        self.pending.lock().loads.push(PendingLoad {
            resource: unique.to_ref(),
            data,
        });
        Ok(unique)
    }

    /// Queue `resource` for unloading.
    ///
    /// # Panics
    ///
    /// Panics if the resource was allocated from a different pool.
    pub fn destroy(&self, resource: UniqueRenderResource<R>) {
        assert!(
            resource.belongs_to(&self.pool),
            "Cannot destroy a {} that was not created by this manager",
            R::KIND
        );
        self.pending.lock().unloads.push(resource);
    }

    /// Take every pending load and unload, in submission order.
    pub fn drain(&self) -> (Vec<PendingLoad<R, D>>, Vec<UniqueRenderResource<R>>) {
        let mut pending = self.pending.lock();
        (
            std::mem::take(&mut pending.loads),
            std::mem::take(&mut pending.unloads),
        )
    }

    /// Take every pending load, leaving unloads queued.
    pub fn drain_loads(&self) -> Vec<PendingLoad<R, D>> {
        std::mem::take(&mut self.pending.lock().loads)
    }

    /// Take every pending unload, leaving loads queued.
    pub fn drain_unloads(&self) -> Vec<UniqueRenderResource<R>> {
        std::mem::take(&mut self.pending.lock().unloads)
    }

    /// Number of pending loads and unloads.
    pub fn pending_counts(&self) -> (usize, usize) {
        let pending = self.pending.lock();
        (pending.loads.len(), pending.unloads.len())
    }
}
