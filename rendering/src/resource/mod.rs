//! Pooled render resources and their deferred lifecycle.
//!
//! Render resources (meshes, textures, material groups) are allocated
//! synchronously but only become usable once the backend has processed
//! their load command. Each pooled slot carries a [`ResourceState`] so
//! that reading a resource before it is loaded is caught at the point of
//! use instead of being an unchecked caller contract.
//!
//! - [`UniqueRenderResource`] owns a slot and is handed back to the owning
//!   manager for destruction.
//! - [`RenderResourceRef`] is a cloneable, non-owning reference used by
//!   snapshots and commands.
//! - [`DeferredLifecycle`] is the mutex-guarded pending-load / pending-unload
//!   list shared by every manager.

mod handle;
mod lifecycle;

pub use handle::{
    BackendHandle, RenderResource, RenderResourceRef, ResourcePool, ResourceState, Tracked,
    UniqueRenderResource,
};
pub use lifecycle::{DeferredLifecycle, PendingLoad};
