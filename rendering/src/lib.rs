//! # Chilli Source Rendering
//!
//! The render snapshot and render command pipeline.
//!
//! ## Overview
//!
//! Each frame the producer thread builds a [`RenderSnapshot`] per render
//! target. Resource managers and other [`RenderSnapshotSystem`]s add their
//! queued load and unload commands to it, the [`RenderCommandCompiler`]
//! claims its contents and turns them into a [`RenderCommandBuffer`], and
//! the [`RenderCommandBufferManager`] hands the buffer to the thread running
//! a [`RenderCommandProcessor`].
//!
//! - [`mesh`], [`texture`], [`shader`], [`material`] - render resources
//!   and their managers
//! - [`resource`] - pooled resource handles and the deferred lifecycle
//! - [`snapshot`] - per-frame snapshots
//! - [`command`] - render commands, lists and buffers
//! - [`pipeline`] - compiler, queue and frame driver
//! - [`backend`] - command processors
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chilli_rendering::*;
//!
//! let config = RenderResourceConfig::default();
//! let meshes = Arc::new(RenderMeshManager::new(&config));
//! let queue = Arc::new(RenderCommandBufferManager::default());
//! let renderer = Renderer::new(queue.clone()).with_system(meshes.clone());
//!
//! let mesh = meshes.create_render_mesh_from_desc(desc)?;
//! renderer.render_frame(snapshot, []);
//!
//! // Render thread
//! let mut processor = HeadlessRenderCommandProcessor::new();
//! processor.process(queue.wait_then_pop());
//! ```

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod material;
pub mod mesh;
pub mod pipeline;
pub mod resource;
pub mod shader;
pub mod snapshot;
pub mod texture;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::{HeadlessRenderCommandProcessor, ProcessorStats, RenderCommandProcessor};
pub use command::{RenderCommand, RenderCommandBuffer, RenderCommandList};
pub use config::{CommandBufferQueueConfig, PoolConfig, RenderResourceConfig};
pub use error::{RenderingError, RenderingResult};
pub use material::{
    CustomMaterialDesc, ForwardRenderMaterialGroupManager, RenderMaterialGroupManager,
    RenderMaterialGroupRef, UniqueRenderMaterialGroup,
};
pub use mesh::{
    MeshDesc, RenderMeshBatch, RenderMeshManager, RenderMeshRef, UniqueRenderMesh, VertexFormat,
};
pub use pipeline::{RenderCommandBufferManager, RenderCommandCompiler, Renderer};
pub use resource::{BackendHandle, ResourceState};
pub use shader::{RenderShaderManager, RenderShaderRef, UniqueRenderShader};
pub use snapshot::{RenderSnapshot, RenderSnapshotSystem};
pub use texture::{RenderTextureManager, RenderTextureRef, UniqueRenderTexture};
pub use types::{RenderLayer, TargetType};

/// Rendering library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the rendering library version.
pub fn init() {
    log::info!("Chilli Source Rendering v{} initialized", VERSION);
}
