//! From snapshots to queued command buffers.
//!
//! The [`Renderer`] runs the snapshot systems and the
//! [`RenderCommandCompiler`] on the producer thread and hands compiled
//! buffers to the consumer through the [`RenderCommandBufferManager`].

mod buffer_queue;
mod compiler;
mod forward_passes;
mod renderer;

pub use buffer_queue::RenderCommandBufferManager;
pub use compiler::{DEFAULT_BATCH_VERTEX_LIMIT, RenderCommandCompiler};
pub use renderer::Renderer;
