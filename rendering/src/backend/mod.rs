//! Render command processors.
//!
//! A processor consumes compiled [`RenderCommandBuffer`]s on the render
//! thread. Real GPU backends live outside this crate; the
//! [`HeadlessRenderCommandProcessor`] executes commands without a GPU and is
//! used by tests and tools.

mod headless;

pub use headless::{HeadlessRenderCommandProcessor, ProcessorStats};

use crate::command::RenderCommandBuffer;

/// Executes compiled render command buffers.
pub trait RenderCommandProcessor {
    /// Execute every command of `buffer` in order.
    ///
    /// Unload commands carry the owning resource handles; a processor drops
    /// them once the backend resource is gone, which releases the pool
    /// slot.
    fn process(&mut self, buffer: RenderCommandBuffer);
}
