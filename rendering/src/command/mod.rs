//! Render commands and the lists and buffers that carry them from the
//! snapshot phase to a command processor.

mod command_buffer;
mod command_list;
mod render_command;

pub use command_buffer::RenderCommandBuffer;
pub use command_list::RenderCommandList;
pub use render_command::RenderCommand;
