//! Render shaders and the shader manager.

mod manager;
mod render_shader;

pub use manager::{RenderShaderManager, ShaderSource};
pub use render_shader::{RenderShader, RenderShaderKey, RenderShaderRef, UniqueRenderShader};
