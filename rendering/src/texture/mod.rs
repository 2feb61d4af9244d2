//! Render textures and the texture manager.

mod manager;
mod render_texture;

pub use manager::{CubemapData, RenderTextureManager};
pub use render_texture::{
    ImageCompression, ImageFormat, RenderTexture, RenderTextureDesc, RenderTextureKey,
    RenderTextureRef, TextureFilterMode, TextureWrapMode, UniqueRenderTexture,
};
