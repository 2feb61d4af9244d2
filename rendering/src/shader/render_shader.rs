use crate::resource::{RenderResource, RenderResourceRef, UniqueRenderResource};

slotmap::new_key_type! {
    /// Pool key of a [`RenderShader`].
    pub struct RenderShaderKey;
}

/// Backend-side shader program built from custom sources.
///
/// The sources travel with the load command; the shader itself only keeps
/// its name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderShader {
    name: String,
}

impl RenderShader {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl RenderResource for RenderShader {
    type Key = RenderShaderKey;
    const KIND: &'static str = "render shader";
}

/// Non-owning reference to a [`RenderShader`].
pub type RenderShaderRef = RenderResourceRef<RenderShader>;

/// Owning handle to a [`RenderShader`].
pub type UniqueRenderShader = UniqueRenderResource<RenderShader>;
