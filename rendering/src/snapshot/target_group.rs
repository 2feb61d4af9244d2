use crate::texture::RenderTextureRef;

/// Textures an offscreen snapshot renders into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderTargetGroup {
    colour_target: Option<RenderTextureRef>,
    depth_target: Option<RenderTextureRef>,
}

impl RenderTargetGroup {
    /// # Panics
    ///
    /// Panics if both targets are `None`.
    pub fn new(
        colour_target: Option<RenderTextureRef>,
        depth_target: Option<RenderTextureRef>,
    ) -> Self {
        assert!(
            colour_target.is_some() || depth_target.is_some(),
            "A render target group needs a colour or a depth target"
        );
        Self {
            colour_target,
            depth_target,
        }
    }

    pub fn colour_target(&self) -> Option<&RenderTextureRef> {
        self.colour_target.as_ref()
    }

    pub fn depth_target(&self) -> Option<&RenderTextureRef> {
        self.depth_target.as_ref()
    }
}
