//! Shared rendering enums.
//!
//! Render targets, layers and the fixed-function state carried by render
//! materials.

/// Kind of target a snapshot is being built for.
///
/// Resource managers only drain their pending lists for [`Main`](Self::Main)
/// so that loads and unloads are not issued once per offscreen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetType {
    /// The screen / default framebuffer.
    #[default]
    Main,
    /// An offscreen render target group.
    Offscreen,
}

/// Layer an object is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderLayer {
    /// Lit 3D scene objects.
    #[default]
    Standard,
    /// Skybox geometry, drawn with the camera's rotation only.
    Skybox,
    /// Screen-space UI drawn with an orthographic camera.
    Ui,
}

/// Blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    Zero,
    #[default]
    One,
    SourceCol,
    OneMinusSourceCol,
    SourceAlpha,
    OneMinusSourceAlpha,
    DestAlpha,
    OneMinusDestAlpha,
}

/// Comparison function for depth and stencil tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestFunc {
    Never,
    Less,
    #[default]
    LessEqual,
    Equal,
    Greater,
    GreaterEqual,
    NotEqual,
    Always,
}

/// Action taken on the stencil buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

/// Face removed when culling is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullFace {
    Front,
    #[default]
    Back,
}
