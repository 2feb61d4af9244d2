use chilli_core::colour::Colour;

use crate::shader::RenderShaderRef;
use crate::texture::RenderTextureRef;
use crate::types::{BlendMode, CullFace, StencilOp, TestFunc};

/// Built-in shader programs used by the forward material groups.
///
/// Backends ship these with their own compiled shaders and find them
/// through [`path`](Self::path). Custom programs are
/// [`RenderShader`](crate::shader::RenderShader)s instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderProgram {
    SpriteUnlit,
    StaticUnlit,
    StaticBlinnBase,
    StaticBlinnDirectional,
    StaticBlinnDirectionalShadows,
    StaticBlinnPoint,
    StaticShadowMap,
    AnimatedUnlit,
    AnimatedBlinnBase,
    AnimatedBlinnDirectional,
    AnimatedBlinnDirectionalShadows,
    AnimatedBlinnPoint,
    AnimatedShadowMap,
    Skybox,
}

impl ShaderProgram {
    /// Asset path of the program's shader.
    pub const fn path(self) -> &'static str {
        match self {
            Self::SpriteUnlit => "Shaders/Sprite-Unlit.csshader",
            Self::StaticUnlit => "Shaders/Static-Unlit.csshader",
            Self::StaticBlinnBase => "Shaders/Static-Blinn-Base.csshader",
            Self::StaticBlinnDirectional => "Shaders/Static-Blinn-Directional.csshader",
            Self::StaticBlinnDirectionalShadows => {
                "Shaders/Static-Blinn-DirectionalShadows.csshader"
            }
            Self::StaticBlinnPoint => "Shaders/Static-Blinn-Point.csshader",
            Self::StaticShadowMap => "Shaders/Static-ShadowMap.csshader",
            Self::AnimatedUnlit => "Shaders/Animated-Unlit.csshader",
            Self::AnimatedBlinnBase => "Shaders/Animated-Blinn-Base.csshader",
            Self::AnimatedBlinnDirectional => "Shaders/Animated-Blinn-Directional.csshader",
            Self::AnimatedBlinnDirectionalShadows => {
                "Shaders/Animated-Blinn-DirectionalShadows.csshader"
            }
            Self::AnimatedBlinnPoint => "Shaders/Animated-Blinn-Point.csshader",
            Self::AnimatedShadowMap => "Shaders/Animated-ShadowMap.csshader",
            Self::Skybox => "Shaders/Skybox.csshader",
        }
    }
}

/// The program a material is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialShader {
    BuiltIn(ShaderProgram),
    /// A shader loaded through the shader manager. It has to be loaded
    /// before the material is applied.
    Custom(RenderShaderRef),
}

impl From<ShaderProgram> for MaterialShader {
    fn from(program: ShaderProgram) -> Self {
        Self::BuiltIn(program)
    }
}

impl From<RenderShaderRef> for MaterialShader {
    fn from(shader: RenderShaderRef) -> Self {
        Self::Custom(shader)
    }
}

/// Shading model a material group was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialShadingType {
    #[default]
    Unlit,
    Skybox,
    Blinn,
}

/// Fixed-function state applied together with a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub is_transparency_enabled: bool,
    pub is_colour_write_enabled: bool,
    pub is_depth_write_enabled: bool,
    pub is_depth_test_enabled: bool,
    pub is_face_culling_enabled: bool,
    pub is_stencil_test_enabled: bool,
    pub depth_test_func: TestFunc,
    pub source_blend_mode: BlendMode,
    pub destination_blend_mode: BlendMode,
    pub stencil_fail_op: StencilOp,
    pub stencil_depth_fail_op: StencilOp,
    pub stencil_pass_op: StencilOp,
    pub stencil_test_func: TestFunc,
    pub stencil_ref: i32,
    pub stencil_mask: u32,
    pub cull_face: CullFace,
}

impl Default for RenderState {
    /// Opaque, depth tested and written, back faces culled.
    fn default() -> Self {
        Self {
            is_transparency_enabled: false,
            is_colour_write_enabled: true,
            is_depth_write_enabled: true,
            is_depth_test_enabled: true,
            is_face_culling_enabled: true,
            is_stencil_test_enabled: false,
            depth_test_func: TestFunc::LessEqual,
            source_blend_mode: BlendMode::One,
            destination_blend_mode: BlendMode::OneMinusSourceAlpha,
            stencil_fail_op: StencilOp::Keep,
            stencil_depth_fail_op: StencilOp::Keep,
            stencil_pass_op: StencilOp::Keep,
            stencil_test_func: TestFunc::Always,
            stencil_ref: 1,
            stencil_mask: 0xff,
            cull_face: CullFace::Back,
        }
    }
}

impl RenderState {
    /// State of the additive light passes: blended one/one on top of the
    /// base pass without writing depth.
    pub fn additive_light() -> Self {
        Self {
            is_transparency_enabled: true,
            is_depth_write_enabled: false,
            destination_blend_mode: BlendMode::One,
            ..Self::default()
        }
    }

    /// Depth-only state used to render shadow maps.
    pub fn shadow_map() -> Self {
        Self {
            is_colour_write_enabled: false,
            destination_blend_mode: BlendMode::One,
            cull_face: CullFace::Front,
            ..Self::default()
        }
    }

    /// Skybox state: depth tested but never written.
    pub fn skybox() -> Self {
        Self {
            is_depth_write_enabled: false,
            ..Self::default()
        }
    }
}

/// Material colours fed to the shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialColours {
    pub emissive: Colour,
    pub ambient: Colour,
    pub diffuse: Colour,
    pub specular: Colour,
}

impl Default for MaterialColours {
    fn default() -> Self {
        Self {
            emissive: Colour::BLACK,
            ambient: Colour::BLACK,
            diffuse: Colour::BLACK,
            specular: Colour::BLACK,
        }
    }
}

/// A single shader + state + texture combination used for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMaterial {
    pub shader: MaterialShader,
    pub textures: Vec<RenderTextureRef>,
    pub cubemaps: Vec<RenderTextureRef>,
    pub state: RenderState,
    pub colours: MaterialColours,
}

impl RenderMaterial {
    pub fn new(
        shader: impl Into<MaterialShader>,
        state: RenderState,
        colours: MaterialColours,
    ) -> Self {
        Self {
            shader: shader.into(),
            textures: Vec::new(),
            cubemaps: Vec::new(),
            state,
            colours,
        }
    }

    pub fn with_texture(mut self, texture: RenderTextureRef) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn with_cubemap(mut self, cubemap: RenderTextureRef) -> Self {
        self.cubemaps.push(cubemap);
        self
    }
}
