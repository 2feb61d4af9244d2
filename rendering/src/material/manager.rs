use chilli_core::colour::Colour;

use super::{
    MaterialColours, MaterialShadingType, RenderMaterialGroup, RenderPasses, RenderState,
    UniqueRenderMaterialGroup,
};
use crate::config::PoolConfig;
use crate::error::RenderingResult;
use crate::mesh::VertexFormat;
use crate::resource::DeferredLifecycle;
use crate::shader::RenderShaderRef;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::texture::RenderTextureRef;
use crate::types::TargetType;

/// Parameters of an unlit material group.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlitMaterialDesc {
    pub texture: RenderTextureRef,
    pub state: RenderState,
    pub emissive_colour: Colour,
    pub ambient_colour: Colour,
}

impl UnlitMaterialDesc {
    /// Opaque unlit material showing `texture` at full brightness.
    pub fn new(texture: RenderTextureRef) -> Self {
        Self {
            texture,
            state: RenderState::default(),
            emissive_colour: Colour::BLACK,
            ambient_colour: Colour::WHITE,
        }
    }

    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    /// Enable or disable alpha blending. Transparent unlit materials are
    /// drawn in the transparent pass instead of the base pass.
    pub fn with_transparency(mut self, enabled: bool) -> Self {
        self.state.is_transparency_enabled = enabled;
        self
    }

    pub fn with_colours(mut self, emissive: Colour, ambient: Colour) -> Self {
        self.emissive_colour = emissive;
        self.ambient_colour = ambient;
        self
    }
}

/// Parameters of a blinn-phong material group.
#[derive(Debug, Clone, PartialEq)]
pub struct BlinnMaterialDesc {
    pub texture: RenderTextureRef,
    pub colours: MaterialColours,
}

impl BlinnMaterialDesc {
    pub fn new(texture: RenderTextureRef, colours: MaterialColours) -> Self {
        Self { texture, colours }
    }
}

/// Parameters of a material group drawn with custom shaders.
///
/// The group supports a single vertex format and only the passes a shader
/// is given for. `fallback_type` tells the renderer which built-in model the
/// group stands in for.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomMaterialDesc {
    pub fallback_type: MaterialShadingType,
    pub vertex_format: VertexFormat,
    pub shaders: Vec<(RenderShaderRef, RenderPasses)>,
    pub textures: Vec<RenderTextureRef>,
    pub cubemaps: Vec<RenderTextureRef>,
    pub state: RenderState,
    pub colours: MaterialColours,
}

impl CustomMaterialDesc {
    pub fn new(fallback_type: MaterialShadingType, vertex_format: VertexFormat) -> Self {
        Self {
            fallback_type,
            vertex_format,
            shaders: Vec::new(),
            textures: Vec::new(),
            cubemaps: Vec::new(),
            state: RenderState::default(),
            colours: MaterialColours::default(),
        }
    }

    /// Draw `pass` with `shader`.
    pub fn with_shader(mut self, shader: RenderShaderRef, pass: RenderPasses) -> Self {
        self.shaders.push((shader, pass));
        self
    }

    pub fn with_texture(mut self, texture: RenderTextureRef) -> Self {
        self.textures.push(texture);
        self
    }

    pub fn with_cubemap(mut self, cubemap: RenderTextureRef) -> Self {
        self.cubemaps.push(cubemap);
        self
    }

    pub fn with_state(mut self, state: RenderState) -> Self {
        self.state = state;
        self
    }

    pub fn with_colours(mut self, colours: MaterialColours) -> Self {
        self.colours = colours;
        self
    }
}

/// Factory for render material groups.
///
/// Implementations decide which materials a group contains for the
/// renderer they target, and use a [`RenderMaterialGroupLifecycle`] for the
/// shared bookkeeping. As snapshot systems they emit the queued load and
/// unload commands.
pub trait RenderMaterialGroupManager: RenderSnapshotSystem {
    /// Create a group that shows a texture without lighting.
    fn create_unlit_render_material_group(
        &self,
        desc: UnlitMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup>;

    /// Create a group that draws a cubemap as a skybox.
    fn create_skybox_render_material_group(
        &self,
        cubemap: RenderTextureRef,
    ) -> RenderingResult<UniqueRenderMaterialGroup>;

    /// Create a group lit with the blinn-phong model.
    fn create_blinn_render_material_group(
        &self,
        desc: BlinnMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup>;

    /// Create a group drawn with shaders from the shader manager.
    fn create_custom_render_material_group(
        &self,
        desc: CustomMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup>;

    /// Queue a group for unloading.
    fn destroy_render_material_group(&self, group: UniqueRenderMaterialGroup);
}

/// Pending load/unload lists for material groups.
///
/// Unlike meshes and textures, pending loads are drained into whichever
/// snapshot comes first, offscreen or not. Unloads only go to the main
/// target, which is compiled last, so a group is never released before a
/// draw of the same frame that still uses it.
pub struct RenderMaterialGroupLifecycle {
    lifecycle: DeferredLifecycle<RenderMaterialGroup, ()>,
}

impl RenderMaterialGroupLifecycle {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            lifecycle: DeferredLifecycle::new(config),
        }
    }

    /// Store a group built by a factory and queue its load.
    pub fn add_render_material_group(
        &self,
        group: RenderMaterialGroup,
    ) -> RenderingResult<UniqueRenderMaterialGroup> {
        Ok(self.lifecycle.create(group, ())?)
    }

    /// Queue a group for unloading.
    pub fn destroy_render_material_group(&self, group: UniqueRenderMaterialGroup) {
        self.lifecycle.destroy(group);
    }

    /// Number of queued loads and unloads.
    pub fn pending_counts(&self) -> (usize, usize) {
        self.lifecycle.pending_counts()
    }
}

impl RenderSnapshotSystem for RenderMaterialGroupLifecycle {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        let loads = self.lifecycle.drain_loads();
        let unloads = if target_type == TargetType::Main {
            self.lifecycle.drain_unloads()
        } else {
            Vec::new()
        };
        if loads.is_empty() && unloads.is_empty() {
            return;
        }
        log::debug!(
            "RenderMaterialGroupManager: {} loads, {} unloads",
            loads.len(),
            unloads.len()
        );

        let pre = snapshot.pre_render_command_list();
        for load in loads {
            pre.add_load_material_group_command(load.resource);
        }
        let post = snapshot.post_render_command_list();
        for group in unloads {
            post.add_unload_material_group_command(group);
        }
    }
}
