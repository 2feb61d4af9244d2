use std::sync::Arc;

use chilli_core::colour::Colour;
use chilli_core::math::{Mat4, UVec2, Vec3};

use crate::material::{RenderMaterialGroupRef, RenderPasses, UniqueRenderMaterialGroup};
use crate::mesh::{
    RenderDynamicMesh, RenderMeshBatch, RenderMeshRef, RenderSkinnedAnimation, UniqueRenderMesh,
    VertexFormat,
};
use crate::shader::{RenderShaderRef, UniqueRenderShader};
use crate::snapshot::RenderTargetGroup;
use crate::texture::{CubemapData, RenderTextureRef, UniqueRenderTexture};

/// A single instruction for a render command processor.
///
/// Load commands reference the resource they populate and own its data.
/// Unload commands own the resource handle itself, so the resource is only
/// released once the processor has dropped the command.
#[derive(Debug)]
pub enum RenderCommand {
    LoadShader {
        shader: RenderShaderRef,
        vertex_source: String,
        fragment_source: String,
    },
    LoadTexture {
        texture: RenderTextureRef,
        data: Box<[u8]>,
    },
    LoadCubemap {
        cubemap: RenderTextureRef,
        data: CubemapData,
    },
    LoadMesh {
        mesh: RenderMeshRef,
        vertex_data: Box<[u8]>,
        index_data: Box<[u8]>,
    },
    LoadMaterialGroup {
        material_group: RenderMaterialGroupRef,
    },
    /// Start rendering to the main target.
    Begin {
        resolution: UVec2,
        clear_colour: Colour,
    },
    /// Start rendering to an offscreen target group.
    BeginWithTargetGroup {
        target_group: RenderTargetGroup,
        clear_colour: Colour,
    },
    ApplyCamera {
        position: Vec3,
        view_matrix: Mat4,
        view_projection_matrix: Mat4,
    },
    ApplyAmbientLight {
        colour: Colour,
    },
    ApplyDirectionalLight {
        colour: Colour,
        direction: Vec3,
        light_view_projection: Mat4,
        shadow_tolerance: f32,
        shadow_map: Option<RenderTextureRef>,
    },
    ApplyPointLight {
        colour: Colour,
        position: Vec3,
        attenuation: Vec3,
    },
    /// Bind the material `material_group` uses for `vertex_format` in `pass`.
    ApplyMaterial {
        material_group: RenderMaterialGroupRef,
        vertex_format: VertexFormat,
        pass: RenderPasses,
    },
    ApplyMesh {
        mesh: RenderMeshRef,
    },
    ApplyDynamicMesh {
        mesh: Arc<RenderDynamicMesh>,
    },
    ApplyMeshBatch {
        batch: RenderMeshBatch,
    },
    ApplySkinnedAnimation {
        animation: Arc<RenderSkinnedAnimation>,
    },
    /// Draw the applied mesh with `world_matrix`.
    RenderInstance {
        world_matrix: Mat4,
    },
    End,
    UnloadShader {
        shader: UniqueRenderShader,
    },
    UnloadTexture {
        texture: UniqueRenderTexture,
    },
    UnloadCubemap {
        cubemap: UniqueRenderTexture,
    },
    UnloadMesh {
        mesh: UniqueRenderMesh,
    },
    UnloadMaterialGroup {
        material_group: UniqueRenderMaterialGroup,
    },
}

impl RenderCommand {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadShader { .. } => "LoadShader",
            Self::LoadTexture { .. } => "LoadTexture",
            Self::LoadCubemap { .. } => "LoadCubemap",
            Self::LoadMesh { .. } => "LoadMesh",
            Self::LoadMaterialGroup { .. } => "LoadMaterialGroup",
            Self::Begin { .. } => "Begin",
            Self::BeginWithTargetGroup { .. } => "BeginWithTargetGroup",
            Self::ApplyCamera { .. } => "ApplyCamera",
            Self::ApplyAmbientLight { .. } => "ApplyAmbientLight",
            Self::ApplyDirectionalLight { .. } => "ApplyDirectionalLight",
            Self::ApplyPointLight { .. } => "ApplyPointLight",
            Self::ApplyMaterial { .. } => "ApplyMaterial",
            Self::ApplyMesh { .. } => "ApplyMesh",
            Self::ApplyDynamicMesh { .. } => "ApplyDynamicMesh",
            Self::ApplyMeshBatch { .. } => "ApplyMeshBatch",
            Self::ApplySkinnedAnimation { .. } => "ApplySkinnedAnimation",
            Self::RenderInstance { .. } => "RenderInstance",
            Self::End => "End",
            Self::UnloadShader { .. } => "UnloadShader",
            Self::UnloadTexture { .. } => "UnloadTexture",
            Self::UnloadCubemap { .. } => "UnloadCubemap",
            Self::UnloadMesh { .. } => "UnloadMesh",
            Self::UnloadMaterialGroup { .. } => "UnloadMaterialGroup",
        }
    }

    /// True for commands that upload a resource.
    pub fn is_load(&self) -> bool {
        matches!(
            self,
            Self::LoadShader { .. }
                | Self::LoadTexture { .. }
                | Self::LoadCubemap { .. }
                | Self::LoadMesh { .. }
                | Self::LoadMaterialGroup { .. }
        )
    }

    /// True for commands that release a resource.
    pub fn is_unload(&self) -> bool {
        matches!(
            self,
            Self::UnloadShader { .. }
                | Self::UnloadTexture { .. }
                | Self::UnloadCubemap { .. }
                | Self::UnloadMesh { .. }
                | Self::UnloadMaterialGroup { .. }
        )
    }
}
