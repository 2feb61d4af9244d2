use std::sync::Arc;

use chilli_core::colour::Colour;
use chilli_core::math::{Mat4, UVec2, Vec3};

use super::RenderCommand;
use crate::material::{RenderMaterialGroupRef, RenderPasses, UniqueRenderMaterialGroup};
use crate::mesh::{
    RenderDynamicMesh, RenderMeshBatch, RenderMeshRef, RenderSkinnedAnimation, UniqueRenderMesh,
    VertexFormat,
};
use crate::shader::{RenderShaderRef, UniqueRenderShader};
use crate::snapshot::RenderTargetGroup;
use crate::texture::{CubemapData, RenderTextureRef, UniqueRenderTexture};

/// Ordered list of render commands.
#[derive(Debug, Default)]
pub struct RenderCommandList {
    commands: Vec<RenderCommand>,
}

impl RenderCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already built command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn add_load_shader_command(
        &mut self,
        shader: RenderShaderRef,
        vertex_source: String,
        fragment_source: String,
    ) {
        self.push(RenderCommand::LoadShader {
            shader,
            vertex_source,
            fragment_source,
        });
    }

    pub fn add_load_texture_command(&mut self, texture: RenderTextureRef, data: Box<[u8]>) {
        self.push(RenderCommand::LoadTexture { texture, data });
    }

    pub fn add_load_cubemap_command(&mut self, cubemap: RenderTextureRef, data: CubemapData) {
        self.push(RenderCommand::LoadCubemap { cubemap, data });
    }

    pub fn add_load_mesh_command(
        &mut self,
        mesh: RenderMeshRef,
        vertex_data: Box<[u8]>,
        index_data: Box<[u8]>,
    ) {
        self.push(RenderCommand::LoadMesh {
            mesh,
            vertex_data,
            index_data,
        });
    }

    pub fn add_load_material_group_command(&mut self, material_group: RenderMaterialGroupRef) {
        self.push(RenderCommand::LoadMaterialGroup { material_group });
    }

    pub fn add_begin_command(&mut self, resolution: UVec2, clear_colour: Colour) {
        self.push(RenderCommand::Begin {
            resolution,
            clear_colour,
        });
    }

    pub fn add_begin_with_target_group_command(
        &mut self,
        target_group: RenderTargetGroup,
        clear_colour: Colour,
    ) {
        self.push(RenderCommand::BeginWithTargetGroup {
            target_group,
            clear_colour,
        });
    }

    pub fn add_apply_camera_command(
        &mut self,
        position: Vec3,
        view_matrix: Mat4,
        view_projection_matrix: Mat4,
    ) {
        self.push(RenderCommand::ApplyCamera {
            position,
            view_matrix,
            view_projection_matrix,
        });
    }

    pub fn add_apply_ambient_light_command(&mut self, colour: Colour) {
        self.push(RenderCommand::ApplyAmbientLight { colour });
    }

    pub fn add_apply_directional_light_command(
        &mut self,
        colour: Colour,
        direction: Vec3,
        light_view_projection: Mat4,
        shadow_tolerance: f32,
        shadow_map: Option<RenderTextureRef>,
    ) {
        self.push(RenderCommand::ApplyDirectionalLight {
            colour,
            direction,
            light_view_projection,
            shadow_tolerance,
            shadow_map,
        });
    }

    pub fn add_apply_point_light_command(
        &mut self,
        colour: Colour,
        position: Vec3,
        attenuation: Vec3,
    ) {
        self.push(RenderCommand::ApplyPointLight {
            colour,
            position,
            attenuation,
        });
    }

    pub fn add_apply_material_command(
        &mut self,
        material_group: RenderMaterialGroupRef,
        vertex_format: VertexFormat,
        pass: RenderPasses,
    ) {
        self.push(RenderCommand::ApplyMaterial {
            material_group,
            vertex_format,
            pass,
        });
    }

    pub fn add_apply_mesh_command(&mut self, mesh: RenderMeshRef) {
        self.push(RenderCommand::ApplyMesh { mesh });
    }

    pub fn add_apply_dynamic_mesh_command(&mut self, mesh: Arc<RenderDynamicMesh>) {
        self.push(RenderCommand::ApplyDynamicMesh { mesh });
    }

    pub fn add_apply_mesh_batch_command(&mut self, batch: RenderMeshBatch) {
        self.push(RenderCommand::ApplyMeshBatch { batch });
    }

    pub fn add_apply_skinned_animation_command(&mut self, animation: Arc<RenderSkinnedAnimation>) {
        self.push(RenderCommand::ApplySkinnedAnimation { animation });
    }

    pub fn add_render_instance_command(&mut self, world_matrix: Mat4) {
        self.push(RenderCommand::RenderInstance { world_matrix });
    }

    pub fn add_end_command(&mut self) {
        self.push(RenderCommand::End);
    }

    pub fn add_unload_shader_command(&mut self, shader: UniqueRenderShader) {
        self.push(RenderCommand::UnloadShader { shader });
    }

    pub fn add_unload_texture_command(&mut self, texture: UniqueRenderTexture) {
        self.push(RenderCommand::UnloadTexture { texture });
    }

    pub fn add_unload_cubemap_command(&mut self, cubemap: UniqueRenderTexture) {
        self.push(RenderCommand::UnloadCubemap { cubemap });
    }

    pub fn add_unload_mesh_command(&mut self, mesh: UniqueRenderMesh) {
        self.push(RenderCommand::UnloadMesh { mesh });
    }

    pub fn add_unload_material_group_command(&mut self, material_group: UniqueRenderMaterialGroup) {
        self.push(RenderCommand::UnloadMaterialGroup { material_group });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderCommand> {
        self.commands.iter()
    }

    /// Commands in submission order.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<RenderCommand> {
        self.commands
    }
}

impl IntoIterator for RenderCommandList {
    type Item = RenderCommand;
    type IntoIter = std::vec::IntoIter<RenderCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a RenderCommandList {
    type Item = &'a RenderCommand;
    type IntoIter = std::slice::Iter<'a, RenderCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl Extend<RenderCommand> for RenderCommandList {
    fn extend<T: IntoIterator<Item = RenderCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}
