//! Compilation of render snapshots into render command buffers.
//!
//! The compiler claims every bucket of a snapshot and produces one
//! [`RenderCommandBuffer`] with the slots:
//!
//! ```text
//! [pre render commands]      only when non-empty
//! [Begin / BeginWithTargetGroup]
//! [ApplyCamera?, ApplyLight, draws...]   one slot per forward pass
//! [End]
//! [post render commands]     only when non-empty
//! ```
//!
//! Within a pass a small state cache skips material, mesh and animation
//! applies that would not change anything, and runs of small dynamic meshes
//! drawn with the same material are merged into a single mesh batch.

use chilli_core::math::Mat4;

use super::forward_passes::{self, PassLight};
use crate::command::{RenderCommandBuffer, RenderCommandList};
use crate::material::{RenderMaterialGroupRef, RenderPasses};
use crate::mesh::{BatchMesh, IndexFormat, RenderMeshBatch, RenderMeshRef, VertexFormat};
use crate::snapshot::{
    DynamicMeshId, RenderFrameData, RenderObject, RenderObjectKind, RenderObjectMesh,
    RenderSnapshot, SkinnedAnimationId,
};

/// Dynamic meshes with at most this many vertices are batched by default.
pub const DEFAULT_BATCH_VERTEX_LIMIT: u32 = 128;

/// Largest batch addressable with 16-bit indices.
const MAX_SHORT_INDEXED_VERTICES: u32 = u16::MAX as u32 + 1;

/// Turns snapshots into command buffers for the forward renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCommandCompiler {
    batch_vertex_limit: u32,
}

impl Default for RenderCommandCompiler {
    fn default() -> Self {
        Self {
            batch_vertex_limit: DEFAULT_BATCH_VERTEX_LIMIT,
        }
    }
}

impl RenderCommandCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest dynamic mesh, in vertices, that may be merged into a batch.
    /// Zero disables batching.
    pub fn with_batch_vertex_limit(mut self, limit: u32) -> Self {
        self.batch_vertex_limit = limit;
        self
    }

    pub fn batch_vertex_limit(&self) -> u32 {
        self.batch_vertex_limit
    }

    /// Compile `snapshot`, claiming all of its buckets.
    ///
    /// # Panics
    ///
    /// Panics if any bucket has already been claimed, or if an object
    /// references a released mesh or material group.
    pub fn compile(&self, snapshot: &mut RenderSnapshot) -> RenderCommandBuffer {
        let pre_render_commands = snapshot.claim_pre_render_command_list();
        let post_render_commands = snapshot.claim_post_render_command_list();
        let ambient_lights = snapshot.claim_ambient_render_lights();
        let directional_lights = snapshot.claim_directional_render_lights();
        let point_lights = snapshot.claim_point_render_lights();
        let objects = snapshot.claim_render_objects();
        let frame_data = snapshot.claim_render_frame_data();

        let formats: Vec<VertexFormat> = objects
            .iter()
            .map(|object| forward_passes::object_vertex_format(object, &frame_data))
            .collect();
        let groups = forward_passes::build_camera_groups(
            snapshot.camera(),
            snapshot.resolution(),
            &ambient_lights,
            &directional_lights,
            &point_lights,
            &objects,
            &formats,
        );

        let mut buffer = RenderCommandBuffer::new();
        if !pre_render_commands.is_empty() {
            buffer.push_slot(pre_render_commands);
        }

        let mut begin = RenderCommandList::new();
        match snapshot.render_target() {
            Some(target_group) => begin
                .add_begin_with_target_group_command(target_group.clone(), snapshot.clear_colour()),
            None => begin.add_begin_command(snapshot.resolution(), snapshot.clear_colour()),
        }
        buffer.push_slot(begin);

        for group in &groups {
            for (pass_index, pass) in group.passes.iter().enumerate() {
                let mut list = RenderCommandList::new();
                if pass_index == 0 {
                    list.add_apply_camera_command(
                        group.position,
                        group.view_matrix,
                        group.view_projection_matrix,
                    );
                }
                apply_light(&mut list, &pass.light);

                let mut encoder = PassEncoder::new(
                    &mut list,
                    pass.material_pass,
                    &frame_data,
                    self.batch_vertex_limit,
                );
                for &index in &pass.objects {
                    encoder.draw(&objects[index], &formats[index]);
                }
                encoder.finish();
                buffer.push_slot(list);
            }
        }

        let mut end = RenderCommandList::new();
        end.add_end_command();
        buffer.push_slot(end);

        if !post_render_commands.is_empty() {
            buffer.push_slot(post_render_commands);
        }

        log::trace!(
            "Compiled {} objects into {} commands ({} slots)",
            objects.len(),
            buffer.num_commands(),
            buffer.slots().len()
        );
        buffer
    }
}

fn apply_light(list: &mut RenderCommandList, light: &PassLight) {
    match light {
        PassLight::Ambient(colour) => list.add_apply_ambient_light_command(*colour),
        PassLight::Directional(light) => list.add_apply_directional_light_command(
            light.colour,
            light.direction,
            light.light_view_projection,
            light.shadow_tolerance,
            light.shadow_map.clone(),
        ),
        PassLight::Point(light) => {
            list.add_apply_point_light_command(light.colour, light.position, light.attenuation)
        }
    }
}

/// Mesh currently applied within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BoundMesh {
    Static(RenderMeshRef),
    Dynamic(DynamicMeshId),
}

/// Emits the draws of a single pass.
struct PassEncoder<'a> {
    list: &'a mut RenderCommandList,
    pass: RenderPasses,
    frame_data: &'a RenderFrameData,
    batch_vertex_limit: u32,
    material: Option<(RenderMaterialGroupRef, VertexFormat)>,
    mesh: Option<BoundMesh>,
    animation: Option<SkinnedAnimationId>,
    batch: Vec<(DynamicMeshId, Mat4)>,
    batch_vertices: u32,
}

impl<'a> PassEncoder<'a> {
    fn new(
        list: &'a mut RenderCommandList,
        pass: RenderPasses,
        frame_data: &'a RenderFrameData,
        batch_vertex_limit: u32,
    ) -> Self {
        Self {
            list,
            pass,
            frame_data,
            batch_vertex_limit,
            material: None,
            mesh: None,
            animation: None,
            batch: Vec::new(),
            batch_vertices: 0,
        }
    }

    fn draw(&mut self, object: &RenderObject, vertex_format: &VertexFormat) {
        let group = object.material_group();
        let material_changed = match &self.material {
            Some((current, format)) => current != group || format != vertex_format,
            None => true,
        };
        if material_changed {
            self.flush_batch();
            self.list
                .add_apply_material_command(group.clone(), *vertex_format, self.pass);
            self.material = Some((group.clone(), *vertex_format));
            self.mesh = None;
            self.animation = None;
        }

        if let Some(id) = self.batchable(object) {
            self.add_to_batch(id, *object.world_matrix());
            return;
        }
        self.flush_batch();

        match object.mesh() {
            RenderObjectMesh::Static(mesh) => self.apply_mesh(BoundMesh::Static(mesh.clone())),
            RenderObjectMesh::Dynamic(id) => self.apply_mesh(BoundMesh::Dynamic(*id)),
        }
        if let Some(animation) = object.skinned_animation()
            && self.animation != Some(animation)
        {
            self.list.add_apply_skinned_animation_command(
                self.frame_data.skinned_animation(animation).clone(),
            );
            self.animation = Some(animation);
        }
        self.list.add_render_instance_command(*object.world_matrix());
    }

    fn finish(mut self) {
        self.flush_batch();
    }

    fn apply_mesh(&mut self, mesh: BoundMesh) {
        if self.mesh.as_ref() == Some(&mesh) {
            return;
        }
        match &mesh {
            BoundMesh::Static(mesh) => self.list.add_apply_mesh_command(mesh.clone()),
            BoundMesh::Dynamic(id) => self
                .list
                .add_apply_dynamic_mesh_command(self.frame_data.dynamic_mesh(*id).clone()),
        }
        self.mesh = Some(mesh);
    }

    fn batchable(&self, object: &RenderObject) -> Option<DynamicMeshId> {
        if object.kind() != RenderObjectKind::Dynamic {
            return None;
        }
        let RenderObjectMesh::Dynamic(id) = object.mesh() else {
            return None;
        };
        let num_vertices = self.frame_data.dynamic_mesh(*id).num_vertices();
        (num_vertices <= self.batch_vertex_limit).then_some(*id)
    }

    fn add_to_batch(&mut self, id: DynamicMeshId, world_matrix: Mat4) {
        let frame_data = self.frame_data;
        let mesh = frame_data.dynamic_mesh(id);
        if let Some(&(first, _)) = self.batch.first() {
            let head = frame_data.dynamic_mesh(first);
            let compatible = head.polygon_type() == mesh.polygon_type()
                && head.vertex_format() == mesh.vertex_format()
                && head.index_format() == mesh.index_format()
                && (head.num_indices() == 0) == (mesh.num_indices() == 0);
            let fits = mesh.index_format() != IndexFormat::Short
                || self.batch_vertices + mesh.num_vertices() <= MAX_SHORT_INDEXED_VERTICES;
            if !compatible || !fits {
                self.flush_batch();
            }
        }
        self.batch_vertices += mesh.num_vertices();
        self.batch.push((id, world_matrix));
    }

    fn flush_batch(&mut self) {
        let batch = std::mem::take(&mut self.batch);
        self.batch_vertices = 0;
        match batch.as_slice() {
            [] => {}
            [(id, world_matrix)] => {
                self.apply_mesh(BoundMesh::Dynamic(*id));
                self.list.add_render_instance_command(*world_matrix);
            }
            [(first, _), ..] => {
                let frame_data = self.frame_data;
                let head = frame_data.dynamic_mesh(*first);
                let meshes = batch
                    .iter()
                    .map(|(id, world_matrix)| {
                        BatchMesh::from_dynamic_mesh(frame_data.dynamic_mesh(*id), *world_matrix)
                    })
                    .collect();
                self.list.add_apply_mesh_batch_command(RenderMeshBatch::new(
                    head.polygon_type(),
                    *head.vertex_format(),
                    head.index_format(),
                    meshes,
                ));
                // Batched vertices are already in world space.
                self.list.add_render_instance_command(Mat4::identity());
                self.mesh = None;
            }
        }
    }
}
