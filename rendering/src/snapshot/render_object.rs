//! Drawable objects collected into a snapshot.

use chilli_core::math::{self, Mat4, Vec3};
use chilli_core::shapes::Sphere;

use crate::material::RenderMaterialGroupRef;
use crate::mesh::RenderMeshRef;
use crate::types::RenderLayer;

use super::{DynamicMeshId, SkinnedAnimationId};

/// Where an object's geometry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderObjectMesh {
    /// A loaded render mesh.
    Static(RenderMeshRef),
    /// A mesh built for this frame, stored in the snapshot's frame data.
    Dynamic(DynamicMeshId),
}

/// Combination of mesh source and skinning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderObjectKind {
    Static,
    StaticAnimated,
    Dynamic,
    DynamicAnimated,
}

/// One draw of a mesh with a material group.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderObject {
    material_group: RenderMaterialGroupRef,
    mesh: RenderObjectMesh,
    skinned_animation: Option<SkinnedAnimationId>,
    world_matrix: Mat4,
    bounding_sphere: Sphere,
    layer: RenderLayer,
    is_transparent: bool,
    priority: u32,
}

impl RenderObject {
    /// `bounding_sphere` is in world space.
    pub fn new(
        material_group: RenderMaterialGroupRef,
        mesh: RenderObjectMesh,
        world_matrix: Mat4,
        bounding_sphere: Sphere,
        layer: RenderLayer,
    ) -> Self {
        Self {
            material_group,
            mesh,
            skinned_animation: None,
            world_matrix,
            bounding_sphere,
            layer,
            is_transparent: false,
            priority: 0,
        }
    }

    /// Draw `mesh` at `world_matrix`, deriving the world bounding sphere
    /// from the mesh's local one.
    pub fn from_render_mesh(
        material_group: RenderMaterialGroupRef,
        mesh: RenderMeshRef,
        world_matrix: Mat4,
        layer: RenderLayer,
    ) -> Self {
        let bounding_sphere = mesh.with(|m| m.bounding_sphere().transformed(&world_matrix));
        Self::new(
            material_group,
            RenderObjectMesh::Static(mesh),
            world_matrix,
            bounding_sphere,
            layer,
        )
    }

    pub fn with_skinned_animation(mut self, animation: SkinnedAnimationId) -> Self {
        self.skinned_animation = Some(animation);
        self
    }

    /// Transparent objects are drawn after opaque ones, back to front.
    pub fn with_transparency(mut self, is_transparent: bool) -> Self {
        self.is_transparent = is_transparent;
        self
    }

    /// Draw order within the UI layer; lower priorities are drawn first.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn kind(&self) -> RenderObjectKind {
        match (&self.mesh, self.skinned_animation.is_some()) {
            (RenderObjectMesh::Static(_), false) => RenderObjectKind::Static,
            (RenderObjectMesh::Static(_), true) => RenderObjectKind::StaticAnimated,
            (RenderObjectMesh::Dynamic(_), false) => RenderObjectKind::Dynamic,
            (RenderObjectMesh::Dynamic(_), true) => RenderObjectKind::DynamicAnimated,
        }
    }

    pub fn material_group(&self) -> &RenderMaterialGroupRef {
        &self.material_group
    }

    pub fn mesh(&self) -> &RenderObjectMesh {
        &self.mesh
    }

    pub fn skinned_animation(&self) -> Option<SkinnedAnimationId> {
        self.skinned_animation
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn world_position(&self) -> Vec3 {
        math::mat4_translation(&self.world_matrix)
    }

    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn is_transparent(&self) -> bool {
        self.is_transparent
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }
}
