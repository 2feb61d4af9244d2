use chilli_core::math::Mat4;
use chilli_core::shapes::Sphere;

use super::{IndexFormat, PolygonType, VertexFormat};
use crate::resource::{RenderResource, RenderResourceRef, UniqueRenderResource};

slotmap::new_key_type! {
    /// Pool key of a [`RenderMesh`].
    pub struct RenderMeshKey;
}

/// Backend-side description of a mesh.
///
/// The geometry itself travels with the load command; the mesh keeps only
/// what is needed to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    polygon_type: PolygonType,
    vertex_format: VertexFormat,
    index_format: IndexFormat,
    num_vertices: u32,
    num_indices: u32,
    bounding_sphere: Sphere,
    inverse_bind_poses: Vec<Mat4>,
}

impl RenderMesh {
    pub fn new(
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        num_vertices: u32,
        num_indices: u32,
        bounding_sphere: Sphere,
        inverse_bind_poses: Vec<Mat4>,
    ) -> Self {
        Self {
            polygon_type,
            vertex_format,
            index_format,
            num_vertices,
            num_indices,
            bounding_sphere,
            inverse_bind_poses,
        }
    }

    pub fn polygon_type(&self) -> PolygonType {
        self.polygon_type
    }

    pub fn vertex_format(&self) -> &VertexFormat {
        &self.vertex_format
    }

    pub fn index_format(&self) -> IndexFormat {
        self.index_format
    }

    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    pub fn num_indices(&self) -> u32 {
        self.num_indices
    }

    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    /// Inverse bind pose per joint; empty for static meshes.
    pub fn inverse_bind_poses(&self) -> &[Mat4] {
        &self.inverse_bind_poses
    }

    pub fn is_skinned(&self) -> bool {
        !self.inverse_bind_poses.is_empty()
    }
}

impl RenderResource for RenderMesh {
    type Key = RenderMeshKey;
    const KIND: &'static str = "render mesh";
}

/// Non-owning reference to a [`RenderMesh`].
pub type RenderMeshRef = RenderResourceRef<RenderMesh>;

/// Owning handle to a [`RenderMesh`].
pub type UniqueRenderMesh = UniqueRenderResource<RenderMesh>;
