//! Batched draw descriptions.

use std::sync::Arc;

use chilli_core::math::Mat4;

use super::{IndexFormat, PolygonType, RenderDynamicMesh, VertexFormat};

/// One mesh inside a [`RenderMeshBatch`].
///
/// The geometry bytes are shared with the dynamic mesh they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchMesh {
    world_matrix: Mat4,
    vertex_data: Arc<[u8]>,
    index_data: Arc<[u8]>,
    num_vertices: u32,
    num_indices: u32,
}

impl BatchMesh {
    pub fn new(
        world_matrix: Mat4,
        vertex_data: Arc<[u8]>,
        index_data: Arc<[u8]>,
        num_vertices: u32,
        num_indices: u32,
    ) -> Self {
        Self {
            world_matrix,
            vertex_data,
            index_data,
            num_vertices,
            num_indices,
        }
    }

    /// Share the geometry of a dynamic mesh drawn at `world_matrix`.
    pub fn from_dynamic_mesh(mesh: &RenderDynamicMesh, world_matrix: Mat4) -> Self {
        Self::new(
            world_matrix,
            Arc::clone(mesh.vertex_data()),
            Arc::clone(mesh.index_data()),
            mesh.num_vertices(),
            mesh.num_indices(),
        )
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    pub fn index_data(&self) -> &[u8] {
        &self.index_data
    }

    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    pub fn num_indices(&self) -> u32 {
        self.num_indices
    }

    pub fn vertex_data_size(&self) -> u32 {
        self.vertex_data.len() as u32
    }

    pub fn index_data_size(&self) -> u32 {
        self.index_data.len() as u32
    }
}

/// Several meshes sharing polygon type, vertex format and index format,
/// described as a single draw.
///
/// Totals are summed once on construction; the batch is read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMeshBatch {
    polygon_type: PolygonType,
    vertex_format: VertexFormat,
    index_format: IndexFormat,
    meshes: Vec<BatchMesh>,
    num_vertices: u32,
    num_indices: u32,
    vertex_data_size: u32,
    index_data_size: u32,
}

impl RenderMeshBatch {
    /// Build a batch. Every mesh must use the batch's formats; this is only
    /// checked in debug builds.
    pub fn new(
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        meshes: Vec<BatchMesh>,
    ) -> Self {
        let mut num_vertices = 0;
        let mut num_indices = 0;
        let mut vertex_data_size = 0;
        let mut index_data_size = 0;
        for mesh in &meshes {
            debug_assert_eq!(
                mesh.vertex_data_size(),
                mesh.num_vertices * vertex_format.size(),
                "Batched mesh does not match the batch vertex format"
            );
            debug_assert_eq!(
                mesh.index_data_size(),
                mesh.num_indices * index_format.size(),
                "Batched mesh does not match the batch index format"
            );
            num_vertices += mesh.num_vertices;
            num_indices += mesh.num_indices;
            vertex_data_size += mesh.vertex_data_size();
            index_data_size += mesh.index_data_size();
        }

        Self {
            polygon_type,
            vertex_format,
            index_format,
            meshes,
            num_vertices,
            num_indices,
            vertex_data_size,
            index_data_size,
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

    pub fn meshes(&self) -> &[BatchMesh] {
        &self.meshes
    }

    /// Total vertices across all meshes.
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// Total indices across all meshes.
    pub fn num_indices(&self) -> u32 {
        self.num_indices
    }

    pub fn vertex_data_size(&self) -> u32 {
        self.vertex_data_size
    }

    pub fn index_data_size(&self) -> u32 {
        self.index_data_size
    }
}
