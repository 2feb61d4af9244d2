use std::sync::Arc;

use chilli_core::shapes::Sphere;

use super::{IndexFormat, PolygonType, VertexFormat};

/// Per-frame geometry built on the producer thread, such as sprites and
/// text.
///
/// The vertex and index bytes are shared so that mesh batches and draw
/// commands can reference them without copying. An empty index buffer
/// means the mesh is drawn unindexed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDynamicMesh {
    polygon_type: PolygonType,
    vertex_format: VertexFormat,
    index_format: IndexFormat,
    num_vertices: u32,
    num_indices: u32,
    bounding_sphere: Sphere,
    vertex_data: Arc<[u8]>,
    index_data: Arc<[u8]>,
}

impl RenderDynamicMesh {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        num_vertices: u32,
        num_indices: u32,
        bounding_sphere: Sphere,
        vertex_data: impl Into<Arc<[u8]>>,
        index_data: impl Into<Arc<[u8]>>,
    ) -> Self {
        let vertex_data = vertex_data.into();
        let index_data = index_data.into();
        debug_assert_eq!(
            vertex_data.len(),
            (num_vertices * vertex_format.size()) as usize,
            "Dynamic mesh vertex data does not match its vertex count"
        );
        debug_assert_eq!(
            index_data.len(),
            (num_indices * index_format.size()) as usize,
            "Dynamic mesh index data does not match its index count"
        );

        Self {
            polygon_type,
            vertex_format,
            index_format,
            num_vertices,
            num_indices,
            bounding_sphere,
            vertex_data,
            index_data,
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

    pub fn vertex_data(&self) -> &Arc<[u8]> {
        &self.vertex_data
    }

    pub fn index_data(&self) -> &Arc<[u8]> {
        &self.index_data
    }
}
