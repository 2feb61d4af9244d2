//! Mesh geometry descriptions.

use chilli_core::math::Mat4;
use chilli_core::shapes::{Aabb, Sphere};

use super::VertexFormat;

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonType {
    #[default]
    TriangleList,
    TriangleStrip,
    LineList,
}

/// Width of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexFormat {
    /// 16-bit indices.
    #[default]
    Short,
    /// 32-bit indices.
    Int,
}

impl IndexFormat {
    /// Size of one index in bytes.
    pub const fn size(self) -> u32 {
        match self {
            Self::Short => 2,
            Self::Int => 4,
        }
    }
}

/// Geometry of a single mesh, ready to be handed to the
/// [`RenderMeshManager`](super::RenderMeshManager).
///
/// The vertex data, index data and inverse bind poses are owned by the
/// description and can each be claimed exactly once. Claiming twice is a
/// programming error and panics.
#[derive(Debug)]
pub struct MeshDesc {
    name: String,
    polygon_type: PolygonType,
    vertex_format: VertexFormat,
    index_format: IndexFormat,
    aabb: Aabb,
    bounding_sphere: Sphere,
    num_vertices: u32,
    num_indices: u32,
    vertex_data: Option<Box<[u8]>>,
    index_data: Option<Box<[u8]>>,
    inverse_bind_poses: Option<Vec<Mat4>>,
}

impl MeshDesc {
    /// Describe a static mesh.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        aabb: Aabb,
        bounding_sphere: Sphere,
        num_vertices: u32,
        num_indices: u32,
        vertex_data: Box<[u8]>,
        index_data: Box<[u8]>,
    ) -> Self {
        Self {
            name: name.into(),
            polygon_type,
            vertex_format,
            index_format,
            aabb,
            bounding_sphere,
            num_vertices,
            num_indices,
            vertex_data: Some(vertex_data),
            index_data: Some(index_data),
            inverse_bind_poses: Some(Vec::new()),
        }
    }

    /// Describe a skinned mesh with one inverse bind pose per joint.
    #[allow(clippy::too_many_arguments)]
    pub fn new_skinned(
        name: impl Into<String>,
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        aabb: Aabb,
        bounding_sphere: Sphere,
        num_vertices: u32,
        num_indices: u32,
        vertex_data: Box<[u8]>,
        index_data: Box<[u8]>,
        inverse_bind_poses: Vec<Mat4>,
    ) -> Self {
        let mut desc = Self::new(
            name,
            polygon_type,
            vertex_format,
            index_format,
            aabb,
            bounding_sphere,
            num_vertices,
            num_indices,
            vertex_data,
            index_data,
        );
        desc.inverse_bind_poses = Some(inverse_bind_poses);
        desc
    }

    /// Describe a static mesh from typed vertex and index slices.
    ///
    /// Counts are derived from the slice lengths: the vertex count is the
    /// byte length divided by the format size.
    pub fn from_typed<V: bytemuck::Pod, I: bytemuck::Pod>(
        name: impl Into<String>,
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        aabb: Aabb,
        vertices: &[V],
        indices: &[I],
    ) -> Self {
        let vertex_data: Box<[u8]> = bytemuck::cast_slice(vertices).into();
        let index_data: Box<[u8]> = bytemuck::cast_slice(indices).into();
        let num_vertices = (vertex_data.len() / vertex_format.size() as usize) as u32;
        let num_indices = (index_data.len() / index_format.size() as usize) as u32;
        Self::new(
            name,
            polygon_type,
            vertex_format,
            index_format,
            aabb,
            Sphere::from_aabb(&aabb),
            num_vertices,
            num_indices,
            vertex_data,
            index_data,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    pub fn num_indices(&self) -> u32 {
        self.num_indices
    }

    /// Size of the vertex data in bytes.
    pub fn vertex_data_size(&self) -> u32 {
        self.num_vertices * self.vertex_format.size()
    }

    /// Size of the index data in bytes.
    pub fn index_data_size(&self) -> u32 {
        self.num_indices * self.index_format.size()
    }

    /// Move the vertex data out of the description.
    ///
    /// # Panics
    ///
    /// Panics if the vertex data has already been claimed.
    pub fn claim_vertex_data(&mut self) -> Box<[u8]> {
        match self.vertex_data.take() {
            Some(data) => data,
            None => panic!("Vertex data of mesh '{}' has already been claimed", self.name),
        }
    }

    /// Move the index data out of the description.
    ///
    /// # Panics
    ///
    /// Panics if the index data has already been claimed.
    pub fn claim_index_data(&mut self) -> Box<[u8]> {
        match self.index_data.take() {
            Some(data) => data,
            None => panic!("Index data of mesh '{}' has already been claimed", self.name),
        }
    }

    /// Move the inverse bind pose matrices out of the description. Static
    /// meshes yield an empty vector.
    ///
    /// # Panics
    ///
    /// Panics if the matrices have already been claimed.
    pub fn claim_inverse_bind_pose_matrices(&mut self) -> Vec<Mat4> {
        match self.inverse_bind_poses.take() {
            Some(poses) => poses,
            None => panic!(
                "Inverse bind poses of mesh '{}' have already been claimed",
                self.name
            ),
        }
    }
}
