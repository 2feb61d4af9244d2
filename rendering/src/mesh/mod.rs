//! Mesh descriptions, render meshes and the mesh manager.

mod dynamic_mesh;
mod manager;
mod mesh_batch;
mod mesh_desc;
mod render_mesh;
mod skinned_animation;
mod vertex_format;

pub use dynamic_mesh::RenderDynamicMesh;
pub use manager::{MeshData, RenderMeshManager};
pub use mesh_batch::{BatchMesh, RenderMeshBatch};
pub use mesh_desc::{IndexFormat, MeshDesc, PolygonType};
pub use render_mesh::{RenderMesh, RenderMeshKey, RenderMeshRef, UniqueRenderMesh};
pub use skinned_animation::RenderSkinnedAnimation;
pub use vertex_format::{ElementDataType, ElementType, MAX_ELEMENTS, VertexFormat};
