use chilli_core::math::Mat4;
use chilli_core::shapes::Sphere;

use super::{IndexFormat, MeshDesc, PolygonType, RenderMesh, UniqueRenderMesh, VertexFormat};
use crate::config::RenderResourceConfig;
use crate::error::{RenderingError, RenderingResult};
use crate::resource::DeferredLifecycle;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::types::TargetType;

/// Geometry uploaded by a mesh load command.
#[derive(Debug)]
pub struct MeshData {
    pub vertex_data: Box<[u8]>,
    pub index_data: Box<[u8]>,
}

/// Creates and destroys [`RenderMesh`]es.
///
/// Meshes are allocated immediately and can be referenced straight away,
/// but are only usable for rendering once the load command queued here has
/// been processed. Safe to call from any thread.
pub struct RenderMeshManager {
    lifecycle: DeferredLifecycle<RenderMesh, MeshData>,
}

impl RenderMeshManager {
    pub fn new(config: &RenderResourceConfig) -> Self {
        Self {
            lifecycle: DeferredLifecycle::new(config.meshes),
        }
    }

    /// Allocate a render mesh and queue its geometry for upload.
    ///
    /// Returns [`RenderingError::InvalidMeshData`] if the buffers do not
    /// match the counts and formats.
    #[allow(clippy::too_many_arguments)]
    pub fn create_render_mesh(
        &self,
        polygon_type: PolygonType,
        vertex_format: VertexFormat,
        index_format: IndexFormat,
        num_vertices: u32,
        num_indices: u32,
        bounding_sphere: Sphere,
        vertex_data: Box<[u8]>,
        index_data: Box<[u8]>,
        inverse_bind_poses: Vec<Mat4>,
    ) -> RenderingResult<UniqueRenderMesh> {
        let expected_vertex_size = num_vertices as usize * vertex_format.size() as usize;
        if vertex_data.len() != expected_vertex_size {
            return Err(RenderingError::InvalidMeshData(format!(
                "{} vertices need {expected_vertex_size} bytes, got {}",
                num_vertices,
                vertex_data.len()
            )));
        }
        let expected_index_size = num_indices as usize * index_format.size() as usize;
        if index_data.len() != expected_index_size {
            return Err(RenderingError::InvalidMeshData(format!(
                "{} indices need {expected_index_size} bytes, got {}",
                num_indices,
                index_data.len()
            )));
        }

        let mesh = RenderMesh::new(
            polygon_type,
            vertex_format,
            index_format,
            num_vertices,
            num_indices,
            bounding_sphere,
            inverse_bind_poses,
        );
        let data = MeshData {
            vertex_data,
            index_data,
        };
        Ok(self.lifecycle.create(mesh, data)?)
    }

    /// Create a render mesh from a description, claiming its buffers.
    ///
    /// # Panics
    ///
    /// Panics if any of the description's buffers were already claimed.
    pub fn create_render_mesh_from_desc(
        &self,
        mut desc: MeshDesc,
    ) -> RenderingResult<UniqueRenderMesh> {
        let vertex_data = desc.claim_vertex_data();
        let index_data = desc.claim_index_data();
        let inverse_bind_poses = desc.claim_inverse_bind_pose_matrices();
        self.create_render_mesh(
            desc.polygon_type(),
            *desc.vertex_format(),
            desc.index_format(),
            desc.num_vertices(),
            desc.num_indices(),
            *desc.bounding_sphere(),
            vertex_data,
            index_data,
            inverse_bind_poses,
        )
    }

    /// Queue a render mesh for unloading. The mesh is released once the
    /// unload command has been processed.
    pub fn destroy_render_mesh(&self, mesh: UniqueRenderMesh) {
        self.lifecycle.destroy(mesh);
    }

    /// Number of queued loads and unloads.
    pub fn pending_counts(&self) -> (usize, usize) {
        self.lifecycle.pending_counts()
    }
}

impl RenderSnapshotSystem for RenderMeshManager {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        if target_type != TargetType::Main {
            return;
        }

        let (loads, unloads) = self.lifecycle.drain();
        if loads.is_empty() && unloads.is_empty() {
            return;
        }
        log::debug!(
            "RenderMeshManager: {} loads, {} unloads",
            loads.len(),
            unloads.len()
        );

        let pre = snapshot.pre_render_command_list();
        for load in loads {
            pre.add_load_mesh_command(load.resource, load.data.vertex_data, load.data.index_data);
        }
        let post = snapshot.post_render_command_list();
        for mesh in unloads {
            post.add_unload_mesh_command(mesh);
        }
    }
}

static_assertions::assert_impl_all!(RenderMeshManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RenderCommand;
    use crate::resource::ResourceState;
    use crate::test_utils::{quad_mesh_desc, test_snapshot};
    use chilli_core::pool::PoolLimitPolicy;

    fn manager() -> RenderMeshManager {
        RenderMeshManager::new(&RenderResourceConfig::default())
    }

    #[test]
    fn test_create_from_desc_queues_load() {
        let manager = manager();
        let mesh = manager.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();
        assert_eq!(mesh.state(), ResourceState::Pending);
        assert_eq!(mesh.with(|m| m.num_indices()), 6);
        assert_eq!(manager.pending_counts(), (1, 0));

        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Main, &mut snapshot);
        assert_eq!(manager.pending_counts(), (0, 0));

        let pre = snapshot.claim_pre_render_command_list();
        assert_eq!(pre.len(), 1);
        match &pre.commands()[0] {
            RenderCommand::LoadMesh {
                mesh: loaded,
                vertex_data,
                index_data,
            } => {
                assert_eq!(*loaded, mesh.to_ref());
                assert_eq!(vertex_data.len(), 4 * VertexFormat::SPRITE.size() as usize);
                assert_eq!(index_data.len(), 12);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_create_then_destroy_emits_load_and_unload() {
        let manager = manager();
        let mesh = manager.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();
        manager.destroy_render_mesh(mesh);

        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Main, &mut snapshot);

        let pre = snapshot.claim_pre_render_command_list();
        let post = snapshot.claim_post_render_command_list();
        assert_eq!(pre.len(), 1);
        assert!(matches!(pre.commands()[0], RenderCommand::LoadMesh { .. }));
        assert_eq!(post.len(), 1);
        assert!(matches!(post.commands()[0], RenderCommand::UnloadMesh { .. }));
    }

    #[test]
    fn test_offscreen_target_does_not_drain() {
        let manager = manager();
        let _mesh = manager.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();

        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Offscreen, &mut snapshot);
        assert!(snapshot.claim_pre_render_command_list().is_empty());
        assert_eq!(manager.pending_counts(), (1, 0));
    }

    #[test]
    fn test_mismatched_data_is_rejected() {
        let manager = manager();
        let result = manager.create_render_mesh(
            PolygonType::TriangleList,
            VertexFormat::SPRITE,
            IndexFormat::Short,
            4,
            6,
            Sphere::default(),
            vec![0u8; 10].into_boxed_slice(),
            vec![0u8; 12].into_boxed_slice(),
            Vec::new(),
        );
        assert!(matches!(result, Err(RenderingError::InvalidMeshData(_))));
        assert_eq!(manager.pending_counts(), (0, 0));
    }

    #[test]
    fn test_fixed_pool_exhaustion() {
        let config = RenderResourceConfig::new().with_meshes(1, PoolLimitPolicy::Fixed);
        let manager = RenderMeshManager::new(&config);
        let _first = manager.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();
        let second = manager.create_render_mesh_from_desc(quad_mesh_desc());
        assert!(matches!(second, Err(RenderingError::Pool(_))));
    }
}
