use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{RenderCommandBufferManager, RenderCommandCompiler};
use crate::command::RenderCommandBuffer;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};

/// Drives the per-frame snapshot pipeline on the producer side.
///
/// Each frame, every registered system contributes to every snapshot
/// (offscreen targets first, then the main target), each snapshot is
/// compiled, and the concatenated buffer is pushed onto the command buffer
/// queue. Systems are injected explicitly; the queue itself is always the
/// first system so recycled resource commands precede new ones.
pub struct Renderer {
    systems: Vec<Arc<dyn RenderSnapshotSystem>>,
    compiler: RenderCommandCompiler,
    queue: Arc<RenderCommandBufferManager>,
    frame_index: AtomicU64,
}

impl Renderer {
    pub fn new(queue: Arc<RenderCommandBufferManager>) -> Self {
        let queue_system: Arc<dyn RenderSnapshotSystem> = queue.clone();
        Self {
            systems: vec![queue_system],
            compiler: RenderCommandCompiler::default(),
            queue,
            frame_index: AtomicU64::new(0),
        }
    }

    pub fn with_compiler(mut self, compiler: RenderCommandCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Register a system. Systems run in registration order.
    pub fn with_system(mut self, system: Arc<dyn RenderSnapshotSystem>) -> Self {
        self.add_system(system);
        self
    }

    pub fn add_system(&mut self, system: Arc<dyn RenderSnapshotSystem>) {
        self.systems.push(system);
    }

    pub fn num_systems(&self) -> usize {
        self.systems.len()
    }

    pub fn compiler(&self) -> &RenderCommandCompiler {
        &self.compiler
    }

    pub fn queue(&self) -> &Arc<RenderCommandBufferManager> {
        &self.queue
    }

    /// Number of frames pushed so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index.load(Ordering::Relaxed)
    }

    /// Let every system contribute to `snapshot`, then compile it.
    pub fn compile_snapshot(&self, mut snapshot: RenderSnapshot) -> RenderCommandBuffer {
        let target_type = snapshot.target_type();
        for system in &self.systems {
            system.on_render_snapshot(target_type, &mut snapshot);
        }
        self.compiler.compile(&mut snapshot)
    }

    /// Compile one frame and push it onto the queue, blocking while the
    /// queue is full.
    ///
    /// # Panics
    ///
    /// Panics if `main` targets an offscreen group or any of `offscreen`
    /// targets the main screen.
    pub fn render_frame(
        &self,
        main: RenderSnapshot,
        offscreen: impl IntoIterator<Item = RenderSnapshot>,
    ) {
        assert!(
            main.render_target().is_none(),
            "The main snapshot cannot have an offscreen render target"
        );

        let mut buffer = RenderCommandBuffer::new();
        for snapshot in offscreen {
            assert!(
                snapshot.render_target().is_some(),
                "Offscreen snapshots need a render target group"
            );
            buffer.append(self.compile_snapshot(snapshot));
        }
        buffer.append(self.compile_snapshot(main));

        let frame = self.frame_index.fetch_add(1, Ordering::Relaxed);
        log::trace!("Frame {frame}: pushing {} render commands", buffer.num_commands());
        self.queue.wait_then_push(buffer);
    }
}

static_assertions::assert_impl_all!(Renderer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RenderCommand;
    use crate::config::RenderResourceConfig;
    use crate::snapshot::RenderTargetGroup;
    use crate::test_utils::{TestTextures, quad_mesh_desc, test_snapshot};
    use crate::mesh::RenderMeshManager;
    use chilli_core::colour::Colour;
    use chilli_core::math::UVec2;

    #[test]
    fn test_offscreen_targets_render_first() {
        let textures = TestTextures::new();
        let meshes = Arc::new(RenderMeshManager::new(&RenderResourceConfig::default()));
        let _mesh = meshes.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();

        let renderer = Renderer::new(Arc::new(RenderCommandBufferManager::default()))
            .with_system(meshes.clone());
        assert_eq!(renderer.num_systems(), 2);

        let offscreen = RenderSnapshot::new(
            Some(RenderTargetGroup::new(Some(textures.white()), None)),
            UVec2::new(16, 16),
            Colour::BLACK,
            Default::default(),
        );
        renderer.render_frame(test_snapshot(), [offscreen]);
        assert_eq!(renderer.frame_index(), 1);

        let buffer = renderer.queue().try_pop().unwrap();
        let names: Vec<_> = buffer.commands().map(RenderCommand::name).collect();
        // The mesh load is only emitted for the main target.
        assert_eq!(
            names,
            ["BeginWithTargetGroup", "End", "LoadMesh", "Begin", "End"]
        );
        assert_eq!(meshes.pending_counts(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "Offscreen snapshots need a render target group")]
    fn test_main_snapshot_as_offscreen_panics() {
        let renderer = Renderer::new(Arc::new(RenderCommandBufferManager::default()));
        renderer.render_frame(test_snapshot(), [test_snapshot()]);
    }
}
