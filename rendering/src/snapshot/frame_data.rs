use std::sync::Arc;

use crate::mesh::{RenderDynamicMesh, RenderSkinnedAnimation};

/// Index of a dynamic mesh within one frame's [`RenderFrameData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DynamicMeshId(usize);

impl DynamicMeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Index of a skinned animation within one frame's [`RenderFrameData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkinnedAnimationId(usize);

impl SkinnedAnimationId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-frame data owned by a snapshot: dynamic meshes and skinned
/// animations referenced by the frame's render objects.
///
/// Entries are shared so the draw commands compiled from them can keep them
/// alive after the snapshot is gone.
#[derive(Debug, Default)]
pub struct RenderFrameData {
    dynamic_meshes: Vec<Arc<RenderDynamicMesh>>,
    skinned_animations: Vec<Arc<RenderSkinnedAnimation>>,
}

impl RenderFrameData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dynamic_mesh(&mut self, mesh: RenderDynamicMesh) -> DynamicMeshId {
        self.dynamic_meshes.push(Arc::new(mesh));
        DynamicMeshId(self.dynamic_meshes.len() - 1)
    }

    pub fn add_skinned_animation(
        &mut self,
        animation: RenderSkinnedAnimation,
    ) -> SkinnedAnimationId {
        self.skinned_animations.push(Arc::new(animation));
        SkinnedAnimationId(self.skinned_animations.len() - 1)
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this frame.
    pub fn dynamic_mesh(&self, id: DynamicMeshId) -> &Arc<RenderDynamicMesh> {
        match self.dynamic_meshes.get(id.0) {
            Some(mesh) => mesh,
            None => panic!("Dynamic mesh {} is not part of this frame", id.0),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this frame.
    pub fn skinned_animation(&self, id: SkinnedAnimationId) -> &Arc<RenderSkinnedAnimation> {
        match self.skinned_animations.get(id.0) {
            Some(animation) => animation,
            None => panic!("Skinned animation {} is not part of this frame", id.0),
        }
    }

    pub fn dynamic_meshes(&self) -> &[Arc<RenderDynamicMesh>] {
        &self.dynamic_meshes
    }

    pub fn skinned_animations(&self) -> &[Arc<RenderSkinnedAnimation>] {
        &self.skinned_animations
    }
}
