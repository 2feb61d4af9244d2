use crate::types::TargetType;

use super::RenderSnapshot;

/// A system that contributes to every render snapshot.
///
/// The renderer calls [`on_render_snapshot`](Self::on_render_snapshot) once
/// per target per frame, offscreen targets first. Implementors are shared
/// between the thread that creates resources and the thread building
/// snapshots, hence the `Send + Sync` bound.
pub trait RenderSnapshotSystem: Send + Sync {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot);
}
