//! Per-frame render snapshots and the systems that fill them.
//!
//! A [`RenderSnapshot`] collects the lights, objects and per-frame geometry
//! of one render target, along with the resource load and unload commands
//! that must run around it. Systems implementing [`RenderSnapshotSystem`]
//! contribute to each snapshot; the compiler then claims every bucket and
//! turns it into render commands.

mod camera;
mod frame_data;
mod lights;
mod render_object;
mod render_snapshot;
mod system;
mod target_group;

pub use camera::RenderCamera;
pub use frame_data::{DynamicMeshId, RenderFrameData, SkinnedAnimationId};
pub use lights::{AmbientRenderLight, DirectionalRenderLight, PointRenderLight};
pub use render_object::{RenderObject, RenderObjectKind, RenderObjectMesh};
pub use render_snapshot::RenderSnapshot;
pub use system::RenderSnapshotSystem;
pub use target_group::RenderTargetGroup;
