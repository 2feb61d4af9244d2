use chilli_core::colour::Colour;
use chilli_core::math::UVec2;

use crate::command::RenderCommandList;
use crate::mesh::{RenderDynamicMesh, RenderSkinnedAnimation};
use crate::types::TargetType;

use super::{
    AmbientRenderLight, DirectionalRenderLight, DynamicMeshId, PointRenderLight, RenderCamera,
    RenderFrameData, RenderObject, RenderTargetGroup, SkinnedAnimationId,
};

/// A bucket of snapshot data that can be moved out exactly once.
#[derive(Debug, Default)]
struct Bucket<T> {
    data: T,
    claimed: bool,
}

impl<T: Default> Bucket<T> {
    fn get_mut(&mut self, name: &str) -> &mut T {
        assert!(
            !self.claimed,
            "Cannot add {name} to a render snapshot after they have been claimed"
        );
        &mut self.data
    }

    fn claim(&mut self, name: &str) -> T {
        assert!(!self.claimed, "The {name} of this render snapshot have already been claimed");
        self.claimed = true;
        std::mem::take(&mut self.data)
    }
}

/// Everything needed to render one target for one frame.
///
/// A snapshot is filled by the snapshot systems and scene traversal, then
/// taken apart by the compiler. Every bucket (each light type, the render
/// objects, the frame data and both command lists) can be claimed once.
/// Adding to a claimed bucket, or claiming it again, panics.
#[derive(Debug)]
pub struct RenderSnapshot {
    render_target: Option<RenderTargetGroup>,
    resolution: UVec2,
    clear_colour: Colour,
    camera: RenderCamera,
    ambient_lights: Bucket<Vec<AmbientRenderLight>>,
    directional_lights: Bucket<Vec<DirectionalRenderLight>>,
    point_lights: Bucket<Vec<PointRenderLight>>,
    render_objects: Bucket<Vec<RenderObject>>,
    frame_data: Bucket<RenderFrameData>,
    pre_render_commands: Bucket<RenderCommandList>,
    post_render_commands: Bucket<RenderCommandList>,
}

impl RenderSnapshot {
    /// Create a snapshot for `render_target`, or for the main target when
    /// `None`.
    pub fn new(
        render_target: Option<RenderTargetGroup>,
        resolution: UVec2,
        clear_colour: Colour,
        camera: RenderCamera,
    ) -> Self {
        Self {
            render_target,
            resolution,
            clear_colour,
            camera,
            ambient_lights: Bucket::default(),
            directional_lights: Bucket::default(),
            point_lights: Bucket::default(),
            render_objects: Bucket::default(),
            frame_data: Bucket::default(),
            pre_render_commands: Bucket::default(),
            post_render_commands: Bucket::default(),
        }
    }

    pub fn render_target(&self) -> Option<&RenderTargetGroup> {
        self.render_target.as_ref()
    }

    pub fn target_type(&self) -> TargetType {
        if self.render_target.is_some() {
            TargetType::Offscreen
        } else {
            TargetType::Main
        }
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    pub fn clear_colour(&self) -> Colour {
        self.clear_colour
    }

    pub fn camera(&self) -> &RenderCamera {
        &self.camera
    }

    // ------------------------------------------------------------------
    // Lights
    // ------------------------------------------------------------------

    pub fn add_ambient_render_light(&mut self, light: AmbientRenderLight) {
        self.ambient_lights.get_mut("ambient lights").push(light);
    }

    pub fn add_directional_render_light(&mut self, light: DirectionalRenderLight) {
        self.directional_lights
            .get_mut("directional lights")
            .push(light);
    }

    pub fn add_point_render_light(&mut self, light: PointRenderLight) {
        self.point_lights.get_mut("point lights").push(light);
    }

    pub fn claim_ambient_render_lights(&mut self) -> Vec<AmbientRenderLight> {
        self.ambient_lights.claim("ambient lights")
    }

    pub fn claim_directional_render_lights(&mut self) -> Vec<DirectionalRenderLight> {
        self.directional_lights.claim("directional lights")
    }

    pub fn claim_point_render_lights(&mut self) -> Vec<PointRenderLight> {
        self.point_lights.claim("point lights")
    }

    // ------------------------------------------------------------------
    // Objects and frame data
    // ------------------------------------------------------------------

    pub fn add_render_object(&mut self, object: RenderObject) {
        self.render_objects.get_mut("render objects").push(object);
    }

    pub fn claim_render_objects(&mut self) -> Vec<RenderObject> {
        self.render_objects.claim("render objects")
    }

    /// Store a mesh built for this frame. Objects reference it through the
    /// returned id.
    pub fn add_render_dynamic_mesh(&mut self, mesh: RenderDynamicMesh) -> DynamicMeshId {
        self.frame_data.get_mut("frame data").add_dynamic_mesh(mesh)
    }

    pub fn add_render_skinned_animation(
        &mut self,
        animation: RenderSkinnedAnimation,
    ) -> SkinnedAnimationId {
        self.frame_data
            .get_mut("frame data")
            .add_skinned_animation(animation)
    }

    pub fn claim_render_frame_data(&mut self) -> RenderFrameData {
        self.frame_data.claim("frame data")
    }

    // ------------------------------------------------------------------
    // Command lists
    // ------------------------------------------------------------------

    /// Commands processed before this snapshot is drawn, such as resource
    /// loads.
    pub fn pre_render_command_list(&mut self) -> &mut RenderCommandList {
        self.pre_render_commands.get_mut("pre render commands")
    }

    /// Commands processed after this snapshot is drawn, such as resource
    /// unloads.
    pub fn post_render_command_list(&mut self) -> &mut RenderCommandList {
        self.post_render_commands.get_mut("post render commands")
    }

    pub fn claim_pre_render_command_list(&mut self) -> RenderCommandList {
        self.pre_render_commands.claim("pre render commands")
    }

    pub fn claim_post_render_command_list(&mut self) -> RenderCommandList {
        self.post_render_commands.claim("post render commands")
    }
}

static_assertions::assert_impl_all!(RenderSnapshot: Send);
