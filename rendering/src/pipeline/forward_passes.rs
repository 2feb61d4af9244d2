//! Forward-rendering pass layout.
//!
//! Splits a snapshot's objects into camera groups and passes:
//!
//! 1. Main camera: the base pass lit by the ambient light, then one
//!    additive pass per directional light and per point light.
//! 2. Skybox camera (rotation only): skybox layer objects.
//! 3. Main camera: transparent objects, back to front.
//! 4. Orthographic screen camera: UI layer objects by priority.
//!
//! Empty passes and camera groups without passes are dropped.

use chilli_core::colour::Colour;
use chilli_core::math::{self, Mat4, UVec2, Vec3};

use crate::material::RenderPasses;
use crate::mesh::VertexFormat;
use crate::snapshot::{
    AmbientRenderLight, DirectionalRenderLight, PointRenderLight, RenderCamera, RenderFrameData,
    RenderObject, RenderObjectMesh,
};
use crate::types::RenderLayer;

/// Light bound for the duration of a pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PassLight {
    Ambient(Colour),
    Directional(DirectionalRenderLight),
    Point(PointRenderLight),
}

/// One pass: a light, the material slot to draw with and the objects to
/// draw, as indices into the frame's object list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ForwardPass {
    pub light: PassLight,
    pub material_pass: RenderPasses,
    pub objects: Vec<usize>,
}

/// Passes sharing one camera.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CameraGroup {
    pub position: Vec3,
    pub view_matrix: Mat4,
    pub view_projection_matrix: Mat4,
    pub passes: Vec<ForwardPass>,
}

impl CameraGroup {
    fn from_camera(camera: &RenderCamera) -> Self {
        Self {
            position: camera.position(),
            view_matrix: *camera.view_matrix(),
            view_projection_matrix: *camera.view_projection_matrix(),
            passes: Vec::new(),
        }
    }

    fn push_pass(&mut self, light: PassLight, material_pass: RenderPasses, objects: Vec<usize>) {
        if !objects.is_empty() {
            self.passes.push(ForwardPass {
                light,
                material_pass,
                objects,
            });
        }
    }
}

/// Vertex format an object's geometry is drawn with.
pub(crate) fn object_vertex_format(
    object: &RenderObject,
    frame_data: &RenderFrameData,
) -> VertexFormat {
    match object.mesh() {
        RenderObjectMesh::Static(mesh) => mesh.with(|m| *m.vertex_format()),
        RenderObjectMesh::Dynamic(id) => *frame_data.dynamic_mesh(*id).vertex_format(),
    }
}

/// Ambient colour of the frame. Only the first ambient light is used.
fn ambient_colour(lights: &[AmbientRenderLight]) -> Colour {
    if lights.len() > 1 {
        log::warn!(
            "Render snapshot has {} ambient lights, only the first is used",
            lights.len()
        );
    }
    lights.first().map(|l| l.colour).unwrap_or(Colour::BLACK)
}

struct PassBuilder<'a> {
    objects: &'a [RenderObject],
    formats: &'a [VertexFormat],
}

impl PassBuilder<'_> {
    /// Indices of objects accepted by `filter` whose material group has a
    /// material for `pass`.
    fn select(&self, pass: RenderPasses, filter: impl Fn(&RenderObject) -> bool) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, object)| filter(object))
            .filter(|(index, object)| {
                object
                    .material_group()
                    .with(|g| g.has_material(&self.formats[*index], pass))
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Group draws of the same material together.
    fn sort_by_material(&self, indices: &mut [usize]) {
        indices.sort_by_key(|&i| self.objects[i].material_group().key());
    }

    fn sort_back_to_front(&self, indices: &mut [usize], camera_position: Vec3) {
        indices.sort_by(|&a, &b| {
            let dist_a = (self.objects[a].world_position() - camera_position).norm_squared();
            let dist_b = (self.objects[b].world_position() - camera_position).norm_squared();
            dist_b
                .partial_cmp(&dist_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

fn is_opaque_standard(object: &RenderObject) -> bool {
    object.layer() == RenderLayer::Standard && !object.is_transparent()
}

/// Lay out the forward passes of one frame.
///
/// `formats[i]` is the vertex format of `objects[i]`.
pub(crate) fn build_camera_groups(
    camera: &RenderCamera,
    resolution: UVec2,
    ambient_lights: &[AmbientRenderLight],
    directional_lights: &[DirectionalRenderLight],
    point_lights: &[PointRenderLight],
    objects: &[RenderObject],
    formats: &[VertexFormat],
) -> Vec<CameraGroup> {
    debug_assert_eq!(
        objects.len(),
        formats.len(),
        "One vertex format per object is required"
    );

    let builder = PassBuilder { objects, formats };
    let ambient = ambient_colour(ambient_lights);
    let mut groups = Vec::with_capacity(4);

    // Opaque scene
    let mut main = CameraGroup::from_camera(camera);
    let mut base = builder.select(RenderPasses::Base, is_opaque_standard);
    builder.sort_by_material(&mut base);
    main.push_pass(PassLight::Ambient(ambient), RenderPasses::Base, base);

    for light in directional_lights {
        let pass = if light.casts_shadows() {
            RenderPasses::DirectionalLightShadows
        } else {
            RenderPasses::DirectionalLight
        };
        let mut lit = builder.select(pass, is_opaque_standard);
        builder.sort_by_material(&mut lit);
        main.push_pass(PassLight::Directional(light.clone()), pass, lit);
    }

    for light in point_lights {
        let range = light.range_sphere();
        let mut lit = builder.select(RenderPasses::PointLight, |object| {
            is_opaque_standard(object) && object.bounding_sphere().intersects(&range)
        });
        builder.sort_by_material(&mut lit);
        main.push_pass(PassLight::Point(*light), RenderPasses::PointLight, lit);
    }
    groups.push(main);

    // Skybox
    let mut skybox = CameraGroup::from_camera(camera);
    skybox.view_matrix = camera.rotation_only_view_matrix();
    skybox.view_projection_matrix = camera.projection_matrix() * skybox.view_matrix;
    let sky = builder.select(RenderPasses::Skybox, |o| o.layer() == RenderLayer::Skybox);
    skybox.push_pass(PassLight::Ambient(ambient), RenderPasses::Skybox, sky);
    groups.push(skybox);

    // Transparent
    let mut transparent = CameraGroup::from_camera(camera);
    let mut blended = builder.select(RenderPasses::Transparent, |o| {
        o.layer() == RenderLayer::Standard && o.is_transparent()
    });
    builder.sort_back_to_front(&mut blended, camera.position());
    transparent.push_pass(PassLight::Ambient(ambient), RenderPasses::Transparent, blended);
    groups.push(transparent);

    // UI
    let projection = math::orthographic_rh(
        0.0,
        resolution.x as f32,
        0.0,
        resolution.y as f32,
        0.0,
        1.0,
    );
    let mut ui = CameraGroup {
        position: Vec3::zeros(),
        view_matrix: Mat4::identity(),
        view_projection_matrix: projection,
        passes: Vec::new(),
    };
    let mut widgets = builder.select(RenderPasses::Transparent, |o| o.layer() == RenderLayer::Ui);
    widgets.sort_by_key(|&i| objects[i].priority());
    ui.push_pass(PassLight::Ambient(ambient), RenderPasses::Transparent, widgets);
    groups.push(ui);

    groups.retain(|group| !group.passes.is_empty());
    groups
}
