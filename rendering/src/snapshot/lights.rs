//! Lights collected into a snapshot.

use chilli_core::colour::Colour;
use chilli_core::math::{Mat4, Vec3};
use chilli_core::shapes::Sphere;

use crate::texture::RenderTextureRef;

/// Uniform light applied to every lit object in the base pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientRenderLight {
    pub colour: Colour,
}

impl AmbientRenderLight {
    pub fn new(colour: Colour) -> Self {
        Self { colour }
    }
}

/// Infinitely distant light, optionally casting shadows.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalRenderLight {
    pub colour: Colour,
    /// Normalised direction the light travels in.
    pub direction: Vec3,
    /// View-projection used to render and sample the shadow map.
    pub light_view_projection: Mat4,
    pub shadow_tolerance: f32,
    pub shadow_map: Option<RenderTextureRef>,
}

impl DirectionalRenderLight {
    pub fn new(colour: Colour, direction: Vec3) -> Self {
        Self {
            colour,
            direction: direction.normalize(),
            light_view_projection: Mat4::identity(),
            shadow_tolerance: 0.0,
            shadow_map: None,
        }
    }

    /// Sample `shadow_map` when lighting with this light.
    pub fn with_shadow_map(
        mut self,
        shadow_map: RenderTextureRef,
        light_view_projection: Mat4,
        shadow_tolerance: f32,
    ) -> Self {
        self.shadow_map = Some(shadow_map);
        self.light_view_projection = light_view_projection;
        self.shadow_tolerance = shadow_tolerance;
        self
    }

    pub fn casts_shadows(&self) -> bool {
        self.shadow_map.is_some()
    }
}

/// Light emitted from a point, fading out at `range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRenderLight {
    pub colour: Colour,
    pub position: Vec3,
    /// Constant, linear and quadratic attenuation factors.
    pub attenuation: Vec3,
    pub range: f32,
}

impl PointRenderLight {
    pub fn new(colour: Colour, position: Vec3, attenuation: Vec3, range: f32) -> Self {
        Self {
            colour,
            position,
            attenuation,
            range,
        }
    }

    /// Sphere of influence of the light.
    pub fn range_sphere(&self) -> Sphere {
        Sphere::new(self.position, self.range)
    }
}
