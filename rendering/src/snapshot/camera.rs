use chilli_core::math::{self, Mat4, Vec3};

/// Camera state captured for one snapshot.
///
/// The view and view-projection matrices are derived once on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    world_matrix: Mat4,
    projection_matrix: Mat4,
    view_matrix: Mat4,
    view_projection_matrix: Mat4,
    position: Vec3,
}

impl RenderCamera {
    pub fn new(world_matrix: Mat4, projection_matrix: Mat4) -> Self {
        let view_matrix = math::mat4_inverse_or_identity(&world_matrix);
        Self {
            world_matrix,
            projection_matrix,
            view_matrix,
            view_projection_matrix: projection_matrix * view_matrix,
            position: math::mat4_translation(&world_matrix),
        }
    }

    /// Perspective camera at `eye` looking at `target`.
    pub fn looking_at(
        eye: Vec3,
        target: Vec3,
        yfov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let view = math::look_at_rh(&eye, &target, &Vec3::y());
        let world = math::mat4_inverse_or_identity(&view);
        Self::new(world, math::perspective_rh(yfov, aspect, znear, zfar))
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Inverse of the world matrix.
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View matrix with the translation removed, used for the skybox.
    pub fn rotation_only_view_matrix(&self) -> Mat4 {
        let mut view = self.view_matrix;
        view[(0, 3)] = 0.0;
        view[(1, 3)] = 0.0;
        view[(2, 3)] = 0.0;
        view
    }
}

impl Default for RenderCamera {
    fn default() -> Self {
        Self::new(Mat4::identity(), Mat4::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_is_inverse_world() {
        let world = math::mat4_from_translation(Vec3::new(0.0, 2.0, 10.0));
        let camera = RenderCamera::new(world, Mat4::identity());
        assert_eq!(camera.position(), Vec3::new(0.0, 2.0, 10.0));
        assert!((camera.view_matrix() * world - Mat4::identity()).norm() < 1e-5);
        assert_eq!(camera.view_projection_matrix(), camera.view_matrix());
    }

    #[test]
    fn test_rotation_only_view_drops_translation() {
        let camera = RenderCamera::looking_at(
            Vec3::new(3.0, 4.0, 5.0),
            Vec3::zeros(),
            1.0,
            1.0,
            0.1,
            100.0,
        );
        let view = camera.rotation_only_view_matrix();
        assert_eq!(math::mat4_translation(&view), Vec3::zeros());
        assert!((camera.position() - Vec3::new(3.0, 4.0, 5.0)).norm() < 1e-4);
    }
}
