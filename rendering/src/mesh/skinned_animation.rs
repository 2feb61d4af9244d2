use chilli_core::math::Mat4;

/// Joint matrices of one skinned mesh for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSkinnedAnimation {
    joint_matrices: Vec<Mat4>,
}

impl RenderSkinnedAnimation {
    pub fn new(joint_matrices: Vec<Mat4>) -> Self {
        Self { joint_matrices }
    }

    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    pub fn num_joints(&self) -> usize {
        self.joint_matrices.len()
    }
}
