//! Shared fixtures for unit tests.

use chilli_core::colour::Colour;
use chilli_core::math::{UVec2, Vec3};
use chilli_core::shapes::{Aabb, Sphere};

use crate::config::RenderResourceConfig;
use crate::mesh::{IndexFormat, MeshDesc, PolygonType, VertexFormat};
use crate::snapshot::{RenderCamera, RenderSnapshot};
use crate::texture::{
    ImageFormat, RenderTextureDesc, RenderTextureManager, RenderTextureRef, UniqueRenderTexture,
};

/// A sprite quad: 4 vertices and 6 short indices.
pub(crate) fn quad_mesh_desc() -> MeshDesc {
    let format = VertexFormat::SPRITE;
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
    MeshDesc::new(
        "quad",
        PolygonType::TriangleList,
        format,
        IndexFormat::Short,
        Aabb::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0)),
        Sphere::new(Vec3::zeros(), 1.0),
        4,
        6,
        vec![0u8; 4 * format.size() as usize].into_boxed_slice(),
        bytemuck::cast_slice(&indices).into(),
    )
}

/// An empty main-target snapshot.
pub(crate) fn test_snapshot() -> RenderSnapshot {
    RenderSnapshot::new(
        None,
        UVec2::new(640, 480),
        Colour::CORNFLOWER_BLUE,
        RenderCamera::default(),
    )
}

/// A texture manager holding a single 1x1 white texture.
pub(crate) struct TestTextures {
    _manager: RenderTextureManager,
    texture: UniqueRenderTexture,
}

impl TestTextures {
    pub(crate) fn new() -> Self {
        let manager = RenderTextureManager::new(&RenderResourceConfig::default());
        let texture = manager
            .create_texture_2d(
                vec![255u8; 4].into_boxed_slice(),
                RenderTextureDesc::new(UVec2::new(1, 1), ImageFormat::RGBA8888),
            )
            .unwrap();
        Self {
            _manager: manager,
            texture,
        }
    }

    pub(crate) fn white(&self) -> RenderTextureRef {
        self.texture.to_ref()
    }
}
