use std::sync::Arc;

use super::{RenderTexture, RenderTextureDesc, UniqueRenderTexture};
use crate::config::RenderResourceConfig;
use crate::error::{RenderingError, RenderingResult};
use crate::resource::{DeferredLifecycle, ResourcePool};
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::types::TargetType;

/// Pixel data of the six faces of a cubemap.
pub type CubemapData = [Box<[u8]>; 6];

/// Creates and destroys 2D textures and cubemaps.
///
/// Both kinds share one pool but are queued separately, since their load
/// commands carry differently shaped data.
pub struct RenderTextureManager {
    textures: DeferredLifecycle<RenderTexture, Box<[u8]>>,
    cubemaps: DeferredLifecycle<RenderTexture, CubemapData>,
}

fn check_data_size(desc: &RenderTextureDesc, data: &[u8]) -> RenderingResult<()> {
    match desc.expected_data_size() {
        Some(expected) if expected != data.len() => Err(RenderingError::InvalidTextureData {
            expected,
            actual: data.len(),
        }),
        _ => Ok(()),
    }
}

impl RenderTextureManager {
    pub fn new(config: &RenderResourceConfig) -> Self {
        let pool = Arc::new(ResourcePool::<RenderTexture>::new(
            config.textures.capacity,
            config.textures.limit_policy,
        ));
        Self {
            textures: DeferredLifecycle::with_pool(Arc::clone(&pool)),
            cubemaps: DeferredLifecycle::with_pool(pool),
        }
    }

    /// Allocate a 2D texture and queue `data` for upload.
    pub fn create_texture_2d(
        &self,
        data: Box<[u8]>,
        desc: RenderTextureDesc,
    ) -> RenderingResult<UniqueRenderTexture> {
        check_data_size(&desc, &data)?;
        Ok(self.textures.create(RenderTexture::new_2d(desc), data)?)
    }

    /// Allocate a cubemap and queue its six faces for upload. `desc`
    /// describes a single face.
    pub fn create_cubemap(
        &self,
        data: CubemapData,
        desc: RenderTextureDesc,
    ) -> RenderingResult<UniqueRenderTexture> {
        for face in &data {
            check_data_size(&desc, face)?;
        }
        Ok(self.cubemaps.create(RenderTexture::new_cubemap(desc), data)?)
    }

    /// Queue a 2D texture for unloading.
    ///
    /// # Panics
    ///
    /// Panics if `texture` is a cubemap.
    pub fn destroy_texture_2d(&self, texture: UniqueRenderTexture) {
        assert!(
            !texture.with(|t| t.is_cubemap()),
            "Cannot destroy a cubemap as a 2D texture"
        );
        self.textures.destroy(texture);
    }

    /// Queue a cubemap for unloading.
    ///
    /// # Panics
    ///
    /// Panics if `cubemap` is a 2D texture.
    pub fn destroy_cubemap(&self, cubemap: UniqueRenderTexture) {
        assert!(
            cubemap.with(|t| t.is_cubemap()),
            "Cannot destroy a 2D texture as a cubemap"
        );
        self.cubemaps.destroy(cubemap);
    }

    /// Queued 2D texture loads and unloads.
    pub fn pending_texture_counts(&self) -> (usize, usize) {
        self.textures.pending_counts()
    }

    /// Queued cubemap loads and unloads.
    pub fn pending_cubemap_counts(&self) -> (usize, usize) {
        self.cubemaps.pending_counts()
    }
}

impl RenderSnapshotSystem for RenderTextureManager {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        if target_type != TargetType::Main {
            return;
        }

        let (texture_loads, texture_unloads) = self.textures.drain();
        let (cubemap_loads, cubemap_unloads) = self.cubemaps.drain();
        let total = texture_loads.len()
            + texture_unloads.len()
            + cubemap_loads.len()
            + cubemap_unloads.len();
        if total == 0 {
            return;
        }
        log::debug!(
            "RenderTextureManager: {} texture loads, {} cubemap loads, {} texture unloads, {} cubemap unloads",
            texture_loads.len(),
            cubemap_loads.len(),
            texture_unloads.len(),
            cubemap_unloads.len()
        );

        let pre = snapshot.pre_render_command_list();
        for load in texture_loads {
            pre.add_load_texture_command(load.resource, load.data);
        }
        for load in cubemap_loads {
            pre.add_load_cubemap_command(load.resource, load.data);
        }

        let post = snapshot.post_render_command_list();
        for texture in texture_unloads {
            post.add_unload_texture_command(texture);
        }
        for cubemap in cubemap_unloads {
            post.add_unload_cubemap_command(cubemap);
        }
    }
}

static_assertions::assert_impl_all!(RenderTextureManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RenderCommand;
    use crate::test_utils::test_snapshot;
    use crate::texture::ImageFormat;
    use chilli_core::math::UVec2;

    fn manager() -> RenderTextureManager {
        RenderTextureManager::new(&RenderResourceConfig::default())
    }

    fn rgba_64() -> RenderTextureDesc {
        RenderTextureDesc::new(UVec2::new(64, 64), ImageFormat::RGBA8888).with_mipmaps(false)
    }

    fn faces(size: usize) -> CubemapData {
        std::array::from_fn(|_| vec![0u8; size].into_boxed_slice())
    }

    #[test]
    fn test_texture_2d_emits_single_load() {
        let manager = manager();
        let texture = manager
            .create_texture_2d(vec![0u8; 64 * 64 * 4].into_boxed_slice(), rgba_64())
            .unwrap();

        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Main, &mut snapshot);
        assert_eq!(manager.pending_texture_counts(), (0, 0));

        let pre = snapshot.claim_pre_render_command_list();
        assert_eq!(pre.len(), 1);
        match &pre.commands()[0] {
            RenderCommand::LoadTexture { texture: loaded, data } => {
                assert_eq!(*loaded, texture.to_ref());
                assert_eq!(data.len(), 64 * 64 * 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(snapshot.claim_post_render_command_list().is_empty());
    }

    #[test]
    fn test_wrong_data_size_is_rejected() {
        let manager = manager();
        let result = manager.create_texture_2d(vec![0u8; 100].into_boxed_slice(), rgba_64());
        assert_eq!(
            result.err(),
            Some(RenderingError::InvalidTextureData {
                expected: 64 * 64 * 4,
                actual: 100
            })
        );
        assert_eq!(manager.pending_texture_counts(), (0, 0));
    }

    #[test]
    fn test_compressed_data_is_not_size_checked() {
        let manager = manager();
        let desc = rgba_64().with_compression(crate::texture::ImageCompression::PVR4Bpp);
        assert!(manager.create_texture_2d(vec![0u8; 7].into_boxed_slice(), desc).is_ok());
    }

    #[test]
    fn test_cubemap_lifecycle() {
        let manager = manager();
        let desc = RenderTextureDesc::new(UVec2::new(8, 8), ImageFormat::RGB888);
        let cubemap = manager.create_cubemap(faces(8 * 8 * 3), desc).unwrap();
        assert!(cubemap.with(|t| t.is_cubemap()));
        manager.destroy_cubemap(cubemap);
        assert_eq!(manager.pending_cubemap_counts(), (1, 1));
        assert_eq!(manager.pending_texture_counts(), (0, 0));

        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Main, &mut snapshot);
        let pre = snapshot.claim_pre_render_command_list();
        let post = snapshot.claim_post_render_command_list();
        assert!(matches!(pre.commands(), [RenderCommand::LoadCubemap { .. }]));
        assert!(matches!(post.commands(), [RenderCommand::UnloadCubemap { .. }]));
    }

    #[test]
    fn test_cubemap_face_size_checked() {
        let manager = manager();
        let desc = RenderTextureDesc::new(UVec2::new(8, 8), ImageFormat::RGB888);
        assert!(matches!(
            manager.create_cubemap(faces(10), desc),
            Err(RenderingError::InvalidTextureData { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "Cannot destroy a cubemap as a 2D texture")]
    fn test_destroy_cubemap_as_texture_panics() {
        let manager = manager();
        let desc = RenderTextureDesc::new(UVec2::new(1, 1), ImageFormat::Lum8);
        let cubemap = manager.create_cubemap(faces(1), desc).unwrap();
        manager.destroy_texture_2d(cubemap);
    }

    #[test]
    fn test_offscreen_target_does_not_drain() {
        let manager = manager();
        let _texture = manager
            .create_texture_2d(vec![0u8; 64 * 64 * 4].into_boxed_slice(), rgba_64())
            .unwrap();
        let mut snapshot = test_snapshot();
        manager.on_render_snapshot(TargetType::Offscreen, &mut snapshot);
        assert_eq!(manager.pending_texture_counts(), (1, 0));
    }
}
