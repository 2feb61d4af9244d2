use chilli_core::math::UVec2;

use crate::resource::{RenderResource, RenderResourceRef, UniqueRenderResource};

slotmap::new_key_type! {
    /// Pool key of a [`RenderTexture`].
    pub struct RenderTextureKey;
}

/// Pixel format of texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    RGBA8888,
    RGB888,
    RGBA4444,
    RGB565,
    LumA88,
    Lum8,
    Depth16,
    Depth32,
}

impl ImageFormat {
    /// Bytes per pixel of uncompressed data.
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::RGBA8888 | Self::Depth32 => 4,
            Self::RGB888 => 3,
            Self::RGBA4444 | Self::RGB565 | Self::LumA88 | Self::Depth16 => 2,
            Self::Lum8 => 1,
        }
    }
}

/// Compression applied to texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageCompression {
    #[default]
    None,
    ETC1,
    PVR2Bpp,
    PVR4Bpp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFilterMode {
    Nearest,
    #[default]
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureWrapMode {
    #[default]
    Clamp,
    Repeat,
}

/// Everything the backend needs to know to create a texture, apart from
/// the pixel data itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTextureDesc {
    pub dimensions: UVec2,
    pub image_format: ImageFormat,
    pub image_compression: ImageCompression,
    pub filter_mode: TextureFilterMode,
    pub wrap_mode_s: TextureWrapMode,
    pub wrap_mode_t: TextureWrapMode,
    pub is_mipmapped: bool,
    /// Keep a CPU copy of the data so the texture can be restored after
    /// the graphics context is lost.
    pub should_backup_data: bool,
    /// The upload carries backend specific data after the pixels, which
    /// disables the data size check.
    pub has_extra_data: bool,
}

impl RenderTextureDesc {
    /// Uncompressed, bilinear, clamped, without mipmaps.
    pub fn new(dimensions: UVec2, image_format: ImageFormat) -> Self {
        Self {
            dimensions,
            image_format,
            image_compression: ImageCompression::None,
            filter_mode: TextureFilterMode::Bilinear,
            wrap_mode_s: TextureWrapMode::Clamp,
            wrap_mode_t: TextureWrapMode::Clamp,
            is_mipmapped: false,
            should_backup_data: false,
            has_extra_data: false,
        }
    }

    pub fn with_compression(mut self, compression: ImageCompression) -> Self {
        self.image_compression = compression;
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: TextureFilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    pub fn with_wrap_modes(mut self, s: TextureWrapMode, t: TextureWrapMode) -> Self {
        self.wrap_mode_s = s;
        self.wrap_mode_t = t;
        self
    }

    pub fn with_mipmaps(mut self, is_mipmapped: bool) -> Self {
        self.is_mipmapped = is_mipmapped;
        self
    }

    pub fn with_backup_data(mut self, should_backup_data: bool) -> Self {
        self.should_backup_data = should_backup_data;
        self
    }

    pub fn with_extra_data(mut self, has_extra_data: bool) -> Self {
        self.has_extra_data = has_extra_data;
        self
    }

    /// Size in bytes of one face of uncompressed data, or `None` for
    /// compressed formats whose size depends on the codec and for uploads
    /// carrying extra data.
    pub fn expected_data_size(&self) -> Option<usize> {
        if self.has_extra_data {
            return None;
        }
        match self.image_compression {
            ImageCompression::None => Some(
                self.dimensions.x as usize
                    * self.dimensions.y as usize
                    * self.image_format.bytes_per_pixel() as usize,
            ),
            _ => None,
        }
    }
}

/// Backend-side texture, either 2D or a six-faced cubemap.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTexture {
    desc: RenderTextureDesc,
    is_cubemap: bool,
}

impl RenderTexture {
    pub(crate) fn new_2d(desc: RenderTextureDesc) -> Self {
        Self {
            desc,
            is_cubemap: false,
        }
    }

    pub(crate) fn new_cubemap(desc: RenderTextureDesc) -> Self {
        Self {
            desc,
            is_cubemap: true,
        }
    }

    pub fn desc(&self) -> &RenderTextureDesc {
        &self.desc
    }

    pub fn dimensions(&self) -> UVec2 {
        self.desc.dimensions
    }

    pub fn image_format(&self) -> ImageFormat {
        self.desc.image_format
    }

    pub fn is_cubemap(&self) -> bool {
        self.is_cubemap
    }
}

impl RenderResource for RenderTexture {
    type Key = RenderTextureKey;
    const KIND: &'static str = "render texture";
}

/// Non-owning reference to a [`RenderTexture`].
pub type RenderTextureRef = RenderResourceRef<RenderTexture>;

/// Owning handle to a [`RenderTexture`].
pub type UniqueRenderTexture = UniqueRenderResource<RenderTexture>;
