//! Rendering error types.

use chilli_core::pool::PoolError;

/// Recoverable errors raised while creating render resources.
///
/// Contract violations (claiming a bucket twice, reading an unloaded
/// resource, ...) are panics and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderingError {
    /// The resource pool has no room left.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// Uncompressed texture data does not match the described dimensions.
    #[error("invalid texture data: expected {expected} bytes, got {actual}")]
    InvalidTextureData { expected: usize, actual: usize },
    /// Mesh data does not match the described counts and formats.
    #[error("invalid mesh data: {0}")]
    InvalidMeshData(String),
    /// Shader sources are missing.
    #[error("invalid shader source: {0}")]
    InvalidShaderSource(String),
}

/// Result alias used throughout the rendering crate.
pub type RenderingResult<T> = Result<T, RenderingError>;
