//! Configuration for resource pools and the command buffer queue.

use chilli_core::pool::PoolLimitPolicy;

/// Initial size and growth policy of one resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of slots allocated up front.
    pub capacity: usize,
    /// What to do once every slot is used.
    pub limit_policy: PoolLimitPolicy,
}

impl PoolConfig {
    pub const fn new(capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        Self {
            capacity,
            limit_policy,
        }
    }
}

/// Pool sizes for the render resource managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderResourceConfig {
    pub meshes: PoolConfig,
    pub textures: PoolConfig,
    pub material_groups: PoolConfig,
    pub shaders: PoolConfig,
}

impl Default for RenderResourceConfig {
    fn default() -> Self {
        Self {
            meshes: PoolConfig::new(256, PoolLimitPolicy::Expand),
            textures: PoolConfig::new(256, PoolLimitPolicy::Expand),
            material_groups: PoolConfig::new(100, PoolLimitPolicy::Expand),
            shaders: PoolConfig::new(32, PoolLimitPolicy::Expand),
        }
    }
}

impl RenderResourceConfig {
    /// Create a configuration with the default pool sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mesh pool configuration.
    pub fn with_meshes(mut self, capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        self.meshes = PoolConfig::new(capacity, limit_policy);
        self
    }

    /// Set the texture pool configuration.
    pub fn with_textures(mut self, capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        self.textures = PoolConfig::new(capacity, limit_policy);
        self
    }

    /// Set the material group pool configuration.
    pub fn with_material_groups(mut self, capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        self.material_groups = PoolConfig::new(capacity, limit_policy);
        self
    }

    /// Set the shader pool configuration.
    pub fn with_shaders(mut self, capacity: usize, limit_policy: PoolLimitPolicy) -> Self {
        self.shaders = PoolConfig::new(capacity, limit_policy);
        self
    }
}

/// Configuration of the command buffer queue
/// ([`RenderCommandBufferManager`](crate::pipeline::RenderCommandBufferManager)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBufferQueueConfig {
    /// Maximum number of compiled buffers waiting for the consumer. With the
    /// default of 1 the producer can build the next frame while the consumer
    /// executes the current one.
    pub max_queued_buffers: usize,
}

impl Default for CommandBufferQueueConfig {
    fn default() -> Self {
        Self {
            max_queued_buffers: 1,
        }
    }
}

impl CommandBufferQueueConfig {
    pub fn with_max_queued_buffers(mut self, max_queued_buffers: usize) -> Self {
        self.max_queued_buffers = max_queued_buffers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_sizes() {
        let config = RenderResourceConfig::default();
        assert_eq!(config.meshes.capacity, 256);
        assert_eq!(config.textures.capacity, 256);
        assert_eq!(config.material_groups.capacity, 100);
        assert_eq!(config.shaders.capacity, 32);
        assert_eq!(config.meshes.limit_policy, PoolLimitPolicy::Expand);
    }

    #[test]
    fn test_builder() {
        let config = RenderResourceConfig::new()
            .with_meshes(8, PoolLimitPolicy::Fixed)
            .with_textures(4, PoolLimitPolicy::Fixed)
            .with_shaders(2, PoolLimitPolicy::Fixed);
        assert_eq!(config.meshes, PoolConfig::new(8, PoolLimitPolicy::Fixed));
        assert_eq!(config.textures, PoolConfig::new(4, PoolLimitPolicy::Fixed));
        assert_eq!(config.shaders, PoolConfig::new(2, PoolLimitPolicy::Fixed));
        assert_eq!(config.material_groups.capacity, 100);
    }

    #[test]
    fn test_queue_default_is_double_buffered() {
        assert_eq!(CommandBufferQueueConfig::default().max_queued_buffers, 1);
    }
}
