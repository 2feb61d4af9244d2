use super::{RenderShader, UniqueRenderShader};
use crate::config::RenderResourceConfig;
use crate::error::{RenderingError, RenderingResult};
use crate::resource::DeferredLifecycle;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::types::TargetType;

/// Vertex and fragment sources uploaded by a shader load command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Creates and destroys [`RenderShader`]s used by custom materials.
///
/// Like meshes and textures, shaders are queued on creation and their load
/// and unload commands only go to the main target's snapshot.
pub struct RenderShaderManager {
    lifecycle: DeferredLifecycle<RenderShader, ShaderSource>,
}

impl RenderShaderManager {
    pub fn new(config: &RenderResourceConfig) -> Self {
        Self {
            lifecycle: DeferredLifecycle::new(config.shaders),
        }
    }

    /// Allocate a shader and queue its sources for compilation.
    ///
    /// Returns [`RenderingError::InvalidShaderSource`] if either source is
    /// empty.
    pub fn create_render_shader(
        &self,
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> RenderingResult<UniqueRenderShader> {
        let name = name.into();
        let source = ShaderSource {
            vertex: vertex.into(),
            fragment: fragment.into(),
        };
        if source.vertex.trim().is_empty() {
            return Err(RenderingError::InvalidShaderSource(format!(
                "{name}: empty vertex shader"
            )));
        }
        if source.fragment.trim().is_empty() {
            return Err(RenderingError::InvalidShaderSource(format!(
                "{name}: empty fragment shader"
            )));
        }
        Ok(self.lifecycle.create(RenderShader::new(name), source)?)
    }

    /// Queue a shader for unloading.
    pub fn destroy_render_shader(&self, shader: UniqueRenderShader) {
        self.lifecycle.destroy(shader);
    }

    /// Number of queued loads and unloads.
    pub fn pending_counts(&self) -> (usize, usize) {
        self.lifecycle.pending_counts()
    }
}

impl RenderSnapshotSystem for RenderShaderManager {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        if target_type != TargetType::Main {
            return;
        }

        let (loads, unloads) = self.lifecycle.drain();
        if loads.is_empty() && unloads.is_empty() {
            return;
        }
        log::debug!(
            "RenderShaderManager: {} loads, {} unloads",
            loads.len(),
            unloads.len()
        );

        let pre = snapshot.pre_render_command_list();
        for load in loads {
            pre.add_load_shader_command(load.resource, load.data.vertex, load.data.fragment);
        }
        let post = snapshot.post_render_command_list();
        for shader in unloads {
            post.add_unload_shader_command(shader);
        }
    }
}

static_assertions::assert_impl_all!(RenderShaderManager: Send, Sync);
