use crate::command::{RenderCommand, RenderCommandBuffer};
use crate::material::MaterialShader;
use crate::resource::{BackendHandle, RenderResource, RenderResourceRef};

use super::RenderCommandProcessor;

/// Counters of everything a processor has executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessorStats {
    pub buffers: u64,
    pub shaders_loaded: u64,
    pub textures_loaded: u64,
    pub cubemaps_loaded: u64,
    pub meshes_loaded: u64,
    pub material_groups_loaded: u64,
    pub shaders_unloaded: u64,
    pub textures_unloaded: u64,
    pub cubemaps_unloaded: u64,
    pub meshes_unloaded: u64,
    pub material_groups_unloaded: u64,
    /// Loads skipped because the resource was released first.
    pub skipped_loads: u64,
    pub targets_rendered: u64,
    pub cameras_applied: u64,
    pub lights_applied: u64,
    pub materials_applied: u64,
    pub meshes_applied: u64,
    pub batches_applied: u64,
    pub animations_applied: u64,
    pub instances_rendered: u64,
}

/// Processor that validates and executes commands without a GPU.
///
/// Loads assign fresh [`BackendHandle`]s and move resources to `Loaded`;
/// unloads move them to `Unloaded` and drop the owning handle. Draw commands
/// are checked for ordering and counted.
#[derive(Debug, Default)]
pub struct HeadlessRenderCommandProcessor {
    next_handle: u64,
    in_target: bool,
    has_material: bool,
    has_mesh: bool,
    stats: ProcessorStats,
}

impl HeadlessRenderCommandProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &ProcessorStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ProcessorStats::default();
    }

    /// Give `resource` a backend handle. Returns false if the resource was
    /// released before its load command ran.
    fn load<R: RenderResource>(&mut self, resource: &RenderResourceRef<R>) -> bool {
        if !resource.is_alive() {
            log::warn!("Skipping load of a {} released before it was loaded", R::KIND);
            self.stats.skipped_loads += 1;
            return false;
        }
        self.next_handle += 1;
        resource.mark_loaded(BackendHandle(self.next_handle));
        true
    }

    fn assert_in_target(&self, command: &RenderCommand) {
        assert!(
            self.in_target,
            "{} issued outside of a Begin/End pair",
            command.name()
        );
    }

    fn execute(&mut self, command: RenderCommand) {
        log::trace!("Executing {}", command.name());
        match command {
            RenderCommand::LoadShader {
                shader,
                vertex_source,
                fragment_source,
            } => {
                if self.load(&shader) {
                    log::trace!(
                        "Compiled shader ({} + {} bytes of source)",
                        vertex_source.len(),
                        fragment_source.len()
                    );
                    self.stats.shaders_loaded += 1;
                }
            }
            RenderCommand::LoadTexture { texture, data } => {
                debug_assert!(!texture.is_alive() || !texture.with(|t| t.is_cubemap()));
                if self.load(&texture) {
                    log::trace!("Loaded texture ({} bytes)", data.len());
                    self.stats.textures_loaded += 1;
                }
            }
            RenderCommand::LoadCubemap { cubemap, .. } => {
                if self.load(&cubemap) {
                    self.stats.cubemaps_loaded += 1;
                }
            }
            RenderCommand::LoadMesh { mesh, .. } => {
                if self.load(&mesh) {
                    self.stats.meshes_loaded += 1;
                }
            }
            RenderCommand::LoadMaterialGroup { material_group } => {
                if self.load(&material_group) {
                    self.stats.material_groups_loaded += 1;
                }
            }
            RenderCommand::Begin { .. } => {
                assert!(!self.in_target, "Begin issued before the previous End");
                self.in_target = true;
            }
            RenderCommand::BeginWithTargetGroup { target_group, .. } => {
                assert!(!self.in_target, "BeginWithTargetGroup issued before the previous End");
                for target in [target_group.colour_target(), target_group.depth_target()]
                    .into_iter()
                    .flatten()
                {
                    target.backend_handle();
                }
                self.in_target = true;
            }
            RenderCommand::ApplyCamera { .. } => {
                self.assert_in_target(&command);
                self.stats.cameras_applied += 1;
            }
            RenderCommand::ApplyAmbientLight { .. } | RenderCommand::ApplyPointLight { .. } => {
                self.assert_in_target(&command);
                self.stats.lights_applied += 1;
            }
            RenderCommand::ApplyDirectionalLight { ref shadow_map, .. } => {
                self.assert_in_target(&command);
                if let Some(shadow_map) = shadow_map {
                    shadow_map.backend_handle();
                }
                self.stats.lights_applied += 1;
            }
            RenderCommand::ApplyMaterial {
                ref material_group,
                ref vertex_format,
                pass,
            } => {
                self.assert_in_target(&command);
                material_group.backend_handle();
                material_group.with(|group| {
                    let Some(material) = group.render_material(vertex_format, pass) else {
                        panic!(
                            "Material group has no material for {pass:?} with this vertex format"
                        );
                    };
                    if let MaterialShader::Custom(shader) = &material.shader {
                        shader.backend_handle();
                    }
                    for texture in material.textures.iter().chain(&material.cubemaps) {
                        texture.backend_handle();
                    }
                });
                self.has_material = true;
                self.has_mesh = false;
                self.stats.materials_applied += 1;
            }
            RenderCommand::ApplyMesh { ref mesh } => {
                self.assert_in_target(&command);
                mesh.backend_handle();
                self.has_mesh = true;
                self.stats.meshes_applied += 1;
            }
            RenderCommand::ApplyDynamicMesh { .. } => {
                self.assert_in_target(&command);
                self.has_mesh = true;
                self.stats.meshes_applied += 1;
            }
            RenderCommand::ApplyMeshBatch { .. } => {
                self.assert_in_target(&command);
                self.has_mesh = true;
                self.stats.batches_applied += 1;
            }
            RenderCommand::ApplySkinnedAnimation { .. } => {
                self.assert_in_target(&command);
                self.stats.animations_applied += 1;
            }
            RenderCommand::RenderInstance { .. } => {
                self.assert_in_target(&command);
                assert!(
                    self.has_material && self.has_mesh,
                    "RenderInstance issued without an applied material and mesh"
                );
                self.stats.instances_rendered += 1;
            }
            RenderCommand::End => {
                assert!(self.in_target, "End issued without a matching Begin");
                self.in_target = false;
                self.has_material = false;
                self.has_mesh = false;
                self.stats.targets_rendered += 1;
            }
            RenderCommand::UnloadShader { shader } => {
                shader.mark_unloaded();
                self.stats.shaders_unloaded += 1;
            }
            RenderCommand::UnloadTexture { texture } => {
                texture.mark_unloaded();
                self.stats.textures_unloaded += 1;
            }
            RenderCommand::UnloadCubemap { cubemap } => {
                cubemap.mark_unloaded();
                self.stats.cubemaps_unloaded += 1;
            }
            RenderCommand::UnloadMesh { mesh } => {
                mesh.mark_unloaded();
                self.stats.meshes_unloaded += 1;
            }
            RenderCommand::UnloadMaterialGroup { material_group } => {
                material_group.mark_unloaded();
                self.stats.material_groups_unloaded += 1;
            }
        }
    }
}

impl RenderCommandProcessor for HeadlessRenderCommandProcessor {
    fn process(&mut self, buffer: RenderCommandBuffer) {
        for command in buffer.into_commands() {
            self.execute(command);
        }
        assert!(!self.in_target, "Render command buffer ended inside a Begin/End pair");
        self.stats.buffers += 1;
    }
}
