//! Material groups for the forward renderer.
//!
//! Every group carries one collection per supported vertex format. Lit
//! (blinn) groups get a base pass material plus additive directional and
//! point light materials; when shadows are supported they also get a shadow
//! map material and a shadowed directional light material. Unlit groups
//! put their single material in the base or transparent slot depending on
//! whether blending is enabled.

use super::{
    BlinnMaterialDesc, CustomMaterialDesc, MaterialCollection, MaterialColours,
    MaterialShadingType, RenderMaterial, RenderMaterialGroup, RenderMaterialGroupLifecycle,
    RenderMaterialGroupManager, RenderPasses, RenderState, ShaderProgram,
    UniqueRenderMaterialGroup, UnlitMaterialDesc,
};
use crate::config::RenderResourceConfig;
use crate::error::RenderingResult;
use crate::mesh::VertexFormat;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::texture::RenderTextureRef;
use crate::types::TargetType;

/// Shader programs used for one vertex format.
struct FormatShaders {
    unlit: ShaderProgram,
    shadow_map: Option<ShaderProgram>,
    blinn: Option<BlinnShaders>,
}

struct BlinnShaders {
    base: ShaderProgram,
    directional: ShaderProgram,
    directional_shadows: ShaderProgram,
    point: ShaderProgram,
}

fn shaders_for(format: &VertexFormat) -> FormatShaders {
    if *format == VertexFormat::SPRITE {
        FormatShaders {
            unlit: ShaderProgram::SpriteUnlit,
            shadow_map: None,
            blinn: None,
        }
    } else if *format == VertexFormat::ANIMATED_MESH {
        FormatShaders {
            unlit: ShaderProgram::AnimatedUnlit,
            shadow_map: Some(ShaderProgram::AnimatedShadowMap),
            blinn: Some(BlinnShaders {
                base: ShaderProgram::AnimatedBlinnBase,
                directional: ShaderProgram::AnimatedBlinnDirectional,
                directional_shadows: ShaderProgram::AnimatedBlinnDirectionalShadows,
                point: ShaderProgram::AnimatedBlinnPoint,
            }),
        }
    } else {
        FormatShaders {
            unlit: ShaderProgram::StaticUnlit,
            shadow_map: Some(ShaderProgram::StaticShadowMap),
            blinn: Some(BlinnShaders {
                base: ShaderProgram::StaticBlinnBase,
                directional: ShaderProgram::StaticBlinnDirectional,
                directional_shadows: ShaderProgram::StaticBlinnDirectionalShadows,
                point: ShaderProgram::StaticBlinnPoint,
            }),
        }
    }
}

/// [`RenderMaterialGroupManager`] for the forward renderer.
pub struct ForwardRenderMaterialGroupManager {
    lifecycle: RenderMaterialGroupLifecycle,
    shadows_supported: bool,
}

impl ForwardRenderMaterialGroupManager {
    /// Create the manager. `shadows_supported` reflects the backend's
    /// capabilities and decides whether shadow materials are built.
    pub fn new(config: &RenderResourceConfig, shadows_supported: bool) -> Self {
        Self {
            lifecycle: RenderMaterialGroupLifecycle::new(config.material_groups),
            shadows_supported,
        }
    }

    pub fn shadows_supported(&self) -> bool {
        self.shadows_supported
    }

    /// Number of queued loads and unloads.
    pub fn pending_counts(&self) -> (usize, usize) {
        self.lifecycle.pending_counts()
    }

    fn shadow_map_material(shader: ShaderProgram) -> RenderMaterial {
        RenderMaterial::new(shader, RenderState::shadow_map(), MaterialColours::default())
    }

    fn unlit_collection(
        &self,
        format: VertexFormat,
        desc: &UnlitMaterialDesc,
    ) -> MaterialCollection {
        let shaders = shaders_for(&format);
        let mut collection = MaterialCollection::new(format);

        let colours = MaterialColours {
            emissive: desc.emissive_colour,
            ambient: desc.ambient_colour,
            ..MaterialColours::default()
        };
        let material = RenderMaterial::new(shaders.unlit, desc.state, colours)
            .with_texture(desc.texture.clone());
        let transparent = desc.state.is_transparency_enabled;
        let pass = if transparent {
            RenderPasses::Transparent
        } else {
            RenderPasses::Base
        };
        collection.set(pass, material);

        if self.shadows_supported
            && !transparent
            && let Some(shadow_map) = shaders.shadow_map
        {
            collection.set(RenderPasses::ShadowMap, Self::shadow_map_material(shadow_map));
        }
        collection
    }

    fn blinn_collection(
        &self,
        format: VertexFormat,
        desc: &BlinnMaterialDesc,
    ) -> MaterialCollection {
        let shaders = shaders_for(&format);
        let mut collection = MaterialCollection::new(format);
        let Some(blinn) = shaders.blinn else {
            return collection;
        };

        let base_colours = MaterialColours {
            emissive: desc.colours.emissive,
            ambient: desc.colours.ambient,
            ..MaterialColours::default()
        };
        let light_colours = MaterialColours {
            diffuse: desc.colours.diffuse,
            specular: desc.colours.specular,
            ..MaterialColours::default()
        };
        let light = |shader| {
            RenderMaterial::new(shader, RenderState::additive_light(), light_colours)
                .with_texture(desc.texture.clone())
        };

        collection.set(
            RenderPasses::Base,
            RenderMaterial::new(blinn.base, RenderState::default(), base_colours)
                .with_texture(desc.texture.clone()),
        );
        collection.set(RenderPasses::DirectionalLight, light(blinn.directional));
        collection.set(RenderPasses::PointLight, light(blinn.point));

        if self.shadows_supported {
            if let Some(shadow_map) = shaders.shadow_map {
                collection.set(RenderPasses::ShadowMap, Self::shadow_map_material(shadow_map));
            }
            collection.set(
                RenderPasses::DirectionalLightShadows,
                light(blinn.directional_shadows),
            );
        }
        collection
    }
}

impl RenderMaterialGroupManager for ForwardRenderMaterialGroupManager {
    fn create_unlit_render_material_group(
        &self,
        desc: UnlitMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup> {
        let collections = [
            VertexFormat::SPRITE,
            VertexFormat::STATIC_MESH,
            VertexFormat::ANIMATED_MESH,
        ]
        .into_iter()
        .map(|format| self.unlit_collection(format, &desc))
        .collect();
        self.lifecycle.add_render_material_group(RenderMaterialGroup::new(
            MaterialShadingType::Unlit,
            collections,
        ))
    }

    fn create_skybox_render_material_group(
        &self,
        cubemap: RenderTextureRef,
    ) -> RenderingResult<UniqueRenderMaterialGroup> {
        let mut collection = MaterialCollection::new(VertexFormat::STATIC_MESH);
        collection.set(
            RenderPasses::Skybox,
            RenderMaterial::new(
                ShaderProgram::Skybox,
                RenderState::skybox(),
                MaterialColours::default(),
            )
            .with_cubemap(cubemap),
        );
        self.lifecycle.add_render_material_group(RenderMaterialGroup::new(
            MaterialShadingType::Skybox,
            vec![collection],
        ))
    }

    fn create_blinn_render_material_group(
        &self,
        desc: BlinnMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup> {
        let collections = [VertexFormat::STATIC_MESH, VertexFormat::ANIMATED_MESH]
            .into_iter()
            .map(|format| self.blinn_collection(format, &desc))
            .collect();
        self.lifecycle.add_render_material_group(RenderMaterialGroup::new(
            MaterialShadingType::Blinn,
            collections,
        ))
    }

    fn create_custom_render_material_group(
        &self,
        desc: CustomMaterialDesc,
    ) -> RenderingResult<UniqueRenderMaterialGroup> {
        let mut collection = MaterialCollection::new(desc.vertex_format);
        for (shader, pass) in &desc.shaders {
            let state = match pass {
                RenderPasses::ShadowMap | RenderPasses::DirectionalLightShadows
                    if !self.shadows_supported =>
                {
                    log::warn!("Shadows are not supported, ignoring custom {pass:?} shader");
                    continue;
                }
                RenderPasses::ShadowMap => RenderState::shadow_map(),
                RenderPasses::Skybox => RenderState::skybox(),
                RenderPasses::DirectionalLight
                | RenderPasses::DirectionalLightShadows
                | RenderPasses::PointLight => RenderState::additive_light(),
                RenderPasses::Transparent => RenderState {
                    is_transparency_enabled: true,
                    ..desc.state
                },
                RenderPasses::Base => desc.state,
            };
            let mut material = RenderMaterial::new(shader.clone(), state, desc.colours);
            material.textures = desc.textures.clone();
            material.cubemaps = desc.cubemaps.clone();
            collection.set(*pass, material);
        }
        self.lifecycle.add_render_material_group(RenderMaterialGroup::new(
            desc.fallback_type,
            vec![collection],
        ))
    }

    fn destroy_render_material_group(&self, group: UniqueRenderMaterialGroup) {
        self.lifecycle.destroy_render_material_group(group);
    }
}

impl RenderSnapshotSystem for ForwardRenderMaterialGroupManager {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        self.lifecycle.on_render_snapshot(target_type, snapshot);
    }
}

static_assertions::assert_impl_all!(ForwardRenderMaterialGroupManager: Send, Sync);
