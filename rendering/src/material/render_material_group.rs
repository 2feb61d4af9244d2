use crate::mesh::VertexFormat;
use crate::resource::{RenderResource, RenderResourceRef, UniqueRenderResource};

use super::{MaterialShadingType, RenderMaterial};

slotmap::new_key_type! {
    /// Pool key of a [`RenderMaterialGroup`].
    pub struct RenderMaterialGroupKey;
}

/// Render passes a material can take part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPasses {
    ShadowMap,
    Skybox,
    Base,
    DirectionalLight,
    DirectionalLightShadows,
    PointLight,
    Transparent,
}

impl RenderPasses {
    /// Number of material slots per vertex format.
    pub const COUNT: usize = 7;

    pub const ALL: [Self; Self::COUNT] = [
        Self::ShadowMap,
        Self::Skybox,
        Self::Base,
        Self::DirectionalLight,
        Self::DirectionalLightShadows,
        Self::PointLight,
        Self::Transparent,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The materials a group uses for one vertex format, one slot per pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialCollection {
    vertex_format: VertexFormat,
    materials: [Option<RenderMaterial>; RenderPasses::COUNT],
}

impl MaterialCollection {
    pub fn new(vertex_format: VertexFormat) -> Self {
        Self {
            vertex_format,
            materials: Default::default(),
        }
    }

    pub fn vertex_format(&self) -> &VertexFormat {
        &self.vertex_format
    }

    pub fn set(&mut self, pass: RenderPasses, material: RenderMaterial) {
        self.materials[pass.index()] = Some(material);
    }

    pub fn get(&self, pass: RenderPasses) -> Option<&RenderMaterial> {
        self.materials[pass.index()].as_ref()
    }

    /// Number of filled slots.
    pub fn num_materials(&self) -> usize {
        self.materials.iter().flatten().count()
    }
}

/// All materials needed to render something with one logical material,
/// across every vertex format and render pass it supports.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMaterialGroup {
    shading_type: MaterialShadingType,
    collections: Vec<MaterialCollection>,
}

impl RenderMaterialGroup {
    pub fn new(shading_type: MaterialShadingType, collections: Vec<MaterialCollection>) -> Self {
        Self {
            shading_type,
            collections,
        }
    }

    pub fn shading_type(&self) -> MaterialShadingType {
        self.shading_type
    }

    pub fn collections(&self) -> &[MaterialCollection] {
        &self.collections
    }

    /// Material for `pass` when drawing geometry in `vertex_format`.
    pub fn render_material(
        &self,
        vertex_format: &VertexFormat,
        pass: RenderPasses,
    ) -> Option<&RenderMaterial> {
        self.collections
            .iter()
            .find(|c| c.vertex_format() == vertex_format)
            .and_then(|c| c.get(pass))
    }

    pub fn has_material(&self, vertex_format: &VertexFormat, pass: RenderPasses) -> bool {
        self.render_material(vertex_format, pass).is_some()
    }
}

impl RenderResource for RenderMaterialGroup {
    type Key = RenderMaterialGroupKey;
    const KIND: &'static str = "render material group";
}

/// Non-owning reference to a [`RenderMaterialGroup`].
pub type RenderMaterialGroupRef = RenderResourceRef<RenderMaterialGroup>;

/// Owning handle to a [`RenderMaterialGroup`].
pub type UniqueRenderMaterialGroup = UniqueRenderResource<RenderMaterialGroup>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{MaterialColours, RenderState, ShaderProgram};

    #[test]
    fn test_lookup_by_format_and_pass() {
        let mut sprite = MaterialCollection::new(VertexFormat::SPRITE);
        sprite.set(
            RenderPasses::Transparent,
            RenderMaterial::new(
                ShaderProgram::SpriteUnlit,
                RenderState::default(),
                MaterialColours::default(),
            ),
        );
        let group = RenderMaterialGroup::new(MaterialShadingType::Unlit, vec![sprite]);

        assert!(group.has_material(&VertexFormat::SPRITE, RenderPasses::Transparent));
        assert!(!group.has_material(&VertexFormat::SPRITE, RenderPasses::Base));
        assert!(!group.has_material(&VertexFormat::STATIC_MESH, RenderPasses::Transparent));
        assert_eq!(group.collections()[0].num_materials(), 1);
    }

    #[test]
    fn test_pass_indices_are_dense() {
        for (i, pass) in RenderPasses::ALL.iter().enumerate() {
            assert_eq!(pass.index(), i);
        }
    }
}
