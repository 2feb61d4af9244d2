//! Render materials, material groups and their managers.

mod forward;
mod manager;
mod render_material;
mod render_material_group;

pub use forward::ForwardRenderMaterialGroupManager;
pub use manager::{
    BlinnMaterialDesc, CustomMaterialDesc, RenderMaterialGroupLifecycle,
    RenderMaterialGroupManager, UnlitMaterialDesc,
};
pub use render_material::{
    MaterialColours, MaterialShader, MaterialShadingType, RenderMaterial, RenderState,
    ShaderProgram,
};
pub use render_material_group::{
    MaterialCollection, RenderMaterialGroup, RenderMaterialGroupKey, RenderMaterialGroupRef,
    RenderPasses, UniqueRenderMaterialGroup,
};
