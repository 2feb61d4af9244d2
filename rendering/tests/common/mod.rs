//! Shared fixtures for pipeline integration tests.
//!
//! A [`TestWorld`] wires the resource managers into a [`Renderer`] the way an
//! application would, and drains the queue into a headless processor.

#![allow(dead_code)]

use std::sync::Arc;

use chilli_core::colour::Colour;
use chilli_core::math::{Mat4, UVec2, Vec3};
use chilli_core::shapes::{Aabb, Sphere};
use chilli_rendering::material::{ForwardRenderMaterialGroupManager, UnlitMaterialDesc};
use chilli_rendering::mesh::{IndexFormat, PolygonType, RenderDynamicMesh};
use chilli_rendering::snapshot::{RenderCamera, RenderObject, RenderObjectMesh};
use chilli_rendering::texture::{ImageFormat, RenderTextureDesc};
use chilli_rendering::{
    HeadlessRenderCommandProcessor, MeshDesc, RenderCommandBufferManager, RenderCommandProcessor,
    RenderLayer, RenderMaterialGroupManager, RenderMeshManager, RenderResourceConfig,
    RenderShaderManager, RenderSnapshot, RenderTextureManager, Renderer,
    UniqueRenderMaterialGroup, UniqueRenderMesh, UniqueRenderTexture, VertexFormat,
};

pub const RESOLUTION: (u32, u32) = (320, 240);

/// Install a test logger. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A sprite quad with 4 vertices and 6 short indices.
pub fn quad_desc(name: &str) -> MeshDesc {
    let format = VertexFormat::SPRITE;
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
    MeshDesc::new(
        name,
        PolygonType::TriangleList,
        format,
        IndexFormat::Short,
        Aabb::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0)),
        Sphere::new(Vec3::zeros(), 0.75),
        4,
        6,
        vec![0u8; 4 * format.size() as usize].into_boxed_slice(),
        bytemuck::cast_slice(&indices).into(),
    )
}

/// A dynamic sprite quad, small enough to be batched.
pub fn dynamic_quad() -> RenderDynamicMesh {
    let format = VertexFormat::SPRITE;
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
    RenderDynamicMesh::new(
        PolygonType::TriangleList,
        format,
        IndexFormat::Short,
        4,
        6,
        Sphere::new(Vec3::zeros(), 0.75),
        vec![0u8; 4 * format.size() as usize],
        bytemuck::cast_slice::<u16, u8>(&indices).to_vec(),
    )
}

/// Resource managers, a renderer fed by them, and the consumer side.
pub struct TestWorld {
    pub shaders: Arc<RenderShaderManager>,
    pub textures: Arc<RenderTextureManager>,
    pub materials: Arc<ForwardRenderMaterialGroupManager>,
    pub meshes: Arc<RenderMeshManager>,
    pub queue: Arc<RenderCommandBufferManager>,
    pub renderer: Renderer,
    pub processor: HeadlessRenderCommandProcessor,
}

impl TestWorld {
    pub fn new() -> Self {
        init_logging();
        let config = RenderResourceConfig::default();
        let shaders = Arc::new(RenderShaderManager::new(&config));
        let textures = Arc::new(RenderTextureManager::new(&config));
        let materials = Arc::new(ForwardRenderMaterialGroupManager::new(&config, false));
        let meshes = Arc::new(RenderMeshManager::new(&config));
        let queue = Arc::new(RenderCommandBufferManager::default());

        // Shaders and textures first so material groups always find them
        // loaded.
        let renderer = Renderer::new(Arc::clone(&queue))
            .with_system(shaders.clone())
            .with_system(textures.clone())
            .with_system(materials.clone())
            .with_system(meshes.clone());

        Self {
            shaders,
            textures,
            materials,
            meshes,
            queue,
            renderer,
            processor: HeadlessRenderCommandProcessor::new(),
        }
    }

    /// A 1x1 opaque white texture.
    pub fn white_texture(&self) -> UniqueRenderTexture {
        self.textures
            .create_texture_2d(
                vec![255u8; 4].into_boxed_slice(),
                RenderTextureDesc::new(UVec2::new(1, 1), ImageFormat::RGBA8888),
            )
            .unwrap()
    }

    /// A texture usable as an offscreen colour target.
    pub fn target_texture(&self, width: u32, height: u32) -> UniqueRenderTexture {
        self.textures
            .create_texture_2d(
                vec![0u8; (width * height * 4) as usize].into_boxed_slice(),
                RenderTextureDesc::new(UVec2::new(width, height), ImageFormat::RGBA8888),
            )
            .unwrap()
    }

    pub fn unlit_group(&self, texture: &UniqueRenderTexture) -> UniqueRenderMaterialGroup {
        self.materials
            .create_unlit_render_material_group(UnlitMaterialDesc::new(texture.to_ref()))
            .unwrap()
    }

    pub fn quad(&self, name: &str) -> UniqueRenderMesh {
        self.meshes.create_render_mesh_from_desc(quad_desc(name)).unwrap()
    }

    /// An empty main-screen snapshot.
    pub fn main_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::new(
            None,
            UVec2::new(RESOLUTION.0, RESOLUTION.1),
            Colour::BLACK,
            RenderCamera::default(),
        )
    }

    /// Compile a frame, push it, pop it and run it through the processor.
    pub fn run_frame(
        &mut self,
        main: RenderSnapshot,
        offscreen: impl IntoIterator<Item = RenderSnapshot>,
    ) {
        self.renderer.render_frame(main, offscreen);
        let buffer = self
            .queue
            .try_pop()
            .expect("A rendered frame should be queued");
        self.processor.process(buffer);
    }
}

/// A standard layer object drawing `mesh` at `position`.
pub fn static_object(
    group: &UniqueRenderMaterialGroup,
    mesh: &UniqueRenderMesh,
    position: Vec3,
) -> RenderObject {
    RenderObject::from_render_mesh(
        group.to_ref(),
        mesh.to_ref(),
        Mat4::new_translation(&position),
        RenderLayer::Standard,
    )
}

/// A standard layer object drawing a dynamic quad owned by `snapshot`.
pub fn dynamic_object(
    snapshot: &mut RenderSnapshot,
    group: &UniqueRenderMaterialGroup,
    position: Vec3,
) -> RenderObject {
    let id = snapshot.add_render_dynamic_mesh(dynamic_quad());
    RenderObject::new(
        group.to_ref(),
        RenderObjectMesh::Dynamic(id),
        Mat4::new_translation(&position),
        Sphere::new(position, 0.75),
        RenderLayer::Standard,
    )
}
