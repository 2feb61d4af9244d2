use std::sync::Arc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use chilli_core::colour::Colour;
use chilli_core::math::{Mat4, UVec2, Vec3};
use chilli_core::shapes::{Aabb, Sphere};
use chilli_rendering::material::UnlitMaterialDesc;
use chilli_rendering::mesh::{IndexFormat, PolygonType, RenderDynamicMesh};
use chilli_rendering::snapshot::{PointRenderLight, RenderCamera, RenderObject, RenderObjectMesh};
use chilli_rendering::texture::{ImageFormat, RenderTextureDesc};
use chilli_rendering::{
    ForwardRenderMaterialGroupManager, HeadlessRenderCommandProcessor, MeshDesc,
    RenderCommandBufferManager, RenderCommandCompiler, RenderCommandProcessor, RenderLayer,
    RenderMaterialGroupManager, RenderMeshManager, RenderResourceConfig, RenderSnapshot,
    RenderTextureManager, Renderer, UniqueRenderMaterialGroup, UniqueRenderMesh,
    UniqueRenderTexture, VertexFormat,
};

const OBJECTS: usize = 1000;

struct Resources {
    textures: Arc<RenderTextureManager>,
    materials: Arc<ForwardRenderMaterialGroupManager>,
    meshes: Arc<RenderMeshManager>,
    _texture: UniqueRenderTexture,
    groups: Vec<UniqueRenderMaterialGroup>,
    mesh: UniqueRenderMesh,
}

impl Resources {
    fn new(num_groups: usize) -> Self {
        let config = RenderResourceConfig::default();
        let textures = Arc::new(RenderTextureManager::new(&config));
        let materials = Arc::new(ForwardRenderMaterialGroupManager::new(&config, false));
        let meshes = Arc::new(RenderMeshManager::new(&config));

        let texture = textures
            .create_texture_2d(
                vec![255u8; 4].into_boxed_slice(),
                RenderTextureDesc::new(UVec2::new(1, 1), ImageFormat::RGBA8888),
            )
            .unwrap();
        let groups = (0..num_groups)
            .map(|_| {
                materials
                    .create_unlit_render_material_group(UnlitMaterialDesc::new(texture.to_ref()))
                    .unwrap()
            })
            .collect();

        let format = VertexFormat::SPRITE;
        let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
        let mesh = meshes
            .create_render_mesh_from_desc(MeshDesc::new(
                "quad",
                PolygonType::TriangleList,
                format,
                IndexFormat::Short,
                Aabb::new(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0)),
                Sphere::new(Vec3::zeros(), 0.75),
                4,
                6,
                vec![0u8; 4 * format.size() as usize].into_boxed_slice(),
                bytemuck::cast_slice(&indices).into(),
            ))
            .unwrap();

        Self {
            textures,
            materials,
            meshes,
            _texture: texture,
            groups,
            mesh,
        }
    }

    fn renderer(&self) -> Renderer {
        Renderer::new(Arc::new(RenderCommandBufferManager::default()))
            .with_system(self.textures.clone())
            .with_system(self.materials.clone())
            .with_system(self.meshes.clone())
    }
}

fn empty_snapshot() -> RenderSnapshot {
    RenderSnapshot::new(
        None,
        UVec2::new(1280, 720),
        Colour::BLACK,
        RenderCamera::default(),
    )
}

fn position(i: usize) -> Vec3 {
    Vec3::new((i % 32) as f32, (i / 32) as f32, 0.0)
}

fn static_snapshot(resources: &Resources) -> RenderSnapshot {
    let mut snapshot = empty_snapshot();
    for i in 0..OBJECTS {
        let group = &resources.groups[i % resources.groups.len()];
        snapshot.add_render_object(RenderObject::from_render_mesh(
            group.to_ref(),
            resources.mesh.to_ref(),
            Mat4::new_translation(&position(i)),
            RenderLayer::Standard,
        ));
    }
    snapshot
}

fn dynamic_snapshot(resources: &Resources) -> RenderSnapshot {
    let format = VertexFormat::SPRITE;
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];
    let mut snapshot = empty_snapshot();
    for i in 0..OBJECTS {
        let id = snapshot.add_render_dynamic_mesh(RenderDynamicMesh::new(
            PolygonType::TriangleList,
            format,
            IndexFormat::Short,
            4,
            6,
            Sphere::new(Vec3::zeros(), 0.75),
            vec![0u8; 4 * format.size() as usize],
            bytemuck::cast_slice::<u16, u8>(&indices).to_vec(),
        ));
        snapshot.add_render_object(RenderObject::new(
            resources.groups[0].to_ref(),
            RenderObjectMesh::Dynamic(id),
            Mat4::new_translation(&position(i)),
            Sphere::new(position(i), 0.75),
            RenderLayer::Standard,
        ));
    }
    snapshot
}

// ---------------------------------------------------------------------------
// Snapshot assembly
// ---------------------------------------------------------------------------

fn bench_snapshot_assembly(c: &mut Criterion) {
    let resources = Resources::new(8);
    c.bench_function("snapshot_add_1000_static_objects", |b| {
        b.iter(|| black_box(static_snapshot(&resources)));
    });
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

fn bench_compile_static(c: &mut Criterion) {
    let resources = Resources::new(8);
    let compiler = RenderCommandCompiler::default();
    c.bench_function("compile_1000_static_objects_8_materials", |b| {
        b.iter_batched(
            || static_snapshot(&resources),
            |mut snapshot| black_box(compiler.compile(&mut snapshot)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_compile_batched(c: &mut Criterion) {
    let resources = Resources::new(1);
    let compiler = RenderCommandCompiler::default();
    c.bench_function("compile_1000_dynamic_objects_batched", |b| {
        b.iter_batched(
            || dynamic_snapshot(&resources),
            |mut snapshot| black_box(compiler.compile(&mut snapshot)),
            BatchSize::SmallInput,
        );
    });

    let unbatched = RenderCommandCompiler::new().with_batch_vertex_limit(0);
    c.bench_function("compile_1000_dynamic_objects_unbatched", |b| {
        b.iter_batched(
            || dynamic_snapshot(&resources),
            |mut snapshot| black_box(unbatched.compile(&mut snapshot)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_compile_point_lights(c: &mut Criterion) {
    let resources = Resources::new(8);
    let compiler = RenderCommandCompiler::default();
    c.bench_function("compile_1000_static_objects_4_point_lights", |b| {
        b.iter_batched(
            || {
                let mut snapshot = static_snapshot(&resources);
                for i in 0..4 {
                    snapshot.add_point_render_light(PointRenderLight::new(
                        Colour::WHITE,
                        Vec3::new(i as f32 * 8.0, 16.0, 2.0),
                        Vec3::new(1.0, 0.1, 0.01),
                        10.0,
                    ));
                }
                snapshot
            },
            |mut snapshot| black_box(compiler.compile(&mut snapshot)),
            BatchSize::SmallInput,
        );
    });
}

// ---------------------------------------------------------------------------
// Full frame
// ---------------------------------------------------------------------------

fn bench_frame_round_trip(c: &mut Criterion) {
    let resources = Resources::new(8);
    let renderer = resources.renderer();
    let mut processor = HeadlessRenderCommandProcessor::new();

    // Load everything once so later frames only draw.
    renderer.render_frame(empty_snapshot(), []);
    if let Some(buffer) = renderer.queue().try_pop() {
        processor.process(buffer);
    }

    c.bench_function("frame_render_and_process_1000_objects", |b| {
        b.iter_batched(
            || static_snapshot(&resources),
            |snapshot| {
                renderer.render_frame(snapshot, []);
                if let Some(buffer) = renderer.queue().try_pop() {
                    processor.process(buffer);
                }
            },
            BatchSize::SmallInput,
        );
    });
    black_box(processor.stats().instances_rendered);
}

criterion_group!(
    benches,
    bench_snapshot_assembly,
    bench_compile_static,
    bench_compile_batched,
    bench_compile_point_lights,
    bench_frame_round_trip,
);
criterion_main!(benches);
