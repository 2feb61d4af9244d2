use criterion::{Criterion, black_box, criterion_group, criterion_main};

use chilli_core::math::{self, Mat4, Vec3};
use chilli_core::pool::{ObjectPool, PoolLimitPolicy, slotmap};
use chilli_core::shapes::Sphere;

slotmap::new_key_type! { struct BenchKey; }

// ---------------------------------------------------------------------------
// Object pool
// ---------------------------------------------------------------------------

fn bench_pool_churn(c: &mut Criterion) {
    let pool = ObjectPool::<BenchKey, [f32; 16]>::new(256, PoolLimitPolicy::Fixed);
    c.bench_function("pool_allocate_deallocate", |b| {
        b.iter(|| {
            let key = pool.allocate(black_box([0.0; 16])).unwrap();
            black_box(pool.deallocate(key));
        });
    });
}

fn bench_pool_expand(c: &mut Criterion) {
    c.bench_function("pool_expand_from_1_to_1024", |b| {
        b.iter(|| {
            let pool = ObjectPool::<BenchKey, u32>::new(1, PoolLimitPolicy::Expand);
            for i in 0..1024 {
                pool.allocate(black_box(i)).unwrap();
            }
            black_box(pool.capacity())
        });
    });
}

fn bench_pool_lookup(c: &mut Criterion) {
    let pool = ObjectPool::<BenchKey, u32>::new(1024, PoolLimitPolicy::Fixed);
    let keys: Vec<_> = (0..1024).map(|i| pool.allocate(i).unwrap()).collect();
    c.bench_function("pool_with_1024", |b| {
        b.iter(|| {
            let mut sum = 0u32;
            for key in &keys {
                sum = sum.wrapping_add(pool.with(*key, |v| *v).unwrap_or(0));
            }
            black_box(sum)
        });
    });
}

// ---------------------------------------------------------------------------
// Bounding volumes
// ---------------------------------------------------------------------------

fn bench_sphere_transform(c: &mut Criterion) {
    let matrix = math::mat4_from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::new_scaling(2.0);
    let sphere = Sphere::new(Vec3::new(0.5, 0.5, 0.5), 1.0);
    c.bench_function("sphere_transformed", |b| {
        b.iter(|| black_box(black_box(sphere).transformed(black_box(&matrix))));
    });
}

criterion_group!(
    benches,
    bench_pool_churn,
    bench_pool_expand,
    bench_pool_lookup,
    bench_sphere_transform,
);
criterion_main!(benches);
