use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use miterline_core::mesh::MeshBuffers;
use miterline_core::mesh::expand::{create_indices, duplicate, relative};
use miterline_core::path::{Path, Point};

fn spiral(points: usize) -> Path {
    let points = (0..points)
        .map(|i| {
            let t = i as f32 * 0.1;
            Point::new(t.cos() * t, t.sin() * t, 0.0)
        })
        .collect();
    match Path::new(points) {
        Ok(path) => path,
        Err(e) => panic!("invalid benchmark path: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Individual expansion steps
// ---------------------------------------------------------------------------

fn bench_duplicate(c: &mut Criterion) {
    let path = spiral(1024);
    c.bench_function("duplicate_positions_1024", |b| {
        b.iter(|| duplicate(black_box(path.points()), false));
    });
    c.bench_function("duplicate_mirror_1024", |b| {
        b.iter(|| duplicate(black_box(path.points()), true));
    });
}

fn bench_relative(c: &mut Criterion) {
    let path = spiral(1024);
    c.bench_function("relative_previous_1024", |b| {
        b.iter(|| relative(black_box(path.points()), -1));
    });
}

fn bench_create_indices(c: &mut Criterion) {
    c.bench_function("create_indices_1024", |b| {
        b.iter(|| create_indices(black_box(1024)));
    });
}

// ---------------------------------------------------------------------------
// Full mesh build
// ---------------------------------------------------------------------------

fn bench_mesh_buffers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_buffers_from_path");
    for points in [16, 256, 4096, Path::MAX_POINTS] {
        let path = spiral(points);
        group.bench_with_input(BenchmarkId::from_parameter(points), &path, |b, path| {
            b.iter(|| MeshBuffers::from_path(black_box(path)));
        });
    }
    group.finish();
}

fn bench_to_cpu_mesh(c: &mut Criterion) {
    let buffers = MeshBuffers::from_path(&spiral(4096));
    c.bench_function("to_cpu_mesh_4096", |b| {
        b.iter(|| black_box(&buffers).to_cpu_mesh());
    });
}

criterion_group!(
    benches,
    bench_duplicate,
    bench_relative,
    bench_create_indices,
    bench_mesh_buffers,
    bench_to_cpu_mesh,
);
criterion_main!(benches);
