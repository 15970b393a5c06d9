use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formicary_core::spatial_grid::SpatialGrid;
use formicary_core::{AppConfig, Colony};
use formicary_data::{Marker, MarkerKind, Vec2};

fn markers() -> Vec<Marker> {
    (0..10_000)
        .map(|i| {
            let x = (i % 100) as f32 * 19.2;
            let y = (i / 100) as f32 * 10.8;
            Marker::new(Vec2::new(x, y), MarkerKind::ToFood, 1.0)
        })
        .collect()
}

fn filled_grid() -> SpatialGrid<Marker> {
    let mut grid = SpatialGrid::new(40.0, 1920.0, 1080.0);
    for marker in markers() {
        grid.insert(marker);
    }
    grid
}

fn bench_grid_build(c: &mut Criterion) {
    let markers = markers();
    c.bench_function("spatial_grid_build_10000", |b| {
        b.iter(|| {
            let mut grid = SpatialGrid::new(40.0, 1920.0, 1080.0);
            for marker in &markers {
                grid.insert(*marker);
            }
            black_box(grid)
        })
    });
}

fn bench_grid_query(c: &mut Criterion) {
    let grid = filled_grid();
    c.bench_function("spatial_grid_query_40_radius", |b| {
        b.iter(|| {
            let total: f32 = grid
                .query_near(black_box(Vec2::new(960.0, 540.0)), 40.0)
                .map(|m| m.intensity)
                .sum();
            black_box(total)
        })
    });
}

fn bench_grid_query_seam(c: &mut Criterion) {
    let grid = filled_grid();
    c.bench_function("spatial_grid_query_corner_wrap", |b| {
        b.iter(|| black_box(grid.count_near(black_box(Vec2::new(2.0, 2.0)), 40.0)))
    });
}

fn bench_colony_tick(c: &mut Criterion) {
    let mut config = AppConfig::default();
    config.seed = Some(7);
    config.log_interval = 0;
    let mut colony = Colony::new(config).expect("default config is valid");
    c.bench_function("colony_tick_1024_ants", |b| {
        b.iter(|| black_box(colony.tick(1.0 / 60.0)))
    });
}

criterion_group!(
    benches,
    bench_grid_build,
    bench_grid_query,
    bench_grid_query_seam,
    bench_colony_tick
);
criterion_main!(benches);
