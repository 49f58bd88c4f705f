use criterion::{Criterion, black_box, criterion_group, criterion_main};

use relief_grid::{HeightField, RegionMap};
use relief_mesh_cpu::build_region;
use relief_tiles::{AtlasConfig, TileAtlas};
use relief_world::{NoiseField, Surface, TerrainParams};

fn noisy_field(params: &TerrainParams) -> HeightField {
    let map = RegionMap::new(params.width, params.height, params.region_step).unwrap();
    let mut field = HeightField::new(map);
    let noise = NoiseField::new(params);
    field.fill_with(|x, y| noise.height(x, y));
    field
}

fn bench_build_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_region");
    let params = TerrainParams {
        width: 48,
        height: 48,
        seed: 7.0,
        ..TerrainParams::default()
    };
    let heights = noisy_field(&params);
    let atlas = TileAtlas::from_config(&AtlasConfig::default()).unwrap();

    group.bench_function("solid_48x48", |b| {
        b.iter(|| {
            let out = build_region(&heights, &atlas, Surface::Solid, params.ground_height, 0);
            black_box(out).unwrap();
        })
    });
    group.bench_function("water_48x48", |b| {
        b.iter(|| {
            let out = build_region(&heights, &atlas, Surface::Water, params.ground_height, 0);
            black_box(out).unwrap();
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build_region);
criterion_main!(benches);
