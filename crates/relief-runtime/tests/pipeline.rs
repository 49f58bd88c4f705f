use relief_runtime::{GenError, GenPhase, generate, generate_with_progress};
use relief_tiles::{AtlasConfig, TileAtlas};
use relief_world::{ParamsError, Surface, TerrainParams};

fn atlas() -> TileAtlas {
    TileAtlas::from_config(&AtlasConfig::default()).unwrap()
}

fn small_params() -> TerrainParams {
    TerrainParams {
        width: 96,
        height: 48,
        seed: 4.25,
        surface: Surface::Solid,
        ..TerrainParams::default()
    }
}

#[test]
fn generates_one_mesh_per_region() {
    let meshes = generate(&small_params(), &atlas()).unwrap();
    // 96x48 at step 48: two columns, one row.
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].origin.x, 0.0);
    assert_eq!(meshes[1].origin.x, 48.0);
    for (i, mesh) in meshes.iter().enumerate() {
        assert_eq!(mesh.region, i);
        assert!(!mesh.mesh.pos.is_empty());
        assert_eq!(mesh.mesh.pos.len(), mesh.mesh.uv.len());
        assert_eq!(mesh.mesh.idx.len() % 6, 0);
    }
}

#[test]
fn generation_is_deterministic() {
    let params = small_params();
    let a = atlas();
    let first = generate(&params, &a).unwrap();
    let second = generate(&params, &a).unwrap();
    assert_eq!(first.len(), second.len());
    for (x, y) in first.iter().zip(second.iter()) {
        assert_eq!(x, y);
    }
}

#[test]
fn phases_run_in_order() {
    let mut seen = Vec::new();
    generate_with_progress(&small_params(), &atlas(), |phase| {
        seen.push(phase);
        true
    })
    .unwrap();
    assert_eq!(seen, GenPhase::ALL);
}

#[test]
fn cancel_before_mesh_build() {
    let result = generate_with_progress(&small_params(), &atlas(), |phase| {
        phase != GenPhase::MeshBuild
    });
    assert_eq!(result.err(), Some(GenError::Cancelled(GenPhase::MeshBuild)));
}

#[test]
fn invalid_params_fail_before_any_phase() {
    let params = TerrainParams {
        region_step: 0,
        ..small_params()
    };
    let mut called = false;
    let result = generate_with_progress(&params, &atlas(), |_| {
        called = true;
        true
    });
    assert!(!called);
    assert_eq!(
        result.err(),
        Some(GenError::Params(ParamsError::NonPositive {
            field: "region_step",
            value: 0
        }))
    );
}

#[test]
fn water_surface_produces_fewer_vertices() {
    // Suppressed skirts under the water line can only shrink the mesh.
    let solid = generate(&small_params(), &atlas()).unwrap();
    let water = generate(
        &TerrainParams {
            surface: Surface::Water,
            ..small_params()
        },
        &atlas(),
    )
    .unwrap();
    let count = |meshes: &[relief_mesh_cpu::RegionMesh]| {
        meshes.iter().map(|m| m.mesh.pos.len()).sum::<usize>()
    };
    assert!(count(&water) <= count(&solid));
}
