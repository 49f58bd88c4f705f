//! Staged terrain generation pipeline (partition through finalize).
#![forbid(unsafe_code)]

use std::error::Error;
use std::fmt;
use std::time::Instant;

use rayon::prelude::*;

use relief_grid::{GridError, HeightField, RegionMap};
use relief_mesh_cpu::{MeshError, RegionMesh, build_region};
use relief_tiles::TileAtlas;
use relief_world::{NoiseField, ParamsError, TerrainParams};

/// The five sequential stages of one generation pass. Phase boundaries
/// are the cancellation points; no region buffer is handed out before
/// its pass completes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GenPhase {
    Partition,
    Allocate,
    NoiseFill,
    MeshBuild,
    Finalize,
}

impl GenPhase {
    pub const ALL: [GenPhase; 5] = [
        GenPhase::Partition,
        GenPhase::Allocate,
        GenPhase::NoiseFill,
        GenPhase::MeshBuild,
        GenPhase::Finalize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenPhase::Partition => "partition",
            GenPhase::Allocate => "allocate",
            GenPhase::NoiseFill => "noise_fill",
            GenPhase::MeshBuild => "mesh_build",
            GenPhase::Finalize => "finalize",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GenError {
    Params(ParamsError),
    Grid(GridError),
    Mesh(MeshError),
    Cancelled(GenPhase),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::Params(e) => write!(f, "invalid terrain params: {}", e),
            GenError::Grid(e) => write!(f, "grid error: {}", e),
            GenError::Mesh(e) => write!(f, "mesh build error: {}", e),
            GenError::Cancelled(phase) => {
                write!(f, "generation cancelled before {}", phase.label())
            }
        }
    }
}

impl Error for GenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenError::Params(e) => Some(e),
            GenError::Grid(e) => Some(e),
            GenError::Mesh(e) => Some(e),
            GenError::Cancelled(_) => None,
        }
    }
}

impl From<ParamsError> for GenError {
    fn from(e: ParamsError) -> Self {
        GenError::Params(e)
    }
}

impl From<GridError> for GenError {
    fn from(e: GridError) -> Self {
        GenError::Grid(e)
    }
}

impl From<MeshError> for GenError {
    fn from(e: MeshError) -> Self {
        GenError::Mesh(e)
    }
}

/// Runs the full pipeline with a no-op progress sink.
pub fn generate(params: &TerrainParams, atlas: &TileAtlas) -> Result<Vec<RegionMesh>, GenError> {
    generate_with_progress(params, atlas, |_| true)
}

/// Runs the full pipeline. `progress` is invoked once at the start of
/// each phase; returning false aborts the pass before that phase runs.
/// Region meshes are built independently (pure per-region function) and
/// fanned out across the rayon pool; collection preserves region order,
/// so output is deterministic for identical params.
pub fn generate_with_progress(
    params: &TerrainParams,
    atlas: &TileAtlas,
    mut progress: impl FnMut(GenPhase) -> bool,
) -> Result<Vec<RegionMesh>, GenError> {
    params.validate()?;
    let t0 = Instant::now();

    if !progress(GenPhase::Partition) {
        return Err(GenError::Cancelled(GenPhase::Partition));
    }
    let map = RegionMap::new(params.width, params.height, params.region_step)?;
    log::debug!(
        "partitioned {}x{} grid into {} regions ({} x {})",
        params.width,
        params.height,
        map.region_count(),
        map.cols(),
        map.rows()
    );

    if !progress(GenPhase::Allocate) {
        return Err(GenError::Cancelled(GenPhase::Allocate));
    }
    let mut heights = HeightField::new(map);

    if !progress(GenPhase::NoiseFill) {
        return Err(GenError::Cancelled(GenPhase::NoiseFill));
    }
    let noise = NoiseField::new(params);
    heights.fill_with(|x, y| noise.height(x, y));

    if !progress(GenPhase::MeshBuild) {
        return Err(GenError::Cancelled(GenPhase::MeshBuild));
    }
    let meshes = (0..heights.regions().region_count())
        .into_par_iter()
        .map(|region| build_region(&heights, atlas, params.surface, params.ground_height, region))
        .collect::<Result<Vec<_>, _>>()?;

    if !progress(GenPhase::Finalize) {
        return Err(GenError::Cancelled(GenPhase::Finalize));
    }
    log::info!(
        target: "perf",
        "ms={} generate surface={:?} regions={} verts={}",
        t0.elapsed().as_millis(),
        params.surface,
        meshes.len(),
        meshes.iter().map(|m| m.mesh.pos.len()).sum::<usize>()
    );
    Ok(meshes)
}
