use std::time::Instant;

use relief_geom::{Vec2, Vec3};
use relief_grid::HeightField;
use relief_tiles::{TileAtlas, TileKind};
use relief_world::Surface;

use crate::{Face, MeshBuild, MeshError, RegionMesh};

// The solid and water passes differ only in these three policy points:
// clamped top elevation, tile-tag selection, and side suppression.

#[inline]
fn top_elevation(surface: Surface, b: i32, ground: f32) -> f32 {
    match surface {
        Surface::Water if (b as f32) < ground => ground - 1.0,
        _ => b as f32,
    }
}

#[inline]
fn top_tile(surface: Surface, b: i32, ground: f32) -> TileKind {
    let depth = ground - b as f32;
    match surface {
        Surface::Solid => {
            if depth > 0.0 {
                TileKind::DirtTop
            } else {
                TileKind::GrassTop
            }
        }
        Surface::Water => {
            if depth <= 0.0 {
                TileKind::GrassTop
            } else if depth == 1.0 {
                TileKind::WaterShallow
            } else {
                TileKind::WaterDeep
            }
        }
    }
}

#[inline]
fn side_tile(surface: Surface, b: i32, ground: f32) -> TileKind {
    match surface {
        Surface::Solid => {
            if (b as f32) < ground {
                TileKind::DirtSide
            } else {
                TileKind::GrassSide
            }
        }
        // Sub-ground columns emit no sides in water mode, so only the
        // grass variant remains reachable.
        Surface::Water => TileKind::GrassSide,
    }
}

#[inline]
fn sides_suppressed(surface: Surface, b: i32, ground: f32) -> bool {
    surface == Surface::Water && (b as f32) < ground
}

/// Emits the visible skirt between a column of height `b` and its
/// neighbor at (x + dx, y + dy): one quad per unit of height difference,
/// descending from `b`, or a single boundary quad when the neighbor is
/// off-grid.
fn emit_side(
    mesh: &mut MeshBuild,
    heights: &HeightField,
    face: Face,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    b: i32,
    lx: f32,
    lz: f32,
    uvs: [Vec2; 4],
) -> Result<(), MeshError> {
    let (nx, ny) = (x + dx, y + dy);
    if !heights.regions().contains(nx, ny) {
        mesh.add_face(face, lx, b as f32, lz, uvs);
        return Ok(());
    }
    let neighbor = heights.get(nx, ny)?;
    let mut top = b;
    while top > neighbor {
        mesh.add_face(face, lx, top as f32, lz, uvs);
        top -= 1;
    }
    Ok(())
}

/// Builds the mesh for one region: pure function of the height field,
/// atlas, surface policy and ground threshold. Walks the region's cells
/// row-major; neighbor lookups use global coordinates so cliffs across
/// region seams come out correct.
pub fn build_region(
    heights: &HeightField,
    atlas: &TileAtlas,
    surface: Surface,
    ground: f32,
    region: usize,
) -> Result<RegionMesh, MeshError> {
    let t0 = Instant::now();
    let map = heights.regions();
    let count = map.region_count();
    if region >= count {
        return Err(MeshError::RegionOutOfRange { region, count });
    }
    let span = map.region_span(region)?;
    let mut mesh = MeshBuild::default();

    for y in span.y0..span.y0 + span.h {
        for x in span.x0..span.x0 + span.w {
            let b = heights.get(x, y)?;
            let lx = (x - span.x0) as f32;
            let lz = (y - span.y0) as f32;

            let top = top_tile(surface, b, ground);
            mesh.add_face(
                Face::Top,
                lx,
                top_elevation(surface, b, ground),
                lz,
                atlas.corner_uvs(top),
            );

            if sides_suppressed(surface, b, ground) {
                continue;
            }
            let side = atlas.corner_uvs(side_tile(surface, b, ground));
            emit_side(&mut mesh, heights, Face::Front, x, y, 0, -1, b, lx, lz, side)?;
            emit_side(&mut mesh, heights, Face::Back, x, y, 0, 1, b, lx, lz, side)?;
            emit_side(&mut mesh, heights, Face::Left, x, y, -1, 0, b, lx, lz, side)?;
            emit_side(&mut mesh, heights, Face::Right, x, y, 1, 0, b, lx, lz, side)?;
        }
    }

    let bounds = mesh.bounds();
    log::info!(
        target: "perf",
        "ms={} region_build region={} span=({}, {}, {}, {}) quads={}",
        t0.elapsed().as_millis(),
        region,
        span.x0,
        span.y0,
        span.w,
        span.h,
        mesh.quad_count()
    );
    Ok(RegionMesh {
        region,
        col: region % map.cols(),
        row: region / map.cols(),
        origin: Vec3::new(span.x0 as f32, 0.0, span.y0 as f32),
        bounds,
        mesh,
    })
}
