//! CPU mesh construction for chunked heightmap terrain (engine-only).
#![forbid(unsafe_code)]

mod build;

pub use build::build_region;

use std::error::Error;
use std::fmt;

use relief_geom::{Aabb, Vec2, Vec3};
use relief_grid::GridError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    Grid(GridError),
    RegionOutOfRange { region: usize, count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Grid(e) => write!(f, "height lookup failed: {}", e),
            MeshError::RegionOutOfRange { region, count } => {
                write!(f, "mesh target region {} out of range ({} allocated)", region, count)
            }
        }
    }
}

impl Error for MeshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MeshError::Grid(e) => Some(e),
            MeshError::RegionOutOfRange { .. } => None,
        }
    }
}

impl From<GridError> for MeshError {
    fn from(e: GridError) -> Self {
        MeshError::Grid(e)
    }
}

/// One of the five visible faces of a terrain column. Side faces span
/// one unit downward from their elevation; Top is horizontal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Top,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    /// Corner positions for a unit quad anchored at cell (x, z) with its
    /// top edge at elevation y. The order pairs with
    /// `TileAtlas::corner_uvs` and is identical for every face, so the
    /// shared triangle diagonal and winding come out consistent.
    #[inline]
    pub fn corners(self, x: f32, y: f32, z: f32) -> [Vec3; 4] {
        match self {
            Face::Top => [
                Vec3::new(x, y, z + 1.0),
                Vec3::new(x + 1.0, y, z + 1.0),
                Vec3::new(x + 1.0, y, z),
                Vec3::new(x, y, z),
            ],
            Face::Left => [
                Vec3::new(x, y, z + 1.0),
                Vec3::new(x, y, z),
                Vec3::new(x, y - 1.0, z),
                Vec3::new(x, y - 1.0, z + 1.0),
            ],
            Face::Right => [
                Vec3::new(x + 1.0, y, z),
                Vec3::new(x + 1.0, y, z + 1.0),
                Vec3::new(x + 1.0, y - 1.0, z + 1.0),
                Vec3::new(x + 1.0, y - 1.0, z),
            ],
            Face::Front => [
                Vec3::new(x, y, z),
                Vec3::new(x + 1.0, y, z),
                Vec3::new(x + 1.0, y - 1.0, z),
                Vec3::new(x, y - 1.0, z),
            ],
            Face::Back => [
                Vec3::new(x + 1.0, y, z + 1.0),
                Vec3::new(x, y, z + 1.0),
                Vec3::new(x, y - 1.0, z + 1.0),
                Vec3::new(x + 1.0, y - 1.0, z + 1.0),
            ],
        }
    }
}

/// Append-only vertex/UV/index buffers for one region mesh.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<Vec3>,
    pub uv: Vec<Vec2>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    pub fn clear(&mut self) {
        self.pos.clear();
        self.uv.clear();
        self.idx.clear();
    }

    /// Appends one quad: 4 corners, 4 tile-corner UVs, and two triangles
    /// sharing the (n, n+1, n+3) / (n+3, n+1, n+2) diagonal, where n is
    /// the running vertex count.
    pub fn add_face(&mut self, face: Face, x: f32, y: f32, z: f32, uvs: [Vec2; 4]) {
        let base = self.pos.len() as u32;
        self.pos.extend_from_slice(&face.corners(x, y, z));
        self.uv.extend_from_slice(&uvs);
        self.idx
            .extend_from_slice(&[base, base + 1, base + 3, base + 3, base + 1, base + 2]);
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.pos)
    }
}

/// Finished buffers for one region. Vertices are region-local; `origin`
/// is the region's global placement offset.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionMesh {
    pub region: usize,
    pub col: usize,
    pub row: usize,
    pub origin: Vec3,
    pub bounds: Aabb,
    pub mesh: MeshBuild,
}
