//! Terrain tile tags and texture-atlas UV mapping.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use relief_geom::Vec2;

/// The six terrain materials a face can be textured with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TileKind {
    GrassTop = 0,
    GrassSide = 1,
    DirtTop = 2,
    DirtSide = 3,
    WaterShallow = 4,
    WaterDeep = 5,
}

impl TileKind {
    pub const ALL: [TileKind; 6] = [
        TileKind::GrassTop,
        TileKind::GrassSide,
        TileKind::DirtTop,
        TileKind::DirtSide,
        TileKind::WaterShallow,
        TileKind::WaterDeep,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::GrassTop => "grass_top",
            TileKind::GrassSide => "grass_side",
            TileKind::DirtTop => "dirt_top",
            TileKind::DirtSide => "dirt_side",
            TileKind::WaterShallow => "water_shallow",
            TileKind::WaterDeep => "water_deep",
        }
    }

    pub fn from_name(s: &str) -> Option<TileKind> {
        TileKind::ALL.iter().copied().find(|k| k.name() == s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AtlasError {
    MissingTile(TileKind),
    UnknownTile(String),
    InvalidSize {
        tile_px: u32,
        atlas_w: u32,
        atlas_h: u32,
    },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::MissingTile(kind) => {
                write!(f, "no atlas anchor configured for tile '{}'", kind.name())
            }
            AtlasError::UnknownTile(name) => write!(f, "unknown tile name '{}'", name),
            AtlasError::InvalidSize {
                tile_px,
                atlas_w,
                atlas_h,
            } => write!(
                f,
                "atlas sizes must be positive: tile_px={} atlas={}x{}",
                tile_px, atlas_w, atlas_h
            ),
        }
    }
}

impl Error for AtlasError {}

/// Texture-atlas description as it appears in config files.
#[derive(Clone, Debug, Deserialize)]
pub struct AtlasConfig {
    #[serde(default = "default_tile_px")]
    pub tile_px: u32,
    #[serde(default = "default_atlas_width")]
    pub atlas_width: u32,
    #[serde(default = "default_atlas_height")]
    pub atlas_height: u32,
    #[serde(default = "default_tiles")]
    pub tiles: HashMap<String, [f32; 2]>,
}

fn default_tile_px() -> u32 {
    16
}
fn default_atlas_width() -> u32 {
    96
}
fn default_atlas_height() -> u32 {
    16
}
fn default_tiles() -> HashMap<String, [f32; 2]> {
    // One 16px tile per material, in a single row; anchors sit at each
    // tile's far corner (corner_uvs subtracts one tile unit back).
    TileKind::ALL
        .iter()
        .enumerate()
        .map(|(i, k)| (k.name().to_string(), [(i as f32 + 1.0) * 16.0, 16.0]))
        .collect()
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            tile_px: default_tile_px(),
            atlas_width: default_atlas_width(),
            atlas_height: default_atlas_height(),
            tiles: default_tiles(),
        }
    }
}

/// Validated tag -> anchor mapping for one texture atlas. Every tile
/// kind is guaranteed to have an anchor, so lookups are infallible.
#[derive(Clone, Debug)]
pub struct TileAtlas {
    tile_px: f32,
    size: Vec2,
    anchors: [Vec2; 6],
}

impl TileAtlas {
    pub fn new(
        tile_px: u32,
        atlas_w: u32,
        atlas_h: u32,
        anchors: &HashMap<TileKind, Vec2>,
    ) -> Result<Self, AtlasError> {
        if tile_px == 0 || atlas_w == 0 || atlas_h == 0 {
            return Err(AtlasError::InvalidSize {
                tile_px,
                atlas_w,
                atlas_h,
            });
        }
        let mut table = [Vec2::ZERO; 6];
        for kind in TileKind::ALL {
            let anchor = anchors
                .get(&kind)
                .ok_or(AtlasError::MissingTile(kind))?;
            table[kind.index()] = *anchor;
        }
        Ok(Self {
            tile_px: tile_px as f32,
            size: Vec2::new(atlas_w as f32, atlas_h as f32),
            anchors: table,
        })
    }

    pub fn from_config(cfg: &AtlasConfig) -> Result<Self, AtlasError> {
        let mut anchors = HashMap::new();
        for (name, pos) in &cfg.tiles {
            let kind = TileKind::from_name(name)
                .ok_or_else(|| AtlasError::UnknownTile(name.clone()))?;
            anchors.insert(kind, Vec2::new(pos[0], pos[1]));
        }
        TileAtlas::new(cfg.tile_px, cfg.atlas_width, cfg.atlas_height, &anchors)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let cfg: AtlasConfig = toml::from_str(&text)?;
        Ok(TileAtlas::from_config(&cfg)?)
    }

    #[inline]
    pub fn anchor(&self, kind: TileKind) -> Vec2 {
        self.anchors[kind.index()]
    }

    /// Four corners of the tile, normalized by atlas size, in the order
    /// bottom-left, bottom-right, top-right, top-left. The order matches
    /// the vertex winding of every face builder.
    #[inline]
    pub fn corner_uvs(&self, kind: TileKind) -> [Vec2; 4] {
        let a = self.anchor(kind);
        let t = self.tile_px;
        let (w, h) = (self.size.x, self.size.y);
        [
            Vec2::new((a.x - t) / w, a.y / h),
            Vec2::new(a.x / w, a.y / h),
            Vec2::new(a.x / w, (a.y - t) / h),
            Vec2::new((a.x - t) / w, (a.y - t) / h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_anchor_is_an_error() {
        let mut anchors: HashMap<TileKind, Vec2> = TileKind::ALL
            .iter()
            .map(|&k| (k, Vec2::new(16.0, 16.0)))
            .collect();
        anchors.remove(&TileKind::WaterDeep);
        assert_eq!(
            TileAtlas::new(16, 96, 16, &anchors).err(),
            Some(AtlasError::MissingTile(TileKind::WaterDeep))
        );
    }

    #[test]
    fn unknown_tile_name_is_an_error() {
        let mut cfg = AtlasConfig::default();
        cfg.tiles.insert("lava_top".into(), [0.0, 0.0]);
        assert!(matches!(
            TileAtlas::from_config(&cfg),
            Err(AtlasError::UnknownTile(_))
        ));
    }

    #[test]
    fn zero_sizes_rejected() {
        let anchors: HashMap<TileKind, Vec2> = TileKind::ALL
            .iter()
            .map(|&k| (k, Vec2::new(16.0, 16.0)))
            .collect();
        assert!(matches!(
            TileAtlas::new(0, 96, 16, &anchors),
            Err(AtlasError::InvalidSize { .. })
        ));
    }

    #[test]
    fn corner_uvs_order_and_normalization() {
        let atlas = TileAtlas::from_config(&AtlasConfig::default()).unwrap();
        // grass_top anchors at (16, 16) in a 96x16 atlas with 16px tiles.
        let [bl, br, tr, tl] = atlas.corner_uvs(TileKind::GrassTop);
        assert_eq!(bl, Vec2::new(0.0, 1.0));
        assert_eq!(br, Vec2::new(16.0 / 96.0, 1.0));
        assert_eq!(tr, Vec2::new(16.0 / 96.0, 0.0));
        assert_eq!(tl, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn default_config_covers_all_tiles() {
        assert!(TileAtlas::from_config(&AtlasConfig::default()).is_ok());
    }
}
