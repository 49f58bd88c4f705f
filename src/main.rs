use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use relief_runtime::generate_with_progress;
use relief_tiles::{AtlasConfig, TileAtlas};
use relief_world::{Surface, TerrainParams};

mod obj;

#[derive(Parser, Debug)]
#[command(name = "relief", about = "Chunked voxel heightmap terrain mesher")]
struct Args {
    /// TOML config with [terrain] and [atlas] tables; defaults are used
    /// for anything omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory for per-region OBJ files.
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Override the configured noise seed offset.
    #[arg(long)]
    seed: Option<f32>,
    /// Force the water surface policy.
    #[arg(long, conflicts_with = "solid")]
    water: bool,
    /// Force the solid surface policy.
    #[arg(long)]
    solid: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    terrain: TerrainParams,
    atlas: AtlasConfig,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut cfg: ConfigFile = match &args.config {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => ConfigFile::default(),
    };
    if let Some(seed) = args.seed {
        cfg.terrain.seed = seed;
    }
    if args.water {
        cfg.terrain.surface = Surface::Water;
    }
    if args.solid {
        cfg.terrain.surface = Surface::Solid;
    }

    let atlas = TileAtlas::from_config(&cfg.atlas)?;
    let meshes = generate_with_progress(&cfg.terrain, &atlas, |phase| {
        log::info!("phase {}", phase.label());
        true
    })?;

    fs::create_dir_all(&args.out)?;
    let mut verts = 0usize;
    let mut tris = 0usize;
    for mesh in &meshes {
        verts += mesh.mesh.pos.len();
        tris += mesh.mesh.idx.len() / 3;
        let path = args.out.join(format!("region_{}_{}.obj", mesh.col, mesh.row));
        obj::write_region(&path, mesh)?;
    }
    log::info!(
        "wrote {} regions ({} vertices, {} triangles) to {}",
        meshes.len(),
        verts,
        tris,
        args.out.display()
    );
    Ok(())
}
