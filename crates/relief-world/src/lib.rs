//! Terrain sizing, generation parameters, and the seeded noise sampler.
#![forbid(unsafe_code)]

mod noise;
pub mod params;

pub use noise::NoiseField;
pub use params::{ParamsError, Surface, TerrainParams, load_params_from_path};
