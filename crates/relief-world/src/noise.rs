use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::TerrainParams;

// All run-to-run variation flows through the float `seed` coordinate
// offset; the generator seed stays fixed so identical params reproduce
// identical terrain.
const GENERATOR_SEED: i32 = 1337;

/// Deterministic 2D coherent-noise sampler quantized to integer column
/// heights: floor(noise01(seed + org + cell/extent * scale) * height_scale).
pub struct NoiseField {
    sampler: FastNoiseLite,
    seed: f32,
    x_org: f32,
    y_org: f32,
    scale: f32,
    height_scale: f32,
    inv_w: f32,
    inv_h: f32,
}

impl NoiseField {
    pub fn new(params: &TerrainParams) -> Self {
        let mut sampler = FastNoiseLite::with_seed(GENERATOR_SEED);
        sampler.set_noise_type(Some(NoiseType::Perlin));
        // Sampled at absolute coordinates; frequency scaling is already
        // folded into the coordinate formula.
        sampler.set_frequency(Some(1.0));
        Self {
            sampler,
            seed: params.seed,
            x_org: params.x_org,
            y_org: params.y_org,
            scale: params.scale,
            height_scale: params.height_scale,
            inv_w: 1.0 / params.width as f32,
            inv_h: 1.0 / params.height as f32,
        }
    }

    #[inline]
    pub fn height(&self, x: i32, y: i32) -> i32 {
        let nx = self.seed + self.x_org + x as f32 * self.inv_w * self.scale;
        let ny = self.seed + self.y_org + y as f32 * self.inv_h * self.scale;
        let n = self.sampler.get_noise_2d(nx, ny);
        // Perlin output is nominally [-1, 1]; clamp the overshoot so
        // stored heights are never negative.
        let n01 = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
        (n01 * self.height_scale).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TerrainParams {
        TerrainParams {
            width: 64,
            height: 64,
            seed: 3.5,
            ..TerrainParams::default()
        }
    }

    #[test]
    fn identical_params_identical_heights() {
        let a = NoiseField::new(&params());
        let b = NoiseField::new(&params());
        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(a.height(x, y), b.height(x, y));
            }
        }
    }

    #[test]
    fn heights_are_quantized_to_range() {
        let field = NoiseField::new(&params());
        let max = params().height_scale as i32;
        for y in 0..64 {
            for x in 0..64 {
                let h = field.height(x, y);
                assert!(h >= 0 && h <= max, "height {} at ({}, {})", h, x, y);
            }
        }
    }

    #[test]
    fn seed_offset_changes_terrain() {
        let a = NoiseField::new(&params());
        let b = NoiseField::new(&TerrainParams {
            seed: 11.25,
            ..params()
        });
        let differs = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .any(|(x, y)| a.height(x, y) != b.height(x, y));
        assert!(differs);
    }
}
