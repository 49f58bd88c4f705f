use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Which top-surface policy the mesher applies below the ground
/// threshold.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Solid,
    Water,
}

fn default_surface() -> Surface {
    Surface::Water
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainParams {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default)]
    pub seed: f32,
    #[serde(default = "default_x_org")]
    pub x_org: f32,
    #[serde(default = "default_y_org")]
    pub y_org: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default = "default_ground_height")]
    pub ground_height: f32,
    #[serde(default = "default_region_step")]
    pub region_step: i32,
    #[serde(default = "default_surface")]
    pub surface: Surface,
}

fn default_width() -> i32 {
    192
}
fn default_height() -> i32 {
    192
}
fn default_x_org() -> f32 {
    2.0
}
fn default_y_org() -> f32 {
    2.0
}
fn default_scale() -> f32 {
    1.0
}
fn default_height_scale() -> f32 {
    10.0
}
fn default_ground_height() -> f32 {
    3.0
}
fn default_region_step() -> i32 {
    48
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            seed: 0.0,
            x_org: default_x_org(),
            y_org: default_y_org(),
            scale: default_scale(),
            height_scale: default_height_scale(),
            ground_height: default_ground_height(),
            region_step: default_region_step(),
            surface: default_surface(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamsError {
    NonPositive { field: &'static str, value: i32 },
    NonFinite { field: &'static str },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::NonPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            ParamsError::NonFinite { field } => {
                write!(f, "{} must be finite", field)
            }
        }
    }
}

impl Error for ParamsError {}

impl TerrainParams {
    /// Checked once before a generation pass. Non-finite noise inputs
    /// would otherwise quantize into degenerate geometry far from the
    /// sampler, so they are rejected here.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("region_step", self.region_step),
        ] {
            if value <= 0 {
                return Err(ParamsError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("seed", self.seed),
            ("x_org", self.x_org),
            ("y_org", self.y_org),
            ("scale", self.scale),
            ("height_scale", self.height_scale),
            ("ground_height", self.ground_height),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { field });
            }
        }
        Ok(())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let params: TerrainParams = toml::from_str(&text)?;
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        TerrainParams::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_width() {
        let params = TerrainParams {
            width: 0,
            ..TerrainParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::NonPositive {
                field: "width",
                value: 0
            })
        );
    }

    #[test]
    fn rejects_nan_scale() {
        let params = TerrainParams {
            scale: f32::NAN,
            ..TerrainParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::NonFinite { field: "scale" })
        );
    }

    #[test]
    fn rejects_infinite_seed() {
        let params = TerrainParams {
            seed: f32::INFINITY,
            ..TerrainParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn toml_overrides_defaults() {
        let params: TerrainParams = toml::from_str(
            r#"
            width = 64
            height = 32
            surface = "solid"
            "#,
        )
        .unwrap();
        assert_eq!(params.width, 64);
        assert_eq!(params.height, 32);
        assert_eq!(params.surface, Surface::Solid);
        assert_eq!(params.region_step, 48);
    }
}
