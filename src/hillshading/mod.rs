pub mod gradient;
pub mod intensity;
pub mod parameters;
pub mod surface_normals;

use crate::errors::Result;
use crate::grid::Grid;
use parameters::{Lamp, LightSource};
use serde::{Deserialize, Serialize};

/// How the illumination of the terrain is turned into an intensity field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityModel {
    /// Slope/aspect illumination, min-max rescaled to `[0, 1]`.
    #[default]
    Gradient,
    /// Cosine between light and surface normal, clipped to `[0, 1]`.
    SurfaceNormal,
    /// Weighted surface-normal intensities of several lamps over an ambient
    /// floor. The request's single light is not used.
    Combined {
        lamps: Vec<Lamp>,
        ambient_weight: f64,
    },
}

impl IntensityModel {
    pub fn compute(
        &self,
        terrain: &Grid,
        scale_terrain: f64,
        light: &LightSource,
    ) -> Result<Grid> {
        match self {
            IntensityModel::Gradient => intensity::compute_intensity(
                terrain,
                scale_terrain,
                light.azimuth,
                light.elevation,
            ),
            IntensityModel::SurfaceNormal => {
                surface_normals::relative_surface_intensity(
                    terrain,
                    scale_terrain,
                    light,
                )
            }
            IntensityModel::Combined {
                lamps,
                ambient_weight,
            } => surface_normals::combined_intensity(
                terrain,
                scale_terrain,
                lamps,
                *ambient_weight,
            ),
        }
    }
}
