use crate::errors::{ReliefError, Result};
use crate::grid::Grid;
use crate::hillshading::gradient::map_gradient;
use crate::hillshading::parameters::LightSource;
use log::{debug, trace};
use std::f64::consts::FRAC_PI_2;

/// Intensity used for every sample when the illumination is uniform and
/// cannot be rescaled: neither highlighted nor shadowed.
pub const FLAT_INTENSITY: f64 = 0.5;

/// Illumination ranges narrower than this are treated as uniform.
pub const FLAT_TOLERANCE: f64 = 1e-12;

/// Lambertian illumination of a surface element given its gradient.
///
/// `az` and `alt` are the light azimuth and elevation in radians.
#[inline]
pub fn illumination(d_row: f64, d_col: f64, az: f64, alt: f64) -> f64 {
    let slope = FRAC_PI_2 - d_row.hypot(d_col).atan();
    let aspect = d_row.atan2(d_col);

    alt.sin() * slope.sin()
        + alt.cos() * slope.cos() * (-az - aspect - FRAC_PI_2).cos()
}

/// Rescales the grid so its minimum becomes 0 and its maximum 1. A uniform
/// grid becomes [`FLAT_INTENSITY`] everywhere; a grid without any finite
/// sample is an error.
pub fn rescale_to_unit(grid: &Grid) -> Result<Grid> {
    let (min, max) = grid.finite_min_max().ok_or(ReliefError::NoFiniteData)?;

    let range = max - min;
    if range <= FLAT_TOLERANCE {
        debug!("uniform illumination ({min}), using flat intensity");
        return Ok(Grid::filled(grid.width, grid.height, FLAT_INTENSITY));
    }

    Ok(grid.map(|v| ((v - min) / range).clamp(0., 1.)))
}

/// Rejects inputs that would turn the whole illumination into NaN.
///
/// The terrain must be finite everywhere; run it through
/// [`sanitize`](crate::sanitize::sanitize) first if it has gaps.
pub fn check_shading_inputs(
    terrain: &Grid,
    scale_terrain: f64,
    light: &LightSource,
) -> Result<()> {
    if !(scale_terrain >= 0.) || !scale_terrain.is_finite() {
        return Err(ReliefError::InvalidScale(scale_terrain));
    }

    if !light.azimuth.is_finite() || !light.elevation.is_finite() {
        return Err(ReliefError::InvalidLighting(format!(
            "light direction must be finite, got azimuth {} and elevation {}",
            light.azimuth, light.elevation
        )));
    }

    if let Some(i) = terrain.data().iter().position(|v| !v.is_finite()) {
        return Err(ReliefError::NonFiniteTerrain {
            x: i % terrain.width,
            y: i / terrain.width,
        });
    }

    Ok(())
}

/// Computes the normalized hill shading intensity of the terrain.
///
/// The terrain is multiplied by `scale_terrain` before its gradient is
/// taken, so a higher scale means steeper slopes. The raw illumination is
/// min-max rescaled into `[0, 1]`.
pub fn compute_intensity(
    terrain: &Grid,
    scale_terrain: f64,
    azimuth: f64,
    elevation: f64,
) -> Result<Grid> {
    let light = LightSource::new(azimuth, elevation);
    check_shading_inputs(terrain, scale_terrain, &light)?;
    trace!(
        "intensity of {:?} terrain, scale {scale_terrain}, light {light:?}",
        terrain.shape()
    );

    let (az, alt) = light.to_radians();
    let scaled = terrain.map(|v| v * scale_terrain);
    let raw = map_gradient(&scaled, |d_row, d_col| {
        illumination(d_row, d_col, az, alt)
    })?;

    rescale_to_unit(&raw)
}
