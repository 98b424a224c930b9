use crate::errors::{ReliefError, Result};
use crate::grid::Grid;
use crate::hillshading::gradient::{ensure_differentiable, gradient_at, map_gradient};
use crate::hillshading::intensity::check_shading_inputs;
use crate::hillshading::parameters::{Lamp, LightSource};
use log::debug;

/// Unit normal of a surface element with the given gradient, in
/// `(height, row, col)` coordinates.
///
/// It is the cross product of the steps `(d_row, 1, 0)` and `(d_col, 0, 1)`
/// along the two grid axes.
#[inline]
pub fn unit_normal(d_row: f64, d_col: f64) -> [f64; 3] {
    let magnitude = (1. + d_row * d_row + d_col * d_col).sqrt();
    [1. / magnitude, -d_row / magnitude, -d_col / magnitude]
}

/// Unit surface normals of the terrain, row by row.
pub fn surface_unit_normals(terrain: &Grid) -> Result<Vec<[f64; 3]>> {
    ensure_differentiable(terrain)?;

    let mut normals = Vec::with_capacity(terrain.width * terrain.height);
    for y in 0..terrain.height {
        for x in 0..terrain.width {
            let (d_row, d_col) = gradient_at(terrain, x, y);
            normals.push(unit_normal(d_row, d_col));
        }
    }
    Ok(normals)
}

/// Fraction of a unit light falling on each surface element: the cosine of
/// the angle between the light direction and the surface normal. Elements
/// facing away from the light receive nothing, so the result is clipped to
/// `[0, 1]` and is not rescaled.
pub fn relative_surface_intensity(
    terrain: &Grid,
    scale_terrain: f64,
    light: &LightSource,
) -> Result<Grid> {
    check_shading_inputs(terrain, scale_terrain, light)?;
    let [lh, lr, lc] = light.unit_vector();
    let scaled = terrain.map(|v| v * scale_terrain);

    map_gradient(&scaled, |d_row, d_col| {
        let [nh, nr, nc] = unit_normal(d_row, d_col);
        (nh * lh + nr * lr + nc * lc).clamp(0., 1.)
    })
}

/// Checks a lamp set for [`combined_intensity`] and returns the total lamp
/// weight.
pub fn validate_lamps(lamps: &[Lamp], ambient_weight: f64) -> Result<f64> {
    if lamps.is_empty() {
        return Err(ReliefError::InvalidLighting("no lamps given".to_string()));
    }

    if !(0. ..=1.).contains(&ambient_weight) {
        return Err(ReliefError::InvalidLighting(format!(
            "ambient weight {} is outside [0, 1]",
            ambient_weight
        )));
    }

    if lamps.iter().any(|lamp| !(lamp.weight >= 0.)) {
        return Err(ReliefError::InvalidLighting(
            "lamp weights must be non-negative".to_string(),
        ));
    }

    if let Some(lamp) = lamps.iter().find(|lamp| {
        !lamp.light.azimuth.is_finite() || !lamp.light.elevation.is_finite()
    }) {
        return Err(ReliefError::InvalidLighting(format!(
            "lamp direction must be finite, got azimuth {} and elevation {}",
            lamp.light.azimuth, lamp.light.elevation
        )));
    }

    let total_weight: f64 = lamps.iter().map(|lamp| lamp.weight).sum();
    if !(total_weight > 0.) || !total_weight.is_finite() {
        return Err(ReliefError::InvalidLighting(format!(
            "total lamp weight {} must be positive and finite",
            total_weight
        )));
    }

    Ok(total_weight)
}

/// Combines several weighted lamps with an ambient term:
/// `ambient + (1 - ambient) * weighted_mean(lamp intensities)`.
pub fn combined_intensity(
    terrain: &Grid,
    scale_terrain: f64,
    lamps: &[Lamp],
    ambient_weight: f64,
) -> Result<Grid> {
    let total_weight = validate_lamps(lamps, ambient_weight)?;

    debug!(
        "combining {} lamps with ambient weight {ambient_weight}",
        lamps.len()
    );

    let mut sum = Grid::new(terrain.width, terrain.height);
    for lamp in lamps {
        let intensity =
            relative_surface_intensity(terrain, scale_terrain, &lamp.light)?;
        for (acc, value) in sum.data_mut().iter_mut().zip(intensity.data()) {
            *acc += lamp.weight * value;
        }
    }

    Ok(sum.map(|v| {
        (ambient_weight + (1. - ambient_weight) * v / total_weight).clamp(0., 1.)
    }))
}
