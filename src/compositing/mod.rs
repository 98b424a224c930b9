//! Turns an intensity field and a color-mapped data field into shaded RGB.
//!
//! Every strategy takes the same inputs and produces a grid of the same
//! shape, so callers can switch between them freely.

pub mod hsv;
pub mod pegtop;

use crate::color_grid::RgbGrid;
use crate::colormap::ColorMapper;
use crate::config::CompositeRequest;
use crate::errors::{ReliefError, Result};
use crate::grid::Grid;
use crate::normalize::{LinearNorm, Normalizer};
use crate::sanitize::sanitize;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use hsv::{composite_hsv, hsv_blend};
pub use pegtop::{composite_pegtop, pegtop_blend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositingStrategy {
    /// Replace the HSV value of the colors with the intensity.
    #[default]
    Hsv,
    /// Pegtop soft-light blend.
    Pegtop,
    /// Multiply the colors by the intensity.
    Multiply,
    /// Ignore the colors and show the intensity as gray.
    IntensityOnly,
}

impl CompositingStrategy {
    pub fn blend(&self, rgb: &RgbGrid, intensity: &Grid) -> Result<RgbGrid> {
        match self {
            CompositingStrategy::Hsv => hsv_blend(rgb, intensity),
            CompositingStrategy::Pegtop => pegtop_blend(rgb, intensity),
            CompositingStrategy::Multiply => multiply_blend(rgb, intensity),
            CompositingStrategy::IntensityOnly => intensity_only(rgb, intensity),
        }
    }
}

/// Applies `f(color, intensity)` to every pixel. Fails if the two grids do
/// not have the same shape.
pub(crate) fn blend_pixels<F>(
    rgb: &RgbGrid,
    intensity: &Grid,
    f: F,
) -> Result<RgbGrid>
where
    F: Fn([f64; 3], f64) -> [f64; 3] + Sync + Send,
{
    if (rgb.height, rgb.width) != intensity.shape() {
        return Err(ReliefError::ShapeMismatch {
            expected: (rgb.height, rgb.width),
            actual: intensity.shape(),
        });
    }

    let pixels = rgb
        .pixels()
        .par_iter()
        .zip(intensity.data().par_iter())
        .map(|(&color, &d)| f(color, d))
        .collect();
    Ok(RgbGrid::from_pixels(rgb.width, rgb.height, pixels))
}

pub fn multiply_blend(rgb: &RgbGrid, intensity: &Grid) -> Result<RgbGrid> {
    blend_pixels(rgb, intensity, |[r, g, b], d| [r * d, g * d, b * d])
}

pub fn intensity_only(rgb: &RgbGrid, intensity: &Grid) -> Result<RgbGrid> {
    blend_pixels(rgb, intensity, |_, d| [d, d, d])
}

/// The terrain to shade `data` with, the data itself when none is given.
/// It must have the data's shape.
fn terrain_for<'a>(data: &'a Grid, terrain: Option<&'a Grid>) -> Result<&'a Grid> {
    let terrain = terrain.unwrap_or(data);
    if !terrain.same_shape(data) {
        return Err(ReliefError::ShapeMismatch {
            expected: data.shape(),
            actual: terrain.shape(),
        });
    }
    Ok(terrain)
}

/// Shades `data` with the illumination of `terrain` (or of `data` itself
/// when no terrain is given), normalizing the data linearly between the
/// request's bounds.
pub fn composite<M>(
    data: &Grid,
    terrain: Option<&Grid>,
    color_mapper: &M,
    request: &CompositeRequest,
) -> Result<RgbGrid>
where
    M: ColorMapper + ?Sized,
{
    request.validate()?;
    terrain_for(data, terrain)?;
    let norm = LinearNorm::from_data(data, request.vmin, request.vmax)?;
    composite_with_norm(data, terrain, color_mapper, &norm, request)
}

/// Like [`composite`] but with a caller-supplied normalization; the
/// request's `vmin`/`vmax` are ignored.
pub fn composite_with_norm<M, N>(
    data: &Grid,
    terrain: Option<&Grid>,
    color_mapper: &M,
    norm: &N,
    request: &CompositeRequest,
) -> Result<RgbGrid>
where
    M: ColorMapper + ?Sized,
    N: Normalizer + ?Sized,
{
    request.validate()?;
    let terrain = terrain_for(data, terrain)?;

    debug!(
        "compositing {:?} grid with {:?} and {:?} intensity",
        data.shape(),
        request.strategy,
        request.intensity_model
    );

    let finite_terrain = sanitize(terrain, request.terrain_nan_value);
    let intensity = request.intensity_model.compute(
        &finite_terrain,
        request.scale_terrain,
        &request.light,
    )?;

    let normalized = norm.normalize_grid(data);
    let rgb = color_mapper.map_grid(&normalized).rgb();

    request.strategy.blend(&rgb, &intensity)
}
