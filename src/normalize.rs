use crate::errors::{ReliefError, Result};
use crate::grid::Grid;
use log::debug;

/// Maps raw data values onto the `[0, 1]` domain expected by a color mapper.
pub trait Normalizer: Sync {
    fn normalize(&self, value: f64) -> f64;

    fn normalize_grid(&self, grid: &Grid) -> Grid {
        grid.map(|v| self.normalize(v))
    }
}

/// Saturating linear normalization between `vmin` and `vmax`.
///
/// `vmin` maps to 0, `vmax` to 1 and values outside the range clamp. When
/// `vmin == vmax` every finite value maps to 0. NaN stays NaN so that the
/// color mapper can pick a color for missing data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearNorm {
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearNorm {
    pub fn new(vmin: f64, vmax: f64) -> Result<LinearNorm> {
        if vmin > vmax {
            return Err(ReliefError::InvalidRange { vmin, vmax });
        }

        Ok(LinearNorm { vmin, vmax })
    }

    /// Uses the explicit bounds where given and the finite min/max of the
    /// data for the missing ones.
    pub fn from_data(
        data: &Grid,
        vmin: Option<f64>,
        vmax: Option<f64>,
    ) -> Result<LinearNorm> {
        let (vmin, vmax) = match (vmin, vmax) {
            (Some(vmin), Some(vmax)) => (vmin, vmax),
            _ => {
                let (data_min, data_max) =
                    data.finite_min_max().ok_or(ReliefError::NoFiniteData)?;
                (vmin.unwrap_or(data_min), vmax.unwrap_or(data_max))
            }
        };

        if vmin == vmax {
            debug!("degenerate normalization range [{vmin}, {vmax}], mapping to 0");
        }

        LinearNorm::new(vmin, vmax)
    }
}

impl Normalizer for LinearNorm {
    fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }

        let range = self.vmax - self.vmin;
        if range <= 0.0 {
            return 0.0;
        }

        ((value - self.vmin) / range).clamp(0.0, 1.0)
    }
}

/// Normalizes the grid into `[0, 1]`, deriving missing bounds from the data.
pub fn normalize(grid: &Grid, vmin: Option<f64>, vmax: Option<f64>) -> Result<Grid> {
    let norm = LinearNorm::from_data(grid, vmin, vmax)?;
    Ok(norm.normalize_grid(grid))
}
