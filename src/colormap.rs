//! The color mapping capability supplied by callers.
//!
//! Concrete color schemes live outside this crate. Any closure from a
//! normalized value to an RGBA color is a color mapper, and `Grayscale`
//! is provided for intensity-only output and tests.

use crate::color_grid::RgbaGrid;
use crate::grid::Grid;
use rayon::prelude::*;

/// Trait for color mapping implementations
pub trait ColorMapper: Sync {
    /// Map a normalized value (0.0 to 1.0, or NaN for missing data) to an
    /// RGBA color with channels in `[0, 1]`.
    fn map_normalized(&self, value: f64) -> [f64; 4];

    /// Map every sample of a normalized grid.
    fn map_grid(&self, normalized: &Grid) -> RgbaGrid {
        let pixels = normalized
            .data()
            .par_iter()
            .map(|&v| self.map_normalized(v))
            .collect();
        RgbaGrid::from_pixels(normalized.width, normalized.height, pixels)
    }
}

impl<F> ColorMapper for F
where
    F: Fn(f64) -> [f64; 4] + Sync,
{
    fn map_normalized(&self, value: f64) -> [f64; 4] {
        self(value)
    }
}

/// Black to white. Missing data is fully transparent black.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl ColorMapper for Grayscale {
    fn map_normalized(&self, value: f64) -> [f64; 4] {
        if value.is_nan() {
            [0.0, 0.0, 0.0, 0.0]
        } else {
            let v = value.clamp(0.0, 1.0);
            [v, v, v, 1.0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_maps_value_to_all_channels() {
        assert_eq!(Grayscale.map_normalized(0.25), [0.25, 0.25, 0.25, 1.0]);
        assert_eq!(Grayscale.map_normalized(2.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Grayscale.map_normalized(f64::NAN), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn closures_are_color_mappers() {
        let red_ramp = |v: f64| [v, 0.0, 0.0, 1.0];
        let grid = Grid::from_rows(&[vec![0.0, 0.5], vec![1.0, 0.75]]).unwrap();

        let rgba = red_ramp.map_grid(&grid);

        assert_eq!(rgba.shape(), (2, 2, 4));
        assert_eq!(rgba.get_pixel(1, 0), [0.5, 0.0, 0.0, 1.0]);
        assert_eq!(rgba.get_pixel(1, 1), [0.75, 0.0, 0.0, 1.0]);
    }
}
