use crate::errors::{ReliefError, Result};
use image::{GrayImage, Luma};
use rayon::prelude::*;

/// Represents a 2D field of floating-point samples (elevations, data values
/// or intensities), stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    data: Box<[f64]>,
}

impl Grid {
    /// Creates a new grid with the given width and height, filled with zeros.
    ///
    /// Unlike [`Grid::from_vec`] this accepts an empty axis; shading such a
    /// grid fails later with [`ReliefError::GridTooSmall`].
    pub fn new(width: usize, height: usize) -> Grid {
        Grid::filled(width, height, 0.0)
    }

    /// Creates a new grid where every sample has the same value. Empty axes
    /// are accepted, as for [`Grid::new`].
    pub fn filled(width: usize, height: usize, value: f64) -> Grid {
        Grid {
            width,
            height,
            data: vec![value; width * height].into_boxed_slice(),
        }
    }

    /// Wraps row-major samples as a grid. The number of samples must be
    /// exactly `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Grid> {
        if width == 0 || height == 0 {
            return Err(ReliefError::rank("grid has an empty axis"));
        }

        if data.len() != width * height {
            return Err(ReliefError::RankViolation(format!(
                "expected {} samples for a {}x{} grid, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }

        Ok(Grid {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Builds a grid from nested rows. Every row must have the same,
    /// non-zero length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Grid> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);

        if let Some(y) = rows.iter().position(|row| row.as_ref().len() != width) {
            return Err(ReliefError::RankViolation(format!(
                "row {} has {} samples, expected {}",
                y,
                rows[y].as_ref().len(),
                width
            )));
        }

        let data = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Grid::from_vec(width, height, data)
    }

    /// Creates a grid by evaluating `f(x, y)` for every sample. Empty axes
    /// are accepted, as for [`Grid::new`].
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Grid
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }

        Grid {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    /// The grid shape as `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Gets the sample at the given coordinates.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        if x >= self.width || y >= self.height {
            panic!("Grid coordinates out of bounds");
        }

        self.data[y * self.width + x]
    }

    /// Sets the sample at the given coordinates.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if x >= self.width || y >= self.height {
            panic!("Grid coordinates out of bounds");
        }

        self.data[y * self.width + x] = value;
    }

    /// Returns a new grid with `f` applied to every sample.
    pub fn map<F>(&self, f: F) -> Grid
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        let data: Vec<f64> = self.data.par_iter().map(|&v| f(v)).collect();

        Grid {
            width: self.width,
            height: self.height,
            data: data.into_boxed_slice(),
        }
    }

    /// Smallest and largest samples, NaNs and infinities excluded. `None`
    /// when the grid holds no finite sample.
    pub fn finite_min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.shape() == other.shape()
    }

    /// Quantizes samples in `[0, 1]` to an 8-bit grayscale image for a host
    /// rendering layer. Out-of-range values saturate, NaN becomes black.
    pub fn to_luma8(&self) -> GrayImage {
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let level = unit_to_u8(self.get(x, y));
                img.put_pixel(x as u32, y as u32, Luma([level]));
            }
        }
        img
    }
}

pub(crate) fn unit_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        (value.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::errors::ReliefError;

    #[test]
    fn create_large_grid() {
        let grid = Grid::new(1000, 1000);
        assert_eq!(grid.width, 1000);
        assert_eq!(grid.height, 1000);
        assert_eq!(grid.data().len(), 1000 * 1000);
    }

    /// Samples are zero by default when the grid is created.
    #[test]
    fn samples_are_zero_by_default() {
        let grid = Grid::new(10, 15);
        assert_eq!(grid.shape(), (15, 10));
        assert_eq!(grid.get(0, 0), 0.0);
        assert_eq!(grid.get(4, 5), 0.0);
    }

    #[test]
    fn set_and_get_sample() {
        let mut grid = Grid::new(10, 15);
        grid.set(3, 4, 12.5);
        assert_eq!(grid.get(3, 4), 12.5);
        assert_eq!(grid.data()[4 * 10 + 3], 12.5);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        Grid::new(3, 3).get(3, 0);
    }

    #[test]
    fn from_rows_is_row_major() {
        let grid = Grid::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
            .unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.get(2, 0), 3.0);
        assert_eq!(grid.get(0, 1), 4.0);
    }

    #[test]
    fn ragged_rows_are_a_rank_violation() {
        let result = Grid::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(ReliefError::RankViolation(_))));
    }

    #[test]
    fn empty_input_is_a_rank_violation() {
        let rows: Vec<Vec<f64>> = vec![];
        assert!(matches!(
            Grid::from_rows(&rows),
            Err(ReliefError::RankViolation(_))
        ));
        assert!(matches!(
            Grid::from_rows(&[Vec::<f64>::new()]),
            Err(ReliefError::RankViolation(_))
        ));
    }

    /// A flat sample vector whose length does not describe the grid.
    #[test]
    fn wrong_sample_count_is_a_rank_violation() {
        let result = Grid::from_vec(3, 3, vec![0.0; 8]);
        assert!(matches!(result, Err(ReliefError::RankViolation(_))));
    }

    #[test]
    fn finite_min_max_skips_non_finite_samples() {
        let grid = Grid::from_rows(&[
            vec![f64::NAN, 2.0],
            vec![f64::NEG_INFINITY, -1.0],
            vec![7.0, f64::INFINITY],
        ])
        .unwrap();
        assert_eq!(grid.finite_min_max(), Some((-1.0, 7.0)));

        let all_nan = Grid::filled(2, 2, f64::NAN);
        assert_eq!(all_nan.finite_min_max(), None);
    }

    #[test]
    fn map_keeps_the_shape() {
        let grid = Grid::from_fn(4, 3, |x, y| (x + y) as f64);
        let doubled = grid.map(|v| v * 2.0);
        assert_eq!(doubled.shape(), (3, 4));
        assert_eq!(doubled.get(3, 2), 10.0);
    }

    #[test]
    fn to_luma8_quantizes_unit_values() {
        let grid = Grid::from_rows(&[vec![0.0, 0.5, 1.0, f64::NAN]]).unwrap();
        let img = grid.to_luma8();
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [128]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
        assert_eq!(img.get_pixel(3, 0).0, [0]);
    }
}
