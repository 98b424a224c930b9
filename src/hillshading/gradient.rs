use crate::errors::{ReliefError, Result};
use crate::grid::Grid;
use rayon::prelude::*;

/// Central difference in the interior, one-sided difference at the borders.
/// `at(i)` yields the sample at index `i` along an axis of length `n >= 2`.
#[inline]
fn difference<F>(at: F, i: usize, n: usize) -> f64
where
    F: Fn(usize) -> f64,
{
    if i == 0 {
        at(1) - at(0)
    } else if i == n - 1 {
        at(n - 1) - at(n - 2)
    } else {
        (at(i + 1) - at(i - 1)) / 2.
    }
}

/// Gradient of the grid at `(x, y)` as `(d_row, d_col)`: the change along
/// the row axis (down the grid) and along the column axis (across it).
#[inline]
pub fn gradient_at(grid: &Grid, x: usize, y: usize) -> (f64, f64) {
    let d_row = difference(|i| grid.get(x, i), y, grid.height);
    let d_col = difference(|i| grid.get(i, y), x, grid.width);
    (d_row, d_col)
}

pub fn ensure_differentiable(grid: &Grid) -> Result<()> {
    if grid.width < 2 || grid.height < 2 {
        return Err(ReliefError::GridTooSmall(grid.shape()));
    }
    Ok(())
}

/// Applies `f(d_row, d_col)` to the gradient of every sample, row by row in
/// parallel.
pub fn map_gradient<F>(grid: &Grid, f: F) -> Result<Grid>
where
    F: Fn(f64, f64) -> f64 + Sync + Send,
{
    ensure_differentiable(grid)?;

    let width = grid.width;
    let mut values = vec![0.; width * grid.height];
    values
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, value) in row.iter_mut().enumerate() {
                let (d_row, d_col) = gradient_at(grid, x, y);
                *value = f(d_row, d_col);
            }
        });

    Grid::from_vec(width, grid.height, values)
}

/// The discrete gradient of the grid as `(d_row, d_col)` grids.
pub fn gradient(grid: &Grid) -> Result<(Grid, Grid)> {
    let d_row = map_gradient(grid, |d_row, _| d_row)?;
    let d_col = map_gradient(grid, |_, d_col| d_col)?;
    Ok((d_row, d_col))
}
