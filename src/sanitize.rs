use crate::grid::Grid;

/// Returns a copy of the grid where NaNs and infinities are replaced by
/// `fallback`. Finite samples pass through unchanged.
pub fn sanitize(grid: &Grid, fallback: f64) -> Grid {
    grid.map(|v| if v.is_finite() { v } else { fallback })
}
