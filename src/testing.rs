//! Helpers shared by the unit tests, integration tests and benchmarks.

use crate::grid::Grid;
use std::f64::consts::PI;

pub fn assert_eq_approx(a: f64, b: f64, tolerance: f64) {
    if !((a - b).abs() <= tolerance) {
        panic!(
            "assertion failed: `(left ~= right)`\n  left: `{:?}`,\n right: `{:?}`",
            a, b
        );
    }
}

/// Asserts that two grids have the same shape and agree sample by sample.
pub fn assert_grids_approx(a: &Grid, b: &Grid, tolerance: f64) {
    assert_eq!(a.shape(), b.shape(), "grid shapes differ");
    for (left, right) in a.data().iter().zip(b.data()) {
        assert_eq_approx(*left, *right, tolerance);
    }
}

/// `size` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, size: usize) -> Vec<f64> {
    if size == 1 {
        return vec![start];
    }
    let step = (end - start) / (size - 1) as f64;
    (0..size).map(|i| start + step * i as f64).collect()
}

/// Concentric rings: `sqrt(x² + y²) + sin(x² + y²)` sampled over
/// `[-5, 5]²`.
pub fn concentric_circles(size: usize) -> Grid {
    let axis = linspace(-5., 5., size);
    Grid::from_fn(size, size, |x, y| {
        let r2 = axis[x] * axis[x] + axis[y] * axis[y];
        r2.sqrt() + r2.sin()
    })
}

/// Two overlapping Gaussian bumps, one of them stretched, turned upside
/// down so that the deeper one becomes a hill.
pub fn hills(size: usize) -> Grid {
    let delta = 6. / size as f64;
    let gauss = |x: f64, y: f64| (-(x * x + y * y) / 2.).exp() / (2. * PI);

    Grid::from_fn(size, size, |col, row| {
        let x = -3. + col as f64 * delta;
        let y = -3. + row as f64 * delta;
        let z1 = gauss(x, y);
        let z2 = gauss((x - 1.) / 1.5, (y - 1.) / 0.5) / (0.5 * 1.5);
        -(z2 - z1) * 500.
    })
}
