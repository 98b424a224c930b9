use crate::grid::unit_to_u8;
use image::{Rgb, RgbImage};

/// A 2D grid of colors with `N` channels per pixel, each channel in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid<const N: usize> {
    pub width: usize,
    pub height: usize,
    data: Box<[[f64; N]]>,
}

pub type RgbGrid = ColorGrid<3>;
pub type RgbaGrid = ColorGrid<4>;

impl<const N: usize> ColorGrid<N> {
    /// Creates a new grid with every pixel set to the given color.
    pub fn filled(width: usize, height: usize, color: [f64; N]) -> Self {
        ColorGrid {
            width,
            height,
            data: vec![color; width * height].into_boxed_slice(),
        }
    }

    pub(crate) fn from_pixels(
        width: usize,
        height: usize,
        data: Vec<[f64; N]>,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height);
        ColorGrid {
            width,
            height,
            data: data.into_boxed_slice(),
        }
    }

    /// The grid shape as `(rows, columns, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, N)
    }

    pub fn pixels(&self) -> &[[f64; N]] {
        &self.data
    }

    /// Gets the color at the given coordinates.
    pub fn get_pixel(&self, x: usize, y: usize) -> [f64; N] {
        if x >= self.width || y >= self.height {
            panic!("Pixel coordinates out of bounds");
        }

        self.data[y * self.width + x]
    }

    /// Sets the color at the given coordinates.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: [f64; N]) {
        if x >= self.width || y >= self.height {
            panic!("Pixel coordinates out of bounds");
        }

        self.data[y * self.width + x] = color;
    }
}

impl RgbaGrid {
    /// Drops the alpha channel.
    pub fn rgb(&self) -> RgbGrid {
        let data = self.data.iter().map(|&[r, g, b, _]| [r, g, b]).collect();
        RgbGrid::from_pixels(self.width, self.height, data)
    }
}

impl RgbGrid {
    /// Quantizes the grid to an 8-bit RGB image so a host rendering layer
    /// can display or save it.
    pub fn to_rgb8(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let [r, g, b] = self.get_pixel(x, y);
                img.put_pixel(
                    x as u32,
                    y as u32,
                    Rgb([unit_to_u8(r), unit_to_u8(g), unit_to_u8(b)]),
                );
            }
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_color_grid() {
        let grid = RgbaGrid::filled(10, 15, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(grid.shape(), (15, 10, 4));
        assert_eq!(grid.pixels().len(), 150);
        assert_eq!(grid.get_pixel(9, 14), [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn rgb_drops_alpha() {
        let mut grid = RgbaGrid::filled(2, 2, [0.0, 0.0, 0.0, 0.5]);
        grid.set_pixel(1, 0, [0.25, 0.5, 0.75, 0.0]);
        let rgb = grid.rgb();
        assert_eq!(rgb.shape(), (2, 2, 3));
        assert_eq!(rgb.get_pixel(1, 0), [0.25, 0.5, 0.75]);
    }

    #[test]
    fn to_rgb8_saturates() {
        let mut grid = RgbGrid::filled(2, 1, [0.0, 1.0, 0.5]);
        grid.set_pixel(1, 0, [-0.5, 1.5, f64::NAN]);
        let img = grid.to_rgb8();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 128]);
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0]);
    }
}
