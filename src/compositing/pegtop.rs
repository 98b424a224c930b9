use crate::color_grid::RgbGrid;
use crate::colormap::ColorMapper;
use crate::compositing::{blend_pixels, composite, CompositingStrategy};
use crate::config::CompositeRequest;
use crate::errors::Result;
use crate::grid::Grid;

/// Pegtop soft light of a single channel: `2dc + c²(1 - 2d)`.
///
/// Darkens to `c²` at `d = 0`, brightens to `2c - c²` at `d = 1` and leaves
/// `c` unchanged at `d = 0.5`. Unlike the HSV blend this can shift the
/// apparent hue slightly at extreme intensities.
#[inline]
pub fn pegtop(c: f64, d: f64) -> f64 {
    2. * d * c + c * c * (1. - 2. * d)
}

pub fn pegtop_blend(rgb: &RgbGrid, intensity: &Grid) -> Result<RgbGrid> {
    blend_pixels(rgb, intensity, |[r, g, b], d| {
        [pegtop(r, d), pegtop(g, d), pegtop(b, d)]
    })
}

/// Hill shading by Pegtop blending.
pub fn composite_pegtop<M>(
    data: &Grid,
    terrain: Option<&Grid>,
    color_mapper: &M,
    request: &CompositeRequest,
) -> Result<RgbGrid>
where
    M: ColorMapper + ?Sized,
{
    let request = CompositeRequest {
        strategy: CompositingStrategy::Pegtop,
        ..request.clone()
    };
    composite(data, terrain, color_mapper, &request)
}
