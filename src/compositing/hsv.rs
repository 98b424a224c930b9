use crate::color::{hsv_to_rgb, rgb_to_hsv};
use crate::color_grid::RgbGrid;
use crate::colormap::ColorMapper;
use crate::compositing::{blend_pixels, composite, CompositingStrategy};
use crate::config::CompositeRequest;
use crate::errors::Result;
use crate::grid::Grid;

/// Replaces the HSV value of every color with the intensity. Hue and
/// saturation come from the colors only, brightness from the intensity only.
pub fn hsv_blend(rgb: &RgbGrid, intensity: &Grid) -> Result<RgbGrid> {
    blend_pixels(rgb, intensity, |color, d| {
        let [h, s, _] = rgb_to_hsv(color);
        hsv_to_rgb([h, s, d])
    })
}

/// Hill shading by HSV value replacement.
pub fn composite_hsv<M>(
    data: &Grid,
    terrain: Option<&Grid>,
    color_mapper: &M,
    request: &CompositeRequest,
) -> Result<RgbGrid>
where
    M: ColorMapper + ?Sized,
{
    let request = CompositeRequest {
        strategy: CompositingStrategy::Hsv,
        ..request.clone()
    };
    composite(data, terrain, color_mapper, &request)
}
