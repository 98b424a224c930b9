#![deny(warnings)]

pub mod color;
pub mod color_grid;
pub mod colormap;
pub mod compositing;
pub mod config;
pub mod errors;
pub mod grid;
pub mod hillshading;
pub mod normalize;
pub mod sanitize;
pub mod testing;
pub mod trig;

pub use color_grid::{RgbGrid, RgbaGrid};
pub use colormap::ColorMapper;
pub use compositing::{
    composite, composite_hsv, composite_pegtop, composite_with_norm,
    CompositingStrategy,
};
pub use config::CompositeRequest;
pub use errors::{ReliefError, Result};
pub use grid::Grid;
pub use hillshading::intensity::compute_intensity;
pub use hillshading::parameters::{Lamp, LightSource};
pub use hillshading::IntensityModel;
pub use normalize::{normalize, LinearNorm, Normalizer};
pub use sanitize::sanitize;
