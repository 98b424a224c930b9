use crate::trig::deg_to_rad;
use serde::{Deserialize, Serialize};

pub const DEFAULT_AZIMUTH: f64 = 165.0;
pub const DEFAULT_ELEVATION: f64 = 45.0;
pub const DEFAULT_SCALE_TERRAIN: f64 = 0.1;
pub const DEFAULT_TERRAIN_NAN_VALUE: f64 = 0.0;

/// Direction the light comes from, in degrees.
///
/// Azimuth: 0 south, 90 east, 180 north, 270 west.
/// Elevation: 0 horizon, 90 zenith.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSource {
    pub azimuth: f64,
    pub elevation: f64,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
        }
    }
}

impl LightSource {
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    /// Azimuth and elevation in radians.
    pub fn to_radians(&self) -> (f64, f64) {
        (deg_to_rad(self.azimuth), deg_to_rad(self.elevation))
    }

    /// Unit vector pointing at the light, in `(height, row, col)`
    /// coordinates. Rows run north to south and columns west to east.
    pub fn unit_vector(&self) -> [f64; 3] {
        let (az, el) = self.to_radians();
        [el.sin(), el.cos() * az.cos(), el.cos() * az.sin()]
    }
}

/// A light source with a relative weight, used when combining lamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    pub light: LightSource,
    pub weight: f64,
}

impl Lamp {
    pub fn new(light: LightSource, weight: f64) -> Self {
        Self { light, weight }
    }
}
