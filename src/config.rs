use crate::compositing::CompositingStrategy;
use crate::errors::{ReliefError, Result};
use crate::hillshading::parameters::{
    LightSource, DEFAULT_SCALE_TERRAIN, DEFAULT_TERRAIN_NAN_VALUE,
};
use crate::hillshading::surface_normals::validate_lamps;
use crate::hillshading::IntensityModel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_PREFIX: &str = "RELIEF_";

/// Everything that determines the output of a composite call apart from the
/// grids and the color mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeRequest {
    pub light: LightSource,
    /// Multiplies the terrain before its gradient is taken.
    pub scale_terrain: f64,
    /// Replaces non-finite terrain samples.
    pub terrain_nan_value: f64,
    /// Lower normalization bound, the data minimum when missing.
    pub vmin: Option<f64>,
    /// Upper normalization bound, the data maximum when missing.
    pub vmax: Option<f64>,
    pub strategy: CompositingStrategy,
    pub intensity_model: IntensityModel,
}

impl Default for CompositeRequest {
    fn default() -> Self {
        Self {
            light: LightSource::default(),
            scale_terrain: DEFAULT_SCALE_TERRAIN,
            terrain_nan_value: DEFAULT_TERRAIN_NAN_VALUE,
            vmin: None,
            vmax: None,
            strategy: CompositingStrategy::default(),
            intensity_model: IntensityModel::default(),
        }
    }
}

impl CompositeRequest {
    pub fn validate(&self) -> Result<()> {
        if !self.light.azimuth.is_finite() || !self.light.elevation.is_finite() {
            return Err(ReliefError::Config(format!(
                "light direction must be finite, got azimuth {} and elevation {}",
                self.light.azimuth, self.light.elevation
            )));
        }

        if !(self.scale_terrain >= 0.) || !self.scale_terrain.is_finite() {
            return Err(ReliefError::Config(format!(
                "terrain scale must be a finite non-negative number, got {}",
                self.scale_terrain
            )));
        }

        if !self.terrain_nan_value.is_finite() {
            return Err(ReliefError::config(
                "terrain NaN replacement value must be finite",
            ));
        }

        if let (Some(vmin), Some(vmax)) = (self.vmin, self.vmax) {
            if vmin > vmax {
                return Err(ReliefError::InvalidRange { vmin, vmax });
            }
        }

        if let IntensityModel::Combined {
            lamps,
            ambient_weight,
        } = &self.intensity_model
        {
            validate_lamps(lamps, *ambient_weight)?;
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<CompositeRequest> {
        let request: CompositeRequest = serde_json::from_str(json).map_err(|e| {
            ReliefError::Config(format!("Failed to parse request JSON: {}", e))
        })?;
        request.validate()?;
        Ok(request)
    }

    pub fn from_json_file(path: &Path) -> Result<CompositeRequest> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ReliefError::Config(format!(
                "Failed to read request file {}: {}",
                path.display(),
                e
            ))
        })?;
        CompositeRequest::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ReliefError::Config(format!("Failed to serialize request: {}", e))
        })
    }

    /// Builds a request from `RELIEF_*` environment variables, loading a
    /// `.env` file first if there is one. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<CompositeRequest> {
        dotenv::dotenv().ok();
        CompositeRequest::from_vars(std::env::vars())
    }

    /// Builds a request from `(name, value)` pairs named like the
    /// environment variables. Other names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<CompositeRequest>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = CompositeRequest::default();

        for (name, value) in vars {
            let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref().trim();

            match key {
                "AZIMUTH" => request.light.azimuth = parse_var(key, value)?,
                "ELEVATION" => request.light.elevation = parse_var(key, value)?,
                "SCALE_TERRAIN" => request.scale_terrain = parse_var(key, value)?,
                "TERRAIN_NAN_VALUE" => {
                    request.terrain_nan_value = parse_var(key, value)?
                }
                "VMIN" => request.vmin = Some(parse_var(key, value)?),
                "VMAX" => request.vmax = Some(parse_var(key, value)?),
                "STRATEGY" => request.strategy = parse_enum_var(key, value)?,
                "INTENSITY_MODEL" => {
                    request.intensity_model = parse_enum_var(key, value)?
                }
                _ => {}
            }
        }

        request.validate()?;
        Ok(request)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        ReliefError::Config(format!(
            "{}{} has an invalid value: {:?}",
            ENV_PREFIX, key, value
        ))
    })
}

/// Parses a unit enum variant from its snake_case name.
fn parse_enum_var<T: for<'de> Deserialize<'de>>(key: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
        .map_err(|_| {
            ReliefError::Config(format!(
                "{}{} has an invalid value: {:?}",
                ENV_PREFIX, key, value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hillshading::parameters::Lamp;

    #[test]
    fn defaults() {
        let request = CompositeRequest::default();
        assert_eq!(request.light, LightSource::new(165., 45.));
        assert_eq!(request.scale_terrain, 0.1);
        assert_eq!(request.terrain_nan_value, 0.);
        assert_eq!(request.vmin, None);
        assert_eq!(request.vmax, None);
        assert_eq!(request.strategy, CompositingStrategy::Hsv);
        assert_eq!(request.intensity_model, IntensityModel::Gradient);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let request = CompositeRequest::from_json_str(
            r#"{ "light": { "azimuth": 90 }, "strategy": "pegtop", "vmax": 12.5 }"#,
        )
        .unwrap();

        assert_eq!(request.light, LightSource::new(90., 45.));
        assert_eq!(request.strategy, CompositingStrategy::Pegtop);
        assert_eq!(request.vmax, Some(12.5));
        assert_eq!(request.scale_terrain, 0.1);
    }

    #[test]
    fn json_round_trip() {
        let request = CompositeRequest {
            vmin: Some(-1.),
            strategy: CompositingStrategy::IntensityOnly,
            intensity_model: IntensityModel::SurfaceNormal,
            ..CompositeRequest::default()
        };
        let json = request.to_json_string().unwrap();
        assert!(json.contains("\"intensity_only\""));
        assert!(json.contains("\"surface_normal\""));
        assert_eq!(CompositeRequest::from_json_str(&json).unwrap(), request);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            CompositeRequest::from_json_str(r#"{ "strategy": "sepia" }"#),
            Err(ReliefError::Config(_))
        ));
    }

    #[test]
    fn reads_prefixed_variables() {
        let request = CompositeRequest::from_vars([
            ("RELIEF_AZIMUTH", "270"),
            ("RELIEF_ELEVATION", " 30.5 "),
            ("RELIEF_SCALE_TERRAIN", "2"),
            ("RELIEF_VMIN", "0"),
            ("RELIEF_STRATEGY", "Pegtop"),
            ("RELIEF_INTENSITY_MODEL", "surface_normal"),
            ("PATH", "/usr/bin"),
            ("RELIEF_UNKNOWN", "whatever"),
        ])
        .unwrap();

        assert_eq!(request.light, LightSource::new(270., 30.5));
        assert_eq!(request.scale_terrain, 2.);
        assert_eq!(request.vmin, Some(0.));
        assert_eq!(request.vmax, None);
        assert_eq!(request.strategy, CompositingStrategy::Pegtop);
        assert_eq!(request.intensity_model, IntensityModel::SurfaceNormal);
    }

    #[test]
    fn invalid_variables_are_rejected() {
        assert!(matches!(
            CompositeRequest::from_vars([("RELIEF_AZIMUTH", "east")]),
            Err(ReliefError::Config(_))
        ));
        assert!(matches!(
            CompositeRequest::from_vars([("RELIEF_SCALE_TERRAIN", "-0.5")]),
            Err(ReliefError::Config(_))
        ));
        assert_eq!(
            CompositeRequest::from_vars([("RELIEF_VMIN", "2"), ("RELIEF_VMAX", "1")]),
            Err(ReliefError::InvalidRange { vmin: 2., vmax: 1. })
        );
    }

    #[test]
    fn lamps_are_read_from_json() {
        let request = CompositeRequest::from_json_str(
            r#"{
                "intensity_model": {
                    "combined": {
                        "lamps": [
                            { "light": { "azimuth": 45 }, "weight": 1 },
                            { "light": { "azimuth": 270, "elevation": 30 }, "weight": 2 }
                        ],
                        "ambient_weight": 0.15
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            request.intensity_model,
            IntensityModel::Combined {
                lamps: vec![
                    Lamp::new(LightSource::new(45., 45.), 1.),
                    Lamp::new(LightSource::new(270., 30.), 2.),
                ],
                ambient_weight: 0.15,
            }
        );
    }

    #[test]
    fn invalid_lamps_are_rejected() {
        let request = CompositeRequest {
            intensity_model: IntensityModel::Combined {
                lamps: vec![],
                ambient_weight: 0.15,
            },
            ..CompositeRequest::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ReliefError::InvalidLighting(_))
        ));
    }

    #[test]
    fn non_finite_light_is_rejected() {
        let request = CompositeRequest {
            light: LightSource::new(f64::NAN, 45.),
            ..CompositeRequest::default()
        };
        assert!(matches!(request.validate(), Err(ReliefError::Config(_))));
    }
}
