use thiserror::Error;

/// Errors reported by the shading pipeline. All of them are detected before
/// any output is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReliefError {
    #[error("grid shape {actual:?} does not match expected shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("input is not a 2-dimensional grid: {0}")]
    RankViolation(String),

    #[error("grid of shape {0:?} is too small, at least 2x2 samples are needed")]
    GridTooSmall((usize, usize)),

    #[error("invalid normalization range: vmin ({vmin}) > vmax ({vmax})")]
    InvalidRange { vmin: f64, vmax: f64 },

    #[error("data contains no finite values to derive a normalization range")]
    NoFiniteData,

    #[error("terrain sample at ({x}, {y}) is not finite")]
    NonFiniteTerrain { x: usize, y: usize },

    #[error("terrain scale must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    #[error("invalid lighting: {0}")]
    InvalidLighting(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ReliefError {
    pub fn rank(message: &str) -> ReliefError {
        ReliefError::RankViolation(message.to_string())
    }

    pub fn config(message: &str) -> ReliefError {
        ReliefError::Config(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReliefError>;
