//! Error types for pulse_effects

use thiserror::Error;

/// Errors reported by effect configuration validation
///
/// The engine itself has no fallible operations; degenerate geometry
/// degrades instead of erroring. Configurations that would degrade into
/// division-by-zero or negative interpolation are rejected up front.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The effect needs at least one particle
    #[error("particle count must be at least 1")]
    ZeroCount,

    /// A zero cycle duration cannot produce normalized time
    #[error("cycle duration must be greater than zero")]
    ZeroDuration,

    /// A min/max envelope with min above max interpolates backwards
    #[error("inverted {name} envelope: min {min} is greater than max {max}")]
    InvertedEnvelope {
        /// Which envelope is inverted
        name: &'static str,
        min: f32,
        max: f32,
    },
}

/// Result type for pulse_effects operations
pub type Result<T> = std::result::Result<T, ConfigError>;
