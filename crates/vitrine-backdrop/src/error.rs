//! Error types for backdrop acquisition.

use thiserror::Error;

/// Errors raised while validating a scene or acquiring a backdrop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackdropError {
    /// A scene needs at least one particle.
    #[error("particle count must be positive")]
    NoParticles,

    /// A scene needs at least one palette color.
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// Sampling bounds must be finite and non-negative.
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// Opacity must lie in 0..=1.
    #[error("opacity {0} is outside 0..=1")]
    InvalidOpacity(f32),

    /// A ring or core descriptor has a bad dimension.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}
