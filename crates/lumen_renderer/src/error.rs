//! Errors raised while building a scene or configuring a render.

use thiserror::Error;

/// Degenerate inputs rejected before any rendering math runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("samples per pixel must be at least 1")]
    InvalidSamplesPerPixel,

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("sphere radius must be finite and non-zero, got {radius}")]
    DegenerateSphere { radius: f32 },

    #[error("refractive index must be finite and positive, got {0}")]
    InvalidRefractiveIndex(f32),

    #[error("metal fuzz must be a number, got {0}")]
    InvalidFuzz(f32),

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f32),

    #[error("camera eye, target and up vector do not define a view")]
    DegenerateView,

    #[error("pixel jitter must be in [0, 1], got {0}")]
    InvalidJitter(f32),

    #[error("bucket size must be at least 1")]
    InvalidBucketSize,
}

pub type RenderResult<T> = Result<T, RenderError>;
