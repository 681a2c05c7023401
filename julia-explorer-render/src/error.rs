use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("palette needs at least {min} stops, got {got}")]
    TooFewStops { min: usize, got: usize },

    #[error("invalid stop position: {0} (must lie in [0, 1])")]
    InvalidStopPosition(f64),

    #[error("invalid lookup table size: {0} (must be >= 2)")]
    InvalidLutSize(usize),

    #[error("invalid image dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel data length {got} does not match {width}×{height} RGBA")]
    PixelDataMismatch { width: u32, height: u32, got: usize },

    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Png(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] julia_explorer_core::CoreError),
}
