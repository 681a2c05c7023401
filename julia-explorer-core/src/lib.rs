pub mod complex;
pub mod error;
pub mod escape;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod preset;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{evaluate, EscapeTime, ESCAPE_RADIUS_SQ};
pub use fractal::{Fractal, FractalMode};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use preset::{find_preset, Preset, DEFAULT_MAX_ITERATIONS, DEFAULT_PARAMETER, PRESETS};
pub use viewport::{PixelMapper, PlaneBounds, Viewport, BASE_HALF_WIDTH};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
