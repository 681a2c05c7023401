use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::escape::EscapeTime;
use crate::julia::Julia;
use crate::mandelbrot::Mandelbrot;

/// A seed rule for the quadratic recurrence.
///
/// Designed for **static dispatch**: the renderer is generic over
/// `F: Fractal` so the per-pixel loop inlines the evaluator.
pub trait Fractal {
    /// Iterate the orbit belonging to the plane point `point`.
    fn iterate(&self, point: Complex) -> EscapeTime;

    /// The iteration cap.
    fn max_iterations(&self) -> u32;
}

/// Which seed rule a render uses.
///
/// Julia seeds the orbit with the pixel point and iterates a fixed `c`;
/// Mandelbrot seeds with 0 and uses the pixel point as `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FractalMode {
    Julia { c: Complex },
    Mandelbrot,
}

impl FractalMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Julia { .. } => "Julia",
            Self::Mandelbrot => "Mandelbrot",
        }
    }

    /// Evaluate a single plane point under this seed rule.
    pub fn iterate(self, point: Complex, max_iterations: u32) -> EscapeTime {
        match self {
            Self::Julia { c } => Julia::new(c, max_iterations).iterate(point),
            Self::Mandelbrot => Mandelbrot::new(max_iterations).iterate(point),
        }
    }
}
