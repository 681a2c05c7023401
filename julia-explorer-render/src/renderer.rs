use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use julia_explorer_core::{
    Complex, EscapeTime, Fractal, FractalMode, Julia, Mandelbrot, Viewport,
};

use crate::buffer::PixelBuffer;
use crate::lut::ColorLookupTable;

/// Color of points that never escape, independent of the palette.
pub const INTERIOR_COLOR: [u8; 4] = [5, 2, 2, 255];

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// An immutable snapshot of everything one render pass needs.
///
/// The lookup table is shared, so cloning and comparing snapshots is cheap.
/// Equal requests produce byte-identical buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub mode: FractalMode,
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
    pub lut: Arc<ColorLookupTable>,
}

impl RenderRequest {
    /// A Julia render: each pixel seeds the orbit, `parameter` is `c`.
    pub fn julia(
        parameter: Complex,
        viewport: Viewport,
        max_iterations: u32,
        width: u32,
        height: u32,
        lut: Arc<ColorLookupTable>,
    ) -> Self {
        Self {
            mode: FractalMode::Julia { c: parameter },
            viewport,
            max_iterations,
            width,
            height,
            lut,
        }
    }

    /// A Mandelbrot render: each pixel is `c`, the orbit starts at 0.
    pub fn mandelbrot(
        viewport: Viewport,
        max_iterations: u32,
        width: u32,
        height: u32,
        lut: Arc<ColorLookupTable>,
    ) -> Self {
        Self {
            mode: FractalMode::Mandelbrot,
            viewport,
            max_iterations,
            width,
            height,
            lut,
        }
    }

    /// The Julia parameter, if this is a Julia render.
    pub fn parameter(&self) -> Option<Complex> {
        match self.mode {
            FractalMode::Julia { c } => Some(c),
            FractalMode::Mandelbrot => None,
        }
    }

    /// Zero-area buffers (e.g. mid layout change) render nothing.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// ---------------------------------------------------------------------------
// Shading
// ---------------------------------------------------------------------------

/// RGBA for one evaluated pixel.
#[inline]
pub fn shade(escape: &EscapeTime, lut: &ColorLookupTable) -> [u8; 4] {
    match escape.normalized() {
        Some(t) => {
            let [r, g, b] = lut.lookup(t);
            [r, g, b, 255]
        }
        None => INTERIOR_COLOR,
    }
}

/// Evaluate a single pixel exactly as [`render`] does.
pub fn evaluate_pixel(request: &RenderRequest, px: u32, py: u32) -> EscapeTime {
    let mapper = request.viewport.mapper(request.width, request.height);
    let point = mapper.to_complex(px as f64, py as f64);
    request.mode.iterate(point, request.max_iterations)
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Render a request into a fresh pixel buffer.
///
/// Returns `None` for a zero-area request. Rows are filled in parallel;
/// every pixel depends only on the request, so the output does not depend
/// on scheduling.
pub fn render(request: &RenderRequest) -> Option<PixelBuffer> {
    if request.is_degenerate() {
        debug!(
            width = request.width,
            height = request.height,
            "Skipping render of empty buffer"
        );
        return None;
    }
    let buffer = match request.mode {
        FractalMode::Julia { c } => fill(&Julia::new(c, request.max_iterations), request),
        FractalMode::Mandelbrot => fill(&Mandelbrot::new(request.max_iterations), request),
    };
    Some(buffer)
}

fn fill<F: Fractal + Sync>(fractal: &F, request: &RenderRequest) -> PixelBuffer {
    let start = Instant::now();
    let mapper = request.viewport.mapper(request.width, request.height);
    let lut = request.lut.as_ref();
    let mut buffer = PixelBuffer::new(request.width, request.height);
    let stride = request.width as usize * 4;

    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row.chunks_exact_mut(4).enumerate() {
                let point = mapper.to_complex(px as f64, py as f64);
                pixel.copy_from_slice(&shade(&fractal.iterate(point), lut));
            }
        });

    debug!(
        mode = request.mode.label(),
        width = request.width,
        height = request.height,
        max_iterations = fractal.max_iterations(),
        elapsed_ms = start.elapsed().as_millis(),
        "Frame rendered"
    );
    buffer
}
