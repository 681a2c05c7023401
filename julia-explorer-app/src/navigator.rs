//! Mandelbrot overview used to pick the Julia parameter.
//!
//! The fractal is rendered once per palette into a cached base image; moving
//! the marker only restores that image and redraws the crosshair.

use std::sync::Arc;

use tracing::debug;

use julia_explorer_core::{Complex, Viewport};
use julia_explorer_render::{render, ColorLookupTable, PixelBuffer, RenderRequest};

pub const NAVIGATOR_WIDTH: u32 = 300;
pub const NAVIGATOR_HEIGHT: u32 = 240;
pub const NAVIGATOR_MAX_ITERATIONS: u32 = 100;
/// At 5:4 this shows re ∈ [−2.2, 0.8], im ∈ [−1.2, 1.2].
pub const NAVIGATOR_CENTER: Complex = Complex { re: -0.7, im: 0.0 };
pub const NAVIGATOR_ZOOM: f64 = 4.0 / 3.0;

pub const MARKER_COLOR: [u8; 4] = [0xff, 0x22, 0x22, 0xff];
pub const MARKER_ARM: i64 = 8;
pub const MARKER_DOT_RADIUS: f64 = 3.0;
/// Picked parameters are stored at this many decimals.
pub const PICK_DECIMALS: i32 = 4;

#[derive(Debug)]
pub struct Navigator {
    viewport: Viewport,
    width: u32,
    height: u32,
    max_iterations: u32,
    /// The last Mandelbrot render, without marker.
    base: Option<PixelBuffer>,
    /// `base` plus the crosshair.
    display: Option<PixelBuffer>,
    marker: Complex,
    renders: u64,
}

impl Navigator {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> crate::Result<Self> {
        Ok(Self {
            viewport: Viewport::new(NAVIGATOR_CENTER, NAVIGATOR_ZOOM)?,
            width,
            height,
            max_iterations,
            base: None,
            display: None,
            marker: Complex::ZERO,
            renders: 0,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of Mandelbrot renders performed.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// The navigator image with crosshair, once rendered.
    pub fn image(&self) -> Option<&PixelBuffer> {
        self.display.as_ref()
    }

    /// The cached Mandelbrot image without crosshair.
    pub fn base_image(&self) -> Option<&PixelBuffer> {
        self.base.as_ref()
    }

    /// Re-render the Mandelbrot set with `lut`, then redraw the marker.
    pub fn render(&mut self, lut: Arc<ColorLookupTable>) {
        let request = RenderRequest::mandelbrot(
            self.viewport,
            self.max_iterations,
            self.width,
            self.height,
            lut,
        );
        self.base = render(&request);
        self.renders += 1;
        debug!(
            width = self.width,
            height = self.height,
            "Navigator rendered"
        );
        self.draw_marker(self.marker);
    }

    /// Move the crosshair to `parameter` without recomputing the fractal.
    pub fn draw_marker(&mut self, parameter: Complex) {
        self.marker = parameter;
        let (px, py) = self.marker_pixel(parameter);
        let Some(base) = &self.base else {
            return;
        };
        let display = self.display.get_or_insert_with(|| base.clone());
        display.restore_from(base);
        display.draw_crosshair(px, py, MARKER_ARM, MARKER_DOT_RADIUS, MARKER_COLOR);
    }

    /// Fractional navigator pixel of `parameter`.
    pub fn marker_pixel(&self, parameter: Complex) -> (f64, f64) {
        self.viewport
            .complex_to_pixel(parameter, self.width, self.height)
    }

    /// Parameter under navigator pixel `(px, py)`, rounded to 4 decimals.
    pub fn pick(&self, px: f64, py: f64) -> Complex {
        self.viewport
            .pixel_to_complex(px, py, self.width, self.height)
            .rounded(PICK_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use julia_explorer_render::{Palette, INTERIOR_COLOR, THUMBNAIL_LUT_SIZE};

    fn lut() -> Arc<ColorLookupTable> {
        Arc::new(ColorLookupTable::from_palette(&Palette::default(), THUMBNAIL_LUT_SIZE).unwrap())
    }

    fn navigator() -> Navigator {
        Navigator::new(NAVIGATOR_WIDTH, NAVIGATOR_HEIGHT, NAVIGATOR_MAX_ITERATIONS).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fixed_viewport_bounds() {
        let b = navigator()
            .viewport()
            .bounds(NAVIGATOR_WIDTH, NAVIGATOR_HEIGHT);
        assert!(close(b.x_min, -2.2));
        assert!(close(b.x_max, 0.8));
        assert!(close(b.y_min, -1.2));
        assert!(close(b.y_max, 1.2));
    }

    #[test]
    fn pick_rounds_to_four_decimals() {
        let nav = navigator();
        assert_eq!(nav.pick(0.0, 0.0), Complex::new(-2.2, -1.2));
        assert_eq!(nav.pick(150.0, 120.0), Complex::new(-0.7, 0.0));
        let c = nav.pick(123.4, 56.7);
        assert_eq!(c, c.rounded(4));
        // 123.4 px → −2.2 + 123.4 · 0.01 = −0.966
        assert_eq!(c.re, -0.966);
    }

    #[test]
    fn marker_pixel_inverts_pick() {
        let nav = navigator();
        let (px, py) = nav.marker_pixel(Complex::new(-0.7, 0.0));
        assert!(close(px, 150.0));
        assert!(close(py, 120.0));
    }

    #[test]
    fn marker_before_render_is_remembered() {
        let mut nav = navigator();
        nav.draw_marker(Complex::new(-0.1226, 0.7449));
        assert!(nav.image().is_none());
        nav.render(lut());
        let (px, py) = nav.marker_pixel(Complex::new(-0.1226, 0.7449));
        assert_eq!(
            nav.image().unwrap().pixel(px.round() as u32, py.round() as u32),
            Some(MARKER_COLOR)
        );
    }

    #[test]
    fn moving_marker_does_not_rerender() {
        let mut nav = navigator();
        nav.render(lut());
        let base = nav.base_image().unwrap().clone();

        nav.draw_marker(Complex::new(-0.7, 0.0));
        assert_eq!(nav.image().unwrap().pixel(150, 120), Some(MARKER_COLOR));
        nav.draw_marker(Complex::new(0.25, 0.0));
        // Old crosshair erased, new one drawn at (245, 120).
        assert_eq!(
            nav.image().unwrap().pixel(150, 120),
            base.pixel(150, 120)
        );
        assert_eq!(nav.image().unwrap().pixel(245, 120), Some(MARKER_COLOR));

        assert_eq!(nav.renders(), 1);
        assert_eq!(nav.base_image(), Some(&base));
    }

    #[test]
    fn shows_the_mandelbrot_set() {
        let mut nav = navigator();
        nav.render(lut());
        let base = nav.base_image().unwrap();
        // Main cardioid at c = −0.2 is interior, the corner is not.
        let (px, py) = nav.marker_pixel(Complex::new(-0.2, 0.0));
        assert_eq!(base.pixel(px as u32, py as u32), Some(INTERIOR_COLOR));
        assert_ne!(base.pixel(0, 0), Some(INTERIOR_COLOR));
    }
}
