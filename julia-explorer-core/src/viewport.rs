use crate::complex::Complex;
use crate::error::CoreError;

/// Half the visible real-axis span at zoom 1.
pub const BASE_HALF_WIDTH: f64 = 2.0;

/// Visible rectangle of the complex plane for a particular buffer size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Defines the visible region of the complex plane.
///
/// The visible real span is `2 · BASE_HALF_WIDTH / zoom`; the imaginary
/// span follows from the buffer's aspect ratio, so the same viewport can be
/// mapped onto buffers of any size. Pixel `(0, 0)` is the top-left corner
/// and maps to `(x_min, y_min)`: pixel y grows with the imaginary part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Centre of the viewport in the complex plane.
    pub center: Complex,
    /// Magnification relative to the default view. Always `> 0`.
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: Complex::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(center: Complex, zoom: f64) -> crate::Result<Self> {
        if !center.re.is_finite() || !center.im.is_finite() {
            return Err(CoreError::InvalidCenter {
                re: center.re,
                im: center.im,
            });
        }
        if zoom <= 0.0 || !zoom.is_finite() {
            return Err(CoreError::InvalidZoom(zoom));
        }
        Ok(Self { center, zoom })
    }

    /// Build a viewport from a logarithmic zoom control (`zoom = 10^log_zoom`).
    pub fn with_log_zoom(center: Complex, log_zoom: f64) -> crate::Result<Self> {
        Self::new(center, 10f64.powf(log_zoom))
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> crate::Result<()> {
        *self = Self::new(self.center, zoom)?;
        Ok(())
    }

    /// Move the centre, keeping the zoom.
    pub fn pan_to(&mut self, center: Complex) -> crate::Result<()> {
        *self = Self::new(center, self.zoom)?;
        Ok(())
    }

    /// Back to centre `(0, 0)`, zoom 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        BASE_HALF_WIDTH / self.zoom
    }

    #[inline]
    pub fn half_height(&self, width: u32, height: u32) -> f64 {
        self.half_width() / (width as f64 / height as f64)
    }

    pub fn bounds(&self, width: u32, height: u32) -> PlaneBounds {
        let half_w = self.half_width();
        let half_h = self.half_height(width, height);
        PlaneBounds {
            x_min: self.center.re - half_w,
            x_max: self.center.re + half_w,
            y_min: self.center.im - half_h,
            y_max: self.center.im + half_h,
        }
    }

    /// Precompute the linear pixel ↔ plane mapping for one buffer size.
    pub fn mapper(&self, width: u32, height: u32) -> PixelMapper {
        let b = self.bounds(width, height);
        PixelMapper {
            x_min: b.x_min,
            y_min: b.y_min,
            dx: (b.x_max - b.x_min) / width as f64,
            dy: (b.y_max - b.y_min) / height as f64,
        }
    }

    /// Map (fractional) pixel coordinates to a complex-plane point.
    #[inline]
    pub fn pixel_to_complex(&self, px: f64, py: f64, width: u32, height: u32) -> Complex {
        self.mapper(width, height).to_complex(px, py)
    }

    /// Inverse of [`pixel_to_complex`](Self::pixel_to_complex).
    #[inline]
    pub fn complex_to_pixel(&self, z: Complex, width: u32, height: u32) -> (f64, f64) {
        self.mapper(width, height).to_pixel(z)
    }
}

/// The pixel ↔ plane mapping of a [`Viewport`] at a fixed buffer size.
///
/// Renderers build this once per frame; every pixel then maps with the
/// same arithmetic as [`Viewport::pixel_to_complex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapper {
    x_min: f64,
    y_min: f64,
    dx: f64,
    dy: f64,
}

impl PixelMapper {
    #[inline]
    pub fn to_complex(self, px: f64, py: f64) -> Complex {
        Complex::new(self.x_min + px * self.dx, self.y_min + py * self.dy)
    }

    #[inline]
    pub fn to_pixel(self, z: Complex) -> (f64, f64) {
        ((z.re - self.x_min) / self.dx, (z.im - self.y_min) / self.dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn default_view_spans_four_units() {
        let b = Viewport::default().bounds(400, 300);
        assert!((b.x_min + 2.0).abs() < EPSILON);
        assert!((b.x_max - 2.0).abs() < EPSILON);
        assert!((b.y_min + 1.5).abs() < EPSILON);
        assert!((b.y_max - 1.5).abs() < EPSILON);
    }

    #[test]
    fn zoom_shrinks_half_width() {
        let vp = Viewport::new(Complex::new(0.5, -0.25), 4.0).unwrap();
        assert!((vp.half_width() - 0.5).abs() < EPSILON);
        let b = vp.bounds(200, 100);
        assert!((b.y_max - b.y_min - 0.5).abs() < EPSILON);
    }

    #[test]
    fn log_zoom() {
        let vp = Viewport::with_log_zoom(Complex::ZERO, 2.0).unwrap();
        assert!((vp.zoom() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn top_left_pixel_maps_to_minimum_corner() {
        let z = Viewport::default().pixel_to_complex(0.0, 0.0, 400, 300);
        assert!((z.re + 2.0).abs() < EPSILON);
        assert!((z.im + 1.5).abs() < EPSILON);
    }

    #[test]
    fn round_trip_is_exact_within_tolerance() {
        let viewports = [
            Viewport::default(),
            Viewport::new(Complex::new(-0.7436, 0.1318), 1.0e4).unwrap(),
            Viewport::new(Complex::new(1.5, -1.9), 0.05).unwrap(),
        ];
        let sizes = [(400u32, 300u32), (120, 90), (1, 1), (1920, 1080)];
        for vp in &viewports {
            for &(w, h) in &sizes {
                for &(px, py) in &[(0.0, 0.0), (w as f64 / 2.0, h as f64 / 2.0), (w as f64 - 1.0, 17.25)] {
                    let z = vp.pixel_to_complex(px, py, w, h);
                    let (rx, ry) = vp.complex_to_pixel(z, w, h);
                    let tol_x = 1e-9 * px.abs().max(1.0);
                    let tol_y = 1e-9 * py.abs().max(1.0);
                    assert!((rx - px).abs() <= tol_x, "x {px} -> {rx} for {vp:?} {w}x{h}");
                    assert!((ry - py).abs() <= tol_y, "y {py} -> {ry} for {vp:?} {w}x{h}");
                }
            }
        }
    }

    #[test]
    fn invalid_zoom_rejected() {
        assert!(Viewport::new(Complex::ZERO, 0.0).is_err());
        assert!(Viewport::new(Complex::ZERO, -2.0).is_err());
        assert!(Viewport::new(Complex::ZERO, f64::NAN).is_err());
        assert!(Viewport::new(Complex::ZERO, f64::INFINITY).is_err());
    }

    #[test]
    fn invalid_center_rejected() {
        assert!(Viewport::new(Complex::new(f64::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn failed_zoom_update_keeps_previous() {
        let mut vp = Viewport::new(Complex::new(0.1, 0.2), 3.0).unwrap();
        assert!(vp.set_zoom(-1.0).is_err());
        assert!((vp.zoom() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn reset_restores_default() {
        let mut vp = Viewport::new(Complex::new(1.0, 1.0), 8.0).unwrap();
        vp.reset();
        assert_eq!(vp, Viewport::default());
    }
}
