//! Small fixed-size renders for preset previews.

use std::sync::Arc;

use julia_explorer_core::{Complex, Viewport};

use crate::buffer::PixelBuffer;
use crate::lut::{ColorLookupTable, THUMBNAIL_LUT_SIZE};
use crate::palette::Palette;
use crate::renderer::{render, RenderRequest};

pub const THUMBNAIL_WIDTH: u32 = 120;
pub const THUMBNAIL_HEIGHT: u32 = 90;
pub const THUMBNAIL_MAX_ITERATIONS: u32 = 80;

/// The reduced lookup table used for thumbnails and the navigator.
pub fn thumbnail_lut(palette: &Palette) -> crate::Result<Arc<ColorLookupTable>> {
    Ok(Arc::new(ColorLookupTable::from_palette(
        palette,
        THUMBNAIL_LUT_SIZE,
    )?))
}

/// Default-viewport Julia request at thumbnail size.
pub fn thumbnail_request(parameter: Complex, lut: Arc<ColorLookupTable>) -> RenderRequest {
    RenderRequest::julia(
        parameter,
        Viewport::default(),
        THUMBNAIL_MAX_ITERATIONS,
        THUMBNAIL_WIDTH,
        THUMBNAIL_HEIGHT,
        lut,
    )
}

/// Render one preview. The table is shared across a whole gallery.
pub fn render_thumbnail(parameter: Complex, lut: &Arc<ColorLookupTable>) -> PixelBuffer {
    // Thumbnail dimensions are non-zero constants.
    render(&thumbnail_request(parameter, Arc::clone(lut)))
        .unwrap_or_else(|| PixelBuffer::new(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{evaluate_pixel, shade};

    #[test]
    fn thumbnail_has_fixed_size() {
        let lut = thumbnail_lut(&Palette::default()).unwrap();
        assert_eq!(lut.len(), THUMBNAIL_LUT_SIZE);
        let buf = render_thumbnail(Complex::new(-0.1226, 0.7449), &lut);
        assert_eq!((buf.width, buf.height), (THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT));
        assert_eq!(buf.pixels.len(), 120 * 90 * 4);
    }

    #[test]
    fn thumbnail_uses_the_shared_renderer() {
        let lut = thumbnail_lut(&Palette::default()).unwrap();
        let parameter = Complex::new(-0.8, 0.156);
        let req = thumbnail_request(parameter, Arc::clone(&lut));
        assert_eq!(req.max_iterations, THUMBNAIL_MAX_ITERATIONS);
        assert_eq!(req.viewport, Viewport::default());

        let buf = render_thumbnail(parameter, &lut);
        for (px, py) in [(0, 0), (60, 45), (119, 89), (30, 70)] {
            let expected = shade(&evaluate_pixel(&req, px, py), &lut);
            assert_eq!(buf.pixel(px, py), Some(expected));
        }
    }
}
