//! Preset gallery: one thumbnail per catalog entry.

use std::sync::Arc;
use std::time::Instant;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{imageops, ImageEncoder, Rgba, RgbaImage};
use tracing::{debug, info};

use julia_explorer_core::{Preset, PRESETS};
use julia_explorer_render::{
    render_thumbnail, ColorLookupTable, PixelBuffer, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH,
};

use crate::navigator::MARKER_COLOR;

/// Thumbnails per contact-sheet row.
pub const SHEET_COLUMNS: u32 = 5;
/// Spacing around and between thumbnails on the contact sheet.
pub const SHEET_GAP: u32 = 6;
const SHEET_BACKGROUND: [u8; 4] = [18, 12, 14, 255];
const HIGHLIGHT_WIDTH: u32 = 2;

/// `c = <re> ± <im>i`, with a true minus sign for negative imaginary parts.
pub fn caption(preset: &Preset) -> String {
    let c = preset.parameter;
    let sign = if c.im >= 0.0 { '+' } else { '\u{2212}' };
    format!("c = {} {} {}i", c.re, sign, c.im.abs())
}

/// Encode an RGBA pixel buffer as a base64 PNG string.
pub fn encode_thumbnail(buffer: &PixelBuffer) -> crate::Result<String> {
    let mut png_bytes: Vec<u8> = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(std::io::Cursor::new(&mut png_bytes));
    encoder.write_image(
        &buffer.pixels,
        buffer.width,
        buffer.height,
        image::ExtendedColorType::Rgba8,
    )?;
    let b64 = BASE64.encode(&png_bytes);
    debug!(
        "Encoded thumbnail ({}x{}, {} bytes b64)",
        buffer.width,
        buffer.height,
        b64.len()
    );
    Ok(b64)
}

/// Thumbnails for the whole preset catalog, cached per lookup table.
#[derive(Debug, Default)]
pub struct PresetGallery {
    lut: Option<Arc<ColorLookupTable>>,
    thumbnails: Vec<PixelBuffer>,
    builds: u64,
}

impl PresetGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render every thumbnail if `lut` differs from the one last used.
    /// Returns whether anything was rendered.
    pub fn refresh(&mut self, lut: &Arc<ColorLookupTable>) -> bool {
        if let Some(current) = &self.lut {
            if Arc::ptr_eq(current, lut) || **current == **lut {
                return false;
            }
        }
        let start = Instant::now();
        self.thumbnails = PRESETS
            .iter()
            .map(|preset| render_thumbnail(preset.parameter, lut))
            .collect();
        self.lut = Some(Arc::clone(lut));
        self.builds += 1;
        info!(
            count = self.thumbnails.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Preset gallery rendered"
        );
        true
    }

    /// Number of full gallery renders so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn thumbnails(&self) -> &[PixelBuffer] {
        &self.thumbnails
    }

    pub fn thumbnail(&self, index: usize) -> Option<&PixelBuffer> {
        self.thumbnails.get(index)
    }

    /// Preset, caption and thumbnail for each card, in catalog order.
    pub fn cards(&self) -> impl Iterator<Item = (&'static Preset, String, &PixelBuffer)> + '_ {
        PRESETS
            .iter()
            .zip(&self.thumbnails)
            .map(|(preset, thumb)| (preset, caption(preset), thumb))
    }

    /// Base64 PNG of one thumbnail, for preview hosts.
    pub fn thumbnail_base64(&self, index: usize) -> crate::Result<Option<String>> {
        self.thumbnail(index).map(encode_thumbnail).transpose()
    }

    /// All thumbnails on one grid, the active preset framed in the marker color.
    ///
    /// `None` before the first [`refresh`](Self::refresh).
    pub fn contact_sheet(&self, highlight: Option<usize>) -> Option<RgbaImage> {
        if self.thumbnails.is_empty() {
            return None;
        }
        let count = self.thumbnails.len() as u32;
        let rows = count.div_ceil(SHEET_COLUMNS);
        let cols = count.min(SHEET_COLUMNS);
        let cell_w = THUMBNAIL_WIDTH + SHEET_GAP;
        let cell_h = THUMBNAIL_HEIGHT + SHEET_GAP;
        let mut sheet = RgbaImage::from_pixel(
            cols * cell_w + SHEET_GAP,
            rows * cell_h + SHEET_GAP,
            Rgba(SHEET_BACKGROUND),
        );

        for (i, thumb) in self.thumbnails.iter().enumerate() {
            let i = i as u32;
            let x = SHEET_GAP + (i % SHEET_COLUMNS) * cell_w;
            let y = SHEET_GAP + (i / SHEET_COLUMNS) * cell_h;
            if highlight == Some(i as usize) {
                frame(&mut sheet, x, y, thumb.width, thumb.height);
            }
            if let Some(img) = RgbaImage::from_raw(thumb.width, thumb.height, thumb.pixels.clone())
            {
                imageops::replace(&mut sheet, &img, x as i64, y as i64);
            }
        }
        Some(sheet)
    }
}

/// Outline a `w × h` rectangle at `(x, y)` from the outside.
fn frame(sheet: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
    let x0 = x.saturating_sub(HIGHLIGHT_WIDTH);
    let y0 = y.saturating_sub(HIGHLIGHT_WIDTH);
    let x1 = (x + w + HIGHLIGHT_WIDTH).min(sheet.width());
    let y1 = (y + h + HIGHLIGHT_WIDTH).min(sheet.height());
    for py in y0..y1 {
        for px in x0..x1 {
            sheet.put_pixel(px, py, Rgba(MARKER_COLOR));
        }
    }
}
