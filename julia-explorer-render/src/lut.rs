use crate::error::RenderError;
use crate::palette::{Palette, Rgb};

/// Lookup table size for the interactive full-resolution render.
pub const FULL_LUT_SIZE: usize = 1024;
/// Lookup table size for thumbnails and the navigator.
pub const THUMBNAIL_LUT_SIZE: usize = 256;

/// A palette discretized into `len()` evenly spaced colors.
///
/// Entry `i` is `palette.sample(i / (len − 1))`, so both ends of the
/// gradient are represented exactly. Tables are rebuilt from the palette,
/// never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLookupTable {
    colors: Vec<Rgb>,
}

impl ColorLookupTable {
    pub fn from_palette(palette: &Palette, size: usize) -> crate::Result<Self> {
        if size < 2 {
            return Err(RenderError::InvalidLutSize(size));
        }
        let last = (size - 1) as f64;
        let colors = (0..size).map(|i| palette.sample(i as f64 / last)).collect();
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color for a normalized escape value.
    ///
    /// Index is `floor(t · len)`, clamped into the table.
    #[inline]
    pub fn lookup(&self, t: f64) -> Rgb {
        // `as usize` saturates: negatives and NaN land on 0.
        let idx = (t * self.colors.len() as f64) as usize;
        self.colors[idx.min(self.colors.len() - 1)]
    }
}
