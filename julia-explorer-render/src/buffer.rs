/// An RGBA pixel buffer representing a rendered image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black (opaque).
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[3] = 255;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.offset(x, y).map(|i| {
            [
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ]
        })
    }

    /// Write one pixel; coordinates outside the buffer are ignored.
    pub fn put_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            return;
        }
        if let Some(i) = self.offset(x as u32, y as u32) {
            self.pixels[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Overwrite this buffer with `source` (same-size buffers reuse the allocation).
    pub fn restore_from(&mut self, source: &PixelBuffer) {
        self.width = source.width;
        self.height = source.height;
        self.pixels.clone_from(&source.pixels);
    }

    /// Draw a `+` marker with a filled dot at fractional pixel `(cx, cy)`.
    ///
    /// Each arm reaches `arm` pixels from the centre; the dot has radius
    /// `dot_radius`. Parts outside the buffer are clipped.
    pub fn draw_crosshair(&mut self, cx: f64, cy: f64, arm: i64, dot_radius: f64, rgba: [u8; 4]) {
        if !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let x0 = cx.round() as i64;
        let y0 = cy.round() as i64;
        for d in -arm..=arm {
            self.put_pixel(x0 + d, y0, rgba);
            self.put_pixel(x0, y0 + d, rgba);
        }
        let r = dot_radius.ceil() as i64;
        let r_sq = dot_radius * dot_radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f64 <= r_sq {
                    self.put_pixel(x0 + dx, y0 + dy, rgba);
                }
            }
        }
    }
}
