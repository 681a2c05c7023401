//! Text shown next to the controls and under the pointer.

use julia_explorer_core::{Complex, Viewport};

/// `"<re> + <im>i"` with four decimals each.
pub fn format_coordinate(z: Complex) -> String {
    format!("{:.4} + {:.4}i", z.re + 0.0, z.im + 0.0)
}

/// Tooltip for the plane point under pixel `(px, py)` of a `width × height` view.
pub fn pointer_readout(viewport: &Viewport, px: f64, py: f64, width: u32, height: u32) -> String {
    let z = viewport.pixel_to_complex(px, py, width, height);
    format!("z = {}", format_coordinate(z))
}

pub fn format_zoom(zoom: f64) -> String {
    format!("{zoom:.1}x")
}

pub fn format_pan(offset: f64) -> String {
    format!("{:.2}", offset + 0.0)
}
