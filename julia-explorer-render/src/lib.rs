pub mod buffer;
pub mod error;
pub mod export;
pub mod lut;
pub mod palette;
pub mod renderer;
pub mod thumbnail;

pub use buffer::PixelBuffer;
pub use error::RenderError;
pub use export::{encode_png, export_file_name, export_png, ExportMetadata};
pub use lut::{ColorLookupTable, FULL_LUT_SIZE, THUMBNAIL_LUT_SIZE};
pub use palette::{
    builtin_palette, parse_hex_color, to_hex, BuiltinPalette, CustomPalette, GradientStop,
    Palette, Rgb, BUILTIN_PALETTES, DEFAULT_PALETTE_KEY,
};
pub use renderer::{evaluate_pixel, render, shade, RenderRequest, INTERIOR_COLOR};
pub use thumbnail::{
    render_thumbnail, thumbnail_lut, thumbnail_request, THUMBNAIL_HEIGHT,
    THUMBNAIL_MAX_ITERATIONS, THUMBNAIL_WIDTH,
};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
