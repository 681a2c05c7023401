//! PNG export with embedded metadata (tEXt chunks).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use julia_explorer_core::{Complex, FractalMode};

use crate::buffer::PixelBuffer;
use crate::error::RenderError;
use crate::renderer::RenderRequest;

const SOFTWARE: &str = "Julia Explorer";

/// Metadata to embed in an exported PNG as tEXt chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMetadata {
    pub mode: FractalMode,
    pub center: Complex,
    pub zoom: f64,
    pub max_iterations: u32,
    pub palette_name: String,
    pub width: u32,
    pub height: u32,
}

impl ExportMetadata {
    /// Describe the render that produced a buffer.
    pub fn for_request(request: &RenderRequest, palette_name: impl Into<String>) -> Self {
        Self {
            mode: request.mode,
            center: request.viewport.center,
            zoom: request.viewport.zoom(),
            max_iterations: request.max_iterations,
            palette_name: palette_name.into(),
            width: request.width,
            height: request.height,
        }
    }

    fn description(&self) -> String {
        let mut desc = format!(
            "{} - Center: {} {}i, Zoom: {}, Iterations: {}",
            self.mode.label(),
            self.center.re,
            self.center.im,
            self.zoom,
            self.max_iterations,
        );
        if let FractalMode::Julia { c } = self.mode {
            desc.push_str(&format!(", c: {} {}i", c.re, c.im));
        }
        desc
    }

    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("JuliaExplorer.Mode".into(), self.mode.label().to_string()),
            ("JuliaExplorer.CenterRe".into(), self.center.re.to_string()),
            ("JuliaExplorer.CenterIm".into(), self.center.im.to_string()),
            ("JuliaExplorer.Zoom".into(), self.zoom.to_string()),
            (
                "JuliaExplorer.MaxIterations".into(),
                self.max_iterations.to_string(),
            ),
            ("JuliaExplorer.Palette".into(), self.palette_name.clone()),
            (
                "JuliaExplorer.Resolution".into(),
                format!("{}x{}", self.width, self.height),
            ),
        ];
        if let FractalMode::Julia { c } = self.mode {
            pairs.push(("JuliaExplorer.ParameterRe".into(), c.re.to_string()));
            pairs.push(("JuliaExplorer.ParameterIm".into(), c.im.to_string()));
        }
        pairs
    }
}

/// `julia-set-(<re>)-(<im>).png` with four decimals per component.
pub fn export_file_name(parameter: Complex) -> String {
    // Adding 0.0 turns -0.0 into 0.0 so it never prints as "-0.0000".
    format!(
        "julia-set-({:.4})-({:.4}).png",
        parameter.re + 0.0,
        parameter.im + 0.0
    )
}

/// Encode `buffer` as an 8-bit RGBA PNG with metadata into any writer.
pub fn encode_png<W: Write>(
    buffer: &PixelBuffer,
    metadata: &ExportMetadata,
    writer: W,
) -> crate::Result<()> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(RenderError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }
    let expected = buffer.width as usize * buffer.height as usize * 4;
    if buffer.pixels.len() != expected {
        return Err(RenderError::PixelDataMismatch {
            width: buffer.width,
            height: buffer.height,
            got: buffer.pixels.len(),
        });
    }

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), SOFTWARE.to_string())?;
    encoder.add_text_chunk("Description".to_string(), metadata.description())?;
    for (key, value) in metadata.pairs() {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;
    Ok(())
}

/// Write a PNG file with embedded render metadata.
pub fn export_png(
    buffer: &PixelBuffer,
    path: &Path,
    metadata: &ExportMetadata,
) -> crate::Result<()> {
    let file = File::create(path)?;
    encode_png(buffer, metadata, BufWriter::new(file))?;
    info!(
        width = buffer.width,
        height = buffer.height,
        path = %path.display(),
        "Exported PNG"
    );
    Ok(())
}
