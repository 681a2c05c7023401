use thiserror::Error;

use julia_explorer_core::CoreError;
use julia_explorer_render::RenderError;

/// Errors surfaced by the explorer session and the headless binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("preset index {0} out of range")]
    PresetIndex(usize),

    #[error("no frame has been rendered yet")]
    NoFrame,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
