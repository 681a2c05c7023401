use thiserror::Error;

/// Errors originating from the core fractal math.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid zoom: {0} (must be positive and finite)")]
    InvalidZoom(f64),

    #[error("invalid viewport center: {re} + {im}i (must be finite)")]
    InvalidCenter { re: f64, im: f64 },
}
