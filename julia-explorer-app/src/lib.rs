pub mod app_dir;
pub mod error;
pub mod gallery;
pub mod navigator;
pub mod preferences;
pub mod readout;
pub mod scheduler;
pub mod session;
pub mod state;

pub use error::AppError;
pub use gallery::{caption, encode_thumbnail, PresetGallery};
pub use navigator::Navigator;
pub use preferences::AppPreferences;
pub use readout::{format_coordinate, pointer_readout};
pub use scheduler::{RenderOutcome, RenderScheduler, SchedulerState};
pub use session::ExplorerSession;
pub use state::{ExplorerState, Invalidation, Key, PaletteChoice};

/// Convenience result type for the app crate.
pub type Result<T> = std::result::Result<T, AppError>;
