//! Explorer state and the input handlers that mutate it.
//!
//! Handlers never render. Each one reports an [`Invalidation`] describing
//! which outputs are stale, and the session turns that into work.

use std::ops::BitOr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use julia_explorer_core::{
    find_preset, Complex, Viewport, DEFAULT_MAX_ITERATIONS, DEFAULT_PARAMETER, PRESETS,
};
use julia_explorer_render::{
    builtin_palette, parse_hex_color, ColorLookupTable, CustomPalette, Palette, RenderError,
    RenderRequest, Rgb,
};

use crate::error::AppError;

pub const MIN_ITERATIONS: u32 = 1;
pub const MAX_ITERATIONS: u32 = 10_000;
/// Parameter change per arrow-key press.
pub const PARAMETER_STEP: f64 = 0.005;
/// Keyboard nudges keep each parameter component within `±PARAMETER_LIMIT`.
pub const PARAMETER_LIMIT: f64 = 2.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which gradient drives coloring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteChoice {
    /// A builtin palette, by key.
    Builtin(String),
    /// The user-edited gradient.
    Custom,
}

/// Keyboard shortcuts understood by the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// `R`: reset the view.
    Reset,
}

/// Outputs made stale by a state change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidation {
    /// The main Julia render.
    pub view: bool,
    /// The navigator crosshair.
    pub marker: bool,
    /// The active palette: navigator and gallery must re-render.
    pub palette: bool,
}

impl Invalidation {
    pub const NONE: Self = Self {
        view: false,
        marker: false,
        palette: false,
    };
    pub const VIEW: Self = Self {
        view: true,
        marker: false,
        palette: false,
    };
    pub const PARAMETER: Self = Self {
        view: true,
        marker: true,
        palette: false,
    };
    pub const PALETTE: Self = Self {
        view: true,
        marker: false,
        palette: true,
    };

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

impl BitOr for Invalidation {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            view: self.view || rhs.view,
            marker: self.marker || rhs.marker,
            palette: self.palette || rhs.palette,
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the user can change.
///
/// The custom editor always holds the stops of the active palette: choosing
/// a builtin copies its stops in, and editing a stop switches the choice to
/// [`PaletteChoice::Custom`].
#[derive(Debug, Clone)]
pub struct ExplorerState {
    parameter: Complex,
    viewport: Viewport,
    max_iterations: u32,
    palette_choice: PaletteChoice,
    custom: CustomPalette,
    active_preset: Option<usize>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            parameter: DEFAULT_PARAMETER,
            viewport: Viewport::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            palette_choice: PaletteChoice::Builtin(
                julia_explorer_render::DEFAULT_PALETTE_KEY.to_string(),
            ),
            custom: CustomPalette::from_palette(&Palette::default()),
            active_preset: None,
        }
    }
}

impl ExplorerState {
    /// Default state with a configured iteration cap and builtin palette.
    pub fn new(max_iterations: u32, palette_key: &str) -> crate::Result<Self> {
        let mut state = Self::default();
        state.set_max_iterations(max_iterations);
        state.select_palette(PaletteChoice::Builtin(palette_key.to_string()))?;
        Ok(state)
    }

    // -- Accessors ---------------------------------------------------------

    pub fn parameter(&self) -> Complex {
        self.parameter
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn palette_choice(&self) -> &PaletteChoice {
        &self.palette_choice
    }

    pub fn custom_palette(&self) -> &CustomPalette {
        &self.custom
    }

    pub fn active_preset(&self) -> Option<usize> {
        self.active_preset
    }

    /// The gradient currently used for coloring.
    pub fn active_palette(&self) -> &Palette {
        self.custom.palette()
    }

    /// Changes whenever the active palette's stops change.
    pub fn palette_revision(&self) -> u64 {
        self.custom.revision()
    }

    /// Display name of the active palette.
    pub fn palette_name(&self) -> &str {
        match &self.palette_choice {
            PaletteChoice::Builtin(key) => builtin_palette(key).map_or(key.as_str(), |b| b.name),
            PaletteChoice::Custom => "Custom",
        }
    }

    /// Snapshot of the main view at the given buffer size.
    pub fn request(&self, width: u32, height: u32, lut: Arc<ColorLookupTable>) -> RenderRequest {
        RenderRequest::julia(
            self.parameter,
            self.viewport,
            self.max_iterations,
            width,
            height,
            lut,
        )
    }

    // -- Parameter ---------------------------------------------------------

    /// Set the Julia parameter by hand. Clears the preset highlight.
    pub fn set_parameter(&mut self, parameter: Complex) -> Invalidation {
        if !parameter.re.is_finite() || !parameter.im.is_finite() {
            return Invalidation::NONE;
        }
        self.parameter = parameter;
        self.active_preset = None;
        Invalidation::PARAMETER
    }

    pub fn set_parameter_real(&mut self, re: f64) -> Invalidation {
        self.set_parameter(Complex::new(re, self.parameter.im))
    }

    pub fn set_parameter_imag(&mut self, im: f64) -> Invalidation {
        self.set_parameter(Complex::new(self.parameter.re, im))
    }

    /// Load a preset: parameter, highlight, and a reset view.
    pub fn select_preset(&mut self, index: usize) -> crate::Result<Invalidation> {
        let preset = PRESETS.get(index).ok_or(AppError::PresetIndex(index))?;
        self.parameter = preset.parameter;
        self.active_preset = Some(index);
        self.viewport.reset();
        debug!(preset = preset.name, "Preset selected");
        Ok(Invalidation::PARAMETER)
    }

    pub fn select_preset_by_name(&mut self, name: &str) -> crate::Result<Invalidation> {
        let (index, _) = find_preset(name).ok_or_else(|| AppError::UnknownPreset(name.into()))?;
        self.select_preset(index)
    }

    // -- View --------------------------------------------------------------

    /// Set the iteration cap, clamped into `[MIN_ITERATIONS, MAX_ITERATIONS]`.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Invalidation {
        self.max_iterations = max_iterations.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
        Invalidation::VIEW
    }

    /// Set the zoom from its logarithmic control (`zoom = 10^log_zoom`).
    pub fn set_log_zoom(&mut self, log_zoom: f64) -> crate::Result<Invalidation> {
        self.viewport = Viewport::with_log_zoom(self.viewport.center, log_zoom)?;
        Ok(Invalidation::VIEW)
    }

    pub fn set_pan(&mut self, x: f64, y: f64) -> crate::Result<Invalidation> {
        self.viewport.pan_to(Complex::new(x, y))?;
        Ok(Invalidation::VIEW)
    }

    /// Back to zoom 1 centred on the origin.
    pub fn reset_view(&mut self) -> Invalidation {
        self.viewport.reset();
        Invalidation::VIEW
    }

    /// Arrow keys nudge the parameter; `R` resets the view. Any key clears
    /// the preset highlight.
    pub fn handle_key(&mut self, key: Key) -> Invalidation {
        // Only the moved component is clamped.
        let c = &mut self.parameter;
        match key {
            Key::Left => c.re = (c.re - PARAMETER_STEP).max(-PARAMETER_LIMIT),
            Key::Right => c.re = (c.re + PARAMETER_STEP).min(PARAMETER_LIMIT),
            Key::Up => c.im = (c.im + PARAMETER_STEP).min(PARAMETER_LIMIT),
            Key::Down => c.im = (c.im - PARAMETER_STEP).max(-PARAMETER_LIMIT),
            Key::Reset => self.viewport.reset(),
        }
        self.active_preset = None;
        Invalidation::PARAMETER
    }

    // -- Palette -----------------------------------------------------------

    /// Switch palettes. Builtins replace the custom editor's stops.
    pub fn select_palette(&mut self, choice: PaletteChoice) -> crate::Result<Invalidation> {
        if let PaletteChoice::Builtin(key) = &choice {
            let builtin =
                builtin_palette(key).ok_or_else(|| RenderError::UnknownPalette(key.clone()))?;
            self.custom.load(&builtin.palette());
        }
        debug!(?choice, "Palette selected");
        self.palette_choice = choice;
        Ok(Invalidation::PALETTE)
    }

    /// Add a stop to the custom gradient. Returns its index.
    pub fn add_stop(&mut self) -> Option<usize> {
        let index = self.custom.add_stop()?;
        self.palette_choice = PaletteChoice::Custom;
        Some(index)
    }

    pub fn remove_stop(&mut self, index: usize) -> bool {
        self.edited(|custom| custom.remove_stop(index))
    }

    /// Move a stop; returns its index after re-sorting.
    pub fn move_stop(&mut self, index: usize, position: f64) -> Option<usize> {
        let new_index = self.custom.move_stop(index, position)?;
        self.palette_choice = PaletteChoice::Custom;
        Some(new_index)
    }

    pub fn recolor_stop(&mut self, index: usize, color: Rgb) -> bool {
        self.edited(|custom| custom.recolor_stop(index, color))
    }

    /// Recolor from `#rrggbb` input; malformed input changes nothing.
    pub fn recolor_stop_hex(&mut self, index: usize, hex: &str) -> bool {
        match parse_hex_color(hex) {
            Some(color) => self.recolor_stop(index, color),
            None => false,
        }
    }

    fn edited(&mut self, edit: impl FnOnce(&mut CustomPalette) -> bool) -> bool {
        let changed = edit(&mut self.custom);
        if changed {
            self.palette_choice = PaletteChoice::Custom;
        }
        changed
    }
}
