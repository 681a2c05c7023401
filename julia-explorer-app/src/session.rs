//! The explorer session: state, scheduler, navigator and gallery wired together.
//!
//! Every input goes through a session method that updates [`ExplorerState`],
//! then [`apply`](ExplorerSession::apply)s the resulting invalidation: the
//! main view is scheduled, the navigator marker moves, and palette changes
//! refresh the navigator and the gallery. Finished frames arrive through
//! [`poll`](ExplorerSession::poll).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use julia_explorer_core::Complex;
use julia_explorer_render::{
    export_file_name, export_png, thumbnail_lut, ColorLookupTable, ExportMetadata, PixelBuffer,
    RenderRequest, Rgb, FULL_LUT_SIZE,
};

use crate::error::AppError;
use crate::gallery::PresetGallery;
use crate::navigator::Navigator;
use crate::preferences::AppPreferences;
use crate::readout::pointer_readout;
use crate::scheduler::{RenderOutcome, RenderScheduler};
use crate::state::{ExplorerState, Invalidation, Key, PaletteChoice};

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Both lookup tables for one palette revision.
#[derive(Debug)]
struct PaletteTables {
    revision: u64,
    full: Arc<ColorLookupTable>,
    reduced: Arc<ColorLookupTable>,
}

impl PaletteTables {
    fn build(state: &ExplorerState) -> crate::Result<Self> {
        let palette = state.active_palette();
        Ok(Self {
            revision: state.palette_revision(),
            full: Arc::new(ColorLookupTable::from_palette(palette, FULL_LUT_SIZE)?),
            reduced: thumbnail_lut(palette)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A finished frame with the request and palette that produced it.
#[derive(Debug)]
struct Frame {
    request: RenderRequest,
    buffer: PixelBuffer,
    palette_name: String,
}

#[derive(Debug)]
pub struct ExplorerSession {
    state: ExplorerState,
    scheduler: RenderScheduler,
    navigator: Navigator,
    gallery: PresetGallery,
    tables: PaletteTables,
    width: u32,
    height: u32,
    frame: Option<Frame>,
}

impl ExplorerSession {
    /// Build a session from preferences, render the navigator and gallery,
    /// and schedule the first frame.
    pub fn new(prefs: &AppPreferences, now: Instant) -> crate::Result<Self> {
        let state = ExplorerState::new(prefs.default_max_iterations, &prefs.default_palette)?;
        let tables = PaletteTables::build(&state)?;
        let mut navigator = Navigator::new(
            prefs.navigator_width,
            prefs.navigator_height,
            prefs.navigator_max_iterations,
        )?;
        navigator.draw_marker(state.parameter());
        navigator.render(Arc::clone(&tables.reduced));
        let mut gallery = PresetGallery::new();
        gallery.refresh(&tables.reduced);

        let mut session = Self {
            state,
            scheduler: RenderScheduler::new(prefs.debounce()),
            navigator,
            gallery,
            tables,
            width: prefs.output_width,
            height: prefs.output_height,
            frame: None,
        };
        session.schedule(now);
        info!(
            width = session.width,
            height = session.height,
            palette = session.state.palette_name(),
            "Explorer session ready"
        );
        Ok(session)
    }

    // -- Accessors ---------------------------------------------------------

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn gallery(&self) -> &PresetGallery {
        &self.gallery
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The most recent finished frame.
    pub fn frame(&self) -> Option<&PixelBuffer> {
        self.frame.as_ref().map(|frame| &frame.buffer)
    }

    /// The request behind [`frame`](Self::frame).
    pub fn frame_request(&self) -> Option<&RenderRequest> {
        self.frame.as_ref().map(|frame| &frame.request)
    }

    /// Export metadata for [`frame`](Self::frame).
    pub fn frame_metadata(&self) -> Option<ExportMetadata> {
        self.frame
            .as_ref()
            .map(|frame| ExportMetadata::for_request(&frame.request, frame.palette_name.as_str()))
    }

    /// Snapshot of the current view at the session's output size.
    pub fn current_request(&self) -> RenderRequest {
        self.state
            .request(self.width, self.height, Arc::clone(&self.tables.full))
    }

    /// Pointer tooltip for pixel `(px, py)` of the main view.
    pub fn readout(&self, px: f64, py: f64) -> String {
        pointer_readout(&self.state.viewport(), px, py, self.width, self.height)
    }

    // -- Invalidation ------------------------------------------------------

    /// Turn a state change into work.
    pub fn apply(&mut self, invalidation: Invalidation, now: Instant) -> crate::Result<()> {
        if invalidation.palette && self.tables.revision != self.state.palette_revision() {
            self.tables = PaletteTables::build(&self.state)?;
            self.navigator.render(Arc::clone(&self.tables.reduced));
            self.gallery.refresh(&self.tables.reduced);
            debug!(revision = self.tables.revision, "Palette tables rebuilt");
        }
        if invalidation.marker {
            self.navigator.draw_marker(self.state.parameter());
        }
        if invalidation.view {
            self.schedule(now);
        }
        Ok(())
    }

    fn schedule(&mut self, now: Instant) {
        let request = self.current_request();
        self.scheduler.request(request, now);
    }

    // -- Input handlers ----------------------------------------------------

    pub fn set_parameter(&mut self, parameter: Complex, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_parameter(parameter);
        self.apply(inv, now)
    }

    pub fn set_parameter_real(&mut self, re: f64, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_parameter_real(re);
        self.apply(inv, now)
    }

    pub fn set_parameter_imag(&mut self, im: f64, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_parameter_imag(im);
        self.apply(inv, now)
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_max_iterations(max_iterations);
        self.apply(inv, now)
    }

    pub fn set_log_zoom(&mut self, log_zoom: f64, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_log_zoom(log_zoom)?;
        self.apply(inv, now)
    }

    pub fn set_pan(&mut self, x: f64, y: f64, now: Instant) -> crate::Result<()> {
        let inv = self.state.set_pan(x, y)?;
        self.apply(inv, now)
    }

    pub fn reset_view(&mut self, now: Instant) -> crate::Result<()> {
        let inv = self.state.reset_view();
        self.apply(inv, now)
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> crate::Result<()> {
        let inv = self.state.handle_key(key);
        self.apply(inv, now)
    }

    pub fn select_preset(&mut self, index: usize, now: Instant) -> crate::Result<()> {
        let inv = self.state.select_preset(index)?;
        self.apply(inv, now)
    }

    pub fn select_preset_by_name(&mut self, name: &str, now: Instant) -> crate::Result<()> {
        let inv = self.state.select_preset_by_name(name)?;
        self.apply(inv, now)
    }

    pub fn select_palette(&mut self, choice: PaletteChoice, now: Instant) -> crate::Result<()> {
        let inv = self.state.select_palette(choice)?;
        self.apply(inv, now)
    }

    /// Add a custom stop; returns its index, `None` when the editor is full.
    pub fn add_stop(&mut self, now: Instant) -> crate::Result<Option<usize>> {
        let index = self.state.add_stop();
        self.apply_palette_edit(index.is_some(), now)?;
        Ok(index)
    }

    pub fn remove_stop(&mut self, index: usize, now: Instant) -> crate::Result<bool> {
        let changed = self.state.remove_stop(index);
        self.apply_palette_edit(changed, now)?;
        Ok(changed)
    }

    /// Move a custom stop; returns its index after re-sorting.
    pub fn move_stop(
        &mut self,
        index: usize,
        position: f64,
        now: Instant,
    ) -> crate::Result<Option<usize>> {
        let new_index = self.state.move_stop(index, position);
        self.apply_palette_edit(new_index.is_some(), now)?;
        Ok(new_index)
    }

    pub fn recolor_stop(&mut self, index: usize, color: Rgb, now: Instant) -> crate::Result<bool> {
        let changed = self.state.recolor_stop(index, color);
        self.apply_palette_edit(changed, now)?;
        Ok(changed)
    }

    pub fn recolor_stop_hex(&mut self, index: usize, hex: &str, now: Instant) -> crate::Result<bool> {
        let changed = self.state.recolor_stop_hex(index, hex);
        self.apply_palette_edit(changed, now)?;
        Ok(changed)
    }

    fn apply_palette_edit(&mut self, changed: bool, now: Instant) -> crate::Result<()> {
        if changed {
            self.apply(Invalidation::PALETTE, now)
        } else {
            Ok(())
        }
    }

    /// Pick the parameter under navigator pixel `(px, py)`.
    pub fn click_navigator(&mut self, px: f64, py: f64, now: Instant) -> crate::Result<Complex> {
        let parameter = self.navigator.pick(px, py);
        self.set_parameter(parameter, now)?;
        debug!(re = parameter.re, im = parameter.im, "Navigator pick");
        Ok(parameter)
    }

    /// The display area changed size. Zero-area sizes render nothing.
    pub fn resize(&mut self, width: u32, height: u32, now: Instant) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.schedule(now);
        }
    }

    // -- Frames ------------------------------------------------------------

    /// Frame callback: run the pending render once its deadline has passed.
    ///
    /// Returns the generation of a newly landed frame.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let outcome = self.scheduler.poll(now)?;
        self.land(outcome)
    }

    /// Render whatever is pending immediately.
    pub fn flush(&mut self) -> Option<u64> {
        let outcome = self.scheduler.flush()?;
        self.land(outcome)
    }

    fn land(&mut self, outcome: RenderOutcome) -> Option<u64> {
        let RenderOutcome {
            generation,
            request,
            buffer,
        } = outcome;
        // A zero-area render leaves the previous frame in place.
        let buffer = buffer?;
        self.frame = Some(Frame {
            request,
            buffer,
            palette_name: self.state.palette_name().to_string(),
        });
        Some(generation)
    }

    /// Write the current frame as `julia-set-(re)-(im).png` into `dir`.
    pub fn export_frame(&self, dir: &Path) -> crate::Result<PathBuf> {
        let frame = self.frame.as_ref().ok_or(AppError::NoFrame)?;
        let parameter = frame.request.parameter().unwrap_or(self.state.parameter());
        let path = dir.join(export_file_name(parameter));
        let metadata = ExportMetadata::for_request(&frame.request, frame.palette_name.as_str());
        export_png(&frame.buffer, &path, &metadata)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::navigator::MARKER_COLOR;

    fn prefs() -> AppPreferences {
        AppPreferences {
            output_width: 80,
            output_height: 60,
            navigator_width: 60,
            navigator_height: 48,
            ..AppPreferences::default()
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_frame_lands_after_debounce() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        assert!(s.frame().is_none());
        assert!(s.poll(t0).is_none());
        assert_eq!(s.poll(t0 + ms(16)), Some(1));
        let frame = s.frame().unwrap();
        assert_eq!((frame.width, frame.height), (80, 60));
        assert_eq!(s.frame_request(), Some(&s.current_request()));
    }

    #[test]
    fn slider_drag_renders_once() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        for i in 0..8u64 {
            s.set_parameter_real(-0.7 + i as f64 * 0.01, t0 + ms(i * 4))
                .unwrap();
        }
        assert_eq!(s.poll(t0 + ms(100)), Some(1));
        assert!(s.poll(t0 + ms(200)).is_none());
        let rendered = s.frame_request().unwrap().parameter().unwrap();
        assert_eq!(rendered, s.state().parameter());
        assert_eq!(s.scheduler().superseded(), 8);
    }

    #[test]
    fn palette_change_refreshes_navigator_and_gallery() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        assert_eq!(s.navigator().renders(), 1);
        assert_eq!(s.gallery().builds(), 1);

        s.select_palette(PaletteChoice::Builtin("neon-abyss".into()), t0)
            .unwrap();
        assert_eq!(s.navigator().renders(), 2);
        assert_eq!(s.gallery().builds(), 2);

        // Parameter changes only move the marker.
        s.set_parameter(Complex::new(0.25, 0.0), t0).unwrap();
        assert_eq!(s.navigator().renders(), 2);
        assert_eq!(s.gallery().builds(), 2);

        // Reselecting the same palette changes nothing visible.
        s.select_palette(PaletteChoice::Builtin("neon-abyss".into()), t0)
            .unwrap();
        assert_eq!(s.navigator().renders(), 2);
    }

    #[test]
    fn stop_edits_rebuild_tables() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        let before = Arc::clone(&s.current_request().lut);
        assert!(s.recolor_stop_hex(4, "#00ff00", t0).unwrap());
        assert_eq!(s.state().palette_choice(), &PaletteChoice::Custom);
        assert_ne!(*s.current_request().lut, *before);
        assert_eq!(s.gallery().builds(), 2);

        // No-op edits schedule nothing new.
        s.flush();
        assert!(!s.remove_stop(99, t0).unwrap());
        assert!(s.scheduler().pending().is_none());
    }

    #[test]
    fn navigator_click_sets_rounded_parameter() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        s.select_preset(0, t0).unwrap();
        let c = s.click_navigator(12.3, 45.6, t0).unwrap();
        assert_eq!(c, c.rounded(4));
        assert_eq!(s.state().parameter(), c);
        assert_eq!(s.state().active_preset(), None);

        let (px, py) = s.navigator().marker_pixel(c);
        let img = s.navigator().image().unwrap();
        assert_eq!(
            img.pixel(px.round() as u32, py.round() as u32),
            Some(MARKER_COLOR)
        );
    }

    #[test]
    fn zero_size_keeps_previous_frame() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        s.flush().unwrap();
        let before = s.frame().unwrap().clone();
        s.resize(0, 60, t0);
        assert!(s.flush().is_none());
        assert_eq!(s.frame(), Some(&before));
    }

    #[test]
    fn export_writes_named_png() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        let dir = std::env::temp_dir().join("julia_explorer_session_export");
        let _ = std::fs::create_dir_all(&dir);
        assert!(matches!(s.export_frame(&dir), Err(AppError::NoFrame)));

        s.select_preset_by_name("Douady's Rabbit", t0).unwrap();
        s.flush().unwrap();
        let path = s.export_frame(&dir).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "julia-set-(-0.1226)-(0.7449).png"
        );
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_metadata_names_the_frames_palette() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        assert!(s.frame_metadata().is_none());
        s.flush().unwrap();

        // Switch palettes after the frame landed but before it is replaced.
        s.select_palette(PaletteChoice::Builtin("monochrome".into()), t0)
            .unwrap();
        assert_eq!(s.state().palette_name(), "Monochrome");
        assert_eq!(s.frame_metadata().unwrap().palette_name, "Crimson Night");

        s.flush().unwrap();
        assert_eq!(s.frame_metadata().unwrap().palette_name, "Monochrome");
    }

    #[test]
    fn readout_follows_view() {
        let t0 = Instant::now();
        let mut s = ExplorerSession::new(&prefs(), t0).unwrap();
        assert_eq!(s.readout(40.0, 30.0), "z = 0.0000 + 0.0000i");
        s.set_pan(0.5, -0.25, t0).unwrap();
        assert_eq!(s.readout(40.0, 30.0), "z = 0.5000 + -0.2500i");
    }
}
