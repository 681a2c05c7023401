use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use tracing::{error, info, warn};

use julia_explorer_app::{AppError, AppPreferences, ExplorerSession};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Julia Explorer");

    let prefs = AppPreferences::load();
    match run(&prefs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(prefs: &AppPreferences) -> julia_explorer_app::Result<()> {
    let mut session = ExplorerSession::new(prefs, Instant::now())?;
    if let Some(name) = &prefs.startup_preset {
        session.select_preset_by_name(name, Instant::now())?;
    }

    wait_for_frame(&mut session)?;

    let images = prefs.images_directory();
    fs::create_dir_all(&images)?;
    let path = session.export_frame(&images)?;
    info!(
        parameter = %julia_explorer_app::format_coordinate(session.state().parameter()),
        path = %path.display(),
        "Julia set exported"
    );

    if let Some(nav) = session.navigator().image() {
        save_rgba(nav.width, nav.height, nav.pixels.clone(), &images.join("navigator.png"))?;
    }
    match session.gallery().contact_sheet(session.state().active_preset()) {
        Some(sheet) => {
            let path = images.join("presets.png");
            sheet.save(&path)?;
            info!(path = %path.display(), "Preset contact sheet written");
        }
        None => warn!("Preset gallery is empty"),
    }
    Ok(())
}

/// Drive the scheduler the way a frame callback would until a frame lands.
fn wait_for_frame(session: &mut ExplorerSession) -> julia_explorer_app::Result<()> {
    loop {
        if session.poll(Instant::now()).is_some() {
            return Ok(());
        }
        match session.scheduler().next_deadline() {
            Some(deadline) => thread::sleep(deadline.saturating_duration_since(Instant::now())),
            None => return Err(AppError::NoFrame),
        }
    }
}

fn save_rgba(width: u32, height: u32, pixels: Vec<u8>, path: &Path) -> julia_explorer_app::Result<()> {
    match image::RgbaImage::from_raw(width, height, pixels) {
        Some(img) => {
            img.save(path)?;
            info!(path = %path.display(), "Navigator image written");
        }
        None => warn!("Navigator buffer does not match its size"),
    }
    Ok(())
}
