use std::time::{Duration, Instant};

use julia_explorer_app::{AppPreferences, ExplorerSession, Key, PaletteChoice};
use julia_explorer_core::{evaluate, Complex, PRESETS};
use julia_explorer_render::{builtin_palette, shade, ColorLookupTable, FULL_LUT_SIZE};

fn small_prefs() -> AppPreferences {
    AppPreferences {
        output_width: 120,
        output_height: 90,
        navigator_width: 100,
        navigator_height: 80,
        ..AppPreferences::default()
    }
}

#[test]
fn preset_then_keyboard_then_render() {
    let t0 = Instant::now();
    let mut session = ExplorerSession::new(&small_prefs(), t0).unwrap();

    session.select_preset(7, t0).unwrap();
    session.set_log_zoom(0.5, t0).unwrap();
    session.handle_key(Key::Up, t0).unwrap();
    session.handle_key(Key::Reset, t0).unwrap();

    let generation = session.poll(t0 + Duration::from_millis(16)).unwrap();
    assert_eq!(generation, 1);

    let star = PRESETS[7].parameter;
    let expected = Complex::new(star.re, star.im + 0.005);
    let request = session.frame_request().unwrap();
    assert_eq!(request.parameter(), Some(expected));
    assert_eq!(request.viewport.zoom(), 1.0);
    assert_eq!(session.state().active_preset(), None);

    // Spot-check a pixel against a direct evaluation.
    let z0 = request.viewport.pixel_to_complex(10.0, 20.0, 120, 90);
    let escape = evaluate(expected, z0, request.max_iterations);
    assert_eq!(
        session.frame().unwrap().pixel(10, 20),
        Some(shade(&escape, &request.lut))
    );
}

#[test]
fn palette_selection_drives_main_lut() {
    let t0 = Instant::now();
    let mut session = ExplorerSession::new(&small_prefs(), t0).unwrap();
    session
        .select_palette(PaletteChoice::Builtin("monochrome".into()), t0)
        .unwrap();
    session.flush().unwrap();

    let expected =
        ColorLookupTable::from_palette(&builtin_palette("monochrome").unwrap().palette(), FULL_LUT_SIZE)
            .unwrap();
    assert_eq!(*session.frame_request().unwrap().lut, expected);
    assert_eq!(session.state().palette_name(), "Monochrome");
}

#[test]
fn gallery_thumbnails_are_available_as_base64() {
    let session = ExplorerSession::new(&small_prefs(), Instant::now()).unwrap();
    let gallery = session.gallery();
    for i in 0..PRESETS.len() {
        let b64 = gallery.thumbnail_base64(i).unwrap().unwrap();
        assert!(!b64.is_empty());
    }
    let sheet = gallery.contact_sheet(None).unwrap();
    assert!(sheet.width() > sheet.height());
}
