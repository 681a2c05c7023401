use crate::error::RenderError;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// A palette must keep at least this many stops.
pub const MIN_STOPS: usize = 2;
/// The custom editor refuses to add stops beyond this count.
pub const MAX_CUSTOM_STOPS: usize = 5;
/// Where the custom editor inserts a new stop.
pub const NEW_STOP_POSITION: f64 = 0.5;
/// The color of a freshly added stop.
pub const NEW_STOP_COLOR: Rgb = [255, 0, 0];

/// Key of the palette selected at startup.
pub const DEFAULT_PALETTE_KEY: &str = "crimson-night";

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub position: f64,
    pub color: Rgb,
}

impl GradientStop {
    pub fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// A color gradient: at least two stops, sorted ascending by position.
///
/// Positions need not be unique. Queries outside the first/last stop clamp
/// to that stop's color.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    stops: Vec<GradientStop>,
}

impl Palette {
    /// Validate and sort `stops` into a palette.
    pub fn new(mut stops: Vec<GradientStop>) -> crate::Result<Self> {
        if stops.len() < MIN_STOPS {
            return Err(RenderError::TooFewStops {
                min: MIN_STOPS,
                got: stops.len(),
            });
        }
        if let Some(bad) = stops
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.position))
        {
            return Err(RenderError::InvalidStopPosition(bad.position));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { stops })
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sample the gradient at `t`.
    ///
    /// Each channel is interpolated linearly inside the first bracketing
    /// pair of stops, then rounded to the nearest integer.
    pub fn sample(&self, t: f64) -> Rgb {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t >= lo.position && t <= hi.position {
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return lo.color;
                }
                return lerp_color(lo.color, hi.color, (t - lo.position) / span);
            }
        }
        last.color
    }

    /// Evenly spaced samples across `[0, 1]` for a gradient preview strip.
    pub fn preview_colors(&self, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..count)
                .map(|i| self.sample(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        crimson_night()
    }
}

fn lerp_color(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let channel = |x: u8, y: u8| {
        let v = x as f64 + (y as f64 - x as f64) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    [channel(a[0], b[0]), channel(a[1], b[1]), channel(a[2], b[2])]
}

// ---------------------------------------------------------------------------
// Custom palette editing
// ---------------------------------------------------------------------------

/// The user-editable gradient.
///
/// Every successful edit keeps the stops sorted and bumps the revision, so
/// holders of a lookup table know to rebuild it. Edits that would break the
/// stop-count limits are no-ops and report `false`/`None`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPalette {
    palette: Palette,
    revision: u64,
}

impl CustomPalette {
    /// Start editing from a copy of `template`.
    pub fn from_palette(template: &Palette) -> Self {
        Self {
            palette: template.clone(),
            revision: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.palette.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.stops.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.len() < MAX_CUSTOM_STOPS
    }

    pub fn can_remove(&self) -> bool {
        self.len() > MIN_STOPS
    }

    /// Replace all stops with a copy of `template`.
    pub fn load(&mut self, template: &Palette) {
        if self.palette != *template {
            self.palette = template.clone();
            self.revision += 1;
        }
    }

    /// Insert a red stop at 0.5. Returns the new stop's index.
    pub fn add_stop(&mut self) -> Option<usize> {
        if !self.can_add() {
            return None;
        }
        let idx = self.insert_sorted(GradientStop::new(NEW_STOP_POSITION, NEW_STOP_COLOR));
        self.revision += 1;
        Some(idx)
    }

    pub fn remove_stop(&mut self, index: usize) -> bool {
        if !self.can_remove() || index >= self.len() {
            return false;
        }
        self.palette.stops.remove(index);
        self.revision += 1;
        true
    }

    /// Move a stop to `position` (clamped into `[0, 1]`) and re-sort.
    ///
    /// Returns the stop's index after sorting.
    pub fn move_stop(&mut self, index: usize, position: f64) -> Option<usize> {
        if index >= self.len() || position.is_nan() {
            return None;
        }
        let mut stop = self.palette.stops.remove(index);
        stop.position = position.clamp(0.0, 1.0);
        let idx = self.insert_sorted(stop);
        self.revision += 1;
        Some(idx)
    }

    pub fn recolor_stop(&mut self, index: usize, color: Rgb) -> bool {
        match self.palette.stops.get_mut(index) {
            Some(stop) => {
                stop.color = color;
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Stops with equal positions keep insertion order: the new stop goes last.
    fn insert_sorted(&mut self, stop: GradientStop) -> usize {
        let idx = self
            .palette
            .stops
            .partition_point(|s| s.position <= stop.position);
        self.palette.stops.insert(idx, stop);
        idx
    }
}

// ---------------------------------------------------------------------------
// Hex color helpers
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (the leading `#` is optional, case-insensitive).
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Format as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

/// A named, immutable gradient template.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPalette {
    pub key: &'static str,
    pub name: &'static str,
    stops: &'static [(f64, Rgb)],
}

impl BuiltinPalette {
    pub fn palette(&self) -> Palette {
        Palette {
            stops: self
                .stops
                .iter()
                .map(|&(position, color)| GradientStop { position, color })
                .collect(),
        }
    }
}

pub static BUILTIN_PALETTES: [BuiltinPalette; 6] = [
    BuiltinPalette {
        key: "inferno",
        name: "Inferno",
        stops: &[
            (0.0, [0, 0, 0]),
            (0.25, [80, 18, 123]),
            (0.5, [187, 55, 84]),
            (0.75, [249, 142, 9]),
            (1.0, [252, 255, 164]),
        ],
    },
    BuiltinPalette {
        key: "crimson-night",
        name: "Crimson Night",
        stops: &[
            (0.0, [0, 0, 0]),
            (0.3, [100, 0, 0]),
            (0.6, [200, 20, 20]),
            (0.85, [255, 60, 40]),
            (1.0, [255, 200, 200]),
        ],
    },
    BuiltinPalette {
        key: "ice-fire",
        name: "Ice & Fire",
        stops: &[
            (0.0, [5, 5, 40]),
            (0.3, [15, 80, 120]),
            (0.5, [30, 180, 170]),
            (0.75, [240, 140, 20]),
            (1.0, [220, 30, 10]),
        ],
    },
    BuiltinPalette {
        key: "monochrome",
        name: "Monochrome",
        stops: &[
            (0.0, [0, 0, 0]),
            (0.5, [128, 128, 128]),
            (1.0, [255, 255, 255]),
        ],
    },
    BuiltinPalette {
        key: "neon-abyss",
        name: "Neon Abyss",
        stops: &[
            (0.0, [0, 0, 0]),
            (0.3, [60, 0, 120]),
            (0.6, [30, 60, 220]),
            (1.0, [0, 240, 255]),
        ],
    },
    BuiltinPalette {
        key: "gold-vein",
        name: "Gold Vein",
        stops: &[
            (0.0, [0, 0, 0]),
            (0.3, [60, 30, 5]),
            (0.65, [200, 160, 30]),
            (1.0, [255, 255, 230]),
        ],
    },
];

/// Look a builtin palette up by key.
pub fn builtin_palette(key: &str) -> Option<&'static BuiltinPalette> {
    BUILTIN_PALETTES.iter().find(|p| p.key == key)
}

fn crimson_night() -> Palette {
    BUILTIN_PALETTES[1].palette()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
