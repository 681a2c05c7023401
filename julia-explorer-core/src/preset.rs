//! Built-in catalog of named Julia parameters.

use crate::complex::Complex;

/// Parameter shown when the explorer starts.
pub const DEFAULT_PARAMETER: Complex = Complex {
    re: -0.7,
    im: 0.27,
};

/// Iteration cap used when nothing else is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// A named Julia constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub parameter: Complex,
}

const fn preset(name: &'static str, re: f64, im: f64) -> Preset {
    Preset {
        name,
        parameter: Complex { re, im },
    }
}

pub static PRESETS: [Preset; 10] = [
    preset("Douady's Rabbit", -0.1226, 0.7449),
    preset("Dendrite", 0.0, 1.0),
    preset("San Marco", -0.75, 0.0),
    preset("Siegel Disk", -0.3905, -0.5871),
    preset("Seahorse", -0.745, 0.1),
    preset("Lightning", -0.4, 0.6),
    preset("Spiral Galaxy", 0.285, 0.01),
    preset("Star", -0.8, 0.156),
    preset("Whirlpool", 0.45, 0.1428),
    preset("Cauliflower", 0.25, 0.0),
];

/// Look a preset up by exact name.
pub fn find_preset(name: &str) -> Option<(usize, &'static Preset)> {
    PRESETS.iter().enumerate().find(|(_, p)| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_and_values() {
        let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "Douady's Rabbit",
                "Dendrite",
                "San Marco",
                "Siegel Disk",
                "Seahorse",
                "Lightning",
                "Spiral Galaxy",
                "Star",
                "Whirlpool",
                "Cauliflower",
            ]
        );
        assert_eq!(PRESETS[3].parameter, Complex::new(-0.3905, -0.5871));
        assert_eq!(PRESETS[8].parameter, Complex::new(0.45, 0.1428));
    }

    #[test]
    fn find_by_name() {
        let (idx, p) = find_preset("Star").unwrap();
        assert_eq!(idx, 7);
        assert_eq!(p.parameter, Complex::new(-0.8, 0.156));
        assert!(find_preset("star").is_none());
    }
}
