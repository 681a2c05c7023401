use crate::complex::Complex;

/// `|z|²` above which an orbit is considered escaped (escape radius 2).
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// The outcome of iterating one seed point.
///
/// Holds the raw iteration data. Coloring consumes it through
/// [`normalized`](Self::normalized), so the hot loop stays free of
/// logarithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapeTime {
    /// Recurrence steps applied before the orbit left the escape radius,
    /// or `max_iterations` if it never did.
    pub iterations: u32,
    /// The orbit value when iteration stopped.
    pub final_z: Complex,
    /// The cap this result was computed with.
    pub max_iterations: u32,
}

impl EscapeTime {
    /// `true` when the orbit left the escape radius before the cap.
    #[inline]
    pub fn escaped(&self) -> bool {
        self.iterations < self.max_iterations
    }

    /// Continuous iteration count `n − ln(ln|z|) / ln 2`.
    ///
    /// `None` for interior points. `|z| > 2` at escape keeps `ln(ln|z|)` real.
    pub fn smoothed(&self) -> Option<f64> {
        if !self.escaped() {
            return None;
        }
        let log_modulus = self.final_z.norm().ln();
        Some(self.iterations as f64 - log_modulus.ln() / std::f64::consts::LN_2)
    }

    /// Smoothed count divided by the cap, clamped into `[0, 1]`.
    pub fn normalized(&self) -> Option<f64> {
        self.smoothed().map(|s| {
            let t = s / self.max_iterations as f64;
            if t.is_nan() {
                0.0
            } else {
                t.clamp(0.0, 1.0)
            }
        })
    }
}

/// Iterate `z ← z² + c` from `z0`.
///
/// Every step applies the recurrence once and counts it; iteration stops as
/// soon as `|z|² > 4` or the count reaches `max_iterations`. An orbit that
/// overflows to NaN is treated as escaped.
///
/// `z0` itself is never tested. With `|c| > 2` a seed outside radius 2 can
/// land back inside after the first step and keep iterating, where a
/// check-before-step loop would report it escaped at count 0.
#[inline]
pub fn evaluate(c: Complex, z0: Complex, max_iterations: u32) -> EscapeTime {
    let mut z = z0;
    let mut n = 0;
    while n < max_iterations {
        z = z.square_add(c);
        n += 1;
        // Negated comparison so NaN counts as escaped.
        if !(z.norm_sq() <= ESCAPE_RADIUS_SQ) {
            break;
        }
    }
    EscapeTime {
        iterations: n,
        final_z: z,
        max_iterations,
    }
}
