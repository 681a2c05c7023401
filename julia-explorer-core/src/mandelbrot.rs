use crate::complex::Complex;
use crate::escape::{evaluate, EscapeTime};
use crate::fractal::Fractal;

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The point `c` is the coordinate on the complex plane. Used as the
/// parameter-space map for picking Julia constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mandelbrot {
    max_iterations: u32,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, c: Complex) -> EscapeTime {
        // Points in these regions never escape; skip straight to the cap.
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return EscapeTime {
                iterations: self.max_iterations,
                final_z: Complex::ZERO,
                max_iterations: self.max_iterations,
            };
        }
        evaluate(c, Complex::ZERO, self.max_iterations)
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb() -> Mandelbrot {
        Mandelbrot::new(100)
    }

    #[test]
    fn origin_is_interior() {
        assert!(!mb().iterate(Complex::ZERO).escaped());
    }

    #[test]
    fn period2_bulb_is_interior() {
        assert!(!mb().iterate(Complex::new(-1.0, 0.0)).escaped());
    }

    #[test]
    fn outside_point_escapes() {
        assert!(mb().iterate(Complex::new(0.5, 0.0)).escaped());
        assert!(mb().iterate(Complex::new(-2.2, 1.2)).escaped());
    }

    #[test]
    fn shortcut_agrees_with_iteration() {
        // Sample points inside the cardioid and bulb; full iteration must agree.
        for c in [
            Complex::new(0.0, 0.0),
            Complex::new(-0.5, 0.3),
            Complex::new(0.2, 0.1),
            Complex::new(-1.05, 0.1),
        ] {
            assert!(in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im));
            let full = evaluate(c, Complex::ZERO, 100);
            assert!(!full.escaped(), "{c:?} escaped under full iteration");
        }
    }
}
