use crate::complex::Complex;
use crate::escape::{evaluate, EscapeTime};
use crate::fractal::Fractal;

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Julia {
    c: Complex,
    max_iterations: u32,
}

impl Julia {
    pub fn new(c: Complex, max_iterations: u32) -> Self {
        Self { c, max_iterations }
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, point: Complex) -> EscapeTime {
        evaluate(self.c, point, self.max_iterations)
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RABBIT: Complex = Complex {
        re: -0.1226,
        im: 0.7449,
    };

    #[test]
    fn far_point_escapes() {
        let r = Julia::new(RABBIT, 200).iterate(Complex::new(10.0, 0.0));
        assert!(r.escaped());
        assert_eq!(r.iterations, 1);
    }

    #[test]
    fn rabbit_origin_is_interior() {
        // The critical orbit is attracted to a 3-cycle.
        let r = Julia::new(RABBIT, 500).iterate(Complex::ZERO);
        assert!(!r.escaped());
    }

    #[test]
    fn c_zero_origin_is_fixed_point() {
        let r = Julia::new(Complex::ZERO, 64).iterate(Complex::ZERO);
        assert_eq!(r.final_z, Complex::ZERO);
        assert_eq!(r.iterations, 64);
    }

    #[test]
    fn deterministic_results() {
        let j = Julia::new(RABBIT, 300);
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 0.3),
            Complex::new(0.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        let run2: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        assert_eq!(run1, run2);
    }
}
