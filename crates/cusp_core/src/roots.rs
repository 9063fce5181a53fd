//! Closed-form roots of the depressed cubic `x³ + p·x + q = 0`
//!
//! The cusp equilibrium condition `x³ − b·x − a = 0` is exactly this form
//! with `p = −b`, `q = −a`, so Cardano's formula covers it without a general
//! polynomial or eigenvalue solver.
//!
//! Case split on the discriminant `Δ = −(4p³ + 27q²)`:
//! - `Δ > 0`: three distinct real roots (trigonometric form)
//! - `Δ < 0`: one real root and a complex-conjugate pair
//! - `Δ = 0`: repeated real roots (the pair collapses onto the real axis)

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Absolute tolerance on the imaginary part for a root to count as real.
pub const REAL_ROOT_TOLERANCE: f64 = 1e-8;

/// A root in the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub re: f64,
    pub im: f64,
}

impl Root {
    pub fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_real(&self, tolerance: f64) -> bool {
        self.im.abs() <= tolerance
    }

    /// Modulus of `z³ + p·z + q` at this root. Zero for an exact root.
    pub fn residual(&self, p: f64, q: f64) -> f64 {
        let (re, im) = (self.re, self.im);
        // z² and z³ expanded by hand
        let sq_re = re * re - im * im;
        let sq_im = 2.0 * re * im;
        let cube_re = sq_re * re - sq_im * im;
        let cube_im = sq_re * im + sq_im * re;
        let f_re = cube_re + p * re + q;
        let f_im = cube_im + p * im;
        f_re.hypot(f_im)
    }
}

/// All three roots of a depressed cubic, with the discriminant that selected them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicRoots {
    pub roots: [Root; 3],
    pub discriminant: f64,
}

impl CubicRoots {
    /// Real parts of the roots classified as real, ascending.
    pub fn real_roots(&self, tolerance: f64) -> Vec<f64> {
        let mut real: Vec<f64> = self
            .roots
            .iter()
            .filter(|r| r.is_real(tolerance))
            .map(|r| r.re)
            .collect();
        real.sort_by(|a, b| a.total_cmp(b));
        real
    }

    pub fn real_count(&self, tolerance: f64) -> usize {
        self.roots.iter().filter(|r| r.is_real(tolerance)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.roots.iter()
    }
}

/// Solve `x³ + p·x + q = 0`.
pub fn solve_depressed_cubic(p: f64, q: f64) -> CubicRoots {
    let discriminant = -(4.0 * p * p * p + 27.0 * q * q);

    let roots = if p == 0.0 && q == 0.0 {
        [Root::real(0.0); 3]
    } else if discriminant > 0.0 {
        // Δ > 0 implies p < 0
        let m = 2.0 * (-p / 3.0).sqrt();
        let arg = (3.0 * q / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let theta = arg.acos() / 3.0;
        [0.0, 1.0, 2.0].map(|k| Root::real(m * (theta - 2.0 * PI * k / 3.0).cos()))
    } else {
        let half_q = q / 2.0;
        let s = (half_q * half_q + p * p * p / 27.0).max(0.0).sqrt();
        // Take the larger-magnitude branch; the other cube root follows from u·v = −p/3
        let t = if half_q > 0.0 { -half_q - s } else { -half_q + s };
        let u = t.cbrt();
        let v = if u == 0.0 { 0.0 } else { -p / (3.0 * u) };
        let re = -(u + v) / 2.0;
        let im = 3.0f64.sqrt() / 2.0 * (u - v);
        [
            Root::real(u + v),
            Root { re, im },
            Root { re, im: -im },
        ]
    };

    CubicRoots {
        roots,
        discriminant,
    }
}
