//! Cusp Catastrophe: the potential surface behind sudden emotional shifts
//!
//! V(x) = x⁴/4 − b·x²/2 − a·x
//! dV/dx = x³ − b·x − a
//!
//! - x: state (behaviour/mood)
//! - a: normal factor (net stress, asymmetry)
//! - b: splitting factor (duration, intensity, complexity)
//!
//! The state relaxes by overdamped gradient descent. It stays in whichever
//! well it occupies until that well vanishes as (a, b) move, then falls into
//! the remaining one. That lag is the hysteresis.

use crate::error::SimulationError;
use crate::roots::{solve_depressed_cubic, CubicRoots, REAL_ROOT_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Which stable equilibrium the state sits in when the fold is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Well {
    Lower,
    Upper,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuspModel {
    /// Position on the potential surface. Finite under bounded inputs and a
    /// small enough `dt`; explicit Euler can diverge otherwise.
    pub state: f64,
}

impl Default for CuspModel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CuspModel {
    pub fn new(initial_state: f64) -> Self {
        Self {
            state: initial_state,
        }
    }

    pub fn potential(&self, x: f64, a: f64, b: f64) -> f64 {
        0.25 * x.powi(4) - 0.5 * b * x * x - a * x
    }

    /// Gradient of the potential; its negative is the restoring force.
    pub fn gradient(&self, x: f64, a: f64, b: f64) -> f64 {
        x * x * x - b * x - a
    }

    /// One explicit Euler step of `dx/dt = −dV/dx`.
    ///
    /// First order and possibly stiff: the linearised rate around a well is
    /// about `2b`, so `dt·b` approaching 1 makes the state overshoot,
    /// oscillate and eventually diverge. Keep `dt·b ≪ 1`.
    pub fn update(&mut self, a: f64, b: f64, dt: f64) {
        let grad = self.gradient(self.state, a, b);
        self.state -= grad * dt;
    }

    /// Roots of `x³ − b·x − a = 0`, i.e. every critical point of the potential.
    pub fn equilibria(&self, a: f64, b: f64) -> CubicRoots {
        solve_depressed_cubic(-b, -a)
    }

    /// True when (a, b) lies in the fold: three real equilibria, two stable
    /// and one unstable, so bistability is possible.
    ///
    /// This says nothing about which well the current state occupies; see
    /// [`CuspModel::occupied_well`] for that.
    pub fn is_trapped(&self, a: f64, b: f64) -> bool {
        // For b ≤ 0 the gradient is monotone in x: a single minimum, even when
        // the roots coincide at the cusp point (a = b = 0).
        if b <= 0.0 {
            return false;
        }
        self.equilibria(a, b).real_count(REAL_ROOT_TOLERANCE) >= 3
    }

    /// When trapped, the well on the current state's side of the unstable
    /// middle equilibrium. `None` outside the fold.
    pub fn occupied_well(&self, a: f64, b: f64) -> Option<Well> {
        if !self.is_trapped(a, b) {
            return None;
        }
        let real = self.equilibria(a, b).real_roots(REAL_ROOT_TOLERANCE);
        let barrier = *real.get(1)?;
        if self.state < barrier {
            Some(Well::Lower)
        } else {
            Some(Well::Upper)
        }
    }

    /// The splitting factor an external controller should impose to collapse
    /// the fold and release a trapped state. Advisory: nothing is mutated.
    pub fn orthogonal_perturbation(&self) -> f64 {
        0.0
    }

    /// Diagnostic for the explicit-Euler divergence failure class.
    pub fn check_finite(&self, b: f64) -> Result<(), SimulationError> {
        if self.state.is_finite() {
            Ok(())
        } else {
            Err(SimulationError::Diverged {
                state: self.state,
                splitting: b,
            })
        }
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
