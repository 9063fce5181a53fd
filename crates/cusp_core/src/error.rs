//! Failure modes of the simulation
//!
//! The model's core operations are total over finite reals. These errors are
//! only raised by the opt-in checked paths (`try_step`, `check_finite`,
//! config validation).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Time step must be finite and strictly positive
    #[error("invalid time step dt={dt}")]
    InvalidTimeStep { dt: f64 },

    #[error("non-finite input {name}={value}")]
    NonFiniteInput { name: &'static str, value: f64 },

    /// Explicit Euler blew up; `dt` is too large for the current stiffness
    #[error("state diverged (x={state}, b={splitting}); reduce dt so that dt·b ≪ 1")]
    Diverged { state: f64, splitting: f64 },
}

impl SimulationError {
    /// Reject a time step that is NaN, infinite, zero or negative.
    pub fn check_dt(dt: f64) -> Result<(), Self> {
        if dt.is_finite() && dt > 0.0 {
            Ok(())
        } else {
            Err(Self::InvalidTimeStep { dt })
        }
    }

    pub fn check_input(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFiniteInput { name, value })
        }
    }
}
