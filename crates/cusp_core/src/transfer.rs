//! Nonlinear transfer stages: the two sines of the control loop
//!
//! - Reactive stage: immediate, energetic response to the raw stimulus
//! - Damping stage: observes the reactive output (not the stimulus) and
//!   produces the restoring regulation signal
//!
//! Both compute `y = sin(coefficient · x)`; they differ only in coefficient.

use serde::{Deserialize, Serialize};

/// Anything that maps a scalar signal to a scalar response.
pub trait TransferStage {
    fn process(&self, signal: f64) -> f64;
}

/// Which side of the loop a stage sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    /// Scales the raw stimulus response (fight/flight)
    Reactive,
    /// Scales self-regulation of the reactive output
    Damping,
}

/// A stateless `sin(k·x)` stage. The coefficient is fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonlinearTransferStage {
    role: StageRole,
    coefficient: f64,
}

impl NonlinearTransferStage {
    pub fn new(role: StageRole, coefficient: f64) -> Self {
        Self { role, coefficient }
    }

    /// Reactive stage with the given gain.
    pub fn reactive(gain: f64) -> Self {
        Self::new(StageRole::Reactive, gain)
    }

    /// Damping stage with the given damping factor.
    pub fn damping(factor: f64) -> Self {
        Self::new(StageRole::Damping, factor)
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn role(&self) -> StageRole {
        self.role
    }
}

impl TransferStage for NonlinearTransferStage {
    fn process(&self, signal: f64) -> f64 {
        (self.coefficient * signal).sin()
    }
}
