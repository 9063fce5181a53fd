//! The Recursive Observer
//!
//! Integrates the double-sine control loop with the cusp catastrophe:
//! - Reactive stage generates energy from the stimulus
//! - Damping stage observes that reaction (not the stimulus) and regulates it
//! - The cusp maps net stress (a) and accumulated duration (b) to the state (x)

use crate::snapshot::StepSnapshot;
use cusp_core::{
    CuspModel, NonlinearTransferStage, ObserverConfig, SimulationError, TransferStage,
};
use tracing::{debug, info, trace, warn};

/// |a| above which duration stress accumulates instead of decaying.
pub const STRESS_THRESHOLD: f64 = 0.2;

/// Rate (per unit time) at which duration stress grows or decays.
pub const STRESS_RATE: f64 = 0.5;

/// Time step used by [`FeedbackObserver::tick`].
pub const DEFAULT_DT: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct FeedbackObserver {
    reactive: NonlinearTransferStage,
    damping: NonlinearTransferStage,
    cusp: CuspModel,

    /// Leaky accumulator feeding the splitting factor. Never negative.
    duration_stress: f64,

    /// Fold classification of the previous step, for transition logging
    was_trapped: bool,

    /// Set once dt·b crosses the Euler stiffness heuristic; cleared by reset
    stiffness_warned: bool,
}

impl Default for FeedbackObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackObserver {
    /// Observer with reactive gain 1.0 and damping factor 0.8.
    pub fn new() -> Self {
        Self::with_config(&ObserverConfig::default())
    }

    pub fn with_config(config: &ObserverConfig) -> Self {
        Self {
            reactive: NonlinearTransferStage::reactive(config.reactive_gain),
            damping: NonlinearTransferStage::damping(config.damping_factor),
            cusp: CuspModel::new(config.initial_state),
            duration_stress: 0.0,
            was_trapped: false,
            stiffness_warned: false,
        }
    }

    /// Advance the loop by one tick.
    ///
    /// Total for finite input. Explicit Euler can still diverge for large
    /// `dt` or long sustained stress; choose `dt` so that `dt·b ≪ 1`, or use
    /// [`FeedbackObserver::try_step`] to be told when it happens.
    pub fn step(&mut self, stimulus: f64, dt: f64) -> StepSnapshot {
        let reaction = self.reactive.process(stimulus);
        // The damping stage watches the reaction, not the raw stimulus
        let regulation = self.damping.process(reaction);

        let a = reaction - regulation;

        if a.abs() > STRESS_THRESHOLD {
            self.duration_stress += dt * STRESS_RATE;
        } else {
            self.duration_stress = (self.duration_stress - dt * STRESS_RATE).max(0.0);
        }
        let b = self.duration_stress;

        self.cusp.update(a, b, dt);
        let is_trapped = self.cusp.is_trapped(a, b);

        trace!(a, b, x = self.cusp.state, is_trapped, "observer step");
        if is_trapped != self.was_trapped {
            if is_trapped {
                debug!(a, b, x = self.cusp.state, "entered fold region");
            } else {
                debug!(a, b, x = self.cusp.state, "left fold region");
            }
            self.was_trapped = is_trapped;
        }
        if !self.stiffness_warned && dt * b >= 1.0 {
            warn!(dt, b, "dt·b reached 1; Euler update may oscillate or diverge");
            self.stiffness_warned = true;
        }

        StepSnapshot {
            stimulus,
            reaction,
            regulation,
            net_stress_a: a,
            splitting_b: b,
            state_x: self.cusp.state,
            is_trapped,
        }
    }

    /// [`FeedbackObserver::step`] at [`DEFAULT_DT`].
    pub fn tick(&mut self, stimulus: f64) -> StepSnapshot {
        self.step(stimulus, DEFAULT_DT)
    }

    /// Validated step: rejects non-finite input and bad `dt` up front, and
    /// reports divergence afterwards instead of handing back a NaN snapshot.
    pub fn try_step(&mut self, stimulus: f64, dt: f64) -> Result<StepSnapshot, SimulationError> {
        SimulationError::check_input("stimulus", stimulus)?;
        SimulationError::check_dt(dt)?;
        let snapshot = self.step(stimulus, dt);
        self.check_finite()?;
        Ok(snapshot)
    }

    /// Whether the cusp state is still finite.
    pub fn check_finite(&self) -> Result<(), SimulationError> {
        self.cusp.check_finite(self.duration_stress)
    }

    /// Orthogonal perturbation: clear accumulated stress and the state.
    pub fn reset(&mut self) {
        self.duration_stress = 0.0;
        self.cusp.reset();
        self.was_trapped = false;
        self.stiffness_warned = false;
        info!("observer reset");
    }

    /// Impose the cusp's advisory splitting target on the accumulator,
    /// collapsing the fold without moving the state. Returns the target.
    pub fn apply_orthogonal_perturbation(&mut self) -> f64 {
        let target = self.cusp.orthogonal_perturbation().max(0.0);
        info!(
            from = self.duration_stress,
            to = target,
            x = self.cusp.state,
            "orthogonal perturbation applied"
        );
        self.duration_stress = target;
        target
    }

    pub fn duration_stress(&self) -> f64 {
        self.duration_stress
    }

    pub fn state(&self) -> f64 {
        self.cusp.state
    }

    pub fn cusp(&self) -> &CuspModel {
        &self.cusp
    }

    pub fn reactive_stage(&self) -> &NonlinearTransferStage {
        &self.reactive
    }

    pub fn damping_stage(&self) -> &NonlinearTransferStage {
        &self.damping
    }
}
