//! cusp_bench — trajectory simulation tests for the observer loop.
//!
//! Validates emergent behavior over long runs:
//! - Hysteresis after a stress pulse (state lags stimulus removal)
//! - Well tracking when the Euler step is comfortably stable
//! - Parameter differentiation (damping strength decides whether the fold opens)
//! - Orthogonal perturbation releasing a trapped state

use cusp_observer::{FeedbackObserver, StepSnapshot};

/// Drive `observer` with `stimulus` for `steps` ticks of `dt`.
pub fn simulate(
    observer: &mut FeedbackObserver,
    stimulus: f64,
    steps: usize,
    dt: f64,
) -> Vec<StepSnapshot> {
    (0..steps).map(|_| observer.step(stimulus, dt)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cusp_core::{ObserverConfig, SimulationConfig, REAL_ROOT_TOLERANCE};
    use cusp_observer::{run_profile, StimulusProfile, TrajectorySummary};

    /// 40 time units of stress, then 40 of calm: the state should not snap
    /// back to baseline when the stimulus stops.
    #[test]
    fn test_pulse_hysteresis() {
        let mut observer = FeedbackObserver::new();
        let mut history = simulate(&mut observer, 2.0, 400, 0.1);
        history.extend(simulate(&mut observer, 0.0, 400, 0.1));
        let x: Vec<f64> = history.iter().map(|s| s.state_x).collect();

        assert!(history.iter().all(StepSnapshot::is_finite));

        // The fold opens during the high-stimulus phase once b is large enough
        let first_trapped = history.iter().position(|s| s.is_trapped);
        assert!(
            matches!(first_trapped, Some(i) if i < 400),
            "fold should open under stress, got {:?}",
            first_trapped
        );

        // Right after removal the state is still far from 0
        let mean_abs: f64 = x[400..600].iter().map(|v| v.abs()).sum::<f64>() / 200.0;
        assert!(mean_abs > 1.0, "state collapsed too fast: mean |x| = {}", mean_abs);

        // Long after removal it is still held in a well while b drains
        for (i, v) in x.iter().enumerate().take(751).skip(650) {
            assert!(v.abs() > 1.0, "state left its well at step {}: {}", i, v);
        }

        // ...and it decays gradually rather than jumping
        assert!(x[799].abs() < x[650].abs());
        assert!(x[799].abs() > 0.1, "no lag left at the end: {}", x[799]);
        assert_eq!(history[799].splitting_b, 0.0);
    }

    /// The canonical configured run: pulse from t=20 to t=60.
    #[test]
    fn test_default_pulse_profile() {
        let profile = StimulusProfile::pulse(&SimulationConfig::default());
        let mut observer = FeedbackObserver::new();
        let summary = TrajectorySummary::from_snapshots(&run_profile(&mut observer, &profile));

        assert_eq!(summary.steps, 1000);
        assert!(summary.finite);
        assert_eq!(summary.first_trapped, Some(214));
        assert!((summary.peak_splitting - 20.0).abs() < 1e-9);
        assert!(summary.peak_abs_state > 1.0);
    }

    /// With a small step the state sits next to the upper stable root.
    #[test]
    fn test_stable_step_tracks_upper_well() {
        let mut observer = FeedbackObserver::new();
        let history = simulate(&mut observer, 2.0, 1000, 0.01);
        let last = history[999];

        assert!(last.is_trapped);
        let roots = observer
            .cusp()
            .equilibria(last.net_stress_a, last.splitting_b)
            .real_roots(REAL_ROOT_TOLERANCE);
        assert_eq!(roots.len(), 3);
        assert!(
            (last.state_x - roots[2]).abs() < 0.05,
            "x={} upper root={}",
            last.state_x,
            roots[2]
        );

        // Monotone approach: no overshoot at this step size
        for w in history.windows(2) {
            assert!(w[1].state_x >= w[0].state_x);
        }
    }

    /// Damping strength alone decides whether sustained stimulus opens the fold.
    #[test]
    fn test_damping_differentiation() {
        let resilient = ObserverConfig {
            damping_factor: 1.0,
            ..Default::default()
        };
        let sensitive = ObserverConfig {
            damping_factor: 0.5,
            ..Default::default()
        };

        let mut a = FeedbackObserver::with_config(&resilient);
        let mut b = FeedbackObserver::with_config(&sensitive);
        let calm = TrajectorySummary::from_snapshots(&simulate(&mut a, 2.0, 150, 0.1));
        let stuck = TrajectorySummary::from_snapshots(&simulate(&mut b, 2.0, 150, 0.1));

        // Regulation keeps |a| under the threshold: nothing accumulates
        assert_eq!(calm.peak_splitting, 0.0);
        assert_eq!(calm.trapped_steps, 0);

        assert!(stuck.trapped_steps > 100);
        assert!(stuck.peak_abs_state > calm.peak_abs_state);
    }

    /// Collapsing b frees the state immediately; plain decay leaves it
    /// trapped until the accumulator drains.
    #[test]
    fn test_orthogonal_perturbation_releases() {
        let mut control = FeedbackObserver::new();
        simulate(&mut control, 2.0, 40, 0.1);
        let mut treated = control.clone();

        let untreated = simulate(&mut control, 0.0, 40, 0.1);
        treated.apply_orthogonal_perturbation();
        let released = simulate(&mut treated, 0.0, 40, 0.1);

        assert!(untreated.iter().filter(|s| s.is_trapped).count() > 30);
        assert!(released.iter().all(|s| !s.is_trapped));
        // With a = b = 0 the state relaxes toward the single minimum at 0
        for w in released.windows(2) {
            assert!(w[1].state_x.abs() <= w[0].state_x.abs());
        }
    }
}
