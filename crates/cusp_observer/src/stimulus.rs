//! Stimulus profiles: the time series an observer is driven with
//!
//! A profile is a uniform time grid plus one stimulus value per tick.

use cusp_core::SimulationConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct StimulusProfile {
    /// Step size between ticks
    pub dt: f64,
    /// Time stamp of each tick
    pub times: Vec<f64>,
    /// Stimulus applied at each tick
    pub values: Vec<f64>,
}

impl StimulusProfile {
    /// Rectangular stress pulse: `pulse_amplitude` on ticks
    /// `[round(start/dt), round(end/dt))`, zero elsewhere.
    pub fn pulse(config: &SimulationConfig) -> Self {
        let steps = config.steps();
        let dt = config.dt;
        let start = tick_index(config.pulse_start, dt, steps);
        let end = tick_index(config.pulse_end, dt, steps);

        let mut values = vec![0.0; steps];
        if start < end {
            values[start..end].fill(config.pulse_amplitude);
        }

        Self {
            dt,
            times: linspace(0.0, config.t_max, steps),
            values,
        }
    }

    /// The same stimulus on every tick.
    pub fn constant(value: f64, steps: usize, dt: f64) -> Self {
        Self::from_values(vec![value; steps], dt)
    }

    /// Arbitrary values, timestamped at `i·dt`.
    pub fn from_values(values: Vec<f64>, dt: f64) -> Self {
        let times = (0..values.len()).map(|i| i as f64 * dt).collect();
        Self { dt, times, values }
    }

    /// Append another profile's ticks after this one.
    pub fn then(mut self, next: StimulusProfile) -> Self {
        let offset = self.times.last().map_or(0.0, |t| t + self.dt);
        self.times.extend(next.times.iter().map(|t| t + offset));
        self.values.extend(next.values);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn tick_index(t: f64, dt: f64, steps: usize) -> usize {
    ((t / dt).round().max(0.0) as usize).min(steps)
}

/// `n` evenly spaced points from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
