//! # Cusp Observer
//!
//! Couples the double-sine control loop to the cusp catastrophe:
//!
//! ```text
//! stimulus → reactive sin → damping sin → a = reaction − regulation
//!                                          b = leaky duration accumulator
//!                                          x ← Euler step on V(x; a, b)
//! ```
//!
//! The observer is plain owned state driven by one `step` per tick, in time
//! order, from a single caller. Each step returns a fresh [`StepSnapshot`].

mod observer;
mod snapshot;
pub mod stimulus;
pub mod trajectory;

pub use observer::{FeedbackObserver, DEFAULT_DT, STRESS_RATE, STRESS_THRESHOLD};
pub use snapshot::StepSnapshot;
pub use stimulus::StimulusProfile;
pub use trajectory::{run_profile, TrajectorySummary};
