//! # Cusp Core
//!
//! The numeric heart of the emotional-regulation model:
//!
//! - **Transfer stages**: `y = sin(k·x)`, one reactive and one damping instance
//! - **Cusp catastrophe**: `V(x; a, b) = x⁴/4 − b·x²/2 − a·x` with an explicit
//!   Euler gradient-descent update, which is where hysteresis comes from
//! - **Roots**: closed-form solver for the equilibrium cubic `x³ − b·x − a = 0`
//!
//! ## Control parameters
//!
//! - `a` (normal factor): net stress, shifts which well is favoured
//! - `b` (splitting factor): accumulated duration, opens the fold when positive

pub mod catastrophe;
pub mod config;
pub mod error;
pub mod roots;
pub mod transfer;

pub use catastrophe::{CuspModel, Well};
pub use config::{CuspConfig, ObserverConfig, SimulationConfig};
pub use error::SimulationError;
pub use roots::{solve_depressed_cubic, CubicRoots, Root, REAL_ROOT_TOLERANCE};
pub use transfer::{NonlinearTransferStage, StageRole, TransferStage};
