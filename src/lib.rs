pub mod config;
pub mod dynamics;
pub mod integrator;
pub mod io;
pub mod sim;
pub mod state;

// Flat re-exports for the common surface
pub use crate::config::{ConfigError, Trial};
pub use crate::dynamics::{ControlInput, ControlMode, Pendulum};
pub use crate::integrator::{rk4_step, try_rk4_step};
pub use crate::sim::runner::{simulate, simulate_with, Controller, HandsOff, Sample, SimError};
pub use crate::state::{Deriv, SimConfig, State};
