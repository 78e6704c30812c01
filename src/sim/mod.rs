pub mod event;
pub mod runner;

pub use event::{EventDetector, EventKind, SimEvent};
pub use runner::{simulate, simulate_with, Controller, HandsOff, Sample, SimError};
