use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::state::State;

// ---------------------------------------------------------------------------
// Inverted-pendulum acceleration model
// ---------------------------------------------------------------------------

/// Restoring model of the balance task: the platform accelerates away from
/// upright in proportion to the sine of its tilt,
/// `accel = K * sin(angle)`, with the angle held in degrees.
///
/// Swap this struct out (or hand the integrator any other closure) to
/// change the dynamics model.
#[derive(Debug, Clone, Copy)]
pub struct Pendulum {
    pub accel_k: f64,     // deg/s^2 at 90 deg tilt
}

impl Pendulum {
    pub fn new(accel_k: f64) -> Pendulum {
        Pendulum { accel_k }
    }

    /// Acceleration at the given state. Time-invariant.
    pub fn acceleration(&self, state: &State, _t: f64) -> f64 {
        self.accel_k * (state.angle * PI / 180.0).sin()
    }

    /// Acceleration model with the operator's input folded in
    /// (acceleration control mode): the joystick opposes the tilt term.
    pub fn with_control(&self, input: ControlInput, gain: f64) -> impl Fn(&State, f64) -> f64 {
        let model = *self;
        let x = input.effective_x();
        move |s: &State, t: f64| model.acceleration(s, t) - x * gain
    }
}

// ---------------------------------------------------------------------------
// Operator control input
// ---------------------------------------------------------------------------

/// One joystick sample. A blanked sample (input suppressed during the
/// trial) reads as zero on both axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlInput {
    pub x: f64,
    pub y: f64,
    pub blanked: bool,
}

impl ControlInput {
    pub fn new(x: f64, y: f64) -> ControlInput {
        ControlInput { x, y, blanked: false }
    }

    pub fn effective_x(&self) -> f64 {
        if self.blanked { 0.0 } else { self.x }
    }

    pub fn effective_y(&self) -> f64 {
        if self.blanked { 0.0 } else { self.y }
    }
}

/// What the operator's input perturbs. Velocity and position input are
/// applied to the state before the integration step runs; acceleration
/// input becomes part of the model itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Acceleration,
    Velocity,
    Position,
}

/// Apply velocity- or position-mode input ahead of an integration step.
/// Acceleration mode is handled by [`Pendulum::with_control`] instead.
pub fn apply_control(state: &mut State, mode: ControlMode, input: ControlInput, gain: f64) {
    let delta = input.effective_x() * gain;
    match mode {
        ControlMode::Velocity => state.velocity -= delta,
        ControlMode::Position => state.angle -= delta,
        ControlMode::Acceleration => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
