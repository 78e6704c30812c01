// ---------------------------------------------------------------------------
// Balance system state: angle and angular velocity
// ---------------------------------------------------------------------------

/// Instantaneous condition of the one-axis balance system.
///
/// Units are degrees and degrees per second, matching the motion platform
/// the dynamics were written for. The integrator itself is unit-agnostic;
/// it only requires the acceleration model to use the same convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub angle: f64,       // deg, 0 = upright
    pub velocity: f64,    // deg/s
}

impl State {
    pub fn new(angle: f64, velocity: f64) -> State {
        State { angle, velocity }
    }

    /// Extrapolate by a derivative scaled by dt (used inside RK4 stages).
    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            angle: self.angle + d.dangle * dt,
            velocity: self.velocity + d.dvelocity * dt,
        }
    }
}

// ---------------------------------------------------------------------------
// State derivative (dangle/dt, dvelocity/dt)
// ---------------------------------------------------------------------------

/// Rate of change of a [`State`] at a point in time. Ephemeral: only ever
/// constructed and consumed inside a single integration step.
#[derive(Debug, Clone, Copy)]
pub struct Deriv {
    pub dangle: f64,      // deg/s   (= velocity of the sampled state)
    pub dvelocity: f64,   // deg/s^2 (= model acceleration)
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,          // integration timestep, s
    pub max_time: f64,    // hard stop, s
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,         // 20 Hz, the rate the balance task ran at
            max_time: 30.0,
        }
    }
}
