use thiserror::Error;

use crate::config::Trial;
use crate::dynamics::{self, ControlInput, ControlMode, Pendulum};
use crate::integrator::rk4_step;
use crate::state::{SimConfig, State};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SimError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
    #[error("state became non-finite at t={time:.4} (angle={angle}, velocity={velocity})")]
    NonFinite { time: f64, angle: f64, velocity: f64 },
}

// ---------------------------------------------------------------------------
// Trajectory samples
// ---------------------------------------------------------------------------

/// One recorded point of a trial. `acceleration` is the effective dv/dt
/// over the step that produced this sample, which is what the original
/// task logged alongside position and velocity.
#[derive(Debug, Clone)]
pub struct Sample {
    pub time: f64,           // s
    pub angle: f64,          // deg
    pub velocity: f64,       // deg/s
    pub acceleration: f64,   // deg/s^2
}

// ---------------------------------------------------------------------------
// Operator controller
// ---------------------------------------------------------------------------

/// Source of joystick input, consulted once per step before integrating.
pub trait Controller {
    fn control(&mut self, state: &State, t: f64, dt: f64) -> ControlInput;
}

/// No operator input: the platform moves under its own dynamics.
pub struct HandsOff;

impl Controller for HandsOff {
    fn control(&mut self, _state: &State, _t: f64, _dt: f64) -> ControlInput {
        ControlInput::default()
    }
}

// ---------------------------------------------------------------------------
// Trial simulation
// ---------------------------------------------------------------------------

/// Run one balance trial with a custom controller.
///
/// Each step: sample the controller, apply velocity/position-mode input to
/// the state, advance one RK4 step (acceleration-mode input rides inside
/// the model), clamp velocity to the trial's safety limit, and record a
/// sample. The trial ends at `max_time` or as soon as the platform tilts
/// past `fall_angle`.
pub fn simulate_with(
    trial: &Trial,
    config: &SimConfig,
    controller: &mut dyn Controller,
) -> Result<Vec<Sample>, SimError> {
    if !config.dt.is_finite() || config.dt <= 0.0 {
        return Err(SimError::InvalidTimestep(config.dt));
    }

    let model = Pendulum::new(trial.accel_k);
    let mut state = State::new(trial.start_angle, trial.start_velocity);
    let mut t = 0.0;

    let capacity = (config.max_time / config.dt) as usize + 1;
    let mut trajectory = Vec::with_capacity(capacity.min(200_000));
    trajectory.push(Sample {
        time: 0.0,
        angle: state.angle,
        velocity: state.velocity,
        acceleration: model.acceleration(&state, 0.0),
    });

    while t < config.max_time {
        let input = controller.control(&state, t, config.dt);
        dynamics::apply_control(&mut state, trial.control_mode, input, trial.joystick_gain);

        let next = match trial.control_mode {
            ControlMode::Acceleration => rk4_step(
                &state,
                t,
                config.dt,
                model.with_control(input, trial.joystick_gain),
            ),
            _ => rk4_step(&state, t, config.dt, |s: &State, tt| {
                model.acceleration(s, tt)
            }),
        };

        let acceleration = (next.velocity - state.velocity) / config.dt;
        state = next;

        // Velocity safety limit, as enforced on the device
        state.velocity = state.velocity.clamp(-trial.max_velocity, trial.max_velocity);
        t += config.dt;

        if !state.angle.is_finite() || !state.velocity.is_finite() {
            return Err(SimError::NonFinite {
                time: t,
                angle: state.angle,
                velocity: state.velocity,
            });
        }

        trajectory.push(Sample {
            time: t,
            angle: state.angle,
            velocity: state.velocity,
            acceleration,
        });

        // Fall ends the trial
        if state.angle.abs() >= trial.fall_angle {
            break;
        }
    }

    Ok(trajectory)
}

/// Run a hands-off trial (convenience wrapper).
pub fn simulate(trial: &Trial, config: &SimConfig) -> Result<Vec<Sample>, SimError> {
    simulate_with(trial, config, &mut HandsOff)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbalanced_platform_falls() {
        let trial = Trial::default();
        let config = SimConfig { dt: 0.02, max_time: 30.0 };
        let traj = simulate(&trial, &config).unwrap();
        let last = traj.last().unwrap();
        assert!(last.angle.abs() >= trial.fall_angle, "should end in a fall");
        // Reference run reaches the 60 deg limit at ~12.1 s
        assert!(
            (11.0..13.5).contains(&last.time),
            "fall time {:.2} out of band",
            last.time
        );
    }

    #[test]
    fn upright_at_rest_stays_put() {
        let trial = Trial {
            start_angle: 0.0,
            ..Trial::default()
        };
        let traj = simulate(&trial, &SimConfig::default()).unwrap();
        for s in &traj {
            assert_eq!(s.angle, 0.0);
            assert_eq!(s.velocity, 0.0);
        }
    }

    #[test]
    fn velocity_clamp_is_respected() {
        let trial = Trial {
            max_velocity: 10.0,
            ..Trial::default()
        };
        let config = SimConfig { dt: 0.05, max_time: 40.0 };
        let traj = simulate(&trial, &config).unwrap();
        for s in &traj {
            assert!(
                s.velocity.abs() <= 10.0 + 1e-12,
                "velocity {} exceeds clamp at t={}",
                s.velocity,
                s.time
            );
        }
        // The clamp slows but does not prevent the fall
        assert!(traj.last().unwrap().angle.abs() >= trial.fall_angle);
    }

    #[test]
    fn degenerate_timestep_is_rejected() {
        let trial = Trial::default();
        let config = SimConfig { dt: 0.0, max_time: 1.0 };
        assert!(matches!(
            simulate(&trial, &config),
            Err(SimError::InvalidTimestep(_))
        ));
    }

    #[test]
    fn non_finite_state_is_reported() {
        let trial = Trial {
            accel_k: f64::NAN,
            ..Trial::default()
        };
        assert!(matches!(
            simulate(&trial, &SimConfig::default()),
            Err(SimError::NonFinite { .. })
        ));
    }

    #[test]
    fn proportional_controller_keeps_platform_up() {
        // Acceleration-mode input proportional to tilt and tilt rate.
        struct Damper;
        impl Controller for Damper {
            fn control(&mut self, state: &State, _t: f64, _dt: f64) -> ControlInput {
                ControlInput::new(0.2 * state.angle + 0.2 * state.velocity, 0.0)
            }
        }

        let trial = Trial {
            control_mode: ControlMode::Acceleration,
            joystick_gain: 1.0,
            ..Trial::default()
        };
        let traj = simulate_with(&trial, &SimConfig::default(), &mut Damper).unwrap();
        let last = traj.last().unwrap();
        assert!(last.angle.abs() < 1.0, "controller should recover upright");
        for s in &traj {
            assert!(s.angle.abs() < trial.fall_angle, "must never fall");
        }
    }

    #[test]
    fn first_sample_is_the_initial_condition() {
        let trial = Trial::default();
        let traj = simulate(&trial, &SimConfig::default()).unwrap();
        assert_eq!(traj[0].time, 0.0);
        assert_eq!(traj[0].angle, trial.start_angle);
        assert_eq!(traj[0].velocity, trial.start_velocity);
    }
}
