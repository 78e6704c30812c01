use crate::state::{Deriv, State};

// ---------------------------------------------------------------------------
// Classical 4th-order Runge-Kutta integrator
// ---------------------------------------------------------------------------
//
// The state is a single second-order degree of freedom, so the derivative
// pair is (velocity, acceleration) and only the acceleration needs a model.
// The model is an opaque closure sampled at four (state, time) points per
// step; it must be a pure function of its arguments for the step to be
// reproducible.

/// First stage: derivative sampled at the unperturbed state.
fn eval<F>(state: &State, t: f64, accel: &mut F) -> Deriv
where
    F: FnMut(&State, f64) -> f64,
{
    Deriv {
        dangle: state.velocity,
        dvelocity: accel(state, t),
    }
}

/// Later stages: extrapolate the base state by the previous stage's
/// derivative over `dt`, then sample the model at `t + dt`.
fn eval_offset<F>(state: &State, t: f64, dt: f64, d: &Deriv, accel: &mut F) -> Deriv
where
    F: FnMut(&State, f64) -> f64,
{
    let mid = state.apply(d, dt);
    Deriv {
        dangle: mid.velocity,
        dvelocity: accel(&mid, t + dt),
    }
}

/// Single RK4 step: advance `state` from `t` by `dt`, returning the new state.
///
/// `accel` is sampled exactly four times, at times `t`, `t + dt/2`,
/// `t + dt/2`, `t + dt`, in that order. Local truncation error is O(dt^5)
/// for smooth models.
///
/// No validation is performed on `dt` or on the model's output: a
/// non-finite acceleration produces a non-finite state. Callers that need
/// guardrails get them from the runner, not from this kernel.
pub fn rk4_step<F>(state: &State, t: f64, dt: f64, mut accel: F) -> State
where
    F: FnMut(&State, f64) -> f64,
{
    let a = eval(state, t, &mut accel);
    let b = eval_offset(state, t, dt * 0.5, &a, &mut accel);
    let c = eval_offset(state, t, dt * 0.5, &b, &mut accel);
    let d = eval_offset(state, t, dt, &c, &mut accel);

    let dadt = 1.0 / 6.0 * (a.dangle + 2.0 * (b.dangle + c.dangle) + d.dangle);
    let dvdt = 1.0 / 6.0 * (a.dvelocity + 2.0 * (b.dvelocity + c.dvelocity) + d.dvelocity);

    State {
        angle: state.angle + dadt * dt,
        velocity: state.velocity + dvdt * dt,
    }
}

/// RK4 step with a fallible acceleration model.
///
/// The model's error is propagated unchanged and aborts the remaining
/// stages; since the advanced state is only constructed after all four
/// stages succeed, a failed step leaves nothing partially updated.
pub fn try_rk4_step<F, E>(state: &State, t: f64, dt: f64, mut accel: F) -> Result<State, E>
where
    F: FnMut(&State, f64) -> Result<f64, E>,
{
    let a = Deriv {
        dangle: state.velocity,
        dvelocity: accel(state, t)?,
    };

    let mid = state.apply(&a, dt * 0.5);
    let b = Deriv {
        dangle: mid.velocity,
        dvelocity: accel(&mid, t + dt * 0.5)?,
    };

    let mid = state.apply(&b, dt * 0.5);
    let c = Deriv {
        dangle: mid.velocity,
        dvelocity: accel(&mid, t + dt * 0.5)?,
    };

    let mid = state.apply(&c, dt);
    let d = Deriv {
        dangle: mid.velocity,
        dvelocity: accel(&mid, t + dt)?,
    };

    let dadt = 1.0 / 6.0 * (a.dangle + 2.0 * (b.dangle + c.dangle) + d.dangle);
    let dvdt = 1.0 / 6.0 * (a.dvelocity + 2.0 * (b.dvelocity + c.dvelocity) + d.dvelocity);

    Ok(State {
        angle: state.angle + dadt * dt,
        velocity: state.velocity + dvdt * dt,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
