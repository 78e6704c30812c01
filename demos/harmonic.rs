//! Convergence study against simple harmonic motion.
//!
//! angle'' = -omega^2 * angle has the closed form angle(t) = cos(omega t)
//! from (1, 0). Integrating one time unit with successively halved steps
//! should shrink the global error by ~16x per halving (4th order).
//!
//! Run with:
//!   cargo run --example harmonic

use balance_sim::{rk4_step, State};

fn main() {
    let omega = 2.0_f64;
    let t_final = 1.0;

    println!("RK4 convergence on angle'' = -{:.0} * angle", omega * omega);
    println!();
    println!("{:>8}  {:>12}  {:>8}", "steps", "error", "ratio");

    let mut prev_err: Option<f64> = None;
    for exp in 3..=10 {
        let n = 1_usize << exp;
        let dt = t_final / n as f64;

        let mut s = State::new(1.0, 0.0);
        let mut t = 0.0;
        for _ in 0..n {
            s = rk4_step(&s, t, dt, |s: &State, _t| -omega * omega * s.angle);
            t += dt;
        }

        let exact = (omega * t_final).cos();
        let err = (s.angle - exact).abs();
        match prev_err {
            Some(p) if err > 0.0 => println!("{n:>8}  {err:>12.3e}  {:>8.2}", p / err),
            _ => println!("{n:>8}  {err:>12.3e}  {:>8}", "-"),
        }
        prev_err = Some(err);
    }
}
