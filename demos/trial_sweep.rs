//! Sweep over the validation-harness trial matrix: K in {4, 8}, start
//! angle in {-5, +5} degrees, hands off the joystick.
//!
//! Run with:
//!   cargo run --example trial_sweep

use balance_sim::{simulate, SimConfig, Trial};

fn main() {
    let config = SimConfig::default();

    println!(
        "{:>6} {:>12} {:>12} {:>12} {:>10}",
        "K", "start (deg)", "fall t (s)", "end (deg)", "steps"
    );

    for accel_k in [4.0, 8.0] {
        for start_angle in [-5.0, 5.0] {
            let trial = Trial {
                accel_k,
                start_angle,
                ..Trial::default()
            };

            match simulate(&trial, &config) {
                Ok(traj) => {
                    let last = traj.last().expect("trajectory is never empty");
                    println!(
                        "{:>6.1} {:>12.1} {:>12.2} {:>12.2} {:>10}",
                        accel_k,
                        start_angle,
                        last.time,
                        last.angle,
                        traj.len() - 1
                    );
                }
                Err(e) => println!("{accel_k:>6.1} {start_angle:>12.1}  failed: {e}"),
            }
        }
    }
}
