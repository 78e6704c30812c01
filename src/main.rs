use std::env;
use std::error::Error;
use std::process;

use balance_sim::io::csv;
use balance_sim::sim::event::{
    EventDetector, FallDetector, UprightCrossingDetector, VelocityLimitDetector,
};
use balance_sim::sim::{event, simulate};
use balance_sim::{SimConfig, Trial};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // -----------------------------------------------------------------------
    // Trial: defaults reproduce the validation harness, or load from YAML
    // -----------------------------------------------------------------------
    // Usage: balance-sim [trial.yaml] [--csv out.csv]
    let args: Vec<String> = env::args().skip(1).collect();
    let mut trial_path = None;
    let mut csv_path = None;
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        if arg == "--csv" {
            csv_path = it.next().cloned();
        } else {
            trial_path = Some(arg.clone());
        }
    }

    let trial = match &trial_path {
        Some(path) => Trial::from_yaml_file(path)?,
        None => Trial::default(),
    };
    let config = SimConfig::default();

    // -----------------------------------------------------------------------
    // Run trial
    // -----------------------------------------------------------------------
    let trajectory = simulate(&trial, &config)?;

    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(FallDetector::new(trial.fall_angle)),
        Box::new(UprightCrossingDetector),
        Box::new(VelocityLimitDetector::new(trial.max_velocity)),
    ];
    let events = event::scan(&trajectory, &mut detectors);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  BALANCE TRIAL SIMULATION");
    println!("====================================================================");
    println!();
    println!("  Trial Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  K:             {:>8.2} deg/s^2   Control mode: {:?}",
        trial.accel_k, trial.control_mode
    );
    println!(
        "  Start angle:   {:>8.2} deg       Start vel:    {:>8.2} deg/s",
        trial.start_angle, trial.start_velocity
    );
    println!(
        "  Fall limit:    {:>8.1} deg       Max velocity: {:>8.1} deg/s",
        trial.fall_angle, trial.max_velocity
    );
    println!(
        "  Timestep:      {:>8.3} s         Max time:     {:>8.1} s",
        config.dt, config.max_time
    );
    println!();

    println!("  Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if events.is_empty() {
        println!("  (none)");
    }
    for e in &events {
        println!(
            "  {:<16} t={:>6.2}s   angle={:>7.2} deg   vel={:>7.2} deg/s",
            format!("{:?}", e.kind),
            e.time,
            e.sample.angle,
            e.sample.velocity
        );
    }
    println!();

    // -----------------------------------------------------------------------
    // Trajectory table (sampled)
    // -----------------------------------------------------------------------
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>10}  {:>11}  {:>12}",
        "t (s)", "angle(deg)", "vel(deg/s)", "acc(deg/s^2)"
    );
    println!("  {}", "─".repeat(48));

    let sample_interval = (trajectory.len() / 20).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>10.4}  {:>11.4}  {:>12.4}",
            s.time, s.angle, s.velocity, s.acceleration
        );
    }
    println!();

    let last = trajectory.last().expect("trajectory is never empty");
    let outcome = if last.angle.abs() >= trial.fall_angle {
        "FALL"
    } else {
        "SURVIVED"
    };
    println!(
        "  Outcome: {}  after {:.2} s ({} steps, dt={} s)",
        outcome,
        last.time,
        trajectory.len() - 1,
        config.dt
    );
    println!("====================================================================");
    println!();

    if let Some(path) = csv_path {
        csv::write_trajectory_file(&path, &trajectory)?;
        println!("  Trajectory written to {path}");
    }

    Ok(())
}
