use std::io::{self, Write};

use crate::sim::runner::Sample;

/// Write a recorded trajectory as CSV.
///
/// Columns: time, angle, velocity, acceleration
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Sample]) -> io::Result<()> {
    writeln!(writer, "time,angle,velocity,acceleration")?;

    for s in trajectory {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6}",
            s.time, s.angle, s.velocity, s.acceleration
        )?;
    }

    Ok(())
}

/// Write a trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[Sample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_header_and_rows() {
        let traj = vec![
            Sample { time: 0.0, angle: -5.0, velocity: 0.0, acceleration: -0.348623 },
            Sample { time: 0.05, angle: -5.000436, velocity: -0.017432, acceleration: -0.348633 },
        ];

        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "time,angle,velocity,acceleration");
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[1].starts_with("0.0000,-5.000000,"));
    }
}
