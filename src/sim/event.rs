use crate::sim::runner::Sample;

// ---------------------------------------------------------------------------
// Trial events
// ---------------------------------------------------------------------------

/// Kinds of trial events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Tilt reached the fall limit.
    Fall,
    /// Tilt crossed upright (sign change of angle).
    UprightCrossing,
    /// Velocity reached the safety clamp.
    VelocityLimit,
    Custom(String),
}

/// A discrete event that occurred during a trial.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub sample: Sample,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive samples and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind>;
}

/// Fires once, when tilt magnitude first reaches the fall limit.
pub struct FallDetector {
    pub fall_angle: f64,
    fired: bool,
}

impl FallDetector {
    pub fn new(fall_angle: f64) -> FallDetector {
        FallDetector { fall_angle, fired: false }
    }
}

impl EventDetector for FallDetector {
    fn check(&mut self, _prev: &Sample, current: &Sample) -> Option<EventKind> {
        if !self.fired && current.angle.abs() >= self.fall_angle {
            self.fired = true;
            Some(EventKind::Fall)
        } else {
            None
        }
    }
}

/// Fires each time the tilt angle changes sign.
pub struct UprightCrossingDetector;

impl EventDetector for UprightCrossingDetector {
    fn check(&mut self, prev: &Sample, current: &Sample) -> Option<EventKind> {
        if prev.angle != 0.0 && prev.angle.signum() != current.angle.signum() {
            Some(EventKind::UprightCrossing)
        } else {
            None
        }
    }
}

/// Fires once, when velocity first hits the safety clamp.
pub struct VelocityLimitDetector {
    pub limit: f64,
    fired: bool,
}

impl VelocityLimitDetector {
    pub fn new(limit: f64) -> VelocityLimitDetector {
        VelocityLimitDetector { limit, fired: false }
    }
}

impl EventDetector for VelocityLimitDetector {
    fn check(&mut self, _prev: &Sample, current: &Sample) -> Option<EventKind> {
        if !self.fired && current.velocity.abs() >= self.limit {
            self.fired = true;
            Some(EventKind::VelocityLimit)
        } else {
            None
        }
    }
}

/// Run a set of detectors over a recorded trajectory.
pub fn scan(trajectory: &[Sample], detectors: &mut [Box<dyn EventDetector>]) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for pair in trajectory.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(SimEvent {
                    time: pair[1].time,
                    kind,
                    sample: pair[1].clone(),
                });
            }
        }
    }
    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, angle: f64, velocity: f64) -> Sample {
        Sample { time, angle, velocity, acceleration: 0.0 }
    }

    #[test]
    fn fall_detector_fires_once() {
        let traj = vec![
            sample(0.0, -50.0, -10.0),
            sample(0.1, -61.0, -12.0),
            sample(0.2, -75.0, -14.0),
        ];
        let mut dets: Vec<Box<dyn EventDetector>> = vec![Box::new(FallDetector::new(60.0))];
        let events = scan(&traj, &mut dets);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Fall);
        assert_eq!(events[0].time, 0.1);
    }

    #[test]
    fn upright_crossing_on_sign_change() {
        let traj = vec![
            sample(0.0, -2.0, 5.0),
            sample(0.1, 1.0, 5.0),
            sample(0.2, 3.0, 5.0),
            sample(0.3, -0.5, -5.0),
        ];
        let mut dets: Vec<Box<dyn EventDetector>> = vec![Box::new(UprightCrossingDetector)];
        let events = scan(&traj, &mut dets);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time, 0.1);
        assert_eq!(events[1].time, 0.3);
    }

    #[test]
    fn velocity_limit_detector() {
        let traj = vec![
            sample(0.0, 0.0, -59.0),
            sample(0.1, -3.0, -60.0),
            sample(0.2, -6.0, -60.0),
        ];
        let mut dets: Vec<Box<dyn EventDetector>> =
            vec![Box::new(VelocityLimitDetector::new(60.0))];
        let events = scan(&traj, &mut dets);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::VelocityLimit);
    }
}
