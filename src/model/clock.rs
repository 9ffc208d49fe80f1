use std::time::{SystemTime, UNIX_EPOCH};

/// Scales every body's angular speed up, so that the slow outer planets
/// still visibly move.
pub const ROTATION_SCALE: f64 = 20.0;

pub const PHASE_STEP: f64 = 0.3;
pub const SPEED_STEP: f64 = 1.0;

/// The two knobs shared by every orbit and every spin. Changing either one
/// affects all bodies at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationKnobs {
    pub phase: f64,
    pub speed: f64,
}

impl Default for RotationKnobs {
    fn default() -> Self {
        RotationKnobs {
            phase: 0.1,
            speed: 0.8,
        }
    }
}

impl RotationKnobs {
    pub fn new(phase: f64, speed: f64) -> Self {
        RotationKnobs { phase, speed }
    }

    pub fn nudge_phase(&mut self, sign: f64) {
        self.phase += sign * PHASE_STEP;
    }

    pub fn nudge_speed(&mut self, sign: f64) {
        self.speed += sign * SPEED_STEP;
    }
}

/// Angle, in degrees, of something with the given period at wall-clock time `now`.
///
/// A period of zero means "doesn't rotate", and always gives zero.
pub fn current_angle(period: f64, knobs: &RotationKnobs, now: f64) -> f64 {
    if period == 0.0 {
        return 0.0;
    }
    // % on floats truncates, same as C's fmod
    ((now % period) * knobs.speed + knobs.phase) / period * 360.0 * ROTATION_SCALE
}

/// Seconds since the Unix epoch. Sampled once per frame, so that every body
/// in a frame sees the same instant.
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
