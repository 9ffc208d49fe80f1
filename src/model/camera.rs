use std::f64::consts::PI;
use std::fmt;

use nalgebra::{Point3, Unit, Vector3};

use crate::math::rotation::{cross, make_rotation_matrix, normalize, transform_vector, MathError};

/// A free-flying camera: a position plus an orthonormal pair of directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Point3<f64>,
    look: Unit<Vector3<f64>>,
    up: Unit<Vector3<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    OverheadFar,
    OverheadNear,
    AngledFar,
    AngledNear,
    EdgeOnFar,
    EdgeOnNear,
    FlankFar,
    FlankNear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanDirection {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 8] = [
        ViewPreset::OverheadFar,
        ViewPreset::OverheadNear,
        ViewPreset::AngledFar,
        ViewPreset::AngledNear,
        ViewPreset::EdgeOnFar,
        ViewPreset::EdgeOnNear,
        ViewPreset::FlankFar,
        ViewPreset::FlankNear,
    ];

    /// Presets are numbered from 1, the same as the keys that select them.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    // (eye, look, up); look and up get normalized on the way out
    fn vectors(&self) -> ([f64; 3], [f64; 3], [f64; 3]) {
        match self {
            ViewPreset::OverheadFar => ([0., 0., 120.], [0., 0., -1.], [0., 1., 0.]),
            ViewPreset::OverheadNear => ([0., 0., 24.], [0., 0., -1.], [0., 1., 0.]),
            ViewPreset::AngledFar => ([0., -64., 16.], [0., 64., -16.], [0., 16., 64.]),
            ViewPreset::AngledNear => ([0., -24., 3.], [0., 24., -3.], [0., 3., 24.]),
            ViewPreset::EdgeOnFar => ([0., -64., 0.], [0., 64., 0.], [0., 0., 64.]),
            ViewPreset::EdgeOnNear => ([0., -24., 0.], [0., 24., 0.], [0., 0., 24.]),
            ViewPreset::FlankFar => ([-64., 0., 16.], [64., 0., -16.], [16., 0., 64.]),
            ViewPreset::FlankNear => ([-24., 0., 3.], [24., 0., -3.], [3., 0., 24.]),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: Point3::new(0.0, 0.0, 100.0),
            look: Unit::new_unchecked(Vector3::new(0.0, 0.0, -1.0)),
            up: Vector3::y_axis(),
        }
    }
}

impl Camera {
    pub fn eye(&self) -> Point3<f64> {
        self.eye
    }

    pub fn look(&self) -> Unit<Vector3<f64>> {
        self.look
    }

    pub fn up(&self) -> Unit<Vector3<f64>> {
        self.up
    }

    /// The point the camera is aimed at, `distance` along the look direction.
    pub fn target(&self, distance: f64) -> Point3<f64> {
        self.eye + distance * self.look.into_inner()
    }

    /// Points to the right of the screen.
    pub fn right(&self) -> Vector3<f64> {
        cross(&self.look, &self.up)
    }

    pub fn preset(preset: ViewPreset) -> Self {
        let (eye, look, up) = preset.vectors();
        Camera {
            eye: Point3::from(eye),
            // None of the literals above are zero
            look: Unit::new_normalize(Vector3::from(look)),
            up: Unit::new_normalize(Vector3::from(up)),
        }
    }

    pub fn jump_to(&mut self, preset: ViewPreset) {
        *self = Camera::preset(preset);
    }

    pub fn pan(&mut self, direction: PanDirection, distance: f64) {
        let (sign, axis) = match direction {
            PanDirection::Forward => (1.0, self.look.into_inner()),
            PanDirection::Back => (-1.0, self.look.into_inner()),
            PanDirection::Right => (1.0, self.right()),
            PanDirection::Left => (-1.0, self.right()),
            PanDirection::Up => (1.0, self.up.into_inner()),
            PanDirection::Down => (-1.0, self.up.into_inner()),
        };
        self.eye += sign * distance * axis;
    }

    /// Moves along the look direction; negative distances move backwards.
    pub fn zoom(&mut self, distance: f64) {
        self.eye += distance * self.look.into_inner();
    }

    /// Turns the camera in response to the pointer moving `(dx, dy)` pixels.
    /// `radius` is how many pixels it takes to turn one radian.
    ///
    /// Yaw is applied first, and the pitch axis is taken from the yawed look
    /// direction. The view follows the pointer: dragging right turns towards
    /// the right, dragging down (positive `dy`) tips the view downwards.
    pub fn drag_rotate(&mut self, dx: f64, dy: f64, radius: f64) -> Result<(), MathError> {
        // Both rotations act through their transposes, i.e. clockwise about
        // their axes
        let angle_x = dx / radius / PI * 180.0;
        let yaw = make_rotation_matrix(angle_x, &self.up)?.transpose();
        let look = normalize(&transform_vector(&self.look, &yaw))?;

        let angle_y = dy / radius / PI * 180.0;
        let pitch = make_rotation_matrix(angle_y, &cross(&look, &self.up))?.transpose();
        let look = normalize(&transform_vector(&look, &pitch))?;
        let up = normalize(&transform_vector(&self.up, &pitch))?;

        // Only commit once everything has succeeded
        self.look = look;
        self.up = up;
        Ok(())
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "eye = ({:.3}, {:.3}, {:.3}), look = ({:.3}, {:.3}, {:.3}), up = ({:.3}, {:.3}, {:.3})",
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.look.x,
            self.look.y,
            self.look.z,
            self.up.x,
            self.up.y,
            self.up.z,
        )
    }
}
