use nalgebra::Point2;
use tracing::{debug, info, warn};

use super::camera::{PanDirection, ViewPreset};
use super::SimulationState;

pub const LOOK_DISTANCE: f64 = 100.0;
pub const MOVE_FACTOR: f64 = 1.0;
pub const ZOOM_FACTOR: f64 = 2.0;

/// How far the camera moves and turns per input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub look_distance: f64,
    pub move_factor: f64,
    pub zoom_factor: f64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            look_distance: LOOK_DISTANCE,
            move_factor: MOVE_FACTOR,
            zoom_factor: ZOOM_FACTOR,
        }
    }
}

impl NavigationSettings {
    /// Pixels of pointer travel per radian of camera rotation.
    pub fn drag_radius(&self) -> f64 {
        16.0 * self.look_distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnobNudge {
    PhaseUp,
    PhaseDown,
    SpeedUp,
    SpeedDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Input, already stripped of whatever window system it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SelectPreset(ViewPreset),
    Pan(PanDirection),
    Nudge(KnobNudge),
    /// Pointer position in window pixels. Only drags turn the camera; other
    /// moves just keep track of where the pointer is.
    PointerMoved { x: f64, y: f64, dragging: bool },
    Scroll {
        direction: ScrollDirection,
        state: ButtonState,
    },
    PrintCamera,
}

/// Applies input events to the simulation state.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    settings: NavigationSettings,
    last_pointer: Option<Point2<f64>>,
}

impl InputRouter {
    pub fn new(settings: NavigationSettings) -> Self {
        InputRouter {
            settings,
            last_pointer: None,
        }
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    pub fn route(&mut self, event: InputEvent, state: &mut SimulationState) {
        match event {
            InputEvent::SelectPreset(preset) => {
                state.camera.jump_to(preset);
                debug!("Jumped to {:?}: {}", preset, state.camera);
            }
            InputEvent::Pan(direction) => {
                state.camera.pan(direction, self.settings.move_factor);
            }
            InputEvent::Nudge(nudge) => {
                let knobs = &mut state.knobs;
                match nudge {
                    KnobNudge::PhaseUp => knobs.nudge_phase(1.0),
                    KnobNudge::PhaseDown => knobs.nudge_phase(-1.0),
                    KnobNudge::SpeedUp => knobs.nudge_speed(1.0),
                    KnobNudge::SpeedDown => knobs.nudge_speed(-1.0),
                }
                info!("Rotation phase is {:.1}, speed is {:.1}", knobs.phase, knobs.speed);
            }
            InputEvent::PointerMoved { x, y, dragging } => {
                let current = Point2::new(x, y);
                // The very first position we see has nothing to compare against
                if let (true, Some(last)) = (dragging, self.last_pointer) {
                    let delta = current - last;
                    let radius = self.settings.drag_radius();
                    if let Err(err) = state.camera.drag_rotate(delta.x, delta.y, radius) {
                        warn!("Ignoring camera drag: {}", err);
                    }
                }
                self.last_pointer = Some(current);
            }
            InputEvent::Scroll { direction, state: button } => {
                if button == ButtonState::Released {
                    return;
                }
                let sign = match direction {
                    ScrollDirection::Up => 1.0,
                    ScrollDirection::Down => -1.0,
                };
                state.camera.zoom(sign * self.settings.zoom_factor);
            }
            InputEvent::PrintCamera => {
                info!("Camera: {}", state.camera);
            }
        }
    }
}
