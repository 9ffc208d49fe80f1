use std::time::Instant;

use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use tracing::trace;

use crate::model::input::{ButtonState, InputEvent, KnobNudge, ScrollDirection};
use crate::model::{PanDirection, ViewPreset};

// Key config, all in one place
const KEY_PRESETS: [Key; 8] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];
const KEY_FORWARD: Key = Key::W;
const KEY_BACK: Key = Key::S;
const KEY_LEFT: Key = Key::A;
const KEY_RIGHT: Key = Key::D;
const KEY_UP: Key = Key::Q;
const KEY_DOWN: Key = Key::E;
const KEYS_PHASE_UP: [Key; 2] = [Key::Equals, Key::Add];
const KEYS_PHASE_DOWN: [Key; 2] = [Key::Minus, Key::Subtract];
const KEY_SPEED_DOWN: Key = Key::LBracket;
const KEY_SPEED_UP: Key = Key::RBracket;
const KEY_PRINT_CAMERA: Key = Key::P;

const DRAG_BUTTON: MouseButton = MouseButton::Button1;

/// Turns window events into toolkit-independent input events.
pub struct Controller {
    dragging: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            dragging: false,
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Returns the input event for `event`, if it means anything to us.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        let input = match *event {
            WindowEvent::Key(key, Action::Press, _) => key_event(key),
            WindowEvent::MouseButton(DRAG_BUTTON, action, _) => {
                self.dragging = action == Action::Press;
                None
            }
            WindowEvent::CursorPos(x, y, _) => Some(InputEvent::PointerMoved {
                x,
                y,
                dragging: self.dragging,
            }),
            // A wheel has no "release", so every notch counts as a press
            WindowEvent::Scroll(_, dy, _) if dy > 0.0 => Some(InputEvent::Scroll {
                direction: ScrollDirection::Up,
                state: ButtonState::Pressed,
            }),
            WindowEvent::Scroll(_, dy, _) if dy < 0.0 => Some(InputEvent::Scroll {
                direction: ScrollDirection::Down,
                state: ButtonState::Pressed,
            }),
            _ => None,
        };

        if let Some(input) = input {
            trace!("{:?} -> {:?}", event, input);
        }
        input
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

fn key_event(key: Key) -> Option<InputEvent> {
    if let Some(idx) = KEY_PRESETS.iter().position(|k| *k == key) {
        return ViewPreset::from_number(idx as u8 + 1).map(InputEvent::SelectPreset);
    }

    let event = match key {
        KEY_FORWARD => InputEvent::Pan(PanDirection::Forward),
        KEY_BACK => InputEvent::Pan(PanDirection::Back),
        KEY_LEFT => InputEvent::Pan(PanDirection::Left),
        KEY_RIGHT => InputEvent::Pan(PanDirection::Right),
        KEY_UP => InputEvent::Pan(PanDirection::Up),
        KEY_DOWN => InputEvent::Pan(PanDirection::Down),
        KEY_SPEED_DOWN => InputEvent::Nudge(KnobNudge::SpeedDown),
        KEY_SPEED_UP => InputEvent::Nudge(KnobNudge::SpeedUp),
        KEY_PRINT_CAMERA => InputEvent::PrintCamera,
        k if KEYS_PHASE_UP.contains(&k) => InputEvent::Nudge(KnobNudge::PhaseUp),
        k if KEYS_PHASE_DOWN.contains(&k) => InputEvent::Nudge(KnobNudge::PhaseDown),
        _ => return None,
    };
    Some(event)
}
