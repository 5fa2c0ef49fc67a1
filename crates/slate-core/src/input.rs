//! Raw input state shared between the shell and the interaction controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether any modifier is held.
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
    Enter,
}

/// Double-click detection window.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer position, pressed buttons, modifiers, and double-clicks.
///
/// The shell feeds this from raw platform events before calling into the
/// interaction controller.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the most recent press was a double-click.
    double_click: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
            last_click_time: None,
            last_click_position: None,
            double_click: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a button press.
    pub fn register_press(&mut self, position: Point, button: MouseButton) {
        self.pointer_position = position;
        self.pressed_buttons.insert(button);
        self.double_click = false;

        if button == MouseButton::Left {
            let now = Instant::now();
            if let (Some(last_time), Some(last_pos)) =
                (self.last_click_time, self.last_click_position)
            {
                let elapsed = now.duration_since(last_time).as_millis();
                let distance = ((position.x - last_pos.x).powi(2)
                    + (position.y - last_pos.y).powi(2))
                .sqrt();
                if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                    self.double_click = true;
                    // Reset so a triple-click is not another double-click.
                    self.last_click_time = None;
                    self.last_click_position = None;
                    return;
                }
            }
            self.last_click_time = Some(now);
            self.last_click_position = Some(position);
        }
    }

    /// Register a pointer movement.
    pub fn register_move(&mut self, position: Point) {
        self.pointer_position = position;
    }

    /// Register a button release.
    pub fn register_release(&mut self, position: Point, button: MouseButton) {
        self.pointer_position = position;
        self.pressed_buttons.remove(&button);
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether the most recent press completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click
    }
}
