//=========================================================================
// Input Snapshot
//=========================================================================
//
// Per-frame device state with one frame of history.
//
// Architecture:
//   InputEvent → process_events() → live DeviceState
//   refresh() → previous ← current ← live   (once per frame)
//
// Every query is answered from `current` and `previous`, so all screens
// updated in the same frame observe the same input.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, InputEvent, KeyCode, MouseButton, Thumbstick, Trigger};
use crate::core::math::Vec2;

//=== DeviceState =========================================================

/// Complete state of keyboard, mouse and gamepad at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceState {
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    gamepad_buttons_down: HashSet<GamepadButton>,
    mouse_position: Vec2,
    left_trigger: f32,
    right_trigger: f32,
    left_stick: Vec2,
    right_stick: Vec2,
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Application ------------------------------------------------

    /// Folds a single event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                self.keys_down.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown(button) => {
                self.mouse_buttons_down.insert(button);
            }
            InputEvent::MouseButtonUp(button) => {
                self.mouse_buttons_down.remove(&button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = Vec2::new(x, y);
            }
            InputEvent::GamepadButtonDown(button) => {
                self.gamepad_buttons_down.insert(button);
            }
            InputEvent::GamepadButtonUp(button) => {
                self.gamepad_buttons_down.remove(&button);
            }
            InputEvent::TriggerMoved { trigger, value } => {
                let value = value.clamp(0.0, 1.0);
                match trigger {
                    Trigger::Left => self.left_trigger = value,
                    Trigger::Right => self.right_trigger = value,
                }
            }
            InputEvent::ThumbstickMoved { stick, x, y } => {
                let value = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
                match stick {
                    Thumbstick::Left => self.left_stick = value,
                    Thumbstick::Right => self.right_stick = value,
                }
            }
            InputEvent::Unidentified => {}
        }
    }

    //--- Builder Helpers --------------------------------------------------

    /// Returns the state with `key` held (convenient for synthetic frames).
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_down.insert(key);
        self
    }

    pub fn with_button(mut self, button: GamepadButton) -> Self {
        self.gamepad_buttons_down.insert(button);
        self
    }

    pub fn with_mouse_button(mut self, button: MouseButton) -> Self {
        self.mouse_buttons_down.insert(button);
        self
    }

    pub fn with_mouse_position(mut self, position: Vec2) -> Self {
        self.mouse_position = position;
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger, value: f32) -> Self {
        self.apply(&InputEvent::TriggerMoved { trigger, value });
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: GamepadButton) -> bool {
        self.gamepad_buttons_down.contains(&button)
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn trigger(&self, trigger: Trigger) -> f32 {
        match trigger {
            Trigger::Left => self.left_trigger,
            Trigger::Right => self.right_trigger,
        }
    }

    pub fn thumbstick(&self, stick: Thumbstick) -> Vec2 {
        match stick {
            Thumbstick::Left => self.left_stick,
            Thumbstick::Right => self.right_stick,
        }
    }
}

//=== InputSnapshot =======================================================

/// Current and previous device state, refreshed once per frame.
///
/// - *pressed*: down in the current frame.
/// - *new press*: down now, up in the previous frame.
/// - *held*: down in both frames.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    live: DeviceState,
    current: DeviceState,
    previous: DeviceState,
}

impl InputSnapshot {
    /// Creates a snapshot with every device idle.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Folds platform events into the live state.
    ///
    /// Queries are unaffected until the next [`refresh`](Self::refresh).
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.live.apply(event);
        }
    }

    /// Starts a new frame: `previous ← current ← live`.
    pub fn refresh(&mut self) {
        self.previous = std::mem::replace(&mut self.current, self.live.clone());
    }

    /// Starts a new frame from a complete synthetic device state.
    ///
    /// The state also becomes the live state, so a following `refresh`
    /// without new events reports the buttons as held.
    pub fn push_frame(&mut self, state: DeviceState) {
        self.live = state.clone();
        self.previous = std::mem::replace(&mut self.current, state);
    }

    pub fn current(&self) -> &DeviceState {
        &self.current
    }

    pub fn previous(&self) -> &DeviceState {
        &self.previous
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` while the key is down this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key)
    }

    /// Returns `true` only on the frame the key went down.
    ///
    /// Use for discrete actions like menu navigation.
    pub fn is_new_key_press(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key) && !self.previous.is_key_down(key)
    }

    /// Returns `true` when the key was down last frame and still is.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.current.is_key_down(key) && self.previous.is_key_down(key)
    }

    //=====================================================================
    // Query API - Gamepad
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for gamepad buttons.
    pub fn is_button_pressed(&self, button: GamepadButton) -> bool {
        self.current.is_button_down(button)
    }

    /// Like [`is_new_key_press`](Self::is_new_key_press) but for gamepad buttons.
    pub fn is_new_button_press(&self, button: GamepadButton) -> bool {
        self.current.is_button_down(button) && !self.previous.is_button_down(button)
    }

    /// Like [`is_key_held`](Self::is_key_held) but for gamepad buttons.
    pub fn is_button_held(&self, button: GamepadButton) -> bool {
        self.current.is_button_down(button) && self.previous.is_button_down(button)
    }

    pub fn trigger(&self, trigger: Trigger) -> f32 {
        self.current.trigger(trigger)
    }

    pub fn thumbstick(&self, stick: Thumbstick) -> Vec2 {
        self.current.thumbstick(stick)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.current.is_mouse_down(button)
    }

    /// Like [`is_new_key_press`](Self::is_new_key_press) but for mouse buttons.
    pub fn is_new_mouse_press(&self, button: MouseButton) -> bool {
        self.current.is_mouse_down(button) && !self.previous.is_mouse_down(button)
    }

    /// Like [`is_key_held`](Self::is_key_held) but for mouse buttons.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.current.is_mouse_down(button) && self.previous.is_mouse_down(button)
    }

    /// Returns mouse position in screen coordinates (pixels, top-left origin).
    pub fn mouse_position(&self) -> Vec2 {
        self.current.mouse_position()
    }

    /// Returns mouse movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.current.mouse_position() - self.previous.mouse_position()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
