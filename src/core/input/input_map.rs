//=========================================================================
// Input Map
//=========================================================================
//
// Maps action names to the physical inputs that trigger them.
//
// Architecture:
//   "action" → [Binding, Binding, ...] → OR over the frame's InputSnapshot
//
// Every screen owns one map, so the same name ("select", "cancel") can be
// bound differently per screen.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::{GamepadButton, KeyCode, MouseButton, Trigger};
use super::snapshot::InputSnapshot;
use crate::core::error::ScreenError;
use crate::core::math::Vec2;

/// Axis value a trigger must exceed to count as pressed.
pub const TRIGGER_THRESHOLD: f32 = 0.2;

//=== Binding =============================================================

/// A single physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Key(KeyCode),
    Button(GamepadButton),
    Trigger(Trigger),
    Mouse(MouseButton),
}

impl Binding {
    fn is_pressed(&self, input: &InputSnapshot) -> bool {
        match *self {
            Binding::Key(key) => input.is_key_pressed(key),
            Binding::Button(button) => input.is_button_pressed(button),
            Binding::Mouse(button) => input.is_mouse_pressed(button),
            Binding::Trigger(trigger) => input.trigger(trigger) > TRIGGER_THRESHOLD,
        }
    }

    // Triggers carry no edge detection: above the threshold they report
    // a new press every frame.
    fn is_new_press(&self, input: &InputSnapshot) -> bool {
        match *self {
            Binding::Key(key) => input.is_new_key_press(key),
            Binding::Button(button) => input.is_new_button_press(button),
            Binding::Mouse(button) => input.is_new_mouse_press(button),
            Binding::Trigger(trigger) => input.trigger(trigger) > TRIGGER_THRESHOLD,
        }
    }

    fn is_held(&self, input: &InputSnapshot) -> bool {
        match *self {
            Binding::Key(key) => input.is_key_held(key),
            Binding::Button(button) => input.is_button_held(button),
            Binding::Mouse(button) => input.is_mouse_held(button),
            Binding::Trigger(trigger) => input.trigger(trigger) > TRIGGER_THRESHOLD,
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<KeyCode> for Binding {
    fn from(key: KeyCode) -> Self {
        Binding::Key(key)
    }
}

impl From<GamepadButton> for Binding {
    fn from(button: GamepadButton) -> Self {
        Binding::Button(button)
    }
}

impl From<Trigger> for Binding {
    fn from(trigger: Trigger) -> Self {
        Binding::Trigger(trigger)
    }
}

impl From<MouseButton> for Binding {
    fn from(button: MouseButton) -> Self {
        Binding::Mouse(button)
    }
}

//=== InputMap ============================================================

/// Named actions, each bound to one or more inputs.
///
/// Binding the same name again appends; an action fires when any of its
/// bindings does. Querying a name that was never bound is an error.
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    bindings: HashMap<String, Vec<Binding>>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Binding API ------------------------------------------------------

    /// Adds `binding` to `action`, creating the action on first use.
    pub fn new_action(&mut self, action: impl Into<String>, binding: impl Into<Binding>) {
        self.bindings.entry(action.into()).or_default().push(binding.into());
    }

    /// Returns the bindings registered for `action`, in registration order.
    pub fn keybinds(&self, action: &str) -> Result<&[Binding], ScreenError> {
        self.bindings
            .get(action)
            .map(Vec::as_slice)
            .ok_or_else(|| ScreenError::UnknownAction(action.to_owned()))
    }

    /// Returns `true` if `action` has at least one binding.
    pub fn contains(&self, action: &str) -> bool {
        self.bindings.contains_key(action)
    }

    /// Removes every binding of `action`, returning them.
    pub fn remove_action(&mut self, action: &str) -> Option<Vec<Binding>> {
        self.bindings.remove(action)
    }

    /// Iterates over registered action names (arbitrary order).
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    //--- Query API --------------------------------------------------------

    /// `true` if any binding of `action` is down this frame.
    pub fn action_pressed(&self, action: &str, input: &InputSnapshot) -> Result<bool, ScreenError> {
        Ok(self.keybinds(action)?.iter().any(|b| b.is_pressed(input)))
    }

    /// `true` if any binding of `action` went down this frame.
    pub fn new_action_press(&self, action: &str, input: &InputSnapshot) -> Result<bool, ScreenError> {
        Ok(self.keybinds(action)?.iter().any(|b| b.is_new_press(input)))
    }

    /// `true` if any binding of `action` was down last frame and still is.
    pub fn held_action(&self, action: &str, input: &InputSnapshot) -> Result<bool, ScreenError> {
        Ok(self.keybinds(action)?.iter().any(|b| b.is_held(input)))
    }

    /// Current cursor position.
    pub fn mouse_position(&self, input: &InputSnapshot) -> Vec2 {
        input.mouse_position()
    }

    /// Current analog value of `trigger` in `0.0..=1.0`.
    pub fn trigger_value(&self, trigger: Trigger, input: &InputSnapshot) -> f32 {
        input.trigger(trigger)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
