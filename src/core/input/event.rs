//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// Platform-specific input (Winit today, a gamepad backend tomorrow) is
// converted into these portable types before it reaches the core thread.
//
// Event Flow:
// ```text
// Platform Layer (Winit / gamepad backend)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputSnapshot (current + previous device state)
//         ↓
//    InputMap (named actions queried by screens)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified,
}

//=== Gamepad =============================================================

/// Digital gamepad buttons (Xbox-style layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftShoulder,
    RightShoulder,
    LeftStick,
    RightStick,
}

/// Analog triggers, reported in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Left,
    Right,
}

/// Analog thumbsticks, each axis reported in `-1.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumbstick {
    Left,
    Right,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Button events are edge-triggered (down/up); analog events carry the
/// latest absolute value and replace whatever was reported before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),

    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Cursor position in window pixels (top-left origin).
    MouseMoved { x: f32, y: f32 },

    GamepadButtonDown(GamepadButton),
    GamepadButtonUp(GamepadButton),

    TriggerMoved { trigger: Trigger, value: f32 },

    ThumbstickMoved { stick: Thumbstick, x: f32, y: f32 },

    /// Event the platform layer could not translate.
    Unidentified,
}

impl InputEvent {
    /// Returns `true` for events that only carry the latest analog value
    /// (safe to coalesce within one frame).
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::MouseMoved { .. } | Self::TriggerMoved { .. } | Self::ThumbstickMoved { .. }
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
