//=========================================================================
// Input
//
// Device-independent input for screens.
//
// Responsibilities:
// - Portable event types produced by the platform layer (`event`)
// - Current/previous device state refreshed once per frame (`snapshot`)
// - Named, per-screen action bindings (`input_map`)
//
// Notes:
// The screen manager owns the single `InputSnapshot` and refreshes it at
// the start of every focused update; screens only read it.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod input_map;
mod snapshot;

//=== Public Exports ======================================================

pub use event::{GamepadButton, InputEvent, KeyCode, MouseButton, Thumbstick, Trigger};
pub use input_map::{Binding, InputMap, TRIGGER_THRESHOLD};
pub use snapshot::{DeviceState, InputSnapshot};
