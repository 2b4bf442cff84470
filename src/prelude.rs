//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Errors and loop control
pub use crate::core::error::ScreenError;
pub use crate::core::runtime::TickControl;

// Math and rendering
pub use crate::core::math::{Color, Rect, Vec2};
pub use crate::core::render::{DrawParams, FontId, NullRenderer, Renderer, TextureId};

// Input system
pub use crate::core::input::{
    Binding, GamepadButton, InputEvent, InputMap, InputSnapshot, KeyCode, MouseButton, Thumbstick, Trigger,
};

// Screen system
pub use crate::core::screen::{
    Screen, ScreenBase, ScreenContext, ScreenId, ScreenManager, ScreenState, TransitionNotice,
};

// Menus
pub use crate::core::menu::{MenuEntry, MenuPalette, MenuScreen, MouseCursor};
