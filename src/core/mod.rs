//=========================================================================
// Core
//
// Platform-independent engine logic.
//
// Responsibilities:
// - Screen stack, transitions and lifecycle (`screen`)
// - Device input snapshots and per-screen action maps (`input`)
// - Menu screens and entries (`menu`)
// - Gameplay sprites and the debug overlay (`gameplay`, `debug`)
// - The fixed-rate loop driving the screen manager (`runtime`)
//
// Notes:
// Nothing in here talks to the OS. Drawing goes through the `Renderer`
// trait and input arrives as `InputEvent`s, so everything can be driven
// from tests with synthetic frames.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod debug;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod math;
pub mod menu;
pub(crate) mod platform_bridge;
pub mod render;
pub mod runtime;
pub mod screen;

#[cfg(test)]
pub(crate) mod testing;

//=== Public Exports ======================================================

pub use error::ScreenError;
pub use runtime::TickControl;
