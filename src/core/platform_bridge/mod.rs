//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the screen manager thread.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::{PlatformError, PlatformEvent};
