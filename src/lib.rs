//=========================================================================
// Stagehand: Library Root
//
// Screen-stack engine for menu-driven games: screens with fade
// transitions, per-screen input maps and menu navigation.
//
// Responsibilities:
// - Expose the engine entry point (`Engine`, `EngineBuilder`)
// - Expose the platform-independent screen, input and menu systems
//   (`core`) for applications and custom backends
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
//
// EngineBuilder::new().build().run(|| {
//     let mut manager = ScreenManager::new(NullRenderer::new(800, 600));
//     let options = manager.register(MenuScreen::new().with_entry(MenuEntry::new("Back")));
//     manager
//         .push(
//             MenuScreen::new()
//                 .with_entry(MenuEntry::new("Options").with_sub_menu(options))
//                 .with_entry(MenuEntry::new("Quit")),
//         )
//         .expect("fresh screen");
//     manager
// });
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every engine system that does not talk to the OS. It can
// be driven directly (tests, other backends) without `Engine`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and input translation.
// `engine` wires the platform to the core thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
