//=========================================================================
// Screen System
//
// Stack-based screens (menus, gameplay, overlays) with fade transitions.
//
// Architecture:
// ```text
//   ScreenManager ── owns ──> Box<dyn Screen> (registry, by ScreenId)
//        │                         │
//        │ stack: Vec<ScreenId>    └─ embeds ScreenBase
//        │                               ├─ Transition (state machine)
//        │                               ├─ InputMap
//        │                               └─ fade overlay
//        └─ applies StackCommands queued through ScreenContext
// ```
//
// Screens are registered once and referenced by id; the stack decides
// which of them are updated and drawn. Screens keep their state between
// activations, so a sub-menu can be reopened.
//
//=========================================================================

//=== Submodules ==========================================================

mod base;
mod context;
mod manager;
mod transition;

//=== External Dependencies ===============================================

use std::any::Any;
use std::time::Duration;

//=== Public Exports ======================================================

pub use base::ScreenBase;
pub use context::{CommandQueue, ScreenContext, StackCommand};
pub use manager::ScreenManager;
pub use transition::{ScreenState, Transition, TransitionEvent, TransitionNotice, TransitionStep};

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;
use crate::core::menu::MouseCursor;
use crate::core::render::Renderer;

//=== ScreenId ============================================================

/// Identifier handed out by [`ScreenManager::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(u64);

impl ScreenId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== AsAny ===============================================================

/// Down-casting support for boxed screens.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Screen Trait ========================================================

/// A layer of the screen stack.
///
/// Implementors embed a [`ScreenBase`] and fill in the hooks they need.
/// The manager drives the transition state machine; hooks only see the
/// screen's own state plus a [`ScreenContext`].
///
/// # Hook order
///
/// ```text
/// add (manager started) → initialize_screen (once) → load_content (once)
/// every tick            → update_screen | on_transition → handle_input
/// every frame           → draw_screen (inside the screen's own batch)
/// removal               → unload_content (once) → on_transition(Removed)
/// ```
pub trait Screen: AsAny {
    fn base(&self) -> &ScreenBase;

    fn base_mut(&mut self) -> &mut ScreenBase;

    /// Whether `handle_input` is called while the screen is active.
    fn accepts_input(&self) -> bool;

    /// One-time setup, run the first time the screen joins a started stack.
    fn initialize_screen(&mut self, _ctx: &mut ScreenContext<'_>) {}

    fn load_content(&mut self, _ctx: &mut ScreenContext<'_>) {}

    fn unload_content(&mut self, _ctx: &mut ScreenContext<'_>) {}

    /// Per-tick logic while Active or Hidden.
    fn update_screen(&mut self, ctx: &mut ScreenContext<'_>, elapsed: Duration);

    /// Draws the screen's content. Batching and the fade overlay are
    /// handled by the caller.
    fn draw_screen(&mut self, renderer: &mut dyn Renderer, elapsed: Duration);

    fn handle_input(&mut self, _ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        Ok(())
    }

    /// Observer for transition progress and removal.
    fn on_transition(&mut self, _notice: TransitionNotice, _ctx: &mut ScreenContext<'_>) {}

    /// Records the screen that opened this one.
    fn attach_parent(&mut self, _parent: ScreenId) {}

    /// The screen's mouse cursor, if it has one.
    fn mouse_mut(&mut self) -> Option<&mut MouseCursor> {
        None
    }

    /// Name used in log messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

//=== Draw Contract =======================================================

/// Draws one screen inside its own batch.
///
/// Inactive and Hidden screens draw nothing. Otherwise the fade overlay,
/// if any, covers the viewport before the screen's content.
pub fn draw_screen_framed(screen: &mut dyn Screen, renderer: &mut dyn Renderer, elapsed: Duration) {
    if matches!(screen.base().state(), ScreenState::Inactive | ScreenState::Hidden) {
        return;
    }

    renderer.begin_batch();

    if let Some(color) = screen.base().fade() {
        let viewport = renderer.viewport();
        renderer.fill_rect(viewport, color);
    }

    screen.draw_screen(renderer, elapsed);

    renderer.end_batch();
}

//=========================================================================
// Unit Tests
//=========================================================================
