//=========================================================================
// Debug Screen
//=========================================================================
//
// Overlay screen for diagnostic drawing (physics shapes, hit boxes).
//
// It never takes input and skips the fade-in. Drawing is delegated to a
// caller-supplied closure so the overlay can render whatever the host
// simulation exposes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::math::Rect;
use crate::core::render::Renderer;
use crate::core::screen::{Screen, ScreenBase, ScreenContext};

//=== DebugScreen =========================================================

pub type DebugOverlay = Box<dyn FnMut(&mut dyn Renderer, Rect)>;

/// Draws a debug overlay over the given screen bounds.
pub struct DebugScreen {
    base: ScreenBase,
    bounds: Rect,
    overlay: DebugOverlay,
}

impl DebugScreen {
    pub fn new<F>(bounds: Rect, overlay: F) -> Self
    where
        F: FnMut(&mut dyn Renderer, Rect) + 'static,
    {
        let mut base = ScreenBase::new();
        base.activate_screen();

        Self { base, bounds, overlay: Box::new(overlay) }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Screen for DebugScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn accepts_input(&self) -> bool {
        false
    }

    fn update_screen(&mut self, _ctx: &mut ScreenContext<'_>, _elapsed: Duration) {}

    fn draw_screen(&mut self, renderer: &mut dyn Renderer, _elapsed: Duration) {
        (self.overlay)(renderer, self.bounds);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
