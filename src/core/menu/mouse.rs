//=========================================================================
// Mouse Cursor
//=========================================================================
//
// Per-menu cursor: whether the menu uses the mouse at all, whether the
// cursor is currently shown, and the texture drawn at the pointer.
//
// A parent menu hides its cursor while a sub-menu is open and restores
// the previous visibility once the sub-menu leaves the stack.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{Rect, Vec2};
use crate::core::render::TextureId;

//=== MouseCursor =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseCursor {
    texture: Option<TextureId>,
    enabled: bool,
    visible: bool,
    visible_before_hide: bool,
}

impl MouseCursor {
    /// A disabled cursor: no hit-testing, nothing drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns the cursor on and shows it.
    pub fn enable(&mut self, texture: Option<TextureId>) {
        if texture.is_some() {
            self.texture = texture;
        }
        self.enabled = true;
        self.visible = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.visible = false;
    }

    /// Hides the cursor, remembering whether it was shown.
    pub fn hide(&mut self) {
        self.visible_before_hide = self.visible;
        self.visible = false;
    }

    /// Shows the cursor if it is enabled.
    pub fn show(&mut self) {
        self.visible = self.enabled;
    }

    /// Restores the visibility recorded by the last [`hide`](Self::hide).
    pub fn restore(&mut self) {
        self.visible = self.enabled && self.visible_before_hide;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Hit rectangle at `position`; a cursor without a known texture size
    /// is a single pixel.
    pub fn bounds(&self, position: Vec2, texture_size: (u32, u32)) -> Rect {
        let (w, h) = texture_size;
        Rect::at(position, (w as i32).max(1), (h as i32).max(1))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
