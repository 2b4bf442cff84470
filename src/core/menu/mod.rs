//=========================================================================
// Menu
//
// Menu screens built from selectable entries.
//
// Responsibilities:
// - Entry display data, layout and animation (`entry`)
// - Cursor navigation and sub-menu handling (`menu_screen`)
// - Per-menu mouse cursor (`mouse`)
//
//=========================================================================

//=== Submodules ==========================================================

mod entry;
mod menu_screen;
mod mouse;

//=== Public Exports ======================================================

pub use entry::{EntryAnimator, EntryGraphic, EntryMotion, EntryState, MenuEntry, SelectHandler};
pub use menu_screen::{
    CancelHandler, DescriptionBox, MenuPalette, MenuScreen, ACTION_CANCEL, ACTION_NEXT, ACTION_PREVIOUS,
    ACTION_SELECT,
};
pub use mouse::MouseCursor;
