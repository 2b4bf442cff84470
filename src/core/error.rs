//=========================================================================
// Screen Errors
//=========================================================================
//
// Contract violations reported by the screen stack, the input map and
// menus. Everything else in the crate is infallible.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::screen::ScreenId;

//=== ScreenError =========================================================

/// Errors returned by screen, menu and input-map operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenError {
    /// An input-map query named an action that was never bound.
    UnknownAction(String),

    /// A stack operation named a screen that was never registered.
    UnknownScreen(ScreenId),

    /// The screen is already on the stack.
    DuplicateScreen(ScreenId),

    /// "select" was requested on a menu without entries.
    EmptyMenu,

    /// A value outside its permitted range.
    InvalidArgument(String),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAction(name) => write!(f, "No bindings registered for action '{}'", name),
            Self::UnknownScreen(id) => write!(f, "Screen {} is not registered", id),
            Self::DuplicateScreen(id) => write!(f, "Screen {} is already on the stack", id),
            Self::EmptyMenu => write!(f, "Cannot select an entry from an empty menu"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for ScreenError {}

//=========================================================================
// Unit Tests
//=========================================================================
