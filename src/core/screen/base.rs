//=========================================================================
// Screen Base
//=========================================================================
//
// State shared by every screen: the transition machine, the screen's own
// input map, the optional fade overlay and the one-shot lifecycle flags.
//
// Concrete screens embed a `ScreenBase` and expose it through
// `Screen::base` / `Screen::base_mut`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::transition::{ScreenState, Transition};
use crate::core::error::ScreenError;
use crate::core::input::InputMap;
use crate::core::math::Color;

//=== ScreenBase ==========================================================

/// Composition struct embedded by every [`Screen`](super::Screen).
#[derive(Debug, Clone, Default)]
pub struct ScreenBase {
    transition: Transition,
    input_map: InputMap,
    fade: Option<Color>,
    initialized: bool,
    content_loaded: bool,
    content_unloaded: bool,
}

impl ScreenBase {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Builder ----------------------------------------------------------

    /// Sets fade-in and fade-out durations.
    pub fn with_transition_times(mut self, on: Duration, off: Duration) -> Self {
        self.transition.set_on_time(on);
        self.transition.set_off_time(off);
        self
    }

    pub fn with_fade(mut self, color: Color, percentage: f32) -> Self {
        self.enable_fade(color, percentage);
        self
    }

    /// Starts the screen Inactive; it must be shown explicitly.
    pub fn inactive(mut self) -> Self {
        self.transition.deactivate();
        self
    }

    //--- Transition -------------------------------------------------------

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn transition_mut(&mut self) -> &mut Transition {
        &mut self.transition
    }

    pub fn state(&self) -> ScreenState {
        self.transition.state()
    }

    pub fn set_transition_multiplier(&mut self, multiplier: f32) -> Result<(), ScreenError> {
        self.transition.set_multiplier(multiplier)
    }

    pub fn exit_screen(&mut self) {
        self.transition.exit();
    }

    pub fn freeze_screen(&mut self) {
        self.transition.freeze();
    }

    pub fn activate_screen(&mut self) {
        self.transition.activate();
    }

    pub fn hide_screen(&mut self) {
        self.transition.hide();
    }

    pub fn show_screen(&mut self) {
        self.transition.show();
    }

    //--- Input Map --------------------------------------------------------

    pub fn input_map(&self) -> &InputMap {
        &self.input_map
    }

    pub fn input_map_mut(&mut self) -> &mut InputMap {
        &mut self.input_map
    }

    //--- Fade Overlay -----------------------------------------------------

    /// Draws a full-viewport `color` quad behind the screen's content.
    ///
    /// `percentage` is clamped to `0.0..=1.0` and scales every channel.
    pub fn enable_fade(&mut self, color: Color, percentage: f32) {
        let percentage = if percentage.is_nan() { 0.0 } else { percentage.clamp(0.0, 1.0) };
        self.fade = Some(color.scaled(percentage));
    }

    pub fn disable_fade(&mut self) {
        self.fade = None;
    }

    /// Pre-scaled overlay colour, if fading is enabled.
    pub fn fade(&self) -> Option<Color> {
        self.fade
    }

    //--- Lifecycle Flags --------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_content_loaded(&self) -> bool {
        self.content_loaded
    }

    pub fn is_content_unloaded(&self) -> bool {
        self.content_unloaded
    }

    /// Marks the screen initialized; returns `true` only the first time.
    pub(crate) fn initialize(&mut self) -> bool {
        !std::mem::replace(&mut self.initialized, true)
    }

    pub(crate) fn mark_content_loaded(&mut self) {
        self.content_loaded = true;
    }

    pub(crate) fn mark_content_unloaded(&mut self) {
        self.content_unloaded = true;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
