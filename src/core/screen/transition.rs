//=========================================================================
// Screen Transition
//=========================================================================
//
// The per-screen state machine driving fade-in / fade-out.
//
// ```text
//  Inactive ──show──> TransitionOn ──percent ≥ 1──> Active
//                                                    │  ↑
//                               freeze / hide ───────┘  └── activate
//                                                    │
//  (removed) <──percent ≤ 0── TransitionOff <──exit──┘
// ```
//
// `advance()` performs one tick and returns a `TransitionStep` signal;
// the screen manager turns signals into hook calls and stack removal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;

//=== ScreenState =========================================================

/// Lifecycle state of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenState {
    /// Not shown: no update, no draw.
    Inactive,
    /// Fading in, percent rising towards 1.
    TransitionOn,
    /// Fully shown and updated.
    Active,
    /// Updated but not drawn.
    Hidden,
    /// Fading out, removed from the stack once percent reaches 0.
    TransitionOff,
    /// Drawn but neither updated nor given input.
    Frozen,
}

//=== Transition Signals ==================================================

/// Progress reported while a transition runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionEvent {
    /// Transition percent after this tick, in `0.0..=1.0`.
    pub percent: f32,
    /// Fraction of the full transition covered by this tick (before the
    /// multiplier is applied).
    pub step: f32,
}

/// Notification delivered to [`Screen::on_transition`](super::Screen::on_transition).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionNotice {
    Entering(TransitionEvent),
    Exiting(TransitionEvent),
    /// The screen has left the stack.
    Removed,
}

/// Outcome of one [`Transition::advance`] tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    /// Frozen or Inactive: nothing to do.
    Idle,
    /// Active or Hidden: the screen's own update should run.
    Running,
    /// Still fading in.
    Entering(TransitionEvent),
    /// Fade-in completed this tick; the screen is now Active.
    Entered,
    /// Still fading out.
    Exiting(TransitionEvent),
    /// Fade-out completed this tick; the screen must leave the stack.
    Finished,
}

//=== Transition ==========================================================

/// Transition state machine embedded in every screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    state: ScreenState,
    percent: f32,
    on_time: Duration,
    off_time: Duration,
    multiplier: f32,
}

impl Transition {
    /// A new transition starts fading in from 0 with instant timings.
    pub fn new() -> Self {
        Self {
            state: ScreenState::TransitionOn,
            percent: 0.0,
            on_time: Duration::ZERO,
            off_time: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    //--- Configuration ----------------------------------------------------

    pub fn set_on_time(&mut self, time: Duration) {
        self.on_time = time;
    }

    pub fn set_off_time(&mut self, time: Duration) {
        self.off_time = time;
    }

    /// Scales the speed of both transitions.
    ///
    /// # Errors
    ///
    /// [`ScreenError::InvalidArgument`] if `multiplier` is negative or not
    /// finite.
    pub fn set_multiplier(&mut self, multiplier: f32) -> Result<(), ScreenError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ScreenError::InvalidArgument(format!(
                "transition multiplier must be finite and non-negative, got {}",
                multiplier
            )));
        }
        self.multiplier = multiplier;
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn on_time(&self) -> Duration {
        self.on_time
    }

    pub fn off_time(&self) -> Duration {
        self.off_time
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// `1.0` while fading in, `-1.0` while fading out, `0.0` otherwise.
    pub fn direction(&self) -> f32 {
        match self.state {
            ScreenState::TransitionOn => 1.0,
            ScreenState::TransitionOff => -1.0,
            _ => 0.0,
        }
    }

    /// `true` in TransitionOn, TransitionOff and Active: the states that
    /// receive input.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            ScreenState::TransitionOn | ScreenState::TransitionOff | ScreenState::Active
        )
    }

    //--- State Changes ----------------------------------------------------

    /// Starts fading out; the screen is removed once the fade completes.
    pub fn exit(&mut self) {
        self.state = ScreenState::TransitionOff;
    }

    /// Stops updates and input while keeping the screen drawn.
    pub fn freeze(&mut self) {
        self.state = ScreenState::Frozen;
    }

    /// Keeps the screen updating while it is not drawn.
    pub fn hide(&mut self) {
        self.state = ScreenState::Hidden;
    }

    /// Jumps straight to Active from any state except Inactive and Active.
    /// The percentage is completed so a later exit fades out in full.
    pub fn activate(&mut self) {
        if !matches!(self.state, ScreenState::Inactive | ScreenState::Active) {
            self.percent = 1.0;
            self.state = ScreenState::Active;
        }
    }

    /// Parks the screen in Inactive.
    pub fn deactivate(&mut self) {
        self.state = ScreenState::Inactive;
    }

    /// Restarts an Inactive screen's fade-in from 0.
    pub fn show(&mut self) {
        if self.state == ScreenState::Inactive {
            self.percent = 0.0;
            self.state = ScreenState::TransitionOn;
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the state machine by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) -> TransitionStep {
        match self.state {
            ScreenState::Frozen | ScreenState::Inactive => TransitionStep::Idle,
            ScreenState::Active | ScreenState::Hidden => TransitionStep::Running,

            ScreenState::TransitionOn => {
                let step = progress(self.on_time, elapsed);
                self.percent += step * self.multiplier;

                if self.percent >= 1.0 {
                    self.percent = 1.0;
                    self.state = ScreenState::Active;
                    TransitionStep::Entered
                } else {
                    TransitionStep::Entering(TransitionEvent { percent: self.percent, step })
                }
            }

            ScreenState::TransitionOff => {
                let step = progress(self.off_time, elapsed);
                self.percent -= step * self.multiplier;

                if self.percent <= 0.0 {
                    self.percent = 0.0;
                    TransitionStep::Finished
                } else {
                    TransitionStep::Exiting(TransitionEvent { percent: self.percent, step })
                }
            }
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

//--- Internal Helpers ----------------------------------------------------

/// Fraction of `duration` covered by `elapsed`; a zero duration completes
/// in a single tick.
fn progress(duration: Duration, elapsed: Duration) -> f32 {
    if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f32() / duration.as_secs_f32()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
