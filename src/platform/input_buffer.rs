//=========================================================================
// Input Buffer
//
// Collects translated input events between two platform frames, split
// into two categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete inputs (key/button edges) in arrival order
// - Drop immediate repeats of the same discrete input (OS key repeat)
// - Coalesce continuous inputs so only the latest value per source
//   (mouse, each trigger, each thumbstick) is sent
//
// Notes:
// The buffer is drained on every RedrawRequested and reused, so its
// storage is kept across frames.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 128;
        const CONTINUOUS_BASE: usize = 8;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: Vec::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Routes an event to the matching category.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.push_continuous(event);
        } else {
            self.push_discrete(event);
        }
    }

    /// Inserts or replaces the latest value of a continuous source.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        match self.continuous.iter_mut().find(|e| same_source(e, &event)) {
            Some(slot) => *slot = event,
            None => self.continuous.push(event),
        }
    }

    /// Appends a discrete input, ignoring an immediate duplicate.
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events, or `None` when nothing was buffered.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain(..).collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn clear(&mut self) {
        self.discrete.clear();
        self.continuous.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//--- Coalescing ----------------------------------------------------------

fn same_source(a: &InputEvent, b: &InputEvent) -> bool {
    match (a, b) {
        (InputEvent::MouseMoved { .. }, InputEvent::MouseMoved { .. }) => true,
        (InputEvent::TriggerMoved { trigger: x, .. }, InputEvent::TriggerMoved { trigger: y, .. }) => x == y,
        (InputEvent::ThumbstickMoved { stick: x, .. }, InputEvent::ThumbstickMoved { stick: y, .. }) => x == y,
        _ => false,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
