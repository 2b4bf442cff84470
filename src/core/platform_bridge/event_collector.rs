//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side platform event collection with bounded polling and shutdown
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input + focus → TickControl
//                                  ↓
//                          deliver(&mut ScreenManager)
//
// Bounded polling prevents a flooded channel from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;
use crate::core::runtime::TickControl;
use crate::core::screen::ScreenManager;

//=== EventCollector ======================================================

/// Collects the platform events that arrived since the previous tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    inputs: Vec<InputEvent>,
    focus: Option<bool>,
}

impl EventCollector {
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            inputs: Vec::with_capacity(32),
            focus: None,
        }
    }

    /// Drains pending platform events.
    ///
    /// Returns [`TickControl::Exit`] when the window closed or the
    /// platform side hung up.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.inputs.clear();
        self.focus = None;
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    //--- Test Accessors ---------------------------------------------------

    /// Input events collected this frame, in arrival order.
    #[cfg(test)]
    pub(crate) fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }

    /// Last focus change collected this frame, if any.
    #[cfg(test)]
    pub(crate) fn focus(&self) -> Option<bool> {
        self.focus
    }

    /// Hands the collected frame to the screen manager.
    pub(crate) fn deliver(&mut self, manager: &mut ScreenManager) {
        if let Some(focused) = self.focus.take() {
            manager.set_focused(focused);
        }
        if !self.inputs.is_empty() {
            trace!("Delivering {} input event(s)", self.inputs.len());
            manager.input_mut().process_events(&self.inputs);
            self.inputs.clear();
        }
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                self.inputs.extend(discrete);
                self.inputs.extend(continuous);
                TickControl::Continue
            }
            PlatformEvent::Focus(focused) => {
                self.focus = Some(focused);
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
