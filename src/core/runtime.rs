//=========================================================================
// Core Runtime
//
// Fixed-rate loop that drives the screen manager on its own thread.
//
// Each tick:
// ```text
//   collect platform events ──Exit──> stop
//        ↓
//   deliver input + focus to the manager
//        ↓
//   update(elapsed) ──Exit / Err──> stop
//        ↓
//   draw(elapsed)
//        ↓
//   sleep to keep the tick rate
// ```
//
// The manager is built on the core thread itself: screens and renderers
// are not required to be `Send`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::screen::ScreenManager;

//=== TickControl =========================================================

/// Whether the loop keeps running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== Core Thread =========================================================

/// Spawns the thread that owns and ticks the screen manager.
///
/// `shutdown` is signalled (and then dropped) once the loop has ended and
/// every screen's content has been unloaded.
pub(crate) fn spawn_core_thread<F>(
    build: F,
    receiver: Receiver<PlatformEvent>,
    shutdown: Sender<()>,
    tps: f64,
) -> thread::JoinHandle<()>
where
    F: FnOnce() -> ScreenManager + Send + 'static,
{
    let frame_duration = Duration::from_secs_f64(1.0 / tps);

    thread::spawn(move || {
        let mut manager = build();
        let mut collector = EventCollector::new(receiver);

        run_loop(&mut manager, &mut collector, frame_duration);

        manager.shutdown();
        let _ = shutdown.send(());
        info!("Core thread exiting.");
    })
}

/// Runs ticks until the platform closes, the stack empties or a screen
/// reports an error.
pub(crate) fn run_loop(manager: &mut ScreenManager, collector: &mut EventCollector, frame_duration: Duration) {
    if let Err(e) = manager.start() {
        error!("Screen manager failed to start: {}", e);
        return;
    }

    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        let elapsed = frame_start.duration_since(last_tick);
        last_tick = frame_start;

        //--- Step 1: Gather platform events ------------------------------
        if collector.collect_frame() == TickControl::Exit {
            info!("Platform closed, stopping core loop");
            break;
        }
        collector.deliver(manager);

        //--- Step 2: Update and draw -------------------------------------
        match manager.update(elapsed) {
            Ok(TickControl::Continue) => {}
            Ok(TickControl::Exit) => {
                info!("Screen stack exhausted, stopping core loop");
                break;
            }
            Err(e) => {
                error!("Screen update failed: {}", e);
                break;
            }
        }
        manager.draw(elapsed);

        //--- Step 3: Maintain pacing -------------------------------------
        let spent = frame_start.elapsed();
        if spent < frame_duration {
            thread::sleep(frame_duration - spent);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ScreenError;
    use crate::core::render::NullRenderer;
    use crate::core::screen::StackCommand;
    use crate::core::testing::{journal, ScriptedScreen};
    use crossbeam_channel::unbounded;

    const FAST: Duration = Duration::from_millis(1);

    fn manager() -> ScreenManager {
        ScreenManager::new(NullRenderer::new(800, 600))
    }

    #[test]
    fn empty_stack_stops_the_loop() {
        let (_tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut manager = manager();

        run_loop(&mut manager, &mut collector, FAST);
        assert!(manager.is_started());
    }

    #[test]
    fn window_close_stops_before_update() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let log = journal();
        let mut manager = manager();
        manager.push(ScriptedScreen::journaled("menu", log.clone())).unwrap();

        tx.send(PlatformEvent::WindowClosed).unwrap();
        run_loop(&mut manager, &mut collector, FAST);

        assert_eq!(*log.borrow(), vec!["menu:init", "menu:load"]);
    }

    #[test]
    fn exiting_last_screen_ends_the_session() {
        let (_tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let log = journal();
        let mut manager = manager();
        let id = manager.push(ScriptedScreen::journaled("title", log.clone()).without_input()).unwrap();
        if let Some(screen) = manager.screen_mut::<ScriptedScreen>(id) {
            screen.on_update.push(StackCommand::Exit(id));
        }

        run_loop(&mut manager, &mut collector, FAST);

        assert!(manager.is_empty());
        assert!(log.borrow().contains(&"title:removed".to_string()));
    }

    #[test]
    fn screen_error_stops_the_loop() {
        let (_tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        let mut manager = manager();
        let mut screen = ScriptedScreen::new("broken");
        screen.input_error = Some(ScreenError::EmptyMenu);
        let id = manager.push(screen).unwrap();

        run_loop(&mut manager, &mut collector, FAST);

        assert!(manager.contains(id));
    }

    #[test]
    fn core_thread_signals_shutdown() {
        let (tx, rx) = unbounded();
        let (shutdown_tx, shutdown_rx) = unbounded();

        let handle = spawn_core_thread(manager, rx, shutdown_tx, 1000.0);
        drop(tx);

        assert!(handle.join().is_ok());
        assert_eq!(shutdown_rx.try_recv(), Ok(()));
    }
}
