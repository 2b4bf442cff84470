//=========================================================================
// Stagehand Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(build_screens)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns the core thread
//         ├─ with_channel_capacity()    runs the platform loop
//         ├─ with_title()               blocks until exit
//         └─ with_window_size()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::runtime::spawn_core_thread;
use crate::core::screen::ScreenManager;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (screen manager ticks per second)
/// - **Channel capacity**: 128 events
/// - **Title**: "Stagehand"
/// - **Window size**: 800×600
///
/// # Examples
///
/// ```no_run
/// use stagehand::prelude::*;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_title("Main Menu")
///     .build()
///     .run(|| {
///         let mut manager = ScreenManager::new(NullRenderer::new(800, 600));
///         manager
///             .push(MenuScreen::new().with_entry(MenuEntry::new("Quit")))
///             .expect("fresh screen");
///         manager
///     });
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    title: String,
    window_size: (u32, u32),
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: String::from("Stagehand"),
            window_size: (800, 600),
        }
    }

    /// Sets the target ticks per second for the core thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window_size = (width, height);
        self
    }

    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig {
                title: self.title,
                width: self.window_size.0,
                height: self.window_size.1,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Stagehand runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► Core Thread (@ TPS)
///   │     └─► ScreenManager: update → draw
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded channel (PlatformEvent), shutdown channel (())
/// ```
#[derive(Debug)]
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Engine {
    /// Runs the engine and blocks until the application exits.
    ///
    /// `build_screens` runs on the core thread and returns the screen
    /// manager to drive, with its initial screens already on the stack.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel and the shutdown channel
    /// 2. Spawns the core thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. The loop ends when the window closes or the screen stack empties
    pub fn run<F>(self, build_screens: F)
    where
        F: FnOnce() -> ScreenManager + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        //--- 2. Spawn the core thread -------------------------------------
        let core_handle = spawn_core_thread(build_screens, rx, shutdown_tx, self.tps);
        info!("Core thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, shutdown_rx, self.window);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for the core thread ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.title, "Stagehand");
        assert_eq!(builder.window_size, (800, 600));
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be non-zero")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::new().with_window_size(0, 600);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_title("Pause Menu")
            .with_window_size(1280, 720)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(
            engine.window,
            WindowConfig { title: "Pause Menu".into(), width: 1280, height: 720 }
        );
    }
}
