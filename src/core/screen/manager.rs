//=========================================================================
// Screen Manager
//=========================================================================
//
// Manages screen registration, stack operations, and lifecycle.
//
// Screens are stored in a HashMap by id and referenced via a stack of
// ids. This allows screens to keep their state between activations.
//
// Frame lifecycle:
// ```text
// update(elapsed)
//   ├─ empty stack → TickControl::Exit
//   ├─ unfocused   → nothing else
//   ├─ input.refresh()
//   └─ for each screen, top → bottom:
//        advance transition → update_screen | on_transition | remove
//        handle_input (active + accepts input)
//        apply queued StackCommands
// draw(elapsed)
//   └─ for each screen, bottom → top, skipping Hidden
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::time::Duration;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::context::{CommandQueue, ScreenContext, StackCommand};
use super::transition::{ScreenState, TransitionNotice, TransitionStep};
use super::{draw_screen_framed, Screen, ScreenId};
use crate::core::error::ScreenError;
use crate::core::input::InputSnapshot;
use crate::core::render::Renderer;
use crate::core::runtime::TickControl;

//=== ScreenManager =======================================================

/// Owns every screen and drives the stack once per frame.
///
/// Screens are registered once and referenced by id. The stack determines
/// which screens are updated and drawn; the topmost screen is updated
/// first and drawn last.
pub struct ScreenManager {
    screens: HashMap<ScreenId, Box<dyn Screen>>,
    stack: Vec<ScreenId>,
    scratch: Vec<ScreenId>,
    input: InputSnapshot,
    renderer: Box<dyn Renderer>,
    commands: CommandQueue,
    next_id: u64,
    started: bool,
    focused: bool,
}

impl ScreenManager {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with an empty stack drawing through `renderer`.
    ///
    /// The manager starts focused but not started: screens added before
    /// [`start`](Self::start) are initialized and loaded by it.
    pub fn new(renderer: impl Renderer + 'static) -> Self {
        Self::with_boxed_renderer(Box::new(renderer))
    }

    pub fn with_boxed_renderer(renderer: Box<dyn Renderer>) -> Self {
        Self {
            screens: HashMap::new(),
            stack: Vec::new(),
            scratch: Vec::new(),
            input: InputSnapshot::new(),
            renderer,
            commands: CommandQueue::new(),
            next_id: 1,
            started: false,
            focused: true,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen without adding it to the stack.
    pub fn register<T>(&mut self, screen: T) -> ScreenId
    where
        T: Screen + 'static,
    {
        self.register_boxed(Box::new(screen))
    }

    pub fn register_boxed(&mut self, screen: Box<dyn Screen>) -> ScreenId {
        let id = ScreenId::from_raw(self.next_id);
        self.next_id += 1;

        debug!("Registered screen {} ({})", id, screen.name());
        self.screens.insert(id, screen);
        id
    }

    /// Registers a screen and adds it to the top of the stack.
    pub fn push<T>(&mut self, screen: T) -> Result<ScreenId, ScreenError>
    where
        T: Screen + 'static,
    {
        let id = self.register(screen);
        self.add_screen(id)?;
        Ok(id)
    }

    //--- Stack Operations -------------------------------------------------

    /// Adds a registered screen to the top of the stack.
    ///
    /// Once the manager has started, the screen is initialized (first time
    /// only) and its content loaded (first time only) before it is pushed.
    ///
    /// # Errors
    ///
    /// [`ScreenError::UnknownScreen`] for unregistered ids and
    /// [`ScreenError::DuplicateScreen`] if the screen is already stacked.
    pub fn add_screen(&mut self, id: ScreenId) -> Result<(), ScreenError> {
        self.add_internal(id)?;
        self.apply_commands()
    }

    /// Removes a screen from the stack immediately.
    ///
    /// Content is unloaded (once per lifetime) and the screen receives
    /// [`TransitionNotice::Removed`]. Removing a registered screen that is
    /// not on the stack is a no-op.
    pub fn remove_screen(&mut self, id: ScreenId) -> Result<(), ScreenError> {
        self.remove_internal(id)?;
        self.apply_commands()
    }

    /// Initializes and loads every screen already on the stack.
    pub fn start(&mut self) -> Result<(), ScreenError> {
        if self.started {
            warn!("Screen manager already started");
            return Ok(());
        }

        info!("Starting screen manager with {} screen(s) on the stack", self.stack.len());
        self.started = true;

        for index in 0..self.stack.len() {
            let id = self.stack[index];
            self.prepare(id);
        }

        self.apply_commands()
    }

    /// Unloads every stacked screen whose content is still loaded.
    pub fn shutdown(&mut self) {
        info!("Shutting down screen manager ({} screen(s) on the stack)", self.stack.len());

        for id in &self.stack {
            let Some(screen) = self.screens.get_mut(id) else {
                continue;
            };
            if screen.base().is_content_unloaded() {
                continue;
            }

            let mut ctx = ScreenContext::new(*id, &self.input, &*self.renderer, &mut self.commands);
            screen.unload_content(&mut ctx);
            screen.base_mut().mark_content_unloaded();
        }

        let dropped = self.commands.take();
        if !dropped.is_empty() {
            debug!("Discarded {} stack command(s) queued during shutdown", dropped.len());
        }
    }

    //--- Focus ------------------------------------------------------------

    /// While unfocused, `update` and `draw` do nothing.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            debug!("Application focus changed: {}", focused);
        }
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one frame of updates, topmost screen first.
    ///
    /// Returns [`TickControl::Exit`] when the stack is empty.
    pub fn update(&mut self, elapsed: Duration) -> Result<TickControl, ScreenError> {
        self.scratch.clear();

        if self.stack.is_empty() {
            info!("Screen stack is empty, requesting exit");
            return Ok(TickControl::Exit);
        }

        self.scratch.extend_from_slice(&self.stack);

        if !self.focused {
            trace!("Application unfocused, skipping screen update");
            return Ok(TickControl::Continue);
        }

        self.input.refresh();

        while let Some(id) = self.scratch.pop() {
            // Removed by a screen above it during this frame
            if !self.stack.contains(&id) {
                trace!("Screen {} left the stack this frame, skipping", id);
                continue;
            }

            self.update_one(id, elapsed)?;
            self.dispatch_input(id)?;
        }

        Ok(TickControl::Continue)
    }

    /// Draws the stack bottom to top, skipping Hidden screens.
    pub fn draw(&mut self, elapsed: Duration) {
        if !self.focused {
            return;
        }

        for id in &self.stack {
            let Some(screen) = self.screens.get_mut(id) else {
                continue;
            };
            if screen.base().state() != ScreenState::Hidden {
                draw_screen_framed(&mut **screen, &mut *self.renderer, elapsed);
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Stacked ids, bottom first.
    pub fn stack(&self) -> &[ScreenId] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns `true` if the screen is currently on the stack.
    pub fn contains(&self, id: ScreenId) -> bool {
        self.stack.contains(&id)
    }

    pub fn is_registered(&self, id: ScreenId) -> bool {
        self.screens.contains_key(&id)
    }

    pub fn state(&self, id: ScreenId) -> Option<ScreenState> {
        self.screens.get(&id).map(|s| s.base().state())
    }

    /// Borrows a registered screen as its concrete type.
    pub fn screen<T: Any>(&self, id: ScreenId) -> Option<&T> {
        let screen: &dyn Screen = &**self.screens.get(&id)?;
        screen.as_any().downcast_ref::<T>()
    }

    pub fn screen_mut<T: Any>(&mut self, id: ScreenId) -> Option<&mut T> {
        let screen: &mut dyn Screen = &mut **self.screens.get_mut(&id)?;
        screen.as_any_mut().downcast_mut::<T>()
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Mutable input access for feeding platform events.
    pub fn input_mut(&mut self) -> &mut InputSnapshot {
        &mut self.input
    }

    //--- Internal Helpers -------------------------------------------------

    fn add_internal(&mut self, id: ScreenId) -> Result<(), ScreenError> {
        if !self.screens.contains_key(&id) {
            warn!("Attempted to add unregistered screen {}", id);
            return Err(ScreenError::UnknownScreen(id));
        }

        if self.stack.contains(&id) {
            warn!("Screen {} is already in the stack", id);
            return Err(ScreenError::DuplicateScreen(id));
        }

        if self.started {
            self.prepare(id);
        }

        debug!("Adding screen {} to stack at depth {}", id, self.stack.len());
        self.stack.push(id);
        Ok(())
    }

    fn remove_internal(&mut self, id: ScreenId) -> Result<(), ScreenError> {
        if !self.screens.contains_key(&id) {
            warn!("Attempted to remove unregistered screen {}", id);
            return Err(ScreenError::UnknownScreen(id));
        }

        let Some(pos) = self.stack.iter().position(|&s| s == id) else {
            debug!("Screen {} not found in stack, skipping removal", id);
            return Ok(());
        };

        debug!("Removing screen {} from stack at position {}", id, pos);
        self.stack.remove(pos);

        if let Some(screen) = self.screens.get_mut(&id) {
            let mut ctx = ScreenContext::new(id, &self.input, &*self.renderer, &mut self.commands);

            if self.started && !screen.base().is_content_unloaded() {
                screen.unload_content(&mut ctx);
                screen.base_mut().mark_content_unloaded();
            }

            screen.on_transition(TransitionNotice::Removed, &mut ctx);
        }

        Ok(())
    }

    /// One-time initialization and content load.
    fn prepare(&mut self, id: ScreenId) {
        let Some(screen) = self.screens.get_mut(&id) else {
            return;
        };
        let mut ctx = ScreenContext::new(id, &self.input, &*self.renderer, &mut self.commands);

        if screen.base_mut().initialize() {
            debug!("Initializing screen {} ({})", id, screen.name());
            screen.initialize_screen(&mut ctx);
        }

        if !screen.base().is_content_loaded() {
            screen.load_content(&mut ctx);
            screen.base_mut().mark_content_loaded();
        }
    }

    fn update_one(&mut self, id: ScreenId, elapsed: Duration) -> Result<(), ScreenError> {
        let screen = self.screens.get_mut(&id).ok_or(ScreenError::UnknownScreen(id))?;
        let step = screen.base_mut().transition_mut().advance(elapsed);
        let mut ctx = ScreenContext::new(id, &self.input, &*self.renderer, &mut self.commands);

        match step {
            TransitionStep::Idle | TransitionStep::Finished => {}
            TransitionStep::Running => screen.update_screen(&mut ctx, elapsed),
            TransitionStep::Entering(event) => {
                screen.on_transition(TransitionNotice::Entering(event), &mut ctx)
            }
            TransitionStep::Exiting(event) => {
                screen.on_transition(TransitionNotice::Exiting(event), &mut ctx)
            }
            TransitionStep::Entered => {
                debug!("Screen {} ({}) finished transitioning on", id, screen.name())
            }
        }

        if step == TransitionStep::Finished {
            debug!("Screen {} finished transitioning off", id);
            self.remove_internal(id)?;
        }

        self.apply_commands()
    }

    fn dispatch_input(&mut self, id: ScreenId) -> Result<(), ScreenError> {
        if !self.stack.contains(&id) {
            return Ok(());
        }

        let screen = self.screens.get_mut(&id).ok_or(ScreenError::UnknownScreen(id))?;
        if !(screen.base().transition().is_active() && screen.accepts_input()) {
            return Ok(());
        }

        let mut ctx = ScreenContext::new(id, &self.input, &*self.renderer, &mut self.commands);
        let result = screen.handle_input(&mut ctx);

        self.apply_commands()?;
        result
    }

    /// Applies queued commands until the queue stays empty.
    ///
    /// The first failing command aborts the batch; everything still queued
    /// behind it is discarded.
    fn apply_commands(&mut self) -> Result<(), ScreenError> {
        while !self.commands.is_empty() {
            let mut batch = self.commands.take().into_iter();
            while let Some(command) = batch.next() {
                if let Err(e) = self.apply(command) {
                    let dropped = batch.len() + self.commands.take().len();
                    if dropped > 0 {
                        warn!("Stack command failed ({}), discarded {} queued command(s)", e, dropped);
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, command: StackCommand) -> Result<(), ScreenError> {
        trace!("Applying stack command {:?}", command);

        match command {
            StackCommand::Push(screen) => {
                let id = self.register_boxed(screen);
                self.add_internal(id)
            }
            StackCommand::Add(id) => self.add_internal(id),
            StackCommand::Remove(id) => self.remove_internal(id),
            StackCommand::Exit(id) => self.with_screen(id, |s| s.base_mut().exit_screen()),
            StackCommand::Freeze(id) => {
                debug!("Freezing screen {}", id);
                self.with_screen(id, |s| s.base_mut().freeze_screen())
            }
            StackCommand::Activate(id) => self.with_screen(id, |s| s.base_mut().activate_screen()),
            StackCommand::Thaw(id) => self.with_screen(id, |s| {
                if s.base().state() == ScreenState::Frozen {
                    debug!("Reactivating frozen screen {}", id);
                    s.base_mut().activate_screen();
                    if let Some(mouse) = s.mouse_mut() {
                        mouse.restore();
                    }
                }
            }),
            StackCommand::AttachParent { child, parent } => {
                self.with_screen(child, |s| s.attach_parent(parent))
            }
            StackCommand::HideMouse(id) => self.with_screen(id, |s| {
                if let Some(mouse) = s.mouse_mut() {
                    mouse.hide();
                }
            }),
            StackCommand::ShowMouse(id) => self.with_screen(id, |s| {
                if let Some(mouse) = s.mouse_mut() {
                    mouse.show();
                }
            }),
            StackCommand::EnableMouse { screen, texture } => self.with_screen(screen, |s| {
                match s.mouse_mut() {
                    Some(mouse) => mouse.enable(texture),
                    None => warn!("Screen {} has no mouse cursor to enable", screen),
                }
            }),
        }
    }

    fn with_screen<F>(&mut self, id: ScreenId, f: F) -> Result<(), ScreenError>
    where
        F: FnOnce(&mut dyn Screen),
    {
        let screen = self.screens.get_mut(&id).ok_or(ScreenError::UnknownScreen(id))?;
        f(&mut **screen);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen::ScreenBase;
    use crate::core::testing::{journal, DrawCall, Journal, ScriptedScreen, SharedRenderer};

    const FRAME: Duration = Duration::from_millis(16);

    fn manager() -> (ScreenManager, SharedRenderer) {
        let renderer = SharedRenderer::new();
        (ScreenManager::new(renderer.clone()), renderer)
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.borrow().clone()
    }

    fn take(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.borrow_mut())
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn empty_stack_requests_exit() {
        let (mut manager, _) = manager();
        assert_eq!(manager.update(FRAME), Ok(TickControl::Exit));
    }

    #[test]
    fn screens_added_before_start_load_on_start() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();
        manager.push(ScriptedScreen::journaled("b", log.clone())).unwrap();
        assert!(entries(&log).is_empty());

        manager.start().unwrap();
        assert_eq!(entries(&log), vec!["a:init", "a:load", "b:init", "b:load"]);
    }

    #[test]
    fn screens_added_after_start_load_immediately() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.start().unwrap();

        let id = manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();
        assert_eq!(entries(&log), vec!["a:init", "a:load"]);
        assert_eq!(manager.stack(), &[id]);
    }

    #[test]
    fn readding_a_screen_does_not_reload() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.start().unwrap();

        let id = manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();
        manager.remove_screen(id).unwrap();
        manager.add_screen(id).unwrap();

        assert_eq!(entries(&log), vec!["a:init", "a:load", "a:unload", "a:removed"]);
    }

    #[test]
    fn shutdown_unloads_remaining_screens_once() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.shutdown();
        manager.shutdown();
        assert_eq!(entries(&log), vec!["a:unload"]);
    }

    #[test]
    fn removal_before_start_skips_unload() {
        let log = journal();
        let (mut manager, _) = manager();
        let id = manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();

        manager.remove_screen(id).unwrap();
        assert_eq!(entries(&log), vec!["a:removed"]);
        assert!(manager.is_empty());
    }

    //=====================================================================
    // Contract Tests
    //=====================================================================

    #[test]
    fn unknown_ids_are_rejected() {
        let (mut manager, _) = manager();
        let ghost = ScreenId::from_raw(99);
        assert_eq!(manager.add_screen(ghost), Err(ScreenError::UnknownScreen(ghost)));
        assert_eq!(manager.remove_screen(ghost), Err(ScreenError::UnknownScreen(ghost)));
    }

    #[test]
    fn screen_cannot_be_stacked_twice() {
        let (mut manager, _) = manager();
        let id = manager.push(ScriptedScreen::new("a")).unwrap();
        assert_eq!(manager.add_screen(id), Err(ScreenError::DuplicateScreen(id)));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn removing_unstacked_screen_is_noop() {
        let log = journal();
        let (mut manager, _) = manager();
        let id = manager.register(ScriptedScreen::journaled("a", log.clone()));
        assert_eq!(manager.remove_screen(id), Ok(()));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn input_errors_propagate_from_update() {
        let (mut manager, _) = manager();
        let mut screen = ScriptedScreen::new("a");
        screen.input_error = Some(ScreenError::UnknownAction("jump".into()));
        manager.push(screen).unwrap();
        manager.start().unwrap();

        assert_eq!(manager.update(FRAME), Err(ScreenError::UnknownAction("jump".into())));
    }

    //=====================================================================
    // Update Tests
    //=====================================================================

    #[test]
    fn update_runs_top_down_with_input_after_each_screen() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.push(ScriptedScreen::journaled("bottom", log.clone())).unwrap();
        manager.push(ScriptedScreen::journaled("top", log.clone())).unwrap();
        manager.start().unwrap();

        // First frame completes the instant fade-in; only input is journaled.
        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["top:input", "bottom:input"]);

        manager.update(FRAME).unwrap();
        assert_eq!(
            take(&log),
            vec!["top:update", "top:input", "bottom:update", "bottom:input"]
        );
    }

    #[test]
    fn unfocused_manager_skips_update_and_draw() {
        let log = journal();
        let (mut manager, renderer) = manager();
        manager.push(ScriptedScreen::journaled("a", log.clone())).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.set_focused(false);
        assert_eq!(manager.update(FRAME), Ok(TickControl::Continue));
        manager.draw(FRAME);

        assert!(entries(&log).is_empty());
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn unfocused_input_is_not_refreshed() {
        use crate::core::input::{InputEvent, KeyCode};

        let (mut manager, _) = manager();
        manager.push(ScriptedScreen::new("a")).unwrap();
        manager.set_focused(false);

        manager.input_mut().process_events(&[InputEvent::KeyDown(KeyCode::Enter)]);
        manager.update(FRAME).unwrap();
        assert!(!manager.input().is_key_pressed(KeyCode::Enter));

        manager.set_focused(true);
        manager.update(FRAME).unwrap();
        assert!(manager.input().is_new_key_press(KeyCode::Enter));
    }

    #[test]
    fn frozen_screens_get_neither_update_nor_input() {
        let log = journal();
        let (mut manager, _) = manager();
        let mut frozen = ScriptedScreen::journaled("frozen", log.clone());
        frozen.base.freeze_screen();
        manager.push(frozen).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.update(FRAME).unwrap();
        manager.update(FRAME).unwrap();
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn screens_without_input_are_only_updated() {
        let log = journal();
        let (mut manager, _) = manager();
        manager.push(ScriptedScreen::journaled("overlay", log.clone()).without_input()).unwrap();
        manager.start().unwrap();

        manager.update(FRAME).unwrap();
        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["overlay:init", "overlay:load", "overlay:update"]);
    }

    #[test]
    fn hidden_screens_update_without_input() {
        let log = journal();
        let (mut manager, _) = manager();
        let mut hidden = ScriptedScreen::journaled("hidden", log.clone());
        hidden.base.hide_screen();
        manager.push(hidden).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.update(FRAME).unwrap();
        assert_eq!(entries(&log), vec!["hidden:update"]);
    }

    #[test]
    fn fade_in_notifies_entering_until_active() {
        let log = journal();
        let (mut manager, _) = manager();
        let base = ScreenBase::new().with_transition_times(Duration::from_millis(32), Duration::ZERO);
        let id = manager.push(ScriptedScreen::journaled("a", log.clone()).with_base(base)).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["a:entering", "a:input"]);
        assert_eq!(manager.state(id), Some(ScreenState::TransitionOn));

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["a:input"]);
        assert_eq!(manager.state(id), Some(ScreenState::Active));
    }

    #[test]
    fn exit_fades_out_then_removes_and_unloads() {
        let log = journal();
        let (mut manager, _) = manager();
        let base = ScreenBase::new().with_transition_times(Duration::ZERO, Duration::from_millis(32));
        let id = manager.push(ScriptedScreen::journaled("a", log.clone()).with_base(base)).unwrap();
        manager.start().unwrap();
        manager.update(FRAME).unwrap();
        take(&log);

        manager.screen_mut::<ScriptedScreen>(id).unwrap().base.exit_screen();

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["a:exiting", "a:input"]);

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["a:unload", "a:removed"]);
        assert!(!manager.contains(id));
        assert!(manager.is_registered(id));

        assert_eq!(manager.update(FRAME), Ok(TickControl::Exit));
    }

    //=====================================================================
    // Command Tests
    //=====================================================================

    #[test]
    fn screen_pushed_during_update_waits_for_next_frame() {
        let log = journal();
        let (mut manager, _) = manager();
        let mut host = ScriptedScreen::journaled("host", log.clone());
        host.on_input.push(StackCommand::Push(Box::new(ScriptedScreen::journaled(
            "pushed",
            log.clone(),
        ))));
        manager.push(host).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["host:input", "pushed:init", "pushed:load"]);
        assert_eq!(manager.len(), 2);

        manager.update(FRAME).unwrap();
        assert_eq!(
            take(&log),
            vec!["pushed:input", "host:update", "host:input"]
        );
    }

    #[test]
    fn screen_removed_mid_frame_is_not_updated() {
        let log = journal();
        let (mut manager, _) = manager();
        let bottom = manager.push(ScriptedScreen::journaled("bottom", log.clone())).unwrap();
        let mut top = ScriptedScreen::journaled("top", log.clone());
        top.on_input.push(StackCommand::Remove(bottom));
        manager.push(top).unwrap();
        manager.start().unwrap();
        take(&log);

        manager.update(FRAME).unwrap();
        assert_eq!(take(&log), vec!["top:input", "bottom:unload", "bottom:removed"]);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn thaw_only_reactivates_frozen_screens() {
        let (mut manager, _) = manager();
        let frozen = manager.push(ScriptedScreen::new("frozen")).unwrap();
        let hidden = manager.push(ScriptedScreen::new("hidden")).unwrap();
        manager.screen_mut::<ScriptedScreen>(frozen).unwrap().base.freeze_screen();
        manager.screen_mut::<ScriptedScreen>(hidden).unwrap().base.hide_screen();

        let mut driver = ScriptedScreen::new("driver");
        driver.on_input.push(StackCommand::Thaw(frozen));
        driver.on_input.push(StackCommand::Thaw(hidden));
        manager.push(driver).unwrap();
        manager.start().unwrap();
        manager.update(FRAME).unwrap();

        assert_eq!(manager.state(frozen), Some(ScreenState::Active));
        assert_eq!(manager.state(hidden), Some(ScreenState::Hidden));
    }

    #[test]
    fn attach_parent_reaches_child() {
        let (mut manager, _) = manager();
        let child = manager.register(ScriptedScreen::new("child"));
        let mut parent = ScriptedScreen::new("parent");
        parent.on_input.push(StackCommand::AttachParent { child, parent: ScreenId::from_raw(1) });
        let parent_id = manager.push(parent).unwrap();
        manager.start().unwrap();
        manager.update(FRAME).unwrap();

        assert_eq!(parent_id, ScreenId::from_raw(2));
        let child = manager.screen::<ScriptedScreen>(child).unwrap();
        assert_eq!(child.parent, Some(ScreenId::from_raw(1)));
    }

    #[test]
    fn command_for_unknown_screen_fails_the_frame() {
        let (mut manager, _) = manager();
        let ghost = ScreenId::from_raw(404);
        let mut screen = ScriptedScreen::new("a");
        screen.on_input.push(StackCommand::Freeze(ghost));
        manager.push(screen).unwrap();
        manager.start().unwrap();

        assert_eq!(manager.update(FRAME), Err(ScreenError::UnknownScreen(ghost)));
    }

    #[test]
    fn failed_command_discards_the_rest_of_its_batch() {
        let (mut manager, _) = manager();
        let ghost = ScreenId::from_raw(404);
        let id = manager.push(ScriptedScreen::new("a")).unwrap();
        if let Some(screen) = manager.screen_mut::<ScriptedScreen>(id) {
            screen.on_input.push(StackCommand::Freeze(ghost));
            screen.on_input.push(StackCommand::Freeze(id));
        }
        manager.start().unwrap();

        assert_eq!(manager.update(FRAME), Err(ScreenError::UnknownScreen(ghost)));
        assert_eq!(manager.state(id), Some(ScreenState::Active));

        assert_eq!(manager.update(FRAME), Ok(TickControl::Continue));
        assert_eq!(manager.state(id), Some(ScreenState::Active));
    }

    //=====================================================================
    // Draw Tests
    //=====================================================================

    #[test]
    fn draw_runs_bottom_up_and_skips_hidden() {
        let (mut manager, renderer) = manager();
        manager.push(ScriptedScreen::new("bottom")).unwrap();
        let hidden = manager.push(ScriptedScreen::new("hidden")).unwrap();
        manager.push(ScriptedScreen::new("top")).unwrap();
        manager.screen_mut::<ScriptedScreen>(hidden).unwrap().base.hide_screen();
        manager.start().unwrap();

        manager.draw(FRAME);

        assert_eq!(
            renderer.calls(),
            vec![
                DrawCall::Begin,
                DrawCall::content("bottom"),
                DrawCall::End,
                DrawCall::Begin,
                DrawCall::content("top"),
                DrawCall::End,
            ]
        );
    }

    #[test]
    fn screen_downcast_requires_matching_type() {
        let (mut manager, _) = manager();
        let id = manager.register(ScriptedScreen::new("a"));
        assert!(manager.screen::<ScriptedScreen>(id).is_some());
        assert!(manager.screen::<String>(id).is_none());
    }
}
