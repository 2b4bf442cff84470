//=========================================================================
// Screen Context
//=========================================================================
//
// What a screen hook can see and ask for while it runs.
//
// Screens never touch the stack directly. They queue `StackCommand`s on
// the context; the screen manager applies the queue synchronously as soon
// as the hook returns, so the stack is never mutated while a screen is
// borrowed.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenId};
use crate::core::input::InputSnapshot;
use crate::core::math::{Rect, Vec2};
use crate::core::render::{FontId, Renderer, TextureId};

//=== StackCommand ========================================================

/// Stack operations requested by screens.
pub enum StackCommand {
    /// Registers a new screen and adds it to the top of the stack.
    Push(Box<dyn Screen>),
    /// Adds an already registered screen to the top of the stack.
    Add(ScreenId),
    /// Removes a screen from the stack immediately.
    Remove(ScreenId),
    /// Starts a screen's fade-out.
    Exit(ScreenId),
    Freeze(ScreenId),
    Activate(ScreenId),
    /// Activates the screen and restores its mouse visibility, but only if
    /// the screen is Frozen.
    Thaw(ScreenId),
    /// Tells `child` which screen opened it.
    AttachParent { child: ScreenId, parent: ScreenId },
    HideMouse(ScreenId),
    ShowMouse(ScreenId),
    EnableMouse { screen: ScreenId, texture: Option<TextureId> },
}

impl std::fmt::Debug for StackCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push(screen) => write!(f, "Push({})", screen.name()),
            Self::Add(id) => write!(f, "Add({})", id),
            Self::Remove(id) => write!(f, "Remove({})", id),
            Self::Exit(id) => write!(f, "Exit({})", id),
            Self::Freeze(id) => write!(f, "Freeze({})", id),
            Self::Activate(id) => write!(f, "Activate({})", id),
            Self::Thaw(id) => write!(f, "Thaw({})", id),
            Self::AttachParent { child, parent } => {
                write!(f, "AttachParent {{ child: {}, parent: {} }}", child, parent)
            }
            Self::HideMouse(id) => write!(f, "HideMouse({})", id),
            Self::ShowMouse(id) => write!(f, "ShowMouse({})", id),
            Self::EnableMouse { screen, texture } => {
                write!(f, "EnableMouse {{ screen: {}, texture: {:?} }}", screen, texture)
            }
        }
    }
}

//=== CommandQueue ========================================================

/// FIFO of stack commands queued during a hook.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: Vec<StackCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, command: StackCommand) {
        self.queue.push(command);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StackCommand> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all commands from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<StackCommand> {
        std::mem::take(&mut self.queue)
    }
}

//=== ScreenContext =======================================================

/// Borrowed view handed to every screen hook.
pub struct ScreenContext<'a> {
    id: ScreenId,
    input: &'a InputSnapshot,
    metrics: &'a dyn Renderer,
    commands: &'a mut CommandQueue,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        id: ScreenId,
        input: &'a InputSnapshot,
        metrics: &'a dyn Renderer,
        commands: &'a mut CommandQueue,
    ) -> Self {
        Self { id, input, metrics, commands }
    }

    //--- Queries ----------------------------------------------------------

    /// Id of the screen running the hook.
    pub fn id(&self) -> ScreenId {
        self.id
    }

    /// Input state of the current frame.
    pub fn input(&self) -> &InputSnapshot {
        self.input
    }

    pub fn viewport(&self) -> Rect {
        self.metrics.viewport()
    }

    pub fn measure_text(&self, font: FontId, text: &str) -> Vec2 {
        self.metrics.measure_text(font, text)
    }

    pub fn texture_size(&self, texture: TextureId) -> (u32, u32) {
        self.metrics.texture_size(texture)
    }

    //--- Stack Commands ---------------------------------------------------

    pub fn queue(&mut self, command: StackCommand) {
        self.commands.push(command);
    }

    pub fn push_screen(&mut self, screen: Box<dyn Screen>) {
        self.queue(StackCommand::Push(screen));
    }

    pub fn add_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Add(id));
    }

    pub fn remove_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Remove(id));
    }

    pub fn exit_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Exit(id));
    }

    pub fn freeze_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Freeze(id));
    }

    pub fn activate_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Activate(id));
    }

    pub fn thaw_screen(&mut self, id: ScreenId) {
        self.queue(StackCommand::Thaw(id));
    }

    pub fn attach_parent(&mut self, child: ScreenId, parent: ScreenId) {
        self.queue(StackCommand::AttachParent { child, parent });
    }

    pub fn hide_mouse(&mut self, id: ScreenId) {
        self.queue(StackCommand::HideMouse(id));
    }

    pub fn show_mouse(&mut self, id: ScreenId) {
        self.queue(StackCommand::ShowMouse(id));
    }

    pub fn enable_mouse(&mut self, id: ScreenId, texture: Option<TextureId>) {
        self.queue(StackCommand::EnableMouse { screen: id, texture });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
