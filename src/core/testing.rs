//=========================================================================
// Test Support
//=========================================================================
//
// Fakes shared by the unit tests: a renderer that records draw calls and
// a scripted screen that journals every hook it receives.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::ScreenError;
use crate::core::math::{Color, Rect, Vec2};
use crate::core::render::{DrawParams, FontId, Renderer, TextureId};
use crate::core::screen::{Screen, ScreenBase, ScreenContext, ScreenId, StackCommand, TransitionNotice};

//=== RecordingRenderer ===================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Begin,
    End,
    Fill(Rect, Color),
    Texture(TextureId, DrawParams),
    Text { text: String, position: Vec2, color: Color },
}

impl DrawCall {
    /// The call a [`ScriptedScreen`] makes when drawn.
    pub(crate) fn content(label: &str) -> Self {
        DrawCall::Text { text: label.to_owned(), position: Vec2::ZERO, color: Color::WHITE }
    }
}

/// 800×600 renderer; text measures 10 px per char by 20 px.
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    textures: HashMap<TextureId, (u32, u32)>,
}

impl RecordingRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_texture(mut self, texture: TextureId, width: u32, height: u32) -> Self {
        self.textures.insert(texture, (width, height));
        self
    }

    pub(crate) fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn viewport(&self) -> Rect {
        Rect::new(0, 0, 800, 600)
    }

    fn begin_batch(&mut self) {
        self.calls.push(DrawCall::Begin);
    }

    fn end_batch(&mut self) {
        self.calls.push(DrawCall::End);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_texture(&mut self, texture: TextureId, params: &DrawParams) {
        self.calls.push(DrawCall::Texture(texture, *params));
    }

    fn draw_text(&mut self, _font: FontId, text: &str, position: Vec2, color: Color, _scale: f32) {
        self.calls.push(DrawCall::Text { text: text.to_owned(), position, color });
    }

    fn measure_text(&self, _font: FontId, text: &str) -> Vec2 {
        Vec2::new(10.0 * text.chars().count() as f32, 20.0)
    }

    fn texture_size(&self, texture: TextureId) -> (u32, u32) {
        self.textures.get(&texture).copied().unwrap_or((0, 0))
    }
}

/// Shared renderer handle so tests can inspect calls after handing the
/// renderer to a manager.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedRenderer(pub Rc<RefCell<RecordingRenderer>>);

impl SharedRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<DrawCall> {
        self.0.borrow().calls.clone()
    }
}

impl Renderer for SharedRenderer {
    fn viewport(&self) -> Rect {
        self.0.borrow().viewport()
    }

    fn begin_batch(&mut self) {
        self.0.borrow_mut().begin_batch();
    }

    fn end_batch(&mut self) {
        self.0.borrow_mut().end_batch();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.0.borrow_mut().fill_rect(rect, color);
    }

    fn draw_texture(&mut self, texture: TextureId, params: &DrawParams) {
        self.0.borrow_mut().draw_texture(texture, params);
    }

    fn draw_text(&mut self, font: FontId, text: &str, position: Vec2, color: Color, scale: f32) {
        self.0.borrow_mut().draw_text(font, text, position, color, scale);
    }

    fn measure_text(&self, font: FontId, text: &str) -> Vec2 {
        self.0.borrow().measure_text(font, text)
    }

    fn texture_size(&self, texture: TextureId) -> (u32, u32) {
        self.0.borrow().texture_size(texture)
    }
}

//=== ScriptedScreen ======================================================

pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

pub(crate) fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Screen that records `label:hook` entries and replays queued commands.
pub(crate) struct ScriptedScreen {
    pub base: ScreenBase,
    pub label: String,
    pub accepts_input: bool,
    pub journal: Journal,
    pub on_update: Vec<StackCommand>,
    pub on_input: Vec<StackCommand>,
    pub input_error: Option<ScreenError>,
    pub parent: Option<ScreenId>,
}

impl ScriptedScreen {
    pub(crate) fn new(label: &str) -> Self {
        Self::journaled(label, journal())
    }

    pub(crate) fn journaled(label: &str, journal: Journal) -> Self {
        Self {
            base: ScreenBase::new(),
            label: label.to_owned(),
            accepts_input: true,
            journal,
            on_update: Vec::new(),
            on_input: Vec::new(),
            input_error: None,
            parent: None,
        }
    }

    pub(crate) fn with_base(mut self, base: ScreenBase) -> Self {
        self.base = base;
        self
    }

    pub(crate) fn without_input(mut self) -> Self {
        self.accepts_input = false;
        self
    }

    fn note(&self, hook: &str) {
        self.journal.borrow_mut().push(format!("{}:{}", self.label, hook));
    }
}

impl Screen for ScriptedScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn accepts_input(&self) -> bool {
        self.accepts_input
    }

    fn initialize_screen(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.note("init");
    }

    fn load_content(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.note("load");
    }

    fn unload_content(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.note("unload");
    }

    fn update_screen(&mut self, ctx: &mut ScreenContext<'_>, _elapsed: Duration) {
        self.note("update");
        for command in self.on_update.drain(..) {
            ctx.queue(command);
        }
    }

    fn draw_screen(&mut self, renderer: &mut dyn Renderer, _elapsed: Duration) {
        renderer.draw_text(FontId(0), &self.label, Vec2::ZERO, Color::WHITE, 1.0);
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        self.note("input");
        for command in self.on_input.drain(..) {
            ctx.queue(command);
        }
        match self.input_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn on_transition(&mut self, notice: TransitionNotice, _ctx: &mut ScreenContext<'_>) {
        let hook = match notice {
            TransitionNotice::Entering(_) => "entering",
            TransitionNotice::Exiting(_) => "exiting",
            TransitionNotice::Removed => "removed",
        };
        self.note(hook);
    }

    fn attach_parent(&mut self, parent: ScreenId) {
        self.parent = Some(parent);
    }

    fn name(&self) -> &str {
        &self.label
    }
}
