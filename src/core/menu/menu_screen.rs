//=========================================================================
// Menu Screen
//=========================================================================
//
// A screen holding a list of entries and a single selection cursor.
//
// Navigation:
// ```text
//   "previous" / "next"  → move cursor with wraparound
//   mouse (if visible)   → hover retargets cursor, last entry wins
//   "select"             → entry callback, or open its sub-menu
//   "cancel"             → exit the menu
// ```
//
// Opening a sub-menu freezes this menu and hides its cursor. When the
// sub-menu leaves the stack it thaws its parent again.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use super::{EntryState, MenuEntry, MouseCursor};
use crate::core::error::ScreenError;
use crate::core::input::{GamepadButton, InputMap, KeyCode, MouseButton};
use crate::core::math::{Color, Rect, Vec2};
use crate::core::render::{DrawParams, FontId, Renderer, TextureId};
use crate::core::screen::{Screen, ScreenBase, ScreenContext, ScreenId, TransitionNotice};

//=== Actions =============================================================

pub const ACTION_PREVIOUS: &str = "previous";
pub const ACTION_NEXT: &str = "next";
pub const ACTION_SELECT: &str = "select";
pub const ACTION_CANCEL: &str = "cancel";

//=== MenuPalette =========================================================

/// Entry colours per state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPalette {
    pub normal: Color,
    pub highlighted: Color,
    pub selected: Color,
}

impl Default for MenuPalette {
    fn default() -> Self {
        Self {
            normal: Color::WHITE,
            highlighted: Color::rgb(1.0, 1.0, 0.0),
            selected: Color::rgb(1.0, 0.65, 0.0),
        }
    }
}

//=== DescriptionBox ======================================================

/// Area where the highlighted entry's description is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptionBox {
    pub area: Rect,
    pub padding: (i32, i32),
    pub texture: Option<TextureId>,
    pub color: Color,
}

impl DescriptionBox {
    pub fn new(area: Rect) -> Self {
        Self { area, padding: (0, 0), texture: None, color: Color::WHITE }
    }

    pub fn with_padding(mut self, left: i32, top: i32) -> Self {
        self.padding = (left, top);
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

//=== MenuScreen ==========================================================

pub type CancelHandler = Box<dyn FnMut(&mut ScreenContext<'_>)>;

pub struct MenuScreen {
    base: ScreenBase,
    entries: Vec<MenuEntry>,
    cursor: usize,
    parent: Option<ScreenId>,
    mouse: MouseCursor,
    mouse_position: Vec2,
    font: Option<FontId>,
    palette: MenuPalette,
    background: Option<(TextureId, Vec2)>,
    description_box: Option<DescriptionBox>,
    on_cancel: Option<CancelHandler>,
}

impl MenuScreen {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::with_base(ScreenBase::new())
    }

    pub fn with_base(base: ScreenBase) -> Self {
        Self {
            base,
            entries: Vec::new(),
            cursor: 0,
            parent: None,
            mouse: MouseCursor::new(),
            mouse_position: Vec2::ZERO,
            font: None,
            palette: MenuPalette::default(),
            background: None,
            description_box: None,
            on_cancel: None,
        }
    }

    pub fn with_entry(mut self, entry: MenuEntry) -> Self {
        self.add_entry(entry);
        self
    }

    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_palette(mut self, palette: MenuPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_background(mut self, texture: TextureId, position: Vec2) -> Self {
        self.background = Some((texture, position));
        self
    }

    pub fn with_description_box(mut self, description_box: DescriptionBox) -> Self {
        self.description_box = Some(description_box);
        self
    }

    /// Enables the mouse cursor; `None` keeps hit-testing with a 1×1 cursor.
    pub fn with_mouse(mut self, texture: Option<TextureId>) -> Self {
        self.mouse.enable(texture);
        self
    }

    pub fn on_cancel<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.on_cancel = Some(Box::new(handler));
        self
    }

    pub fn add_entry(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }

    /// Binds the navigation actions that are not bound yet.
    pub fn install_default_bindings(&mut self) {
        install_defaults(self.base.input_map_mut());
    }

    //--- Queries ----------------------------------------------------------

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [MenuEntry] {
        &mut self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<&MenuEntry> {
        self.entries.get(self.cursor)
    }

    pub fn parent(&self) -> Option<ScreenId> {
        self.parent
    }

    pub fn mouse(&self) -> &MouseCursor {
        &self.mouse
    }

    pub fn palette(&self) -> &MenuPalette {
        &self.palette
    }

    //--- Navigation -------------------------------------------------------

    pub fn select_previous(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.set_cursor((self.cursor + count - 1) % count);
        }
    }

    pub fn select_next(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.set_cursor((self.cursor + 1) % count);
        }
    }

    /// Moves the highlight to `index`; out-of-range indices are ignored.
    pub fn set_cursor(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if let Some(old) = self.entries.get_mut(self.cursor) {
            old.normal(&self.palette);
        }
        self.cursor = index;
        self.entries[index].highlight(&self.palette);
    }

    /// Exits the menu and notifies the cancel handler.
    pub fn menu_cancel(&mut self, ctx: &mut ScreenContext<'_>) {
        self.base.exit_screen();
        if let Some(handler) = self.on_cancel.as_mut() {
            handler(ctx);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_highlight(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.entries.iter().any(|e| e.state() == EntryState::Highlight) {
            return;
        }
        self.cursor = self.cursor.min(self.entries.len() - 1);
        self.entries[self.cursor].highlight(&self.palette);
    }

    fn hover(&mut self, ctx: &ScreenContext<'_>) {
        self.mouse_position = ctx.input().mouse_position();
        let size = self.mouse.texture().map_or((0, 0), |t| ctx.texture_size(t));
        let pointer = self.mouse.bounds(self.mouse_position, size);

        if let Some(index) = self.entries.iter().rposition(|e| e.bounds().intersects(&pointer)) {
            if index != self.cursor {
                self.set_cursor(index);
            }
        }
    }

    fn select_entry(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        let palette = self.palette;
        let entry = self.entries.get_mut(self.cursor).ok_or(ScreenError::EmptyMenu)?;

        let Some(sub_menu) = entry.select(&palette, ctx) else {
            return Ok(());
        };

        let me = ctx.id();
        debug!("Menu {} opening sub-menu {}", me, sub_menu);

        ctx.activate_screen(sub_menu);
        ctx.attach_parent(sub_menu, me);
        ctx.add_screen(sub_menu);
        ctx.enable_mouse(sub_menu, self.mouse.texture());

        self.base.freeze_screen();
        self.mouse.hide();
        Ok(())
    }
}

impl Default for MenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

//=== Screen ==============================================================

impl Screen for MenuScreen {
    fn base(&self) -> &ScreenBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ScreenBase {
        &mut self.base
    }

    fn accepts_input(&self) -> bool {
        true
    }

    fn initialize_screen(&mut self, _ctx: &mut ScreenContext<'_>) {
        self.install_default_bindings();
    }

    fn update_screen(&mut self, ctx: &mut ScreenContext<'_>, elapsed: Duration) {
        self.mouse_position = ctx.input().mouse_position();
        self.ensure_highlight();

        let cursor = self.cursor;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.update_layout(ctx, self.font);
            entry.animate(index == cursor, elapsed);
        }
    }

    fn handle_input(&mut self, ctx: &mut ScreenContext<'_>) -> Result<(), ScreenError> {
        let map = self.base.input_map();
        let input = ctx.input();
        let previous = map.new_action_press(ACTION_PREVIOUS, input)?;
        let next = map.new_action_press(ACTION_NEXT, input)?;
        let select = map.new_action_press(ACTION_SELECT, input)?;
        let cancel = map.new_action_press(ACTION_CANCEL, input)?;

        if previous {
            self.select_previous();
        }
        if next {
            self.select_next();
        }
        if self.mouse.is_visible() {
            self.hover(ctx);
        }
        if select {
            self.select_entry(ctx)?;
        }
        if cancel {
            self.menu_cancel(ctx);
        }
        Ok(())
    }

    fn on_transition(&mut self, notice: TransitionNotice, ctx: &mut ScreenContext<'_>) {
        if let (TransitionNotice::Removed, Some(parent)) = (notice, self.parent) {
            ctx.thaw_screen(parent);
        }
    }

    fn attach_parent(&mut self, parent: ScreenId) {
        self.parent = Some(parent);
    }

    fn mouse_mut(&mut self) -> Option<&mut MouseCursor> {
        Some(&mut self.mouse)
    }

    fn draw_screen(&mut self, renderer: &mut dyn Renderer, _elapsed: Duration) {
        if let Some((texture, position)) = self.background {
            renderer.draw_texture(texture, &DrawParams::at(position));
        }

        for (index, entry) in self.entries.iter().enumerate() {
            entry.draw(renderer, self.font, index == self.cursor);
        }

        if let (Some(description), Some(font), Some(entry)) =
            (self.description_box, self.font, self.entries.get(self.cursor))
        {
            if let Some(texture) = description.texture {
                let corner = Vec2::new(description.area.x as f32, description.area.y as f32);
                renderer.draw_texture(texture, &DrawParams::at(corner));
            }
            entry.draw_description(renderer, font, description.area, description.padding, description.color);
        }

        if self.mouse.is_visible() {
            if let Some(texture) = self.mouse.texture() {
                renderer.draw_texture(texture, &DrawParams::at(self.mouse_position));
            }
        }
    }
}

//--- Default Bindings ----------------------------------------------------

fn install_defaults(map: &mut InputMap) {
    if !map.contains(ACTION_PREVIOUS) {
        map.new_action(ACTION_PREVIOUS, KeyCode::ArrowUp);
        map.new_action(ACTION_PREVIOUS, GamepadButton::DPadUp);
    }
    if !map.contains(ACTION_NEXT) {
        map.new_action(ACTION_NEXT, KeyCode::ArrowDown);
        map.new_action(ACTION_NEXT, GamepadButton::DPadDown);
    }
    if !map.contains(ACTION_SELECT) {
        map.new_action(ACTION_SELECT, KeyCode::Enter);
        map.new_action(ACTION_SELECT, GamepadButton::A);
        map.new_action(ACTION_SELECT, MouseButton::Left);
    }
    if !map.contains(ACTION_CANCEL) {
        map.new_action(ACTION_CANCEL, KeyCode::Escape);
        map.new_action(ACTION_CANCEL, GamepadButton::B);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{DeviceState, InputEvent, InputSnapshot};
    use crate::core::screen::{CommandQueue, ScreenManager, ScreenState};
    use crate::core::testing::{DrawCall, RecordingRenderer, SharedRenderer};
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    fn menu(titles: &[&str]) -> MenuScreen {
        let mut menu = MenuScreen::new().with_font(FontId(0));
        for title in titles {
            menu.add_entry(MenuEntry::new(*title));
        }
        menu.install_default_bindings();
        menu
    }

    fn run_update(menu: &mut MenuScreen, renderer: &RecordingRenderer, input: &InputSnapshot) {
        let mut queue = CommandQueue::new();
        let mut ctx = ScreenContext::new(ScreenId::from_raw(1), input, renderer, &mut queue);
        menu.update_screen(&mut ctx, FRAME);
    }

    fn run_input(
        menu: &mut MenuScreen,
        renderer: &RecordingRenderer,
        input: &InputSnapshot,
    ) -> (Result<(), ScreenError>, CommandQueue) {
        let mut queue = CommandQueue::new();
        let result = {
            let mut ctx = ScreenContext::new(ScreenId::from_raw(1), input, renderer, &mut queue);
            menu.handle_input(&mut ctx)
        };
        (result, queue)
    }

    fn pressing(key: KeyCode) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        input.push_frame(DeviceState::new().with_key(key));
        input
    }

    fn highlighted_count(menu: &MenuScreen) -> usize {
        menu.entries().iter().filter(|e| e.state() == EntryState::Highlight).count()
    }

    #[test]
    fn update_highlights_cursor_entry() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&["Play", "Options", "Quit"]);

        run_update(&mut menu, &renderer, &InputSnapshot::new());
        assert_eq!(highlighted_count(&menu), 1);
        assert_eq!(menu.entries()[0].state(), EntryState::Highlight);
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&["A", "B", "C"]);
        run_update(&mut menu, &renderer, &InputSnapshot::new());

        let (result, _) = run_input(&mut menu, &renderer, &pressing(KeyCode::ArrowUp));
        assert_eq!(result, Ok(()));
        assert_eq!(menu.cursor(), 2);

        let (result, _) = run_input(&mut menu, &renderer, &pressing(KeyCode::ArrowDown));
        assert_eq!(result, Ok(()));
        assert_eq!(menu.cursor(), 0);
        assert_eq!(highlighted_count(&menu), 1);
    }

    #[test]
    fn held_key_moves_cursor_once() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&["A", "B", "C"]);
        run_update(&mut menu, &renderer, &InputSnapshot::new());

        let mut input = pressing(KeyCode::ArrowDown);
        let _ = run_input(&mut menu, &renderer, &input);
        input.refresh();
        let _ = run_input(&mut menu, &renderer, &input);

        assert_eq!(menu.cursor(), 1);
    }

    #[test]
    fn unbound_actions_are_reported() {
        let renderer = RecordingRenderer::new();
        let mut menu = MenuScreen::new().with_entry(MenuEntry::new("A"));

        let (result, _) = run_input(&mut menu, &renderer, &InputSnapshot::new());
        assert_eq!(result, Err(ScreenError::UnknownAction(ACTION_PREVIOUS.into())));
    }

    #[test]
    fn custom_bindings_survive_defaults() {
        let mut menu = MenuScreen::new();
        menu.base_mut().input_map_mut().new_action(ACTION_SELECT, KeyCode::Space);
        menu.install_default_bindings();

        let binds = menu.base().input_map().keybinds(ACTION_SELECT).map(|b| b.len());
        assert_eq!(binds, Ok(1));
        assert!(menu.base().input_map().contains(ACTION_CANCEL));
    }

    #[test]
    fn select_on_empty_menu_fails() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&[]);

        let (result, _) = run_input(&mut menu, &renderer, &pressing(KeyCode::Enter));
        assert_eq!(result, Err(ScreenError::EmptyMenu));
    }

    #[test]
    fn select_runs_entry_callback() {
        let renderer = RecordingRenderer::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let mut menu = menu(&[]).with_entry(MenuEntry::new("Go").on_select(move |_| flag.set(true)));
        run_update(&mut menu, &renderer, &InputSnapshot::new());

        let (result, queue) = run_input(&mut menu, &renderer, &pressing(KeyCode::Enter));
        assert_eq!(result, Ok(()));
        assert!(fired.get());
        assert!(queue.is_empty());
        assert_eq!(menu.base().state(), ScreenState::TransitionOn);
    }

    #[test]
    fn cancel_exits_and_notifies() {
        let renderer = RecordingRenderer::new();
        let cancelled = Rc::new(Cell::new(0));
        let counter = cancelled.clone();
        let mut menu = menu(&["A"]).on_cancel(move |_| counter.set(counter.get() + 1));

        let (result, _) = run_input(&mut menu, &renderer, &pressing(KeyCode::Escape));
        assert_eq!(result, Ok(()));
        assert_eq!(menu.base().state(), ScreenState::TransitionOff);
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn hover_picks_last_overlapping_entry() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&[]).with_mouse(None);
        menu.add_entry(MenuEntry::new("First").with_position(Vec2::new(0.0, 0.0)));
        menu.add_entry(MenuEntry::new("Second").with_position(Vec2::new(0.0, 10.0)));
        menu.add_entry(MenuEntry::new("Far").with_position(Vec2::new(0.0, 200.0)));
        run_update(&mut menu, &renderer, &InputSnapshot::new());

        let mut input = InputSnapshot::new();
        input.push_frame(DeviceState::new().with_mouse_position(Vec2::new(5.0, 15.0)));
        let (result, _) = run_input(&mut menu, &renderer, &input);

        assert_eq!(result, Ok(()));
        assert_eq!(menu.cursor(), 1);
        assert_eq!(highlighted_count(&menu), 1);
    }

    #[test]
    fn hidden_mouse_does_not_hover() {
        let renderer = RecordingRenderer::new();
        let mut menu = menu(&["A", "B"]);
        menu.entries_mut()[1].set_position(Vec2::new(0.0, 100.0), true);
        run_update(&mut menu, &renderer, &InputSnapshot::new());

        let mut input = InputSnapshot::new();
        input.push_frame(DeviceState::new().with_mouse_position(Vec2::new(5.0, 105.0)));
        let _ = run_input(&mut menu, &renderer, &input);

        assert_eq!(menu.cursor(), 0);
    }

    #[test]
    fn mouse_cursor_is_drawn_last() {
        let mut renderer = RecordingRenderer::new();
        let mut menu = menu(&["A"]).with_mouse(Some(TextureId(9)));
        menu.draw_screen(&mut renderer, FRAME);

        assert_eq!(renderer.texts(), vec!["A"]);
        let last = renderer.calls.last().cloned();
        assert_eq!(last, Some(DrawCall::Texture(TextureId(9), DrawParams::at(Vec2::ZERO))));
    }

    #[test]
    fn sub_menu_freezes_parent_until_removed() {
        let renderer = SharedRenderer::default();
        let mut manager = ScreenManager::new(renderer.clone());

        let child = manager.register(MenuScreen::new().with_entry(MenuEntry::new("Back")));
        let parent = manager
            .push(
                MenuScreen::new()
                    .with_mouse(Some(TextureId(4)))
                    .with_entry(MenuEntry::new("Options").with_sub_menu(child)),
            )
            .unwrap();
        manager.start().unwrap();

        manager.update(FRAME).unwrap();
        manager.input_mut().process_events(&[InputEvent::KeyDown(KeyCode::Enter)]);
        manager.update(FRAME).unwrap();

        assert_eq!(manager.stack(), &[parent, child]);
        assert_eq!(manager.state(parent), Some(ScreenState::Frozen));
        assert_eq!(manager.state(child), Some(ScreenState::Active));

        let parent_menu = manager.screen::<MenuScreen>(parent).unwrap();
        assert!(!parent_menu.mouse().is_visible());
        let child_menu = manager.screen::<MenuScreen>(child).unwrap();
        assert_eq!(child_menu.parent(), Some(parent));
        assert!(child_menu.mouse().is_visible());
        assert_eq!(child_menu.mouse().texture(), Some(TextureId(4)));

        manager.input_mut().process_events(&[
            InputEvent::KeyUp(KeyCode::Enter),
            InputEvent::KeyDown(KeyCode::Escape),
        ]);
        manager.update(FRAME).unwrap();
        assert_eq!(manager.state(child), Some(ScreenState::TransitionOff));

        manager.update(FRAME).unwrap();
        assert_eq!(manager.stack(), &[parent]);
        assert_eq!(manager.state(parent), Some(ScreenState::Active));
        assert!(manager.screen::<MenuScreen>(parent).unwrap().mouse().is_visible());
    }

    #[test]
    fn sub_menu_fades_out_over_its_off_time() {
        let mut manager = ScreenManager::new(SharedRenderer::default());

        let fade = Duration::from_millis(160);
        let child = manager.register(
            MenuScreen::with_base(ScreenBase::new().with_transition_times(fade, fade))
                .with_entry(MenuEntry::new("Back")),
        );
        let parent = manager
            .push(MenuScreen::new().with_entry(MenuEntry::new("Options").with_sub_menu(child)))
            .unwrap();
        manager.start().unwrap();

        manager.input_mut().process_events(&[InputEvent::KeyDown(KeyCode::Enter)]);
        manager.update(FRAME).unwrap();
        assert_eq!(manager.state(child), Some(ScreenState::Active));
        let percent = manager.screen::<MenuScreen>(child).unwrap().base().transition().percent();
        assert_eq!(percent, 1.0);

        manager.input_mut().process_events(&[
            InputEvent::KeyUp(KeyCode::Enter),
            InputEvent::KeyDown(KeyCode::Escape),
        ]);
        manager.update(FRAME).unwrap();
        manager.input_mut().process_events(&[InputEvent::KeyUp(KeyCode::Escape)]);
        manager.update(FRAME).unwrap();

        assert_eq!(manager.stack(), &[parent, child]);
        assert_eq!(manager.state(child), Some(ScreenState::TransitionOff));
        let percent = manager.screen::<MenuScreen>(child).unwrap().base().transition().percent();
        assert!((percent - 0.9).abs() < 1e-3, "unexpected percent {}", percent);

        for _ in 0..10 {
            manager.update(FRAME).unwrap();
        }
        assert_eq!(manager.stack(), &[parent]);
        assert_eq!(manager.state(parent), Some(ScreenState::Active));
    }

    #[test]
    fn sub_menu_can_be_reopened() {
        let renderer = SharedRenderer::default();
        let mut manager = ScreenManager::new(renderer);

        let child = manager.register(MenuScreen::new().with_entry(MenuEntry::new("Back")));
        let parent = manager
            .push(MenuScreen::new().with_entry(MenuEntry::new("Options").with_sub_menu(child)))
            .unwrap();
        manager.start().unwrap();

        for _ in 0..2 {
            manager.input_mut().process_events(&[InputEvent::KeyDown(KeyCode::Enter)]);
            manager.update(FRAME).unwrap();
            manager.input_mut().process_events(&[
                InputEvent::KeyUp(KeyCode::Enter),
                InputEvent::KeyDown(KeyCode::Escape),
            ]);
            manager.update(FRAME).unwrap();
            manager.input_mut().process_events(&[InputEvent::KeyUp(KeyCode::Escape)]);
            manager.update(FRAME).unwrap();

            assert_eq!(manager.stack(), &[parent]);
            assert_eq!(manager.state(parent), Some(ScreenState::Active));
        }
    }
}
