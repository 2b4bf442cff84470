//=========================================================================
// Menu Entry
//=========================================================================
//
// One selectable item of a menu.
//
// An entry owns its display data (title, description, optional texture
// or two-region sprite sheet), its motion (default and current position
// for animation) and its state. It may reference a sub-menu by id: the
// sub-menu lives in the screen manager, not inside the entry.
//
// The bounding rectangle is recomputed on every menu update from the
// texture size or the measured title.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::MenuPalette;
use crate::core::math::{Color, Rect, Vec2};
use crate::core::render::{DrawParams, FontId, Renderer, TextureId};
use crate::core::screen::{ScreenContext, ScreenId};

//=== Types ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryState {
    Normal,
    Highlight,
    Selected,
}

/// Texture an entry is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryGraphic {
    /// The whole texture.
    Image(TextureId),
    /// One texture holding both looks of the entry.
    Sheet { texture: TextureId, selected: Rect, normal: Rect },
}

impl EntryGraphic {
    fn texture(&self) -> TextureId {
        match *self {
            EntryGraphic::Image(texture) | EntryGraphic::Sheet { texture, .. } => texture,
        }
    }
}

/// Position and appearance values an animator may drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryMotion {
    pub default_position: Vec2,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub scale: f32,
    pub opacity: f32,
}

impl Default for EntryMotion {
    fn default() -> Self {
        Self {
            default_position: Vec2::ZERO,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Called every menu update with the entry's motion and whether the
/// entry is the highlighted one.
pub type EntryAnimator = Box<dyn FnMut(&mut EntryMotion, bool, Duration)>;

/// Called when the entry is selected.
pub type SelectHandler = Box<dyn FnMut(&mut ScreenContext<'_>)>;

//=== MenuEntry ===========================================================

pub struct MenuEntry {
    title: String,
    description: String,
    graphic: Option<EntryGraphic>,
    padding: (i32, i32),
    motion: EntryMotion,
    bounds: Rect,
    graphic_size: (u32, u32),
    state: EntryState,
    color: Color,
    sub_menu: Option<ScreenId>,
    on_select: Option<SelectHandler>,
    animator: Option<EntryAnimator>,
}

impl MenuEntry {
    //--- Construction -----------------------------------------------------

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            graphic: None,
            padding: (0, 0),
            motion: EntryMotion::default(),
            bounds: Rect::default(),
            graphic_size: (0, 0),
            state: EntryState::Normal,
            color: Color::WHITE,
            sub_menu: None,
            on_select: None,
            animator: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.graphic = Some(EntryGraphic::Image(texture));
        self
    }

    /// Uses one region of `texture` while highlighted and another otherwise.
    pub fn with_sheet(mut self, texture: TextureId, selected: Rect, normal: Rect) -> Self {
        self.graphic = Some(EntryGraphic::Sheet { texture, selected, normal });
        self
    }

    /// Title offset inside the texture; `0` on an axis centres the title.
    pub fn with_padding(mut self, left: i32, top: i32) -> Self {
        self.padding = (left, top);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position, true);
        self
    }

    /// Selecting the entry opens `menu`.
    pub fn with_sub_menu(mut self, menu: ScreenId) -> Self {
        self.sub_menu = Some(menu);
        self
    }

    pub fn on_select<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut ScreenContext<'_>) + 'static,
    {
        self.on_select = Some(Box::new(handler));
        self
    }

    pub fn with_animator<F>(mut self, animator: F) -> Self
    where
        F: FnMut(&mut EntryMotion, bool, Duration) + 'static,
    {
        self.animator = Some(Box::new(animator));
        self
    }

    //--- Positioning ------------------------------------------------------

    /// Moves the entry; with `set_default` the default position follows.
    pub fn set_position(&mut self, position: Vec2, set_default: bool) {
        if set_default {
            self.motion.default_position = position;
        }
        self.motion.position = position;
    }

    pub fn set_positions(&mut self, default_position: Vec2, position: Vec2) {
        self.motion.default_position = default_position;
        self.motion.position = position;
    }

    /// Places the entry at `offset` from `anchor`, below its texture when
    /// the anchor has one.
    pub fn set_relative_position(&mut self, offset: Vec2, anchor: &MenuEntry, set_default: bool) {
        let below = Vec2::new(0.0, anchor.graphic_height());
        self.set_position(anchor.motion.position + below + offset, set_default);
    }

    //--- Queries ----------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn graphic(&self) -> Option<EntryGraphic> {
        self.graphic
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Hit rectangle computed by the last layout pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn default_position(&self) -> Vec2 {
        self.motion.default_position
    }

    pub fn motion(&self) -> &EntryMotion {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut EntryMotion {
        &mut self.motion
    }

    pub fn sub_menu(&self) -> Option<ScreenId> {
        self.sub_menu
    }

    pub fn has_sub_menu(&self) -> bool {
        self.sub_menu.is_some()
    }

    //--- State Changes ----------------------------------------------------

    pub(crate) fn highlight(&mut self, palette: &MenuPalette) {
        self.state = EntryState::Highlight;
        self.color = palette.highlighted;
    }

    pub(crate) fn normal(&mut self, palette: &MenuPalette) {
        self.state = EntryState::Normal;
        self.color = palette.normal;
    }

    /// Runs the select handler and returns the sub-menu to open, if any.
    ///
    /// The entry only becomes Selected when selecting it does something.
    pub(crate) fn select(&mut self, palette: &MenuPalette, ctx: &mut ScreenContext<'_>) -> Option<ScreenId> {
        if self.sub_menu.is_some() || self.on_select.is_some() {
            self.state = EntryState::Selected;
            self.color = palette.selected;
        }

        if let Some(handler) = self.on_select.as_mut() {
            handler(ctx);
        }

        self.sub_menu
    }

    //--- Frame ------------------------------------------------------------

    /// Recomputes the bounding rectangle from texture or text metrics.
    pub(crate) fn update_layout(&mut self, ctx: &ScreenContext<'_>, font: Option<FontId>) {
        let (width, height) = match self.graphic {
            Some(EntryGraphic::Sheet { normal, .. }) => {
                self.graphic_size = (normal.width.max(0) as u32, normal.height.max(0) as u32);
                (normal.width, normal.height)
            }
            Some(EntryGraphic::Image(texture)) => {
                self.graphic_size = ctx.texture_size(texture);
                (self.graphic_size.0 as i32, self.graphic_size.1 as i32)
            }
            None => match font {
                Some(font) => {
                    let size = ctx.measure_text(font, &self.title);
                    (size.x as i32, size.y as i32)
                }
                None => (0, 0),
            },
        };

        self.bounds = Rect::at(self.motion.position, width, height);
    }

    pub(crate) fn animate(&mut self, highlighted: bool, elapsed: Duration) {
        if let Some(animator) = self.animator.as_mut() {
            animator(&mut self.motion, highlighted, elapsed);
        }
    }

    pub(crate) fn draw(&self, renderer: &mut dyn Renderer, font: Option<FontId>, highlighted: bool) {
        let opacity = self.motion.opacity;
        let position = self.motion.position;

        let Some(graphic) = self.graphic else {
            if let Some(font) = font.filter(|_| !self.title.is_empty()) {
                renderer.draw_text(font, &self.title, position, self.color.scaled(opacity), self.motion.scale);
            }
            return;
        };

        let mut params = DrawParams::at(position).with_color(Color::WHITE.scaled(opacity));
        if let EntryGraphic::Sheet { selected, normal, .. } = graphic {
            params = params.with_source(if highlighted { selected } else { normal });
        }
        renderer.draw_texture(graphic.texture(), &params);

        if let Some(font) = font.filter(|_| !self.title.is_empty()) {
            let text = renderer.measure_text(font, &self.title);
            let (tex_w, tex_h) = (self.graphic_size.0 as f32, self.graphic_size.1 as f32);
            let x = if self.padding.0 == 0 { tex_w / 2.0 - text.x / 2.0 } else { self.padding.0 as f32 };
            let y = if self.padding.1 == 0 { tex_h / 2.0 - text.y / 2.0 } else { self.padding.1 as f32 };
            renderer.draw_text(font, &self.title, position + Vec2::new(x, y), self.color.scaled(opacity), 1.0);
        }
    }

    pub(crate) fn draw_description(
        &self,
        renderer: &mut dyn Renderer,
        font: FontId,
        area: Rect,
        padding: (i32, i32),
        color: Color,
    ) {
        if self.description.is_empty() {
            return;
        }
        let position = Vec2::new((area.x + padding.0) as f32, (area.y + padding.1) as f32);
        renderer.draw_text(font, &self.description, position, color, self.motion.scale);
    }

    //--- Internal Helpers -------------------------------------------------

    fn graphic_height(&self) -> f32 {
        if self.graphic.is_some() {
            self.graphic_size.1 as f32
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuEntry")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("sub_menu", &self.sub_menu)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
