//=========================================================================
// Render Contract
//=========================================================================
//
// The narrow drawing surface screens talk to.
//
// The crate never owns a GPU context: the host provides a `Renderer`
// implementation and the screen manager hands it to screens at draw time.
// Metric queries (`measure_text`, `texture_size`, `viewport`) are also
// available to update hooks through `ScreenContext`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::math::{Color, Rect, Vec2};

//=== Asset Handles =======================================================

/// Opaque handle to a texture owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque handle to a sprite font owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

//=== DrawParams ==========================================================

/// Placement of a single textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub position: Vec2,
    /// Sub-region of the texture, `None` draws the whole texture.
    pub source: Option<Rect>,
    pub color: Color,
    /// Rotation in radians around `origin`.
    pub rotation: f32,
    pub origin: Vec2,
    pub scale: f32,
}

impl DrawParams {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            source: None,
            color: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn with_source(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, rotation: f32, origin: Vec2) -> Self {
        self.rotation = rotation;
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

//=== Renderer ============================================================

/// Host-provided 2D drawing backend.
///
/// Every screen draw is bracketed by exactly one `begin_batch` /
/// `end_batch` pair.
pub trait Renderer {
    /// Full drawable area in display pixels.
    fn viewport(&self) -> Rect;

    fn begin_batch(&mut self);

    fn end_batch(&mut self);

    /// Fills a rectangle with a (pre-multiplied) colour.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_texture(&mut self, texture: TextureId, params: &DrawParams);

    fn draw_text(&mut self, font: FontId, text: &str, position: Vec2, color: Color, scale: f32);

    /// Size in pixels of `text` rendered with `font` at scale 1.
    fn measure_text(&self, font: FontId, text: &str) -> Vec2;

    /// Size in pixels of a texture, `(0, 0)` if unknown.
    fn texture_size(&self, texture: TextureId) -> (u32, u32);
}

//=== NullRenderer ========================================================

/// Renderer that draws nothing and reports a fixed viewport.
///
/// Used when the engine runs without a host drawing backend.
#[derive(Debug, Clone, Copy)]
pub struct NullRenderer {
    viewport: Rect,
}

impl NullRenderer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            viewport: Rect::new(0, 0, width, height),
        }
    }
}

impl Renderer for NullRenderer {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn begin_batch(&mut self) {}

    fn end_batch(&mut self) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_texture(&mut self, _texture: TextureId, _params: &DrawParams) {}

    fn draw_text(&mut self, _font: FontId, _text: &str, _position: Vec2, _color: Color, _scale: f32) {}

    fn measure_text(&self, _font: FontId, _text: &str) -> Vec2 {
        Vec2::ZERO
    }

    fn texture_size(&self, _texture: TextureId) -> (u32, u32) {
        (0, 0)
    }
}
