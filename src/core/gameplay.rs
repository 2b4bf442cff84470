//=========================================================================
// Gameplay Objects
//=========================================================================
//
// Sprites that follow a physics body and can fade out before dying.
//
// Lifecycle:
// ```text
//   Active ──die()──> Dying (die time set) ──percent ≥ 1──> Dead
//      └─────die()──> Dead  (no die time)
// ```
//
// The physics engine itself is not part of this crate: anything that can
// report a body position in simulation units implements `PhysicsBody`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::math::{Color, Vec2};
use crate::core::render::{DrawParams, Renderer, TextureId};

//=== PhysicsBody =========================================================

/// A simulated body, positioned in simulation units (metres).
pub trait PhysicsBody {
    fn position(&self) -> Vec2;
}

//=== UnitConverter =======================================================

/// Converts between simulation metres and display pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    pixels_per_meter: f32,
}

impl UnitConverter {
    pub const DEFAULT_PIXELS_PER_METER: f32 = 100.0;

    /// # Panics
    ///
    /// Panics if `pixels_per_meter` is not a positive finite number.
    pub fn new(pixels_per_meter: f32) -> Self {
        assert!(
            pixels_per_meter.is_finite() && pixels_per_meter > 0.0,
            "Pixels per meter must be positive, got {}",
            pixels_per_meter
        );
        Self { pixels_per_meter }
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn to_display(&self, sim: Vec2) -> Vec2 {
        sim * self.pixels_per_meter
    }

    pub fn to_sim(&self, display: Vec2) -> Vec2 {
        display * (1.0 / self.pixels_per_meter)
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PIXELS_PER_METER)
    }
}

//=== ObjectStatus ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectStatus {
    Active,
    Dying,
    Dead,
}

//=== GameplayObject ======================================================

pub struct GameplayObject {
    texture: Option<TextureId>,
    body: Option<Box<dyn PhysicsBody>>,
    units: UnitConverter,
    status: ObjectStatus,
    color: Color,
    alpha: f32,
    position: Vec2,
    rotation: f32,
    die_time: Duration,
    die_percent: f32,
}

impl GameplayObject {
    pub fn new() -> Self {
        Self {
            texture: None,
            body: None,
            units: UnitConverter::default(),
            status: ObjectStatus::Active,
            color: Color::WHITE,
            alpha: 1.0,
            position: Vec2::ZERO,
            rotation: 0.0,
            die_time: Duration::ZERO,
            die_percent: 0.0,
        }
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Makes the object follow `body`, converted with `units`.
    pub fn with_body(mut self, body: Box<dyn PhysicsBody>, units: UnitConverter) -> Self {
        self.body = Some(body);
        self.units = units;
        self
    }

    /// Fade-out length used by [`die`](Self::die); zero dies instantly.
    pub fn with_die_time(mut self, die_time: Duration) -> Self {
        self.die_time = die_time;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn status(&self) -> ObjectStatus {
        self.status
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Tint scaled by alpha.
    pub fn color(&self) -> Color {
        self.color.scaled(self.alpha)
    }

    pub fn die_percent(&self) -> f32 {
        self.die_percent
    }

    //--- Lifecycle --------------------------------------------------------

    /// Brings the object back to Active so a dead object can be reused.
    pub fn initialize(&mut self) {
        self.status = ObjectStatus::Active;
        self.die_percent = 0.0;
    }

    /// Starts dying. Only Active objects react.
    pub fn die(&mut self) {
        if self.status == ObjectStatus::Active {
            self.status = if self.die_time.is_zero() { ObjectStatus::Dead } else { ObjectStatus::Dying };
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        match self.status {
            ObjectStatus::Active => self.sync_body(),
            ObjectStatus::Dying => {
                if self.die_percent >= 1.0 {
                    self.status = ObjectStatus::Dead;
                } else {
                    self.die_percent += elapsed.as_secs_f32() / self.die_time.as_secs_f32();
                }
                self.sync_body();
            }
            ObjectStatus::Dead => {}
        }
    }

    /// Draws the texture centred on the object's position.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let Some(texture) = self.texture else {
            return;
        };

        let (w, h) = renderer.texture_size(texture);
        let origin = Vec2::new(w as f32 / 2.0, h as f32 / 2.0);
        let params = DrawParams::at(self.position)
            .with_color(self.color())
            .with_rotation(self.rotation, origin);
        renderer.draw_texture(texture, &params);
    }

    fn sync_body(&mut self) {
        if let Some(body) = &self.body {
            self.position = self.units.to_display(body.position());
        }
    }
}

impl Default for GameplayObject {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
