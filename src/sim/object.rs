//! Uniform entity type for paddle, ball, blocks, gems, lasers, power-up,
//! heart icon and the playfield background.
//!
//! Objects are created once and reused: they are shown, hidden and moved,
//! never destroyed mid-game.

use glam::Vec2;

use super::rect::Rect;
use crate::error::AssetError;
use crate::render::{Renderer, SpriteHandle};

/// A game entity
#[derive(Debug, Default)]
pub struct GameObject {
    /// Owned renderable, if one has been attached
    sprite: Option<SpriteHandle>,
    /// Bounding box in screen coordinates
    pub bounds: Rect,
    velocity: Vec2,
    visible: bool,
}

impl GameObject {
    /// A visible object with the given bounds and no sprite
    pub fn new(bounds: Rect) -> Self {
        Self {
            sprite: None,
            bounds,
            velocity: Vec2::ZERO,
            visible: true,
        }
    }

    /// A hidden object with the given size, parked at the origin
    pub fn hidden(width: f32, height: f32) -> Self {
        Self {
            visible: false,
            ..Self::new(Rect::new(0.0, 0.0, width, height))
        }
    }

    /// Load a sprite for `texture`, replacing any sprite already held.
    ///
    /// The previous sprite is released before loading; on failure the object
    /// is left without a sprite.
    pub fn attach_sprite<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        texture: &str,
    ) -> Result<(), AssetError> {
        self.detach_sprite();
        self.sprite = Some(renderer.load_sprite(texture)?);
        Ok(())
    }

    /// Release the sprite, if any. Safe to call repeatedly.
    pub fn detach_sprite(&mut self) {
        self.sprite = None;
    }

    pub fn sprite(&self) -> Option<&SpriteHandle> {
        self.sprite.as_ref()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = Vec2::new(x, y);
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Hide, stop and park at the origin
    pub fn reset(&mut self) {
        self.bounds.set_position(0.0, 0.0);
        self.visible = false;
        self.velocity = Vec2::ZERO;
    }

    /// Place the object horizontally centred on `source`, top aligned with it
    pub fn drop_from(&mut self, source: &Rect) {
        let x = source.center_x() - self.bounds.width * 0.5;
        self.bounds.set_position(x, source.y);
    }
}
