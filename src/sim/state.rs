//! Game state and core simulation types
//!
//! `World` owns every entity; `Session` holds the per-game bookkeeping that
//! is reset when a new game starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::object::GameObject;
use super::pool::Pool;
use super::rect::Rect;
use crate::consts::*;

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every block destroyed
    Won,
    /// Out of lives
    Lost,
}

/// Something that happened during a tick, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BlockDestroyed { index: usize, by_laser: bool },
    GemReleased { slot: usize },
    /// Gem pool was full when a release was due
    GemPoolExhausted,
    GemCaught { slot: usize },
    GemMissed { slot: usize },
    PowerUpReleased { block: usize },
    PowerUpCaught,
    PowerUpMissed,
    LaserFired { slot: usize },
    LaserMissed { slot: usize },
    SpeedUp { game_speed: f32 },
    PaddleBounce { velocity: Vec2 },
    LifeLost { lives: u32 },
}

/// Screen-derived geometry and speeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Playfield background
    pub field: Rect,
    pub paddle_size: Vec2,
    pub ball_size: Vec2,
    pub block_size: Vec2,
    /// Top-left corner of block 0
    pub grid_origin: Vec2,
    pub gem_size: Vec2,
    pub power_up_size: Vec2,
    pub laser_size: Vec2,
    pub heart: Rect,
    /// Pixels per second at unit velocity
    pub paddle_speed: f32,
    pub ball_speed: f32,
    pub fall_speed: f32,
}

impl Layout {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let field_height = screen_height * GAMEPLAY_HEIGHT;
        let field_width = field_height * GAMEPLAY_ASPECT;
        let field = Rect::new(
            (screen_width - field_width) * 0.5,
            screen_height * GAMEPLAY_TOP,
            field_width,
            field_height,
        );
        let heart_size = screen_height * 0.04;

        Self {
            screen_width,
            screen_height,
            field,
            paddle_size: Vec2::new(field_height * 0.15, field_height * 0.03),
            ball_size: Vec2::splat(field_height * 0.03),
            block_size: Vec2::new(field_width * 0.066, field_height * 0.035),
            grid_origin: Vec2::new(
                (screen_width - field_width) * 0.506,
                field.y + field_height * 0.06,
            ),
            gem_size: Vec2::splat(field_height * 0.035),
            power_up_size: Vec2::splat(field_height * 0.035),
            laser_size: Vec2::new(field_height * 0.01, field_height * 0.035),
            heart: Rect::new(field.x, screen_height * 0.05, heart_size, heart_size),
            paddle_speed: screen_height * PADDLE_SPEED,
            ball_speed: screen_height * BALL_SPEED,
            fall_speed: screen_height * FALL_SPEED,
        }
    }

    /// Bounds of block `index` in the 15-column grid
    pub fn block_rect(&self, index: usize) -> Rect {
        let row = (index / BLOCK_COLUMNS) as f32;
        let col = (index % BLOCK_COLUMNS) as f32;
        Rect::new(
            self.grid_origin.x + col * self.block_size.x,
            self.grid_origin.y + row * self.block_size.y,
            self.block_size.x,
            self.block_size.y,
        )
    }

    /// Paddle resting on the playfield bottom, horizontally centred
    pub fn paddle_start(&self) -> Rect {
        Rect::new(
            self.field.center_x() - self.paddle_size.x * 0.5,
            self.field.bottom() - self.paddle_size.y,
            self.paddle_size.x,
            self.paddle_size.y,
        )
    }
}

/// Per-game bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    /// Ball speed multiplier
    pub game_speed: f32,
    /// Blocks destroyed this game
    pub hits: u32,
    /// Laser firing armed
    pub power_up_active: bool,
    /// Shots fired since the power-up was caught
    pub power_up_shots: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            game_speed: 1.0,
            hits: 0,
            power_up_active: false,
            power_up_shots: 0,
        }
    }

    /// Score with the remaining-lives bonus applied
    pub fn final_score(&self) -> u32 {
        self.score + self.lives * LIFE_BONUS
    }

    /// Balls in reserve, as shown next to the heart icon
    pub fn spare_lives(&self) -> u32 {
        self.lives.saturating_sub(1)
    }

    /// Laser firing is armed and shots remain
    pub fn can_fire(&self) -> bool {
        self.power_up_active && (self.power_up_shots as usize) < MAX_LASERS
    }
}

/// Every entity in the game, preallocated
#[derive(Debug)]
pub struct World {
    pub layout: Layout,
    /// Playfield background
    pub field: GameObject,
    pub paddle: GameObject,
    pub ball: GameObject,
    pub blocks: Vec<GameObject>,
    pub gems: Pool,
    pub lasers: Pool,
    pub power_up: GameObject,
    pub heart: GameObject,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn new(layout: Layout) -> Self {
        let mut world = Self {
            layout,
            field: GameObject::new(layout.field),
            paddle: GameObject::new(layout.paddle_start()),
            ball: GameObject::new(Rect::new(0.0, 0.0, layout.ball_size.x, layout.ball_size.y)),
            blocks: (0..MAX_BLOCKS)
                .map(|i| GameObject::new(layout.block_rect(i)))
                .collect(),
            gems: Pool::new(MAX_GEMS, layout.gem_size.x, layout.gem_size.y),
            lasers: Pool::new(MAX_LASERS, layout.laser_size.x, layout.laser_size.y),
            power_up: GameObject::hidden(layout.power_up_size.x, layout.power_up_size.y),
            heart: GameObject::new(layout.heart),
            events: Vec::new(),
        };
        world.serve_ball();
        world
    }

    /// Lay out the block grid and return every pooled object for a fresh game
    pub fn reset(&mut self) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.bounds = self.layout.block_rect(i);
            block.set_visible(true);
        }
        self.gems.release_all();
        self.lasers.release_all();
        self.power_up.reset();
        self.paddle.set_velocity(0.0, 0.0);
        self.serve_ball();
        self.events.clear();
    }

    /// Place the ball on top of the paddle's centre, heading straight up
    pub fn serve_ball(&mut self) {
        let paddle = self.paddle.bounds;
        let field = self.layout.field;
        let ball = &mut self.ball;
        let x = paddle.center_x() - ball.bounds.width * 0.5;
        let y = field.bottom() - (paddle.height + ball.bounds.height);
        ball.bounds.set_position(x, y);
        ball.set_velocity(0.0, -1.0);
    }

    /// Fire a laser from the paddle's centre if the session allows it.
    ///
    /// Returns the laser slot, or `None` if firing is not armed, the shot
    /// budget is spent, or every laser is in flight.
    pub fn fire_laser(&mut self, session: &mut Session) -> Option<usize> {
        if !session.can_fire() {
            return None;
        }
        let slot = self.lasers.acquire()?;
        let paddle = self.paddle.bounds;
        let field = self.layout.field;
        if let Some(laser) = self.lasers.get_mut(slot) {
            let x = paddle.center_x() - laser.bounds.width * 0.5;
            laser.bounds.set_position(x, field.bottom() - paddle.height);
            laser.set_velocity(0.0, LASER_RISE);
        }
        session.power_up_shots += 1;
        self.events.push(GameEvent::LaserFired { slot });
        Some(slot)
    }

    /// Blocks still standing
    pub fn blocks_remaining(&self) -> usize {
        self.blocks.iter().filter(|b| b.visible()).count()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(Layout::new(1280.0, 720.0))
    }

    #[test]
    fn test_layout_playfield() {
        let layout = Layout::new(1280.0, 720.0);
        assert!((layout.field.height - 576.0).abs() < 1e-3);
        assert!((layout.field.width - 720.0).abs() < 1e-3);
        assert!((layout.field.x - 280.0).abs() < 1e-3);
        assert!((layout.field.y - 64.8).abs() < 1e-3);
    }

    #[test]
    fn test_block_grid_shape() {
        let layout = Layout::new(1280.0, 720.0);
        let first = layout.block_rect(0);
        let row_end = layout.block_rect(14);
        let next_row = layout.block_rect(15);
        assert_eq!(first.y, row_end.y);
        assert!((next_row.x - first.x).abs() < 1e-3);
        assert!((next_row.y - (first.y + layout.block_size.y)).abs() < 1e-3);
        // Grid stays inside the playfield
        let last = layout.block_rect(MAX_BLOCKS - 1);
        assert!(last.right() <= layout.field.right());
        assert!(first.left() >= layout.field.left());
    }

    #[test]
    fn test_new_world() {
        let w = world();
        assert_eq!(w.blocks.len(), MAX_BLOCKS);
        assert_eq!(w.blocks_remaining(), MAX_BLOCKS);
        assert_eq!(w.gems.capacity(), MAX_GEMS);
        assert_eq!(w.lasers.capacity(), MAX_LASERS);
        assert_eq!(w.gems.active_count(), 0);
        assert!(!w.power_up.visible());
    }

    #[test]
    fn test_serve_ball_centred_on_paddle() {
        let mut w = world();
        w.paddle.bounds.x = 400.0;
        w.ball.set_velocity(0.5, 0.5);
        w.serve_ball();
        assert!((w.ball.bounds.center_x() - w.paddle.bounds.center_x()).abs() < 1e-3);
        assert!((w.ball.bounds.bottom() - w.paddle.bounds.top()).abs() < 1e-3);
        assert_eq!(w.ball.velocity(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_fire_laser_requires_power_up() {
        let mut w = world();
        let mut s = Session::new();
        assert_eq!(w.fire_laser(&mut s), None);

        s.power_up_active = true;
        let slot = w.fire_laser(&mut s).unwrap();
        assert_eq!(s.power_up_shots, 1);
        let laser = w.lasers.get(slot).unwrap();
        assert!(laser.visible());
        assert_eq!(laser.velocity(), Vec2::new(0.0, -1.0));
        assert!((laser.bounds.center_x() - w.paddle.bounds.center_x()).abs() < 1e-3);
    }

    #[test]
    fn test_fire_laser_shot_budget() {
        let mut w = world();
        let mut s = Session::new();
        s.power_up_active = true;
        for _ in 0..MAX_LASERS {
            assert!(w.fire_laser(&mut s).is_some());
        }
        assert_eq!(w.fire_laser(&mut s), None);
        assert_eq!(s.power_up_shots as usize, MAX_LASERS);
    }

    #[test]
    fn test_reset_restores_blocks_and_pools() {
        let mut w = world();
        let mut s = Session::new();
        s.power_up_active = true;
        w.fire_laser(&mut s);
        w.gems.acquire();
        w.blocks[3].set_visible(false);
        w.power_up.set_visible(true);

        w.reset();
        assert_eq!(w.blocks_remaining(), MAX_BLOCKS);
        assert_eq!(w.lasers.active_count(), 0);
        assert_eq!(w.gems.active_count(), 0);
        assert!(!w.power_up.visible());
        assert!(w.events.is_empty());
    }

    #[test]
    fn test_session_final_score() {
        let mut s = Session::new();
        s.score = 120;
        assert_eq!(s.final_score(), 120 + 4 * 500);
        assert_eq!(s.spare_lives(), 3);
        s.lives = 0;
        assert_eq!(s.final_score(), 120);
        assert_eq!(s.spare_lives(), 0);
    }
}
