//! Brick Breaker - a classic breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (AABB collisions, entities, session state)
//! - `game`: Screen state machine (menus, play, game over, high-score entry)
//! - `highscores`: Top-10 table with flat-file persistence
//! - `input`: Raw key/click events mapped to game commands
//! - `render`: Render collaborator contract and per-screen draw dispatch
//! - `settings`: Configuration loaded from JSON

pub mod error;
pub mod game;
pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{AssetError, StoreError};
pub use game::{Control, Game, Screen};
pub use highscores::{HighScoreTable, ScoreEntry};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Block grid
    pub const MAX_BLOCKS: usize = 150;
    pub const BLOCK_COLUMNS: usize = 15;
    /// Block indices that drop the laser power-up when destroyed
    pub const POWER_UP_BLOCKS: [usize; 6] = [32, 42, 80, 84, 106, 118];

    /// Pool sizes
    pub const MAX_GEMS: usize = 3;
    pub const MAX_LASERS: usize = 10;

    /// High-score table length
    pub const NUM_HIGH_SCORES: usize = 10;

    /// Lives at the start of a game (the HUD shows one less as spare balls)
    pub const START_LIVES: u32 = 4;
    /// Points per destroyed block
    pub const BLOCK_POINTS: u32 = 5;
    /// Points per caught gem
    pub const GEM_POINTS: u32 = 100;
    /// Bonus per remaining life when the game ends
    pub const LIFE_BONUS: u32 = 500;

    /// Every Nth destroyed block releases a gem
    pub const GEM_RELEASE_INTERVAL: u32 = 5;
    /// Every Nth destroyed block speeds the ball up
    pub const SPEED_UP_INTERVAL: u32 = 25;
    /// Ball speed multiplier step
    pub const SPEED_UP_STEP: f32 = 0.1;

    /// Playfield height as a fraction of the screen height
    pub const GAMEPLAY_HEIGHT: f32 = 0.8;
    /// Playfield width as a multiple of its height
    pub const GAMEPLAY_ASPECT: f32 = 1.25;
    /// Playfield top as a fraction of the screen height
    pub const GAMEPLAY_TOP: f32 = 0.09;

    /// Speeds, as fractions of the screen height per second
    pub const PADDLE_SPEED: f32 = 0.45;
    pub const BALL_SPEED: f32 = 0.5;
    pub const FALL_SPEED: f32 = 0.45;

    /// Vertical velocity components of falling/rising objects
    pub const GEM_FALL: f32 = 0.5;
    pub const POWER_UP_FALL: f32 = 0.45;
    pub const LASER_RISE: f32 = -1.0;

    /// Horizontal fraction of a block the ball must overlap for a top/bottom hit
    pub const BLOCK_HIT_TOLERANCE: f32 = 0.9;
}
