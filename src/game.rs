//! Screen state machine
//!
//! `Game` owns the world, the running session and the high-score table, and
//! routes input to whichever screen is active. Only `Screen::Playing` runs
//! the simulation.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::highscores::{DEFAULT_INITIALS, HighScoreTable};
use crate::input::{ClickEvent, Command, KeyEvent, map_key};
use crate::render::{self, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, Layout, Outcome, Session, TickInput, World, tick};

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MenuOption {
    #[default]
    Play,
    HighScores,
    Quit,
}

impl MenuOption {
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Play => "PLAY",
            MenuOption::HighScores => "HIGH SCORES",
            MenuOption::Quit => "QUIT",
        }
    }

    /// Entry above, wrapping to the bottom
    pub fn prev(self) -> Self {
        match self {
            MenuOption::Play => MenuOption::Quit,
            MenuOption::HighScores => MenuOption::Play,
            MenuOption::Quit => MenuOption::HighScores,
        }
    }

    /// Entry below, wrapping to the top
    pub fn next(self) -> Self {
        match self {
            MenuOption::Play => MenuOption::HighScores,
            MenuOption::HighScores => MenuOption::Quit,
            MenuOption::Quit => MenuOption::Play,
        }
    }
}

/// Active screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    MainMenu {
        selected: MenuOption,
    },
    /// Simulation running
    Playing,
    /// Out of lives
    LostGame,
    /// Every block destroyed
    WonGame,
    /// Editing initials for a freshly ranked score
    EnterHighScore {
        slot: usize,
        initials: [u8; 3],
        /// Letter being edited, 0..=2
        cursor: usize,
    },
    ShowHighScores,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::MainMenu {
            selected: MenuOption::Play,
        }
    }
}

/// Whether the caller should keep running the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// The whole game
#[derive(Debug)]
pub struct Game {
    screen: Screen,
    world: World,
    session: Session,
    table: HighScoreTable,
    settings: Settings,
    /// Final score of the last game, waiting to be ranked on confirm
    pending_score: Option<u32>,
}

impl Game {
    /// Create the game, loading the high-score table from disk
    pub fn new(settings: Settings) -> Self {
        let table = HighScoreTable::load(&settings.high_score_path);
        Self::with_table(settings, table)
    }

    /// Create the game with an already loaded table
    pub fn with_table(settings: Settings, table: HighScoreTable) -> Self {
        let layout = Layout::new(settings.screen_width, settings.screen_height);
        Self {
            screen: Screen::default(),
            world: World::new(layout),
            session: Session::new(),
            table,
            settings,
            pending_score: None,
        }
    }

    /// Set the window up and load every sprite
    pub fn init<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), AssetError> {
        renderer.set_window_title(&self.settings.window_title);
        render::attach_sprites(&mut self.world, renderer)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pending_score(&self) -> Option<u32> {
        self.pending_score
    }

    /// Reset the world and session and start playing
    pub fn new_game(&mut self) {
        self.world.reset();
        self.session = Session::new();
        self.pending_score = None;
        self.screen = Screen::Playing;
        log::info!("New game started");
    }

    /// Advance the active screen by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.screen != Screen::Playing {
            return;
        }

        let input = TickInput {
            autopilot: self.settings.autopilot,
        };
        let outcome = tick(&mut self.world, &mut self.session, &input, dt);

        for event in self.world.drain_events() {
            log_event(&event);
        }

        if let Some(outcome) = outcome {
            self.finish_game(outcome);
        }
    }

    fn finish_game(&mut self, outcome: Outcome) {
        let final_score = self.session.final_score();
        self.pending_score = Some(final_score);
        self.world.paddle.set_velocity(0.0, 0.0);
        self.screen = match outcome {
            Outcome::Won => Screen::WonGame,
            Outcome::Lost => Screen::LostGame,
        };
        log::info!(
            "Game over ({:?}): score {} + {} lives, final {}",
            outcome,
            self.session.score,
            self.session.lives,
            final_score
        );
    }

    /// Route a raw key event
    pub fn handle_key(&mut self, event: KeyEvent) -> Control {
        match map_key(event) {
            Some(command) => self.apply(command),
            None => Control::Continue,
        }
    }

    /// Clicks only report the cursor position
    pub fn handle_click(&mut self, click: ClickEvent) {
        log::debug!("Click {} at ({}, {})", click.button, click.x, click.y);
    }

    /// Apply a command to the active screen
    pub fn apply(&mut self, command: Command) -> Control {
        match command {
            Command::Exit => {
                log::info!("Exit requested");
                return Control::Exit;
            }
            Command::Confirm => return self.confirm(),
            Command::SteerPaddle(dir) => {
                if self.screen == Screen::Playing {
                    self.world.paddle.set_velocity(dir, 0.0);
                }
            }
            Command::StopPaddle => {
                if self.screen == Screen::Playing {
                    self.world.paddle.set_velocity(0.0, 0.0);
                }
            }
            Command::FireLaser => {
                if self.screen == Screen::Playing {
                    self.world.fire_laser(&mut self.session);
                }
            }
            Command::Up | Command::Down | Command::Left | Command::Right => self.navigate(command),
        }
        Control::Continue
    }

    fn navigate(&mut self, command: Command) {
        match &mut self.screen {
            Screen::MainMenu { selected } => match command {
                Command::Up => *selected = selected.prev(),
                Command::Down => *selected = selected.next(),
                _ => {}
            },
            Screen::EnterHighScore {
                initials, cursor, ..
            } => match command {
                Command::Up => initials[*cursor] = next_letter(initials[*cursor]),
                Command::Down => initials[*cursor] = prev_letter(initials[*cursor]),
                Command::Left => *cursor = (*cursor + 2) % 3,
                Command::Right => *cursor = (*cursor + 1) % 3,
                _ => {}
            },
            _ => {}
        }
    }

    fn confirm(&mut self) -> Control {
        match &self.screen {
            Screen::MainMenu { selected } => match selected {
                MenuOption::Play => self.new_game(),
                MenuOption::HighScores => self.screen = Screen::ShowHighScores,
                MenuOption::Quit => {
                    log::info!("Quit selected");
                    return Control::Exit;
                }
            },
            Screen::LostGame | Screen::WonGame | Screen::ShowHighScores => {
                let slot = self
                    .pending_score
                    .take()
                    .and_then(|score| self.table.submit(score));
                self.screen = match slot {
                    Some(slot) => {
                        log::info!("New high score in slot {}", slot + 1);
                        Screen::EnterHighScore {
                            slot,
                            initials: default_initials(),
                            cursor: 0,
                        }
                    }
                    None => Screen::default(),
                };
            }
            Screen::EnterHighScore { slot, initials, .. } => {
                let text: String = initials.iter().map(|&b| char::from(b)).collect();
                if let Err(e) =
                    self.table
                        .commit_initials(*slot, &text, &self.settings.high_score_path)
                {
                    log::warn!("{e}");
                }
                self.screen = Screen::default();
            }
            Screen::Playing => {}
        }
        Control::Continue
    }
}

fn default_initials() -> [u8; 3] {
    let mut out = [b'A'; 3];
    for (dst, src) in out.iter_mut().zip(DEFAULT_INITIALS.bytes()) {
        *dst = src;
    }
    out
}

fn next_letter(c: u8) -> u8 {
    if c >= b'Z' { b'A' } else { c + 1 }
}

fn prev_letter(c: u8) -> u8 {
    if c <= b'A' { b'Z' } else { c - 1 }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LifeLost { lives } => log::info!("Ball lost, {} lives left", lives),
        GameEvent::SpeedUp { game_speed } => log::info!("Ball speed x{:.1}", game_speed),
        GameEvent::PowerUpCaught => log::info!("Laser power-up armed"),
        other => log::debug!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::input::{Key, KeyAction};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "brick_breaker_game_{}_{}.txt",
            name,
            std::process::id()
        ))
    }

    fn game() -> Game {
        let settings = Settings {
            autopilot: false,
            high_score_path: temp_path("unused"),
            ..Default::default()
        };
        Game::with_table(settings, HighScoreTable::new())
    }

    fn press(game: &mut Game, key: Key) -> Control {
        game.handle_key(KeyEvent::released(key))
    }

    /// Put the ball beside the paddle, below its top, so the next tick loses it
    fn lose_ball(game: &mut Game) {
        let paddle = game.world.paddle.bounds;
        let field = game.world.layout.field;
        game.world.paddle.bounds.x = field.right() - paddle.width;
        let ball = &mut game.world.ball;
        ball.bounds.set_position(field.x + 10.0, paddle.y + 2.0);
        ball.set_velocity(0.0, 1.0);
    }

    #[test]
    fn test_starts_on_main_menu() {
        let game = game();
        assert_eq!(
            game.screen(),
            &Screen::MainMenu {
                selected: MenuOption::Play
            }
        );
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut game = game();
        press(&mut game, Key::Up);
        assert_eq!(
            game.screen(),
            &Screen::MainMenu {
                selected: MenuOption::Quit
            }
        );
        press(&mut game, Key::Down);
        press(&mut game, Key::Down);
        assert_eq!(
            game.screen(),
            &Screen::MainMenu {
                selected: MenuOption::HighScores
            }
        );
    }

    #[test]
    fn test_quit_and_escape_exit() {
        let mut game = game();
        assert_eq!(
            game.handle_key(KeyEvent::new(Key::Escape, KeyAction::Pressed)),
            Control::Exit
        );
        press(&mut game, Key::Up);
        assert_eq!(press(&mut game, Key::Enter), Control::Exit);
    }

    #[test]
    fn test_play_starts_fresh_game() {
        let mut game = game();
        game.session.score = 999;
        game.session.lives = 1;
        press(&mut game, Key::Enter);
        assert_eq!(game.screen(), &Screen::Playing);
        assert_eq!(game.session().score, 0);
        assert_eq!(game.session().lives, START_LIVES);
        assert_eq!(game.world().blocks_remaining(), MAX_BLOCKS);
    }

    #[test]
    fn test_paddle_keys_only_while_playing() {
        let mut game = game();
        game.handle_key(KeyEvent::pressed(Key::S));
        assert_eq!(game.world().paddle.velocity().x, 0.0);

        press(&mut game, Key::Enter);
        game.handle_key(KeyEvent::pressed(Key::S));
        assert_eq!(game.world().paddle.velocity().x, 1.0);
        game.handle_key(KeyEvent::new(Key::A, KeyAction::Repeated));
        assert_eq!(game.world().paddle.velocity().x, -1.0);
        game.handle_key(KeyEvent::released(Key::A));
        assert_eq!(game.world().paddle.velocity().x, 0.0);
    }

    #[test]
    fn test_default_settings_leave_paddle_to_player() {
        let mut game = Game::with_table(Settings::default(), HighScoreTable::new());
        press(&mut game, Key::Enter);
        let start = game.world().paddle.bounds.x;
        game.handle_key(KeyEvent::pressed(Key::S));
        game.update(1.0 / 60.0);
        assert_eq!(game.world().paddle.velocity().x, 1.0);
        assert!(game.world().paddle.bounds.x > start);
    }

    #[test]
    fn test_space_fires_only_with_power_up() {
        let mut game = game();
        press(&mut game, Key::Enter);
        game.handle_key(KeyEvent::pressed(Key::Space));
        assert_eq!(game.world().lasers.active_count(), 0);

        game.session.power_up_active = true;
        game.handle_key(KeyEvent::pressed(Key::Space));
        assert_eq!(game.world().lasers.active_count(), 1);
        assert_eq!(game.session().power_up_shots, 1);
    }

    #[test]
    fn test_menus_do_not_simulate() {
        let mut game = game();
        let before = game.world().ball.bounds;
        game.update(0.5);
        assert_eq!(game.world().ball.bounds, before);
    }

    #[test]
    fn test_losing_last_life_ends_game() {
        let mut game = game();
        press(&mut game, Key::Enter);
        game.session.lives = 1;
        game.session.score = 40;
        lose_ball(&mut game);
        game.update(1.0 / 60.0);

        assert_eq!(game.screen(), &Screen::LostGame);
        assert_eq!(game.session().lives, 0);
        assert_eq!(game.pending_score(), Some(40));
    }

    #[test]
    fn test_losing_a_life_keeps_playing() {
        let mut game = game();
        press(&mut game, Key::Enter);
        lose_ball(&mut game);
        game.update(1.0 / 60.0);
        assert_eq!(game.screen(), &Screen::Playing);
        assert_eq!(game.session().lives, START_LIVES - 1);
    }

    #[test]
    fn test_clearing_blocks_wins_with_life_bonus() {
        let mut game = game();
        press(&mut game, Key::Enter);
        game.session.hits = MAX_BLOCKS as u32;
        game.session.score = 750;
        game.update(1.0 / 60.0);

        assert_eq!(game.screen(), &Screen::WonGame);
        assert_eq!(game.pending_score(), Some(750 + START_LIVES * LIFE_BONUS));
    }

    #[test]
    fn test_qualifying_score_enters_initials() {
        let mut game = game();
        press(&mut game, Key::Enter);
        game.session.hits = MAX_BLOCKS as u32;
        game.update(1.0 / 60.0);
        press(&mut game, Key::Enter);

        assert_eq!(
            game.screen(),
            &Screen::EnterHighScore {
                slot: 0,
                initials: *b"AAA",
                cursor: 0
            }
        );
        assert_eq!(game.table().top_score(), START_LIVES * LIFE_BONUS);
        assert_eq!(game.pending_score(), None);
    }

    #[test]
    fn test_non_qualifying_score_returns_to_menu() {
        let mut game = game();
        for _ in 0..NUM_HIGH_SCORES {
            game.table.submit(1_000_000);
        }
        press(&mut game, Key::Enter);
        game.session.lives = 1;
        lose_ball(&mut game);
        game.update(1.0 / 60.0);
        assert_eq!(game.screen(), &Screen::LostGame);

        press(&mut game, Key::Enter);
        assert_eq!(game.screen(), &Screen::default());
    }

    #[test]
    fn test_show_high_scores_without_pending_score() {
        let mut game = game();
        press(&mut game, Key::Down);
        press(&mut game, Key::Enter);
        assert_eq!(game.screen(), &Screen::ShowHighScores);
        press(&mut game, Key::Enter);
        assert_eq!(game.screen(), &Screen::default());
        assert_eq!(game.table(), &HighScoreTable::new());
    }

    #[test]
    fn test_initials_editing() {
        let mut game = game();
        game.screen = Screen::EnterHighScore {
            slot: 0,
            initials: *b"AAA",
            cursor: 0,
        };
        press(&mut game, Key::Down);
        game.handle_key(KeyEvent::pressed(Key::Right));
        press(&mut game, Key::Up);
        press(&mut game, Key::Up);
        game.handle_key(KeyEvent::pressed(Key::Left));
        game.handle_key(KeyEvent::pressed(Key::Left));
        press(&mut game, Key::Up);

        assert_eq!(
            game.screen(),
            &Screen::EnterHighScore {
                slot: 0,
                initials: *b"ZCB",
                cursor: 2
            }
        );
    }

    #[test]
    fn test_commit_initials_persists() {
        let path = temp_path("commit");
        let mut game = Game::with_table(
            Settings {
                autopilot: false,
                high_score_path: path.clone(),
                ..Default::default()
            },
            HighScoreTable::new(),
        );
        game.pending_score = Some(1234);
        game.screen = Screen::WonGame;
        press(&mut game, Key::Enter);
        press(&mut game, Key::Up);
        press(&mut game, Key::Enter);

        assert_eq!(game.screen(), &Screen::default());
        let saved = HighScoreTable::load(&path);
        assert_eq!(saved.get(0).unwrap().initials, "BAA");
        assert_eq!(saved.get(0).unwrap().score, 1234);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_letter_wrap() {
        assert_eq!(next_letter(b'Z'), b'A');
        assert_eq!(prev_letter(b'A'), b'Z');
        assert_eq!(next_letter(b'M'), b'N');
    }

    #[test]
    fn test_autopilot_game_runs() {
        let mut game = Game::with_table(
            Settings {
                autopilot: true,
                high_score_path: temp_path("autopilot"),
                ..Default::default()
            },
            HighScoreTable::new(),
        );
        press(&mut game, Key::Enter);
        for _ in 0..600 {
            game.update(1.0 / 60.0);
        }
        assert!(game.session().hits > 0);
    }
}
