//! Brick Breaker - native entry point
//!
//! Runs the game headless: the autopilot plays one full game, drives the
//! menus through high-score entry, then quits from the main menu.

#[cfg(not(target_arch = "wasm32"))]
use brick_breaker::{
    Control, Game, Screen, Settings,
    input::{Key, KeyEvent},
    render::{self, HeadlessRenderer},
};

#[cfg(not(target_arch = "wasm32"))]
const SETTINGS_FILE: &str = "brick_breaker.json";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    // Nobody is at the keyboard, so the paddle always steers itself
    let settings = Settings {
        autopilot: true,
        ..Settings::load(std::path::Path::new(SETTINGS_FILE))
    };
    let mut renderer = HeadlessRenderer::new(settings.asset_root.clone());
    let mut game = Game::new(settings);

    if let Err(e) = game.init(&mut renderer) {
        log::error!("{e}");
        std::process::exit(1);
    }
    log::info!("Window: {}", renderer.title());

    let frames = run(&mut game, &mut renderer);

    log::info!(
        "Stopped after {} frames ({} sprite draws, {} text draws)",
        frames,
        renderer.sprite_draws,
        renderer.text_draws
    );
    log::info!("Top score: {}", game.table().top_score());
}

/// Drive the loop until the game exits or the frame budget runs out.
/// Returns the number of frames simulated.
#[cfg(not(target_arch = "wasm32"))]
fn run(game: &mut Game, renderer: &mut HeadlessRenderer) -> u32 {
    let dt = game.settings().frame_delta();
    let limit = game.settings().demo_frames;
    let mut games_played = 0;
    let mut frame = 0;

    while limit == 0 || frame < limit {
        frame += 1;

        let keys: &[Key] = match game.screen() {
            Screen::MainMenu { .. } if games_played == 0 => &[Key::Enter],
            // Play -> Quit
            Screen::MainMenu { .. } => &[Key::Up, Key::Enter],
            Screen::LostGame | Screen::WonGame => {
                games_played += 1;
                &[Key::Enter]
            }
            Screen::EnterHighScore { .. } | Screen::ShowHighScores => &[Key::Enter],
            Screen::Playing => &[],
        };
        for &key in keys {
            if game.handle_key(KeyEvent::released(key)) == Control::Exit {
                return frame;
            }
        }

        game.update(dt);
        render::draw(game, renderer);
    }
    frame
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is usable from a host page directly
}
