//! Rendering
//!
//! The game never talks to a graphics API directly. A `Renderer` loads
//! sprites and draws sprites and text; this module decides what each screen
//! puts on it.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::POWER_UP_BLOCKS;
use crate::error::AssetError;
use crate::game::{Game, MenuOption, Screen};
use crate::sim::{GameObject, Rect, World};

macro_rules! texture {
    ($name:literal) => {
        concat!("Resources/Textures/puzzlepack/png/", $name)
    };
}

/// Sprite textures
pub mod textures {
    pub const BACKGROUND: &str = texture!("background.png");
    pub const BALL: &str = texture!("ballBlue.png");
    pub const PADDLE: &str = texture!("paddleBlue.png");
    pub const HEART: &str = texture!("heart.png");
    pub const POWER_UP_BLOCK: &str = texture!("element_purple_rectangle.png");
    pub const EVEN_BLOCK: &str = texture!("element_red_rectangle.png");
    pub const ODD_BLOCK: &str = texture!("element_blue_rectangle.png");
    pub const GEM: &str = texture!("element_grey_polygon.png");
    pub const POWER_UP: &str = texture!("element_purple_polygon.png");
    pub const LASER: &str = texture!("element_red_square.png");
}

/// Texture for block `index`: power-up carriers stand out, the rest alternate
pub fn block_texture(index: usize) -> &'static str {
    if POWER_UP_BLOCKS.contains(&index) {
        textures::POWER_UP_BLOCK
    } else if index % 2 == 0 {
        textures::EVEN_BLOCK
    } else {
        textures::ODD_BLOCK
    }
}

/// Named colours used by the screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Colour {
    MidnightBlue,
    DarkOrange,
    WhiteSmoke,
    GhostWhite,
    Black,
}

/// An owned sprite created by a `Renderer`. Dropping it releases the sprite.
#[derive(Debug, PartialEq, Eq)]
pub struct SpriteHandle {
    id: u64,
    texture: String,
}

impl SpriteHandle {
    pub fn new(id: u64, texture: impl Into<String>) -> Self {
        Self {
            id,
            texture: texture.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn texture(&self) -> &str {
        &self.texture
    }
}

/// Render collaborator
pub trait Renderer {
    /// Create a sprite from a texture reference
    fn load_sprite(&mut self, texture: &str) -> Result<SpriteHandle, AssetError>;
    fn set_clear_colour(&mut self, colour: Colour);
    fn set_window_title(&mut self, title: &str);
    /// Draw a sprite stretched over `bounds`
    fn draw_sprite(&mut self, sprite: &SpriteHandle, bounds: Rect);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, scale: f32, colour: Colour);
}

/// Attach a sprite to every object in the world
pub fn attach_sprites<R: Renderer + ?Sized>(
    world: &mut World,
    renderer: &mut R,
) -> Result<(), AssetError> {
    world.field.attach_sprite(renderer, textures::BACKGROUND)?;
    world.ball.attach_sprite(renderer, textures::BALL)?;
    world.paddle.attach_sprite(renderer, textures::PADDLE)?;
    world.heart.attach_sprite(renderer, textures::HEART)?;
    for (i, block) in world.blocks.iter_mut().enumerate() {
        block.attach_sprite(renderer, block_texture(i))?;
    }
    for gem in world.gems.iter_mut() {
        gem.attach_sprite(renderer, textures::GEM)?;
    }
    world.power_up.attach_sprite(renderer, textures::POWER_UP)?;
    for laser in world.lasers.iter_mut() {
        laser.attach_sprite(renderer, textures::LASER)?;
    }
    log::info!("Loaded sprites for {} blocks", world.blocks.len());
    Ok(())
}

/// Draw the current screen
pub fn draw<R: Renderer + ?Sized>(game: &Game, renderer: &mut R) {
    let (w, h) = (game.settings().screen_width, game.settings().screen_height);
    match game.screen() {
        Screen::MainMenu { selected } => draw_main_menu(renderer, *selected, w, h),
        Screen::Playing => draw_in_game(renderer, game, w, h),
        Screen::LostGame => draw_game_over(
            renderer,
            "GAME OVER out of lives \n Press Enter to return to main menu.",
            game.session().final_score(),
            w,
            h,
        ),
        Screen::WonGame => draw_game_over(
            renderer,
            "CONGRATULATIONS you cleared the game \n Press Enter to return to main menu.",
            game.session().final_score(),
            w,
            h,
        ),
        Screen::EnterHighScore { slot, initials, .. } => {
            draw_new_high_score(renderer, game, *slot, initials, w, h)
        }
        Screen::ShowHighScores => draw_high_scores(renderer, game, w, h),
    }
}

fn draw_object<R: Renderer + ?Sized>(renderer: &mut R, object: &GameObject) {
    if let Some(sprite) = object.sprite() {
        renderer.draw_sprite(sprite, object.bounds);
    }
}

fn draw_main_menu<R: Renderer + ?Sized>(renderer: &mut R, selected: MenuOption, w: f32, h: f32) {
    let scale = h * 0.002;
    renderer.set_clear_colour(Colour::MidnightBlue);
    renderer.draw_text(
        "WELCOME TO BREAKOUT \n Press Esc to quit at any time.",
        w * 0.2,
        h * 0.15,
        scale,
        Colour::DarkOrange,
    );

    for (option, y) in [
        (MenuOption::Play, 0.3),
        (MenuOption::HighScores, 0.4),
        (MenuOption::Quit, 0.5),
    ] {
        let label = if option == selected {
            format!(">{}", option.label())
        } else {
            option.label().to_string()
        };
        renderer.draw_text(&label, w * 0.2, h * y, scale, Colour::WhiteSmoke);
    }
}

fn draw_in_game<R: Renderer + ?Sized>(renderer: &mut R, game: &Game, w: f32, h: f32) {
    let world = game.world();
    let scale = h * 0.002;

    renderer.set_clear_colour(Colour::MidnightBlue);
    draw_object(renderer, &world.field);
    draw_object(renderer, &world.paddle);
    draw_object(renderer, &world.ball);
    draw_object(renderer, &world.heart);

    renderer.draw_text("Score: ", w * 0.6, h * 0.088, scale, Colour::DarkOrange);
    renderer.draw_text(
        &game.session().score.to_string(),
        w * 0.73,
        h * 0.088,
        scale,
        Colour::DarkOrange,
    );
    let heart = world.heart.bounds;
    renderer.draw_text(
        &game.session().spare_lives().to_string(),
        heart.x + heart.width * 1.02,
        heart.y + heart.height * 0.95,
        h * 0.0025,
        Colour::DarkOrange,
    );

    let pooled = std::iter::once(&world.power_up)
        .chain(world.gems.iter())
        .chain(world.lasers.iter())
        .chain(world.blocks.iter());
    for object in pooled.filter(|o| o.visible()) {
        draw_object(renderer, object);
    }
}

fn draw_game_over<R: Renderer + ?Sized>(renderer: &mut R, banner: &str, score: u32, w: f32, h: f32) {
    renderer.set_clear_colour(Colour::Black);
    renderer.draw_text(banner, w * 0.25, h * 0.2, h * 0.002, Colour::DarkOrange);
    renderer.draw_text("Final Score: ", w * 0.3, h * 0.5, h * 0.004, Colour::WhiteSmoke);
    renderer.draw_text(&score.to_string(), w * 0.7, h * 0.5, h * 0.004, Colour::WhiteSmoke);
}

/// Baseline of high-score row `row`
fn row_y(h: f32, row: usize) -> f32 {
    h * 0.25 + row as f32 * h * 0.05
}

fn draw_high_scores<R: Renderer + ?Sized>(renderer: &mut R, game: &Game, w: f32, h: f32) {
    let scale = h * 0.002;
    draw_main_menu(renderer, MenuOption::HighScores, w, h);
    renderer.draw_text("HIGH SCORES", w * 0.68, h * 0.15, scale, Colour::DarkOrange);
    for (row, entry) in game.table().entries().iter().enumerate() {
        let y = row_y(h, row);
        renderer.draw_text(&entry.initials, w * 0.7, y, scale, Colour::GhostWhite);
        renderer.draw_text(&entry.score.to_string(), w * 0.75, y, scale, Colour::GhostWhite);
    }
    renderer.draw_text(
        "Press Enter to return to Main Menu",
        w * 0.5,
        h * 0.8,
        scale,
        Colour::GhostWhite,
    );
}

fn draw_new_high_score<R: Renderer + ?Sized>(
    renderer: &mut R,
    game: &Game,
    slot: usize,
    initials: &[u8; 3],
    w: f32,
    h: f32,
) {
    let scale = h * 0.002;
    renderer.draw_text(
        "CONGRATULATIONS YOU SCORED A NEW HIGH SCORE",
        w * 0.1,
        h * 0.15,
        h * 0.003,
        Colour::DarkOrange,
    );

    let editing: String = initials.iter().map(|&b| char::from(b)).collect();
    for (row, entry) in game.table().entries().iter().enumerate() {
        let y = row_y(h, row);
        let (text, colour) = if row == slot {
            (editing.as_str(), Colour::GhostWhite)
        } else {
            (entry.initials.as_str(), Colour::DarkOrange)
        };
        renderer.draw_text(text, w * 0.45, y, scale, colour);
        renderer.draw_text(&entry.score.to_string(), w * 0.5, y, scale, colour);
    }

    renderer.draw_text(
        "Use arrow keys to change initials and press Enter when finished",
        w * 0.1,
        h * 0.8,
        scale,
        Colour::GhostWhite,
    );
}

/// Renderer with no output device.
///
/// Hands out sprite handles and counts draw calls. With an asset root set,
/// a texture that does not exist under it fails to load.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    asset_root: Option<PathBuf>,
    next_id: u64,
    title: String,
    pub sprite_draws: u64,
    pub text_draws: u64,
    checked: HashSet<String>,
}

impl HeadlessRenderer {
    pub fn new(asset_root: Option<PathBuf>) -> Self {
        Self {
            asset_root,
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Renderer for HeadlessRenderer {
    fn load_sprite(&mut self, texture: &str) -> Result<SpriteHandle, AssetError> {
        if let Some(root) = &self.asset_root {
            if !self.checked.contains(texture) {
                if !root.join(texture).is_file() {
                    return Err(AssetError::new(texture));
                }
                self.checked.insert(texture.to_string());
            }
        }
        self.next_id += 1;
        Ok(SpriteHandle::new(self.next_id, texture))
    }

    fn set_clear_colour(&mut self, _colour: Colour) {}

    fn set_window_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn draw_sprite(&mut self, _sprite: &SpriteHandle, _bounds: Rect) {
        self.sprite_draws += 1;
    }

    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _scale: f32, _colour: Colour) {
        self.text_draws += 1;
    }
}
