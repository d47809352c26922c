//! Per-frame simulation tick
//!
//! One call resolves collisions against the current positions, then moves
//! everything by the frame's elapsed time.

use glam::Vec2;

use super::collision::{
    BlockHit, Fall, PaddleContact, ball_block_hit, ball_paddle_contact, clamp_paddle, falling_object,
    laser_at_top, laser_hits_block, wall_deflection,
};
use super::state::{GameEvent, Outcome, Session, World};
use crate::consts::*;

/// Per-tick input that is not carried by entity velocities
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Demo mode - the paddle tracks the ball by itself
    pub autopilot: bool,
}

/// Advance the game by one frame of `dt` seconds.
///
/// Returns the outcome once the game has been won or lost.
pub fn tick(
    world: &mut World,
    session: &mut Session,
    input: &TickInput,
    dt: f32,
) -> Option<Outcome> {
    if input.autopilot {
        steer_paddle(world, session);
    }

    let field = world.layout.field;
    let paddle_velocity = clamp_paddle(&world.paddle.bounds, world.paddle.velocity(), &field);
    world.paddle.set_velocity(paddle_velocity.x, paddle_velocity.y);

    resolve_blocks(world, session);
    resolve_paddle(world, session);
    integrate(world, session, dt);

    if session.power_up_active && session.power_up_shots as usize >= MAX_LASERS {
        session.power_up_active = false;
    }

    outcome(session)
}

/// Win takes precedence when both conditions hold in the same tick
pub fn outcome(session: &Session) -> Option<Outcome> {
    if session.hits as usize >= MAX_BLOCKS {
        Some(Outcome::Won)
    } else if session.lives == 0 {
        Some(Outcome::Lost)
    } else {
        None
    }
}

/// Walls, lasers and blocks
fn resolve_blocks(world: &mut World, session: &mut Session) {
    let field = world.layout.field;
    let ball = world.ball.bounds;
    let incoming = world.ball.velocity();
    let mut ball_velocity = wall_deflection(&ball, incoming, &field);
    // Each axis flips at most once per tick, wall included
    let mut flipped_x = ball_velocity.x != incoming.x;
    let mut flipped_y = ball_velocity.y != incoming.y;

    // Missed shots
    for slot in world.lasers.active_indices() {
        let at_top = world
            .lasers
            .get(slot)
            .is_some_and(|laser| laser_at_top(&laser.bounds, &field));
        if at_top {
            world.lasers.release(slot);
            world.events.push(GameEvent::LaserMissed { slot });
        }
    }

    for index in 0..world.blocks.len() {
        if !world.blocks[index].visible() {
            continue;
        }
        let block = world.blocks[index].bounds;

        let laser_hit = world.lasers.active_indices().into_iter().find(|&slot| {
            world
                .lasers
                .get(slot)
                .is_some_and(|laser| laser_hits_block(&laser.bounds, &block))
        });
        if let Some(slot) = laser_hit {
            world.lasers.release(slot);
            destroy_block(world, session, index, true);
            continue;
        }

        if let Some(hit) = ball_block_hit(&ball, ball_velocity, &block) {
            let flipped = match hit {
                BlockHit::Horizontal => &mut flipped_x,
                BlockHit::Vertical => &mut flipped_y,
            };
            if !*flipped {
                ball_velocity = hit.deflect(ball_velocity);
                *flipped = true;
            }
            destroy_block(world, session, index, false);
        }
    }

    world.ball.set_velocity(ball_velocity.x, ball_velocity.y);
}

/// Hide a block and apply its scoring side effects.
///
/// Gem and speed-up releases key off the number of blocks destroyed before
/// this one, so the 5th, 10th, ... block releases a gem.
fn destroy_block(world: &mut World, session: &mut Session, index: usize, by_laser: bool) {
    let block = world.blocks[index].bounds;
    let destroyed_before = session.hits;

    if destroyed_before % GEM_RELEASE_INTERVAL == GEM_RELEASE_INTERVAL - 1 {
        match world.gems.acquire() {
            Some(slot) => {
                if let Some(gem) = world.gems.get_mut(slot) {
                    gem.drop_from(&block);
                    gem.set_velocity(0.0, GEM_FALL);
                }
                world.events.push(GameEvent::GemReleased { slot });
            }
            None => {
                log::debug!("Gem pool exhausted at block {}", index);
                world.events.push(GameEvent::GemPoolExhausted);
            }
        }
    }
    if destroyed_before % SPEED_UP_INTERVAL == SPEED_UP_INTERVAL - 1 {
        session.game_speed += SPEED_UP_STEP;
        world.events.push(GameEvent::SpeedUp {
            game_speed: session.game_speed,
        });
    }
    if POWER_UP_BLOCKS.contains(&index) && !world.power_up.visible() {
        world.power_up.drop_from(&block);
        world.power_up.set_velocity(0.0, POWER_UP_FALL);
        world.power_up.set_visible(true);
        world.events.push(GameEvent::PowerUpReleased { block: index });
    }

    world.blocks[index].set_visible(false);
    session.hits += 1;
    session.score += BLOCK_POINTS;
    world.events.push(GameEvent::BlockDestroyed { index, by_laser });
}

/// Ball, gems and power-up against the paddle
fn resolve_paddle(world: &mut World, session: &mut Session) {
    let paddle = world.paddle.bounds;

    match ball_paddle_contact(&world.ball.bounds, &paddle) {
        PaddleContact::Missed => {
            session.lives = session.lives.saturating_sub(1);
            world.serve_ball();
            world.events.push(GameEvent::LifeLost {
                lives: session.lives,
            });
            return;
        }
        PaddleContact::Bounce(velocity) => {
            world.ball.set_velocity(velocity.x, velocity.y);
            world.events.push(GameEvent::PaddleBounce { velocity });
        }
        PaddleContact::Clear => {}
    }

    for slot in world.gems.active_indices() {
        let Some(gem) = world.gems.get(slot) else {
            continue;
        };
        match falling_object(&gem.bounds, &paddle) {
            Fall::Caught => {
                session.score += GEM_POINTS;
                world.gems.release(slot);
                world.events.push(GameEvent::GemCaught { slot });
            }
            Fall::Missed => {
                world.gems.release(slot);
                world.events.push(GameEvent::GemMissed { slot });
            }
            Fall::Falling => {}
        }
    }

    if world.power_up.visible() {
        match falling_object(&world.power_up.bounds, &paddle) {
            Fall::Caught => {
                session.power_up_active = true;
                session.power_up_shots = 0;
                world.power_up.reset();
                world.events.push(GameEvent::PowerUpCaught);
            }
            Fall::Missed => {
                world.power_up.reset();
                world.events.push(GameEvent::PowerUpMissed);
            }
            Fall::Falling => {}
        }
    }
}

/// Move everything by its velocity
fn integrate(world: &mut World, session: &Session, dt: f32) {
    let layout = world.layout;

    let paddle_velocity = world.paddle.velocity();
    world
        .paddle
        .bounds
        .translate(Vec2::new(paddle_velocity.x * layout.paddle_speed * dt, 0.0));

    let ball_velocity = world.ball.velocity();
    world
        .ball
        .bounds
        .translate(ball_velocity * layout.ball_speed * session.game_speed * dt);

    let fall = |v: Vec2| Vec2::new(0.0, v.y * layout.fall_speed * dt);
    for gem in world.gems.iter_mut() {
        let v = gem.velocity();
        gem.bounds.translate(fall(v));
    }
    let v = world.power_up.velocity();
    world.power_up.bounds.translate(fall(v));
    for laser in world.lasers.iter_mut() {
        let v = laser.velocity();
        laser.bounds.translate(fall(v));
    }
}

/// Autopilot: chase the ball with a small offset that rotates through the
/// paddle zones as blocks fall, so the rally does not settle into a loop.
fn steer_paddle(world: &mut World, session: &Session) {
    let paddle = world.paddle.bounds;
    let offset = ((session.hits % 5) as f32 - 2.0) * paddle.width * 0.15;
    let target = world.ball.bounds.center_x() - offset;
    let delta = target - paddle.center_x();
    let dead_zone = paddle.width * 0.05;

    let direction = if delta > dead_zone {
        1.0
    } else if delta < -dead_zone {
        -1.0
    } else {
        0.0
    };
    world.paddle.set_velocity(direction, 0.0);
}
