//! Collision detection and response for axis-aligned boxes
//!
//! Every test here is a pure function of bounding boxes and velocities. There
//! is no general physics: a ball either flips one velocity component or takes
//! a fixed outgoing direction from the paddle zone it lands on.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::BLOCK_HIT_TOLERANCE;

/// Flip the ball off the playfield's left, right and top edges.
///
/// X flips when the ball reaches a side edge while moving toward it; Y flips
/// only at the top. The bottom is open (lives are lost at the paddle).
pub fn wall_deflection(ball: &Rect, velocity: Vec2, field: &Rect) -> Vec2 {
    let mut v = velocity;
    if (ball.left() <= field.left() && v.x < 0.0) || (ball.right() >= field.right() && v.x > 0.0)
    {
        v.x = -v.x;
    }
    if ball.top() <= field.top() && v.y < 0.0 {
        v.y = -v.y;
    }
    v
}

/// Stop the paddle at the playfield sides while it pushes outward
pub fn clamp_paddle(paddle: &Rect, velocity: Vec2, field: &Rect) -> Vec2 {
    let mut v = velocity;
    if (paddle.left() <= field.left() && v.x < 0.0)
        || (paddle.right() >= field.right() && v.x > 0.0)
    {
        v.x = 0.0;
    }
    v
}

/// Which face of a block the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHit {
    /// Top or bottom face: flip Y
    Vertical,
    /// Left or right face: flip X
    Horizontal,
}

impl BlockHit {
    /// Outgoing velocity after bouncing off this face
    #[inline]
    pub fn deflect(self, velocity: Vec2) -> Vec2 {
        match self {
            BlockHit::Vertical => Vec2::new(velocity.x, -velocity.y),
            BlockHit::Horizontal => Vec2::new(-velocity.x, velocity.y),
        }
    }
}

/// Test the ball against one block.
///
/// The vertical approach is tested first and requires the ball to overlap 90%
/// of the block's width; the side approach is only considered when it fails.
pub fn ball_block_hit(ball: &Rect, velocity: Vec2, block: &Rect) -> Option<BlockHit> {
    let within_width = ball.x + ball.width * BLOCK_HIT_TOLERANCE > block.x
        && ball.x < block.x + block.width * BLOCK_HIT_TOLERANCE;

    // Moving up into the underside, or down onto the top edge
    let from_below = ball.overlaps_vertically(block) && within_width && velocity.y < 0.0;
    let from_above = ball.top() < block.top()
        && ball.bottom() > block.top()
        && within_width
        && velocity.y > 0.0;
    if from_below || from_above {
        return Some(BlockHit::Vertical);
    }

    let vertical_band = ball.overlaps_vertically(block);
    let from_left = vertical_band
        && ball.left() < block.left()
        && ball.right() > block.left()
        && velocity.x > 0.0;
    let from_right = vertical_band
        && ball.left() < block.right()
        && ball.right() > block.right()
        && velocity.x < 0.0;
    if from_left || from_right {
        return Some(BlockHit::Horizontal);
    }

    None
}

/// A laser strikes a block once its top reaches the block's bottom edge while
/// it sits horizontally within the block, with half a laser width of slack on
/// either side.
pub fn laser_hits_block(laser: &Rect, block: &Rect) -> bool {
    let slack = laser.width * 0.5;
    laser.top() < block.bottom()
        && laser.left() > block.left() - slack
        && laser.right() < block.right() + slack
}

/// A laser that reaches the playfield top has missed
#[inline]
pub fn laser_at_top(laser: &Rect, field: &Rect) -> bool {
    laser.top() <= field.top()
}

/// Which part of the ball is measured against a zone boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEdge {
    Right,
    Center,
}

/// One row of the paddle deflection table
#[derive(Debug, Clone, Copy)]
pub struct PaddleZone {
    pub edge: ZoneEdge,
    /// Boundary as a fraction of the paddle width, from its left edge
    pub boundary: f32,
    pub velocity: Vec2,
}

/// Paddle deflection table, scanned right to left; the first row whose
/// boundary the ball reaches wins.
pub const PADDLE_ZONES: [PaddleZone; 7] = [
    PaddleZone {
        edge: ZoneEdge::Right,
        boundary: 1.0,
        velocity: Vec2::new(0.707, -0.707),
    },
    PaddleZone {
        edge: ZoneEdge::Center,
        boundary: 0.71,
        velocity: Vec2::new(0.5, -0.866),
    },
    PaddleZone {
        edge: ZoneEdge::Center,
        boundary: 0.57,
        velocity: Vec2::new(0.259, -0.966),
    },
    PaddleZone {
        edge: ZoneEdge::Center,
        boundary: 0.43,
        velocity: Vec2::new(0.0, -1.0),
    },
    PaddleZone {
        edge: ZoneEdge::Center,
        boundary: 0.29,
        velocity: Vec2::new(-0.259, -0.966),
    },
    PaddleZone {
        edge: ZoneEdge::Center,
        boundary: 0.14,
        velocity: Vec2::new(-0.5, -0.866),
    },
    PaddleZone {
        edge: ZoneEdge::Right,
        boundary: 0.0,
        velocity: Vec2::new(-0.707, -0.707),
    },
];

/// Outgoing velocity for a ball landing on the paddle, if any zone matches
pub fn paddle_zone_velocity(ball: &Rect, paddle: &Rect) -> Option<Vec2> {
    PADDLE_ZONES
        .iter()
        .find(|zone| {
            let contact_x = match zone.edge {
                ZoneEdge::Right => ball.right(),
                ZoneEdge::Center => ball.center_x(),
            };
            contact_x >= paddle.x + paddle.width * zone.boundary
        })
        .map(|zone| zone.velocity)
}

/// Outcome of the ball reaching paddle height
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleContact {
    /// Ball has not reached the paddle, or is beside it but not yet below its top
    Clear,
    /// Ball is beside the paddle and has dropped past its top: a life is lost
    Missed,
    /// Ball landed on the paddle and leaves with this velocity
    Bounce(Vec2),
}

/// Resolve the ball against the paddle
pub fn ball_paddle_contact(ball: &Rect, paddle: &Rect) -> PaddleContact {
    if ball.bottom() <= paddle.top() {
        return PaddleContact::Clear;
    }
    let beside = ball.right() < paddle.left() || ball.left() > paddle.right();
    if beside {
        if ball.top() > paddle.top() {
            return PaddleContact::Missed;
        }
        return PaddleContact::Clear;
    }
    match paddle_zone_velocity(ball, paddle) {
        Some(v) => PaddleContact::Bounce(v),
        None => PaddleContact::Clear,
    }
}

/// Disposition of a falling gem or power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// Still above the paddle, or level with it but not yet past
    Falling,
    /// Landed fully within the paddle's span
    Caught,
    /// Dropped past the paddle top outside its span
    Missed,
}

/// Resolve a falling object against the paddle
pub fn falling_object(object: &Rect, paddle: &Rect) -> Fall {
    if object.bottom() <= paddle.top() {
        return Fall::Falling;
    }
    if object.within_horizontally(paddle) {
        Fall::Caught
    } else if object.top() > paddle.top() {
        Fall::Missed
    } else {
        Fall::Falling
    }
}
