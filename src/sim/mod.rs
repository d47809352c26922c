//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay render-free:
//! - Positions are plain bounding boxes owned by each object
//! - One tick per rendered frame, scaled by elapsed time
//! - Stable iteration order (by block index and pool slot)

pub mod collision;
pub mod object;
pub mod pool;
pub mod rect;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{BlockHit, Fall, PADDLE_ZONES, PaddleContact, PaddleZone};
pub use object::GameObject;
pub use pool::Pool;
pub use rect::Rect;
pub use state::{GameEvent, Layout, Outcome, Session, World};
pub use tick::{TickInput, tick};
pub use vector::{Normalise, Vector2};
