//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Injected randomness only
//! - Stable iteration order (map row-major for bricks, spawn order for bonuses)
//! - No rendering or platform dependencies

pub mod body;
pub mod bonuses;
pub mod bricks;
pub mod collision;
pub mod map;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use body::{Body, Bounds, Rect};
pub use bonuses::{Bonus, BonusField, BonusKind};
pub use bricks::{Brick, BrickField, BrickKind};
pub use collision::{CollisionResult, ball_rect_collision, overlaps};
pub use map::Map;
pub use rng::{FixedSequence, RandomSource};
pub use score::ScoreCounter;
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, RoundOutcome};
pub use tick::{TickInput, TickOutcome, autopilot, tick};
