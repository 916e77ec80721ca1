//! Void Breaker - A brick-breaking arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, bricks, bonuses, score)
//! - `renderer`: Draw list and asset handles handed to an external renderer
//! - `highscores`: Append-only tab-separated highscore store
//! - `settings`: Data-driven game configuration
//! - `error`: Typed errors for loading, assets and persistence

pub mod error;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, LayoutError, MapError, ParseError, ResourceError, StoreError};
pub use highscores::{HighscoreEntry, HighscoreStore};
pub use settings::GameConfig;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    /// Playfield dimensions
    pub const WINDOW_WIDTH: i32 = 580;
    pub const WINDOW_HEIGHT: i32 = 720;

    /// Frame border thickness on the left/right and top edges
    pub const FRAME_WIDTH_OFFSET: i32 = 16;
    pub const FRAME_HEIGHT_OFFSET: i32 = 3;
    /// Inset of the brick grid from the window edge
    pub const FRAME_BRICK_OFFSET: i32 = 34;

    /// Brick grid
    pub const BRICK_ROWS: usize = 10;
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_WIDTH: i32 = 64;
    pub const BRICK_HEIGHT: i32 = 24;

    /// Round defaults
    pub const INITIAL_LIVES: i32 = 3;
    pub const INITIAL_SPEED_BALL: i32 = 5;
    pub const INITIAL_SPEED_PADDLE: i32 = 7;

    /// Ball size (half of the 24px sprite)
    pub const BALL_SIZE: i32 = 12;
    /// Paddle size (half of the 128x32 sprite), which is also the growth cap
    pub const PADDLE_WIDTH: i32 = 64;
    pub const PADDLE_HEIGHT: i32 = 16;
    pub const PADDLE_MAX_WIDTH: i32 = 128;
    /// Paddle top edge, measured up from the bottom of the window
    pub const PADDLE_BOTTOM_GAP: i32 = 59;

    /// Bonus pickups
    pub const BONUS_SIZE: i32 = 24;
    pub const BONUS_FALL_SPEED: i32 = 3;
    /// Bonuses below this depth are discarded
    pub const BONUS_OUT_OF_BOUNDS: i32 = 1000;
    /// Spawn chance (percent) in the default configuration
    pub const INITIAL_BONUS_PROBABILITY: i32 = 31;
    /// Fallback when a configured probability is outside [0, 100]
    pub const DEFAULT_BONUS_PROBABILITY: i32 = 5;

    /// Scoring
    pub const SCORE_PER_BRICK: u32 = 25;
    pub const BASE_SPEED_MULTIPLIER: u32 = 4;

    /// Glyph used for indestructible bricks in map files
    pub const WALL_GLYPH: char = '#';
}
