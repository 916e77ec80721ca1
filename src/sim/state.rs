//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; `tick` is the only thing
//! that mutates it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Bounds, Rect};
use super::bonuses::{BonusField, BonusKind};
use super::bricks::BrickField;
use super::collision::{
    CollisionResult, ball_below, ball_rect_collision, ball_wall_collision, paddle_wall_collision,
};
use super::map::Map;
use super::rng::RandomSource;
use super::score::ScoreCounter;
use crate::settings::GameConfig;

/// Paddle speed gained per speed-paddle bonus
pub const PADDLE_SPEED_STEP: i32 = 2;
/// Ball speed gained per speed-ball bonus
pub const BALL_SPEED_STEP: i32 = 1;

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball rides on the paddle, waiting for launch input
    Idle,
    /// Ball is simulated
    Playing,
    /// Round over; nothing moves
    Stopped(RoundOutcome),
}

impl GamePhase {
    pub fn is_stopped(&self) -> bool {
        matches!(self, GamePhase::Stopped(_))
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { direction: IVec2 },
    PaddleHit,
    BrickDamaged { center: IVec2, hp: u8 },
    BrickDestroyed { center: IVec2, points: u32 },
    BonusSpawned { kind: BonusKind, center: IVec2 },
    BonusCollected { kind: BonusKind },
    BonusMissed { kind: BonusKind },
    LifeLost { lives: i32 },
    RoundOver { outcome: RoundOutcome },
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Pixels moved per tick while a direction is held
    pub speed: i32,
    /// Width the paddle grows toward
    pub max_width: i32,
}

impl Paddle {
    pub fn new(pos: IVec2, size: IVec2, max_width: i32, speed: i32) -> Self {
        Self {
            rect: Rect { pos, size },
            speed,
            max_width,
        }
    }

    /// Move one step left (`left == true`) or right
    pub fn shift(&mut self, left: bool) {
        self.rect.pos.x += if left { -self.speed } else { self.speed };
    }

    /// Grow halfway toward the width cap (never shrinks)
    pub fn increase_size(&mut self) {
        let growth = (self.max_width - self.rect.size.x) / 2;
        if growth > 0 {
            self.rect.size.x += growth;
        }
    }

    pub fn increase_speed(&mut self) {
        self.speed += PADDLE_SPEED_STEP;
    }

    pub fn wall_collision(&mut self, bounds: &Bounds) {
        paddle_wall_collision(&mut self.rect, bounds);
    }
}

impl Body for Paddle {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Pixels per axis per tick
    pub speed: i32,
    /// Each component is -1, 0 or 1
    pub direction: IVec2,
}

impl Ball {
    pub fn new(pos: IVec2, size: IVec2, speed: i32) -> Self {
        Self {
            rect: Rect { pos, size },
            speed,
            direction: IVec2::ZERO,
        }
    }

    /// Serve upward, randomly to the left or right
    pub fn launch(&mut self, rng: &mut impl RandomSource) {
        let x = if rng.below(2) == 1 { 1 } else { -1 };
        self.direction = IVec2::new(x, -1);
    }

    /// Sit centred on top of the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        let p = paddle.rect;
        self.rect.pos = IVec2::new(
            -self.rect.size.x / 2 + p.pos.x + p.size.x / 2,
            -self.rect.size.y + p.pos.y,
        );
    }

    /// Advance one tick along the current direction
    pub fn step(&mut self) {
        self.rect.pos += self.direction * self.speed;
    }

    /// Check against a rectangle and bounce off it if about to hit
    pub fn bounce(&mut self, target: &Rect) -> CollisionResult {
        let result = ball_rect_collision(&self.rect, self.direction, self.speed, target);
        self.direction = result.apply(self.direction);
        result
    }

    pub fn wall_collision(&mut self, bounds: &Bounds) {
        self.direction = ball_wall_collision(&self.rect, self.direction, bounds);
    }

    pub fn is_below(&self, bounds: &Bounds) -> bool {
        ball_below(&self.rect, bounds)
    }

    pub fn increase_speed(&mut self) {
        self.speed += BALL_SPEED_STEP;
    }
}

impl Body for Ball {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Lives left (the round is lost when this reaches zero)
    pub lives: i32,
    /// Score and multipliers
    pub score: ScoreCounter,
    /// Player paddle
    pub paddle: Paddle,
    /// The ball
    pub ball: Ball,
    /// Bricks still in play
    pub bricks: BrickField,
    /// Falling pickups
    pub bonuses: BonusField,
    /// Walls and drop line
    pub bounds: Bounds,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Set up a fresh round on a validated map
    ///
    /// Non-positive sizes, speeds and lives in `config` are raised to 1.
    pub fn new(map: &Map, config: &GameConfig) -> Self {
        let config = &config.sanitized();
        let paddle = Paddle::new(
            config.paddle_start(),
            IVec2::new(config.paddle_width, config.paddle_height),
            config.paddle_max_width,
            config.paddle_speed,
        );
        // The ball starts on the paddle
        let mut ball = Ball::new(IVec2::ZERO, IVec2::splat(config.ball_size), config.ball_speed);
        ball.follow(&paddle);

        Self {
            phase: GamePhase::Idle,
            lives: config.initial_lives,
            score: ScoreCounter::new(),
            paddle,
            ball,
            bricks: BrickField::from_map(map, config.brick_origin(), config.brick_size()),
            bonuses: BonusField::new(config.bonus_probability, IVec2::splat(config.bonus_size)),
            bounds: config.bounds(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_stopped()
    }

    /// Outcome once the round has stopped
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            GamePhase::Stopped(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::FixedSequence;

    fn paddle() -> Paddle {
        Paddle::new(IVec2::new(258, 661), IVec2::new(64, 16), 128, 7)
    }

    #[test]
    fn test_paddle_growth_approaches_cap() {
        let mut p = paddle();
        p.increase_size();
        assert_eq!(p.rect.size.x, 96);
        p.increase_size();
        assert_eq!(p.rect.size.x, 112);
        for _ in 0..10 {
            p.increase_size();
        }
        assert_eq!(p.rect.size.x, 127);
        assert!(p.rect.size.x <= p.max_width);
    }

    #[test]
    fn test_paddle_moves_by_speed() {
        let mut p = paddle();
        p.shift(true);
        assert_eq!(p.rect.pos.x, 251);
        p.increase_speed();
        p.shift(false);
        assert_eq!(p.rect.pos.x, 260);
    }

    #[test]
    fn test_ball_follows_paddle() {
        let p = paddle();
        let mut ball = Ball::new(IVec2::ZERO, IVec2::splat(12), 5);
        ball.follow(&p);
        assert_eq!(ball.rect.pos, IVec2::new(284, 649));
    }

    #[test]
    fn test_launch_always_goes_up() {
        let mut ball = Ball::new(IVec2::ZERO, IVec2::splat(12), 5);
        ball.launch(&mut FixedSequence::new([0]));
        assert_eq!(ball.direction, IVec2::new(-1, -1));
        ball.launch(&mut FixedSequence::new([1]));
        assert_eq!(ball.direction, IVec2::new(1, -1));
    }

    #[test]
    fn test_ball_step() {
        let mut ball = Ball::new(IVec2::new(100, 100), IVec2::splat(12), 5);
        ball.direction = IVec2::new(1, -1);
        ball.step();
        assert_eq!(ball.rect.pos, IVec2::new(105, 95));
        ball.increase_speed();
        ball.step();
        assert_eq!(ball.rect.pos, IVec2::new(111, 89));
    }

    #[test]
    fn test_new_round() {
        let map = Map::parse("1#\n00\n", 2, 2).unwrap();
        let state = GameState::new(&map, &GameConfig::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.len(), 2);
        assert_eq!(state.ball.direction, IVec2::ZERO);
        assert_eq!(state.ball.rect.pos, IVec2::new(284, 649));
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_new_round_raises_degenerate_config() {
        let map = Map::parse("1#\n00\n", 2, 2).unwrap();
        let config = GameConfig {
            paddle_width: 0,
            ball_size: -4,
            ball_speed: 0,
            initial_lives: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&map, &config);
        assert_eq!(state.paddle.rect.size, IVec2::new(1, 16));
        assert_eq!(state.ball.rect.size, IVec2::splat(1));
        assert_eq!(state.ball.speed, 1);
        assert_eq!(state.lives, 1);

        // A launched ball actually moves
        let start = state.ball.rect.pos;
        state.ball.launch(&mut FixedSequence::new([1]));
        state.ball.step();
        assert_eq!(state.ball.rect.pos, start + IVec2::new(1, -1));
    }
}
