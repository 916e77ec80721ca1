//! Falling bonuses: spawn rolls, fall, paddle pickup and effects

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use super::collision::overlaps;
use super::rng::RandomSource;
use super::score::ScoreCounter;
use super::state::{Ball, GameEvent, Paddle};
use crate::consts::{BONUS_FALL_SPEED, BONUS_OUT_OF_BOUNDS, DEFAULT_BONUS_PROBABILITY};

/// Bonus types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    EnlargePaddle,
    SpeedPaddle,
    SpeedBall,
    Score100,
    Score200,
    Score300,
}

impl BonusKind {
    /// Spawn table, indexed by the kind roll
    pub const ALL: [BonusKind; 6] = [
        BonusKind::EnlargePaddle,
        BonusKind::SpeedPaddle,
        BonusKind::SpeedBall,
        BonusKind::Score100,
        BonusKind::Score200,
        BonusKind::Score300,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Flat points awarded on pickup
    pub fn points(self) -> u32 {
        match self {
            BonusKind::EnlargePaddle | BonusKind::SpeedPaddle => 5,
            BonusKind::SpeedBall => 15,
            BonusKind::Score100 => 100,
            BonusKind::Score200 => 200,
            BonusKind::Score300 => 300,
        }
    }
}

/// A pickup entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub rect: Rect,
    pub kind: BonusKind,
    resolved: bool,
}

impl Bonus {
    pub fn new(rect: Rect, kind: BonusKind) -> Self {
        Self {
            rect,
            kind,
            resolved: false,
        }
    }

    /// Apply this bonus to the paddle, ball and score
    fn apply(&self, paddle: &mut Paddle, ball: &mut Ball, score: &mut ScoreCounter) {
        match self.kind {
            BonusKind::EnlargePaddle => paddle.increase_size(),
            BonusKind::SpeedPaddle => paddle.increase_speed(),
            BonusKind::SpeedBall => {
                ball.increase_speed();
                score.increase_speed_multiplier();
            }
            BonusKind::Score100 | BonusKind::Score200 | BonusKind::Score300 => {}
        }
        score.add_bonus_score(self.kind.points());
    }
}

impl Body for Bonus {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Live bonuses and the spawn chance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusField {
    bonuses: Vec<Bonus>,
    /// Spawn chance per destroyed brick, in percent
    probability: u32,
    size: IVec2,
}

impl BonusField {
    /// `probability` outside [0, 100] falls back to the default
    pub fn new(probability: i32, size: IVec2) -> Self {
        let probability = if (0..=100).contains(&probability) {
            probability
        } else {
            log::warn!(
                "Bonus probability {probability} outside [0, 100], using {DEFAULT_BONUS_PROBABILITY}"
            );
            DEFAULT_BONUS_PROBABILITY
        };
        Self {
            bonuses: Vec::new(),
            probability: probability as u32,
            size,
        }
    }

    pub fn probability(&self) -> u32 {
        self.probability
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bonus> {
        self.bonuses.iter()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn clear(&mut self) {
        self.bonuses.clear();
    }

    /// Roll for a bonus at a destroyed brick's centre
    pub fn try_spawn(
        &mut self,
        center: IVec2,
        rng: &mut impl RandomSource,
        events: &mut Vec<GameEvent>,
    ) -> Option<BonusKind> {
        if rng.below(100) >= self.probability {
            return None;
        }

        let kind = BonusKind::ALL[rng.below(BonusKind::ALL.len() as u32) as usize];
        self.bonuses
            .push(Bonus::new(Rect::centered_at(center, self.size), kind));
        log::debug!("Spawned {kind:?} bonus at {center}");
        events.push(GameEvent::BonusSpawned { kind, center });
        Some(kind)
    }

    /// Drop every bonus one step, then resolve expiry or pickup
    ///
    /// Each bonus resolves at most once; resolved bonuses are removed after
    /// the scan.
    pub fn update(
        &mut self,
        paddle: &mut Paddle,
        ball: &mut Ball,
        score: &mut ScoreCounter,
        events: &mut Vec<GameEvent>,
    ) {
        for bonus in &mut self.bonuses {
            bonus.rect.pos.y += BONUS_FALL_SPEED;

            if bonus.rect.pos.y > BONUS_OUT_OF_BOUNDS {
                bonus.resolved = true;
                events.push(GameEvent::BonusMissed { kind: bonus.kind });
                continue;
            }

            if overlaps(&bonus.rect, &paddle.rect) {
                bonus.apply(paddle, ball, score);
                bonus.resolved = true;
                log::debug!("Collected {:?} bonus", bonus.kind);
                events.push(GameEvent::BonusCollected { kind: bonus.kind });
            }
        }

        self.bonuses.retain(|b| !b.resolved);
    }
}
