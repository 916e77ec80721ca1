//! Brick field: damage model and level completion

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use super::bonuses::BonusField;
use super::map::{Map, WALL};
use super::rng::RandomSource;
use super::score::ScoreCounter;
use super::state::{Ball, GameEvent};

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Breaks after `hp + 1` hits
    Destructible,
    /// Bounces the ball forever; doesn't count for clear
    Wall,
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
    /// Extra hits left before the next hit destroys it
    pub hp: u8,
    destroyed: bool,
}

impl Brick {
    /// Brick for a nonzero map cell code
    pub fn from_code(rect: Rect, code: i32) -> Self {
        let (kind, hp) = if code == WALL {
            (BrickKind::Wall, 0)
        } else {
            (BrickKind::Destructible, (code - 1).clamp(0, u8::MAX as i32) as u8)
        };
        Self {
            rect,
            kind,
            hp,
            destroyed: false,
        }
    }

    /// Remaining extra hits, or -1 for walls
    pub fn health(&self) -> i32 {
        match self.kind {
            BrickKind::Wall => -1,
            BrickKind::Destructible => self.hp as i32,
        }
    }

    /// Visual tier: 0 is one hit from breaking. None for walls.
    pub fn tier(&self) -> Option<u8> {
        match self.kind {
            BrickKind::Wall => None,
            BrickKind::Destructible => Some(self.hp),
        }
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.kind == BrickKind::Destructible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Body for Brick {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// All bricks of the current level, in map row-major order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Lay out one brick per nonzero map cell
    pub fn from_map(map: &Map, origin: IVec2, size: IVec2) -> Self {
        let bricks = map
            .occupied()
            .map(|(row, column, code)| {
                let pos = origin + IVec2::new(column as i32, row as i32) * size;
                Brick::from_code(Rect { pos, size }, code)
            })
            .collect();
        Self { bricks }
    }

    pub fn from_bricks(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.counts_for_clear()).count()
    }

    /// Run the ball against every brick
    ///
    /// Every brick is checked in turn and each hit bounces the ball, so two
    /// bricks hit in the same tick both affect the direction. Walls bounce but
    /// take no damage. Destroyed bricks are removed once the scan is done.
    pub fn collide_ball(
        &mut self,
        ball: &mut Ball,
        bonuses: &mut BonusField,
        score: &mut ScoreCounter,
        rng: &mut impl RandomSource,
        events: &mut Vec<GameEvent>,
    ) {
        for brick in &mut self.bricks {
            if !ball.bounce(&brick.rect).is_hit() || !brick.counts_for_clear() {
                continue;
            }

            let center = brick.rect.center();
            if brick.hp > 0 {
                brick.hp -= 1;
                events.push(GameEvent::BrickDamaged {
                    center,
                    hp: brick.hp,
                });
            } else {
                let points = score.add_score();
                log::debug!(
                    "Brick at {center} destroyed for {points} (streak {})",
                    score.streak()
                );
                events.push(GameEvent::BrickDestroyed { center, points });
                bonuses.try_spawn(center, rng, events);
                brick.destroyed = true;
            }
        }

        self.bricks.retain(|b| !b.destroyed);
    }

    /// True once no destructible brick is left
    pub fn is_cleared(&self) -> bool {
        !self.bricks.iter().any(|b| b.counts_for_clear())
    }
}
