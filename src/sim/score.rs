//! Score and multipliers
//!
//! Each destroyed brick is worth `SCORE_PER_BRICK` scaled by two factors: the
//! streak (how many bricks this volley has broken, including this one) and
//! the speed multiplier (raised permanently by speed-ball bonuses).

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_SPEED_MULTIPLIER, SCORE_PER_BRICK};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    score: u32,
    streak: u32,
    speed_multiplier: u32,
}

impl Default for ScoreCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self {
            score: 0,
            streak: 0,
            speed_multiplier: BASE_SPEED_MULTIPLIER,
        }
    }

    /// Score a destroyed brick; returns the points awarded
    pub fn add_score(&mut self) -> u32 {
        self.streak = self.streak.saturating_add(1);
        let points = self
            .streak
            .saturating_mul(SCORE_PER_BRICK)
            .saturating_mul(self.speed_multiplier);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Flat points from a pickup; the streak is untouched
    pub fn add_bonus_score(&mut self, bonus: u32) {
        self.score = self.score.saturating_add(bonus);
    }

    pub fn reset_multiplier(&mut self) {
        self.streak = 0;
    }

    pub fn increase_speed_multiplier(&mut self) {
        self.speed_multiplier = self.speed_multiplier.saturating_add(1);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn speed_multiplier(&self) -> u32 {
        self.speed_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_scales_points() {
        let mut counter = ScoreCounter::new();
        assert_eq!(counter.speed_multiplier(), 4);
        assert_eq!(counter.add_score(), 100);
        assert_eq!(counter.add_score(), 200);
        assert_eq!(counter.add_score(), 300);
        assert_eq!(counter.score(), 600);
        assert_eq!(counter.streak(), 3);
    }

    #[test]
    fn test_reset_restores_base_increment() {
        let mut counter = ScoreCounter::new();
        counter.add_score();
        counter.add_score();
        counter.reset_multiplier();
        assert_eq!(counter.add_score(), 100);
        assert_eq!(counter.score(), 400);
    }

    #[test]
    fn test_speed_multiplier_survives_reset() {
        let mut counter = ScoreCounter::new();
        counter.increase_speed_multiplier();
        counter.reset_multiplier();
        assert_eq!(counter.speed_multiplier(), 5);
        assert_eq!(counter.add_score(), 125);
    }

    #[test]
    fn test_bonus_score_keeps_streak() {
        let mut counter = ScoreCounter::new();
        counter.add_score();
        counter.add_bonus_score(200);
        assert_eq!(counter.streak(), 1);
        assert_eq!(counter.score(), 300);
        assert_eq!(counter.add_score(), 200);
    }
}
