//! Per-frame simulation tick
//!
//! Core game loop step. One call advances the round by exactly one frame:
//! input, paddle, walls, ball drop, paddle bounce, bonuses, bricks, clear
//! check, then ball motion.

use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, RoundOutcome};

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (ignored while right is also held)
    pub move_left: bool,
    /// Move paddle right (ignored while left is also held)
    pub move_right: bool,
    /// Launch the ball (only while Idle)
    pub launch: bool,
    /// Leave the game
    pub quit: bool,
}

/// What the host loop should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// The player asked to quit; nothing was simulated
    Quit,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) -> TickOutcome {
    state.events.clear();

    if input.quit {
        return TickOutcome::Quit;
    }

    // Stopped rounds are frozen
    if state.phase.is_stopped() {
        return TickOutcome::Continue;
    }

    state.time_ticks += 1;

    if input.launch && state.phase == GamePhase::Idle {
        state.phase = GamePhase::Playing;
        state.ball.launch(rng);
        log::info!("Ball launched {}", state.ball.direction);
        state.events.push(GameEvent::Launched {
            direction: state.ball.direction,
        });
    }

    if input.move_left != input.move_right {
        state.paddle.shift(input.move_left);
    }

    state.paddle.wall_collision(&state.bounds);
    state.ball.wall_collision(&state.bounds);

    match state.phase {
        GamePhase::Playing => play(state, rng),
        GamePhase::Idle => state.ball.follow(&state.paddle),
        GamePhase::Stopped(_) => {}
    }

    TickOutcome::Continue
}

fn play(state: &mut GameState, rng: &mut impl RandomSource) {
    if state.ball.is_below(&state.bounds) {
        lose_life(state);
        return;
    }

    // A paddle return ends the current streak
    if state.ball.bounce(&state.paddle.rect).is_hit() {
        state.score.reset_multiplier();
        state.events.push(GameEvent::PaddleHit);
    }

    state.bonuses.update(
        &mut state.paddle,
        &mut state.ball,
        &mut state.score,
        &mut state.events,
    );
    state.bricks.collide_ball(
        &mut state.ball,
        &mut state.bonuses,
        &mut state.score,
        rng,
        &mut state.events,
    );

    if state.bricks.is_cleared() {
        end_round(state, RoundOutcome::Won);
        return;
    }

    state.ball.step();
}

fn lose_life(state: &mut GameState) {
    state.lives -= 1;
    state.events.push(GameEvent::LifeLost { lives: state.lives });
    log::info!("Ball lost, {} lives left", state.lives);

    if state.lives <= 0 {
        end_round(state, RoundOutcome::Lost);
    } else {
        state.phase = GamePhase::Idle;
        state.score.reset_multiplier();
        state.bonuses.clear();
    }
}

fn end_round(state: &mut GameState, outcome: RoundOutcome) {
    state.phase = GamePhase::Stopped(outcome);
    state.score.reset_multiplier();
    state.bonuses.clear();
    state.events.push(GameEvent::RoundOver { outcome });
    log::info!(
        "Round over ({outcome:?}): score {} with {} lives left",
        state.score.score(),
        state.lives
    );
}

/// Simple autopilot: serve immediately, then keep the paddle under the ball
///
/// Used by the headless runner and demo mode. Falling bonuses are chased
/// only while the ball is in the upper half of the field and moving away.
pub fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Idle => {
            input.launch = true;
            return input;
        }
        GamePhase::Stopped(_) => return input,
        GamePhase::Playing => {}
    }

    let ball = state.ball.rect;
    let ball_is_safe =
        state.ball.direction.y < 0 && ball.center().y < (state.bounds.top + state.bounds.bottom) / 2;

    let target_x = if ball_is_safe {
        state
            .bonuses
            .iter()
            .max_by_key(|b| b.rect.pos.y)
            .map_or(ball.center().x, |b| b.rect.center().x)
    } else {
        ball.center().x
    };

    let paddle_x = state.paddle.rect.center().x;
    let dead_zone = (state.paddle.speed / 2).max(1);
    if target_x < paddle_x - dead_zone {
        input.move_left = true;
    } else if target_x > paddle_x + dead_zone {
        input.move_right = true;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::body::Rect;
    use crate::sim::bricks::{Brick, BrickField};
    use crate::sim::map::Map;
    use crate::sim::rng::FixedSequence;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn single_brick_state(probability: i32) -> GameState {
        let map = Map::parse("1", 1, 1).unwrap();
        let config = GameConfig {
            bonus_probability: probability,
            ..GameConfig::default()
        };
        GameState::new(&map, &config)
    }

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_to_playing() {
        let mut state = single_brick_state(0);
        let mut rng = FixedSequence::new([1]);
        assert_eq!(state.phase, GamePhase::Idle);

        // Tick without launch - should stay Idle
        tick(&mut state, &TickInput::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::Idle);

        tick(&mut state, &launch(), &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.direction, IVec2::new(1, -1));
        assert!(matches!(state.events[0], GameEvent::Launched { .. }));
    }

    #[test]
    fn test_idle_ball_follows_paddle() {
        let mut state = single_brick_state(0);
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut FixedSequence::default());
        assert_eq!(state.paddle.rect.pos.x, 251);
        assert_eq!(state.ball.rect.pos.x, 251 + 32 - 6);
    }

    #[test]
    fn test_opposing_inputs_cancel() {
        let mut state = single_brick_state(0);
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut FixedSequence::default());
        assert_eq!(state.paddle.rect.pos.x, 258);
    }

    #[test]
    fn test_quit_does_not_simulate() {
        let mut state = single_brick_state(0);
        let input = TickInput {
            quit: true,
            launch: true,
            ..Default::default()
        };
        assert_eq!(
            tick(&mut state, &input, &mut FixedSequence::default()),
            TickOutcome::Quit
        );
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_single_brick_round_is_won() {
        let mut state = single_brick_state(0);
        let brick = state.bricks.iter().next().unwrap().rect;

        // Put the ball just under the brick, heading up
        state.phase = GamePhase::Playing;
        state.ball.rect.pos = IVec2::new(brick.left() + 20, brick.bottom() + 3);
        state.ball.direction = IVec2::new(1, -1);

        let mut rng = FixedSequence::new([0, 0]);
        tick(&mut state, &TickInput::default(), &mut rng);

        assert!(state.bricks.is_empty());
        assert!(state.bricks.is_cleared());
        assert!(state.bonuses.is_empty());
        assert_eq!(state.phase, GamePhase::Stopped(RoundOutcome::Won));
        assert_eq!(state.score.score(), 100);
        assert_eq!(state.score.streak(), 0);
        assert!(state
            .events
            .contains(&GameEvent::RoundOver { outcome: RoundOutcome::Won }));

        // Clear check is stable and the round stays frozen
        assert!(state.bricks.is_cleared());
        let before = state.ball.clone();
        tick(&mut state, &launch(), &mut rng);
        assert_eq!(state.ball, before);
        assert_eq!(state.phase, GamePhase::Stopped(RoundOutcome::Won));
    }

    #[test]
    fn test_win_clears_live_bonuses() {
        let mut state = single_brick_state(100);
        let brick = state.bricks.iter().next().unwrap().rect;
        state.phase = GamePhase::Playing;
        state.ball.rect.pos = IVec2::new(brick.left() + 20, brick.bottom() + 3);
        state.ball.direction = IVec2::new(1, -1);

        // One bonus already falling mid-field
        state.bonuses.try_spawn(
            IVec2::new(300, 300),
            &mut FixedSequence::new([0, 3]),
            &mut state.events,
        );
        assert_eq!(state.bonuses.len(), 1);

        // The winning hit rolls another spawn before the round ends
        tick(&mut state, &TickInput::default(), &mut FixedSequence::new([0, 4]));
        assert_eq!(state.phase, GamePhase::Stopped(RoundOutcome::Won));
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BonusSpawned { .. })));
        assert!(state.bonuses.is_empty());
        assert_eq!(state.score.score(), 100);
    }

    #[test]
    fn test_stopped_round_ignores_movement() {
        let mut state = single_brick_state(0);
        state.phase = GamePhase::Stopped(RoundOutcome::Lost);
        let paddle = state.paddle.rect;
        let ball = state.ball.clone();

        for input in [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                launch: true,
                ..Default::default()
            },
        ] {
            assert_eq!(
                tick(&mut state, &input, &mut FixedSequence::default()),
                TickOutcome::Continue
            );
            assert_eq!(state.paddle.rect, paddle);
            assert_eq!(state.ball, ball);
            assert_eq!(state.time_ticks, 0);
            assert!(state.events.is_empty());
        }
    }

    #[test]
    fn test_last_life_lost_stops_round() {
        let mut state = single_brick_state(0);
        state.lives = 1;
        state.phase = GamePhase::Playing;
        state.ball.rect.pos.y = state.bounds.bottom;
        state.score.add_score();

        tick(&mut state, &TickInput::default(), &mut FixedSequence::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Stopped(RoundOutcome::Lost));
        assert_eq!(state.score.streak(), 0);
    }

    #[test]
    fn test_life_lost_returns_to_idle() {
        let mut state = single_brick_state(100);
        state.phase = GamePhase::Playing;
        state.ball.rect.pos.y = state.bounds.bottom + 4;
        state
            .bonuses
            .try_spawn(IVec2::new(100, 300), &mut FixedSequence::new([0, 0]), &mut state.events);
        assert_eq!(state.bonuses.len(), 1);

        tick(&mut state, &TickInput::default(), &mut FixedSequence::default());
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.bonuses.is_empty());
        assert_eq!(state.events, vec![GameEvent::LifeLost { lives: 2 }]);

        // Next tick the ball is back on the paddle
        tick(&mut state, &TickInput::default(), &mut FixedSequence::default());
        assert_eq!(state.ball.rect.bottom(), state.paddle.rect.top());
    }

    #[test]
    fn test_paddle_return_resets_streak() {
        let mut state = single_brick_state(0);
        state.phase = GamePhase::Playing;
        state.score.add_score();
        state.score.add_score();

        // Falling onto the paddle from above
        let paddle = state.paddle.rect;
        state.ball.rect.pos = IVec2::new(paddle.left() + 20, paddle.top() - 15);
        state.ball.direction = IVec2::new(1, 1);

        tick(&mut state, &TickInput::default(), &mut FixedSequence::default());
        assert_eq!(state.ball.direction, IVec2::new(1, -1));
        assert_eq!(state.score.streak(), 0);
        assert!(state.events.contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_walls_only_level_is_won_immediately() {
        let mut state = single_brick_state(0);
        state.bricks = BrickField::from_bricks(vec![Brick::from_code(Rect::new(34, 21, 64, 24), -1)]);
        tick(&mut state, &launch(), &mut FixedSequence::default());
        assert_eq!(state.phase, GamePhase::Stopped(RoundOutcome::Won));
    }

    #[test]
    fn test_autopilot_launches_and_tracks() {
        let mut state = single_brick_state(0);
        assert!(autopilot(&state).launch);

        state.phase = GamePhase::Playing;
        state.ball.direction = IVec2::new(1, 1);
        state.ball.rect.pos = IVec2::new(100, 500);
        let input = autopilot(&state);
        assert!(input.move_left && !input.move_right);

        state.ball.rect.pos = IVec2::new(500, 500);
        let input = autopilot(&state);
        assert!(input.move_right && !input.move_left);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs, same round
        let map = Map::parse(include_str!("../../maps/Map2.txt"), 10, 8).unwrap();
        let config = GameConfig::default();
        let mut state1 = GameState::new(&map, &config);
        let mut state2 = GameState::new(&map, &config);
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        for _ in 0..2000 {
            let input1 = autopilot(&state1);
            let input2 = autopilot(&state2);
            tick(&mut state1, &input1, &mut rng1);
            tick(&mut state2, &input2, &mut rng2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.bricks.len(), state2.bricks.len());
    }

    #[test]
    fn test_autopilot_round_terminates() {
        let map = Map::parse(include_str!("../../maps/Map1.txt"), 10, 8).unwrap();
        let mut state = GameState::new(&map, &GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let initial = state.bricks.remaining();

        for _ in 0..200_000 {
            if state.is_over() {
                break;
            }
            let input = autopilot(&state);
            tick(&mut state, &input, &mut rng);
        }

        assert!(state.bricks.remaining() < initial);
        assert!(state.score.score() > 0);
    }
}
