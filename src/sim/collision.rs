//! Collision detection and response for axis-aligned rectangles
//!
//! Bodies move in whole steps of `direction * speed` pixels per tick, so a fast
//! ball can jump clean over a thin brick between two ticks. The ball check
//! therefore looks one tick ahead to decide *whether* it hits, and at the
//! current position to decide *which axis* it bounces on.

use glam::IVec2;

use super::body::{Bounds, Rect};

/// Result of a ball-vs-rectangle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    /// Next position does not touch the target
    Miss,
    /// Ball already overlaps the target on both axes; passes through untouched
    Embedded,
    /// Ball is about to hit; flip the flagged direction components
    Hit { flip_x: bool, flip_y: bool },
}

impl CollisionResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionResult::Hit { .. })
    }

    /// Apply the bounce to a direction vector
    pub fn apply(&self, direction: IVec2) -> IVec2 {
        match *self {
            CollisionResult::Hit { flip_x, flip_y } => IVec2::new(
                if flip_x { -direction.x } else { direction.x },
                if flip_y { -direction.y } else { direction.y },
            ),
            _ => direction,
        }
    }
}

/// Inclusive 1D interval overlap: touching endpoints count
#[inline]
fn span_overlap(a_start: i32, a_len: i32, b_start: i32, b_len: i32) -> bool {
    a_start + a_len >= b_start && a_start <= b_start + b_len
}

/// Inclusive rectangle overlap (shared edges count as contact)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    span_overlap(a.pos.x, a.size.x, b.pos.x, b.size.x)
        && span_overlap(a.pos.y, a.size.y, b.pos.y, b.size.y)
}

/// Where a body will be after one unclamped step
#[inline]
pub fn predict(rect: &Rect, direction: IVec2, speed: i32) -> Rect {
    rect.translated(direction * speed)
}

/// Double-buffered check of a moving ball against a static rectangle
///
/// Collision is decided at the prospective position; the bounce axis is every
/// axis on which the ball does *not* overlap the target right now. A ball that
/// comes in diagonally at a corner therefore flips both components.
pub fn ball_rect_collision(
    ball: &Rect,
    direction: IVec2,
    speed: i32,
    target: &Rect,
) -> CollisionResult {
    let future = predict(ball, direction, speed);
    if !overlaps(&future, target) {
        return CollisionResult::Miss;
    }

    let overlap_x = span_overlap(ball.pos.x, ball.size.x, target.pos.x, target.size.x);
    let overlap_y = span_overlap(ball.pos.y, ball.size.y, target.pos.y, target.size.y);

    if overlap_x && overlap_y {
        return CollisionResult::Embedded;
    }

    CollisionResult::Hit {
        flip_x: !overlap_x,
        flip_y: !overlap_y,
    }
}

/// Keep the paddle inside the side walls
///
/// Snaps one pixel inward from the wall it touched, matching the classic game.
pub fn paddle_wall_collision(rect: &mut Rect, bounds: &Bounds) {
    if rect.pos.x <= bounds.left {
        rect.pos.x = bounds.left + 1;
    } else if rect.pos.x >= bounds.right - rect.size.x {
        rect.pos.x = bounds.right - rect.size.x - 1;
    }
}

/// Reflect the ball off the side and top walls (direction only, no push-out)
///
/// The right wall is checked after the left one and wins when both trigger.
pub fn ball_wall_collision(rect: &Rect, direction: IVec2, bounds: &Bounds) -> IVec2 {
    let mut dir = direction;
    if rect.pos.x <= bounds.left {
        dir.x = 1;
    }
    if rect.pos.x >= bounds.right - rect.size.x {
        dir.x = -1;
    }
    if rect.pos.y <= bounds.top {
        dir.y = 1;
    }
    dir
}

/// True once the ball's top edge has reached the drop line
#[inline]
pub fn ball_below(rect: &Rect, bounds: &Bounds) -> bool {
    rect.pos.y >= bounds.bottom
}
