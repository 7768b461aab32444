//! Collision detection and response
//!
//! Overlap is tested with axis-aligned bounding boxes. Each rule resolves one
//! ordered pair of entity types and reports whether it fired.

use glam::Vec2;

use super::entity::Entity;
use super::state::{Ball, Brick, Paddle};

/// Smallest horizontal speed (as a fraction of ball speed) after a paddle hit
pub const MIN_PADDLE_DEFLECTION: f32 = 0.25;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box around `center` extending `half_extents` on each side
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap; boxes that only touch do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Whether two entities' bounding boxes overlap
#[inline]
pub fn is_interacting(a: &impl Entity, b: &impl Entity) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Ball hits brick: weaken the brick and bounce off the side with the
/// shallowest penetration
pub fn ball_brick(ball: &mut Ball, brick: &mut Brick) -> bool {
    if !is_interacting(&*ball, &*brick) {
        return false;
    }

    brick.hit();

    // Penetration depth from each side of the brick
    let overlap_left = ball.right() - brick.left();
    let overlap_right = brick.right() - ball.left();
    let overlap_top = ball.bottom() - brick.top();
    let overlap_bottom = brick.bottom() - ball.top();

    let from_left = overlap_left.abs() < overlap_right.abs();
    let from_top = overlap_top.abs() < overlap_bottom.abs();

    let min_x = if from_left { overlap_left } else { overlap_right };
    let min_y = if from_top { overlap_top } else { overlap_bottom };

    if min_x.abs() < min_y.abs() {
        if from_left {
            ball.move_left();
        } else {
            ball.move_right();
        }
    } else if from_top {
        ball.move_up();
    } else {
        ball.move_down();
    }

    true
}

/// Ball hits paddle: send it back up, steering by where on the paddle it landed
pub fn ball_paddle(ball: &mut Ball, paddle: &mut Paddle) -> bool {
    if !is_interacting(&*ball, &*paddle) {
        return false;
    }

    ball.move_up();

    // -1 at the left edge, +1 at the right edge
    let half_width = paddle.size.x / 2.0;
    let offset = ((ball.pos.x - paddle.pos.x) / half_width).clamp(-1.0, 1.0);

    let mut vel_x = (ball.vel.x + offset * ball.speed).clamp(-ball.speed, ball.speed);
    let min_speed = ball.speed * MIN_PADDLE_DEFLECTION;
    if vel_x.abs() < min_speed {
        vel_x = if ball.pos.x < paddle.pos.x {
            -min_speed
        } else {
            min_speed
        };
    }
    ball.vel.x = vel_x;

    true
}

/// Per-pair resolution functions the game loop calls through
#[derive(Debug, Clone, Copy)]
pub struct CollisionRules {
    pub ball_brick: fn(&mut Ball, &mut Brick) -> bool,
    pub ball_paddle: fn(&mut Ball, &mut Paddle) -> bool,
}

impl Default for CollisionRules {
    fn default() -> Self {
        Self {
            ball_brick,
            ball_paddle,
        }
    }
}
