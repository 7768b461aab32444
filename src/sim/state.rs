//! Game state and the concrete entity types
//!
//! Positions are entity centers in window pixels, y pointing down.
//! Velocities are pixels per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entity::{Entity, UpdateCtx};
use crate::renderer::shapes::strength_color;
use crate::renderer::{Color, Drawable, Surface};
use crate::settings::Layout;

/// Run state of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Entities are drawn but not updated
    #[default]
    Paused,
    /// Active gameplay
    Running,
}

impl GameState {
    pub fn toggled(self) -> Self {
        match self {
            GameState::Paused => GameState::Running,
            GameState::Running => GameState::Paused,
        }
    }
}

/// Full-window backdrop, drawn first
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    destroyed: bool,
}

impl Background {
    /// Backdrop whose top-left corner sits at `origin`
    pub fn new(origin: Vec2, layout: &Layout) -> Self {
        let size = Vec2::new(layout.window_width, layout.window_height);
        Self {
            pos: origin + size / 2.0,
            size,
            color: Color::BACKGROUND,
            destroyed: false,
        }
    }
}

impl Entity for Background {
    fn update(&mut self, _ctx: &UpdateCtx) {}

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(&Drawable::rect(self.pos, self.size, self.color));
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size / 2.0)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-axis speed used when rebounding
    pub speed: f32,
    destroyed: bool,
}

impl Ball {
    /// Ball at `pos`, heading down and to the right
    pub fn new(pos: Vec2, layout: &Layout) -> Self {
        Self {
            pos,
            vel: Vec2::splat(layout.ball_speed),
            radius: layout.ball_radius,
            speed: layout.ball_speed,
            destroyed: false,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn move_left(&mut self) {
        self.vel.x = -self.vel.x.abs();
    }

    pub fn move_right(&mut self) {
        self.vel.x = self.vel.x.abs();
    }

    pub fn move_up(&mut self) {
        self.vel.y = -self.vel.y.abs();
    }

    pub fn move_down(&mut self) {
        self.vel.y = self.vel.y.abs();
    }
}

impl Entity for Ball {
    fn update(&mut self, ctx: &UpdateCtx) {
        self.pos += self.vel;

        // Bounce off the window edges
        if self.left() < 0.0 {
            self.move_right();
        } else if self.right() > ctx.layout.window_width {
            self.move_left();
        }

        if self.top() < 0.0 {
            self.move_down();
        } else if self.bottom() > ctx.layout.window_height {
            self.move_up();
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(&Drawable::circle(self.pos, self.radius, Color::RED));
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity this frame
    pub vel_x: f32,
    pub speed: f32,
    destroyed: bool,
}

impl Paddle {
    pub fn new(pos: Vec2, layout: &Layout) -> Self {
        Self {
            pos,
            size: Vec2::new(layout.paddle_width, layout.paddle_height),
            vel_x: 0.0,
            speed: layout.paddle_speed,
            destroyed: false,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

impl Entity for Paddle {
    fn update(&mut self, ctx: &UpdateCtx) {
        // Only move while the leading edge is still inside the window
        self.vel_x = if ctx.input.left && self.left() > 0.0 {
            -self.speed
        } else if ctx.input.right && self.right() < ctx.layout.window_width {
            self.speed
        } else {
            0.0
        };
        self.pos.x += self.vel_x;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(&Drawable::rect(self.pos, self.size, Color::WHITE));
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size / 2.0)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// A destructible brick
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    pub pos: Vec2,
    pub size: Vec2,
    /// Hits left before the brick breaks
    pub strength: u8,
    max_strength: u8,
    destroyed: bool,
}

impl Brick {
    pub fn new(pos: Vec2, layout: &Layout) -> Self {
        let strength = layout.brick_strength.max(1);
        Self {
            pos,
            size: Vec2::new(layout.brick_width, layout.brick_height),
            strength,
            max_strength: strength,
            destroyed: false,
        }
    }

    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = strength.max(1);
        self.max_strength = self.max_strength.max(self.strength);
        self
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Take one hit; breaks the brick once its strength runs out
    pub fn hit(&mut self) {
        self.strength = self.strength.saturating_sub(1);
        if self.strength == 0 {
            self.destroy();
        }
    }
}

impl Entity for Brick {
    fn update(&mut self, _ctx: &UpdateCtx) {}

    fn draw(&self, surface: &mut dyn Surface) {
        let color = strength_color(Color::GREEN, self.strength, self.max_strength);
        surface.draw(&Drawable::rect(self.pos, self.size, color));
    }

    fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size / 2.0)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
