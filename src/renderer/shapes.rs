//! 2D primitives handed to a [`Surface`](super::Surface)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BACKGROUND: Color = Color::rgb(20, 20, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Something a surface knows how to rasterize
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drawable {
    /// Axis-aligned rectangle given by its center and full size
    Rect { center: Vec2, size: Vec2, color: Color },
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Color },
}

impl Drawable {
    pub fn rect(center: Vec2, size: Vec2, color: Color) -> Self {
        Drawable::Rect {
            center,
            size,
            color,
        }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color) -> Self {
        Drawable::Circle {
            center,
            radius,
            color,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Drawable::Rect { color, .. } | Drawable::Circle { color, .. } => color,
        }
    }

    pub fn center(&self) -> Vec2 {
        match *self {
            Drawable::Rect { center, .. } | Drawable::Circle { center, .. } => center,
        }
    }
}

/// Brick fill: fully opaque at full strength, fading as hits land
pub fn strength_color(base: Color, strength: u8, max_strength: u8) -> Color {
    if max_strength == 0 {
        return base;
    }
    let t = (strength.min(max_strength) as f32 / max_strength as f32).clamp(0.0, 1.0);
    // Keep weakened bricks visible
    let alpha = 80.0 + (255.0 - 80.0) * t;
    base.with_alpha(alpha.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_color_fades() {
        let full = strength_color(Color::GREEN, 3, 3);
        let weak = strength_color(Color::GREEN, 1, 3);
        assert_eq!(full.a, 255);
        assert!(weak.a < full.a);
        assert!(weak.a >= 80);
        assert_eq!((weak.r, weak.g, weak.b), (0, 255, 0));
    }

    #[test]
    fn test_drawable_accessors() {
        let d = Drawable::circle(Vec2::new(3.0, 4.0), 5.0, Color::RED);
        assert_eq!(d.color(), Color::RED);
        assert_eq!(d.center(), Vec2::new(3.0, 4.0));
    }
}
