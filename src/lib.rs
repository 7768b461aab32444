//! Brickout - a minimal Breakout runtime
//!
//! Core modules:
//! - `sim`: Entity manager, collision rules and the frame-stepped game loop
//! - `renderer`: Backend-agnostic drawing/input surface plus a headless backend
//! - `settings`: Layout configuration table (JSON-backed)

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Layout, SettingsError};
pub use sim::{EntityManager, Game, GameState};

/// Default layout constants
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 520.0;
    pub const WINDOW_HEIGHT: f32 = 450.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 4;
    pub const BRICK_COLUMNS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 43.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    /// Horizontal inset of the grid (half a brick)
    pub const BRICK_OFFSET: f32 = BRICK_WIDTH / 2.0;
    /// Hits a brick takes before it breaks
    pub const BRICK_STRENGTH: u8 = 1;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Per-axis speed in pixels per frame
    pub const BALL_SPEED: f32 = 4.0;

    /// Frame-rate cap handed to the backend
    pub const FRAME_RATE_LIMIT: u32 = 60;
}
