//! Simulation module
//!
//! Entity ownership, per-pair collision rules and the frame loop. Nothing in
//! here talks to a concrete backend; drawing and input go through
//! [`crate::renderer::Surface`].
//! - Single-threaded, one step per frame
//! - Stable iteration order (insertion order)

pub mod collision;
pub mod entity;
pub mod manager;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionRules, ball_brick, ball_paddle, is_interacting};
pub use entity::{AnyEntity, Entity, FrameInput, Kind, UpdateCtx, Variant};
pub use manager::{EntityId, EntityManager};
pub use state::{Background, Ball, Brick, GameState, Paddle};
pub use tick::{Flow, Game};
