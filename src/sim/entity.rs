//! Entity capability and the closed set of entity variants
//!
//! Every game object is stored as an [`AnyEntity`]. Code that only needs the
//! shared capability (update, draw, destroyed flag) goes through [`Entity`];
//! code that needs a concrete type goes through [`Variant`].

use super::collision::Aabb;
use super::state::{Background, Ball, Brick, Paddle};
use crate::renderer::Surface;
use crate::settings::Layout;

/// Variant tag, used to index the manager's per-type alias lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Background,
    Ball,
    Paddle,
    Brick,
}

impl Kind {
    pub const COUNT: usize = 4;
    pub const ALL: [Kind; Kind::COUNT] = [Kind::Background, Kind::Ball, Kind::Paddle, Kind::Brick];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Input sampled once per frame and handed to every update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
}

/// Everything an entity may read while advancing one frame
#[derive(Debug, Clone, Copy)]
pub struct UpdateCtx<'a> {
    pub layout: &'a Layout,
    pub input: FrameInput,
}

/// Shared per-frame behavior of all game objects
pub trait Entity {
    /// Advance state by one frame
    fn update(&mut self, ctx: &UpdateCtx);

    /// Emit draw calls for this entity
    fn draw(&self, surface: &mut dyn Surface);

    /// Bounding box in window coordinates
    fn bounds(&self) -> Aabb;

    /// Marked for removal at the next refresh
    fn is_destroyed(&self) -> bool;

    /// Mark for removal; the manager frees it on its next refresh
    fn destroy(&mut self);
}

/// Owned storage for any entity the manager holds
#[derive(Debug, Clone)]
pub enum AnyEntity {
    Background(Background),
    Ball(Ball),
    Paddle(Paddle),
    Brick(Brick),
}

macro_rules! dispatch {
    ($self:expr, $e:ident => $body:expr) => {
        match $self {
            AnyEntity::Background($e) => $body,
            AnyEntity::Ball($e) => $body,
            AnyEntity::Paddle($e) => $body,
            AnyEntity::Brick($e) => $body,
        }
    };
}

impl AnyEntity {
    pub fn kind(&self) -> Kind {
        match self {
            AnyEntity::Background(_) => Kind::Background,
            AnyEntity::Ball(_) => Kind::Ball,
            AnyEntity::Paddle(_) => Kind::Paddle,
            AnyEntity::Brick(_) => Kind::Brick,
        }
    }
}

impl Entity for AnyEntity {
    fn update(&mut self, ctx: &UpdateCtx) {
        dispatch!(self, e => e.update(ctx))
    }

    fn draw(&self, surface: &mut dyn Surface) {
        dispatch!(self, e => e.draw(surface))
    }

    fn bounds(&self) -> Aabb {
        dispatch!(self, e => e.bounds())
    }

    fn is_destroyed(&self) -> bool {
        dispatch!(self, e => e.is_destroyed())
    }

    fn destroy(&mut self) {
        dispatch!(self, e => e.destroy())
    }
}

/// A concrete entity type the manager can create and look up by type
pub trait Variant: Entity + Sized + 'static {
    const KIND: Kind;

    fn into_any(self) -> AnyEntity;
    fn from_any(entity: &AnyEntity) -> Option<&Self>;
    fn from_any_mut(entity: &mut AnyEntity) -> Option<&mut Self>;
}

macro_rules! impl_variant {
    ($ty:ident) => {
        impl Variant for $ty {
            const KIND: Kind = Kind::$ty;

            fn into_any(self) -> AnyEntity {
                AnyEntity::$ty(self)
            }

            fn from_any(entity: &AnyEntity) -> Option<&Self> {
                match entity {
                    AnyEntity::$ty(e) => Some(e),
                    _ => None,
                }
            }

            fn from_any_mut(entity: &mut AnyEntity) -> Option<&mut Self> {
                match entity {
                    AnyEntity::$ty(e) => Some(e),
                    _ => None,
                }
            }
        }
    };
}

impl_variant!(Background);
impl_variant!(Ball);
impl_variant!(Paddle);
impl_variant!(Brick);
