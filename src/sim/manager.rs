//! Entity manager
//!
//! Owns every entity in a slot arena. Two views index into it:
//! - the canonical list, all entities in insertion order (update/draw order)
//! - one alias list per [`Kind`], for type-scoped iteration
//!
//! Both views hold [`EntityId`] handles rather than references. A handle
//! carries the generation of its slot, so once an entity is freed every
//! handle to it stops resolving instead of pointing at whatever reuses
//! the slot.

use super::entity::{AnyEntity, Entity, Kind, UpdateCtx, Variant};
use crate::renderer::Surface;

/// Generational handle to an entity owned by an [`EntityManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    entity: Option<AnyEntity>,
}

impl Slot {
    fn get(&self, generation: u32) -> Option<&AnyEntity> {
        if self.generation == generation {
            self.entity.as_ref()
        } else {
            None
        }
    }

    fn get_mut(&mut self, generation: u32) -> Option<&mut AnyEntity> {
        if self.generation == generation {
            self.entity.as_mut()
        } else {
            None
        }
    }

    /// Typed access to a live (not destroyed) entity
    fn live_mut<V: Variant>(&mut self, generation: u32) -> Option<&mut V> {
        self.get_mut(generation)
            .filter(|e| !e.is_destroyed())
            .and_then(V::from_any_mut)
    }

    /// Drop the entity and invalidate every handle to it
    fn free(&mut self) {
        self.entity = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Two distinct slots borrowed mutably at once
fn slot_pair_mut(slots: &mut [Slot], a: usize, b: usize) -> (&mut Slot, &mut Slot) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = slots.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = slots.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

/// Owner of all game entities
#[derive(Debug, Default)]
pub struct EntityManager {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    /// Canonical sequence, insertion order
    all: Vec<EntityId>,
    /// Alias sequences, indexed by [`Kind::index`]
    grouped: [Vec<EntityId>; Kind::COUNT],
}

impl EntityManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` and register it in the canonical list and
    /// its type's alias list
    ///
    /// The returned handle resolves until the entity is purged by
    /// [`refresh`](Self::refresh) or [`clear`](Self::clear).
    pub fn create<V: Variant>(&mut self, entity: V) -> EntityId {
        let entity = entity.into_any();
        let id = match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                EntityId {
                    index,
                    generation: 0,
                }
            }
        };

        self.all.push(id);
        self.grouped[V::KIND.index()].push(id);
        id
    }

    /// Resolve a handle, whatever its type
    pub fn entity(&self, id: EntityId) -> Option<&AnyEntity> {
        self.slots.get(id.index as usize)?.get(id.generation)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut AnyEntity> {
        self.slots.get_mut(id.index as usize)?.get_mut(id.generation)
    }

    /// Resolve a handle to a concrete type
    pub fn get<V: Variant>(&self, id: EntityId) -> Option<&V> {
        self.entity(id).and_then(V::from_any)
    }

    pub fn get_mut<V: Variant>(&mut self, id: EntityId) -> Option<&mut V> {
        self.entity_mut(id).and_then(V::from_any_mut)
    }

    /// Whether `id` still refers to an owned entity (destroyed or not)
    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Number of owned entities, including ones awaiting refresh
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Canonical sequence
    pub fn ids(&self) -> &[EntityId] {
        &self.all
    }

    /// Alias sequence for `V`
    pub fn ids_of<V: Variant>(&self) -> &[EntityId] {
        &self.grouped[V::KIND.index()]
    }

    /// Live (not destroyed) entities of type `V`
    pub fn count_of<V: Variant>(&self) -> usize {
        self.ids_of::<V>()
            .iter()
            .filter_map(|&id| self.entity(id))
            .filter(|e| !e.is_destroyed())
            .count()
    }

    /// All owned entities in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &AnyEntity)> {
        self.all
            .iter()
            .filter_map(|&id| self.entity(id).map(|e| (id, e)))
    }

    /// Visit every live entity of type `V` in insertion order
    ///
    /// The visitor may mark entities destroyed; they stay in place until the
    /// next refresh but are skipped from then on.
    pub fn for_each_of<V: Variant>(&mut self, mut visitor: impl FnMut(&mut V)) {
        let Self { slots, grouped, .. } = self;
        for id in &grouped[V::KIND.index()] {
            if let Some(entity) = slots[id.index as usize].live_mut::<V>(id.generation) {
                visitor(entity);
            }
        }
    }

    /// Visit every live (`A`, `B`) pair, `A` in the outer loop
    ///
    /// Liveness is re-checked for each pair, so an entity destroyed by an
    /// earlier pair is not visited again this pass.
    pub fn for_each_pair<A: Variant, B: Variant>(&mut self, mut visitor: impl FnMut(&mut A, &mut B)) {
        let Self { slots, grouped, .. } = self;
        for a_id in &grouped[A::KIND.index()] {
            for b_id in &grouped[B::KIND.index()] {
                if a_id.index == b_id.index {
                    continue;
                }
                let (a_slot, b_slot) =
                    slot_pair_mut(slots, a_id.index as usize, b_id.index as usize);
                let (Some(a), Some(b)) = (
                    a_slot.live_mut::<A>(a_id.generation),
                    b_slot.live_mut::<B>(b_id.generation),
                ) else {
                    continue;
                };
                visitor(a, b);
            }
        }
    }

    /// Advance every live entity by one frame, in canonical order
    pub fn update_all(&mut self, ctx: &UpdateCtx) {
        let Self { slots, all, .. } = self;
        for id in all.iter() {
            if let Some(entity) = slots[id.index as usize].get_mut(id.generation) {
                if !entity.is_destroyed() {
                    entity.update(ctx);
                }
            }
        }
    }

    /// Draw every live entity in canonical order; later entities land on top
    pub fn draw_all(&self, surface: &mut dyn Surface) {
        for (_, entity) in self.iter() {
            if !entity.is_destroyed() {
                entity.draw(surface);
            }
        }
    }

    /// Purge destroyed entities; returns how many were freed
    ///
    /// Alias lists are pruned before the canonical list frees storage, so no
    /// alias ever outlives the entity it names.
    pub fn refresh(&mut self) -> usize {
        let Self {
            slots,
            free_slots,
            all,
            grouped,
        } = self;

        for group in grouped.iter_mut() {
            group.retain(|id| {
                slots[id.index as usize]
                    .get(id.generation)
                    .is_some_and(|e| !e.is_destroyed())
            });
        }

        let before = all.len();
        all.retain(|id| {
            let slot = &mut slots[id.index as usize];
            let keep = slot
                .get(id.generation)
                .is_some_and(|e| !e.is_destroyed());
            if !keep {
                slot.free();
                free_slots.push(id.index);
            }
            keep
        });

        let purged = before - all.len();
        if purged > 0 {
            log::debug!("refresh purged {} entities, {} remain", purged, all.len());
        }
        purged
    }

    /// Drop every entity regardless of its destroyed flag
    pub fn clear(&mut self) {
        for group in self.grouped.iter_mut() {
            group.clear();
        }
        self.all.clear();

        self.free_slots.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.entity.is_some() {
                slot.free();
            }
            self.free_slots.push(index as u32);
        }
    }
}
