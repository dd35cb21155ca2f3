//! Arena owning every live entity, plus the wall and player indices used by
//! collision queries.
//!
//! Ids are handed out monotonically and never reused, so iterating the
//! `BTreeMap` visits entities in registration order. Frame dispatch walks the
//! whole arena: only the current level's entities may be alive when a frame
//! ticks, which the game's transition protocol guarantees.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use glam::Vec2;
use vault_core::geometry::Rect;
use vault_core::input::InputSource;

use crate::entity::{Entity, EntityId, EntityKind, EntitySpec};

/// Result of ticking entities. Anything but `Continue` asks the game loop for
/// a level transition and ends the frame's tick pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The player touched a hazard; rebuild the current level.
    Restart,
    /// The player reached the goal; move on to the next level.
    Advance,
    /// The player reached the goal of the last playable level.
    Win,
}

pub struct TickContext<'a> {
    pub input: &'a dyn InputSource,
    pub now: Instant,
}

pub struct World {
    next_id: EntityId,
    entities: BTreeMap<EntityId, Entity>,
    walls: BTreeSet<EntityId>,
    players: BTreeSet<EntityId>,
    display: Vec2,
}

impl World {
    pub fn new(display_width: f32, display_height: f32) -> Self {
        Self {
            next_id: 0,
            entities: BTreeMap::new(),
            walls: BTreeSet::new(),
            players: BTreeSet::new(),
            display: Vec2::new(display_width, display_height),
        }
    }

    pub fn display_size(&self) -> Vec2 {
        self.display
    }

    pub fn spawn(&mut self, spec: EntitySpec) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        match spec.kind {
            EntityKind::Wall => {
                self.walls.insert(id);
            }
            EntityKind::Player => {
                self.players.insert(id);
            }
            EntityKind::Prop | EntityKind::Hazard => {}
        }

        let entity = Entity {
            id,
            kind: spec.kind,
            rect: Rect::new(spec.center, spec.size),
            appearance: spec.appearance,
            on_screen: !spec.hidden,
            alive: true,
            motion: spec.motion,
            behavior: spec.behavior,
        };
        log::trace!("Spawned {:?} #{id} at {}", entity.kind, spec.center);
        self.entities.insert(id, entity);
        id
    }

    /// Unregister `id` everywhere and hand back the dead entity.
    /// Clearing an id twice is a caller bug and panics.
    pub fn clear(&mut self, id: EntityId) -> Entity {
        let Some(mut entity) = self.entities.remove(&id) else {
            panic!("clear of entity #{id}, which is not registered");
        };
        self.walls.remove(&id);
        self.players.remove(&id);
        entity.alive = false;
        entity
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn walls(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.walls.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn players(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.players.iter().filter_map(|id| self.entities.get(id))
    }

    pub fn hide(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.hide();
        }
    }

    pub fn reveal(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.reveal();
        }
    }

    /// Whether `id` is visible and overlapping any registered player.
    pub fn touches_player(&self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get(&id) else {
            return false;
        };
        self.players().any(|player| entity.is_collide(player))
    }

    /// Tick every live entity in registration order, stopping at the first
    /// transition request.
    pub fn tick_all(&mut self, ctx: &TickContext<'_>) -> FrameOutcome {
        let ids: Vec<EntityId> = self.ids().collect();
        for id in ids {
            let outcome = self.tick_entity(id, ctx);
            if outcome != FrameOutcome::Continue {
                log::debug!("Entity #{id} raised {outcome:?}");
                return outcome;
            }
        }
        FrameOutcome::Continue
    }

    /// Kind-specific step, then route following, then the attached behavior.
    pub fn tick_entity(&mut self, id: EntityId, ctx: &TickContext<'_>) -> FrameOutcome {
        let Some(entity) = self.entities.get(&id) else {
            return FrameOutcome::Continue;
        };
        if !entity.alive {
            return FrameOutcome::Continue;
        }
        let kind = entity.kind;
        let hazard_hit = kind == EntityKind::Hazard && self.touches_player(id);

        match kind {
            EntityKind::Player => self.steer_player(id, ctx.input),
            EntityKind::Hazard if hazard_hit => return FrameOutcome::Restart,
            EntityKind::Hazard | EntityKind::Prop | EntityKind::Wall => {}
        }

        self.follow_route(id);
        self.run_behavior(id, ctx.now)
    }
}
