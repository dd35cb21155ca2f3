//! Level lifecycle: fixed content spawned into the world on entry, torn down
//! in a fixed order on exit.

use std::time::Instant;

use vault_core::draw::Renderer;

use crate::content;
use crate::entity::{EntityId, EntitySpec};
use crate::world::{FrameOutcome, TickContext, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Entrance,
    Gauntlet,
    /// Terminal win display.
    Victory,
}

impl LevelKind {
    /// Every level in play order.
    pub const ALL: [LevelKind; 3] = [Self::Entrance, Self::Gauntlet, Self::Victory];

    pub fn name(self) -> &'static str {
        match self {
            Self::Entrance => "entrance",
            Self::Gauntlet => "gauntlet",
            Self::Victory => "victory",
        }
    }
}

#[derive(Debug)]
pub struct Level {
    kind: LevelKind,
    player: Option<EntityId>,
    walls: Vec<EntityId>,
    entities: Vec<EntityId>,
    on_screen: bool,
}

impl Level {
    pub fn instantiate(kind: LevelKind, world: &mut World, now: Instant) -> Self {
        let mut level = Self {
            kind,
            player: None,
            walls: Vec::new(),
            entities: Vec::new(),
            on_screen: true,
        };
        content::populate(&mut level, world, now);
        log::debug!(
            "Instantiated level '{}' with {} walls and {} entities",
            kind.name(),
            level.walls.len(),
            level.entities.len()
        );
        level
    }

    pub(crate) fn spawn_player(&mut self, world: &mut World, spec: EntitySpec) -> EntityId {
        debug_assert!(self.player.is_none(), "level already has a player");
        let id = world.spawn(spec);
        self.player = Some(id);
        id
    }

    pub(crate) fn spawn_wall(&mut self, world: &mut World, spec: EntitySpec) -> EntityId {
        let id = world.spawn(spec);
        self.walls.push(id);
        id
    }

    /// Spawn without listing it for rendering yet; see [`Level::list_entity`].
    pub(crate) fn spawn_unlisted(world: &mut World, spec: EntitySpec) -> EntityId {
        world.spawn(spec)
    }

    pub(crate) fn list_entity(&mut self, id: EntityId) {
        self.entities.push(id);
    }

    pub fn tick(&self, world: &mut World, ctx: &TickContext<'_>) -> FrameOutcome {
        world.tick_all(ctx)
    }

    /// Player first, then walls, then everything else.
    pub fn show(&self, world: &World, renderer: &mut dyn Renderer) {
        if !self.on_screen {
            return;
        }
        let ordered = self
            .player
            .iter()
            .chain(self.walls.iter())
            .chain(self.entities.iter());
        for id in ordered {
            if let Some(entity) = world.get(*id) {
                entity.show(renderer);
            }
        }
    }

    pub fn hide(&mut self) {
        self.on_screen = false;
    }

    /// Remove every entity this level spawned: player, walls, then the rest.
    pub fn clear(self, world: &mut World) {
        if let Some(player) = self.player {
            world.clear(player);
        }
        for id in self.walls.iter().chain(self.entities.iter()) {
            world.clear(*id);
        }
        log::debug!("Cleared level '{}'", self.kind.name());
    }

    pub fn kind(&self) -> LevelKind {
        self.kind
    }

    #[cfg(test)]
    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    #[cfg(test)]
    pub fn walls(&self) -> &[EntityId] {
        &self.walls
    }

    #[cfg(test)]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    #[cfg(test)]
    pub fn is_on_screen(&self) -> bool {
        self.on_screen
    }
}

/// A level is only built when the game transitions into it.
#[derive(Debug)]
pub enum LevelSlot {
    Uninstantiated(LevelKind),
    Active(Level),
}

impl LevelSlot {
    pub fn kind(&self) -> LevelKind {
        match self {
            Self::Uninstantiated(kind) => *kind,
            Self::Active(level) => level.kind(),
        }
    }

    pub fn active(&self) -> Option<&Level> {
        match self {
            Self::Active(level) => Some(level),
            Self::Uninstantiated(_) => None,
        }
    }
}
