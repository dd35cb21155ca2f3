//! One concrete entity type for everything in a level.
//!
//! Capabilities are composed rather than inherited: an [`EntityKind`] decides
//! which registry the entity joins and what its kind-specific frame step is,
//! an optional [`Motion`] makes it movable, and an optional [`Behavior`]
//! carries level-specific logic.

use glam::Vec2;
use vault_core::draw::{Appearance, Renderer};
use vault_core::geometry::Rect;

use crate::behavior::Behavior;
use crate::route::Route;

pub type EntityId = u32;

pub const DEFAULT_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Prop,
    /// Solid geometry; blocks every move that would overlap it while visible.
    Wall,
    /// Touching a player while visible restarts the level.
    Hazard,
    /// Steered by keyboard input every frame.
    Player,
}

impl EntityKind {
    fn is_movable(self) -> bool {
        matches!(self, Self::Hazard | Self::Player)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub speed: f32,
    pub route: Option<Route>,
    pub on_route: bool,
    pub only_on_screen: bool,
}

impl Motion {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = Some(route);
        self.on_route = true;
        self
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            route: None,
            on_route: false,
            only_on_screen: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rect: Rect,
    pub appearance: Appearance,
    pub on_screen: bool,
    pub alive: bool,
    pub motion: Option<Motion>,
    pub behavior: Option<Behavior>,
}

impl Entity {
    pub fn show(&self, renderer: &mut dyn Renderer) {
        if !self.on_screen {
            return;
        }
        renderer.present(&self.rect, &self.appearance);
    }

    pub fn hide(&mut self) {
        self.on_screen = false;
    }

    pub fn reveal(&mut self) {
        self.on_screen = true;
    }

    /// A hidden entity collides with nothing.
    pub fn is_collide(&self, other: &Entity) -> bool {
        self.overlaps(&other.rect)
    }

    pub fn overlaps(&self, rect: &Rect) -> bool {
        self.on_screen && self.rect.intersects(rect)
    }

    pub fn speed(&self) -> f32 {
        self.motion.as_ref().map_or(DEFAULT_SPEED, |m| m.speed)
    }

    /// Entities without a motion profile are clamped like the default one.
    pub fn only_on_screen(&self) -> bool {
        self.motion.as_ref().map_or(true, |m| m.only_on_screen)
    }
}

/// Everything needed to spawn an entity; ids are handed out by the world.
#[derive(Debug, Clone)]
pub struct EntitySpec {
    pub kind: EntityKind,
    pub center: Vec2,
    pub size: Vec2,
    pub appearance: Appearance,
    pub motion: Option<Motion>,
    pub behavior: Option<Behavior>,
    pub hidden: bool,
}

impl EntitySpec {
    pub fn new(kind: EntityKind, center: Vec2, size: Vec2, appearance: Appearance) -> Self {
        Self {
            kind,
            center,
            size,
            appearance,
            motion: kind.is_movable().then(Motion::default),
            behavior: None,
            hidden: false,
        }
    }

    pub fn wall(x: f32, y: f32, width: f32, height: f32, appearance: Appearance) -> Self {
        Self::new(
            EntityKind::Wall,
            Vec2::new(x, y),
            Vec2::new(width, height),
            appearance,
        )
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}
