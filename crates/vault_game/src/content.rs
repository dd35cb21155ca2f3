//! Fixed level layouts. Coordinates are rectangle centers in display pixels.

use std::time::{Duration, Instant};

use glam::Vec2;
use vault_core::draw::{Appearance, Rgba, BLACK, BROWN};

use crate::behavior::Behavior;
use crate::entity::{EntityKind, EntitySpec, Motion};
use crate::level::{Level, LevelKind};
use crate::route::Route;
use crate::world::{FrameOutcome, World};

// Fallback colors for backends that draw sprites as filled rectangles.
const PLAYER_RED: Rgba = [0.85, 0.12, 0.12, 1.0];
const MONSTER_PURPLE: Rgba = [0.35, 0.1, 0.45, 1.0];
const KEY_YELLOW: Rgba = [0.95, 0.8, 0.15, 1.0];
const GRAIL_GOLD: Rgba = [0.8, 0.6, 0.1, 1.0];
const SPIKES_GREY: Rgba = [0.45, 0.45, 0.5, 1.0];
const WIN_GREEN: Rgba = [0.2, 0.6, 0.3, 1.0];

const PLAYER_SPAWN: Vec2 = Vec2::new(10.0, 10.0);
const PLAYER_SIZE: Vec2 = Vec2::new(40.0, 30.0);

/// Outer boundary and inner corridor walls, shared by both playable levels.
const BOUNDARY_WALLS: [(f32, f32, f32, f32); 7] = [
    (102.0, 250.0, 5.0, 400.0),
    (500.0, 602.0, 800.0, 5.0),
    (902.0, 327.0, 5.0, 555.0),
    (500.0, 52.0, 800.0, 5.0),
    (400.0, 452.0, 600.0, 5.0),
    (702.0, 125.0, 5.0, 150.0),
    (702.0, 402.0, 5.0, 105.0),
];

const DOOR: (f32, f32, f32, f32) = (702.0, 272.0, 5.0, 145.0);
const OPEN_DOOR: (f32, f32, f32, f32) = (627.0, 202.0, 145.0, 5.0);

const PATROL_START: Vec2 = Vec2::new(810.0, 202.0);
const PATROL_END: Vec2 = Vec2::new(810.0, 500.0);
const PATROL_SIZE: Vec2 = Vec2::new(120.0, 105.0);
const PATROL_SPEED: f32 = 5.0;

const KEY_CENTER: Vec2 = Vec2::new(795.0, 105.0);
const KEY_SIZE: Vec2 = Vec2::new(50.0, 50.0);

const GOAL_CENTER: Vec2 = Vec2::new(400.0, 300.0);
const GOAL_SIZE: Vec2 = Vec2::new(100.0, 100.0);

const SPIKES_CENTER: Vec2 = Vec2::new(600.0, 530.0);
const SPIKES_SIZE: Vec2 = Vec2::new(200.0, 200.0);
const SPIKES_REVEAL_AFTER: Duration = Duration::from_secs(1);
const SPIKES_PERIOD: Duration = Duration::from_secs(2);

pub(crate) fn populate(level: &mut Level, world: &mut World, now: Instant) {
    match level.kind() {
        LevelKind::Entrance => build_vault(level, world, now, false, FrameOutcome::Advance),
        LevelKind::Gauntlet => build_vault(level, world, now, true, FrameOutcome::Win),
        LevelKind::Victory => build_victory(level, world),
    }
}

fn build_vault(
    level: &mut Level,
    world: &mut World,
    now: Instant,
    with_spikes: bool,
    goal_outcome: FrameOutcome,
) {
    level.spawn_player(
        world,
        EntitySpec::new(
            EntityKind::Player,
            PLAYER_SPAWN,
            PLAYER_SIZE,
            Appearance::sprite("red_ball", PLAYER_RED),
        ),
    );

    for (x, y, w, h) in BOUNDARY_WALLS {
        level.spawn_wall(world, EntitySpec::wall(x, y, w, h, Appearance::solid(BLACK)));
    }

    let (x, y, w, h) = DOOR;
    let door = Level::spawn_unlisted(
        world,
        EntitySpec::wall(x, y, w, h, Appearance::solid(BROWN)),
    );
    let (x, y, w, h) = OPEN_DOOR;
    let open_door = Level::spawn_unlisted(
        world,
        EntitySpec::wall(x, y, w, h, Appearance::solid(BROWN)).hidden(),
    );

    let patrol = Level::spawn_unlisted(
        world,
        EntitySpec::new(
            EntityKind::Hazard,
            PATROL_START,
            PATROL_SIZE,
            Appearance::sprite("monster_3", MONSTER_PURPLE),
        )
        .with_motion(
            Motion::new(PATROL_SPEED).with_route(Route::looping(&[PATROL_START, PATROL_END])),
        ),
    );

    let spikes = with_spikes.then(|| {
        Level::spawn_unlisted(
            world,
            EntitySpec::new(
                EntityKind::Hazard,
                SPIKES_CENTER,
                SPIKES_SIZE,
                Appearance::sprite("spikes", SPIKES_GREY),
            )
            .hidden()
            .with_behavior(Behavior::TimedToggle {
                reveal_after: SPIKES_REVEAL_AFTER,
                period: SPIKES_PERIOD,
                cycle_start: now,
            }),
        )
    });

    let key = Level::spawn_unlisted(
        world,
        EntitySpec::new(
            EntityKind::Prop,
            KEY_CENTER,
            KEY_SIZE,
            Appearance::sprite("key", KEY_YELLOW),
        )
        .with_behavior(Behavior::KeyPickup { door, open_door }),
    );

    let goal = Level::spawn_unlisted(
        world,
        EntitySpec::new(
            EntityKind::Prop,
            GOAL_CENTER,
            GOAL_SIZE,
            Appearance::sprite("grail", GRAIL_GOLD),
        )
        .with_behavior(Behavior::Goal {
            outcome: goal_outcome,
        }),
    );

    // Draw order differs from spawn order: hazards go beneath the doors.
    level.list_entity(patrol);
    if let Some(spikes) = spikes {
        level.list_entity(spikes);
    }
    for id in [door, open_door, key, goal] {
        level.list_entity(id);
    }
}

fn build_victory(level: &mut Level, world: &mut World) {
    let display = world.display_size();
    let title = Level::spawn_unlisted(
        world,
        EntitySpec::new(
            EntityKind::Prop,
            display / 2.0,
            display,
            Appearance::sprite("win", WIN_GREEN),
        ),
    );
    level.list_entity(title);
}
