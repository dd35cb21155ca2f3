//! Level state machine and the per-frame loop body.
//!
//! Each frame either ticks the current level or, after a win, holds the
//! victory screen. Signals raised by entity ticks are handled here and
//! nowhere else:
//!
//!   - `Restart` rebuilds the current level,
//!   - `Advance` builds the next one,
//!   - `Win` builds the victory level and starts the hold timer.
//!
//! The outgoing level is always cleared out of the world before the incoming
//! one spawns, so the world only ever holds one level's entities.

use std::time::{Duration, Instant};

use vault_core::draw::Renderer;
use vault_core::input::InputSource;
use vault_core::time::Clock;

use crate::config::GameConfig;
use crate::level::{Level, LevelKind, LevelSlot};
use crate::world::{FrameOutcome, TickContext, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

pub struct Game {
    config: GameConfig,
    world: World,
    slots: Vec<LevelSlot>,
    current: usize,
    win_hold: Duration,
    win_hold_started: Option<Instant>,
}

impl Game {
    pub fn new(config: GameConfig, now: Instant) -> Self {
        let display = config.display_size();
        let win_hold = config.win_hold();
        let mut game = Self {
            config,
            world: World::new(display.x, display.y),
            slots: LevelKind::ALL
                .iter()
                .map(|kind| LevelSlot::Uninstantiated(*kind))
                .collect(),
            current: 0,
            win_hold,
            win_hold_started: None,
        };
        game.activate(0, now);
        log::info!("Game started on level '{}'", game.current_kind().name());
        game
    }

    /// One iteration of the main loop. The caller drops its renderer once
    /// this returns `Quit`.
    pub fn run_frame(
        &mut self,
        input: &dyn InputSource,
        renderer: &mut dyn Renderer,
        clock: &mut dyn Clock,
    ) -> LoopControl {
        if input.is_quit_requested() {
            log::info!("Quit requested");
            return LoopControl::Quit;
        }

        renderer.clear(self.config.background);
        let now = clock.now();
        if self.step(input, now, renderer) {
            renderer.flip();
        }
        clock.tick(self.config.framerate);
        LoopControl::Continue
    }

    /// Returns whether the frame should be presented.
    fn step(
        &mut self,
        input: &dyn InputSource,
        now: Instant,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if let Some(started) = self.win_hold_started {
            if now.saturating_duration_since(started) > self.win_hold {
                log::info!("Win hold over, back to the first level");
                self.win_hold_started = None;
                self.go_to_level(0, now);
            }
            self.render(renderer);
            return true;
        }

        match self.tick(input, now) {
            FrameOutcome::Continue => {
                self.render(renderer);
                true
            }
            FrameOutcome::Restart => {
                log::info!("Player caught on '{}', restarting", self.current_kind().name());
                self.go_to_level(self.current, now);
                false
            }
            FrameOutcome::Advance if self.current + 1 < self.last_index() => {
                self.go_to_level(self.current + 1, now);
                false
            }
            FrameOutcome::Advance | FrameOutcome::Win => {
                self.go_to_level(self.last_index(), now);
                self.win_hold_started = Some(now);
                log::info!("Level won, holding for {:?}", self.win_hold);
                true
            }
        }
    }

    /// Tick the current level's entities. Nothing ticks while no level is
    /// active.
    pub fn tick(&mut self, input: &dyn InputSource, now: Instant) -> FrameOutcome {
        let Some(level) = self.slots[self.current].active() else {
            return FrameOutcome::Continue;
        };
        let ctx = TickContext { input, now };
        level.tick(&mut self.world, &ctx)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        if let Some(level) = self.slots[self.current].active() {
            level.show(&self.world, renderer);
        }
    }

    /// Tear the current level down and build `index` in its place. Going to
    /// the current index rebuilds it from scratch.
    pub fn go_to_level(&mut self, index: usize, now: Instant) {
        assert!(index < self.slots.len(), "level index {index} out of range");
        let kind = self.current_kind();
        if let Some(level) = self.retire_current() {
            level.clear(&mut self.world);
        }
        debug_assert!(self.world.is_empty(), "outgoing level left entities behind");

        self.activate(index, now);
        log::info!("Level '{}' -> '{}'", kind.name(), self.current_kind().name());
    }

    /// Take the current level out of its slot, hidden, leaving the slot
    /// uninstantiated. Its entities stay in the world until it is cleared.
    fn retire_current(&mut self) -> Option<Level> {
        let kind = self.current_kind();
        match std::mem::replace(&mut self.slots[self.current], LevelSlot::Uninstantiated(kind)) {
            LevelSlot::Active(mut level) => {
                level.hide();
                Some(level)
            }
            LevelSlot::Uninstantiated(_) => None,
        }
    }

    fn activate(&mut self, index: usize, now: Instant) {
        let kind = self.slots[index].kind();
        let level = Level::instantiate(kind, &mut self.world, now);
        self.slots[index] = LevelSlot::Active(level);
        self.current = index;
    }

    fn last_index(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn current_kind(&self) -> LevelKind {
        self.slots[self.current].kind()
    }

    #[cfg(test)]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn current_level(&self) -> Option<&Level> {
        self.slots[self.current].active()
    }

    #[cfg(test)]
    pub fn is_win_hold_active(&self) -> bool {
        self.win_hold_started.is_some()
    }

    #[cfg(test)]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
