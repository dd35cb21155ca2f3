//! Level-specific per-frame logic attached to individual entities.

use std::time::{Duration, Instant};

use crate::entity::EntityId;
use crate::world::{FrameOutcome, World};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Touching the key hides it and the closed door and shows the open one.
    /// Re-applied every frame the player stays on it.
    KeyPickup { door: EntityId, open_door: EntityId },
    /// Touching the goal raises `outcome`.
    Goal { outcome: FrameOutcome },
    /// Shown from `reveal_after` into each cycle until `period` has passed,
    /// then hidden and the cycle restarts.
    TimedToggle {
        reveal_after: Duration,
        period: Duration,
        cycle_start: Instant,
    },
}

impl World {
    pub(crate) fn run_behavior(&mut self, id: EntityId, now: Instant) -> FrameOutcome {
        let Some(entity) = self.get(id) else {
            return FrameOutcome::Continue;
        };
        let Some(behavior) = entity.behavior else {
            return FrameOutcome::Continue;
        };
        let touched = self.touches_player(id);

        match behavior {
            Behavior::KeyPickup { door, open_door } => {
                if touched {
                    let door_was_closed = self.get(door).is_some_and(|d| d.on_screen);
                    self.hide(id);
                    self.hide(door);
                    self.reveal(open_door);
                    if door_was_closed {
                        log::info!("Key picked up, door unlocked");
                    }
                }
                FrameOutcome::Continue
            }
            Behavior::Goal { outcome } => {
                if touched {
                    outcome
                } else {
                    FrameOutcome::Continue
                }
            }
            Behavior::TimedToggle {
                reveal_after,
                period,
                cycle_start,
            } => {
                let elapsed = now.saturating_duration_since(cycle_start);
                if elapsed > period {
                    self.hide(id);
                    if let Some(Behavior::TimedToggle { cycle_start, .. }) =
                        self.get_mut(id).and_then(|e| e.behavior.as_mut())
                    {
                        *cycle_start = now;
                    }
                } else if elapsed > reveal_after {
                    self.reveal(id);
                }
                FrameOutcome::Continue
            }
        }
    }
}
