//! Movement resolver: display clamping, then an all-or-nothing wall check.
//!
//! There is no axis-separated sliding. A displacement is first corrected
//! once against the display bounds, and the corrected displacement is then
//! either committed whole or rejected whole if it would overlap any visible
//! wall. A diagonal move into a corner can therefore be clamped on one axis
//! and still be refused.

use glam::Vec2;
use vault_core::geometry::Rect;
use vault_core::input::{InputSource, Key};

use crate::entity::EntityId;
use crate::world::World;

impl World {
    /// Returns whether the move was committed. Moving an unregistered id panics.
    pub fn move_entity(&mut self, id: EntityId, dx: f32, dy: f32) -> bool {
        let Some(entity) = self.get(id) else {
            panic!("move of entity #{id}, which is not registered");
        };
        if !entity.on_screen {
            return false;
        }

        let mut delta = Vec2::new(dx, dy);
        if entity.only_on_screen() {
            delta = clamp_to_display(&entity.rect, delta, self.display_size());
        }

        let trial = entity.rect.translated(delta);
        let blocked = self
            .walls()
            .any(|wall| wall.id != id && wall.overlaps(&trial));
        if blocked {
            log::trace!("Move of #{id} by {delta} rejected by a wall");
            return false;
        }

        if let Some(entity) = self.get_mut(id) {
            entity.rect = trial;
        }
        true
    }

    pub(crate) fn steer_player(&mut self, id: EntityId, input: &dyn InputSource) {
        let Some(player) = self.get(id) else {
            return;
        };
        if !player.on_screen {
            return;
        }
        let step = steering_step(input, player.speed());
        self.move_entity(id, step.x, step.y);
    }

    /// Advance toward the current waypoint, or move the cursor on once the
    /// center sits exactly on it.
    pub(crate) fn follow_route(&mut self, id: EntityId) {
        let Some(entity) = self.get(id) else {
            return;
        };
        let Some(motion) = &entity.motion else {
            return;
        };
        if !entity.on_screen || !motion.on_route {
            return;
        }
        let Some(target) = motion.route.as_ref().and_then(|route| route.target()) else {
            return;
        };

        let center = entity.rect.center();
        if center == target {
            if let Some(route) = self
                .get_mut(id)
                .and_then(|e| e.motion.as_mut())
                .and_then(|m| m.route.as_mut())
            {
                route.advance();
            }
        } else {
            let step = route_step(center, target, motion.speed);
            self.move_entity(id, step.x, step.y);
        }
    }
}

/// Single-pass correction so `rect + delta` stays inside `[0, display]`.
/// Vertical: top overflow wins over bottom. Horizontal: left wins over right.
pub fn clamp_to_display(rect: &Rect, delta: Vec2, display: Vec2) -> Vec2 {
    let mut delta = delta;

    let next_top = rect.top() + delta.y;
    let next_bottom = next_top + rect.height;
    if next_top < 0.0 {
        delta.y -= next_top;
    } else if next_bottom > display.y {
        delta.y -= next_bottom - display.y;
    }

    let next_left = rect.left() + delta.x;
    let next_right = next_left + rect.width;
    if next_left < 0.0 {
        delta.x -= next_left;
    } else if next_right > display.x {
        delta.x -= next_right - display.x;
    }

    delta
}

/// Scale a two-axis step so its length is `speed`, not `speed * sqrt(2)`.
pub fn diagonal_step(dx: f32, dy: f32, speed: f32) -> Vec2 {
    if dx != 0.0 && dy != 0.0 {
        let per_axis = (speed * speed / 2.0).sqrt();
        Vec2::new(per_axis.copysign(dx), per_axis.copysign(dy))
    } else {
        Vec2::new(dx, dy)
    }
}

/// Up and Down cancel out; Left takes precedence over Right.
pub fn steering_step(input: &dyn InputSource, speed: f32) -> Vec2 {
    let mut dy = 0.0;
    if input.is_key_down(Key::Up) {
        dy -= speed;
    }
    if input.is_key_down(Key::Down) {
        dy += speed;
    }

    let dx = if input.is_key_down(Key::Left) {
        -speed
    } else if input.is_key_down(Key::Right) {
        speed
    } else {
        0.0
    };

    diagonal_step(dx, dy, speed)
}

/// Per-axis step toward `target`, capped at `speed`, never overshooting.
pub fn route_step(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let axis = |distance: f32| {
        if distance >= 0.0 {
            speed.min(distance)
        } else {
            (-speed).max(distance)
        }
    };
    let distance = target - from;
    Vec2::new(axis(distance.x), axis(distance.y))
}
