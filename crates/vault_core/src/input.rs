//! Keyboard state fed from window events, plus the narrow [`InputSource`]
//! view the simulation reads each frame.
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is
//!   physically down. Player steering only ever asks this question.
//!
//! - **Edge-triggered (just_pressed):** true only during the frame the press
//!   happened, cleared by `end_frame()` once the frame has been simulated.
//!   OS key repeat does not re-trigger it.
//!
//! A quit request latches until the state is dropped. A window close latches
//! immediately; an Escape press is visible through the edge set for its frame
//! and latched by `end_frame()`.

use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
}

/// What the frame loop and the entities are allowed to ask about input.
pub trait InputSource {
    fn is_quit_requested(&self) -> bool;
    fn is_key_down(&self, key: Key) -> bool;
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    quit_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            quit_requested: false,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            log::debug!("Quit requested");
        }
        self.quit_requested = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn end_frame(&mut self) {
        if self.is_just_pressed(Key::Escape) {
            self.request_quit();
        }
        self.just_pressed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputState {
    fn is_quit_requested(&self) -> bool {
        self.quit_requested || self.is_just_pressed(Key::Escape)
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.is_held(key)
    }
}
