//! Test doubles for the renderer and input seams.

use std::collections::HashSet;

use vault_core::draw::{Appearance, Renderer, Rgba};
use vault_core::geometry::Rect;
use vault_core::input::{InputSource, Key};

/// Records every call so tests can check what reached the screen and in
/// which order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub presented: Vec<(Rect, Appearance)>,
    pub clears: Vec<Rgba>,
    pub flips: usize,
    frame_start: usize,
}

impl RecordingRenderer {
    /// Everything presented since the most recent `clear`.
    pub fn last_frame(&self) -> &[(Rect, Appearance)] {
        &self.presented[self.frame_start..]
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, background: Rgba) {
        self.clears.push(background);
        self.frame_start = self.presented.len();
    }

    fn present(&mut self, rect: &Rect, appearance: &Appearance) {
        self.presented.push((*rect, *appearance));
    }

    fn flip(&mut self) {
        self.flips += 1;
    }
}

pub struct NoInput;

impl InputSource for NoInput {
    fn is_quit_requested(&self) -> bool {
        false
    }

    fn is_key_down(&self, _key: Key) -> bool {
        false
    }
}

pub struct QuitInput;

impl InputSource for QuitInput {
    fn is_quit_requested(&self) -> bool {
        true
    }

    fn is_key_down(&self, _key: Key) -> bool {
        false
    }
}

pub struct HeldKeys(HashSet<Key>);

impl HeldKeys {
    pub fn new(keys: &[Key]) -> Self {
        Self(keys.iter().copied().collect())
    }
}

impl InputSource for HeldKeys {
    fn is_quit_requested(&self) -> bool {
        false
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}
