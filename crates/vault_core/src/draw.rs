//! Drawing contract between the simulation and whatever puts pixels on screen.
//!
//! The simulation only ever hands out a bounding rectangle and an
//! [`Appearance`]; how that becomes pixels is the backend's business.

use crate::geometry::Rect;

pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const BROWN: Rgba = [0.647, 0.165, 0.165, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub color: Rgba,
    /// Opaque sprite identifier. Backends without image support draw `color`.
    pub sprite: Option<&'static str>,
}

impl Appearance {
    pub const fn solid(color: Rgba) -> Self {
        Self {
            color,
            sprite: None,
        }
    }

    pub const fn sprite(sprite: &'static str, color: Rgba) -> Self {
        Self {
            color,
            sprite: Some(sprite),
        }
    }
}

pub trait Renderer {
    /// Reset the frame buffer to `background`.
    fn clear(&mut self, background: Rgba);
    /// Queue `appearance` filling `rect`.
    fn present(&mut self, rect: &Rect, appearance: &Appearance);
    /// Commit everything queued since the last `clear`.
    fn flip(&mut self);
}
