//! Center-anchored axis-aligned rectangles.
//!
//! Every simulated object is positioned by its center; edges are derived.
//! Overlap is strict: rectangles that only share an edge do not intersect,
//! and a rectangle with zero width or height never intersects anything.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        assert!(
            size.x >= 0.0 && size.y >= 0.0,
            "rect size must be non-negative, got {}x{}",
            size.x,
            size.y
        );
        Self {
            x: center.x,
            y: center.y,
            width: size.x,
            height: size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn right(&self) -> f32 {
        self.left() + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top() + self.height
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if !a.has_area() || !b.has_area() {
        return false;
    }
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn edges_are_derived_from_center() {
        let r = rect(100.0, 50.0, 40.0, 30.0);
        assert_eq!(r.left(), 80.0);
        assert_eq!(r.top(), 35.0);
        assert_eq!(r.right(), 120.0);
        assert_eq!(r.bottom(), 65.0);
    }

    #[test]
    fn odd_sizes_keep_half_pixel_edges() {
        let r = rect(702.0, 272.0, 5.0, 145.0);
        assert_eq!(r.left(), 699.5);
        assert_eq!(r.right(), 704.5);
        assert_eq!(r.top(), 199.5);
        assert_eq!(r.bottom(), 344.5);
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 8.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let right_neighbour = rect(10.0, 0.0, 10.0, 10.0);
        let below_neighbour = rect(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right_neighbour));
        assert!(!intersects(&a, &below_neighbour));
    }

    #[test]
    fn overlap_on_one_axis_only_is_not_enough() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(5.0, 50.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn contained_rect_intersects() {
        let outer = rect(640.0, 360.0, 1280.0, 720.0);
        let inner = rect(10.0, 10.0, 4.0, 4.0);
        assert!(intersects(&outer, &inner));
    }

    #[test]
    fn zero_area_rect_never_intersects() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let line = rect(0.0, 0.0, 0.0, 10.0);
        assert!(!intersects(&a, &line));
        assert!(!intersects(&line, &a));
        let flat = rect(0.0, 0.0, 10.0, 0.0);
        assert!(!intersects(&a, &flat));
        assert!(!flat.intersects(&a));
    }

    #[test]
    fn zero_width_wall_inside_a_rect_does_not_block() {
        let wall = rect(50.0, 50.0, 0.0, 100.0);
        let mover = rect(50.0, 50.0, 20.0, 20.0);
        assert!(!wall.has_area());
        assert!(mover.has_area());
        assert!(!mover.intersects(&wall));
    }

    #[test]
    fn translated_moves_center_only() {
        let r = rect(10.0, 10.0, 4.0, 6.0).translated(Vec2::new(3.0, -2.0));
        assert_eq!(r.center(), Vec2::new(13.0, 8.0));
        assert_eq!(r.width, 4.0);
        assert_eq!(r.height, 6.0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_size_is_rejected() {
        let _ = rect(0.0, 0.0, -1.0, 5.0);
    }
}
