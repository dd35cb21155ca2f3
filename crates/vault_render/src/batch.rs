//! CPU-side quad mesh, rebuilt every frame and streamed to the GPU on flip.

use vault_core::draw::Rgba;
use vault_core::geometry::Rect;

use crate::vertex::QuadVertex;

#[derive(Debug, Default)]
pub struct QuadBatch {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Later quads draw over earlier ones.
    pub fn push_rect(&mut self, rect: &Rect, color: Rgba) {
        let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        let base_index = self.vertices.len() as u32;

        self.vertices.push(QuadVertex {
            position: [left, bottom],
            color,
        });
        self.vertices.push(QuadVertex {
            position: [right, bottom],
            color,
        });
        self.vertices.push(QuadVertex {
            position: [right, top],
            color,
        });
        self.vertices.push(QuadVertex {
            position: [left, top],
            color,
        });

        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn push_rect_emits_corners_from_rect_edges() {
        let mut batch = QuadBatch::new();
        let rect = Rect::new(Vec2::new(100.0, 50.0), Vec2::new(40.0, 30.0));
        batch.push_rect(&rect, [1.0, 0.0, 0.0, 1.0]);

        assert_eq!(batch.quad_count(), 1);
        assert_eq!(batch.vertices[0].position, [80.0, 65.0]);
        assert_eq!(batch.vertices[1].position, [120.0, 65.0]);
        assert_eq!(batch.vertices[2].position, [120.0, 35.0]);
        assert_eq!(batch.vertices[3].position, [80.0, 35.0]);
        assert!(batch.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn indices_are_offset_per_quad() {
        let mut batch = QuadBatch::new();
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(2.0));
        batch.push_rect(&rect, [0.0; 4]);
        batch.push_rect(&rect, [0.0; 4]);
        assert_eq!(&batch.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn clear_empties_the_mesh() {
        let mut batch = QuadBatch::new();
        batch.push_rect(&Rect::new(Vec2::ZERO, Vec2::ONE), [0.0; 4]);
        batch.clear();
        assert!(batch.is_empty());
        assert!(batch.indices.is_empty());
    }
}
