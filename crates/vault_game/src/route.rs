//! Waypoint chains for autonomous movement.
//!
//! Nodes live in a small arena and link by index, so a chain can close back
//! onto any earlier node (a patrol loop) or simply end. Once the cursor runs
//! off the end of an open chain the route is exhausted and its owner stops.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteNode {
    pub coords: Vec2,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: Vec<RouteNode>,
    cursor: Option<usize>,
}

impl Route {
    /// Arbitrary topology. Every `next` must point inside `nodes`.
    pub fn from_nodes(nodes: Vec<RouteNode>) -> Self {
        for (index, node) in nodes.iter().enumerate() {
            if let Some(next) = node.next {
                assert!(
                    next < nodes.len(),
                    "route node {index} links to missing node {next}"
                );
            }
        }
        let cursor = if nodes.is_empty() { None } else { Some(0) };
        Self { nodes, cursor }
    }

    /// Visits `points` in order, then stops at the last one.
    #[cfg(test)]
    pub fn one_way(points: &[Vec2]) -> Self {
        let last = points.len().saturating_sub(1);
        Self::from_nodes(
            points
                .iter()
                .enumerate()
                .map(|(i, &coords)| RouteNode {
                    coords,
                    next: (i < last).then_some(i + 1),
                })
                .collect(),
        )
    }

    /// Visits `points` in order forever.
    pub fn looping(points: &[Vec2]) -> Self {
        let len = points.len();
        Self::from_nodes(
            points
                .iter()
                .enumerate()
                .map(|(i, &coords)| RouteNode {
                    coords,
                    next: Some((i + 1) % len),
                })
                .collect(),
        )
    }

    /// The waypoint currently being approached.
    pub fn target(&self) -> Option<Vec2> {
        self.cursor.map(|i| self.nodes[i].coords)
    }

    #[cfg(test)]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Move the cursor to the next node. Panics on an exhausted route.
    pub fn advance(&mut self) {
        let Some(current) = self.cursor else {
            panic!("advance called on an exhausted route");
        };
        self.cursor = self.nodes[current].next;
    }
}
