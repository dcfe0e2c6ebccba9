//! Static level geometry

use tracing::warn;
use tread_core::Aabb;

/// Immutable set of obstacle boxes plus an infinite horizontal floor plane.
///
/// Insertion order is iteration order, and iteration order is the tie-break
/// when the player could stand on more than one box top.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleRegistry {
    obstacles: Vec<Aabb>,
    floor_y: f32,
}

impl ObstacleRegistry {
    pub fn new(floor_y: f32, obstacles: Vec<Aabb>) -> Self {
        let degenerate = obstacles.iter().filter(|b| b.is_degenerate()).count();
        if degenerate > 0 {
            warn!(degenerate, "registry contains zero-volume boxes");
        }
        Self { obstacles, floor_y }
    }

    /// A level with nothing but the floor
    pub fn floor_only(floor_y: f32) -> Self {
        Self::new(floor_y, Vec::new())
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }

    pub fn get(&self, index: usize) -> Option<&Aabb> {
        self.obstacles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
