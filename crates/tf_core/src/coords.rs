use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Integer position on the building grid.
///
/// `x` runs along the width, `y` is the storey and `z` runs along the depth.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridCell {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Local-space position of this cell, one world unit per grid step.
    pub fn to_local(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Horizontal extent of a building. Coordinates are inclusive on both ends,
/// so a footprint of width 10 spans columns `0..=10`.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default)]
pub struct Footprint {
    pub width: u32,
    pub depth: u32,
}

impl Footprint {
    pub const fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// True when `(x, z)` lies on the outer boundary.
    pub const fn is_perimeter(&self, x: u32, z: u32) -> bool {
        x == 0 || x == self.width || z == 0 || z == self.depth
    }

    /// True when `(x, z)` is one of the four corner columns.
    pub const fn is_corner(&self, x: u32, z: u32) -> bool {
        (x == 0 || x == self.width) && (z == 0 || z == self.depth)
    }

    /// The four corner columns in front-left, front-right, back-left,
    /// back-right order.
    pub const fn corners(&self) -> [(u32, u32); 4] {
        [
            (0, 0),
            (self.width, 0),
            (0, self.depth),
            (self.width, self.depth),
        ]
    }

    /// Perimeter columns in scan order: `x` outer, `z` inner.
    pub fn perimeter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..=self.width)
            .flat_map(move |x| (0..=self.depth).map(move |z| (x, z)))
            .filter(move |&(x, z)| self.is_perimeter(x, z))
    }

    /// Number of perimeter columns.
    pub fn perimeter_len(&self) -> usize {
        match (self.width, self.depth) {
            (0, d) => d as usize + 1,
            (w, 0) => w as usize + 1,
            (w, d) => 2 * (w as usize + d as usize),
        }
    }
}
