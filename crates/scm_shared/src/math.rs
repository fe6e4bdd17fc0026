//! Small math types shared by the pipeline and the layout tables.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D vector - screen position, text scale, screen size.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Converts to a tuple, the shape recurrence closures work with.
    #[must_use]
    pub const fn to_tuple(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_tuple_conversion() {
        let v = Vec2::from((3.0, -1.5));
        assert_eq!(v.to_tuple(), (3.0, -1.5));
        assert_eq!(v.to_array(), [3.0, -1.5]);
    }

    #[test]
    fn test_vec2_is_pod() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(bytemuck::bytes_of(&v).len(), 8);
    }
}
