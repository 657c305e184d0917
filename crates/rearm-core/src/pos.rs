//! Map coordinate type and spatial utilities.
//!
//! `MapPos` uses `f32` cell coordinates.  Host maps top out at a few hundred
//! cells per side, so single precision is exact for whole-cell positions and
//! sub-cell offsets alike.

/// A position on a world region's cell grid, stored as single-precision
/// floats so dropped-item offsets within a cell are representable.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapPos {
    pub x: f32,
    pub y: f32,
}

impl MapPos {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in cells.
    #[inline]
    pub fn distance(self, other: MapPos) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Axis-aligned box check — much cheaper than `distance` for quick
    /// rejection before exact range filtering.
    #[inline]
    pub fn within_box(self, center: MapPos, half: f32) -> bool {
        (self.x - center.x).abs() <= half && (self.y - center.y).abs() <= half
    }
}

impl std::fmt::Display for MapPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
