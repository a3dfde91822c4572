//! Measured geometry types: Size, Edges, Axis.
//!
//! These are the pixel-valued types the engine exchanges with the rendering
//! surface: viewport and measured node extents come in as [`Size`], computed
//! margins come in as [`Edges`]. All values are f32 pixels.

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// A layout axis. Linear containers pick a main axis from their orientation;
/// the Free strategy anchors each axis independently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D extent in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Pixel values around the four sides of a box, used for computed margins.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Zero on all sides.
    pub const ZERO: Edges = Edges { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create edges with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The side the given axis starts from (left or top).
    #[inline]
    pub const fn leading(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// The side the given axis ends at (right or bottom).
    #[inline]
    pub const fn trailing(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Combined extent along the given axis (leading + trailing).
    #[inline]
    pub const fn sum(self, axis: Axis) -> f32 {
        self.leading(axis) + self.trailing(axis)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_new_and_constants() {
        assert_eq!(Size::new(800.0, 600.0), Size { width: 800.0, height: 600.0 });
        assert_eq!(Size::ZERO, Size { width: 0.0, height: 0.0 });
        assert_eq!(Size::default(), Size::ZERO);
    }

    #[test]
    fn edges_constructors() {
        assert_eq!(
            Edges::new(1.0, 2.0, 3.0, 4.0),
            Edges { top: 1.0, right: 2.0, bottom: 3.0, left: 4.0 }
        );
        assert_eq!(Edges::ZERO, Edges::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(Edges::default(), Edges::ZERO);
    }

    #[test]
    fn edges_leading_trailing() {
        let e = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.leading(Axis::Horizontal), 4.0);
        assert_eq!(e.trailing(Axis::Horizontal), 2.0);
        assert_eq!(e.leading(Axis::Vertical), 1.0);
        assert_eq!(e.trailing(Axis::Vertical), 3.0);
    }

    #[test]
    fn edges_sum_per_axis() {
        let e = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.sum(Axis::Horizontal), 6.0);
        assert_eq!(e.sum(Axis::Vertical), 4.0);
    }

}
