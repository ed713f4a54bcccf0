//! Integer rectangles in host pixel coordinates.
//!
//! [`Bounds`] follows the half-open convention hosts use for render windows
//! and regions of definition: `x1..x2` and `y1..y2`, with `x2`/`y2` exclusive.
//! Coordinates are signed because apron-expanded windows routinely extend
//! past the image origin.
//!
//! ```text
//! (x1,y1) ──────────► X
//!   │   ┌──────────┐
//!   │   │  window  │
//!   │   └──────────┘ (x2,y2) exclusive
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cine_core::Bounds;
//!
//! let window = Bounds::new(0, 0, 64, 32);
//! let expanded = window.expand(4);
//! assert_eq!(expanded.width(), 72);
//! assert!(expanded.contains(-4, -4));
//! assert!(!expanded.contains(68, 0));
//! ```

use std::fmt;

/// Half-open integer rectangle `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// Left edge (inclusive)
    pub x1: i32,
    /// Top edge (inclusive)
    pub y1: i32,
    /// Right edge (exclusive)
    pub x2: i32,
    /// Bottom edge (exclusive)
    pub y2: i32,
}

impl Bounds {
    /// Creates bounds from corner coordinates.
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates bounds anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Width in pixels (0 when inverted).
    #[inline]
    pub const fn width(&self) -> usize {
        if self.x2 > self.x1 { (self.x2 - self.x1) as usize } else { 0 }
    }

    /// Height in pixels (0 when inverted).
    #[inline]
    pub const fn height(&self) -> usize {
        if self.y2 > self.y1 { (self.y2 - self.y1) as usize } else { 0 }
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns true when no pixel is covered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Tests whether a point lies inside.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Tests whether `other` lies entirely inside.
    pub const fn contains_bounds(&self, other: &Bounds) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Grows every side by `margin` pixels.
    #[inline]
    pub const fn expand(&self, margin: i32) -> Self {
        Self::new(self.x1 - margin, self.y1 - margin, self.x2 + margin, self.y2 + margin)
    }

    /// Clamps a point to the nearest covered pixel.
    ///
    /// Meaningless for empty bounds; callers check [`Bounds::is_empty`] first.
    #[inline]
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (x.clamp(self.x1, self.x2 - 1), y.clamp(self.y1, self.y2 - 1))
    }

    /// Intersection, or `None` when the rectangles do not overlap.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let result = Bounds::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        if result.is_empty() { None } else { Some(result) }
    }

    /// Bounding box of both rectangles.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Splits into horizontal bands of at most `rows` rows each.
    ///
    /// # Example
    ///
    /// ```
    /// use cine_core::Bounds;
    ///
    /// let bands: Vec<_> = Bounds::new(0, 0, 8, 10).bands(4).collect();
    /// assert_eq!(bands.len(), 3);
    /// assert_eq!(bands[2], Bounds::new(0, 8, 8, 10));
    /// ```
    pub fn bands(&self, rows: usize) -> impl Iterator<Item = Bounds> + '_ {
        let step = rows.max(1) as i32;
        (self.y1..self.y2)
            .step_by(step as usize)
            .map(move |y| Bounds::new(self.x1, y, self.x2, (y + step).min(self.y2)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})-({},{})", self.x1, self.y1, self.x2, self.y2)
    }
}
