//! Axis-aligned rectangle collision
//!
//! Every entity is a rectangle with a top-left origin and y growing downward.
//! Intervals are half-open, so rectangles that merely share an edge do not
//! overlap. That is what lets the player stand on a platform without the
//! horizontal pass treating the floor as a wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Half-open intersection test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.size.is_finite()
    }
}

/// Anything with a collision rectangle
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Check whether two entities' rectangles intersect
#[inline]
pub fn overlaps<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Check whether `a` is standing on `surface`
///
/// The bottom edge of `a` must lie within `band` pixels below the surface top
/// (inclusive at both ends) and the horizontal extents must overlap.
pub fn rests_on<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, surface: &B, band: f32) -> bool {
    let a = a.bounds();
    let s = surface.bounds();
    a.bottom() >= s.top()
        && a.bottom() <= s.top() + band
        && a.right() > s.left()
        && a.left() < s.right()
}
