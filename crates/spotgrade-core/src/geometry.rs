//! Spot geometry and its render / hit-test views.
//!
//! A spot stores exactly one [`SpotGeometry`]. The overlay layer needs two
//! primitives per spot, one it may decorate (prelight) and one used for
//! pointer hit-testing. Both are produced on demand as read-only
//! [`Primitive`] views of the same value, so they always agree on shape,
//! center and radius.

use glam::{I64Vec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::spot::SpotId;

/// Smallest radius a spot can be resized to, in image pixels.
pub const MIN_RADIUS: i32 = 2;
/// Largest radius a spot can be resized to, in image pixels.
pub const MAX_RADIUS: i32 = 150;
/// Radius given to newly created spots.
pub const DEFAULT_RADIUS: i32 = 5;

/// Outline of a spot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotShape {
    #[default]
    Ellipse,
    Rectangle,
}

/// Presentation state of the visible primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightState {
    #[default]
    Normal,
    Prelit,
}

/// Which of the two per-spot primitives a view or handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveRole {
    /// Drawn on screen; may carry a highlight.
    Visible,
    /// Used for pointer hit-testing only.
    MouseOver,
}

/// Identity of one primitive, as reported by the overlay when the pointer
/// lands on it. Two spots with coincident geometry still yield distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId {
    pub spot: SpotId,
    pub role: PrimitiveRole,
}

/// Shape, position and size of a spot in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotGeometry {
    pub shape: SpotShape,
    pub center: IVec2,
    /// Radius for ellipses, half-extent for rectangles.
    pub radius: i32,
}

impl SpotGeometry {
    /// Geometry of a freshly created spot at `center`.
    pub fn new(center: IVec2) -> Self {
        Self {
            shape: SpotShape::Ellipse,
            center,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Set the radius, saturating at [`MIN_RADIUS`]..=[`MAX_RADIUS`].
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = clamp_radius(radius);
    }

    /// Offset the center by `delta`, clamping each axis to `[0, size]`.
    ///
    /// The axes are clamped independently so a diagonal drag against one
    /// edge keeps sliding along the other.
    /// Computed in 64 bits, so any `i32` delta saturates at the image edge.
    pub fn translate_clamped(&mut self, delta: IVec2, size: IVec2) {
        let moved = self.center.as_i64vec2() + delta.as_i64vec2();
        let max = size.max(IVec2::ZERO).as_i64vec2();
        self.center = moved.clamp(I64Vec2::ZERO, max).as_ivec2();
    }

    /// Whether `point` lies inside the outline.
    pub fn contains(&self, point: IVec2) -> bool {
        let d = (point.as_i64vec2() - self.center.as_i64vec2()).abs();
        let r = i64::from(self.radius);
        if d.x > r || d.y > r {
            return false;
        }
        match self.shape {
            SpotShape::Rectangle => true,
            SpotShape::Ellipse => d.length_squared() <= r * r,
        }
    }
}

impl Default for SpotGeometry {
    fn default() -> Self {
        Self::new(IVec2::ZERO)
    }
}

/// Clamp a radius into the allowed range.
pub fn clamp_radius(radius: i32) -> i32 {
    radius.clamp(MIN_RADIUS, MAX_RADIUS)
}

/// Euclidean distance between two image points, rounded to the nearest pixel
/// and saturating at `i32::MAX`.
pub fn rounded_distance(a: IVec2, b: IVec2) -> i32 {
    let d = b.as_dvec2() - a.as_dvec2();
    d.length().round() as i32
}

/// Read-only view of one of a spot's primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub id: PrimitiveId,
    pub geometry: SpotGeometry,
    pub highlight: HighlightState,
}

impl Primitive {
    /// Build the view for `role`. The mouse-over primitive never carries a
    /// highlight.
    pub fn view(
        spot: SpotId,
        role: PrimitiveRole,
        geometry: SpotGeometry,
        highlight: HighlightState,
    ) -> Self {
        let highlight = match role {
            PrimitiveRole::Visible => highlight,
            PrimitiveRole::MouseOver => HighlightState::Normal,
        };
        Self {
            id: PrimitiveId { spot, role },
            geometry,
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_geometry_uses_default_radius() {
        let g = SpotGeometry::new(IVec2::new(400, 300));
        assert_eq!(g.radius, DEFAULT_RADIUS);
        assert_eq!(g.shape, SpotShape::Ellipse);
    }

    #[test]
    fn test_radius_saturates() {
        let mut g = SpotGeometry::default();
        g.set_radius(-7);
        assert_eq!(g.radius, MIN_RADIUS);
        g.set_radius(10_000);
        assert_eq!(g.radius, MAX_RADIUS);
        g.set_radius(42);
        assert_eq!(g.radius, 42);
    }

    #[test]
    fn test_translate_clamps_per_axis() {
        let mut g = SpotGeometry::new(IVec2::new(790, 300));
        g.translate_clamped(IVec2::new(50, 20), IVec2::new(800, 600));
        assert_eq!(g.center, IVec2::new(800, 320));
    }

    #[test]
    fn test_translate_saturates_on_extreme_delta() {
        let size = IVec2::new(800, 600);
        let mut g = SpotGeometry::new(IVec2::new(400, 300));
        g.translate_clamped(IVec2::new(i32::MAX, i32::MIN), size);
        assert_eq!(g.center, IVec2::new(800, 0));
        g.translate_clamped(IVec2::new(i32::MIN, i32::MAX), size);
        assert_eq!(g.center, IVec2::new(0, 600));
    }

    #[test]
    fn test_far_points_are_outside() {
        let mut g = SpotGeometry::default();
        assert!(!g.contains(IVec2::new(60_000, 60_000)));
        assert!(!g.contains(IVec2::new(i32::MIN, i32::MAX)));
        g.shape = SpotShape::Rectangle;
        g.center = IVec2::new(i32::MAX, i32::MAX);
        assert!(!g.contains(IVec2::new(i32::MIN, i32::MIN)));
        assert!(g.contains(IVec2::new(i32::MAX - 2, i32::MAX)));
    }

    #[test]
    fn test_rounded_distance_saturates() {
        assert_eq!(rounded_distance(IVec2::new(i32::MIN, 0), IVec2::new(i32::MAX, 0)), i32::MAX);
    }

    #[test]
    fn test_rounded_distance() {
        assert_eq!(rounded_distance(IVec2::new(0, 0), IVec2::new(3, 4)), 5);
        // sqrt(2) = 1.414 rounds down, sqrt(8) = 2.83 rounds up
        assert_eq!(rounded_distance(IVec2::ZERO, IVec2::new(1, 1)), 1);
        assert_eq!(rounded_distance(IVec2::ZERO, IVec2::new(2, 2)), 3);
    }

    #[test]
    fn test_contains_respects_shape() {
        let mut g = SpotGeometry::new(IVec2::new(10, 10));
        g.set_radius(5);
        let corner = IVec2::new(14, 14);
        assert!(!g.contains(corner));
        g.shape = SpotShape::Rectangle;
        assert!(g.contains(corner));
    }

    #[test]
    fn test_mouse_over_view_never_highlighted() {
        let g = SpotGeometry::default();
        let spot = SpotId(1);
        let visible = Primitive::view(spot, PrimitiveRole::Visible, g, HighlightState::Prelit);
        let hit = Primitive::view(spot, PrimitiveRole::MouseOver, g, HighlightState::Prelit);
        assert_eq!(visible.highlight, HighlightState::Prelit);
        assert_eq!(hit.highlight, HighlightState::Normal);
        assert_eq!(visible.geometry, hit.geometry);
    }
}
