//! Pointer interaction on spots.
//!
//! Turns drags on a spot's primitives into geometry changes and reports
//! what changed as a [`SpotEvent`]. Dragging never fails: out-of-range
//! radii and positions saturate.

use crate::geometry::{HighlightState, PrimitiveId, SpotShape, rounded_distance};
use crate::input::{CursorKind, PointerDrag};
use crate::provider::ImageBoundsProvider;
use crate::spot::{Spot, SpotEvent};

/// Stateless interaction logic shared by every spot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpotController;

impl SpotController {
    /// Apply one drag step to `spot`.
    ///
    /// With the resize modifier held the radius becomes the rounded
    /// distance from the center to the pointer; otherwise the center moves
    /// by the drag delta, clamped per axis to the image.
    pub fn handle_drag(
        &self,
        spot: &mut Spot,
        drag: &PointerDrag,
        bounds: &impl ImageBoundsProvider,
    ) -> SpotEvent {
        let Some(target) = drag.target else {
            return SpotEvent::None;
        };
        if !self.hit_test(spot, target) {
            return SpotEvent::None;
        }

        if drag.modifiers.resizes() {
            let radius = rounded_distance(spot.geometry.center, drag.position());
            spot.geometry.set_radius(radius);
            SpotEvent::CenterResized
        } else {
            spot.geometry.translate_clamped(drag.delta, bounds.clamp_extent());
            SpotEvent::SpotMoved
        }
    }

    /// Whether `primitive` is one of `spot`'s primitives.
    ///
    /// Compares identity, so spots with coincident geometry stay distinct.
    pub fn hit_test(&self, spot: &Spot, primitive: PrimitiveId) -> bool {
        primitive.spot == spot.id
    }

    /// Cursor to show over `primitive`, or `None` to keep the caller's.
    pub fn cursor_for(&self, spot: &Spot, primitive: PrimitiveId) -> Option<CursorKind> {
        self.hit_test(spot, primitive).then_some(CursorKind::Move2D)
    }

    /// Highlight the visible primitive while hovered.
    pub fn set_prelight(&self, spot: &mut Spot, active: bool) {
        spot.highlight = if active {
            HighlightState::Prelit
        } else {
            HighlightState::Normal
        };
    }

    /// Switch the outline shape.
    pub fn set_shape(&self, spot: &mut Spot, shape: SpotShape) -> SpotEvent {
        if spot.geometry.shape == shape {
            return SpotEvent::None;
        }
        spot.geometry.shape = shape;
        SpotEvent::ShapeChanged
    }
}
