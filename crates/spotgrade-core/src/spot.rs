//! A single local-adjustment spot.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{HighlightState, Primitive, PrimitiveRole, SpotGeometry};
use crate::params::ParamTable;

/// Placeholder label given to new spots.
pub const DEFAULT_SPOT_NAME: &str = "Control spot";

/// Stable spot identifier. Never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(pub u32);

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spot #{}", self.0)
    }
}

/// What a pointer interaction did to a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotEvent {
    None,
    SpotMoved,
    CenterResized,
    ShapeChanged,
}

/// A named, shaped, positioned region carrying its own adjustment values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: SpotId,
    pub name: String,
    /// Skipped by the processing engine, still editable.
    pub is_excluded: bool,
    pub is_visible: bool,
    pub geometry: SpotGeometry,
    /// Highlight of the visible primitive. Never touched by drag logic.
    pub highlight: HighlightState,
    /// Cached copy of this spot's values in the primary bound document,
    /// refreshed by the panel on selection and after every edit while the
    /// spot is active. The documents stay the source of truth.
    pub fields: ParamTable,
}

impl Spot {
    pub fn new(id: SpotId, center: IVec2) -> Self {
        Self {
            id,
            name: DEFAULT_SPOT_NAME.to_string(),
            is_excluded: false,
            is_visible: true,
            geometry: SpotGeometry::new(center),
            highlight: HighlightState::Normal,
            fields: ParamTable::default(),
        }
    }

    /// View of the primitive drawn on screen.
    pub fn visible(&self) -> Primitive {
        Primitive::view(self.id, PrimitiveRole::Visible, self.geometry, self.highlight)
    }

    /// View of the primitive used for hit-testing.
    pub fn mouse_over(&self) -> Primitive {
        Primitive::view(self.id, PrimitiveRole::MouseOver, self.geometry, self.highlight)
    }

    /// Both primitives, visible first.
    pub fn primitives(&self) -> [Primitive; 2] {
        [self.visible(), self.mouse_over()]
    }

    /// Whether the processing engine should apply this spot.
    pub fn is_processed(&self) -> bool {
        self.is_visible && !self.is_excluded
    }
}
