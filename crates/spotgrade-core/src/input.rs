//! Pointer input as seen by the spot overlay.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::PrimitiveId;

/// Keyboard modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// The modifier that turns a drag into a resize.
    pub fn resizes(&self) -> bool {
        self.shift
    }
}

/// One step of a pointer drag, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerDrag {
    /// Primitive the drag started on, if any.
    pub target: Option<PrimitiveId>,
    /// Pointer position where the drag started.
    pub origin: IVec2,
    /// Pointer movement. Resizes measure it from `origin`; moves apply it
    /// to the spot as-is.
    pub delta: IVec2,
    pub modifiers: Modifiers,
}

impl PointerDrag {
    /// Pointer position after this step, saturating at the `i32` range.
    pub fn position(&self) -> IVec2 {
        self.origin.saturating_add(self.delta)
    }
}

/// Cursor the overlay should display over a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    Move2D,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_saturates() {
        let drag = PointerDrag {
            target: None,
            origin: IVec2::new(i32::MAX - 5, 300),
            delta: IVec2::new(50, -10),
            modifiers: Modifiers::SHIFT,
        };
        assert_eq!(drag.position(), IVec2::new(i32::MAX, 290));
    }
}
