//! Image bounds supplied by the host.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Source of the current image size and preview position.
///
/// Implemented by the host. Spot creation reads it for initial placement
/// and the controller uses it to clamp moves.
pub trait ImageBoundsProvider {
    /// Image size in pixels, or `None` while no image is loaded.
    fn image_size(&self) -> Option<IVec2>;

    /// Image-space center of the preview viewport, if a preview is shown.
    fn preview_center(&self) -> Option<IVec2>;

    /// Where a new spot should be placed: the preview center, else the
    /// image center, else the origin.
    fn initial_center(&self) -> IVec2 {
        match self.image_size() {
            Some(size) => self.preview_center().unwrap_or(size / 2),
            None => IVec2::ZERO,
        }
    }

    /// Upper clamp for spot centers. Zero-sized while no image is loaded.
    fn clamp_extent(&self) -> IVec2 {
        self.image_size().unwrap_or(IVec2::ZERO)
    }
}

/// Plain-value bounds, for hosts that track the numbers themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub preview_center: Option<IVec2>,
}

impl ImageBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            preview_center: None,
        }
    }

    pub fn with_preview_center(mut self, center: IVec2) -> Self {
        self.preview_center = Some(center);
        self
    }
}

impl ImageBoundsProvider for ImageBounds {
    fn image_size(&self) -> Option<IVec2> {
        (self.width > 0 && self.height > 0).then(|| IVec2::new(self.width, self.height))
    }

    fn preview_center(&self) -> Option<IVec2> {
        self.preview_center
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_center_prefers_preview() {
        let bounds = ImageBounds::new(800, 600).with_preview_center(IVec2::new(120, 80));
        assert_eq!(bounds.initial_center(), IVec2::new(120, 80));
    }

    #[test]
    fn test_initial_center_falls_back_to_image_center() {
        assert_eq!(ImageBounds::new(800, 600).initial_center(), IVec2::new(400, 300));
    }

    #[test]
    fn test_no_image_places_at_origin() {
        let bounds = ImageBounds::default().with_preview_center(IVec2::new(5, 5));
        assert_eq!(bounds.initial_center(), IVec2::ZERO);
        assert_eq!(bounds.clamp_extent(), IVec2::ZERO);
    }
}
