//! Message contracts between the host front end and the panel.
//!
//! One JSON object per line in each direction, using the
//! `#[serde(tag = "type", content = "data")]` layout.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use spotgrade_core::params::{FieldId, FieldValue, LumaContrast};
use spotgrade_core::{
    CursorKind, FieldStatus, PointerDrag, PrimitiveId, ProcessedSpot, Spot, SpotDisplay,
    SpotEvent, SpotGeometry, SpotId, SpotShape,
};

/// Commands from the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostCommand {
    /// Request a full state snapshot.
    RequestState,

    /// The displayed image or preview position changed.
    SetImage {
        width: i32,
        height: i32,
        #[serde(default)]
        preview_center: Option<IVec2>,
    },

    /// Create a spot at the preview center.
    AddSpot,

    RemoveSpot { spot: SpotId },

    /// Bind the sliders to a spot.
    SelectSpot { spot: SpotId },

    RenameSpot { spot: SpotId, name: String },

    SetExcluded { spot: SpotId, excluded: bool },

    SetVisible { spot: SpotId, visible: bool },

    SetShape { spot: SpotId, shape: SpotShape },

    /// One step of a pointer drag.
    Drag { drag: PointerDrag },

    /// Resolve an image position to the primitive under it.
    Pick { position: IVec2 },

    /// Pointer moved over a primitive, or off every primitive.
    Hover {
        #[serde(default)]
        primitive: Option<PrimitiveId>,
    },

    /// Set a field on every bound document.
    EditField { field: FieldId, value: FieldValue },

    /// Set a field on some of the bound documents.
    EditFieldSubset {
        field: FieldId,
        value: FieldValue,
        documents: Vec<usize>,
    },

    ResetField { field: FieldId },

    /// Contrast-by-detail luma buttons.
    LumaContrast { step: LumaContrast },

    /// Use the active spot's values as the default snapshot.
    CaptureDefault,

    SetToolEnabled { enabled: bool },

    SetBatchMode { enabled: bool },

    /// Clamp every stored value into range.
    TrimValues,

    /// Spots the engine should apply to one document.
    RequestQueue { document: usize },
}

/// Messages to the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PanelEvent {
    /// Full state snapshot.
    State {
        spots: Vec<SpotSummary>,
        active: Option<SpotId>,
        batch_mode: bool,
        documents: usize,
    },

    SpotAdded { spot: SpotSummary },

    SpotRemoved { spot: SpotId },

    /// Geometry or metadata of a spot changed.
    SpotChanged { spot: SpotSummary, event: SpotEvent },

    Picked { primitive: Option<PrimitiveId> },

    Cursor { cursor: Option<CursorKind> },

    /// Values and statuses shown for the active spot.
    Display { display: SpotDisplay },

    FieldStatus { field: FieldId, status: FieldStatus },

    ToolStatus { status: FieldStatus },

    ProcessingQueue {
        document: usize,
        spots: Vec<ProcessedSpot>,
    },

    /// A command could not be applied.
    Error { message: String },
}

/// Spot metadata for list rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotSummary {
    pub id: SpotId,
    pub name: String,
    pub geometry: SpotGeometry,
    pub is_excluded: bool,
    pub is_visible: bool,
}

impl From<&Spot> for SpotSummary {
    fn from(spot: &Spot) -> Self {
        Self {
            id: spot.id,
            name: spot.name.clone(),
            geometry: spot.geometry,
            is_excluded: spot.is_excluded,
            is_visible: spot.is_visible,
        }
    }
}
