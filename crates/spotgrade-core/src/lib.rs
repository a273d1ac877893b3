//! Spotgrade Core: domain layer for local-adjustment spots.
//!
//! Spot geometry and pointer interaction, the spot registry, the fixed
//! adjustment-field namespace and the reconciler that merges edits into one
//! or many image documents. No GUI or rendering dependencies.

pub mod controller;
pub mod error;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod params;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod spot;

// Re-exports for convenience.
pub use controller::SpotController;
pub use error::{PanelError, ReconcileError, SpotError};
pub use geometry::{PrimitiveId, PrimitiveRole, SpotGeometry, SpotShape};
pub use input::{CursorKind, Modifiers, PointerDrag};
pub use panel::{LocalPanel, ProcessedSpot};
pub use params::{BoundDocument, FieldId, FieldValue, LumaContrast, ParamDocument, ParamTable};
pub use provider::{ImageBounds, ImageBoundsProvider};
pub use reconcile::{FieldStatus, ParamReconciler, SpotDisplay};
pub use registry::SpotRegistry;
pub use spot::{Spot, SpotEvent, SpotId};
