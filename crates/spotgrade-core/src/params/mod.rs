//! Adjustment fields, per-spot tables and per-image documents.

pub mod document;
pub mod field;
pub mod table;

pub use document::{BoundDocument, EditFlag, EditedCarrier, ParamDocument, SpotParams};
pub use field::{FIELD_COUNT, FieldGroup, FieldId, FieldKind, FieldValue, LumaContrast};
pub use table::ParamTable;
