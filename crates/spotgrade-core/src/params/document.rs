//! Per-image parameter documents and their edited-state carriers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::field::FieldId;
use super::table::ParamTable;
use crate::spot::SpotId;

/// Local-adjustment parameters of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDocument {
    /// Master switch of the local-adjustment tool.
    pub enabled: bool,
    /// Per-spot field tables, in registry order.
    pub spots: Vec<SpotParams>,
}

/// Stored field values of one spot within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotParams {
    pub id: SpotId,
    pub table: ParamTable,
}

impl Default for ParamDocument {
    fn default() -> Self {
        Self {
            enabled: true,
            spots: Vec::new(),
        }
    }
}

impl ParamDocument {
    pub fn spot(&self, id: SpotId) -> Option<&ParamTable> {
        self.spots.iter().find(|s| s.id == id).map(|s| &s.table)
    }

    pub fn spot_mut(&mut self, id: SpotId) -> Option<&mut ParamTable> {
        self.spots.iter_mut().find(|s| s.id == id).map(|s| &mut s.table)
    }

    /// Append a spot with `table`, replacing any existing entry for `id`.
    pub fn insert_spot(&mut self, id: SpotId, table: ParamTable) {
        match self.spot_mut(id) {
            Some(existing) => *existing = table,
            None => self.spots.push(SpotParams { id, table }),
        }
    }

    /// Drop the entry for `id`. Returns whether one existed.
    pub fn remove_spot(&mut self, id: SpotId) -> bool {
        let before = self.spots.len();
        self.spots.retain(|s| s.id != id);
        self.spots.len() != before
    }
}

/// Whether one field of one document has been edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditFlag {
    Unedited,
    Edited,
}

/// Sparse edited-state of one document: which fields of which spots carry
/// an edit, plus the tool switch.
///
/// Hosts persist this next to the document; its storage format is theirs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedCarrier {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub spots: BTreeMap<SpotId, BTreeSet<FieldId>>,
}

impl EditedCarrier {
    pub fn flag(&self, spot: SpotId, field: FieldId) -> EditFlag {
        match self.spots.get(&spot) {
            Some(fields) if fields.contains(&field) => EditFlag::Edited,
            _ => EditFlag::Unedited,
        }
    }

    pub fn set_flag(&mut self, spot: SpotId, field: FieldId, flag: EditFlag) {
        match flag {
            EditFlag::Edited => {
                self.spots.entry(spot).or_default().insert(field);
            }
            EditFlag::Unedited => {
                if let Some(fields) = self.spots.get_mut(&spot) {
                    fields.remove(&field);
                    if fields.is_empty() {
                        self.spots.remove(&spot);
                    }
                }
            }
        }
    }

    /// Forget every edit recorded for `spot`.
    pub fn clear_spot(&mut self, spot: SpotId) {
        self.spots.remove(&spot);
    }
}

/// A document bound to the panel together with its edited-state carrier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundDocument {
    pub params: ParamDocument,
    pub edited: EditedCarrier,
}

impl BoundDocument {
    pub fn new(params: ParamDocument) -> Self {
        Self {
            params,
            edited: EditedCarrier::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FieldValue;

    #[test]
    fn test_carrier_stays_sparse() {
        let mut carrier = EditedCarrier::default();
        let spot = SpotId(3);
        carrier.set_flag(spot, FieldId::Sensi, EditFlag::Edited);
        assert_eq!(carrier.flag(spot, FieldId::Sensi), EditFlag::Edited);
        assert_eq!(carrier.flag(spot, FieldId::Chroma), EditFlag::Unedited);

        carrier.set_flag(spot, FieldId::Sensi, EditFlag::Unedited);
        assert!(carrier.spots.is_empty());
    }

    #[test]
    fn test_insert_spot_replaces_existing() {
        let mut doc = ParamDocument::default();
        doc.insert_spot(SpotId(1), ParamTable::default());
        let mut table = ParamTable::default();
        table.set(FieldId::Sensi, FieldValue::Number(55.0));
        doc.insert_spot(SpotId(1), table.clone());
        assert_eq!(doc.spots.len(), 1);
        assert_eq!(doc.spot(SpotId(1)), Some(&table));
        assert!(doc.remove_spot(SpotId(1)));
        assert!(!doc.remove_spot(SpotId(1)));
    }
}
