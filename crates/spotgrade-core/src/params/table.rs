//! Per-spot table holding one value for every field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::{FIELD_COUNT, FieldGroup, FieldId, FieldValue};

/// Values of every adjustment field for one spot.
///
/// Indexed by [`FieldId`]; always complete. Serialized as a map from field
/// key to value. Missing keys load as defaults and values of the wrong
/// variant are replaced by the field's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FieldId, FieldValue>",
    into = "BTreeMap<FieldId, FieldValue>"
)]
pub struct ParamTable {
    values: Vec<FieldValue>,
}

impl ParamTable {
    /// Value of `field`.
    pub fn get(&self, field: FieldId) -> FieldValue {
        self.values[field.index()]
    }

    /// Store `value` into `field`.
    ///
    /// # Panics
    /// If `value` is not the variant the field stores. The field namespace
    /// is fixed, so a mismatch is a caller bug.
    pub fn set(&mut self, field: FieldId, value: FieldValue) {
        assert!(
            field.kind().accepts(&value),
            "{field:?} cannot hold {value:?}"
        );
        self.values[field.index()] = value;
    }

    /// Whether the enable toggle of `group` is on. Groups without a toggle
    /// are always enabled.
    pub fn is_group_enabled(&self, group: FieldGroup) -> bool {
        match group.toggle() {
            Some(toggle) => self.get(toggle).as_toggle().unwrap_or(false),
            None => true,
        }
    }

    /// Clamp every value into its field's range.
    pub fn trim(&mut self) {
        for field in FieldId::ALL {
            let trimmed = field.kind().trim(self.get(*field));
            self.values[field.index()] = trimmed;
        }
    }

    /// Iterate `(field, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, FieldValue)> + '_ {
        FieldId::ALL.iter().map(|f| (*f, self.get(*f)))
    }
}

impl Default for ParamTable {
    /// Every field at its built-in default.
    fn default() -> Self {
        Self {
            values: FieldId::ALL
                .iter()
                .map(|f| f.kind().default_value())
                .collect(),
        }
    }
}

impl From<BTreeMap<FieldId, FieldValue>> for ParamTable {
    fn from(map: BTreeMap<FieldId, FieldValue>) -> Self {
        let mut table = Self::default();
        for (field, value) in map {
            let kind = field.kind();
            if kind.accepts(&value) {
                table.values[field.index()] = value;
            } else {
                tracing::warn!("ignoring {value:?} for {field:?}: wrong value kind");
            }
        }
        debug_assert_eq!(table.values.len(), FIELD_COUNT);
        table
    }
}

impl From<ParamTable> for BTreeMap<FieldId, FieldValue> {
    fn from(table: ParamTable) -> Self {
        table.iter().collect()
    }
}
