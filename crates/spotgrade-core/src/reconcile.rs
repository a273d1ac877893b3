//! Merging field edits into bound documents.
//!
//! The panel edits one spot at a time but may be bound to several image
//! documents at once (batch mode). Each edit is written to every bound
//! document that holds the active spot, and the per-document edited flags
//! are folded into a [`FieldStatus`] that tells the UI whether to show a
//! value or a "multiple values" marker.
//!
//! Nothing is cached between calls: every result is computed from the
//! documents passed in, so hosts may interleave edits and spot switches
//! freely.

use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;
use crate::params::{
    BoundDocument, EditFlag, FIELD_COUNT, FieldId, FieldValue, LumaContrast, ParamTable,
};
use crate::spot::SpotId;

/// Edited state of one field folded across every bound document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// No document has edited the field.
    AllUnedited,
    /// Every document that edited the field holds the same value.
    AllEditedSame,
    /// Edited documents disagree on the value.
    AllEditedDiffering,
}

/// Fold `(flag, value)` pairs, one per document, into a [`FieldStatus`].
pub fn aggregate(entries: impl IntoIterator<Item = (EditFlag, FieldValue)>) -> FieldStatus {
    let mut first = None;
    for (flag, value) in entries {
        if flag != EditFlag::Edited {
            continue;
        }
        match first {
            None => first = Some(value),
            Some(seen) if seen != value => return FieldStatus::AllEditedDiffering,
            Some(_) => {}
        }
    }
    if first.is_some() {
        FieldStatus::AllEditedSame
    } else {
        FieldStatus::AllUnedited
    }
}

/// What the panel shows for the active spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotDisplay {
    pub spot: SpotId,
    /// Values from the first bound document holding the spot.
    pub values: ParamTable,
    /// Status of each field, indexed by [`FieldId::index`].
    pub status: Vec<FieldStatus>,
    /// Whether each field's widget accepts input, indexed like `status`.
    pub sensitive: Vec<bool>,
    pub tool_enabled: bool,
}

impl SpotDisplay {
    pub fn value(&self, field: FieldId) -> FieldValue {
        self.values.get(field)
    }

    pub fn status(&self, field: FieldId) -> FieldStatus {
        self.status[field.index()]
    }

    pub fn is_sensitive(&self, field: FieldId) -> bool {
        self.sensitive[field.index()]
    }
}

/// Applies edits from the active spot to the bound documents.
#[derive(Debug, Clone, Default)]
pub struct ParamReconciler {
    active: Option<SpotId>,
    /// Snapshot captured by "use current as default". Replaced wholesale.
    defaults: Option<ParamTable>,
}

impl ParamReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_spot(&self) -> Option<SpotId> {
        self.active
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Store `table` as the default snapshot, discarding any previous one.
    pub fn capture_default(&mut self, table: ParamTable) {
        tracing::info!("captured new default snapshot");
        self.defaults = Some(table);
    }

    /// Current default values: the captured snapshot, else built-in defaults.
    pub fn default_table(&self) -> ParamTable {
        self.defaults.clone().unwrap_or_default()
    }

    /// Bind the panel to `id` and compute what it displays.
    ///
    /// Values and statuses come only from the documents' stored data for
    /// `id`; nothing carries over from the previously active spot.
    pub fn select_spot(
        &mut self,
        id: SpotId,
        docs: &[BoundDocument],
    ) -> Result<SpotDisplay, ReconcileError> {
        let display = display_for(id, docs)?;
        if self.active != Some(id) {
            tracing::debug!("active spot is now {id}");
        }
        self.active = Some(id);
        Ok(display)
    }

    /// Recompute the display of the active spot.
    pub fn display(&self, docs: &[BoundDocument]) -> Result<SpotDisplay, ReconcileError> {
        display_for(self.active_id()?, docs)
    }

    /// Write `value` into `field` of the active spot on every bound document.
    ///
    /// # Panics
    /// If `value` is not the variant `field` stores.
    pub fn apply_edit(
        &self,
        field: FieldId,
        value: FieldValue,
        docs: &mut [BoundDocument],
    ) -> Result<FieldStatus, ReconcileError> {
        let targets: Vec<usize> = (0..docs.len()).collect();
        self.apply_edit_to(field, value, docs, &targets)
    }

    /// Like [`apply_edit`](Self::apply_edit) but only writes to the
    /// documents at `targets`. The status is still folded over all of
    /// `docs`.
    ///
    /// # Panics
    /// If `value` is not the variant `field` stores, or a target index is
    /// out of range.
    pub fn apply_edit_to(
        &self,
        field: FieldId,
        value: FieldValue,
        docs: &mut [BoundDocument],
        targets: &[usize],
    ) -> Result<FieldStatus, ReconcileError> {
        let kind = field.kind();
        assert!(kind.accepts(&value), "{field:?} cannot hold {value:?}");
        let value = kind.trim(value);

        let spot = self.active_id()?;
        self.check_editable(spot, docs)?;

        for &i in targets {
            let doc = &mut docs[i];
            if let Some(table) = doc.params.spot_mut(spot) {
                table.set(field, value);
                doc.edited.set_flag(spot, field, EditFlag::Edited);
            }
        }
        tracing::debug!("{field:?} = {value} on {} of {} documents", targets.len(), docs.len());
        Ok(field_status(spot, field, docs))
    }

    /// Shift the five contrast-by-detail multipliers of the active spot
    /// together. Each level is written through
    /// [`apply_edit`](Self::apply_edit), starting from the value shown in
    /// the first bound document, so clamping and edited flags apply.
    pub fn apply_luma_contrast(
        &self,
        step: LumaContrast,
        docs: &mut [BoundDocument],
    ) -> Result<Vec<(FieldId, FieldStatus)>, ReconcileError> {
        let spot = self.active_id()?;
        let current = docs
            .iter()
            .find_map(|d| d.params.spot(spot))
            .cloned()
            .ok_or(ReconcileError::NotFound(spot))?;

        let mut statuses = Vec::with_capacity(FieldId::CONTRAST_LEVELS.len());
        for (level, field) in FieldId::CONTRAST_LEVELS.into_iter().enumerate() {
            let shown = current.get(field).as_number().unwrap_or(LumaContrast::NEUTRAL);
            let value = FieldValue::Number(step.step(level, shown));
            statuses.push((field, self.apply_edit(field, value, docs)?));
        }
        Ok(statuses)
    }

    /// Restore `field` of the active spot from the default snapshot on every
    /// bound document and mark it unedited.
    pub fn reset_to_default(
        &self,
        field: FieldId,
        docs: &mut [BoundDocument],
    ) -> Result<FieldStatus, ReconcileError> {
        let spot = self.active_id()?;
        if !docs.iter().any(|d| d.params.spot(spot).is_some()) {
            return Err(ReconcileError::NotFound(spot));
        }

        let value = match &self.defaults {
            Some(snapshot) => snapshot.get(field),
            None => field.kind().default_value(),
        };
        for doc in docs.iter_mut() {
            if let Some(table) = doc.params.spot_mut(spot) {
                table.set(field, value);
                doc.edited.set_flag(spot, field, EditFlag::Unedited);
            }
        }
        Ok(field_status(spot, field, docs))
    }

    /// Switch the whole tool on or off in every bound document.
    pub fn set_tool_enabled(&self, enabled: bool, docs: &mut [BoundDocument]) -> FieldStatus {
        for doc in docs.iter_mut() {
            doc.params.enabled = enabled;
            doc.edited.enabled = true;
        }
        tracing::info!("local adjustments {}", if enabled { "enabled" } else { "disabled" });
        tool_status(docs)
    }

    /// Clamp every stored value of every spot into range.
    pub fn trim_values(&self, docs: &mut [BoundDocument]) {
        for doc in docs.iter_mut() {
            for spot in doc.params.spots.iter_mut() {
                spot.table.trim();
            }
        }
    }

    fn active_id(&self) -> Result<SpotId, ReconcileError> {
        self.active.ok_or(ReconcileError::NoActiveSpot)
    }

    fn check_editable(&self, spot: SpotId, docs: &[BoundDocument]) -> Result<(), ReconcileError> {
        let mut holding = docs.iter().filter(|d| d.params.spot(spot).is_some()).peekable();
        if holding.peek().is_none() {
            return Err(ReconcileError::NotFound(spot));
        }
        if !holding.any(|d| d.params.enabled) {
            return Err(ReconcileError::ToolDisabled);
        }
        Ok(())
    }
}

/// Status of `field` of `spot` across the documents that hold the spot.
pub fn field_status(spot: SpotId, field: FieldId, docs: &[BoundDocument]) -> FieldStatus {
    aggregate(docs.iter().filter_map(|doc| {
        let table = doc.params.spot(spot)?;
        Some((doc.edited.flag(spot, field), table.get(field)))
    }))
}

/// Status of the tool switch across the documents.
pub fn tool_status(docs: &[BoundDocument]) -> FieldStatus {
    aggregate(docs.iter().map(|doc| {
        let flag = if doc.edited.enabled {
            EditFlag::Edited
        } else {
            EditFlag::Unedited
        };
        (flag, FieldValue::Toggle(doc.params.enabled))
    }))
}

fn display_for(spot: SpotId, docs: &[BoundDocument]) -> Result<SpotDisplay, ReconcileError> {
    let values = docs
        .iter()
        .find_map(|d| d.params.spot(spot))
        .cloned()
        .ok_or(ReconcileError::NotFound(spot))?;
    let tool_enabled = docs
        .iter()
        .filter(|d| d.params.spot(spot).is_some())
        .any(|d| d.params.enabled);

    let mut status = Vec::with_capacity(FIELD_COUNT);
    let mut sensitive = Vec::with_capacity(FIELD_COUNT);
    for &field in FieldId::ALL {
        status.push(field_status(spot, field, docs));
        let group_on = field.is_group_toggle() || values.is_group_enabled(field.group());
        sensitive.push(tool_enabled && group_on);
    }

    Ok(SpotDisplay {
        spot,
        values,
        status,
        sensitive,
        tool_enabled,
    })
}
