//! The local-adjustment panel: spots, bound documents and edits wired
//! together in one place.
//!
//! Pointer input goes through the [`SpotController`] and is fully applied
//! before any parameter write; field edits go through the
//! [`ParamReconciler`] and the active spot's displayed fields are refreshed
//! from the primary document afterwards.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::controller::SpotController;
use crate::error::{PanelError, ReconcileError, SpotError};
use crate::geometry::{PrimitiveId, SpotGeometry, SpotShape};
use crate::input::{CursorKind, PointerDrag};
use crate::params::{
    BoundDocument, FieldId, FieldValue, LumaContrast, ParamDocument, ParamTable,
};
use crate::provider::ImageBoundsProvider;
use crate::reconcile::{FieldStatus, ParamReconciler, SpotDisplay};
use crate::registry::SpotRegistry;
use crate::spot::{SpotEvent, SpotId};

/// One spot as handed to the processing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSpot {
    pub id: SpotId,
    pub geometry: SpotGeometry,
    pub params: ParamTable,
}

/// Panel state for one editing session.
#[derive(Debug, Clone)]
pub struct LocalPanel {
    registry: SpotRegistry,
    reconciler: ParamReconciler,
    controller: SpotController,
    documents: Vec<BoundDocument>,
    batch_mode: bool,
}

impl LocalPanel {
    /// A panel over `document_count` fresh documents (at least one). Only
    /// the first is bound until batch mode is switched on.
    pub fn new(document_count: usize) -> Self {
        let documents = (0..document_count.max(1))
            .map(|_| BoundDocument::new(ParamDocument::default()))
            .collect();
        Self {
            registry: SpotRegistry::new(),
            reconciler: ParamReconciler::new(),
            controller: SpotController,
            documents,
            batch_mode: false,
        }
    }

    pub fn registry(&self) -> &SpotRegistry {
        &self.registry
    }

    pub fn documents(&self) -> &[BoundDocument] {
        &self.documents
    }

    pub fn is_batch_mode(&self) -> bool {
        self.batch_mode
    }

    /// In batch mode every document is bound; otherwise only the first.
    pub fn set_batch_mode(&mut self, batch: bool) {
        if self.batch_mode != batch {
            tracing::info!(
                "batch mode {} ({} documents)",
                if batch { "on" } else { "off" },
                self.documents.len()
            );
        }
        self.batch_mode = batch;
    }

    /// Documents edits are currently applied to.
    pub fn bound(&self) -> &[BoundDocument] {
        &self.documents[..self.bound_len()]
    }

    fn bound_len(&self) -> usize {
        if self.batch_mode {
            self.documents.len()
        } else {
            1
        }
    }

    // ── Spots ───────────────────────────────────────────────────────

    /// Create a spot at the provider's initial position and add default
    /// parameters for it to every document.
    pub fn add_spot(&mut self, bounds: &impl ImageBoundsProvider) -> SpotId {
        let id = self.registry.add(bounds.initial_center());
        for doc in &mut self.documents {
            doc.params.insert_spot(id, ParamTable::default());
        }
        tracing::info!("created {id}");
        id
    }

    /// Delete a spot from the registry and from every document.
    pub fn remove_spot(&mut self, id: SpotId) -> Result<(), PanelError> {
        self.registry.remove(id)?;
        for doc in &mut self.documents {
            doc.params.remove_spot(id);
            doc.edited.clear_spot(id);
        }
        if self.reconciler.active_spot() == Some(id) {
            self.reconciler.clear_active();
        }
        tracing::info!("deleted {id}");
        Ok(())
    }

    /// Make `id` the active spot and return what the panel shows for it.
    pub fn select_spot(&mut self, id: SpotId) -> Result<SpotDisplay, PanelError> {
        self.registry.get(id)?;
        let n = self.bound_len();
        let display = self.reconciler.select_spot(id, &self.documents[..n])?;
        self.registry.set_active(id)?;
        self.registry.get_mut(id)?.fields = display.values.clone();
        Ok(display)
    }

    /// Recompute the display of the active spot.
    pub fn display(&self) -> Result<SpotDisplay, PanelError> {
        Ok(self.reconciler.display(self.bound())?)
    }

    pub fn rename_spot(&mut self, id: SpotId, name: impl Into<String>) -> Result<(), PanelError> {
        self.registry.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_spot_excluded(&mut self, id: SpotId, excluded: bool) -> Result<(), PanelError> {
        self.registry.get_mut(id)?.is_excluded = excluded;
        Ok(())
    }

    pub fn set_spot_visible(&mut self, id: SpotId, visible: bool) -> Result<(), PanelError> {
        self.registry.get_mut(id)?.is_visible = visible;
        Ok(())
    }

    // ── Pointer ─────────────────────────────────────────────────────

    /// Route a drag step to the spot owning its target primitive.
    ///
    /// Drags that start off every spot, or on a primitive of a spot that
    /// no longer exists, change nothing.
    pub fn pointer_drag(
        &mut self,
        drag: &PointerDrag,
        bounds: &impl ImageBoundsProvider,
    ) -> SpotEvent {
        let Some(target) = drag.target else {
            return SpotEvent::None;
        };
        match self.registry.get_mut(target.spot) {
            Ok(spot) => self.controller.handle_drag(spot, drag, bounds),
            Err(SpotError::NotFound(id)) => {
                tracing::debug!("drag on primitive of missing {id}");
                SpotEvent::None
            }
        }
    }

    /// Hit-test primitive under `point`: the topmost visible spot whose
    /// outline contains it. Later spots are drawn over earlier ones.
    pub fn primitive_at(&self, point: IVec2) -> Option<PrimitiveId> {
        self.registry
            .all()
            .iter()
            .rev()
            .filter(|s| s.is_visible)
            .find(|s| s.geometry.contains(point))
            .map(|s| s.mouse_over().id)
    }

    /// Update prelight for the primitive under the pointer and return the
    /// cursor to show. `None` clears every highlight.
    pub fn hover(&mut self, primitive: Option<PrimitiveId>) -> Option<CursorKind> {
        let hovered = primitive.map(|p| p.spot);
        let ids: Vec<SpotId> = self.registry.all().iter().map(|s| s.id).collect();
        let mut cursor = None;
        for id in ids {
            let Ok(spot) = self.registry.get_mut(id) else { continue };
            self.controller.set_prelight(spot, hovered == Some(id));
            if let Some(p) = primitive {
                cursor = cursor.or(self.controller.cursor_for(spot, p));
            }
        }
        cursor
    }

    pub fn set_spot_shape(
        &mut self,
        id: SpotId,
        shape: SpotShape,
    ) -> Result<SpotEvent, PanelError> {
        let spot = self.registry.get_mut(id)?;
        Ok(self.controller.set_shape(spot, shape))
    }

    // ── Parameters ──────────────────────────────────────────────────

    /// Set `field` of the active spot on every bound document.
    pub fn edit(&mut self, field: FieldId, value: FieldValue) -> Result<FieldStatus, PanelError> {
        check_kind(field, &value)?;
        let n = self.bound_len();
        let status = self
            .reconciler
            .apply_edit(field, value, &mut self.documents[..n])?;
        self.sync_active_fields();
        Ok(status)
    }

    /// Set `field` of the active spot on the bound documents at `targets`.
    pub fn edit_subset(
        &mut self,
        field: FieldId,
        value: FieldValue,
        targets: &[usize],
    ) -> Result<FieldStatus, PanelError> {
        check_kind(field, &value)?;
        let n = self.bound_len();
        let targets: Vec<usize> = targets.iter().copied().filter(|&i| i < n).collect();
        let status = self
            .reconciler
            .apply_edit_to(field, value, &mut self.documents[..n], &targets)?;
        self.sync_active_fields();
        Ok(status)
    }

    /// Raise, lower or neutralize the contrast-by-detail levels of the
    /// active spot on every bound document.
    pub fn luma_contrast(
        &mut self,
        step: LumaContrast,
    ) -> Result<Vec<(FieldId, FieldStatus)>, PanelError> {
        let n = self.bound_len();
        let statuses = self
            .reconciler
            .apply_luma_contrast(step, &mut self.documents[..n])?;
        self.sync_active_fields();
        Ok(statuses)
    }

    /// Restore `field` of the active spot from the default snapshot.
    pub fn reset_field(&mut self, field: FieldId) -> Result<FieldStatus, PanelError> {
        let n = self.bound_len();
        let status = self
            .reconciler
            .reset_to_default(field, &mut self.documents[..n])?;
        self.sync_active_fields();
        Ok(status)
    }

    /// Use the active spot's current values as the default snapshot.
    pub fn capture_default(&mut self) -> Result<(), PanelError> {
        let id = self.registry.active_id().ok_or(ReconcileError::NoActiveSpot)?;
        let table = self
            .bound()
            .iter()
            .find_map(|d| d.params.spot(id))
            .cloned()
            .ok_or(ReconcileError::NotFound(id))?;
        self.reconciler.capture_default(table);
        Ok(())
    }

    pub fn set_tool_enabled(&mut self, enabled: bool) -> FieldStatus {
        let n = self.bound_len();
        self.reconciler.set_tool_enabled(enabled, &mut self.documents[..n])
    }

    /// Clamp every stored value into range, e.g. after loading documents.
    pub fn trim_values(&mut self) {
        self.reconciler.trim_values(&mut self.documents);
        self.sync_active_fields();
    }

    /// Spots the engine should apply to document `doc`, in registry order.
    /// Empty if the document or the tool is off.
    pub fn processing_queue(&self, doc: usize) -> Vec<ProcessedSpot> {
        let Some(document) = self.documents.get(doc) else {
            return Vec::new();
        };
        if !document.params.enabled {
            return Vec::new();
        }
        self.registry
            .processing_order()
            .filter_map(|spot| {
                let params = document.params.spot(spot.id)?.clone();
                Some(ProcessedSpot {
                    id: spot.id,
                    geometry: spot.geometry,
                    params,
                })
            })
            .collect()
    }

    /// Refresh the active spot's cached [`Spot::fields`](crate::Spot::fields)
    /// from the primary bound document.
    fn sync_active_fields(&mut self) {
        let Some(id) = self.registry.active_id() else {
            return;
        };
        let table = self.bound().iter().find_map(|d| d.params.spot(id)).cloned();
        if let (Some(table), Ok(spot)) = (table, self.registry.get_mut(id)) {
            spot.fields = table;
        }
    }
}

/// Values arriving from outside may name a field with the wrong kind of
/// value; reject them before they reach the reconciler.
fn check_kind(field: FieldId, value: &FieldValue) -> Result<(), PanelError> {
    if field.kind().accepts(value) {
        Ok(())
    } else {
        Err(PanelError::WrongKind(field))
    }
}
