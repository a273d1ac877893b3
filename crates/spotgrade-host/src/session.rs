//! Dispatches host commands to the panel.

use spotgrade_core::{ImageBounds, LocalPanel, PanelError, SpotEvent, SpotId};

use crate::config::HostConfig;
use crate::ipc::{HostCommand, PanelEvent, SpotSummary};

/// Panel plus the image bounds last reported by the front end.
pub struct HostSession {
    panel: LocalPanel,
    bounds: ImageBounds,
}

impl HostSession {
    pub fn new(config: &HostConfig) -> Self {
        let mut panel = LocalPanel::new(config.documents);
        panel.set_batch_mode(config.batch_mode);
        Self {
            panel,
            bounds: ImageBounds::default(),
        }
    }

    /// Apply one command and return the events it produced.
    pub fn handle(&mut self, command: HostCommand) -> Vec<PanelEvent> {
        match self.dispatch(command) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("command rejected: {e}");
                vec![PanelEvent::Error {
                    message: e.to_string(),
                }]
            }
        }
    }

    fn dispatch(&mut self, command: HostCommand) -> Result<Vec<PanelEvent>, PanelError> {
        let events = match command {
            HostCommand::RequestState => vec![self.state()],
            HostCommand::SetImage {
                width,
                height,
                preview_center,
            } => {
                self.bounds = ImageBounds {
                    width,
                    height,
                    preview_center,
                };
                tracing::info!("image bounds {width}x{height}");
                Vec::new()
            }
            HostCommand::AddSpot => {
                let id = self.panel.add_spot(&self.bounds);
                vec![PanelEvent::SpotAdded {
                    spot: self.summary(id)?,
                }]
            }
            HostCommand::RemoveSpot { spot } => {
                self.panel.remove_spot(spot)?;
                vec![PanelEvent::SpotRemoved { spot }]
            }
            HostCommand::SelectSpot { spot } => {
                let display = self.panel.select_spot(spot)?;
                vec![PanelEvent::Display { display }]
            }
            HostCommand::RenameSpot { spot, name } => {
                self.panel.rename_spot(spot, name)?;
                vec![self.changed(spot, SpotEvent::None)?]
            }
            HostCommand::SetExcluded { spot, excluded } => {
                self.panel.set_spot_excluded(spot, excluded)?;
                vec![self.changed(spot, SpotEvent::None)?]
            }
            HostCommand::SetVisible { spot, visible } => {
                self.panel.set_spot_visible(spot, visible)?;
                vec![self.changed(spot, SpotEvent::None)?]
            }
            HostCommand::SetShape { spot, shape } => {
                let event = self.panel.set_spot_shape(spot, shape)?;
                vec![self.changed(spot, event)?]
            }
            HostCommand::Drag { drag } => {
                let event = self.panel.pointer_drag(&drag, &self.bounds);
                match (event, drag.target) {
                    (SpotEvent::None, _) | (_, None) => Vec::new(),
                    (event, Some(target)) => vec![self.changed(target.spot, event)?],
                }
            }
            HostCommand::Pick { position } => vec![PanelEvent::Picked {
                primitive: self.panel.primitive_at(position),
            }],
            HostCommand::Hover { primitive } => {
                let cursor = self.panel.hover(primitive);
                vec![PanelEvent::Cursor { cursor }]
            }
            HostCommand::EditField { field, value } => {
                let status = self.panel.edit(field, value)?;
                vec![PanelEvent::FieldStatus { field, status }]
            }
            HostCommand::EditFieldSubset {
                field,
                value,
                documents,
            } => {
                let status = self.panel.edit_subset(field, value, &documents)?;
                vec![PanelEvent::FieldStatus { field, status }]
            }
            HostCommand::ResetField { field } => {
                let status = self.panel.reset_field(field)?;
                vec![PanelEvent::FieldStatus { field, status }]
            }
            HostCommand::LumaContrast { step } => self
                .panel
                .luma_contrast(step)?
                .into_iter()
                .map(|(field, status)| PanelEvent::FieldStatus { field, status })
                .collect(),
            HostCommand::CaptureDefault => {
                self.panel.capture_default()?;
                Vec::new()
            }
            HostCommand::SetToolEnabled { enabled } => {
                let status = self.panel.set_tool_enabled(enabled);
                vec![PanelEvent::ToolStatus { status }]
            }
            HostCommand::SetBatchMode { enabled } => {
                self.panel.set_batch_mode(enabled);
                self.refreshed_display()
            }
            HostCommand::TrimValues => {
                self.panel.trim_values();
                self.refreshed_display()
            }
            HostCommand::RequestQueue { document } => vec![PanelEvent::ProcessingQueue {
                document,
                spots: self.panel.processing_queue(document),
            }],
        };
        Ok(events)
    }

    fn state(&self) -> PanelEvent {
        let registry = self.panel.registry();
        PanelEvent::State {
            spots: registry.all().iter().map(SpotSummary::from).collect(),
            active: registry.active_id(),
            batch_mode: self.panel.is_batch_mode(),
            documents: self.panel.documents().len(),
        }
    }

    fn summary(&self, id: SpotId) -> Result<SpotSummary, PanelError> {
        Ok(SpotSummary::from(self.panel.registry().get(id)?))
    }

    fn changed(&self, id: SpotId, event: SpotEvent) -> Result<PanelEvent, PanelError> {
        Ok(PanelEvent::SpotChanged {
            spot: self.summary(id)?,
            event,
        })
    }

    /// The active spot's display, if one is active.
    fn refreshed_display(&self) -> Vec<PanelEvent> {
        match self.panel.display() {
            Ok(display) => vec![PanelEvent::Display { display }],
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use spotgrade_core::params::{FieldId, FieldValue, LumaContrast};
    use spotgrade_core::{FieldStatus, Modifiers, PointerDrag, PrimitiveId, PrimitiveRole};

    use super::*;

    fn session(documents: usize, batch_mode: bool) -> HostSession {
        HostSession::new(&HostConfig {
            documents,
            batch_mode,
            log_filter: "off".to_string(),
        })
    }

    fn added_id(events: &[PanelEvent]) -> SpotId {
        match events {
            [PanelEvent::SpotAdded { spot }] => spot.id,
            other => panic!("expected SpotAdded, got {other:?}"),
        }
    }

    #[test]
    fn test_add_spot_uses_reported_preview() {
        let mut s = session(1, false);
        s.handle(HostCommand::SetImage {
            width: 800,
            height: 600,
            preview_center: Some(IVec2::new(400, 300)),
        });
        match s.handle(HostCommand::AddSpot).as_slice() {
            [PanelEvent::SpotAdded { spot }] => {
                assert_eq!(spot.geometry.center, IVec2::new(400, 300));
                assert_eq!(spot.geometry.radius, 5);
            }
            other => panic!("expected SpotAdded, got {other:?}"),
        }
    }

    #[test]
    fn test_resize_drag_reports_change() {
        let mut s = session(1, false);
        s.handle(HostCommand::SetImage {
            width: 800,
            height: 600,
            preview_center: Some(IVec2::new(400, 300)),
        });
        let id = added_id(&s.handle(HostCommand::AddSpot));
        let drag = PointerDrag {
            target: Some(PrimitiveId {
                spot: id,
                role: PrimitiveRole::MouseOver,
            }),
            origin: IVec2::new(400, 300),
            delta: IVec2::new(50, 0),
            modifiers: Modifiers::SHIFT,
        };
        match s.handle(HostCommand::Drag { drag }).as_slice() {
            [PanelEvent::SpotChanged { spot, event }] => {
                assert_eq!(*event, SpotEvent::CenterResized);
                assert_eq!(spot.geometry.radius, 50);
            }
            other => panic!("expected SpotChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_without_selection_reports_error() {
        let mut s = session(1, false);
        let events = s.handle(HostCommand::EditField {
            field: FieldId::Sensi,
            value: FieldValue::Number(40.0),
        });
        assert!(matches!(events.as_slice(), [PanelEvent::Error { .. }]));
    }

    #[test]
    fn test_batch_edit_statuses() {
        let mut s = session(3, true);
        let id = added_id(&s.handle(HostCommand::AddSpot));
        s.handle(HostCommand::SelectSpot { spot: id });

        let status_of = |events: Vec<PanelEvent>| match events.as_slice() {
            [PanelEvent::FieldStatus { status, .. }] => *status,
            other => panic!("expected FieldStatus, got {other:?}"),
        };
        assert_eq!(
            status_of(s.handle(HostCommand::EditField {
                field: FieldId::Sensi,
                value: FieldValue::Number(40.0),
            })),
            FieldStatus::AllEditedSame
        );
        assert_eq!(
            status_of(s.handle(HostCommand::EditFieldSubset {
                field: FieldId::Sensi,
                value: FieldValue::Number(60.0),
                documents: vec![0],
            })),
            FieldStatus::AllEditedDiffering
        );
        assert_eq!(
            status_of(s.handle(HostCommand::ResetField {
                field: FieldId::Sensi
            })),
            FieldStatus::AllUnedited
        );
    }

    fn session_with_spot() -> (HostSession, SpotId) {
        let mut s = session(1, false);
        s.handle(HostCommand::SetImage {
            width: 800,
            height: 600,
            preview_center: Some(IVec2::new(400, 300)),
        });
        let id = added_id(&s.handle(HostCommand::AddSpot));
        (s, id)
    }

    fn drag_command(id: SpotId, origin: IVec2, delta: IVec2, modifiers: Modifiers) -> HostCommand {
        HostCommand::Drag {
            drag: PointerDrag {
                target: Some(PrimitiveId {
                    spot: id,
                    role: PrimitiveRole::MouseOver,
                }),
                origin,
                delta,
                modifiers,
            },
        }
    }

    #[test]
    fn test_wrong_kind_value_reports_error() {
        let (mut s, id) = session_with_spot();
        s.handle(HostCommand::SelectSpot { spot: id });

        let line = r#"{"type":"EditField","data":{"field":"sensi","value":{"toggle":true}}}"#;
        let command: HostCommand = serde_json::from_str(line).expect("valid command");
        assert!(matches!(s.handle(command).as_slice(), [PanelEvent::Error { .. }]));

        let subset = HostCommand::EditFieldSubset {
            field: FieldId::ExpColor,
            value: FieldValue::Choice(1),
            documents: vec![0],
        };
        assert!(matches!(s.handle(subset).as_slice(), [PanelEvent::Error { .. }]));

        // The session keeps serving commands afterwards.
        let events = s.handle(HostCommand::EditField {
            field: FieldId::Sensi,
            value: FieldValue::Number(40.0),
        });
        assert!(matches!(events.as_slice(), [PanelEvent::FieldStatus { .. }]));
    }

    #[test]
    fn test_extreme_drag_values_saturate() {
        let (mut s, id) = session_with_spot();

        let center = IVec2::new(400, 300);
        let fling = drag_command(id, center, IVec2::new(i32::MAX, 0), Modifiers::NONE);
        match s.handle(fling).as_slice() {
            [PanelEvent::SpotChanged { spot, .. }] => {
                assert_eq!(spot.geometry.center, IVec2::new(800, 300));
            }
            other => panic!("expected SpotChanged, got {other:?}"),
        }

        let edge = IVec2::new(i32::MAX - 5, 300);
        let stretch = drag_command(id, edge, IVec2::new(50, 0), Modifiers::SHIFT);
        match s.handle(stretch).as_slice() {
            [PanelEvent::SpotChanged { spot, .. }] => assert_eq!(spot.geometry.radius, 150),
            other => panic!("expected SpotChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_pick_far_from_every_spot() {
        let mut s = session(1, false);
        s.handle(HostCommand::SetImage {
            width: 800,
            height: 600,
            preview_center: Some(IVec2::ZERO),
        });
        let id = added_id(&s.handle(HostCommand::AddSpot));

        let far = s.handle(HostCommand::Pick {
            position: IVec2::new(60_000, 60_000),
        });
        assert!(matches!(far.as_slice(), [PanelEvent::Picked { primitive: None }]));

        let near = s.handle(HostCommand::Pick {
            position: IVec2::new(1, 1),
        });
        match near.as_slice() {
            [PanelEvent::Picked { primitive: Some(p) }] => assert_eq!(p.spot, id),
            other => panic!("expected Picked, got {other:?}"),
        }
    }

    #[test]
    fn test_luma_contrast_reports_each_level() {
        let (mut s, id) = session_with_spot();
        s.handle(HostCommand::SelectSpot { spot: id });

        let events = s.handle(HostCommand::LumaContrast {
            step: LumaContrast::Minus,
        });
        let fields: Vec<_> = events
            .iter()
            .map(|e| match e {
                PanelEvent::FieldStatus { field, status } => {
                    assert_eq!(*status, FieldStatus::AllEditedSame);
                    *field
                }
                other => panic!("expected FieldStatus, got {other:?}"),
            })
            .collect();
        assert_eq!(fields, FieldId::CONTRAST_LEVELS);
    }

    #[test]
    fn test_commands_parse_from_json() {
        let line = r#"{"type":"EditField","data":{"field":"sensi","value":{"number":40.0}}}"#;
        let command: HostCommand = serde_json::from_str(line).expect("valid command");
        assert!(matches!(
            command,
            HostCommand::EditField {
                field: FieldId::Sensi,
                ..
            }
        ));
    }
}
