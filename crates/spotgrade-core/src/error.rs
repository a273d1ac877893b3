use crate::params::FieldId;
use crate::spot::SpotId;

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpotError {
    #[error("{0} not found")]
    NotFound(SpotId),
}

/// Reasons a parameter edit cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("no active spot")]
    NoActiveSpot,
    #[error("{0} not found in any bound document")]
    NotFound(SpotId),
    #[error("local adjustments are disabled")]
    ToolDisabled,
}

/// Errors surfaced by the panel facade.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error(transparent)]
    Spot(#[from] SpotError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("value has the wrong kind for {0:?}")]
    WrongKind(FieldId),
}
