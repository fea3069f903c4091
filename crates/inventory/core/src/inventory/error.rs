//! Inventory operation errors.

use crate::env::{TemplateId, TypeTag};
use crate::error::{CoreError, ErrorSeverity};
use crate::state::{GridPosition, RecordId};

/// Errors returned by grid and inventory operations.
///
/// Every error leaves the inventory exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    /// The resolver has no template with this id.
    #[error("template '{0}' not found")]
    TemplateNotFound(TemplateId),

    /// Requested placement is out of bounds or overlaps another item.
    #[error("position {0} is out of bounds or occupied")]
    InvalidPosition(GridPosition),

    /// No legal position exists anywhere in the grid.
    #[error("no space for item")]
    NoSpace,

    /// No record with this grid-local id.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// A policy hook declined the operation.
    #[error("rejected: {0}")]
    Rejected(RejectReason),

    /// The record's shape has a single orientation.
    #[error("record {0} cannot be rotated")]
    NotRotatable(RecordId),

    /// Every record id has been handed out; the inventory must be cleared
    /// or restored before it can take new items.
    #[error("record ids exhausted")]
    RecordIdsExhausted,

    /// Persisted data does not match its declared schema or template.
    #[error("corrupt data: {0}")]
    CorruptData(String),
}

impl InventoryError {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptData(message.into())
    }
}

impl CoreError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            InvalidPosition(_) | NoSpace | Rejected(_) => ErrorSeverity::Recoverable,
            TemplateNotFound(_) | NotFound(_) | NotRotatable(_) => ErrorSeverity::Validation,
            RecordIdsExhausted => ErrorSeverity::Internal,
            CorruptData(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            TemplateNotFound(_) => "INVENTORY_TEMPLATE_NOT_FOUND",
            InvalidPosition(_) => "INVENTORY_INVALID_POSITION",
            NoSpace => "INVENTORY_NO_SPACE",
            NotFound(_) => "INVENTORY_NOT_FOUND",
            Rejected(_) => "INVENTORY_REJECTED",
            NotRotatable(_) => "INVENTORY_NOT_ROTATABLE",
            RecordIdsExhausted => "INVENTORY_RECORD_IDS_EXHAUSTED",
            CorruptData(_) => "INVENTORY_CORRUPT_DATA",
        }
    }
}

/// Why a policy hook declined an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    #[error("{0} items are not accepted here")]
    TypeNotAccepted(TypeTag),

    #[error("container is full")]
    ContainerFull,

    #[error("item cannot be removed")]
    RemovalDenied,
}

impl From<RejectReason> for InventoryError {
    fn from(reason: RejectReason) -> Self {
        Self::Rejected(reason)
    }
}
