//! Common error infrastructure for inventory-core.
//!
//! Errors are returned as explicit values to the immediate caller. The core
//! never logs, retries or swallows them; the calling layer decides what to do
//! with a `NoSpace` or a `Rejected`.
//!
//! # Design Principles
//!
//! - **Type Safety**: one taxonomy ([`InventoryError`](crate::InventoryError)) for every grid operation
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable Codes**: every variant maps to a static code for metrics and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: retrying with different parameters may succeed
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with a different position or container.
    ///
    /// Examples: no space, overlapping placement
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown record id, unknown template
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - persisted data cannot be trusted.
    ///
    /// Examples: payload does not match its type tag
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for inventory-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
