// ── Core error types ──
//
// Everything in this crate is local and in-memory, so the taxonomy is
// small: lookups that miss, edits that fail validation, seams that are
// not wired to a real collaborator, and the one platform boundary (the
// clipboard).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    // ── Integration errors ───────────────────────────────────────────
    #[error("{operation} is not available in this build")]
    Unsupported { operation: String },

    #[error("clipboard write failed: {message}")]
    Clipboard { message: String },
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
