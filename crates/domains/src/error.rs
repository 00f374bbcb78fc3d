//! # DomainError
//!
//! Centralized error handling for the Hromada ecosystem.
//! Maps domain-specific failures to actionable error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Resource not found (e.g., Article, Thread, Page)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Validation failure caught before any I/O (e.g., empty title, bad email)
    #[error("validation error: {0}")]
    Validation(String),

    /// No signed-in identity where one is required
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Signed in but lacking permission (non-admin, non-owner, locked thread)
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Write refused because the acting user carries an active ban.
    /// Carries the stored reason and timestamp so the client can render
    /// the banned notice verbatim.
    #[error("banned since {banned_at}: {reason}")]
    Banned {
        reason: String,
        banned_at: DateTime<Utc>,
    },

    /// Resource already exists (e.g., duplicate slug, duplicate subscriber)
    #[error("conflict: {0}")]
    Conflict(String),

    /// An outbound dependency is missing its configuration (e.g., mail API key)
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Infrastructure failure (e.g., database down, mail API unreachable)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Shorthand for the common "looked up by id, nothing there" case.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound(entity, id.to_string())
    }
}

/// A specialized Result type for Hromada logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
