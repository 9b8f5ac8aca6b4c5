//! Error types for action primitives

use thiserror::Error;

/// Failures raised by the UI actions facade
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A bounded wait elapsed before its condition held
    #[error("Wait timeout: {0}")]
    WaitTimeout(String),

    /// A query that requires at least one match found none
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element exists but could not receive the interaction
    #[error("Element not clickable: {0}")]
    NotClickable(String),

    /// Page navigation failed
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// In-page script returned something unexpected
    #[error("Script error: {0}")]
    Script(String),

    /// CDP communication or protocol error
    #[error("CDP I/O error: {0}")]
    Cdp(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Variant name, stable across messages. Used when an error has to be
    /// summarised into a short status string.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionError::WaitTimeout(_) => "WaitTimeout",
            ActionError::ElementNotFound(_) => "ElementNotFound",
            ActionError::NotClickable(_) => "NotClickable",
            ActionError::Navigation { .. } => "Navigation",
            ActionError::Script(_) => "Script",
            ActionError::Cdp(_) => "Cdp",
            ActionError::Internal(_) => "Internal",
        }
    }

    /// Check if this error is a timeout of a bounded wait
    pub fn is_timeout(&self) -> bool {
        matches!(self, ActionError::WaitTimeout(_))
    }
}
