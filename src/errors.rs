//! Error types of the catalog tagger
//!
//! Ledger and configuration errors end the run. Everything raised while a
//! single record is processed becomes a [`RecordError`] and is caught at the
//! record boundary, except ledger failures, which stay fatal.

use std::fmt;
use std::path::PathBuf;

use action_primitives::ActionError;
use thiserror::Error;
use tool_select_option::SelectError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LedgerError::Csv {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration file found at {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// The two groups of text inputs on the detail view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSet {
    Required,
    NotRequired,
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSet::Required => f.write_str("required"),
            FieldSet::NotRequired => f.write_str("not-required"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("{set} input #{index} missing: only {found} rendered")]
    MissingField {
        set: FieldSet,
        index: usize,
        found: usize,
    },
    #[error("no single matching row after {attempts} attempts: {found} found")]
    RowMatchExhausted { found: usize, attempts: u32 },
    #[error("dropdown still open after {attempts} escape attempts")]
    EscapeExhausted { attempts: u32 },
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RecordError {
    /// Name written into the `errored: (<kind>)` ledger status
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Action(err) => err.kind(),
            RecordError::Select(err) => err.kind(),
            RecordError::MissingField { .. } => "MissingField",
            RecordError::RowMatchExhausted { .. } => "RowMatchExhausted",
            RecordError::EscapeExhausted { .. } => "EscapeExhausted",
            RecordError::Ledger(_) => "Ledger",
        }
    }
}
