//! Catalog tagger library
//!
//! Assigns attribute labels to catalog products through the selectize
//! widgets of the catalog management UI, one product at a time, recording
//! each outcome in a CSV ledger.

pub mod config;
pub mod errors;
pub mod input;
pub mod labels;
pub mod ledger;
pub mod panel;
pub mod selectors;
pub mod session;

pub use config::TaggerConfig;
pub use errors::{ConfigError, LedgerError, RecordError};
pub use ledger::{CsvLedger, LedgerRecord};
pub use session::{RecordDisposition, RecordSession, RunSummary};
