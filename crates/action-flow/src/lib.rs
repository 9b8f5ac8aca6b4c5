//! Action Flow - bounded retry policies for page interactions
//!
//! Each retried interaction carries an explicit `RetryPolicy` (attempt bound,
//! pause, terminal policy) instead of an ad hoc loop with flags.

mod strategies;
pub mod types;

pub use types::*;
