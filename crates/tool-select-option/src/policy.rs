use action_flow::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectPolicyView {
    pub timeouts: SelectTimeouts,
    /// Bounded Escape retries used to close a dropdown
    pub escape: RetryPolicy,
}

impl Default for SelectPolicyView {
    fn default() -> Self {
        Self {
            timeouts: SelectTimeouts::default(),
            escape: RetryPolicy::escape_close(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectTimeouts {
    /// Widget controls rendered, dropdown shown as open and options rendered
    pub open_ms: u64,
    /// Clicked option shown as a chosen item
    pub commit_ms: u64,
    /// Open indicator gone after an escape-close
    pub close_ms: u64,
    /// Presence probe after each Escape
    pub esc_probe_ms: u64,
}

impl SelectTimeouts {
    pub fn open(&self) -> Duration {
        Duration::from_millis(self.open_ms)
    }

    pub fn commit(&self) -> Duration {
        Duration::from_millis(self.commit_ms)
    }

    pub fn close(&self) -> Duration {
        Duration::from_millis(self.close_ms)
    }

    pub fn esc_probe(&self) -> Duration {
        Duration::from_millis(self.esc_probe_ms)
    }
}

impl Default for SelectTimeouts {
    fn default() -> Self {
        Self {
            open_ms: 10_000,
            commit_ms: 10_000,
            close_ms: 10_000,
            esc_probe_ms: 1_000,
        }
    }
}
