//! Closing an open dropdown with the Escape key

use action_flow::{Probe, RetryOutcome};
use action_primitives::ActionError;
use tracing::{info, warn};

use crate::errors::SelectError;
use crate::model::{EscapeVerdict, WidgetSlot};
use crate::runner::SelectizeDriver;

impl SelectizeDriver<'_> {
    /// Press Escape until no dropdown reports itself open.
    ///
    /// Running out of attempts is not an error: the caller gets
    /// [`EscapeVerdict::StillOpen`] with the policy's terminal action and
    /// decides what to record.
    pub async fn escape_close(&self) -> Result<EscapeVerdict, SelectError> {
        let ui = self.ui;
        let open = self.selectors.open_anchor();
        let open = &open;
        let probe_timeout = self.policy.timeouts.esc_probe();

        let outcome = self
            .policy
            .escape
            .run("escape-close", move |_attempt| async move {
                ui.send_escape().await?;
                let still_open = ui.is_present(open, probe_timeout).await?;
                Ok::<_, ActionError>(if still_open {
                    Probe::Pending(())
                } else {
                    Probe::Ready(())
                })
            })
            .await?;

        Ok(match outcome {
            RetryOutcome::Satisfied { attempts, .. } => {
                info!(attempts, "dropdown closed");
                EscapeVerdict::Closed { attempts }
            }
            RetryOutcome::Exhausted {
                attempts, policy, ..
            } => {
                warn!(attempts, ?policy, "dropdown still open after escape attempts");
                EscapeVerdict::StillOpen { attempts, policy }
            }
        })
    }

    /// Wait for the open indicator left by the `slot` pass to disappear
    /// before the next widget is opened.
    pub async fn await_closed(&self, slot: WidgetSlot) -> Result<(), SelectError> {
        self.ui
            .wait_for_absent(&self.selectors.open_anchor(), self.policy.timeouts.close())
            .await?;
        info!(slot = slot.label(), "selection pass closed");
        Ok(())
    }
}
