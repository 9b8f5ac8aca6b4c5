use action_primitives::{ActionPrimitives, Visibility};
use tracing::{debug, info, instrument};

use crate::errors::SelectError;
use crate::model::{LabelVerdict, SelectionOutcome, SlotTally, WidgetSlot};
use crate::policy::SelectPolicyView;
use crate::selectors::SelectizeSelectors;

/// Drives the selectize widgets of one detail view.
///
/// Holds no element handles: every step re-queries the page, since the
/// widgets re-render whenever an option is chosen.
pub struct SelectizeDriver<'a> {
    pub(crate) ui: &'a dyn ActionPrimitives,
    pub(crate) selectors: &'a SelectizeSelectors,
    pub(crate) policy: &'a SelectPolicyView,
}

impl<'a> SelectizeDriver<'a> {
    pub fn new(
        ui: &'a dyn ActionPrimitives,
        selectors: &'a SelectizeSelectors,
        policy: &'a SelectPolicyView,
    ) -> Self {
        Self {
            ui,
            selectors,
            policy,
        }
    }

    /// Open the widget at `slot` and pick `label` if the dropdown offers it.
    ///
    /// A label the dropdown does not list is recorded as failed and is not an
    /// error. A dropdown that renders no options at all is, as are timeouts
    /// while opening or committing.
    #[instrument(skip(self, slot, outcome), fields(slot = slot.label()))]
    pub async fn select_label(
        &self,
        slot: WidgetSlot,
        label: &str,
        outcome: &mut SelectionOutcome,
    ) -> Result<LabelVerdict, SelectError> {
        let timeouts = &self.policy.timeouts;

        let controls = self
            .ui
            .require_all(&self.selectors.control, timeouts.open())
            .await?;
        if controls.len() <= slot.index() {
            return Err(SelectError::WidgetMissing {
                slot,
                found: controls.len(),
            });
        }

        self.ui
            .click_nth(&self.selectors.control, slot.index())
            .await?;
        self.ui
            .wait_for(
                &self.selectors.open_anchor(),
                Visibility::Present,
                timeouts.open(),
            )
            .await?;

        let offered: Vec<String> = self
            .ui
            .require_all(&self.selectors.options, timeouts.open())
            .await?
            .into_iter()
            .map(|option| option.text)
            .collect();
        debug!(options = ?offered, "dropdown options rendered");

        if !offered.iter().any(|option| option == label) {
            info!(label, "label not offered by dropdown");
            outcome.record_failed(label);
            return Ok(LabelVerdict::Missing);
        }

        info!(label, "found label in dropdown");
        self.ui.click(&self.selectors.option_anchor(label)).await?;
        self.ui
            .wait_for(
                &self.selectors.chosen_anchor(label),
                Visibility::Present,
                timeouts.commit(),
            )
            .await?;
        outcome.record_completed(label);
        Ok(LabelVerdict::Selected)
    }

    /// Run [`select_label`](Self::select_label) for every label in order,
    /// duplicates included.
    pub async fn select_all(
        &self,
        slot: WidgetSlot,
        labels: &[String],
        outcome: &mut SelectionOutcome,
    ) -> Result<SlotTally, SelectError> {
        let mut tally = SlotTally::default();
        for label in labels {
            match self.select_label(slot, label, outcome).await? {
                LabelVerdict::Selected => tally.selected += 1,
                LabelVerdict::Missing => tally.missing += 1,
            }
        }
        debug!(
            slot = slot.label(),
            selected = tally.selected,
            missing = tally.missing,
            "selection pass done"
        );
        Ok(tally)
    }
}
