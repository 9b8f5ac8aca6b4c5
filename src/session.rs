//! Record session controller
//!
//! Drives one record at a time from search to save or discard. Mismatched
//! row counts and labels missing from a dropdown are outcomes, not errors.
//! Any other failure is caught at the record boundary, recorded, and
//! followed by navigation back to the product panel.

use std::time::Duration;

use action_flow::{Exhaustion, Probe, RetryOutcome};
use action_primitives::{
    ActionError, ActionPrimitives, AnchorDescriptor, ElementSnapshot, Visibility,
};
use tokio::time::{sleep, Instant};
use tool_select_option::{EscapeVerdict, SelectionOutcome, SelectizeDriver, WidgetSlot};
use tracing::{error, info, instrument, warn};

use crate::config::TaggerConfig;
use crate::errors::{FieldSet, LedgerError, RecordError};
use crate::labels::{derive_labels, AttributeField};
use crate::ledger::{
    ambiguous_status, errored_status, CsvLedger, ESCAPE_CLOSE_KEY, STATUS_ESC_FAILED,
    STATUS_NOT_FOUND, STATUS_PROCESSED,
};
use crate::panel;

/// Positions within the required inputs
const BRAND_INDEX: usize = 2;
/// Positions within the not-required inputs
const COLLECTIONS_INDEX: usize = 5;
const TYPES_INDEX: usize = 6;
const CATEGORIES_INDEX: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordDisposition {
    /// Every derived label was attempted and the edit saved or discarded
    Processed(SelectionOutcome),
    /// The search matched no row
    NotFound,
    /// The search kept matching several rows
    Ambiguous(usize),
    /// Caught failure, by error kind
    Errored(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub not_found: usize,
    pub ambiguous: usize,
    pub errored: usize,
    pub escape_failures: usize,
    pub stopped_at_cap: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.processed + self.not_found + self.ambiguous + self.errored
    }

    fn log(&self) {
        info!(
            processed = self.processed,
            not_found = self.not_found,
            ambiguous = self.ambiguous,
            errored = self.errored,
            escape_failures = self.escape_failures,
            stopped_at_cap = self.stopped_at_cap,
            elapsed = %humantime::format_duration(Duration::from_secs(self.elapsed.as_secs())),
            "run finished"
        );
    }
}

struct ProductFields {
    brand: String,
    collections: AttributeField,
    types: AttributeField,
    categories: AttributeField,
}

pub struct RecordSession<'a> {
    ui: &'a dyn ActionPrimitives,
    ledger: &'a CsvLedger,
    config: &'a TaggerConfig,
}

impl<'a> RecordSession<'a> {
    pub fn new(
        ui: &'a dyn ActionPrimitives,
        ledger: &'a CsvLedger,
        config: &'a TaggerConfig,
    ) -> Self {
        Self { ui, ledger, config }
    }

    /// Log in and open the product panel
    pub async fn start(&self) -> Result<(), ActionError> {
        panel::login(self.ui, self.config, &self.config.selectors).await?;
        panel::open_product_panel(self.ui, self.config, &self.config.selectors).await
    }

    /// Process `ids` in order until done or the cap is reached.
    ///
    /// Only ledger failures abort the run.
    pub async fn run(&self, ids: &[String]) -> Result<RunSummary, LedgerError> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        for (ordinal, id) in ids.iter().enumerate().map(|(i, id)| (i + 1, id)) {
            if !self.config.within_cap(ordinal) {
                info!(
                    process_items = ?self.config.process_items,
                    "processing cap reached"
                );
                summary.stopped_at_cap = true;
                break;
            }
            self.process_record(id, &mut summary).await?;
        }

        summary.elapsed = started.elapsed();
        summary.log();
        Ok(summary)
    }

    /// Run one record and persist its terminal outcome
    pub async fn process_record(
        &self,
        id: &str,
        summary: &mut RunSummary,
    ) -> Result<RecordDisposition, LedgerError> {
        self.ledger.append(id)?;

        let disposition = match self.tag_record(id, summary).await {
            Ok(disposition) => disposition,
            Err(RecordError::Ledger(err)) => return Err(err),
            Err(err) => {
                error!(id, kind = err.kind(), error = %err, "record failed");
                RecordDisposition::Errored(err.kind())
            }
        };

        match &disposition {
            RecordDisposition::Errored(kind) => {
                self.ledger.set_status(id, &errored_status(kind))?;
                summary.errored += 1;
                self.recover(id).await;
            }
            RecordDisposition::Processed(outcome) => {
                self.ledger.set_outcome(
                    id,
                    STATUS_PROCESSED,
                    &outcome.completed,
                    &outcome.failed_to_select,
                )?;
                summary.processed += 1;
            }
            RecordDisposition::NotFound => {
                info!(id, "no matching row, not processed");
                self.ledger.set_status(id, STATUS_NOT_FOUND)?;
                summary.not_found += 1;
                self.recover(id).await;
            }
            RecordDisposition::Ambiguous(found) => {
                // the table stays on screen, so no navigation here
                info!(id, found, "several matching rows, not processed");
                self.ledger.set_status(id, &ambiguous_status(*found))?;
                summary.ambiguous += 1;
            }
        }
        Ok(disposition)
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn tag_record(
        &self,
        id: &str,
        summary: &mut RunSummary,
    ) -> Result<RecordDisposition, RecordError> {
        let selectors = &self.config.selectors;
        let wait = self.config.timeouts.default_wait();
        info!("processing record");

        self.ui.send_keys(&selectors.search_input, id).await?;
        sleep(self.config.timeouts.search_settle()).await;

        match self.match_rows().await? {
            RetryOutcome::Satisfied { attempts, .. } => {
                info!(attempts, "one matching row found");
            }
            RetryOutcome::Exhausted {
                last,
                attempts,
                policy: Exhaustion::AbortRecord,
            } => {
                return Err(RecordError::RowMatchExhausted {
                    found: last,
                    attempts,
                });
            }
            RetryOutcome::Exhausted { last: 0, .. } => return Ok(RecordDisposition::NotFound),
            RetryOutcome::Exhausted {
                last,
                policy: Exhaustion::SkipRecord,
                ..
            } if !self.config.process_multiple => {
                return Ok(RecordDisposition::Ambiguous(last));
            }
            RetryOutcome::Exhausted { last, .. } => {
                warn!(found = last, "several matching rows, using the first");
            }
        }

        let row = self.ui.first(&selectors.row_name, wait).await?;
        info!(name = %row.text, "opening row");
        self.ui
            .click(&AnchorDescriptor::css(selectors.table_row.clone()))
            .await?;
        self.ui
            .wait_for(&selectors.save_marker(), Visibility::Visible, wait)
            .await?;

        let fields = self.read_fields().await?;
        info!(brand = %fields.brand, "brand");
        let labels = derive_labels(&fields.collections, &fields.types, &fields.categories);
        info!(
            total = labels.total(),
            collections = ?labels.collections,
            types = ?labels.types,
            categories = ?labels.categories,
            "labels derived"
        );

        self.ui
            .scroll_into_view(&selectors.attribute_section)
            .await?;
        let driver = SelectizeDriver::new(self.ui, &selectors.selectize, &self.config.select);

        let mut outcome = SelectionOutcome::default();
        for slot in WidgetSlot::ALL {
            driver
                .select_all(slot, labels.for_slot(slot), &mut outcome)
                .await?;
            let verdict = driver.escape_close().await?;
            self.note_escape(verdict, summary)?;
            // the last pass goes straight to save or discard
            if slot != WidgetSlot::Categories {
                driver.await_closed(slot).await?;
            }
        }

        self.finish_edit().await?;
        Ok(RecordDisposition::Processed(outcome))
    }

    /// Poll the table until exactly one row matches
    async fn match_rows(&self) -> Result<RetryOutcome<usize>, ActionError> {
        let ui = self.ui;
        let rows = &self.config.selectors.table_row;
        let timeout = self.config.timeouts.row_query();

        self.config
            .row_match
            .run("row-match", move |attempt| async move {
                let found = ui.query_all(rows, timeout).await?.len();
                if found == 1 {
                    return Ok::<_, ActionError>(Probe::Ready(found));
                }
                info!(attempt, found, "matching rows found, wait and retry");
                Ok(Probe::Pending(found))
            })
            .await
    }

    async fn read_fields(&self) -> Result<ProductFields, RecordError> {
        let selectors = &self.config.selectors;
        let wait = self.config.timeouts.default_wait();

        let required = self.ui.require_all(&selectors.required_inputs, wait).await?;
        let not_required = self
            .ui
            .require_all(&selectors.not_required_inputs, wait)
            .await?;

        Ok(ProductFields {
            brand: field_value(&required, FieldSet::Required, BRAND_INDEX)?.to_string(),
            collections: AttributeField::parse(field_value(
                &not_required,
                FieldSet::NotRequired,
                COLLECTIONS_INDEX,
            )?),
            types: AttributeField::parse(field_value(
                &not_required,
                FieldSet::NotRequired,
                TYPES_INDEX,
            )?),
            categories: AttributeField::parse(field_value(
                &not_required,
                FieldSet::NotRequired,
                CATEGORIES_INDEX,
            )?),
        })
    }

    /// Save or discard the open detail view
    async fn finish_edit(&self) -> Result<(), ActionError> {
        let selectors = &self.config.selectors;
        let wait = self.config.timeouts.default_wait();

        if self.config.save {
            self.ui.click(&selectors.save_button()).await?;
            self.ui
                .wait_for_absent(&selectors.save_marker(), wait)
                .await?;
            info!("changes saved");
            return Ok(());
        }

        let modal = AnchorDescriptor::css(selectors.confirm_modal.clone());
        self.ui.click(&selectors.cancel_button()).await?;
        self.ui
            .wait_for(&modal, Visibility::Present, wait)
            .await?;
        self.ui.click(&selectors.discard_button()).await?;
        self.ui.wait_for_absent(&modal, wait).await?;
        info!("changes discarded");
        Ok(())
    }

    /// Record an exhausted escape-close, then apply its terminal policy
    fn note_escape(
        &self,
        verdict: EscapeVerdict,
        summary: &mut RunSummary,
    ) -> Result<(), RecordError> {
        let EscapeVerdict::StillOpen { attempts, policy } = verdict else {
            return Ok(());
        };
        warn!(attempts, ?policy, "escape-close exhausted");
        summary.escape_failures += 1;
        self.ledger.upsert_status(ESCAPE_CLOSE_KEY, STATUS_ESC_FAILED)?;

        match policy {
            Exhaustion::Warn => Ok(()),
            Exhaustion::SkipRecord | Exhaustion::AbortRecord => {
                Err(RecordError::EscapeExhausted { attempts })
            }
        }
    }

    async fn recover(&self, id: &str) {
        info!(id, "returning to product panel");
        if let Err(err) =
            panel::open_product_panel(self.ui, self.config, &self.config.selectors).await
        {
            error!(id, kind = err.kind(), error = %err, "recovery navigation failed");
        }
    }
}

fn field_value(
    inputs: &[ElementSnapshot],
    set: FieldSet,
    index: usize,
) -> Result<&str, RecordError> {
    inputs
        .get(index)
        .map(ElementSnapshot::value_or_empty)
        .ok_or(RecordError::MissingField {
            set,
            index,
            found: inputs.len(),
        })
}
