//! Scripted in-memory catalog page

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use action_primitives::{
    ActionError, ActionPrimitives, AnchorDescriptor, ElementSnapshot, Visibility,
};
use async_trait::async_trait;
use catalog_tagger::config::TaggerConfig;
use catalog_tagger::ledger::CsvLedger;
use catalog_tagger::selectors::PageSelectors;
use tokio::time::{sleep, Instant};

pub const PANEL_URL: &str = "https://catalog.test/products";
pub const LOGIN_URL: &str = "https://catalog.test/login";

pub fn config(extra: &str) -> TaggerConfig {
    let text = format!(
        "url: {PANEL_URL}\nurl_login: {LOGIN_URL}\nuser: tagger\npassword: hunter2\n{extra}"
    );
    serde_yaml::from_str(&text).expect("test config")
}

pub fn ledger(dir: &Path) -> CsvLedger {
    let ledger = CsvLedger::new(dir.join("output.csv"));
    ledger.ensure().expect("ledger");
    ledger
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Default)]
struct State {
    row_counts: VecDeque<usize>,
    row_queries: Vec<Instant>,
    detail_failures: u32,
    stuck_open_checks: u32,
    stuck_widget: Option<usize>,

    logged_in: bool,
    cms_active: bool,
    panel: bool,
    detail_open: bool,
    modal_open: bool,
    open_slot: Option<usize>,
    chosen: Vec<String>,

    navigations: Vec<String>,
    searches: Vec<String>,
    events: Vec<String>,
    escapes: u32,
}

pub struct FakeCatalog {
    selectors: PageSelectors,
    row_name: String,
    required: Vec<String>,
    not_required: Vec<String>,
    options: [Vec<String>; 3],
    state: Mutex<State>,
}

impl FakeCatalog {
    /// One product whose collections, types and categories fields hold the
    /// given delimited strings
    pub fn product(collections: &str, types: &str, categories: &str) -> Self {
        let mut not_required: Vec<String> = (0..5).map(|i| format!("field {i}")).collect();
        not_required.extend([collections, types, categories].map(String::from));
        Self {
            selectors: PageSelectors::default(),
            row_name: "Fake product".into(),
            required: vec!["Name".into(), "SKU".into(), "Acme".into()],
            not_required,
            options: Default::default(),
            state: Mutex::new(State {
                row_counts: VecDeque::from([1]),
                ..Default::default()
            }),
        }
    }

    pub fn with_options(mut self, slot: usize, options: &[&str]) -> Self {
        self.options[slot] = options.iter().map(|option| option.to_string()).collect();
        self
    }

    /// Row counts returned by successive table queries; the last repeats
    pub fn with_row_counts(self, counts: &[usize]) -> Self {
        self.state.lock().unwrap().row_counts = counts.iter().copied().collect();
        self
    }

    /// The next `times` row clicks leave the detail view unopened
    pub fn with_detail_failures(self, times: u32) -> Self {
        self.state.lock().unwrap().detail_failures = times;
        self
    }

    /// The next open dropdown ignores Escape for `checks` presence checks
    pub fn with_stuck_dropdown(self, checks: u32) -> Self {
        self.state.lock().unwrap().stuck_open_checks = checks;
        self
    }

    /// Widget `slot` ignores Escape for the rest of the test
    pub fn with_stuck_widget(self, slot: usize) -> Self {
        self.state.lock().unwrap().stuck_widget = Some(slot);
        self
    }

    pub fn without_not_required_field(mut self, index: usize) -> Self {
        self.not_required.truncate(index);
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn panel_navigations(&self) -> usize {
        self.navigations()
            .iter()
            .filter(|url| url.as_str() == PANEL_URL)
            .count()
    }

    pub fn searches(&self) -> Vec<String> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn row_queries(&self) -> usize {
        self.state.lock().unwrap().row_queries.len()
    }

    /// Virtual time elapsed between successive row queries
    pub fn row_query_gaps(&self) -> Vec<Duration> {
        let state = self.state.lock().unwrap();
        state
            .row_queries
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    pub fn escapes(&self) -> u32 {
        self.state.lock().unwrap().escapes
    }

    pub fn chosen(&self) -> Vec<String> {
        self.state.lock().unwrap().chosen.clone()
    }

    fn css(value: &str) -> AnchorDescriptor {
        AnchorDescriptor::css(value.to_string())
    }

    fn present(&self, anchor: &AnchorDescriptor) -> bool {
        let selectors = &self.selectors;
        let state = self.state.lock().unwrap();

        if *anchor == selectors.selectize.open_anchor() {
            return state.open_slot.is_some();
        }
        if *anchor == selectors.save_marker() {
            return state.detail_open;
        }
        if *anchor == Self::css(&selectors.confirm_modal) {
            return state.modal_open;
        }
        if *anchor == Self::css(&selectors.cms_button_active) {
            return state.cms_active;
        }
        if *anchor == selectors.products_header() {
            return state.panel;
        }
        if *anchor == Self::css(&selectors.logged_in_marker) {
            return state.logged_in;
        }
        if *anchor == Self::css(&selectors.login_user) {
            return true;
        }
        state
            .chosen
            .iter()
            .any(|label| *anchor == selectors.selectize.chosen_anchor(label))
    }

    fn snapshots(&self, css: &str) -> Vec<ElementSnapshot> {
        let selectors = &self.selectors;
        let mut state = self.state.lock().unwrap();

        if css == selectors.table_row {
            state.row_queries.push(Instant::now());
            let count = if state.row_counts.len() > 1 {
                state.row_counts.pop_front().unwrap_or(0)
            } else {
                state.row_counts.front().copied().unwrap_or(0)
            };
            return (0..count)
                .map(|index| ElementSnapshot::new(index, self.row_name.clone()))
                .collect();
        }
        if css == selectors.row_name {
            return vec![ElementSnapshot::new(0, self.row_name.clone())];
        }
        if css == selectors.required_inputs {
            return values(&self.required);
        }
        if css == selectors.not_required_inputs {
            return values(&self.not_required);
        }
        if css == selectors.selectize.control {
            return (0..3).map(|index| ElementSnapshot::new(index, "")).collect();
        }
        if css == selectors.selectize.options {
            if let Some(slot) = state.open_slot {
                return self.options[slot]
                    .iter()
                    .enumerate()
                    .map(|(index, option)| ElementSnapshot::new(index, option.clone()))
                    .collect();
            }
        }
        Vec::new()
    }
}

fn values(values: &[String]) -> Vec<ElementSnapshot> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ElementSnapshot::new(index, "").with_value(value.clone()))
        .collect()
}

#[async_trait]
impl ActionPrimitives for FakeCatalog {
    async fn open_url(&self, url: &str) -> Result<(), ActionError> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        state.panel = false;
        state.cms_active = false;
        state.detail_open = false;
        state.modal_open = false;
        state.open_slot = None;
        Ok(())
    }

    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError> {
        let selectors = &self.selectors;
        let mut state = self.state.lock().unwrap();

        if *anchor == Self::css(&selectors.login_button) {
            state.logged_in = true;
        } else if *anchor == Self::css(&selectors.cms_button) {
            state.cms_active = true;
        } else if *anchor == selectors.products_entry() {
            state.panel = true;
        } else if *anchor == Self::css(&selectors.table_row) {
            if state.detail_failures > 0 {
                state.detail_failures -= 1;
            } else {
                state.detail_open = true;
                state.chosen.clear();
            }
            state.events.push("open row".into());
        } else if *anchor == selectors.save_button() {
            state.detail_open = false;
            state.events.push("save".into());
        } else if *anchor == selectors.cancel_button() {
            state.modal_open = true;
            state.events.push("cancel".into());
        } else if *anchor == selectors.discard_button() {
            state.modal_open = false;
            state.detail_open = false;
            state.events.push("discard".into());
        } else {
            let slot = state
                .open_slot
                .ok_or_else(|| ActionError::ElementNotFound(anchor.to_string()))?;
            let option = self.options[slot]
                .iter()
                .find(|option| *anchor == selectors.selectize.option_anchor(option))
                .ok_or_else(|| ActionError::ElementNotFound(anchor.to_string()))?;
            state.chosen.push(option.clone());
            state.events.push(format!("select {option}"));
        }
        Ok(())
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ActionError> {
        if css != self.selectors.selectize.control || index >= 3 {
            return Err(ActionError::ElementNotFound(format!("{css} #{index}")));
        }
        let mut state = self.state.lock().unwrap();
        state.open_slot = Some(index);
        state.events.push(format!("open widget {index}"));
        Ok(())
    }

    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ActionError> {
        if css == self.selectors.search_input {
            self.state.lock().unwrap().searches.push(text.to_string());
        }
        Ok(())
    }

    async fn send_escape(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock().unwrap();
        state.escapes += 1;
        if state.stuck_open_checks == 0 && state.open_slot != state.stuck_widget {
            state.open_slot = None;
        }
        Ok(())
    }

    async fn wait_for(
        &self,
        anchor: &AnchorDescriptor,
        _visibility: Visibility,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        if self.present(anchor) {
            return Ok(());
        }
        sleep(timeout).await;
        Err(ActionError::WaitTimeout(anchor.to_string()))
    }

    async fn wait_for_absent(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        if !self.present(anchor) {
            return Ok(());
        }
        sleep(timeout).await;
        Err(ActionError::WaitTimeout(anchor.to_string()))
    }

    async fn is_present(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<bool, ActionError> {
        if *anchor == self.selectors.selectize.open_anchor() {
            let mut state = self.state.lock().unwrap();
            if state.open_slot.is_some() && state.open_slot == state.stuck_widget {
                return Ok(true);
            }
            if state.open_slot.is_some() && state.stuck_open_checks > 0 {
                state.stuck_open_checks -= 1;
                if state.stuck_open_checks == 0 {
                    state.open_slot = None;
                }
                return Ok(true);
            }
        }
        if self.present(anchor) {
            return Ok(true);
        }
        sleep(timeout).await;
        Ok(false)
    }

    async fn query_all(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Vec<ElementSnapshot>, ActionError> {
        let found = self.snapshots(css);
        if found.is_empty() {
            sleep(timeout).await;
        }
        Ok(found)
    }

    async fn scroll_into_view(&self, _css: &str) -> Result<(), ActionError> {
        Ok(())
    }
}
