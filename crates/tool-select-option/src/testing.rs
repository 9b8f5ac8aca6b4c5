//! In-memory selectize page for unit tests

use action_primitives::{
    ActionError, ActionPrimitives, AnchorDescriptor, ElementSnapshot, Visibility,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

use crate::selectors::SelectizeSelectors;

struct State {
    open: bool,
    escapes: u32,
    opened_slots: Vec<usize>,
    chosen: Vec<String>,
}

pub(crate) struct StubDropdown {
    selectors: SelectizeSelectors,
    options: Vec<String>,
    controls: usize,
    opens: bool,
    escapes_needed: Option<u32>,
    state: Mutex<State>,
}

impl StubDropdown {
    pub(crate) fn with_options(options: &[&str]) -> Self {
        Self {
            selectors: SelectizeSelectors::default(),
            options: options.iter().map(|option| option.to_string()).collect(),
            controls: 3,
            opens: true,
            escapes_needed: Some(1),
            state: Mutex::new(State {
                open: false,
                escapes: 0,
                opened_slots: Vec::new(),
                chosen: Vec::new(),
            }),
        }
    }

    pub(crate) fn with_controls(mut self, controls: usize) -> Self {
        self.controls = controls;
        self
    }

    pub(crate) fn never_opens(mut self) -> Self {
        self.opens = false;
        self
    }

    pub(crate) fn opened(self) -> Self {
        self.state.lock().unwrap().open = true;
        self
    }

    pub(crate) fn escapes_to_close(mut self, escapes: u32) -> Self {
        self.escapes_needed = Some(escapes);
        self
    }

    pub(crate) fn never_closes(mut self) -> Self {
        self.escapes_needed = None;
        self
    }

    pub(crate) fn opened_slots(&self) -> Vec<usize> {
        self.state.lock().unwrap().opened_slots.clone()
    }

    pub(crate) fn chosen(&self) -> Vec<String> {
        self.state.lock().unwrap().chosen.clone()
    }

    pub(crate) fn escapes(&self) -> u32 {
        self.state.lock().unwrap().escapes
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.lock().unwrap().open
    }

    fn present(&self, anchor: &AnchorDescriptor) -> bool {
        let state = self.state.lock().unwrap();
        if *anchor == self.selectors.open_anchor() {
            return state.open;
        }
        state
            .chosen
            .iter()
            .any(|label| *anchor == self.selectors.chosen_anchor(label))
    }
}

#[async_trait]
impl ActionPrimitives for StubDropdown {
    async fn open_url(&self, _url: &str) -> Result<(), ActionError> {
        Ok(())
    }

    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError> {
        let mut state = self.state.lock().unwrap();
        let offered = state.open.then(|| {
            self.options
                .iter()
                .find(|option| *anchor == self.selectors.option_anchor(option))
        });
        match offered.flatten() {
            Some(option) => {
                state.chosen.push(option.clone());
                Ok(())
            }
            None => Err(ActionError::ElementNotFound(anchor.to_string())),
        }
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ActionError> {
        if css != self.selectors.control || index >= self.controls {
            return Err(ActionError::ElementNotFound(format!("{css} #{index}")));
        }
        let mut state = self.state.lock().unwrap();
        state.opened_slots.push(index);
        if self.opens {
            state.open = true;
        }
        Ok(())
    }

    async fn send_keys(&self, _css: &str, _text: &str) -> Result<(), ActionError> {
        Ok(())
    }

    async fn send_escape(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock().unwrap();
        state.escapes += 1;
        if let Some(needed) = self.escapes_needed {
            if state.escapes >= needed {
                state.open = false;
            }
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
        let found: Vec<ElementSnapshot> = if css == self.selectors.control {
            (0..self.controls)
                .map(|index| ElementSnapshot::new(index, ""))
                .collect()
        } else if css == self.selectors.options && self.is_open() {
            self.options
                .iter()
                .enumerate()
                .map(|(index, option)| ElementSnapshot::new(index, option.clone()))
                .collect()
        } else {
            Vec::new()
        };
        if found.is_empty() {
            sleep(timeout).await;
        }
        Ok(found)
    }

    async fn scroll_into_view(&self, _css: &str) -> Result<(), ActionError> {
        Ok(())
    }
}
