//! The UI actions facade
//!
//! Everything the automation needs from a browser page, expressed as a
//! handful of primitives:
//! 1. navigate - `open_url`
//! 2. click - by anchor, or by position among CSS matches
//! 3. type - `send_keys`, plus the Escape key
//! 4. wait - for presence, visibility or absence of an element
//! 5. query - snapshot all matches of a CSS selector
//! 6. scroll - bring a section into view

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    errors::ActionError,
    types::{AnchorDescriptor, ElementSnapshot, Visibility},
};

/// Action primitives trait
///
/// Each wait accepts an explicit bound and either returns once satisfied or
/// fails with [`ActionError::WaitTimeout`].
#[async_trait]
pub trait ActionPrimitives: Send + Sync {
    /// Navigate the page to a URL
    async fn open_url(&self, url: &str) -> Result<(), ActionError>;

    /// Click the first element matching the anchor
    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError>;

    /// Click the element at `index` among all matches of `css`
    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ActionError>;

    /// Focus, clear and type into the first input matching `css`
    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ActionError>;

    /// Press and release Escape on the focused element
    async fn send_escape(&self) -> Result<(), ActionError>;

    /// Wait for an element to be present (or visible)
    async fn wait_for(
        &self,
        anchor: &AnchorDescriptor,
        visibility: Visibility,
        timeout: Duration,
    ) -> Result<(), ActionError>;

    /// Wait until no element matches the anchor
    async fn wait_for_absent(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<(), ActionError>;

    /// Whether an element shows up within `timeout`; never raises a timeout
    async fn is_present(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<bool, ActionError>;

    /// Snapshot every match of `css`, waiting up to `timeout` for the first one.
    ///
    /// Returns an empty list when nothing rendered in time.
    async fn query_all(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Vec<ElementSnapshot>, ActionError>;

    /// Scroll the first match of `css` into view
    async fn scroll_into_view(&self, css: &str) -> Result<(), ActionError>;

    /// Like [`query_all`](Self::query_all) but an empty result is an error
    async fn require_all(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Vec<ElementSnapshot>, ActionError> {
        let found = self.query_all(css, timeout).await?;
        if found.is_empty() {
            return Err(ActionError::ElementNotFound(format!(
                "no element matches '{}'",
                css
            )));
        }
        Ok(found)
    }

    /// First match of `css`
    async fn first(&self, css: &str, timeout: Duration) -> Result<ElementSnapshot, ActionError> {
        let mut found = self.require_all(css, timeout).await?;
        Ok(found.swap_remove(0))
    }
}
