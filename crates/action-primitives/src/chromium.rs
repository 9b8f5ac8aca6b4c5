//! Chromium implementation of the facade, driven over CDP by chromiumoxide

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    errors::ActionError,
    primitives::ActionPrimitives,
    scripts,
    types::{AnchorDescriptor, ElementSnapshot, Visibility, DEFAULT_POLL_INTERVAL},
    waiting::poll_until,
};

/// Launch options for the controlled Chromium instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window
    pub headless: bool,

    /// Chromium/Chrome binary; auto-detected when unset
    pub executable: Option<PathBuf>,

    pub window_width: u32,
    pub window_height: u32,

    /// Pass `--no-sandbox` (containers, CI)
    pub no_sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            executable: None,
            window_width: 1920,
            window_height: 1080,
            no_sandbox: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotItem {
    text: String,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    items: Vec<SnapshotItem>,
}

/// Action primitives backed by a single Chromium tab
pub struct ChromiumPrimitives {
    browser: Mutex<Browser>,
    page: Page,
    handler: JoinHandle<()>,
    poll_interval: Duration,
}

impl ChromiumPrimitives {
    /// Launch Chromium and open one blank tab
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ActionError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height)
            .arg("--disable-extensions")
            .arg("--disable-infobars");

        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = settings.executable {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(ActionError::Internal)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ActionError::Cdp(format!("failed to launch browser: {}", err)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    warn!("CDP handler stopped: {}", err);
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|err| ActionError::Cdp(format!("failed to open tab: {}", err)))?;

        info!(
            headless = settings.headless,
            width = settings.window_width,
            height = settings.window_height,
            "Chromium session started"
        );

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the interval between two probes of a wait
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Close the browser and stop the CDP handler
    pub async fn close(self) -> Result<(), ActionError> {
        let ChromiumPrimitives {
            browser, handler, ..
        } = self;
        let mut browser = browser.into_inner();
        browser
            .close()
            .await
            .map_err(|err| ActionError::Cdp(err.to_string()))?;
        if let Err(err) = browser.wait().await {
            warn!("browser process did not exit cleanly: {}", err);
        }
        handler.abort();
        info!("Chromium session closed");
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, ActionError> {
        let result = self
            .page
            .evaluate(script.to_string())
            .await
            .map_err(|err| ActionError::Cdp(err.to_string()))?;
        result
            .into_value::<Value>()
            .map_err(|err| ActionError::Script(format!("unreadable script result: {}", err)))
    }

    async fn click_at(&self, anchor: &AnchorDescriptor, index: usize) -> Result<(), ActionError> {
        debug!(anchor = %anchor, index, "click");
        let value = self.eval(&scripts::click(anchor, index)?).await?;
        match status(&value) {
            "ok" => Ok(()),
            "missing" => Err(ActionError::ElementNotFound(format!(
                "{} has no match at index {} ({} found)",
                anchor,
                index,
                value.get("count").and_then(Value::as_u64).unwrap_or(0)
            ))),
            "hidden" => Err(ActionError::NotClickable(format!("{} is not visible", anchor))),
            "disabled" => Err(ActionError::NotClickable(format!("{} is disabled", anchor))),
            other => Err(ActionError::Script(format!(
                "unexpected click status: {}",
                other
            ))),
        }
    }
}

fn status(value: &Value) -> &str {
    value
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
}

#[async_trait]
impl ActionPrimitives for ChromiumPrimitives {
    async fn open_url(&self, url: &str) -> Result<(), ActionError> {
        info!(url, "open url");
        self.page
            .goto(url)
            .await
            .map_err(|err| ActionError::Navigation {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        Ok(())
    }

    async fn click(&self, anchor: &AnchorDescriptor) -> Result<(), ActionError> {
        self.click_at(anchor, 0).await
    }

    async fn click_nth(&self, css: &str, index: usize) -> Result<(), ActionError> {
        self.click_at(&AnchorDescriptor::css(css), index).await
    }

    async fn send_keys(&self, css: &str, text: &str) -> Result<(), ActionError> {
        debug!(selector = css, "send keys");
        let cleared = self.eval(&scripts::clear_input(css)?).await?;
        if status(&cleared) == "missing" {
            return Err(ActionError::ElementNotFound(format!(
                "no input matches '{}'",
                css
            )));
        }

        let element = self
            .page
            .find_element(css)
            .await
            .map_err(|err| ActionError::ElementNotFound(format!("{}: {}", css, err)))?;
        element
            .click()
            .await
            .map_err(|err| ActionError::NotClickable(format!("{}: {}", css, err)))?
            .type_str(text)
            .await
            .map_err(|err| ActionError::Cdp(err.to_string()))?;
        Ok(())
    }

    async fn send_escape(&self) -> Result<(), ActionError> {
        for kind in [DispatchKeyEventType::KeyDown, DispatchKeyEventType::KeyUp] {
            let params = DispatchKeyEventParams::builder()
                .r#type(kind)
                .key("Escape")
                .code("Escape")
                .windows_virtual_key_code(27)
                .native_virtual_key_code(27)
                .build()
                .map_err(ActionError::Internal)?;
            self.page
                .execute(params)
                .await
                .map_err(|err| ActionError::Cdp(err.to_string()))?;
        }
        Ok(())
    }

    async fn wait_for(
        &self,
        anchor: &AnchorDescriptor,
        visibility: Visibility,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        let script = scripts::presence(anchor, visibility)?;
        let what = format!("{} ({:?})", anchor, visibility);
        let script = &script;
        poll_until(timeout, self.poll_interval, &what, move || async move {
            let value = self.eval(script).await?;
            match status(&value) {
                "ok" => Ok(value
                    .get("visible")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                    .then_some(())),
                "missing" => Ok(None),
                other => Err(ActionError::Script(format!(
                    "unexpected presence status: {}",
                    other
                ))),
            }
        })
        .await
    }

    async fn wait_for_absent(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<(), ActionError> {
        let script = scripts::presence(anchor, Visibility::Present)?;
        let what = format!("{} absent", anchor);
        let script = &script;
        poll_until(timeout, self.poll_interval, &what, move || async move {
            let value = self.eval(script).await?;
            Ok((status(&value) == "missing").then_some(()))
        })
        .await
    }

    async fn is_present(
        &self,
        anchor: &AnchorDescriptor,
        timeout: Duration,
    ) -> Result<bool, ActionError> {
        match self.wait_for(anchor, Visibility::Present, timeout).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_timeout() => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn query_all(
        &self,
        css: &str,
        timeout: Duration,
    ) -> Result<Vec<ElementSnapshot>, ActionError> {
        let script = scripts::snapshot_all(css)?;
        let script = &script;
        let found = poll_until(timeout, self.poll_interval, css, move || async move {
            let value = self.eval(script).await?;
            let response: SnapshotResponse = serde_json::from_value(value)
                .map_err(|err| ActionError::Script(format!("bad snapshot payload: {}", err)))?;
            Ok((!response.items.is_empty()).then_some(response.items))
        })
        .await;

        match found {
            Ok(items) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(index, item)| ElementSnapshot {
                    index,
                    text: item.text,
                    value: item.value,
                })
                .collect()),
            Err(err) if err.is_timeout() => {
                debug!(selector = css, "query returned no elements");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn scroll_into_view(&self, css: &str) -> Result<(), ActionError> {
        let value = self.eval(&scripts::scroll_into_view(css)?).await?;
        match status(&value) {
            "ok" => Ok(()),
            _ => Err(ActionError::ElementNotFound(format!(
                "cannot scroll to '{}'",
                css
            ))),
        }
    }
}
