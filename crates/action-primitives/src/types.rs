//! Core data types for action primitives

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default bound for waits when the caller has no specific deadline
pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// Interval between two probes of a polling wait
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How an element on the page is addressed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorDescriptor {
    /// CSS selector
    Css(String),

    /// XPath expression
    XPath(String),
}

impl AnchorDescriptor {
    pub fn css(selector: impl Into<String>) -> Self {
        AnchorDescriptor::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        AnchorDescriptor::XPath(expression.into())
    }

    /// Raw selector or expression text
    pub fn as_str(&self) -> &str {
        match self {
            AnchorDescriptor::Css(s) | AnchorDescriptor::XPath(s) => s,
        }
    }
}

impl fmt::Display for AnchorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorDescriptor::Css(s) => write!(f, "css={}", s),
            AnchorDescriptor::XPath(s) => write!(f, "xpath={}", s),
        }
    }
}

/// What a wait considers satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Element is attached to the DOM
    #[default]
    Present,

    /// Element is attached and rendered with a non-empty box
    Visible,
}

/// Point-in-time view of one matched element.
///
/// Snapshots are never turned back into live handles; callers re-query by
/// selector and index because the page re-renders widgets between calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Position among all matches of the query, in DOM order
    pub index: usize,

    /// Visible text (`innerText`)
    pub text: String,

    /// `value` property for form controls
    pub value: Option<String>,
}

impl ElementSnapshot {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Value of a form control, empty when the element has none
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
