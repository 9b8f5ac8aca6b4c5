//! Action Primitives - the UI actions facade used by the catalog automation
//!
//! This crate provides the building blocks every higher layer drives the page with:
//! - the `ActionPrimitives` trait: navigate, click, type, wait, query, scroll
//! - bounded polling shared by all waits
//! - a Chromium implementation speaking CDP

pub mod chromium;
pub mod errors;
mod primitives;
mod scripts;
pub mod types;
mod waiting;

pub use chromium::{BrowserSettings, ChromiumPrimitives};
pub use errors::*;
pub use primitives::*;
pub use types::*;
pub use waiting::*;
