//! Label selection on selectize multi-select widgets

pub mod errors;
pub mod model;
pub mod policy;
pub mod selectors;

mod escape;
mod runner;
#[cfg(test)]
mod testing;

pub use errors::SelectError;
pub use model::{
    EscapeVerdict, LabelVerdict, SelectionOutcome, SlotTally, WidgetSlot, LABEL_SEPARATOR,
};
pub use policy::{SelectPolicyView, SelectTimeouts};
pub use runner::SelectizeDriver;
pub use selectors::{xpath_literal, SelectizeSelectors};
