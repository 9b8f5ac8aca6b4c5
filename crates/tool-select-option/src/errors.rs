use action_primitives::ActionError;
use thiserror::Error;

use crate::model::WidgetSlot;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("{slot:?} widget missing: only {found} selectize controls rendered")]
    WidgetMissing { slot: WidgetSlot, found: usize },
}

impl SelectError {
    /// Short name of the failure, e.g. `WaitTimeout`
    pub fn kind(&self) -> &'static str {
        match self {
            SelectError::Action(err) => err.kind(),
            SelectError::WidgetMissing { .. } => "WidgetMissing",
        }
    }
}
