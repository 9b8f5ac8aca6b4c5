use action_flow::Exhaustion;
use serde::{Deserialize, Serialize};

/// Appended after every label in an outcome string
pub const LABEL_SEPARATOR: &str = ";";

/// Which multi-select widget a label is routed to.
///
/// The detail view renders the three selectize widgets in a fixed order;
/// `index` is the position among all widgets matching the control selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WidgetSlot {
    Collections,
    Types,
    Categories,
}

impl WidgetSlot {
    /// Order in which the passes run
    pub const ALL: [WidgetSlot; 3] = [
        WidgetSlot::Collections,
        WidgetSlot::Types,
        WidgetSlot::Categories,
    ];

    pub fn index(self) -> usize {
        match self {
            WidgetSlot::Collections => 0,
            WidgetSlot::Types => 1,
            WidgetSlot::Categories => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WidgetSlot::Collections => "collection",
            WidgetSlot::Types => "type",
            WidgetSlot::Categories => "category",
        }
    }
}

/// Per-record accumulators, each entry written as `label;`
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub completed: String,
    pub failed_to_select: String,
}

impl SelectionOutcome {
    pub fn record_completed(&mut self, label: &str) {
        self.completed.push_str(label);
        self.completed.push_str(LABEL_SEPARATOR);
    }

    pub fn record_failed(&mut self, label: &str) {
        self.failed_to_select.push_str(label);
        self.failed_to_select.push_str(LABEL_SEPARATOR);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelVerdict {
    /// Option clicked and shown as a chosen item
    Selected,
    /// Dropdown did not offer the label; nothing was clicked
    Missing,
}

/// Counts for one pass over a widget
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SlotTally {
    pub selected: usize,
    pub missing: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EscapeVerdict {
    Closed {
        attempts: u32,
    },
    /// Attempts ran out; `policy` tells the caller what to do with the record
    StillOpen {
        attempts: u32,
        policy: Exhaustion,
    },
}
