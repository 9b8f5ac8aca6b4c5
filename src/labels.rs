//! Attribute label derivation
//!
//! A product carries three delimited attribute fields. The dropdowns expect
//! category-qualified labels, so collections and types are each combined
//! with every category, category-outer.

use tool_select_option::WidgetSlot;

const FIELD_DELIMITER: char = ';';

/// One delimited attribute field, e.g. `"Tops; Shoes"`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeField(Vec<String>);

impl AttributeField {
    /// Split on `;`, trim each part, drop empty parts
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(FIELD_DELIMITER)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for AttributeField {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}

/// Target labels for each of the three widgets
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedLabels {
    pub collections: Vec<String>,
    pub types: Vec<String>,
    pub categories: Vec<String>,
}

impl DerivedLabels {
    pub fn for_slot(&self, slot: WidgetSlot) -> &[String] {
        match slot {
            WidgetSlot::Collections => &self.collections,
            WidgetSlot::Types => &self.types,
            WidgetSlot::Categories => &self.categories,
        }
    }

    pub fn total(&self) -> usize {
        self.collections.len() + self.types.len() + self.categories.len()
    }
}

pub fn derive_labels(
    collections: &AttributeField,
    types: &AttributeField,
    categories: &AttributeField,
) -> DerivedLabels {
    DerivedLabels {
        collections: combine(categories, collections),
        types: combine(categories, types),
        categories: categories.labels().to_vec(),
    }
}

fn combine(categories: &AttributeField, others: &AttributeField) -> Vec<String> {
    categories
        .labels()
        .iter()
        .flat_map(|category| {
            others
                .labels()
                .iter()
                .map(move |other| format!("{} {}", category, other))
        })
        .collect()
}
