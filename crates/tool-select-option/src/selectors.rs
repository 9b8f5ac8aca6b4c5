use action_primitives::AnchorDescriptor;
use serde::{Deserialize, Serialize};

/// Selectors of the selectize multi-select widgets
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectizeSelectors {
    /// Every widget control on the page, in layout order
    pub control: String,
    /// A control whose dropdown is currently open
    pub open: String,
    /// Rendered options of the open dropdown
    pub options: String,
}

impl Default for SelectizeSelectors {
    fn default() -> Self {
        Self {
            control: ".selectize-input".into(),
            open: ".selectize-input.dropdown-active".into(),
            options: ".selectize-dropdown-content>div".into(),
        }
    }
}

impl SelectizeSelectors {
    pub fn open_anchor(&self) -> AnchorDescriptor {
        AnchorDescriptor::css(self.open.clone())
    }

    /// Option of the open dropdown whose text is exactly `label`
    pub fn option_anchor(&self, label: &str) -> AnchorDescriptor {
        AnchorDescriptor::xpath(format!(
            "//div[contains(@class, 'selectize-dropdown-content')]/div[text()={}]",
            xpath_literal(label)
        ))
    }

    /// Chosen item inside a control whose text is exactly `label`
    pub fn chosen_anchor(&self, label: &str) -> AnchorDescriptor {
        AnchorDescriptor::xpath(format!(
            "//div[contains(@class, 'selectize-input')]/div[text()={}]",
            xpath_literal(label)
        ))
    }
}

/// Quote `value` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so a value holding both quote kinds is
/// split into pieces and joined with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let pieces: Vec<String> = value
        .split('\'')
        .map(|piece| format!("'{}'", piece))
        .collect();
    format!("concat({})", pieces.join(", \"'\", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_use_single_quotes() {
        assert_eq!(xpath_literal("Women Tops"), "'Women Tops'");
    }

    #[test]
    fn apostrophes_switch_to_double_quotes() {
        assert_eq!(xpath_literal("Men's Shoes"), "\"Men's Shoes\"");
    }

    #[test]
    fn mixed_quotes_use_concat() {
        assert_eq!(
            xpath_literal(r#"Kid's "Best""#),
            r#"concat('Kid', "'", 's "Best"')"#
        );
    }

    #[test]
    fn option_anchor_matches_exact_text() {
        let selectors = SelectizeSelectors::default();
        assert_eq!(
            selectors.option_anchor("Women Tops"),
            AnchorDescriptor::xpath(
                "//div[contains(@class, 'selectize-dropdown-content')]/div[text()='Women Tops']"
            )
        );
        assert_eq!(
            selectors.chosen_anchor("Women Tops").as_str(),
            "//div[contains(@class, 'selectize-input')]/div[text()='Women Tops']"
        );
    }
}
