//! Selectors of the catalog management UI

use action_primitives::AnchorDescriptor;
use serde::{Deserialize, Serialize};
use tool_select_option::SelectizeSelectors;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    pub login_user: String,
    pub login_password: String,
    pub login_button: String,
    /// Account menu shown once logged in
    pub logged_in_marker: String,

    pub preloader: String,
    pub cms_button: String,
    pub cms_button_active: String,
    pub products_entry: String,
    pub products_header: String,

    pub search_input: String,
    pub table_row: String,
    pub row_name: String,

    pub required_inputs: String,
    pub not_required_inputs: String,
    /// Section holding the selectize widgets
    pub attribute_section: String,

    /// Present while the detail view is open
    pub save_marker: String,
    pub save_button: String,
    pub cancel_button: String,
    pub confirm_modal: String,
    pub discard_button: String,

    pub selectize: SelectizeSelectors,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            login_user: r#"[ng-model="user.username"]"#.into(),
            login_password: r#"[ng-model="user.password"]"#.into(),
            login_button: r#"[data-automation-id="login-button"]"#.into(),
            logged_in_marker: ".dropdown-click".into(),

            preloader: "#preloader".into(),
            cms_button: r#"[data-automation-id="left-sidebar-cms-button"]"#.into(),
            cms_button_active: r#"[data-automation-id="left-sidebar-cms-button"].active"#.into(),
            products_entry: "//div[normalize-space(@class)='bem-Pane_Body_Inner']\
                             //span[contains(text(),'Products')]"
                .into(),
            products_header: "//div[normalize-space(@class)='bem-Pane_Head']\
                              //span[contains(text(),'Products')]"
                .into(),

            search_input: "input.bem-TextInput".into(),
            table_row: ".bem-Table_Row".into(),
            row_name: ".bem-Table_Row .bem-Text".into(),

            required_inputs: ".bem-TextInput-required".into(),
            not_required_inputs: ".bem-TextInput".into(),
            attribute_section: ".bem-Pane_Section:nth-of-type(2)".into(),

            save_marker: "//button/span[contains(text(),'Save')]".into(),
            save_button: "//button/span[text()='Save ']".into(),
            cancel_button: "//button/span[text()='Cancel']".into(),
            confirm_modal: ".bem-ConfirmWrapper .bem-ConfirmWrapper_Modal".into(),
            discard_button: "//button[text()='Discard Changes']".into(),

            selectize: SelectizeSelectors::default(),
        }
    }
}

impl PageSelectors {
    pub fn products_entry(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.products_entry.clone())
    }

    pub fn products_header(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.products_header.clone())
    }

    pub fn save_marker(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.save_marker.clone())
    }

    pub fn save_button(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.save_button.clone())
    }

    pub fn cancel_button(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.cancel_button.clone())
    }

    pub fn discard_button(&self) -> AnchorDescriptor {
        AnchorDescriptor::xpath(self.discard_button.clone())
    }
}
