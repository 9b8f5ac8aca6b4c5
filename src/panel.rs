//! Login and navigation to the product list

use action_primitives::{ActionError, ActionPrimitives, AnchorDescriptor, Visibility};
use tracing::{info, instrument};

use crate::config::TaggerConfig;
use crate::selectors::PageSelectors;

#[instrument(skip_all, fields(url = %config.url_login, user = %config.user))]
pub async fn login(
    ui: &dyn ActionPrimitives,
    config: &TaggerConfig,
    selectors: &PageSelectors,
) -> Result<(), ActionError> {
    let wait = config.timeouts.default_wait();

    ui.open_url(&config.url_login).await?;
    ui.wait_for(
        &AnchorDescriptor::css(selectors.login_user.clone()),
        Visibility::Visible,
        wait,
    )
    .await?;
    ui.send_keys(&selectors.login_user, &config.user).await?;
    ui.send_keys(&selectors.login_password, &config.password)
        .await?;
    ui.click(&AnchorDescriptor::css(selectors.login_button.clone()))
        .await?;
    ui.wait_for(
        &AnchorDescriptor::css(selectors.logged_in_marker.clone()),
        Visibility::Visible,
        wait,
    )
    .await?;

    info!("logged in");
    Ok(())
}

/// Navigate to the product list from any page state
#[instrument(skip_all, fields(url = %config.url))]
pub async fn open_product_panel(
    ui: &dyn ActionPrimitives,
    config: &TaggerConfig,
    selectors: &PageSelectors,
) -> Result<(), ActionError> {
    let wait = config.timeouts.default_wait();

    ui.open_url(&config.url).await?;
    ui.wait_for_absent(&AnchorDescriptor::css(selectors.preloader.clone()), wait)
        .await?;

    ui.click(&AnchorDescriptor::css(selectors.cms_button.clone()))
        .await?;
    ui.wait_for(
        &AnchorDescriptor::css(selectors.cms_button_active.clone()),
        Visibility::Present,
        wait,
    )
    .await?;

    ui.click(&selectors.products_entry()).await?;
    ui.wait_for(&selectors.products_header(), Visibility::Present, wait)
        .await?;

    info!("product panel displayed");
    Ok(())
}
