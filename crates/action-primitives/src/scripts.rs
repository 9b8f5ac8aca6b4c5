//! In-page scripts evaluated by the Chromium facade.
//!
//! Every selector or text is spliced in as a JSON string literal so that
//! quotes in labels cannot break out of the expression.

use crate::{
    errors::ActionError,
    types::{AnchorDescriptor, Visibility},
};

const VISIBLE_FN: &str = "const isVisible = (el) => { const style = window.getComputedStyle(el); const rect = el.getBoundingClientRect(); return style.visibility !== 'hidden' && style.display !== 'none' && (rect.width > 0 || rect.height > 0 || el.getClientRects().length > 0); };";

pub(crate) fn literal(value: &str) -> Result<String, ActionError> {
    serde_json::to_string(value)
        .map_err(|err| ActionError::Internal(format!("invalid literal encoding: {}", err)))
}

/// Expression evaluating to an array of all elements matched by the anchor
pub(crate) fn collect_expr(anchor: &AnchorDescriptor) -> Result<String, ActionError> {
    match anchor {
        AnchorDescriptor::Css(selector) => Ok(format!(
            "Array.from(document.querySelectorAll({}))",
            literal(selector)?
        )),
        AnchorDescriptor::XPath(expression) => Ok(format!(
            "(() => {{ const snap = document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < snap.snapshotLength; i++) {{ out.push(snap.snapshotItem(i)); }} return out; }})()",
            literal(expression)?
        )),
    }
}

/// `{ status: 'missing' }` or `{ status: 'ok', visible }` for the first match
pub(crate) fn presence(
    anchor: &AnchorDescriptor,
    visibility: Visibility,
) -> Result<String, ActionError> {
    let check_visible = matches!(visibility, Visibility::Visible);
    Ok(format!(
        "(() => {{ {visible_fn} const found = {collect}; if (found.length === 0) {{ return {{ status: 'missing' }}; }} const visible = {check} ? isVisible(found[0]) : true; return {{ status: 'ok', visible }}; }})()",
        visible_fn = VISIBLE_FN,
        collect = collect_expr(anchor)?,
        check = check_visible,
    ))
}

/// `{ status: 'ok', items: [{ text, value }] }` for every CSS match
pub(crate) fn snapshot_all(css: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{ const found = Array.from(document.querySelectorAll({selector})); return {{ status: 'ok', items: found.map(el => ({{ text: (el.innerText || el.textContent || '').trim(), value: (typeof el.value === 'string') ? el.value : null }})) }}; }})()",
        selector = literal(css)?,
    ))
}

/// Scroll, check and click match number `index`.
///
/// Returns `missing`, `hidden`, `disabled` or `ok` as `status`.
pub(crate) fn click(anchor: &AnchorDescriptor, index: usize) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{ {visible_fn} const found = {collect}; const el = found[{index}]; if (!el) {{ return {{ status: 'missing', count: found.length }}; }} el.scrollIntoView({{ block: 'center', inline: 'nearest' }}); if (!isVisible(el)) {{ return {{ status: 'hidden' }}; }} if (el.disabled === true || el.getAttribute('aria-disabled') === 'true') {{ return {{ status: 'disabled' }}; }} for (const type of ['mousedown', 'mouseup']) {{ el.dispatchEvent(new MouseEvent(type, {{ bubbles: true, cancelable: true, view: window }})); }} el.click(); return {{ status: 'ok' }}; }})()",
        visible_fn = VISIBLE_FN,
        collect = collect_expr(anchor)?,
        index = index,
    ))
}

/// Empty the first matching input and notify framework listeners
pub(crate) fn clear_input(css: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{ const el = document.querySelector({selector}); if (!el) {{ return {{ status: 'missing' }}; }} el.focus(); el.value = ''; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return {{ status: 'ok' }}; }})()",
        selector = literal(css)?,
    ))
}

pub(crate) fn scroll_into_view(css: &str) -> Result<String, ActionError> {
    Ok(format!(
        "(() => {{ const el = document.querySelector({selector}); if (!el) {{ return {{ status: 'missing' }}; }} el.scrollIntoView({{ block: 'start', inline: 'nearest' }}); return {{ status: 'ok' }}; }})()",
        selector = literal(css)?,
    ))
}
