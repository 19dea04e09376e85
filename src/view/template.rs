//! Page skeletons matching the service's server-rendered templates.
//!
//! Used by hosts that have no server-rendered markup of their own (the
//! terminal watcher) so the dashboard finds the same ids it would in a browser.

use super::{ids, Document, NodeId, Tag};

/// Build the skeleton for `path`.
///
/// Every page gets the status indicator and a hidden loading overlay. The
/// metrics page gets one element per metric id; the playground (`/`) gets the
/// query form.
pub fn page_for(path: &str) -> Document {
    let mut doc = Document::new(path);
    let body = doc.body();

    let nav = doc.create_child(body, Tag::Div);
    let indicator = doc.create_child(nav, Tag::Span);
    if let Some(el) = doc.get_mut(indicator) {
        el.id = Some(ids::STATUS_INDICATOR.to_string());
        el.text = "Unknown".to_string();
        el.add_class("text-muted");
    }

    let overlay = doc.create_child(body, Tag::Div);
    if let Some(el) = doc.get_mut(overlay) {
        el.id = Some(ids::LOADING_OVERLAY.to_string());
        el.hidden = true;
    }

    if path.contains("/metrics") {
        for id in ids::METRIC_IDS {
            let card = doc.create_child(body, Tag::Div);
            let value = doc.create_child(card, Tag::Span);
            if let Some(el) = doc.get_mut(value) {
                el.id = Some(id.to_string());
                el.text = "-".to_string();
            }
        }
    }

    if path == "/" {
        add_query_form(&mut doc, body);
    }

    doc
}

fn add_query_form(doc: &mut Document, parent: NodeId) -> NodeId {
    let form = doc.create_child(parent, Tag::Form);
    let submit = doc.create_child(form, Tag::Button);
    if let Some(el) = doc.get_mut(submit) {
        el.submit = true;
        el.text = "Generate".to_string();
    }
    form
}
