//! Shared test utilities for agentwatch integration tests.
//!
//! Provides mock service endpoints, page builders and document queries to
//! reduce duplication across test files.

#![allow(dead_code)]

use agentwatch::client::mock::MockApi;
use agentwatch::client::ApiClient;
use agentwatch::health::HealthCheckConfig;
use agentwatch::host::{MemoryClipboard, MemoryHost};
use agentwatch::view::{ids, Document, NodeId, SharedDocument, Tag};
use agentwatch::Dashboard;
use serde_json::Value;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Mock Service
// =============================================================================

/// Mount a JSON response for `GET endpoint`.
pub async fn mount_json(server: &MockServer, endpoint: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a raw (possibly non-JSON) body for `GET endpoint`.
pub async fn mount_raw(server: &MockServer, endpoint: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Client for `server` with a one second timeout.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri(), 1).unwrap()
}

// =============================================================================
// Dashboards
// =============================================================================

pub struct Harness {
    pub dashboard: Dashboard,
    pub api: Arc<MockApi>,
    pub host: Arc<MemoryHost>,
    pub clipboard: Arc<MemoryClipboard>,
}

/// Dashboard over the standard page for `path`, backed by a scripted API.
pub fn harness(path: &str) -> Harness {
    harness_with(template_for(path), path, MemoryClipboard::new())
}

/// Dashboard over a custom document.
pub fn harness_with(doc: Document, path: &str, clipboard: MemoryClipboard) -> Harness {
    let api = Arc::new(MockApi::new());
    let host = Arc::new(MemoryHost::new(path));
    let clipboard = Arc::new(clipboard);
    let dashboard = Dashboard::with_document(
        doc,
        api.clone(),
        host.clone(),
        clipboard.clone(),
        HealthCheckConfig::default(),
    );
    Harness {
        dashboard,
        api,
        host,
        clipboard,
    }
}

pub fn template_for(path: &str) -> Document {
    agentwatch::view::template::page_for(path)
}

// =============================================================================
// Page Builders
// =============================================================================

/// Add a `pre` block holding `text` under the body.
pub fn add_code_block(doc: &mut Document, text: &str) -> NodeId {
    let body = doc.body();
    let pre = doc.create_child(body, Tag::Pre);
    if let Some(el) = doc.get_mut(pre) {
        el.text = text.to_string();
    }
    pre
}

/// Add an expandable card with a title span inside.
pub fn add_expandable(doc: &mut Document) -> (NodeId, NodeId) {
    let body = doc.body();
    let card = doc.create_child(body, Tag::Div);
    if let Some(el) = doc.get_mut(card) {
        el.add_class(ids::EXPANDABLE_CLASS);
    }
    let title = doc.create_child(card, Tag::Span);
    (card, title)
}

/// Add a section with `id` and an in-page anchor pointing at it.
pub fn add_anchor(doc: &mut Document, id: &str) -> (NodeId, NodeId) {
    let body = doc.body();
    let section = doc.create_child(body, Tag::Section);
    if let Some(el) = doc.get_mut(section) {
        el.id = Some(id.to_string());
    }
    let anchor = doc.create_child(body, Tag::Anchor);
    if let Some(el) = doc.get_mut(anchor) {
        el.href = Some(format!("#{}", id));
    }
    (section, anchor)
}

// =============================================================================
// Queries
// =============================================================================

/// Text of every visible notification, oldest first.
pub fn notification_messages(doc: &SharedDocument) -> Vec<String> {
    let doc = doc.read();
    doc.by_class(ids::NOTIFICATION_CLASS)
        .into_iter()
        .filter_map(|n| {
            let el = doc.get(n)?;
            doc.get(*el.children().get(1)?).map(|m| m.text.clone())
        })
        .collect()
}

/// Copy control injected into `pre`.
pub fn copy_button(doc: &SharedDocument, pre: NodeId) -> Option<NodeId> {
    let doc = doc.read();
    doc.get(pre)?
        .children()
        .iter()
        .copied()
        .find(|c| doc.get(*c).is_some_and(|el| el.has_class(ids::COPY_BUTTON_CLASS)))
}

/// First submit button of the first form.
pub fn submit_button(doc: &SharedDocument) -> (NodeId, NodeId) {
    let doc = doc.read();
    let form = doc.by_tag(Tag::Form)[0];
    let button = doc
        .descendants(form)
        .into_iter()
        .find(|n| doc.get(*n).is_some_and(|el| el.submit))
        .unwrap();
    (form, button)
}

pub fn text_of(doc: &SharedDocument, node: NodeId) -> String {
    doc.read().get(node).map(|el| el.text.clone()).unwrap_or_default()
}
