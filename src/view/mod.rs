//! In-memory page document.
//!
//! The dashboard never talks to a real DOM. It owns a [`Document`]: a small
//! element tree with ids, classes, text and presentation flags. Hosts render
//! it (the CLI renders to the terminal) and tests inspect it directly.
//!
//! Lookups that the page scripts used to perform ad hoc (`getElementById`,
//! `querySelectorAll('pre')`, the lazily created flash container) are methods
//! here so every component goes through the same accessors.

mod element;
pub mod ids;
pub mod template;

pub use element::{Element, NodeId, Tag};

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Element tree for one page load.
#[derive(Debug, Clone)]
pub struct Document {
    path: String,
    nodes: BTreeMap<NodeId, Element>,
    root: NodeId,
    next_id: u64,
    scroll_target: Option<NodeId>,
}

impl Document {
    /// Create an empty document for the given location path.
    pub fn new(path: impl Into<String>) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Element::new(Tag::Body));
        Self {
            path: path.into(),
            nodes,
            root,
            next_id: 1,
            scroll_target: None,
        }
    }

    /// Location path the document was loaded for (e.g. `/metrics`).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// The `body` node.
    pub fn body(&self) -> NodeId {
        self.root
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: Tag) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Element::new(tag));
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Returns false when either node is missing.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(&parent) || parent == child {
            return false;
        }
        let old_parent = match self.nodes.get_mut(&child) {
            Some(el) => el.parent.replace(parent),
            None => return false,
        };
        if let Some(old) = old_parent.and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|c| *c != child);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        true
    }

    /// Create an element and append it to `parent` in one step.
    pub fn create_child(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        let id = self.create(tag);
        self.append(parent, id);
        id
    }

    /// Remove a node and its subtree. Removing a missing node is a no-op.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root {
            return false;
        }
        let Some(el) = self.nodes.remove(&node) else {
            return false;
        };
        if let Some(p) = el.parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != node);
        }
        let mut pending = el.children;
        while let Some(n) = pending.pop() {
            if let Some(child) = self.nodes.remove(&n) {
                pending.extend(child.children);
            }
        }
        if self.scroll_target.is_some_and(|t| !self.nodes.contains_key(&t)) {
            self.scroll_target = None;
        }
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(&node)
    }

    /// First element carrying the given `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, el)| el.id.as_deref() == Some(id))
            .map(|(n, _)| *n)
    }

    /// All elements carrying `class`, in document creation order.
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, el)| el.has_class(class))
            .map(|(n, _)| *n)
            .collect()
    }

    /// All elements with the given tag, in document creation order.
    pub fn by_tag(&self, tag: Tag) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, el)| el.tag == tag)
            .map(|(n, _)| *n)
            .collect()
    }

    /// Nearest node (starting at `node` itself) matching the predicate.
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            let el = self.nodes.get(&n)?;
            if pred(el) {
                return Some(n);
            }
            current = el.parent;
        }
        None
    }

    /// Depth-first descendants of `node`, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(&node) {
            Some(el) => el.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(n) = stack.pop() {
            out.push(n);
            if let Some(el) = self.nodes.get(&n) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// Set the text of the element with `id`. Missing targets are skipped.
    pub fn set_text_by_id(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.by_id(id).and_then(|n| self.nodes.get_mut(&n)) {
            Some(el) => {
                el.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Text of the element with `id`, if present.
    pub fn text_by_id(&self, id: &str) -> Option<&str> {
        self.by_id(id)
            .and_then(|n| self.nodes.get(&n))
            .map(|el| el.text.as_str())
    }

    /// The page's flash/notification container, created on first use.
    pub fn notification_container(&mut self) -> NodeId {
        if let Some(existing) = self.by_class(ids::NOTIFICATION_CONTAINER_CLASS).first() {
            return *existing;
        }
        let body = self.root;
        let container = self.create_child(body, Tag::Div);
        if let Some(el) = self.nodes.get_mut(&container) {
            el.add_class(ids::NOTIFICATION_CONTAINER_CLASS);
        }
        container
    }

    /// The loading overlay, if this page has one. Never created implicitly.
    pub fn loading_overlay(&self) -> Option<NodeId> {
        self.by_id(ids::LOADING_OVERLAY)
    }

    /// Whether the loading overlay exists and is visible.
    pub fn overlay_visible(&self) -> bool {
        self.loading_overlay()
            .and_then(|n| self.nodes.get(&n))
            .is_some_and(|el| !el.hidden)
    }

    /// Show or hide the loading overlay. No-op when the page has none.
    pub fn set_overlay_visible(&mut self, visible: bool) -> bool {
        match self.loading_overlay().and_then(|n| self.nodes.get_mut(&n)) {
            Some(el) => {
                el.hidden = !visible;
                true
            }
            None => false,
        }
    }

    pub fn scroll_target(&self) -> Option<NodeId> {
        self.scroll_target
    }

    pub fn scroll_to(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            self.scroll_target = Some(node);
            true
        } else {
            false
        }
    }
}

/// Cloneable handle to the page document shared by all dashboard components.
///
/// Guards must never be held across an `.await`.
#[derive(Debug, Clone)]
pub struct SharedDocument(Arc<RwLock<Document>>);

impl SharedDocument {
    pub fn new(doc: Document) -> Self {
        Self(Arc::new(RwLock::new(doc)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Document> {
        self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current location path.
    pub fn path(&self) -> String {
        self.read().path().to_string()
    }

    /// Clone of the current document state.
    pub fn snapshot(&self) -> Document {
        self.read().clone()
    }
}
