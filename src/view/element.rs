//! Element node type.

use std::collections::BTreeSet;
use std::fmt;

/// Handle to a node in a [`super::Document`]. Stable for the node's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element kinds the dashboard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Body,
    Div,
    Span,
    Section,
    Pre,
    Form,
    Button,
    Anchor,
    Icon,
}

/// A single element: identity, presentation and form state.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    /// `id` attribute
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    /// Text content (for buttons, the label)
    pub text: String,
    /// `href` for anchors
    pub href: Option<String>,
    /// `type="submit"` for buttons
    pub submit: bool,
    pub disabled: bool,
    pub hidden: bool,
    pub(crate) parent: Option<super::NodeId>,
    pub(crate) children: Vec<super::NodeId>,
}

impl Element {
    pub(crate) fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: BTreeSet::new(),
            text: String::new(),
            href: None,
            submit: false,
            disabled: false,
            hidden: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Toggle `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.classes.remove(class) {
            false
        } else {
            self.classes.insert(class.to_string());
            true
        }
    }

    pub fn parent(&self) -> Option<super::NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[super::NodeId] {
        &self.children
    }
}
