//! Copy-to-clipboard controls on preformatted blocks.

use crate::host::Clipboard;
use crate::tasks::TaskScope;
use crate::view::{ids, NodeId, SharedDocument, Tag};
use std::sync::Arc;
use std::time::Duration;

pub const COPY_ICON: &str = "⧉";
pub const COPIED_ICON: &str = "✓";
/// How long the checkmark stays before the icon reverts.
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

/// Inject a copy control into every `pre` block that lacks one.
///
/// Safe to call again after content changes; existing controls are kept.
/// Returns the number of controls added.
pub fn inject_controls(doc: &SharedDocument) -> usize {
    let mut doc = doc.write();
    let blocks: Vec<NodeId> = doc
        .by_tag(Tag::Pre)
        .into_iter()
        .filter(|pre| {
            !doc.get(*pre).is_some_and(|el| {
                el.children()
                    .iter()
                    .any(|c| doc.get(*c).is_some_and(|c| c.has_class(ids::COPY_BUTTON_CLASS)))
            })
        })
        .collect();

    for pre in &blocks {
        let button = doc.create_child(*pre, Tag::Button);
        if let Some(el) = doc.get_mut(button) {
            el.add_class(ids::COPY_BUTTON_CLASS);
            el.add_class("position-absolute");
            el.text = COPY_ICON.to_string();
        }
    }
    blocks.len()
}

/// Outcome of a copy click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { text: String },
    Failed,
    /// The control or its block disappeared
    Missing,
}

/// Copy the text of the block owning `button` and show the checkmark.
pub async fn copy_block(
    doc: &SharedDocument,
    clipboard: &Arc<dyn Clipboard>,
    tasks: &TaskScope,
    button: NodeId,
) -> CopyOutcome {
    let text = {
        let doc = doc.read();
        let Some(pre) = doc.get(button).and_then(|el| el.parent()) else {
            return CopyOutcome::Missing;
        };
        match doc.get(pre) {
            Some(el) if el.tag == Tag::Pre => el.text.clone(),
            _ => return CopyOutcome::Missing,
        }
    };

    if let Err(error) = clipboard.write_text(&text).await {
        tracing::warn!(error = %error, "Copy to clipboard failed");
        return CopyOutcome::Failed;
    }

    let deadline = tokio::time::Instant::now() + COPIED_FEEDBACK;
    if let Some(el) = doc.write().get_mut(button) {
        el.text = COPIED_ICON.to_string();
        el.add_class("copied");
    }

    let doc = doc.clone();
    tasks.run_at(deadline, move || {
        if let Some(el) = doc.write().get_mut(button) {
            el.text = COPY_ICON.to_string();
            el.remove_class("copied");
        }
    });

    tracing::debug!(chars = text.chars().count(), "Block copied to clipboard");
    CopyOutcome::Copied { text }
}
