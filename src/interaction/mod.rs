//! User interaction handling.
//!
//! All page events go through one delegated handler, [`Interactions::dispatch`],
//! which resolves the event target against the document at dispatch time.
//! Content added later (new `pre` blocks, new expandable rows) is handled
//! without registering anything per element; only copy controls need
//! [`Interactions::attach`] to be re-run so the new blocks get a button.

pub mod copy;
pub mod forms;

pub use copy::CopyOutcome;
pub use forms::FormLifecycle;

use crate::host::{Clipboard, PageHost};
use crate::notify::NotificationCenter;
use crate::tasks::TaskScope;
use crate::view::{ids, NodeId, SharedDocument, Tag};
use std::sync::Arc;

/// Keys the dashboard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
    Other,
}

/// Modifier state of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Command on macOS, Windows key elsewhere
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        }
    }

    /// Platform submit accelerator: Ctrl+Enter or Meta+Enter.
    pub fn is_submit_accelerator(&self) -> bool {
        self.key == Key::Enter && (self.modifiers.ctrl || self.modifiers.meta)
    }
}

/// An event delivered by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Click(NodeId),
    KeyDown(KeyPress),
    Submit(NodeId),
    Online,
    Offline,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Toggled { node: NodeId, expanded: bool },
    Copy(CopyOutcome),
    Scrolled(NodeId),
    Dismissed(NodeId),
    Submitted(NodeId),
    OverlayHidden,
    /// Handled by the connectivity watcher
    Connectivity,
    Ignored,
}

/// Delegated handler for clicks, key presses and form submissions.
#[derive(Clone)]
pub struct Interactions {
    doc: SharedDocument,
    host: Arc<dyn PageHost>,
    clipboard: Arc<dyn Clipboard>,
    notifications: NotificationCenter,
    forms: FormLifecycle,
    tasks: TaskScope,
}

impl Interactions {
    pub fn new(
        doc: SharedDocument,
        host: Arc<dyn PageHost>,
        clipboard: Arc<dyn Clipboard>,
        notifications: NotificationCenter,
        tasks: TaskScope,
    ) -> Self {
        let forms = FormLifecycle::new(doc.clone(), tasks.clone());
        Self {
            doc,
            host,
            clipboard,
            notifications,
            forms,
            tasks,
        }
    }

    /// Prepare the page: inject copy controls into `pre` blocks.
    pub fn attach(&self) -> usize {
        let added = copy::inject_controls(&self.doc);
        tracing::debug!(copy_controls = added, "Interactions attached");
        added
    }

    pub fn forms(&self) -> &FormLifecycle {
        &self.forms
    }

    /// Handle one page event.
    pub async fn dispatch(&self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Click(target) => self.on_click(target).await,
            PageEvent::KeyDown(press) => self.on_key_down(press),
            PageEvent::Submit(form) => self.on_submit(form),
            PageEvent::Online | PageEvent::Offline => EventOutcome::Connectivity,
        }
    }

    /// Resolve a click the way it bubbles on a page: the nearest control
    /// (dismiss, copy, in-page anchor) acts, and an enclosing expandable card
    /// toggles as well. The control's outcome is returned when there is one.
    async fn on_click(&self, target: NodeId) -> EventOutcome {
        let (control, card) = {
            let doc = self.doc.read();
            let control = if let Some(close) =
                doc.closest(target, |el| el.has_class(ids::DISMISS_CLASS))
            {
                ClickTarget::Dismiss(close)
            } else if let Some(button) =
                doc.closest(target, |el| el.has_class(ids::COPY_BUTTON_CLASS))
            {
                ClickTarget::Copy(button)
            } else if let Some(anchor) = doc.closest(target, |el| {
                el.tag == Tag::Anchor && el.href.as_deref().is_some_and(|h| h.starts_with('#'))
            }) {
                let fragment = doc
                    .get(anchor)
                    .and_then(|el| el.href.as_deref())
                    .map(|h| h.trim_start_matches('#').to_string())
                    .unwrap_or_default();
                ClickTarget::Anchor(fragment)
            } else {
                ClickTarget::None
            };
            let card = doc.closest(target, |el| el.has_class(ids::EXPANDABLE_CLASS));
            (control, card)
        };

        let toggled = card.and_then(|card| {
            let mut doc = self.doc.write();
            doc.get_mut(card).map(|el| EventOutcome::Toggled {
                node: card,
                expanded: el.toggle_class(ids::EXPANDED_CLASS),
            })
        });

        let outcome = match control {
            ClickTarget::Dismiss(close) => {
                if self.notifications.dismiss_containing(close) {
                    EventOutcome::Dismissed(close)
                } else {
                    EventOutcome::Ignored
                }
            }
            ClickTarget::Copy(button) => EventOutcome::Copy(
                copy::copy_block(&self.doc, &self.clipboard, &self.tasks, button).await,
            ),
            ClickTarget::Anchor(fragment) => {
                let mut doc = self.doc.write();
                match doc.by_id(&fragment) {
                    Some(section) if !fragment.is_empty() => {
                        doc.scroll_to(section);
                        EventOutcome::Scrolled(section)
                    }
                    _ => EventOutcome::Ignored,
                }
            }
            ClickTarget::None => EventOutcome::Ignored,
        };

        match (outcome, toggled) {
            (EventOutcome::Ignored, Some(toggled)) => toggled,
            (outcome, _) => outcome,
        }
    }

    fn on_key_down(&self, press: KeyPress) -> EventOutcome {
        if press.is_submit_accelerator() {
            let first_form = self.doc.read().by_tag(Tag::Form).first().copied();
            return match first_form {
                Some(form) => {
                    self.host.submit_form(form);
                    self.on_submit(form)
                }
                None => EventOutcome::Ignored,
            };
        }

        if press.key == Key::Escape {
            let mut doc = self.doc.write();
            if doc.overlay_visible() {
                doc.set_overlay_visible(false);
                return EventOutcome::OverlayHidden;
            }
        }

        EventOutcome::Ignored
    }

    fn on_submit(&self, form: NodeId) -> EventOutcome {
        if self.forms.submit(form) {
            EventOutcome::Submitted(form)
        } else {
            EventOutcome::Ignored
        }
    }
}

enum ClickTarget {
    Dismiss(NodeId),
    Copy(NodeId),
    Anchor(String),
    None,
}
