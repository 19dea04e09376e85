//! Form submission lifecycle.
//!
//! Submitting a form disables its submit control, swaps in a busy label and
//! shows the loading overlay. Nothing observes the actual request finishing,
//! so a fallback timer puts everything back after 30 seconds unless
//! [`FormLifecycle::complete`] runs first.

use crate::tasks::TaskScope;
use crate::view::{NodeId, SharedDocument, Tag};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const SUBMIT_FALLBACK: Duration = Duration::from_millis(30_000);
pub const BUSY_LABEL: &str = "⟳ Processing...";

#[derive(Debug, Clone)]
struct Pending {
    button: Option<NodeId>,
    original_label: String,
    epoch: u64,
}

#[derive(Debug, Clone)]
pub struct FormLifecycle {
    doc: SharedDocument,
    tasks: TaskScope,
    pending: Arc<DashMap<NodeId, Pending>>,
    next_epoch: Arc<AtomicU64>,
}

impl FormLifecycle {
    pub fn new(doc: SharedDocument, tasks: TaskScope) -> Self {
        Self {
            doc,
            tasks,
            pending: Arc::new(DashMap::new()),
            next_epoch: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Enter the busy state for `form` and start its fallback timer.
    ///
    /// A resubmission while busy starts another timer but keeps the label
    /// captured by the first submission. Returns false if `form` is not a
    /// form in the document.
    pub fn submit(&self, form: NodeId) -> bool {
        let deadline = tokio::time::Instant::now() + SUBMIT_FALLBACK;

        let epoch = {
            let mut doc = self.doc.write();
            if !doc.get(form).is_some_and(|el| el.tag == Tag::Form) {
                return false;
            }

            let button = doc.descendants(form).into_iter().find(|n| {
                doc.get(*n)
                    .is_some_and(|el| el.tag == Tag::Button && el.submit)
            });

            let epoch = match self.pending.get(&form) {
                Some(existing) => existing.epoch,
                None => {
                    let original_label = button
                        .and_then(|b| doc.get(b))
                        .map(|el| el.text.clone())
                        .unwrap_or_default();
                    let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
                    self.pending.insert(
                        form,
                        Pending {
                            button,
                            original_label,
                            epoch,
                        },
                    );
                    epoch
                }
            };

            if let Some(el) = button.and_then(|b| doc.get_mut(b)) {
                el.disabled = true;
                el.text = BUSY_LABEL.to_string();
            }
            doc.set_overlay_visible(true);
            epoch
        };

        tracing::debug!(form = %form, epoch, "Form submitted, busy state entered");

        let lifecycle = self.clone();
        self.tasks.run_at(deadline, move || {
            if lifecycle.restore(form, Some(epoch)) {
                tracing::debug!(form = %form, "Submission fallback timer restored form");
            }
        });
        true
    }

    /// Leave the busy state now. Pending fallback timers become no-ops.
    pub fn complete(&self, form: NodeId) -> bool {
        self.restore(form, None)
    }

    /// Whether `form` is currently in the busy state.
    pub fn is_pending(&self, form: NodeId) -> bool {
        self.pending.contains_key(&form)
    }

    fn restore(&self, form: NodeId, epoch: Option<u64>) -> bool {
        let Some((_, pending)) = self
            .pending
            .remove_if(&form, |_, p| epoch.is_none_or(|e| p.epoch == e))
        else {
            return false;
        };

        let mut doc = self.doc.write();
        if let Some(el) = pending.button.and_then(|b| doc.get_mut(b)) {
            el.disabled = false;
            el.text = pending.original_label;
        }
        doc.set_overlay_visible(false);
        true
    }
}
