//! Interaction layer tests: delegated clicks, keyboard shortcuts, copy
//! feedback and the form submission lifecycle.

mod common;

use agentwatch::host::MemoryClipboard;
use agentwatch::interaction::copy::{COPIED_ICON, COPY_ICON};
use agentwatch::interaction::forms::BUSY_LABEL;
use agentwatch::interaction::{
    CopyOutcome, EventOutcome, Key, KeyPress, Modifiers, PageEvent,
};
use agentwatch::notify::NotificationKind;
use agentwatch::view::{ids, NodeId, Tag};
use common::*;
use std::time::Duration;

struct Page {
    h: Harness,
    pre: NodeId,
    card: NodeId,
    card_title: NodeId,
    section: NodeId,
    anchor: NodeId,
}

async fn page_with(clipboard: MemoryClipboard) -> Page {
    let mut doc = template_for("/");
    let pre = add_code_block(&mut doc, "docker compose up -d");
    let (card, card_title) = add_expandable(&mut doc);
    let (section, anchor) = add_anchor(&mut doc, "details");

    let h = harness_with(doc, "/", clipboard);
    h.dashboard.start().await;
    Page {
        h,
        pre,
        card,
        card_title,
        section,
        anchor,
    }
}

async fn page() -> Page {
    page_with(MemoryClipboard::new()).await
}

fn busy_state(h: &Harness) -> (String, bool, bool) {
    let doc = h.dashboard.document();
    let (_, button) = submit_button(doc);
    let read = doc.read();
    let el = read.get(button).unwrap();
    (el.text.clone(), el.disabled, read.overlay_visible())
}

// =============================================================================
// Clicks
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_click_inside_expandable_toggles_card() {
    let p = page().await;

    let outcome = p.h.dashboard.dispatch(PageEvent::Click(p.card_title)).await;
    assert_eq!(
        outcome,
        EventOutcome::Toggled {
            node: p.card,
            expanded: true
        }
    );

    let outcome = p.h.dashboard.dispatch(PageEvent::Click(p.card)).await;
    assert_eq!(
        outcome,
        EventOutcome::Toggled {
            node: p.card,
            expanded: false
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_expandable_added_later_is_handled() {
    let p = page().await;
    let (card, title) = add_expandable(&mut p.h.dashboard.document().write());

    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(title)).await,
        EventOutcome::Toggled {
            node: card,
            expanded: true
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_anchor_click_scrolls_to_section() {
    let p = page().await;

    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(p.anchor)).await,
        EventOutcome::Scrolled(p.section)
    );
    assert_eq!(p.h.dashboard.document().read().scroll_target(), Some(p.section));
}

#[tokio::test(start_paused = true)]
async fn test_anchor_to_missing_section_is_ignored() {
    let p = page().await;
    let anchor = {
        let mut doc = p.h.dashboard.document().write();
        let body = doc.body();
        let anchor = doc.create_child(body, Tag::Anchor);
        doc.get_mut(anchor).unwrap().href = Some("#nowhere".to_string());
        anchor
    };

    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(anchor)).await,
        EventOutcome::Ignored
    );
    assert_eq!(p.h.dashboard.document().read().scroll_target(), None);
}

#[tokio::test(start_paused = true)]
async fn test_controls_inside_expandable_also_toggle_card() {
    let mut doc = template_for("/");
    let (card, _) = add_expandable(&mut doc);
    let body = doc.body();
    let section = doc.create_child(body, Tag::Section);
    doc.get_mut(section).unwrap().id = Some("span-3".to_string());
    let anchor = doc.create_child(card, Tag::Anchor);
    doc.get_mut(anchor).unwrap().href = Some("#span-3".to_string());
    let pre = doc.create_child(card, Tag::Pre);
    doc.get_mut(pre).unwrap().text = "curl localhost:5000/api/traces".to_string();

    let h = harness_with(doc, "/", MemoryClipboard::new());
    h.dashboard.start().await;
    let shared = h.dashboard.document();
    let is_expanded = || {
        shared
            .read()
            .get(card)
            .unwrap()
            .has_class(ids::EXPANDED_CLASS)
    };

    assert_eq!(
        h.dashboard.dispatch(PageEvent::Click(anchor)).await,
        EventOutcome::Scrolled(section)
    );
    assert!(is_expanded());

    let button = copy_button(shared, pre).unwrap();
    assert!(matches!(
        h.dashboard.dispatch(PageEvent::Click(button)).await,
        EventOutcome::Copy(CopyOutcome::Copied { .. })
    ));
    assert!(!is_expanded());
    assert_eq!(
        h.clipboard.contents().as_deref(),
        Some("curl localhost:5000/api/traces")
    );
}

#[tokio::test(start_paused = true)]
async fn test_click_on_plain_content_is_ignored() {
    let p = page().await;
    let body = p.h.dashboard.document().read().body();
    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(body)).await,
        EventOutcome::Ignored
    );
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_control_removes_notification() {
    let p = page().await;
    let n = p.h.dashboard.notify("Query failed", NotificationKind::Error);
    let close = {
        let doc = p.h.dashboard.document().read();
        doc.get(n.node).unwrap().children()[2]
    };

    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(close)).await,
        EventOutcome::Dismissed(close)
    );
    assert!(notification_messages(p.h.dashboard.document()).is_empty());

    // The auto-dismiss timer still fires later; nothing happens
    tokio::time::sleep(Duration::from_millis(6000)).await;
    assert!(p.h.dashboard.active_notifications().is_empty());
}

// =============================================================================
// Copy to clipboard
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_copy_shows_checkmark_for_two_seconds() {
    let p = page().await;
    let doc = p.h.dashboard.document();
    let button = copy_button(doc, p.pre).unwrap();
    assert_eq!(text_of(doc, button), COPY_ICON);

    let outcome = p.h.dashboard.dispatch(PageEvent::Click(button)).await;
    assert_eq!(
        outcome,
        EventOutcome::Copy(CopyOutcome::Copied {
            text: "docker compose up -d".to_string()
        })
    );
    assert_eq!(
        p.h.clipboard.contents().as_deref(),
        Some("docker compose up -d")
    );
    assert_eq!(text_of(doc, button), COPIED_ICON);

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(text_of(doc, button), COPIED_ICON);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(text_of(doc, button), COPY_ICON);
}

#[tokio::test(start_paused = true)]
async fn test_copy_failure_keeps_icon() {
    let p = page_with(MemoryClipboard::denying()).await;
    let doc = p.h.dashboard.document();
    let button = copy_button(doc, p.pre).unwrap();

    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Click(button)).await,
        EventOutcome::Copy(CopyOutcome::Failed)
    );
    assert_eq!(text_of(doc, button), COPY_ICON);
    assert!(p.h.clipboard.contents().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_copy_controls_injected_once_per_block() {
    let p = page().await;
    assert_eq!(p.h.dashboard.refresh_controls(), 0);

    add_code_block(&mut p.h.dashboard.document().write(), "curl /api/health");
    assert_eq!(p.h.dashboard.refresh_controls(), 1);
    assert_eq!(p.h.dashboard.refresh_controls(), 0);
}

// =============================================================================
// Keyboard
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_ctrl_enter_submits_first_form() {
    let p = page().await;
    let (form, _) = submit_button(p.h.dashboard.document());

    assert_eq!(
        p.h.dashboard
            .dispatch(PageEvent::KeyDown(KeyPress::ctrl(Key::Enter)))
            .await,
        EventOutcome::Submitted(form)
    );
    assert_eq!(p.h.host.submitted_forms(), vec![form]);
    assert_eq!(busy_state(&p.h), (BUSY_LABEL.to_string(), true, true));
}

#[tokio::test(start_paused = true)]
async fn test_meta_enter_submits_and_plain_enter_does_not() {
    let p = page().await;
    let plain = p
        .h
        .dashboard
        .dispatch(PageEvent::KeyDown(KeyPress::plain(Key::Enter)))
        .await;
    assert_eq!(plain, EventOutcome::Ignored);
    assert!(p.h.host.submitted_forms().is_empty());

    let meta = KeyPress {
        key: Key::Enter,
        modifiers: Modifiers {
            meta: true,
            ..Default::default()
        },
    };
    assert!(matches!(
        p.h.dashboard.dispatch(PageEvent::KeyDown(meta)).await,
        EventOutcome::Submitted(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_enter_without_form_is_ignored() {
    let h = harness("/metrics");
    h.dashboard.start().await;
    assert_eq!(
        h.dashboard
            .dispatch(PageEvent::KeyDown(KeyPress::ctrl(Key::Enter)))
            .await,
        EventOutcome::Ignored
    );
    h.dashboard.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn test_escape_hides_visible_overlay() {
    let p = page().await;
    let escape = PageEvent::KeyDown(KeyPress::plain(Key::Escape));

    assert_eq!(p.h.dashboard.dispatch(escape).await, EventOutcome::Ignored);

    p.h.dashboard.document().write().set_overlay_visible(true);
    assert_eq!(p.h.dashboard.dispatch(escape).await, EventOutcome::OverlayHidden);
    assert!(!p.h.dashboard.document().read().overlay_visible());
}

// =============================================================================
// Form submission lifecycle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_fallback_restores_form_after_thirty_seconds() {
    let p = page().await;
    let (form, _) = submit_button(p.h.dashboard.document());

    p.h.dashboard.dispatch(PageEvent::Submit(form)).await;
    assert_eq!(busy_state(&p.h), (BUSY_LABEL.to_string(), true, true));

    tokio::time::sleep(Duration::from_millis(29_999)).await;
    assert_eq!(busy_state(&p.h), (BUSY_LABEL.to_string(), true, true));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(busy_state(&p.h), ("Generate".to_string(), false, false));
}

#[tokio::test(start_paused = true)]
async fn test_rapid_resubmission_restores_once_with_original_label() {
    let p = page().await;
    let doc = p.h.dashboard.document();
    let (form, _) = submit_button(doc);

    p.h.dashboard.dispatch(PageEvent::Submit(form)).await;
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    p.h.dashboard.dispatch(PageEvent::Submit(form)).await;

    // First timer restores at 30s
    tokio::time::sleep(Duration::from_millis(20_001)).await;
    assert_eq!(busy_state(&p.h), ("Generate".to_string(), false, false));

    // The second timer (due at 40s) must not touch the page again
    doc.write().set_overlay_visible(true);
    tokio::time::sleep(Duration::from_millis(15_000)).await;
    assert!(doc.read().overlay_visible());
    assert_eq!(busy_state(&p.h).0, "Generate");
}

#[tokio::test(start_paused = true)]
async fn test_complete_submission_cancels_fallback() {
    let p = page().await;
    let doc = p.h.dashboard.document();
    let (form, _) = submit_button(doc);

    p.h.dashboard.dispatch(PageEvent::Submit(form)).await;
    assert!(p.h.dashboard.complete_submission(form));
    assert!(!p.h.dashboard.complete_submission(form));
    assert_eq!(busy_state(&p.h), ("Generate".to_string(), false, false));

    doc.write().set_overlay_visible(true);
    tokio::time::sleep(Duration::from_millis(31_000)).await;
    assert!(doc.read().overlay_visible());
}

#[tokio::test(start_paused = true)]
async fn test_submit_of_non_form_is_ignored() {
    let p = page().await;
    assert_eq!(
        p.h.dashboard.dispatch(PageEvent::Submit(p.pre)).await,
        EventOutcome::Ignored
    );
    let doc = p.h.dashboard.document().read();
    let overlay = doc.by_id(ids::LOADING_OVERLAY).unwrap();
    assert!(doc.get(overlay).unwrap().hidden);
}
