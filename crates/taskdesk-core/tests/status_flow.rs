use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::anyhow;
use pretty_assertions::assert_eq;
use taskdesk_core::wire::{StatusRequest, StatusToggleResponse};
use taskdesk_core::{
    NotificationKind, StatusTransport, StatusUpdateError, StatusView, UiConfig, update_task_status,
};

enum Canned {
    Reply(StatusToggleResponse),
    NetworkDown,
}

struct MockTransport {
    canned: Canned,
    sent: RefCell<Vec<StatusRequest>>,
}

impl MockTransport {
    fn replying(success: bool, status: Option<&str>) -> Self {
        Self {
            canned: Canned::Reply(StatusToggleResponse {
                success,
                status: status.map(str::to_string),
                message: None,
            }),
            sent: RefCell::new(vec![]),
        }
    }

    fn offline() -> Self {
        Self {
            canned: Canned::NetworkDown,
            sent: RefCell::new(vec![]),
        }
    }
}

impl StatusTransport for MockTransport {
    async fn send(&self, request: StatusRequest) -> anyhow::Result<StatusToggleResponse> {
        self.sent.borrow_mut().push(request);
        match &self.canned {
            Canned::Reply(resp) => Ok(resp.clone()),
            Canned::NetworkDown => Err(anyhow!("connection refused")),
        }
    }
}

#[derive(Default)]
struct RecordingPage {
    token: Option<String>,
    badges: RefCell<HashMap<String, (String, String)>>,
    notices: RefCell<Vec<(NotificationKind, String)>>,
}

impl RecordingPage {
    fn with_badge(task_id: &str) -> Self {
        let page = Self {
            token: Some("tok-123".to_string()),
            ..Self::default()
        };
        page.badges.borrow_mut().insert(
            task_id.to_string(),
            ("Pending".to_string(), "badge bg-pending status-badge".to_string()),
        );
        page
    }

    fn badge(&self, task_id: &str) -> Option<(String, String)> {
        self.badges.borrow().get(task_id).cloned()
    }
}

impl StatusView for RecordingPage {
    fn security_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn set_badge(&self, task_id: &str, label: &str, class: &str) -> bool {
        let mut badges = self.badges.borrow_mut();
        match badges.get_mut(task_id) {
            Some(badge) => {
                *badge = (label.to_string(), class.to_string());
                true
            }
            None => false,
        }
    }

    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notices.borrow_mut().push((kind, message.to_string()));
    }
}

#[tokio::test]
async fn success_rewrites_badge_and_notifies() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, Some("Done"));
    let page = RecordingPage::with_badge("42");

    let label = update_task_status(&cfg, &transport, &page, "42", "done")
        .await
        .expect("status update succeeds");

    assert_eq!(label, "Done");
    assert_eq!(
        page.badge("42"),
        Some(("Done".to_string(), "badge bg-done status-badge".to_string()))
    );
    assert_eq!(
        *page.notices.borrow(),
        vec![(NotificationKind::Success, cfg.messages.status_updated.clone())]
    );

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/tasks/42/toggle-status/");
    assert_eq!(sent[0].token_header, "X-CSRFToken");
    assert_eq!(sent[0].token, "tok-123");
    assert_eq!(sent[0].form_fields(), vec![("status", "done")]);
}

#[tokio::test]
async fn rejection_leaves_badge_alone() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(false, None);
    let page = RecordingPage::with_badge("42");

    let err = update_task_status(&cfg, &transport, &page, "42", "done")
        .await
        .expect_err("server rejected");

    assert!(matches!(err, StatusUpdateError::Rejected(None)));
    assert_eq!(
        page.badge("42"),
        Some(("Pending".to_string(), "badge bg-pending status-badge".to_string()))
    );
    assert_eq!(
        *page.notices.borrow(),
        vec![(NotificationKind::Error, cfg.messages.status_rejected.clone())]
    );
}

#[tokio::test]
async fn transport_failure_raises_single_error() {
    let cfg = UiConfig::default();
    let transport = MockTransport::offline();
    let page = RecordingPage::with_badge("7");

    let err = update_task_status(&cfg, &transport, &page, "7", "completed")
        .await
        .expect_err("network down");

    assert!(matches!(err, StatusUpdateError::Transport(_)));
    assert_eq!(transport.sent.borrow().len(), 1, "never retried");
    assert_eq!(
        *page.notices.borrow(),
        vec![(NotificationKind::Error, cfg.messages.status_failed.clone())]
    );
}

#[tokio::test]
async fn missing_token_sends_nothing() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, Some("Completed"));
    let page = RecordingPage {
        token: Some("   ".to_string()),
        ..RecordingPage::default()
    };

    let err = update_task_status(&cfg, &transport, &page, "7", "completed")
        .await
        .expect_err("token required");

    assert!(matches!(err, StatusUpdateError::MissingToken));
    assert!(transport.sent.borrow().is_empty());
    assert_eq!(
        *page.notices.borrow(),
        vec![(NotificationKind::Error, cfg.messages.missing_token.clone())]
    );
}

#[tokio::test]
async fn missing_label_falls_back_to_known_name() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, None);
    let page = RecordingPage::with_badge("9");

    let label = update_task_status(&cfg, &transport, &page, "9", "in_progress")
        .await
        .expect("status update succeeds");

    assert_eq!(label, "In Progress");
    assert_eq!(
        page.badge("9").map(|(_, class)| class),
        Some("badge bg-in_progress status-badge".to_string())
    );
}

#[tokio::test]
async fn empty_task_id_is_rejected_before_sending() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, Some("Done"));
    let page = RecordingPage::with_badge("42");

    let err = update_task_status(&cfg, &transport, &page, "", "done")
        .await
        .expect_err("id required");

    assert!(matches!(err, StatusUpdateError::InvalidRequest(_)));
    assert!(transport.sent.borrow().is_empty());
    assert_eq!(page.notices.borrow().len(), 1);
}

#[tokio::test]
async fn dotted_task_id_is_sent_as_one_segment() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, Some("Done"));
    let page = RecordingPage::with_badge("task.42");

    let label = update_task_status(&cfg, &transport, &page, "task.42", "done")
        .await
        .expect("opaque ids are accepted");

    assert_eq!(label, "Done");
    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/tasks/task.42/toggle-status/");
    assert_eq!(
        page.badge("task.42"),
        Some(("Done".to_string(), "badge bg-done status-badge".to_string()))
    );
}

#[tokio::test]
async fn slash_in_task_id_cannot_escape_the_segment() {
    let cfg = UiConfig::default();
    let transport = MockTransport::replying(true, Some("Done"));
    let page = RecordingPage::with_badge("a/b");

    update_task_status(&cfg, &transport, &page, "a/b", "done")
        .await
        .expect("encoded and sent");

    assert_eq!(transport.sent.borrow()[0].url, "/tasks/a%2Fb/toggle-status/");
}
