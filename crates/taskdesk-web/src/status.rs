use std::rc::Rc;

use anyhow::anyhow;
use taskdesk_core::wire::{
  StatusRequest,
  StatusToggleResponse
};
use taskdesk_core::{
  NotificationKind,
  StatusTransport,
  StatusView,
  update_task_status
};
use web_sys::UrlSearchParams;

use crate::api::post_json;
use crate::dom::{
  self,
  js_error
};
use crate::page::{
  Page,
  page
};

const FORM_CONTENT_TYPE: &str =
  "application/x-www-form-urlencoded";

/// `fetch`-backed status endpoint.
pub struct FetchTransport;

impl StatusTransport for FetchTransport {
  async fn send(
    &self,
    request: StatusRequest
  ) -> anyhow::Result<StatusToggleResponse>
  {
    let params = UrlSearchParams::new()
      .map_err(js_error)?;
    for (name, value) in
      request.form_fields()
    {
      params.append(name, value);
    }
    let body: String =
      params.to_string().into();
    if body.is_empty() {
      return Err(anyhow!(
        "status request has no fields"
      ));
    }

    post_json(
      &request.url,
      &[
        ("Content-Type", FORM_CONTENT_TYPE),
        (
          request.token_header.as_str(),
          request.token.as_str()
        )
      ],
      body
    )
    .await
  }
}

/// Live DOM behind the status flow.
pub struct DomStatusView {
  page: Rc<Page>
}

impl StatusView for DomStatusView {
  fn security_token(
    &self
  ) -> Option<String> {
    self.page.security_token()
  }

  fn set_badge(
    &self,
    task_id: &str,
    label: &str,
    class: &str
  ) -> bool {
    let selector =
      taskdesk_core::palette::status_badge_selector(
        task_id
      );
    let Some(badge) =
      dom::query_one(&selector)
    else {
      return false;
    };
    badge.set_text_content(Some(label));
    badge.set_class_name(class);
    true
  }

  fn notify(
    &self,
    kind: NotificationKind,
    message: &str
  ) {
    self.page.notify(kind, message);
  }
}

/// Fire-and-forget status toggle.
pub fn spawn_status_update(
  task_id: String,
  status: String
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      let page = page();
      let view = DomStatusView {
        page: Rc::clone(&page)
      };
      if let Err(err) = update_task_status(
        &page.config,
        &FetchTransport,
        &view,
        &task_id,
        &status
      )
      .await
      {
        tracing::debug!(
          task_id = %task_id,
          error = %err,
          "status toggle ended without update"
        );
      }
    }
  );
}
