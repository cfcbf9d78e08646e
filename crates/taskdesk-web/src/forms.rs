use std::rc::Rc;

use serde::Serialize;
use taskdesk_core::NotificationKind;
use taskdesk_core::form::{
  missing_required,
  submit_notice
};
use taskdesk_core::wire::FormSubmitResponse;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Element,
  FormData,
  HtmlFormElement
};

use crate::api::post_json;
use crate::dom::{
  self,
  js_error
};
use crate::page::Page;

const INVALID_CLASS: &str = "is-invalid";

/// Flags blank `[required]` controls with
/// `is-invalid` and clears the flag on
/// the rest.
pub fn validate_form(
  form: &HtmlFormElement
) -> bool {
  let fields = match form
    .query_selector_all("[required]")
  {
    | Ok(list) => (0..list.length())
      .filter_map(|idx| list.item(idx))
      .filter_map(|node| {
        node.dyn_into::<Element>().ok()
      })
      .collect::<Vec<_>>(),
    | Err(err) => {
      tracing::warn!(error = ?err, "required field query failed");
      return true;
    }
  };

  let missing = missing_required(
    fields
      .iter()
      .enumerate()
      .map(|(idx, field)| {
        (idx, dom::control_value(field))
      })
  );

  for (idx, field) in
    fields.iter().enumerate()
  {
    if missing.contains(&idx) {
      dom::add_class(field, INVALID_CLASS);
    } else {
      dom::remove_class(field, INVALID_CLASS);
    }
  }

  tracing::debug!(
    required = fields.len(),
    missing = missing.len(),
    "validated form"
  );
  missing.is_empty()
}

/// Posts a form through `fetch` and
/// reports the outcome as a banner.
pub async fn submit_form_ajax(
  page: Rc<Page>,
  form: HtmlFormElement,
  on_success: Option<js_sys::Function>
) {
  let messages = &page.config.messages;
  match send_form(&page, &form).await {
    | Ok((payload, response)) => {
      if response.success
        && let Some(callback) = on_success
      {
        invoke_callback(&callback, &payload);
      }
      let (kind, message) =
        submit_notice(&response, messages);
      page.notify(kind, &message);
    }
    | Err(err) => {
      tracing::error!(
        error = %format!("{err:#}"),
        "ajax form submission failed"
      );
      page.notify(
        NotificationKind::Error,
        &messages.form_failed
      );
    }
  }
}

async fn send_form(
  page: &Page,
  form: &HtmlFormElement
) -> anyhow::Result<(
  serde_json::Value,
  FormSubmitResponse
)> {
  let data = FormData::new_with_form(form)
    .map_err(js_error)?;

  let action = form.action();
  let url = if action.trim().is_empty() {
    web_sys::window()
      .and_then(|w| w.location().href().ok())
      .unwrap_or_default()
  } else {
    action
  };

  let token = data
    .get(&page.config.security.token_field)
    .as_string()
    .unwrap_or_default();
  if token.is_empty() {
    tracing::warn!(
      url = %url,
      "form has no security token field"
    );
  }

  let payload: serde_json::Value =
    post_json(
      &url,
      &[(
        page.config.security.token_header.as_str(),
        token.as_str()
      )],
      JsValue::from(data)
    )
    .await?;
  let response: FormSubmitResponse =
    serde_json::from_value(payload.clone())?;
  Ok((payload, response))
}

fn invoke_callback(
  callback: &js_sys::Function,
  payload: &serde_json::Value
) {
  let serializer =
    serde_wasm_bindgen::Serializer::json_compatible();
  let arg = match payload.serialize(&serializer)
  {
    | Ok(arg) => arg,
    | Err(err) => {
      tracing::error!(error = %err, "failed encoding callback payload");
      return;
    }
  };
  if let Err(err) =
    callback.call1(&JsValue::NULL, &arg)
  {
    tracing::error!(error = ?err, "form success callback threw");
  }
}
