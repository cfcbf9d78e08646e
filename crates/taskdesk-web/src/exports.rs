//! Functions callable from inline page
//! scripts.

use chrono::Utc;
use taskdesk_core::datetime::{
  display_date_or_invalid,
  parse_due
};
use taskdesk_core::{
  NotificationKind,
  TimeRemaining
};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlFormElement;

use crate::page::{
  BrowserZone,
  page
};
use crate::{
  forms,
  status
};

#[wasm_bindgen(js_name = updateTaskStatus)]
pub fn update_task_status(
  task_id: String,
  status: String
) {
  status::spawn_status_update(
    task_id, status
  );
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(
  message: String,
  kind: Option<String>
) {
  let kind = kind
    .as_deref()
    .unwrap_or_default()
    .parse::<NotificationKind>()
    .unwrap_or_else(|err| {
      tracing::warn!(error = %err, "falling back to info notification");
      NotificationKind::Info
    });
  page().notify(kind, &message);
}

#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(
  form: HtmlFormElement
) -> bool {
  forms::validate_form(&form)
}

#[wasm_bindgen(js_name = submitFormAjax)]
pub fn submit_form_ajax(
  form: HtmlFormElement,
  on_success: Option<js_sys::Function>
) {
  wasm_bindgen_futures::spawn_local(
    forms::submit_form_ajax(
      page(),
      form,
      on_success
    )
  );
}

/// Unparseable input yields
/// `"Invalid Date"`, as a JS `Date` would.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(date: String) -> String {
  display_date_or_invalid(
    &date,
    &BrowserZone
  )
}

#[wasm_bindgen(js_name = getTimeRemaining)]
pub fn get_time_remaining(
  due_date: String
) -> Result<String, JsError> {
  let due = parse_due(
    &due_date,
    &BrowserZone
  )
  .map_err(|err| {
    JsError::new(&format!("{err:#}"))
  })?;
  Ok(
    TimeRemaining::between(due, Utc::now())
      .to_string()
  )
}
