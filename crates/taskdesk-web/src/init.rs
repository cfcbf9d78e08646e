use gloo::events::EventListener;
use gloo::timers::callback::Timeout;

use crate::page::page;
use crate::{
  cosmetics,
  dom,
  search,
  status,
  ticker,
  widgets
};

const DELETE_LINK_SELECTOR: &str =
  "a[href*=\"delete\"]";
const STATUS_BUTTON_SELECTOR: &str =
  ".status-update-btn";

/// Wires the page once its content is
/// parsed.
pub fn run_when_ready() {
  let Some(document) = dom::document()
  else {
    tracing::error!(
      "no document; page script idle"
    );
    return;
  };

  if still_loading(&document.ready_state())
  {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      |_| wire_page()
    )
    .forget();
  } else {
    wire_page();
  }
}

/// `document.readyState` is a plain
/// string in web-sys.
fn still_loading(ready_state: &str) -> bool {
  ready_state == "loading"
}

#[tracing::instrument]
fn wire_page() {
  let page = page();

  if widgets::bootstrap_loaded() {
    for element in dom::query_all(
      "[data-bs-toggle=\"tooltip\"]"
    ) {
      widgets::tooltip(&element);
    }
    for element in dom::query_all(
      "[data-bs-toggle=\"popover\"]"
    ) {
      widgets::popover(&element);
    }
  } else {
    tracing::warn!(
      "bootstrap global missing; \
       skipping tooltips and popovers"
    );
  }

  schedule_alert_dismissal(
    page.config.timing.alert_dismiss_ms
  );
  guard_delete_links(
    page.config.messages.confirm_delete.clone()
  );
  attach_status_buttons();
  search::attach(&page);

  cosmetics::apply_style_rules();
  cosmetics::set_datetime_minimums();
  cosmetics::add_card_hover();

  ticker::start(&page);
  tracing::info!("page wired");
}

fn schedule_alert_dismissal(delay_ms: u32) {
  for alert in dom::query_all(".alert") {
    Timeout::new(delay_ms, move || {
      widgets::close_alert(&alert);
    })
    .forget();
  }
}

fn guard_delete_links(message: String) {
  for link in
    dom::query_all(DELETE_LINK_SELECTOR)
  {
    let message = message.clone();
    EventListener::new(
      &link,
      "click",
      move |event| {
        let confirmed = web_sys::window()
          .and_then(|w| {
            w.confirm_with_message(&message)
              .ok()
          })
          .unwrap_or(false);
        if !confirmed {
          event.prevent_default();
        }
      }
    )
    .forget();
  }
}

fn attach_status_buttons() {
  for button in
    dom::query_all(STATUS_BUTTON_SELECTOR)
  {
    let target = button.clone();
    EventListener::new(
      &target,
      "click",
      move |_| {
        let task_id = dom::attr(
          &button,
          "data-task-id"
        )
        .unwrap_or_default();
        let status =
          dom::attr(&button, "data-status")
            .unwrap_or_default();
        status::spawn_status_update(
          task_id, status
        );
      }
    )
    .forget();
  }
}
