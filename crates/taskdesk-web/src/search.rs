use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use taskdesk_core::DebounceGate;
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  HtmlFormElement
};

use crate::dom;
use crate::page::Page;

const SEARCH_SELECTOR: &str =
  "input[name=\"search\"]";

/// Submits the search form once typing
/// pauses.
pub fn attach(page: &Page) {
  let Some(input) =
    dom::query_one(SEARCH_SELECTOR)
  else {
    return;
  };

  let delay_ms =
    page.config.timing.search_debounce_ms;
  let gate = Rc::new(DebounceGate::new());
  let target = input.clone();

  EventListener::new(
    &target,
    "input",
    move |_| {
      let ticket = gate.arm();
      let gate = Rc::clone(&gate);
      let input = input.clone();
      Timeout::new(delay_ms, move || {
        if gate.fire(ticket) {
          submit_enclosing_form(&input);
        }
      })
      .forget();
    }
  )
  .forget();
}

fn submit_enclosing_form(input: &Element) {
  let form = input
    .closest("form")
    .ok()
    .flatten()
    .and_then(|form| {
      form.dyn_into::<HtmlFormElement>().ok()
    });

  let Some(form) = form else {
    tracing::debug!(
      "search input has no enclosing \
       form"
    );
    return;
  };

  if let Err(err) = form.submit() {
    tracing::error!(
      error = ?err,
      "search form submit failed"
    );
  }
}
