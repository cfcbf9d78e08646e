use chrono::Utc;
use gloo::events::EventListener;
use taskdesk_core::datetime::datetime_local_min;
use taskdesk_core::palette::STYLE_RULES;

use crate::dom;
use crate::page::BrowserZone;

const CARD_SELECTOR: &str = ".task-card";
const CARD_HOVER_CLASS: &str = "shadow-lg";

/// `bg-*` classes from `data-priority`
/// and `data-status`.
pub fn apply_style_rules() {
  for rule in STYLE_RULES {
    for element in
      dom::query_all(rule.selector)
    {
      let Some(value) =
        dom::attr(&element, rule.attribute)
      else {
        continue;
      };
      if let Some(class) =
        rule.class_for(&value)
      {
        dom::add_class(&element, &class);
      }
    }
  }
}

pub fn set_datetime_minimums() {
  let inputs = dom::query_all(
    "input[type=\"datetime-local\"]"
  );
  if inputs.is_empty() {
    return;
  }

  let min = datetime_local_min(
    Utc::now(),
    &BrowserZone
  );
  for input in inputs {
    if let Err(err) =
      input.set_attribute("min", &min)
    {
      tracing::warn!(
        error = ?err,
        "failed setting datetime min"
      );
    }
  }
}

pub fn add_card_hover() {
  for card in dom::query_all(CARD_SELECTOR) {
    let enter = card.clone();
    EventListener::new(
      &card,
      "mouseenter",
      move |_| {
        dom::add_class(
          &enter,
          CARD_HOVER_CLASS
        );
      }
    )
    .forget();

    let leave = card.clone();
    EventListener::new(
      &card,
      "mouseleave",
      move |_| {
        dom::remove_class(
          &leave,
          CARD_HOVER_CLASS
        );
      }
    )
    .forget();
  }
}
