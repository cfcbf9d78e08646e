use chrono::Utc;
use gloo::timers::callback::Interval;
use taskdesk_core::datetime::parse_due;
use taskdesk_core::{
  Severity,
  TimeRemaining
};

use crate::dom;
use crate::page::{
  BrowserZone,
  Page
};

const DUE_DATE_ATTRIBUTE: &str =
  "data-due-date";

/// Rewrites every countdown on the page.
pub fn refresh_countdowns() {
  let now = Utc::now();
  let elements = dom::query_all(&format!(
    "[{DUE_DATE_ATTRIBUTE}]"
  ));

  for element in &elements {
    let Some(raw) =
      dom::attr(element, DUE_DATE_ATTRIBUTE)
    else {
      continue;
    };
    let due = match parse_due(&raw, &BrowserZone) {
      | Ok(due) => due,
      | Err(err) => {
        tracing::warn!(
          due = %raw,
          error = %format!("{err:#}"),
          "skipping unparseable due date"
        );
        continue;
      }
    };

    let remaining =
      TimeRemaining::between(due, now);
    element.set_text_content(Some(
      &remaining.to_string()
    ));

    for severity in Severity::ALL {
      dom::remove_class(
        element,
        severity.text_class()
      );
    }
    dom::add_class(
      element,
      remaining.severity().text_class()
    );
  }

  tracing::trace!(
    count = elements.len(),
    "refreshed countdowns"
  );
}

/// Refreshes now, then on a fixed cadence
/// for the rest of the page's life.
pub fn start(page: &Page) {
  refresh_countdowns();
  let period =
    page.config.timing.countdown_refresh_ms;
  Interval::new(period, refresh_countdowns)
    .forget();
  tracing::debug!(
    period_ms = period,
    "countdown ticker started"
  );
}
