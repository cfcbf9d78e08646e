use std::cell::OnceCell;
use std::rc::Rc;

use chrono::{
  DateTime,
  Datelike,
  Duration,
  FixedOffset,
  NaiveDateTime,
  Timelike,
  Utc
};
use taskdesk_core::datetime::{
  LocalZone,
  offset_from_js_minutes
};
use taskdesk_core::{
  NotificationKind,
  UiConfig
};
use wasm_bindgen::JsValue;

use crate::dom;
use crate::notifications::Notifier;

const CONFIG_ELEMENT_ID: &str =
  "taskdesk-config";

thread_local! {
  static PAGE: OnceCell<Rc<Page>> =
    const { OnceCell::new() };
}

/// State shared by every handler on the
/// page. Built on first use and kept
/// until the page unloads.
pub struct Page {
  pub config: UiConfig,
  notifier:   Rc<Notifier>
}

pub fn page() -> Rc<Page> {
  PAGE.with(|cell| {
    cell
      .get_or_init(|| Rc::new(Page::load()))
      .clone()
  })
}

impl Page {
  fn load() -> Self {
    let config = load_config();
    let notifier = Rc::new(Notifier::new(
      Duration::milliseconds(i64::from(
        config.timing.notification_lifetime_ms
      ))
    ));
    Self { config, notifier }
  }

  pub fn notify(
    &self,
    kind: NotificationKind,
    message: &str
  ) {
    if let Err(err) =
      self.notifier.show(kind, message)
    {
      tracing::error!(
        error = %err,
        message,
        "failed to show notification"
      );
    }
  }

  /// Anti-forgery token from the hidden
  /// field, if the page rendered one.
  pub fn security_token(
    &self
  ) -> Option<String> {
    let selector = format!(
      "[name=\"{}\"]",
      self.config.security.token_field
    );
    dom::query_one(&selector)
      .map(|field| dom::control_value(&field))
      .filter(|token| !token.trim().is_empty())
  }
}

/// The browser's own zone. Each lookup
/// builds a JS `Date` at the moment in
/// question, so DST rules apply per date.
pub struct BrowserZone;

impl LocalZone for BrowserZone {
  fn offset_at_local(
    &self,
    naive: NaiveDateTime
  ) -> FixedOffset {
    // JS months are zero-based.
    let date =
      js_sys::Date::new_with_year_month_day_hr_min(
        u32::try_from(naive.year())
          .unwrap_or_default(),
        naive.month0() as i32,
        naive.day() as i32,
        naive.hour() as i32,
        naive.minute() as i32
      );
    offset_from_js_minutes(
      date.get_timezone_offset()
    )
  }

  fn offset_at_utc(
    &self,
    at: DateTime<Utc>
  ) -> FixedOffset {
    let date = js_sys::Date::new(
      &JsValue::from_f64(
        at.timestamp_millis() as f64
      )
    );
    offset_from_js_minutes(
      date.get_timezone_offset()
    )
  }
}

fn load_config() -> UiConfig {
  let raw = dom::document()
    .and_then(|document| {
      document
        .get_element_by_id(CONFIG_ELEMENT_ID)
    })
    .and_then(|element| element.text_content());

  let Some(raw) = raw else {
    tracing::debug!(
      "no inline page config; using \
       defaults"
    );
    return UiConfig::default();
  };

  match UiConfig::from_toml_str(&raw) {
    | Ok(config) => config,
    | Err(err) => {
      tracing::error!(
        error = %format!("{err:#}"),
        "failed parsing inline page \
         config"
      );
      UiConfig::default()
    }
  }
}
