use anyhow::{
  Context,
  anyhow
};
use percent_encoding::{
  AsciiSet,
  NON_ALPHANUMERIC,
  utf8_percent_encode
};
use serde::Deserialize;
use tracing::{
  debug,
  info
};

const TASK_ID_PLACEHOLDER: &str =
  "{id}";

/// RFC 3986 unreserved characters stay
/// as they are.
const PATH_SEGMENT: &AsciiSet =
  &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Page-level settings for the task
/// manager front end.
///
/// Every field has a default so an
/// empty document (or no document at
/// all) yields a working setup.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct UiConfig {
  pub timing:    TimingConfig,
  pub endpoints: EndpointConfig,
  pub security:  SecurityConfig,
  pub messages:  MessageConfig
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct TimingConfig {
  pub alert_dismiss_ms:         u32,
  pub notification_lifetime_ms: u32,
  pub search_debounce_ms:       u32,
  pub countdown_refresh_ms:     u32
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct EndpointConfig {
  pub status_toggle: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct SecurityConfig {
  pub token_field:  String,
  pub token_header: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(default)]
pub struct MessageConfig {
  pub confirm_delete:    String,
  pub status_updated:    String,
  pub status_rejected:   String,
  pub status_failed:     String,
  pub missing_token:     String,
  pub form_succeeded:    String,
  pub form_rejected:     String,
  pub form_failed:       String
}

impl Default for TimingConfig {
  fn default() -> Self {
    Self {
      alert_dismiss_ms:         5_000,
      notification_lifetime_ms: 5_000,
      search_debounce_ms:       500,
      countdown_refresh_ms:     60_000
    }
  }
}

impl Default for EndpointConfig {
  fn default() -> Self {
    Self {
      status_toggle:
        "/tasks/{id}/toggle-status/"
          .to_string()
    }
  }
}

impl Default for SecurityConfig {
  fn default() -> Self {
    Self {
      token_field:  "csrfmiddlewaretoken"
        .to_string(),
      token_header: "X-CSRFToken"
        .to_string()
    }
  }
}

impl Default for MessageConfig {
  fn default() -> Self {
    Self {
      confirm_delete:  "Are you sure you \
                        want to delete \
                        this item? This \
                        action cannot be \
                        undone."
        .to_string(),
      status_updated:  "Task status \
                        updated \
                        successfully!"
        .to_string(),
      status_rejected: "Failed to update \
                        task status."
        .to_string(),
      status_failed:   "An error occurred \
                        while updating \
                        the task."
        .to_string(),
      missing_token:   "Your session is \
                        missing a \
                        security token; \
                        reload the page \
                        and try again."
        .to_string(),
      form_succeeded:  "Operation \
                        completed \
                        successfully!"
        .to_string(),
      form_rejected:   "An error occurred."
        .to_string(),
      form_failed:     "An unexpected \
                        error occurred."
        .to_string()
    }
  }
}

impl UiConfig {
  #[tracing::instrument(skip(raw), fields(len = raw.len()))]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let cfg: UiConfig =
      toml::from_str(raw).context(
        "failed to parse page config"
      )?;

    if !cfg
      .endpoints
      .status_toggle
      .contains(TASK_ID_PLACEHOLDER)
    {
      return Err(anyhow!(
        "status endpoint pattern must \
         contain {TASK_ID_PLACEHOLDER}: \
         {}",
        cfg.endpoints.status_toggle
      ));
    }

    for (name, value) in [
      (
        "countdown_refresh_ms",
        cfg.timing.countdown_refresh_ms
      ),
      (
        "notification_lifetime_ms",
        cfg.timing.notification_lifetime_ms
      )
    ] {
      if value == 0 {
        return Err(anyhow!(
          "timing.{name} must be greater \
           than zero"
        ));
      }
    }

    info!(
      debounce_ms = cfg
        .timing
        .search_debounce_ms,
      refresh_ms = cfg
        .timing
        .countdown_refresh_ms,
      "loaded page config"
    );
    Ok(cfg)
  }

  /// Expands the status endpoint for
  /// one task. The id is opaque and is
  /// percent-encoded as a single path
  /// segment.
  pub fn status_url(
    &self,
    task_id: &str
  ) -> anyhow::Result<String> {
    let id = task_id.trim();
    if id.is_empty() {
      return Err(anyhow!(
        "task id is empty"
      ));
    }

    let segment =
      utf8_percent_encode(id, PATH_SEGMENT)
        .to_string();
    let url = self
      .endpoints
      .status_toggle
      .replace(TASK_ID_PLACEHOLDER, &segment);
    debug!(task_id = %id, url = %url, "expanded status endpoint");
    Ok(url)
  }
}
