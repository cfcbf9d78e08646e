use std::future::Future;

use tracing::{
  error,
  info,
  warn
};

use crate::config::UiConfig;
use crate::notify::NotificationKind;
use crate::palette::{
  fallback_status_label,
  status_badge_class
};
use crate::wire::{
  StatusRequest,
  StatusToggleResponse
};

/// Sends a status change to the server.
pub trait StatusTransport {
  fn send(
    &self,
    request: StatusRequest
  ) -> impl Future<
    Output = anyhow::Result<
      StatusToggleResponse
    >
  >;
}

/// The page as seen by the status flow.
pub trait StatusView {
  fn security_token(
    &self
  ) -> Option<String>;

  /// Rewrites the task's badge; `false`
  /// when no badge exists for it.
  fn set_badge(
    &self,
    task_id: &str,
    label: &str,
    class: &str
  ) -> bool;

  fn notify(
    &self,
    kind: NotificationKind,
    message: &str
  );
}

#[derive(Debug, thiserror::Error)]
pub enum StatusUpdateError {
  #[error(
    "security token field is missing \
     or empty"
  )]
  MissingToken,
  #[error("invalid status request: {0}")]
  InvalidRequest(String),
  #[error("status request failed: {0}")]
  Transport(String),
  #[error("server rejected status change")]
  Rejected(Option<String>)
}

/// Toggles a task's status and reflects
/// the result on the page.
///
/// Every failure ends in exactly one
/// error notification; nothing is
/// retried. On success the new badge
/// label is returned.
#[tracing::instrument(skip(config, transport, view))]
pub async fn update_task_status<T, V>(
  config: &UiConfig,
  transport: &T,
  view: &V,
  task_id: &str,
  status: &str
) -> Result<String, StatusUpdateError>
where
  T: StatusTransport,
  V: StatusView
{
  let request =
    match prepare(config, view, task_id, status)
    {
      | Ok(request) => request,
      | Err(err) => {
        warn!(error = %err, "status update not sent");
        let message = if matches!(
          err,
          StatusUpdateError::MissingToken
        ) {
          &config.messages.missing_token
        } else {
          &config.messages.status_rejected
        };
        view.notify(
          NotificationKind::Error,
          message
        );
        return Err(err);
      }
    };

  let response =
    match transport.send(request).await {
      | Ok(response) => response,
      | Err(err) => {
        error!(
          task_id,
          error = %format!("{err:#}"),
          "status update request failed"
        );
        view.notify(
          NotificationKind::Error,
          &config.messages.status_failed
        );
        return Err(
          StatusUpdateError::Transport(
            format!("{err:#}")
          )
        );
      }
    };

  if !response.success {
    warn!(
      task_id,
      status,
      message = ?response.message,
      "server rejected status update"
    );
    let message = response
      .message
      .as_deref()
      .filter(|m| !m.trim().is_empty())
      .unwrap_or(
        config.messages.status_rejected.as_str()
      );
    view.notify(
      NotificationKind::Error,
      message
    );
    return Err(
      StatusUpdateError::Rejected(
        response.message
      )
    );
  }

  let label = response
    .status
    .filter(|s| !s.trim().is_empty())
    .unwrap_or_else(|| {
      fallback_status_label(status)
    });
  if !view.set_badge(
    task_id,
    &label,
    &status_badge_class(status)
  ) {
    info!(
      task_id,
      "no status badge on page for task"
    );
  }
  view.notify(
    NotificationKind::Success,
    &config.messages.status_updated
  );
  info!(task_id, label = %label, "task status updated");
  Ok(label)
}

fn prepare<V: StatusView>(
  config: &UiConfig,
  view: &V,
  task_id: &str,
  status: &str
) -> Result<StatusRequest, StatusUpdateError>
{
  if status.trim().is_empty() {
    return Err(
      StatusUpdateError::InvalidRequest(
        "status is empty".to_string()
      )
    );
  }

  let url = config
    .status_url(task_id)
    .map_err(|err| {
      StatusUpdateError::InvalidRequest(
        err.to_string()
      )
    })?;

  let token = view
    .security_token()
    .map(|t| t.trim().to_string())
    .filter(|t| !t.is_empty())
    .ok_or(StatusUpdateError::MissingToken)?;

  Ok(StatusRequest {
    url,
    token_header: config
      .security
      .token_header
      .clone(),
    token,
    status: status.trim().to_string()
  })
}
