use crate::config::MessageConfig;
use crate::notify::NotificationKind;
use crate::wire::FormSubmitResponse;

/// Keys of required fields whose
/// trimmed value is empty, in the order
/// given.
pub fn missing_required<K, V, I>(
  fields: I
) -> Vec<K>
where
  I: IntoIterator<Item = (K, V)>,
  V: AsRef<str>
{
  fields
    .into_iter()
    .filter(|(_, value)| {
      value.as_ref().trim().is_empty()
    })
    .map(|(key, _)| key)
    .collect()
}

/// Banner raised after an AJAX form
/// post came back.
#[must_use]
pub fn submit_notice(
  response: &FormSubmitResponse,
  messages: &MessageConfig
) -> (NotificationKind, String) {
  let server_message = response
    .message
    .as_deref()
    .map(str::trim)
    .filter(|m| !m.is_empty());

  if response.success {
    (
      NotificationKind::Success,
      server_message
        .unwrap_or(messages.form_succeeded.as_str())
        .to_string()
    )
  } else {
    (
      NotificationKind::Error,
      server_message
        .unwrap_or(messages.form_rejected.as_str())
        .to_string()
    )
  }
}
