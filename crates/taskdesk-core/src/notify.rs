use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{
  DateTime,
  Duration,
  Utc
};
use tracing::debug;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
pub struct NotificationId(u64);

impl fmt::Display for NotificationId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum NotificationKind {
  #[default]
  Info,
  Success,
  Warning,
  Error
}

impl NotificationKind {
  /// Bootstrap alert modifier; errors
  /// render as `alert-danger`.
  #[must_use]
  pub fn alert_class(
    self
  ) -> &'static str {
    match self {
      | Self::Info => "alert-info",
      | Self::Success => "alert-success",
      | Self::Warning => "alert-warning",
      | Self::Error => "alert-danger"
    }
  }
}

impl FromStr for NotificationKind {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      | "" | "info" => Ok(Self::Info),
      | "success" => Ok(Self::Success),
      | "warning" => Ok(Self::Warning),
      | "error" | "danger" => Ok(Self::Error),
      | other => Err(anyhow!(
        "unknown notification kind: \
         {other}"
      ))
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub id:         NotificationId,
  pub kind:       NotificationKind,
  pub message:    String,
  pub expires_at: DateTime<Utc>
}

impl Notification {
  #[must_use]
  pub fn class_list(&self) -> String {
    format!(
      "alert {} alert-dismissible fade \
       show",
      self.kind.alert_class()
    )
  }
}

/// Banners currently on screen, in
/// insertion order.
#[derive(Debug)]
pub struct NotificationQueue {
  next_id:  u64,
  lifetime: Duration,
  entries:  Vec<Notification>
}

impl NotificationQueue {
  #[must_use]
  pub fn new(lifetime: Duration) -> Self {
    Self {
      next_id: 1,
      lifetime,
      entries: Vec::new()
    }
  }

  #[must_use]
  pub fn lifetime(&self) -> Duration {
    self.lifetime
  }

  pub fn push(
    &mut self,
    kind: NotificationKind,
    message: impl Into<String>,
    now: DateTime<Utc>
  ) -> &Notification {
    let id = NotificationId(self.next_id);
    self.next_id += 1;

    let message = message.into();
    debug!(
      id = id.0,
      ?kind,
      %message,
      "queued notification"
    );

    let idx = self.entries.len();
    self.entries.push(Notification {
      id,
      kind,
      message,
      expires_at: now + self.lifetime
    });
    &self.entries[idx]
  }

  /// Removes one banner ahead of its
  /// expiry; `false` if it is already
  /// gone.
  pub fn dismiss(
    &mut self,
    id: NotificationId
  ) -> bool {
    let before = self.entries.len();
    self.entries.retain(|n| n.id != id);
    before != self.entries.len()
  }

  /// Drops every banner whose lifetime
  /// has elapsed and returns their ids.
  pub fn expire(
    &mut self,
    now: DateTime<Utc>
  ) -> Vec<NotificationId> {
    let mut expired = Vec::new();
    self.entries.retain(|n| {
      if n.expires_at <= now {
        expired.push(n.id);
        false
      } else {
        true
      }
    });
    if !expired.is_empty() {
      debug!(
        count = expired.len(),
        "expired notifications"
      );
    }
    expired
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = &Notification>
  {
    self.entries.iter()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    DateTime,
    Duration,
    TimeZone,
    Utc
  };
  use pretty_assertions::assert_eq;

  use super::{
    NotificationKind,
    NotificationQueue
  };

  fn t0() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 10, 19, 12, 0, 0
      )
      .single()
      .expect("valid instant")
  }

  #[test]
  fn banners_stack_in_insertion_order() {
    let mut queue = NotificationQueue::new(
      Duration::seconds(5)
    );
    queue.push(
      NotificationKind::Info,
      "first",
      t0()
    );
    queue.push(
      NotificationKind::Info,
      "first",
      t0()
    );
    queue.push(
      NotificationKind::Error,
      "second",
      t0()
    );

    let messages: Vec<_> = queue
      .iter()
      .map(|n| n.message.as_str())
      .collect();
    assert_eq!(
      messages,
      vec!["first", "first", "second"]
    );
  }

  #[test]
  fn expires_within_lifetime() {
    let mut queue = NotificationQueue::new(
      Duration::seconds(5)
    );
    assert_eq!(
      queue.lifetime(),
      Duration::seconds(5)
    );
    let early = queue
      .push(
        NotificationKind::Success,
        "saved",
        t0()
      )
      .id;
    let late = queue
      .push(
        NotificationKind::Info,
        "later",
        t0() + Duration::seconds(3)
      )
      .id;

    assert!(
      queue
        .expire(
          t0() + Duration::milliseconds(4_999)
        )
        .is_empty()
    );
    assert_eq!(
      queue.expire(t0() + Duration::seconds(5)),
      vec![early]
    );
    assert_eq!(
      queue.expire(t0() + Duration::seconds(8)),
      vec![late]
    );
    assert!(queue.is_empty());
  }

  #[test]
  fn manual_dismiss_preempts_expiry() {
    let mut queue = NotificationQueue::new(
      Duration::seconds(5)
    );
    let id = queue
      .push(
        NotificationKind::Warning,
        "heads up",
        t0()
      )
      .id;

    assert!(queue.dismiss(id));
    assert!(!queue.dismiss(id));
    assert!(
      queue
        .expire(t0() + Duration::seconds(10))
        .is_empty()
    );
  }

  #[test]
  fn error_maps_to_danger_alert() {
    let mut queue = NotificationQueue::new(
      Duration::seconds(5)
    );
    let banner = queue.push(
      NotificationKind::Error,
      "boom",
      t0()
    );
    assert_eq!(
      banner.class_list(),
      "alert alert-danger alert-dismissible \
       fade show"
    );
    assert_eq!(
      "success"
        .parse::<NotificationKind>()
        .expect("known kind"),
      NotificationKind::Success
    );
    assert!(
      "shout"
        .parse::<NotificationKind>()
        .is_err()
    );
  }
}
