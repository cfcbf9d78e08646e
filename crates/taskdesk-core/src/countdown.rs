use std::fmt;

use chrono::{
  DateTime,
  Duration,
  Utc
};

/// How long until a task falls due.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TimeRemaining {
  Overdue,
  Days(i64),
  Hours(i64),
  DueSoon
}

/// Text color applied next to a
/// countdown.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Severity {
  Danger,
  Warning,
  Success
}

impl TimeRemaining {
  #[must_use]
  pub fn between(
    due: DateTime<Utc>,
    now: DateTime<Utc>
  ) -> Self {
    let diff = due - now;
    if diff < Duration::zero() {
      return Self::Overdue;
    }

    let days = diff.num_days();
    if days > 0 {
      return Self::Days(days);
    }

    let hours = diff.num_hours();
    if hours > 0 {
      return Self::Hours(hours);
    }

    Self::DueSoon
  }

  #[must_use]
  pub fn severity(self) -> Severity {
    match self {
      | Self::Overdue => Severity::Danger,
      | Self::Days(_) => Severity::Success,
      | Self::Hours(_) | Self::DueSoon => {
        Severity::Warning
      }
    }
  }
}

impl fmt::Display for TimeRemaining {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match *self {
      | Self::Overdue => f.write_str("Overdue"),
      | Self::Days(n) => write!(
        f,
        "{n} day{} remaining",
        plural(n)
      ),
      | Self::Hours(n) => write!(
        f,
        "{n} hour{} remaining",
        plural(n)
      ),
      | Self::DueSoon => f.write_str("Due soon")
    }
  }
}

fn plural(n: i64) -> &'static str {
  if n > 1 { "s" } else { "" }
}

impl Severity {
  pub const ALL: [Severity; 3] = [
    Severity::Danger,
    Severity::Warning,
    Severity::Success
  ];

  #[must_use]
  pub fn text_class(
    self
  ) -> &'static str {
    match self {
      | Self::Danger => "text-danger",
      | Self::Warning => "text-warning",
      | Self::Success => "text-success"
    }
  }
}
