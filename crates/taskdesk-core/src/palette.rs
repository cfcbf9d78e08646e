use std::str::FromStr;

use anyhow::anyhow;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskStatus {
  Pending,
  InProgress,
  Completed,
  Cancelled
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskPriority {
  Low,
  Medium,
  High,
  Urgent
}

impl TaskStatus {
  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | Self::Pending => "Pending",
      | Self::InProgress => "In Progress",
      | Self::Completed => "Completed",
      | Self::Cancelled => "Cancelled"
    }
  }
}

impl FromStr for TaskStatus {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "pending" => Ok(Self::Pending),
      | "in_progress" => Ok(Self::InProgress),
      | "completed" => Ok(Self::Completed),
      | "cancelled" => Ok(Self::Cancelled),
      | other => Err(anyhow!(
        "unknown task status: {other}"
      ))
    }
  }
}

impl FromStr for TaskPriority {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "low" => Ok(Self::Low),
      | "medium" => Ok(Self::Medium),
      | "high" => Ok(Self::High),
      | "urgent" => Ok(Self::Urgent),
      | other => Err(anyhow!(
        "unknown task priority: {other}"
      ))
    }
  }
}

/// Which attribute drives a colorizer
/// and what its class looks like.
#[derive(Debug, Clone, Copy)]
pub struct StyleRule {
  pub name:      &'static str,
  pub selector:  &'static str,
  pub attribute: &'static str,
  pub prefix:    &'static str
}

pub const STYLE_RULES: &[StyleRule] = &[
  StyleRule {
    name:      "priority",
    selector:  "[data-priority]",
    attribute: "data-priority",
    prefix:    "bg-"
  },
  StyleRule {
    name:      "status",
    selector:  "[data-status]",
    attribute: "data-status",
    prefix:    "bg-"
  }
];

impl StyleRule {
  /// Class for a raw attribute value,
  /// or `None` when the value cannot be
  /// a class name.
  #[must_use]
  pub fn class_for(
    &self,
    raw: &str
  ) -> Option<String> {
    let value = raw.trim();
    if !is_class_fragment(value) {
      return None;
    }
    let known = match self.name {
      | "priority" => {
        value.parse::<TaskPriority>().is_ok()
      }
      | "status" => {
        value.parse::<TaskStatus>().is_ok()
      }
      | _ => true
    };
    if !known {
      tracing::debug!(
        rule = self.name,
        value,
        "styling unrecognized value"
      );
    }
    Some(format!("{}{value}", self.prefix))
  }
}

fn is_class_fragment(value: &str) -> bool {
  !value.is_empty()
    && value.chars().all(|c| {
      c.is_ascii_alphanumeric()
        || c == '-'
        || c == '_'
    })
}

/// Full class attribute for a status
/// badge after a successful toggle.
#[must_use]
pub fn status_badge_class(
  status: &str
) -> String {
  let status = status.trim();
  if is_class_fragment(status) {
    format!(
      "badge bg-{status} status-badge"
    )
  } else {
    "badge status-badge".to_string()
  }
}

/// Text shown on a badge when the
/// server did not send a display label.
#[must_use]
pub fn fallback_status_label(
  status: &str
) -> String {
  status
    .parse::<TaskStatus>()
    .map(|s| s.label().to_string())
    .unwrap_or_else(|_| {
      status.trim().to_string()
    })
}

/// Selector for the badge belonging to
/// one task row or card.
#[must_use]
pub fn status_badge_selector(
  task_id: &str
) -> String {
  let escaped = task_id
    .replace('\\', "\\\\")
    .replace('"', "\\\"");
  format!(
    "[data-task-id=\"{escaped}\"] \
     .status-badge"
  )
}

#[cfg(test)]
mod tests {
  use super::{
    STYLE_RULES,
    TaskStatus,
    fallback_status_label,
    status_badge_class,
    status_badge_selector
  };

  #[test]
  fn rules_prefix_raw_values() {
    let priority = &STYLE_RULES[0];
    assert_eq!(
      priority.class_for("urgent"),
      Some("bg-urgent".to_string())
    );
    let status = &STYLE_RULES[1];
    assert_eq!(
      status.class_for(" in_progress "),
      Some("bg-in_progress".to_string())
    );
    assert_eq!(
      status.class_for("archived"),
      Some("bg-archived".to_string())
    );
  }

  #[test]
  fn rejects_values_that_are_not_classes(
  ) {
    let status = &STYLE_RULES[1];
    assert_eq!(status.class_for(""), None);
    assert_eq!(
      status.class_for("a b"),
      None
    );
    assert_eq!(
      status_badge_class("x\" onclick"),
      "badge status-badge"
    );
  }

  #[test]
  fn badge_class_and_selector() {
    assert_eq!(
      status_badge_class("completed"),
      "badge bg-completed status-badge"
    );
    assert_eq!(
      status_badge_selector("42"),
      "[data-task-id=\"42\"] .status-badge"
    );
  }

  #[test]
  fn fallback_label_prefers_known_names(
  ) {
    assert_eq!(
      fallback_status_label("in_progress"),
      TaskStatus::InProgress.label()
    );
    assert_eq!(
      fallback_status_label("done"),
      "done"
    );
  }
}
