use serde::{
  Deserialize,
  Serialize
};

/// Outgoing status change, encoded as
/// `status=<value>`.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct StatusRequest {
  pub url:          String,
  pub token_header: String,
  pub token:        String,
  pub status:       String
}

impl StatusRequest {
  /// Form fields in body order.
  #[must_use]
  pub fn form_fields(
    &self
  ) -> Vec<(&'static str, &str)> {
    vec![("status", self.status.as_str())]
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct StatusToggleResponse {
  #[serde(default)]
  pub success: bool,
  pub status:  Option<String>,
  pub message: Option<String>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct FormSubmitResponse {
  #[serde(default)]
  pub success: bool,
  pub message: Option<String>
}

#[cfg(test)]
mod tests {
  use super::{
    FormSubmitResponse,
    StatusToggleResponse
  };

  #[test]
  fn decodes_minimal_failure() {
    let resp: StatusToggleResponse =
      serde_json::from_str(
        r#"{"success": false}"#
      )
      .expect("decode failure");
    assert!(!resp.success);
    assert_eq!(resp.status, None);
  }

  #[test]
  fn decodes_success_with_label() {
    let resp: StatusToggleResponse =
      serde_json::from_str(
        r#"{"success": true, "status": "In Progress"}"#
      )
      .expect("decode success");
    assert!(resp.success);
    assert_eq!(
      resp.status.as_deref(),
      Some("In Progress")
    );
  }

  #[test]
  fn form_response_ignores_extra_fields() {
    let resp: FormSubmitResponse =
      serde_json::from_str(
        r#"{"success": true, "message": "Saved", "id": 7}"#
      )
      .expect("decode form response");
    assert!(resp.success);
    assert_eq!(
      resp.message.as_deref(),
      Some("Saved")
    );
  }
}
