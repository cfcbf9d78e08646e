use anyhow::anyhow;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element
};

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

pub fn js_error(value: JsValue) -> anyhow::Error {
  match value.as_string() {
    | Some(text) => anyhow!(text),
    | None => anyhow!("{value:?}")
  }
}

/// All matches under `document`; an
/// invalid selector or missing document
/// yields nothing.
pub fn query_all(
  selector: &str
) -> Vec<Element> {
  let Some(document) = document() else {
    return Vec::new();
  };

  match document
    .query_selector_all(selector)
  {
    | Ok(list) => (0..list.length())
      .filter_map(|idx| list.item(idx))
      .filter_map(|node| {
        node.dyn_into::<Element>().ok()
      })
      .collect(),
    | Err(err) => {
      tracing::warn!(
        selector,
        error = ?err,
        "selector query failed"
      );
      Vec::new()
    }
  }
}

pub fn query_one(
  selector: &str
) -> Option<Element> {
  document()?
    .query_selector(selector)
    .ok()
    .flatten()
}

/// Non-empty attribute value.
pub fn attr(
  element: &Element,
  name: &str
) -> Option<String> {
  element
    .get_attribute(name)
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

pub fn add_class(
  element: &Element,
  class: &str
) {
  if let Err(err) =
    element.class_list().add_1(class)
  {
    tracing::warn!(
      class,
      error = ?err,
      "failed adding class"
    );
  }
}

pub fn remove_class(
  element: &Element,
  class: &str
) {
  if let Err(err) =
    element.class_list().remove_1(class)
  {
    tracing::warn!(
      class,
      error = ?err,
      "failed removing class"
    );
  }
}

/// `value` of any form control.
pub fn control_value(
  element: &Element
) -> String {
  js_sys::Reflect::get(
    element,
    &JsValue::from_str("value")
  )
  .ok()
  .and_then(|v| v.as_string())
  .unwrap_or_default()
}
