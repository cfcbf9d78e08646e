//! Bindings to the Bootstrap 5 globals
//! the server-rendered pages load.

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
  #[wasm_bindgen(js_namespace = bootstrap)]
  type Tooltip;

  #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Tooltip")]
  fn new(element: &Element) -> Result<Tooltip, JsValue>;

  #[wasm_bindgen(js_namespace = bootstrap)]
  type Popover;

  #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Popover")]
  fn new(element: &Element) -> Result<Popover, JsValue>;

  #[wasm_bindgen(js_namespace = bootstrap)]
  type Alert;

  #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Alert")]
  fn new(element: &Element) -> Result<Alert, JsValue>;

  #[wasm_bindgen(method)]
  fn close(this: &Alert);
}

pub fn bootstrap_loaded() -> bool {
  js_sys::Reflect::has(
    &js_sys::global(),
    &JsValue::from_str("bootstrap")
  )
  .unwrap_or(false)
}

pub fn tooltip(element: &Element) {
  if let Err(err) = Tooltip::new(element) {
    tracing::warn!(error = ?err, "tooltip init failed");
  }
}

pub fn popover(element: &Element) {
  if let Err(err) = Popover::new(element) {
    tracing::warn!(error = ?err, "popover init failed");
  }
}

/// Fades an alert out through
/// Bootstrap, or drops it outright when
/// Bootstrap is absent.
pub fn close_alert(element: &Element) {
  if bootstrap_loaded() {
    match Alert::new(element) {
      | Ok(alert) => {
        alert.close();
        return;
      }
      | Err(err) => {
        tracing::warn!(error = ?err, "alert close failed");
      }
    }
  }
  element.remove();
}
