use anyhow::{
  Context,
  anyhow
};
use gloo::net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

/// POSTs `body` with the anti-forgery
/// header and decodes the JSON reply.
///
/// Non-2xx replies are still decoded;
/// the server reports logical failures
/// in the payload.
pub async fn post_json<R>(
  url: &str,
  headers: &[(&str, &str)],
  body: impl Into<JsValue>
) -> anyhow::Result<R>
where
  R: DeserializeOwned
{
  let mut builder = Request::post(url);
  for (name, value) in headers {
    builder = builder.header(name, value);
  }

  let request =
    builder.body(body).map_err(|e| {
      anyhow!(
        "failed to build request: {e}"
      )
    })?;
  let response =
    request.send().await.map_err(|e| {
      anyhow!("request error: {e}")
    })?;

  if !response.ok() {
    tracing::warn!(
      url,
      status = response.status(),
      "non-success HTTP status"
    );
  }

  let text =
    response.text().await.map_err(|e| {
      anyhow!(
        "failed reading response: {e}"
      )
    })?;
  serde_json::from_str(&text)
    .with_context(|| {
      format!(
        "decode error for {url} (HTTP {})",
        response.status()
      )
    })
}
