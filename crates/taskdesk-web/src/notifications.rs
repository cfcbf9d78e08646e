use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{
  Context,
  anyhow
};
use chrono::{
  Duration,
  Utc
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use taskdesk_core::{
  NotificationId,
  NotificationKind,
  NotificationQueue
};
use web_sys::{
  Document,
  Element,
  HtmlElement
};
use wasm_bindgen::JsCast;

use crate::dom::{
  self,
  js_error
};
use crate::widgets;

const CONTAINER_CLASS: &str =
  "notification-container";
const CONTAINER_CLASSES: &str =
  "notification-container \
   position-fixed top-0 end-0 p-3";
const CONTAINER_Z_INDEX: &str = "1050";
const ID_ATTRIBUTE: &str =
  "data-notification-id";

/// Toast-style banners stacked in one
/// fixed container.
pub struct Notifier {
  container: RefCell<Option<Element>>,
  queue:     RefCell<NotificationQueue>
}

impl Notifier {
  pub fn new(lifetime: Duration) -> Self {
    Self {
      container: RefCell::new(None),
      queue: RefCell::new(
        NotificationQueue::new(lifetime)
      )
    }
  }

  pub fn show(
    self: &Rc<Self>,
    kind: NotificationKind,
    message: &str
  ) -> anyhow::Result<NotificationId> {
    let document = dom::document()
      .ok_or_else(|| anyhow!("no document"))?;
    let container =
      self.container(&document)?;

    let (id, classes, delay_ms) = {
      let mut queue = self.queue.borrow_mut();
      let delay_ms = u32::try_from(
        queue.lifetime().num_milliseconds()
      )
      .unwrap_or(u32::MAX);
      let entry =
        queue.push(kind, message, Utc::now());
      (entry.id, entry.class_list(), delay_ms)
    };

    let banner = document
      .create_element("div")
      .map_err(js_error)?;
    banner.set_class_name(&classes);
    banner
      .set_attribute("role", "alert")
      .map_err(js_error)?;
    banner
      .set_attribute(
        ID_ATTRIBUTE,
        &id.to_string()
      )
      .map_err(js_error)?;
    banner.set_text_content(Some(message));

    let close = document
      .create_element("button")
      .map_err(js_error)?;
    close
      .set_attribute("type", "button")
      .map_err(js_error)?;
    close
      .set_attribute("aria-label", "Close")
      .map_err(js_error)?;
    close.set_class_name("btn-close");
    banner
      .append_child(&close)
      .map_err(js_error)?;
    container
      .append_child(&banner)
      .map_err(js_error)?;

    {
      let notifier = Rc::clone(self);
      EventListener::once(
        &close,
        "click",
        move |_| notifier.dismiss(id)
      )
      .forget();
    }
    {
      let notifier = Rc::clone(self);
      Timeout::new(delay_ms, move || {
        notifier.retire(id);
      })
      .forget();
    }

    Ok(id)
  }

  fn dismiss(&self, id: NotificationId) {
    if self.queue.borrow_mut().dismiss(id) {
      tracing::debug!(%id, "notification dismissed");
      self.remove_banner(id);
    }
  }

  /// Lifetime timer for `id`; sweeps any
  /// other banner whose time is up too.
  fn retire(&self, id: NotificationId) {
    let mut gone = {
      let mut queue = self.queue.borrow_mut();
      let mut gone = queue.expire(Utc::now());
      if queue.dismiss(id) {
        gone.push(id);
      }
      gone
    };
    gone.sort();
    gone.dedup();
    for id in gone {
      self.remove_banner(id);
    }
  }

  fn remove_banner(&self, id: NotificationId) {
    let Some(container) =
      self.container.borrow().clone()
    else {
      return;
    };
    let selector =
      format!("[{ID_ATTRIBUTE}=\"{id}\"]");
    if let Ok(Some(banner)) =
      container.query_selector(&selector)
    {
      widgets::close_alert(&banner);
    }
  }

  /// The shared container, created and
  /// attached to `<body>` on first use.
  fn container(
    &self,
    document: &Document
  ) -> anyhow::Result<Element> {
    if let Some(existing) =
      self.container.borrow().as_ref()
      && existing.is_connected()
    {
      return Ok(existing.clone());
    }

    let container = match document
      .query_selector(&format!(".{CONTAINER_CLASS}"))
      .map_err(js_error)?
    {
      | Some(found) => found,
      | None => {
        let created = document
          .create_element("div")
          .map_err(js_error)?;
        created.set_class_name(CONTAINER_CLASSES);
        if let Some(html) =
          created.dyn_ref::<HtmlElement>()
        {
          html
            .style()
            .set_property(
              "z-index",
              CONTAINER_Z_INDEX
            )
            .map_err(js_error)?;
        }
        document
          .body()
          .context("document has no body")?
          .append_child(&created)
          .map_err(js_error)?;
        tracing::debug!(
          "created notification container"
        );
        created
      }
    };

    *self.container.borrow_mut() =
      Some(container.clone());
    Ok(container)
  }
}
