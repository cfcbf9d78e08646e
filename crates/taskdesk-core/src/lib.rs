pub mod config;
pub mod countdown;
pub mod datetime;
pub mod debounce;
pub mod form;
pub mod notify;
pub mod palette;
pub mod status;
pub mod wire;

pub use config::UiConfig;
pub use countdown::{
  Severity,
  TimeRemaining
};
pub use debounce::DebounceGate;
pub use notify::{
  NotificationId,
  NotificationKind,
  NotificationQueue
};
pub use status::{
  StatusTransport,
  StatusUpdateError,
  StatusView,
  update_task_status
};
