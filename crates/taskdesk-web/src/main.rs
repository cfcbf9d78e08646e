mod api;
mod cosmetics;
mod dom;
mod exports;
mod forms;
mod init;
mod notifications;
mod page;
mod search;
mod status;
mod ticker;
mod widgets;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting task manager page \
     script"
  );

  init::run_when_ready();
}
