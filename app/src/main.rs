use tracing::Level;

use printsetup_core::targets;
use printsetup_ui::logging::{init_logging, LogLevel, LogStore};
use printsetup_ui::{run, Flags, UiResult};

fn main() -> UiResult {
    let log_store = LogStore::new(2000);
    let reload_handle = init_logging(log_store.clone(), LogLevel::Info);

    tracing::info!(target: targets::UI, "Printer Setup starting");
    tracing::info!(target: targets::SCAN, "Scan target ready");
    tracing::info!(target: targets::HTTP, "HTTP target ready");
    tracing::info!(target: targets::PRINTING, "Printing target ready");
    tracing::info!(target: targets::STORAGE, "Storage target ready");
    tracing::event!(target: targets::UI, Level::DEBUG, "Logging infrastructure online");

    run(Flags {
        log_store,
        reload_handle,
    })
}
