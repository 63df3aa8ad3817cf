pub mod app;
pub mod logging;

use iced::Application;

pub use app::{Flags, PrintSetupApp};
pub use logging::{apply_log_level, init_logging, LogEntry, LogLevel, LogStore, ReloadHandle};

pub type UiResult = iced::Result;

pub fn run(flags: Flags) -> UiResult {
    PrintSetupApp::run(iced::Settings::with_flags(flags))
}
