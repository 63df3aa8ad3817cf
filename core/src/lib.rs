pub mod error;
pub mod model;
pub mod scan;
pub mod storage;
pub mod targets;
pub mod testpage;
pub mod widget;

pub use error::{Error, StorageAction};
pub use model::{
    now_epoch_seconds, EpochSeconds, PrinterAddress, PrinterRecord, RegisteredPrinter,
    DEFAULT_RAW_PRINT_PORT,
};
pub use scan::{
    HttpScanClient, MockScanClient, ScanClient, ScanConfig, ScanFuture, SCAN_ENDPOINT_SUFFIX,
};
pub use storage::{load_printers, save_printers};
pub use testpage::{render_test_page, send_test_page, TestPageConfig};
pub use widget::{
    PrinterForm, ScanOutcome, ScanToken, ScanWidget, SCAN_BUTTON_LABEL, SCAN_PLACEHOLDER_LABEL,
};
