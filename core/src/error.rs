use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Scan request failed for {url}")]
    ScanHttp {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Scan timed out for {url}")]
    ScanTimeout { url: String, timeout_ms: u64 },
    #[error("Scan endpoint returned status {status} for {url}")]
    ScanStatus { url: String, status: u16 },
    #[error("Scan response for {url} is not a printer list")]
    ScanDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Scan failure for {url}")]
    ScanFailure { url: String, details: String },
    #[error("Test page timed out for {address}")]
    PrintTimeout { address: String, timeout_ms: u64 },
    #[error("Test page delivery failed for {address}")]
    PrintIo {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("RON {action} error")]
    Ron {
        action: StorageAction,
        path: Option<String>,
        #[source]
        source: ron::Error,
    },
    #[error("Storage {action} error")]
    StorageIo {
        action: StorageAction,
        path: Option<String>,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAction {
    Load,
    Save,
}

impl fmt::Display for StorageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageAction::Load => f.write_str("load"),
            StorageAction::Save => f.write_str("save"),
        }
    }
}

impl Error {
    pub fn user_summary(&self) -> String {
        match self {
            Error::ScanHttp { .. } => "Scan request failed.".to_string(),
            Error::ScanTimeout { .. } => "Scan timed out.".to_string(),
            Error::ScanStatus { status, .. } => {
                format!("Scan endpoint answered with status {status}.")
            }
            Error::ScanDecode { .. } => "Scan endpoint answered with unusable data.".to_string(),
            Error::ScanFailure { .. } => "Scan failed.".to_string(),
            Error::PrintTimeout { address, .. } => {
                format!("Test page timed out for {address}.")
            }
            Error::PrintIo { address, .. } => {
                format!("Could not deliver test page to {address}.")
            }
            Error::Ron { action, .. } => format!("Failed to {action} the printer list."),
            Error::StorageIo { action, .. } => format!("Failed to {action} the printer list file."),
        }
    }

    pub fn technical_detail(&self) -> String {
        match self {
            Error::ScanHttp { url, source } => format!("HTTP error for {url}: {source}"),
            Error::ScanTimeout { url, timeout_ms } => {
                format!("Scan timeout after {timeout_ms}ms for {url}.")
            }
            Error::ScanStatus { url, status } => format!("Status {status} from {url}."),
            Error::ScanDecode { url, source } => format!("Decode error for {url}: {source}"),
            Error::ScanFailure { url, details } => format!("Scan failure for {url}: {details}"),
            Error::PrintTimeout {
                address,
                timeout_ms,
            } => format!("Test page timeout after {timeout_ms}ms for {address}."),
            Error::PrintIo { address, source } => {
                format!("Test page IO error for {address}: {source}")
            }
            Error::Ron {
                action,
                path,
                source,
            } => {
                let path = path
                    .as_ref()
                    .map(|value| format!(" path={value}."))
                    .unwrap_or_default();
                format!("RON {action} error.{path} {source}")
            }
            Error::StorageIo {
                action,
                path,
                source,
            } => {
                let path = path
                    .as_ref()
                    .map(|value| format!(" path={value}."))
                    .unwrap_or_default();
                format!("Storage {action} error.{path} {source}")
            }
        }
    }
}
