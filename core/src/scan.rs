use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::model::PrinterRecord;
use crate::targets;
use crate::Error;

/// Path appended to the configured base URL. The backend exposes the scan
/// one segment below the printer admin page.
pub const SCAN_ENDPOINT_SUFFIX: &str = "printers/scan-printers/";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/admin/printers/printer/";

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub base_url: String,
    /// `None` leaves the request unbounded, matching the historical
    /// behavior of the admin page this replaces.
    pub timeout: Option<Duration>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ScanConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full scan URL: the base with a guaranteed trailing slash plus the
    /// fixed suffix.
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim();
        let mut url = base.to_string();
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(SCAN_ENDPOINT_SUFFIX);
        url
    }
}

pub type ScanFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<PrinterRecord>, Error>> + Send + 'a>>;

pub trait ScanClient: Send + Sync {
    fn scan<'a>(&'a self) -> ScanFuture<'a>;
}

#[derive(Debug, Clone)]
pub struct HttpScanClient {
    client: reqwest::Client,
    config: ScanConfig,
}

impl HttpScanClient {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub async fn scan(&self) -> Result<Vec<PrinterRecord>, Error> {
        let url = self.config.endpoint_url();

        debug!(
            target: targets::HTTP,
            url = %url,
            timeout_ms = ?self.config.timeout.map(|value| value.as_millis()),
            "Printer scan GET"
        );

        let request = fetch_records(&self.client, &url);
        let result = match self.config.timeout {
            Some(deadline) => match timeout(deadline, request).await {
                Ok(result) => result,
                Err(_) => Err(Error::ScanTimeout {
                    url: url.clone(),
                    timeout_ms: deadline.as_millis() as u64,
                }),
            },
            None => request.await,
        };

        match &result {
            Ok(records) => {
                debug!(
                    target: targets::SCAN,
                    url = %url,
                    count = records.len(),
                    "Scan ok"
                );
            }
            Err(error) => {
                warn!(
                    target: targets::SCAN,
                    url = %url,
                    error = %error,
                    "Scan failed"
                );
            }
        }

        result
    }
}

impl ScanClient for HttpScanClient {
    fn scan<'a>(&'a self) -> ScanFuture<'a> {
        Box::pin(async move { HttpScanClient::scan(self).await })
    }
}

async fn fetch_records(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<PrinterRecord>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| Error::ScanHttp {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::ScanStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| Error::ScanHttp {
        url: url.to_string(),
        source,
    })?;
    decode_records(url, &body)
}

/// Decode the scan payload, rejecting anything that is not a JSON array of
/// `{ip, name}` objects. Unknown extra fields pass through; duplicates are
/// preserved in server order.
pub fn decode_records(url: &str, body: &str) -> Result<Vec<PrinterRecord>, Error> {
    serde_json::from_str(body).map_err(|source| Error::ScanDecode {
        url: url.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Default)]
pub struct MockScanClient {
    queue: Arc<Mutex<VecDeque<Result<Vec<PrinterRecord>, Error>>>>,
}

impl MockScanClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_records(&self, records: Vec<PrinterRecord>) {
        self.push_result(Ok(records));
    }

    pub fn push_error(&self, error: Error) {
        self.push_result(Err(error));
    }

    fn push_result(&self, result: Result<Vec<PrinterRecord>, Error>) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(result);
        }
    }

    fn pop_result(&self) -> Option<Result<Vec<PrinterRecord>, Error>> {
        if let Ok(mut queue) = self.queue.lock() {
            return queue.pop_front();
        }
        None
    }
}

impl ScanClient for MockScanClient {
    fn scan<'a>(&'a self) -> ScanFuture<'a> {
        Box::pin(async move {
            if let Some(result) = self.pop_result() {
                return result;
            }

            Err(Error::ScanFailure {
                url: "mock".to_string(),
                details: "MockScanClient queue is empty".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_future<T>(future: impl std::future::Future<Output = T>) -> T {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("tokio runtime");
        runtime.block_on(future)
    }

    #[test]
    fn endpoint_url_appends_suffix() {
        let config = ScanConfig::new("http://pos.local/admin/printers/printer/");
        assert_eq!(
            config.endpoint_url(),
            "http://pos.local/admin/printers/printer/printers/scan-printers/"
        );
    }

    #[test]
    fn endpoint_url_inserts_missing_slash() {
        let config = ScanConfig::new("http://pos.local/admin/printers/printer");
        assert_eq!(
            config.endpoint_url(),
            "http://pos.local/admin/printers/printer/printers/scan-printers/"
        );
    }

    #[test]
    fn decode_accepts_records_with_extra_fields() {
        let body = r#"[
            {"ip": "10.0.0.5", "name": "Lobby Printer", "vendor": "ignored"},
            {"ip": "10.0.0.5", "name": "Lobby Printer"}
        ]"#;

        let records = decode_records("test", body).expect("decode");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
        assert_eq!(records[0].ip, "10.0.0.5");
    }

    #[test]
    fn decode_rejects_non_array_body() {
        let body = r#"{"ip": "10.0.0.5", "name": "Lobby Printer"}"#;
        let error = decode_records("test", body).expect_err("expected decode error");
        assert!(matches!(error, Error::ScanDecode { .. }));
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let body = r#"[{"ip": "10.0.0.5"}]"#;
        let error = decode_records("test", body).expect_err("expected decode error");
        assert!(matches!(error, Error::ScanDecode { .. }));
    }

    #[test]
    fn decode_accepts_empty_array() {
        let records = decode_records("test", "[]").expect("decode");
        assert!(records.is_empty());
    }

    #[test]
    fn mock_scan_returns_queued_records() {
        let mock = MockScanClient::new();
        mock.push_records(vec![PrinterRecord::new("10.0.0.5", "Lobby Printer")]);

        let records = run_future(mock.scan()).expect("mock records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Lobby Printer");
    }

    #[test]
    fn mock_scan_empty_queue_returns_error() {
        let mock = MockScanClient::new();
        let error = run_future(mock.scan()).expect_err("expected error");
        assert!(matches!(error, Error::ScanFailure { .. }));
    }
}
