//! Test page delivery over the printer's raw TCP port.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::model::PrinterAddress;
use crate::targets;
use crate::Error;

const TEST_PAGE_FOOTER: &str = "Printer setup test page";

#[derive(Debug, Clone)]
pub struct TestPageConfig {
    pub timeout: Duration,
}

impl Default for TestPageConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Fixed sample receipt so the operator can check paper feed and charset.
pub fn render_test_page(printer_name: &str) -> String {
    let ruler = "=".repeat(32);
    let thin_ruler = "-".repeat(32);

    let mut page = String::new();
    let mut push_line = |line: &str| {
        page.push_str(line);
        page.push('\n');
    };

    push_line(&ruler);
    push_line(&format!("  {printer_name}"));
    push_line(&ruler);
    push_line("Order #0000  Table 0");
    push_line(&thin_ruler);
    push_line("2x Sample item          10.00");
    push_line("1x Another item          4.50");
    push_line(&thin_ruler);
    push_line("Total:                  14.50");
    push_line(&thin_ruler);
    push_line(TEST_PAGE_FOOTER);
    push_line(&ruler);

    page
}

/// Write the page to `address` and shut the connection down cleanly. The
/// whole exchange runs under one deadline.
pub async fn send_test_page(
    address: PrinterAddress,
    payload: String,
    config: TestPageConfig,
) -> Result<(), Error> {
    let address_label = address.to_string();
    let timeout_ms = config.timeout.as_millis() as u64;

    debug!(
        target: targets::PRINTING,
        address = %address_label,
        bytes = payload.len(),
        timeout_ms,
        "Sending test page"
    );

    let deliver = async {
        let mut stream = TcpStream::connect((address.host.as_str(), address.port)).await?;
        stream.write_all(payload.as_bytes()).await?;
        stream.shutdown().await?;
        Ok::<(), std::io::Error>(())
    };

    match timeout(config.timeout, deliver).await {
        Ok(Ok(())) => {
            info!(
                target: targets::PRINTING,
                address = %address_label,
                "Test page delivered"
            );
            Ok(())
        }
        Ok(Err(source)) => Err(Error::PrintIo {
            address: address_label,
            source,
        }),
        Err(_) => Err(Error::PrintTimeout {
            address: address_label,
            timeout_ms,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn run_future<T>(future: impl std::future::Future<Output = T>) -> T {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        runtime.block_on(future)
    }

    #[test]
    fn test_page_names_the_printer() {
        let page = render_test_page("Lobby Printer");
        assert!(page.contains("Lobby Printer"));
        assert!(page.contains(TEST_PAGE_FOOTER));
        assert!(page.ends_with('\n'));
    }

    #[test]
    fn test_page_is_delivered_over_tcp() {
        run_future(async {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let port = listener.local_addr().expect("local addr").port();

            let server = tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.expect("accept");
                let mut received = Vec::new();
                socket.read_to_end(&mut received).await.expect("read");
                received
            });

            let payload = render_test_page("Lobby Printer");
            let address = PrinterAddress::new("127.0.0.1", port);
            send_test_page(address, payload.clone(), TestPageConfig::default())
                .await
                .expect("send");

            let received = server.await.expect("server task");
            assert_eq!(received, payload.into_bytes());
        });
    }

    #[test]
    fn refused_connection_is_an_io_error() {
        run_future(async {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let port = listener.local_addr().expect("local addr").port();
            drop(listener);

            let address = PrinterAddress::new("127.0.0.1", port);
            let error = send_test_page(
                address.clone(),
                render_test_page("Lobby Printer"),
                TestPageConfig::default(),
            )
            .await
            .expect_err("expected error");

            match error {
                Error::PrintIo {
                    address: error_address,
                    ..
                } => assert_eq!(error_address, address.to_string()),
                Error::PrintTimeout { .. } => {}
                other => panic!("unexpected error: {other:?}"),
            }
        });
    }
}
