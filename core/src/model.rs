use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub type EpochSeconds = u64;

/// Raw-print port most receipt printers listen on.
pub const DEFAULT_RAW_PRINT_PORT: u16 = 9100;

/// One printer as reported by the backend scan endpoint.
///
/// The wire shape is a JSON array of these objects. Extra fields are
/// ignored; `ip` and `name` must both be present strings. Duplicates are
/// kept in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterRecord {
    pub ip: String,
    pub name: String,
}

impl PrinterRecord {
    pub fn new(ip: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
        }
    }

    /// Label shown for this record in the selection dropdown.
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.ip)
    }
}

impl fmt::Display for PrinterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterAddress {
    pub host: String,
    #[serde(default = "default_raw_print_port")]
    pub port: u16,
}

impl PrinterAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_RAW_PRINT_PORT,
        }
    }
}

impl fmt::Display for PrinterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn default_raw_print_port() -> u16 {
    DEFAULT_RAW_PRINT_PORT
}

/// A printer the operator has registered, as persisted to the RON list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredPrinter {
    pub name: String,
    pub ip_address: String,
    #[serde(default = "default_raw_print_port")]
    pub port: u16,
    #[serde(default)]
    pub is_main: bool,
    pub added_at: Option<EpochSeconds>,
}

impl RegisteredPrinter {
    pub fn new(name: impl Into<String>, ip_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address: ip_address.into(),
            port: DEFAULT_RAW_PRINT_PORT,
            is_main: false,
            added_at: None,
        }
    }

    pub fn address(&self) -> PrinterAddress {
        PrinterAddress::new(self.ip_address.clone(), self.port)
    }
}

pub fn now_epoch_seconds() -> EpochSeconds {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_label_puts_ip_in_parens() {
        let record = PrinterRecord::new("10.0.0.5", "Lobby Printer");
        assert_eq!(record.option_label(), "Lobby Printer (10.0.0.5)");
        assert_eq!(record.to_string(), "Lobby Printer (10.0.0.5)");
    }

    #[test]
    fn registered_printer_roundtrip() {
        let printer = RegisteredPrinter {
            name: "Bar".to_string(),
            ip_address: "192.168.1.40".to_string(),
            port: 9100,
            is_main: true,
            added_at: Some(1_725_000_000),
        };

        let ron = ron::ser::to_string_pretty(&vec![printer.clone()], ron::ser::PrettyConfig::default())
            .expect("serialize RON");
        let decoded: Vec<RegisteredPrinter> = ron::from_str(&ron).expect("deserialize RON");

        assert_eq!(decoded, vec![printer]);
    }

    #[test]
    fn registered_printer_defaults_port_and_main_flag() {
        let ron = r#"[(name: "Kitchen", ip_address: "192.168.1.41", added_at: None)]"#;
        let decoded: Vec<RegisteredPrinter> = ron::from_str(ron).expect("deserialize RON");

        assert_eq!(decoded[0].port, DEFAULT_RAW_PRINT_PORT);
        assert!(!decoded[0].is_main);
        assert_eq!(decoded[0].address().to_string(), "192.168.1.41:9100");
    }
}
