//! Tracing targets, one per subsystem, so the debug view can filter them.

pub const SCAN: &str = "scan";
pub const HTTP: &str = "http";
pub const PRINTING: &str = "printing";
pub const UI: &str = "ui";
pub const STORAGE: &str = "storage";
