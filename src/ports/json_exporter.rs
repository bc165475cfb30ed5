//! JSON Report Exporter
//!
//! Machine-readable counterpart of the HTML page: the presentation model
//! serialized as-is, nested children included.

use crate::domain::report::Report;
use crate::ports::ReportExporter;

pub struct JsonExporter;

impl ReportExporter for JsonExporter {
    fn export(&self, report: &Report, path: &str) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(report)?;
        std::fs::write(path, content)
    }
}
