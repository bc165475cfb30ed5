// Output ports for stackfold.

use crate::domain::report::Report;

pub mod html_exporter;
pub mod json_exporter;

pub use html_exporter::HtmlExporter;
pub use json_exporter::JsonExporter;

/// Writes a finished report somewhere as a concrete artifact.
pub trait ReportExporter {
    fn export(&self, report: &Report, path: &str) -> std::io::Result<()>;
}
