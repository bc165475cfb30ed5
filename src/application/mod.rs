// Use-case wiring for stackfold.

use crate::domain::calltree::build_tree;
use crate::domain::report::{build_report, Report};
use crate::ports::ReportExporter;

pub struct ProfileUsecase<'a> {
    pub exporter: &'a dyn ReportExporter,
}

impl<'a> ProfileUsecase<'a> {
    /// Fold a raw backtrace log into a report, hand it to the exporter, and
    /// return the report so callers can summarize the run.
    pub fn run(&self, log_content: &str, export_path: &str) -> std::io::Result<Report> {
        let tree = build_tree(log_content);
        let report = build_report(&tree);
        self.exporter.export(&report, export_path)?;
        Ok(report)
    }
}
