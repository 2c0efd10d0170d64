//! Report adapters - Rendering analysis reports.

mod json_exporter;

pub use json_exporter::JsonReportExporter;
